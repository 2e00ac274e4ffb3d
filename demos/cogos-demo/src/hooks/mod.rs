//! Sample hooks wired into the demo pipeline

mod bias_filter;
mod database;
mod fact_check;
mod simulation;
mod vision;

pub use bias_filter::BiasFilterHook;
pub use database::{DatabaseQueryHook, DemoDatabase};
pub use fact_check::FactCheckHook;
pub use simulation::SimulationHook;
pub use vision::VisionAnalysisHook;

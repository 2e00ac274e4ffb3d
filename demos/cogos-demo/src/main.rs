//! Cognitive hooks demo
//!
//! Registers one hook per category, runs a single request through the
//! orchestrator and prints the synthesized response together with the
//! per-hook trace and collected metrics.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use colored::*;
use cogos_orchestrator::HookOrchestrator;
use cogos_policy::PolicyEngine;
use cogos_registry::HookRegistry;
use cogos_resilience::ResilientExecutor;
use cogos_types::{
    ExecutionContext, HookRequest, HookResponse, HookStatus, InMemoryMetricsSink,
    SecurityPosture, TracingAuditSink,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod hooks;
mod llm;

use config::DemoConfig;
use hooks::{
    BiasFilterHook, DatabaseQueryHook, DemoDatabase, FactCheckHook, SimulationHook,
    VisionAnalysisHook,
};
use llm::EchoLlmClient;

const DEFAULT_PROMPT: &str =
    "Fact-check this and run a 100-step simulation, then analyze image safety.";

/// Cognitive hooks demo CLI
#[derive(Parser)]
#[command(name = "cogos-demo")]
#[command(about = "Run one request through the cognitive hook pipeline", long_about = None)]
#[command(version)]
struct Cli {
    /// Prompt to orchestrate
    #[arg(default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Configuration file path
    #[arg(short, long, env = "COGOS_CONFIG")]
    config: Option<String>,

    /// Requesting user
    #[arg(short, long, default_value = "demo.user")]
    user: String,

    /// Granted scopes (repeatable)
    #[arg(short, long, default_values_t = vec![cogos_policy::ENTERPRISE_SCOPE.to_string()])]
    scope: Vec<String>,

    /// Random-walk length for the simulation hook
    #[arg(long, default_value_t = 100)]
    steps: u64,

    /// Image handed to the vision hook
    #[arg(long, default_value = "file:///tmp/cogos-demo.png")]
    image: String,

    /// SQL handed to the database hook
    #[arg(long)]
    sql: Option<String>,

    /// Attach the in-process sample database
    #[arg(long)]
    with_db: bool,

    /// Log level
    #[arg(long, env = "COGOS_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DemoConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let metrics = Arc::new(InMemoryMetricsSink::new());
    let registry = Arc::new(HookRegistry::new());
    registry.register(Arc::new(
        BiasFilterHook::new().context("compiling bias filter patterns")?,
    ));
    registry.register(Arc::new(FactCheckHook::new()));
    registry.register(Arc::new(SimulationHook::new()));
    registry.register(Arc::new(DatabaseQueryHook::new()));
    registry.register(Arc::new(VisionAnalysisHook::new()));

    let executor = ResilientExecutor::new(config.executor.clone())
        .context("invalid executor configuration")?
        .with_metrics(metrics.clone());
    let llm = Arc::new(EchoLlmClient);

    let orchestrator = HookOrchestrator::new(
        registry,
        Arc::new(executor),
        Arc::new(PolicyEngine::new()),
        llm.clone(),
    )
    .with_config(config.orchestrator.clone())
    .context("invalid orchestrator configuration")?;

    let security = SecurityPosture::new(cli.user.clone(), ["user"], cli.scope.clone());
    let mut ctx = ExecutionContext::new(security)
        .with_llm(llm)
        .with_audit(Arc::new(TracingAuditSink))
        .with_config_map(config.context.clone());
    if cli.with_db {
        ctx = ctx.with_resource(Arc::new(DemoDatabase::sample()));
    }

    let mut request = HookRequest::new(uuid::Uuid::new_v4().to_string(), &cli.user, &cli.prompt)
        .context("building request")?
        .with_payload("simulationSteps", cli.steps)
        .with_payload("imageUri", cli.image.clone())
        .with_timestamp(chrono::Utc::now());
    if let Some(sql) = &cli.sql {
        request = request.with_payload("sqlQuery", sql.clone());
    }

    info!(request_id = %request.request_id(), user = %cli.user, "Dispatching demo request");
    let response = orchestrator.handle(&request, &ctx).await;

    print_response(&response);
    print_metrics(&metrics);

    Ok(())
}

fn print_response(response: &HookResponse) {
    println!();
    println!("{}", "=== FINAL RESPONSE ===".cyan().bold());
    println!("{}", response.final_content());
    println!();
    println!("{}", "=== HOOK TRACE ===".cyan().bold());

    for result in response.results() {
        let status = match result.status() {
            HookStatus::Success => result.status().to_string().green(),
            HookStatus::Skipped => result.status().to_string().dimmed(),
            HookStatus::RetryableFailure => result.status().to_string().yellow(),
            HookStatus::Failed | HookStatus::CircuitOpen => result.status().to_string().red(),
        };
        println!(
            "  {:<22} {:<11} {:<14} {:>5}ms  {}",
            result.hook_id().bold(),
            result.category().to_string(),
            status,
            result.latency().as_millis(),
            result.message()
        );
    }
    println!();
    println!(
        "  {} of {} hooks succeeded",
        response.succeeded().to_string().green().bold(),
        response.results().len()
    );
}

fn print_metrics(metrics: &InMemoryMetricsSink) {
    let mut snapshot: Vec<_> = metrics.snapshot().into_iter().collect();
    if snapshot.is_empty() {
        return;
    }
    snapshot.sort_by(|a, b| a.0.cmp(&b.0));

    println!();
    println!("{}", "=== METRICS ===".cyan().bold());
    for (hook_id, m) in snapshot {
        println!(
            "  {:<22} ok={} failed={} circuit_open={}{}",
            hook_id,
            m.successes,
            m.failures,
            m.circuit_opens,
            m.last_failure
                .map(|reason| format!(" last_failure=\"{}\"", reason))
                .unwrap_or_default()
        );
    }
}

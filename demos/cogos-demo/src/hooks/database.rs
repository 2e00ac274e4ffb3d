//! Read-only database query hook
//!
//! The connection is supplied through the execution context's resource
//! handle. Without one the hook fails, which is the normal state of the demo
//! unless `--with-db` is passed.

use std::time::Instant;

use async_trait::async_trait;
use cogos_types::{
    ExecutionContext, Hook, HookCategory, HookDescriptor, HookError, HookRequest, HookResult,
    HookStatus,
};
use serde_json::{json, Value};

/// In-process stand-in for a database connection.
#[derive(Debug, Clone)]
pub struct DemoDatabase {
    rows: Vec<Value>,
}

impl DemoDatabase {
    pub fn sample() -> Self {
        Self {
            rows: vec![
                json!({ "id": 1, "name": "fact-check-hook", "category": "reasoning" }),
                json!({ "id": 2, "name": "vision-analysis-hook", "category": "multimodal" }),
            ],
        }
    }

    /// Returns every row for any SELECT.
    pub fn query(&self, _sql: &str) -> Vec<Value> {
        self.rows.clone()
    }
}

#[derive(Debug)]
pub struct DatabaseQueryHook {
    descriptor: HookDescriptor,
}

impl DatabaseQueryHook {
    pub fn new() -> Self {
        Self {
            descriptor: HookDescriptor::new(
                "database-query-hook",
                HookCategory::Enterprise,
                ["db-query", "enterprise"],
            ),
        }
    }
}

impl Default for DatabaseQueryHook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Hook for DatabaseQueryHook {
    fn descriptor(&self) -> &HookDescriptor {
        &self.descriptor
    }

    fn supports(&self, request: &HookRequest, _ctx: &ExecutionContext) -> bool {
        request.payload_value("sqlQuery").is_some()
    }

    async fn execute(
        &self,
        request: &HookRequest,
        ctx: &ExecutionContext,
    ) -> Result<HookResult, HookError> {
        let start = Instant::now();
        let db = ctx.resource::<DemoDatabase>().ok_or_else(|| {
            HookError::Unavailable("no database connection in execution context".into())
        })?;

        let sql = request
            .payload_value("sqlQuery")
            .and_then(Value::as_str)
            .ok_or_else(|| HookError::InvalidInput("payload 'sqlQuery' must be a string".into()))?;

        if !sql.trim_start().to_lowercase().starts_with("select") {
            return Err(HookError::InvalidInput(
                "only SELECT statements are allowed".into(),
            ));
        }

        let rows = db.query(sql);
        Ok(
            HookResult::builder(self.id(), self.category(), HookStatus::Success)
                .message("Successfully executed database query")
                .data(Value::Array(rows))
                .latency(start.elapsed())
                .build(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::test_support::{ctx, request};
    use std::sync::Arc;

    fn query(sql: &str) -> HookRequest {
        request("look it up").with_payload("sqlQuery", sql)
    }

    #[test]
    fn test_supports_only_with_sql_payload() {
        let hook = DatabaseQueryHook::new();
        assert!(hook.supports(&query("SELECT 1"), &ctx()));
        assert!(!hook.supports(&request("look it up"), &ctx()));
    }

    #[tokio::test]
    async fn test_fails_without_connection() {
        let err = DatabaseQueryHook::new()
            .execute(&query("SELECT 1"), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_rejects_writes() {
        let ctx = ctx().with_resource(Arc::new(DemoDatabase::sample()));
        let err = DatabaseQueryHook::new()
            .execute(&query("DELETE FROM hooks"), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_select_returns_rows() {
        let ctx = ctx().with_resource(Arc::new(DemoDatabase::sample()));
        let result = DatabaseQueryHook::new()
            .execute(&query("  select * from hooks"), &ctx)
            .await
            .unwrap();
        assert_eq!(result.data().unwrap().as_array().unwrap().len(), 2);
    }
}

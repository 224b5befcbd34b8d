//! Execute query use case
//!
//! Runs accepted SQL against the structured store under a deadline.

use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::structured_store::{StoreError, StructuredStore};
use jurisrag_domain::{AcceptedSql, QueryResult};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Failure of the store after validation succeeded.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Query timed out after {0:?}")]
    Timeout(Duration),
}

/// Use case for executing validated SQL
pub struct ExecuteQueryUseCase {
    store: Arc<dyn StructuredStore>,
    audit: Arc<dyn AuditLogger>,
    timeout: Duration,
}

impl ExecuteQueryUseCase {
    pub fn new(store: Arc<dyn StructuredStore>) -> Self {
        Self {
            store,
            audit: Arc::new(NoAuditLogger),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn execute(&self, sql: &AcceptedSql) -> Result<QueryResult, ExecutionError> {
        // The store owns the deadline so the connection is closed before we return
        let result = match self.store.query(sql, self.timeout).await {
            Ok(rows) => Ok(rows),
            Err(StoreError::Timeout(after)) => Err(ExecutionError::Timeout(after)),
            Err(e) => Err(ExecutionError::Store(e)),
        };

        match &result {
            Ok(rows) => info!("Structured query returned {} row(s)", rows.row_count()),
            Err(e) => {
                warn!("Structured query failed: {}", e);
                self.audit.log(AuditEvent::new(
                    "execution_error",
                    json!({
                        "sql": sql.sql(),
                        "attempt": sql.attempt(),
                        "error": e.to_string(),
                    }),
                ));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FakeStore, RecordingAudit};
    use jurisrag_domain::{GeneratedSql, SqlValidator};
    use serde_json::Map;

    fn accepted(sql: &str) -> AcceptedSql {
        SqlValidator::default()
            .accept(GeneratedSql::new(sql, 1))
            .unwrap()
    }

    #[tokio::test]
    async fn test_runs_exactly_the_accepted_sql() {
        let mut row = Map::new();
        row.insert("COUNT(DISTINCT case_id)".to_string(), json!(2));
        let store = Arc::new(FakeStore::returning(QueryResult::new(
            vec!["COUNT(DISTINCT case_id)".to_string()],
            vec![row],
        )));
        let uc = ExecuteQueryUseCase::new(store.clone());

        let sql = accepted("SELECT COUNT(DISTINCT case_id) FROM chunks");
        let result = uc.execute(&sql).await.unwrap();
        assert_eq!(result.scalar(), Some(&json!(2)));
        assert_eq!(
            *store.executed.lock().unwrap(),
            vec!["SELECT COUNT(DISTINCT case_id) FROM chunks".to_string()]
        );
    }

    #[tokio::test]
    async fn test_store_error_is_audited() {
        let audit = Arc::new(RecordingAudit::default());
        let uc = ExecuteQueryUseCase::new(Arc::new(FakeStore::failing("no such column: year")))
            .with_audit_logger(audit.clone());

        let err = uc.execute(&accepted("SELECT year FROM chunks")).await.unwrap_err();
        assert!(matches!(err, ExecutionError::Store(StoreError::Query(_))));
        assert_eq!(audit.types(), vec!["execution_error"]);
    }

    #[tokio::test]
    async fn test_store_deadline_becomes_timeout() {
        let audit = Arc::new(RecordingAudit::default());
        let store = Arc::new(FakeStore::timing_out());
        let uc = ExecuteQueryUseCase::new(store.clone())
            .with_audit_logger(audit.clone())
            .with_timeout(Duration::from_millis(20));

        let err = uc.execute(&accepted("SELECT year FROM chunks")).await.unwrap_err();
        assert!(matches!(err, ExecutionError::Timeout(d) if d == Duration::from_millis(20)));
        assert_eq!(*store.deadlines.lock().unwrap(), vec![Duration::from_millis(20)]);
        assert_eq!(audit.types(), vec!["execution_error"]);
    }
}

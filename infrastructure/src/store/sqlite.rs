//! SQLite chunk store
//!
//! Opens the database read-only for every query, so a statement that
//! slipped past validation still cannot write. Queries run on the
//! blocking pool and are interrupted from inside SQLite once their
//! deadline passes. The connection lives only inside the blocking task.

use async_trait::async_trait;
use jurisrag_application::{StoreError, StructuredStore};
use jurisrag_domain::{AcceptedSql, QueryResult};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, ErrorCode, OpenFlags};
use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// VM instructions between deadline checks
const PROGRESS_OPS: i32 = 1_000;

pub struct SqliteChunkStore {
    path: PathBuf,
}

impl SqliteChunkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(path: &Path) -> Result<Connection, StoreError> {
        Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StoreError::Open(format!("{}: {}", path.display(), e)))
    }
}

fn run_query(
    connection: &Connection,
    sql: &str,
    timeout: Duration,
) -> Result<QueryResult, StoreError> {
    let query_err = |e: rusqlite::Error| match e.sqlite_error_code() {
        Some(ErrorCode::OperationInterrupted) => StoreError::Timeout(timeout),
        _ => StoreError::Query(e.to_string()),
    };

    let mut statement = connection.prepare(sql).map_err(query_err)?;
    let columns = statement
        .column_names()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    let mut rows = statement.query([]).map_err(query_err)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().map_err(query_err)? {
        let mut record = Map::new();
        for (index, column) in columns.iter().enumerate() {
            let value = row.get::<usize, SqlValue>(index).map_err(query_err)?;
            record.insert(column.clone(), json_value_from_sql(value));
        }
        records.push(record);
    }

    Ok(QueryResult::new(columns, records))
}

fn json_value_from_sql(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::Number(i.into()),
        SqlValue::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        SqlValue::Text(s) => Value::String(s),
        SqlValue::Blob(bytes) => Value::String(format!("<blob {} bytes>", bytes.len())),
    }
}

#[async_trait]
impl StructuredStore for SqliteChunkStore {
    async fn query(
        &self,
        sql: &AcceptedSql,
        timeout: Duration,
    ) -> Result<QueryResult, StoreError> {
        let path = self.path.clone();
        let sql = sql.sql().to_string();
        let deadline = Instant::now() + timeout;
        debug!(path = %path.display(), sql = %sql, ?timeout, "Executing structured query");

        let result = tokio::task::spawn_blocking(move || {
            // The blocking pool may have been busy past the deadline
            if Instant::now() >= deadline {
                return Err(StoreError::Timeout(timeout));
            }
            let connection = Self::open(&path)?;
            connection.progress_handler(PROGRESS_OPS, Some(move || Instant::now() >= deadline));
            run_query(&connection, &sql, timeout)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?;

        if let Err(StoreError::Timeout(after)) = &result {
            warn!("Structured query interrupted after {:?}", after);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jurisrag_domain::{GeneratedSql, SqlValidator};
    use serde_json::json;

    const DEADLINE: Duration = Duration::from_secs(5);

    fn seed(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("cases.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE chunks (
                chunk_id TEXT, case_id TEXT, case_number TEXT, file_name TEXT,
                year INTEGER, courts TEXT, jurisdiction TEXT, statutes TEXT,
                reliefs TEXT, outcomes TEXT, legal_concepts TEXT, text TEXT
            );
            INSERT INTO chunks (chunk_id, case_id, year, courts, statutes, text) VALUES
                ('c1-0', 'c1', 2019, 'Supreme Court', 'Contract Act 1872', 'first'),
                ('c1-1', 'c1', 2019, 'Supreme Court', 'Contract Act 1872', 'second'),
                ('c2-0', 'c2', 2021, 'High Court', NULL, 'third');",
        )
        .unwrap();
        path
    }

    fn accepted(sql: &str) -> AcceptedSql {
        SqlValidator::default()
            .accept(GeneratedSql::new(sql, 1))
            .unwrap()
    }

    #[tokio::test]
    async fn test_count_distinct_cases() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteChunkStore::new(seed(&dir));

        let result = store
            .query(&accepted("SELECT COUNT(DISTINCT case_id) FROM chunks"), DEADLINE)
            .await
            .unwrap();
        assert_eq!(result.columns, vec!["COUNT(DISTINCT case_id)"]);
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.scalar(), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_rows_keep_column_names_and_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteChunkStore::new(seed(&dir));

        let result = store
            .query(
                &accepted("SELECT case_id, year, statutes FROM chunks WHERE chunk_id = 'c2-0'"),
                DEADLINE,
            )
            .await
            .unwrap();
        assert_eq!(result.columns, vec!["case_id", "year", "statutes"]);
        assert_eq!(result.rows[0]["year"], json!(2021));
        assert_eq!(result.rows[0]["statutes"], Value::Null);
    }

    #[tokio::test]
    async fn test_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteChunkStore::new(seed(&dir));

        let result = store
            .query(&accepted("SELECT case_id FROM chunks WHERE year > 2030"), DEADLINE)
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_missing_database_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteChunkStore::new(dir.path().join("missing.db"));

        let result = store.query(&accepted("SELECT case_id FROM chunks"), DEADLINE).await;
        assert!(matches!(result, Err(StoreError::Open(_))));
    }

    #[tokio::test]
    async fn test_unknown_column_is_query_error() {
        let dir = tempfile::tempdir().unwrap();
        let conn_path = dir.path().join("narrow.db");
        Connection::open(&conn_path)
            .unwrap()
            .execute_batch("CREATE TABLE chunks (case_id TEXT);")
            .unwrap();
        let store = SqliteChunkStore::new(conn_path);

        let result = store.query(&accepted("SELECT year FROM chunks"), DEADLINE).await;
        assert!(matches!(result, Err(StoreError::Query(_))));
    }

    #[tokio::test]
    async fn test_deadline_interrupts_query_and_releases_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch(
                "CREATE TABLE chunks (case_id TEXT, year INTEGER);
                WITH RECURSIVE n(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM n WHERE x < 50000)
                INSERT INTO chunks (case_id, year) SELECT 'c' || x, 1900 + x % 100 FROM n;",
            )
            .unwrap();
        let store = SqliteChunkStore::new(&path);

        // 2.5 billion joined rows cannot finish inside the deadline
        let started = Instant::now();
        let result = store
            .query(
                &accepted("SELECT COUNT(*) FROM chunks JOIN chunks"),
                Duration::from_millis(50),
            )
            .await;
        assert!(matches!(result, Err(StoreError::Timeout(d)) if d == Duration::from_millis(50)));
        assert!(started.elapsed() < Duration::from_secs(5));

        // The reader's shared lock is gone by the time the call returns
        let writer = Connection::open(&path).unwrap();
        writer.busy_timeout(Duration::ZERO).unwrap();
        writer.execute_batch("BEGIN EXCLUSIVE; COMMIT;").unwrap();
    }

    #[tokio::test]
    async fn test_expired_deadline_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteChunkStore::new(seed(&dir));

        let result = store
            .query(&accepted("SELECT case_id FROM chunks"), Duration::ZERO)
            .await;
        assert!(matches!(result, Err(StoreError::Timeout(_))));
    }

    #[test]
    fn test_real_values_map_to_numbers() {
        assert_eq!(json_value_from_sql(SqlValue::Real(1.5)), json!(1.5));
        assert_eq!(json_value_from_sql(SqlValue::Real(f64::NAN)), Value::Null);
    }
}

//! JSONL file writer for SQL audit events.
//!
//! One line per event: `type`, `timestamp`, then the payload fields.
//! The file is opened in append mode and each line goes out in a single
//! `write_all`, so nothing is buffered in the process.

use jurisrag_application::ports::audit_logger::{AuditEvent, AuditLogger};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Field names owned by the record itself.
const RESERVED_FIELDS: [&str; 2] = ["type", "timestamp"];

#[derive(Serialize)]
struct AuditRecord<'a> {
    #[serde(rename = "type")]
    event_type: &'static str,
    timestamp: String,
    #[serde(flatten)]
    body: RecordBody<'a>,
}

/// Object payloads are inlined; anything else, or an object that would
/// shadow a reserved field, is nested under `data`.
#[derive(Serialize)]
#[serde(untagged)]
enum RecordBody<'a> {
    Fields(&'a Map<String, Value>),
    Nested { data: &'a Value },
}

impl<'a> AuditRecord<'a> {
    fn new(event: &'a AuditEvent) -> Self {
        let body = match &event.payload {
            Value::Object(fields) if !RESERVED_FIELDS.iter().any(|k| fields.contains_key(*k)) => {
                RecordBody::Fields(fields)
            }
            other => RecordBody::Nested { data: other },
        };
        Self {
            event_type: event.event_type,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            body,
        }
    }

    fn to_line(&self) -> serde_json::Result<Vec<u8>> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}

/// Append-only JSONL audit trail.
pub struct JsonlAuditLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl JsonlAuditLogger {
    /// Open `path` for appending, creating it and its parent directory.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &[u8]) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("audit file lock poisoned"))?;
        file.write_all(line)
    }
}

impl AuditLogger for JsonlAuditLogger {
    fn log(&self, event: AuditEvent) {
        let written = AuditRecord::new(&event)
            .to_line()
            .map_err(io::Error::from)
            .and_then(|line| self.append(&line));
        if let Err(e) = written {
            debug!(event = event.event_type, "Dropped audit record: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("sql_audit.jsonl");
        let logger = JsonlAuditLogger::open(&path).unwrap();

        logger.log(AuditEvent::new(
            "sql_rejected",
            json!({
                "attempt": 1,
                "sql": "SELECT * FROM chunks; DROP TABLE chunks",
                "code": "multiple-statements",
            }),
        ));
        logger.log(AuditEvent::new(
            "generation_exhausted",
            json!({"attempts": 3}),
        ));
        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "sql_rejected");
        assert_eq!(records[0]["code"], "multiple-statements");
        assert!(records[0]["timestamp"].is_string());
        assert_eq!(records[1]["type"], "generation_exhausted");
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        for attempt in 0..2 {
            let logger = JsonlAuditLogger::open(&path).unwrap();
            logger.log(AuditEvent::new("execution_error", json!({"attempt": attempt})));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let logger = JsonlAuditLogger::open(&path).unwrap();

        logger.log(AuditEvent::new("sql_rejected", json!("raw text")));
        logger.log(AuditEvent::new(
            "sql_rejected",
            json!({"type": "spoofed", "code": "wrong-table"}),
        ));

        let records = read_lines(&path);
        assert_eq!(records[0]["data"], "raw text");
        assert_eq!(records[1]["type"], "sql_rejected");
        assert_eq!(records[1]["data"]["type"], "spoofed");
        assert_eq!(records[1]["data"]["code"], "wrong-table");
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        assert!(JsonlAuditLogger::open(blocker.join("audit.jsonl")).is_err());
    }
}

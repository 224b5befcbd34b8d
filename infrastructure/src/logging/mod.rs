//! Logging infrastructure - the SQL audit trail.
//!
//! Provides [`JsonlAuditLogger`], a JSONL file writer that implements
//! the [`AuditLogger`](jurisrag_application::AuditLogger) port.

mod jsonl_audit;

pub use jsonl_audit::JsonlAuditLogger;

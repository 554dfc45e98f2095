pub mod audit_log;

pub use audit_log::{text_length, AuditLogWriter, AUDIT_SOURCE};

//! Audit logging for family-finance
//!
//! Every create, update and delete performed through the services is appended
//! to `audit.log` as one JSON object per line, with the entity's state before
//! and/or after the change.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

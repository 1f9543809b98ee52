//! Audit Journal
//!
//! Append-only record of state-changing domain events.
//!
//! - `domain/` - [`AuditEntry`] and the [`AuditSink`] trait
//! - `infra/` - PostgreSQL and in-memory sinks
//!
//! Appending is best effort: callers use [`append_best_effort`], which logs
//! a failure and never propagates it. The append is awaited inline so the
//! entry is written after the state change it describes.

pub mod domain;
pub mod error;
pub mod infra;

pub use domain::entry::AuditEntry;
pub use domain::sink::{AuditSink, append_best_effort};
pub use error::{AuditError, AuditResult};
pub use infra::memory::InMemoryAuditLog;
pub use infra::postgres::PgAuditLogRepository;

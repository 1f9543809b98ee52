//! Audit Sink Trait

use crate::domain::entry::AuditEntry;
use crate::error::AuditResult;

/// Append-only audit journal
#[trait_variant::make(AuditSink: Send)]
pub trait LocalAuditSink {
    /// Append one entry
    async fn append(&self, entry: &AuditEntry) -> AuditResult<()>;
}

/// Append an entry, logging and discarding any failure
pub async fn append_best_effort<S>(sink: &S, entry: AuditEntry)
where
    S: AuditSink + Sync,
{
    if let Err(e) = sink.append(&entry).await {
        tracing::warn!(
            error = %e,
            event = %entry.event_name(),
            entity_id = %entry.entity_id,
            "Audit append failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuditError;
    use crate::infra::memory::InMemoryAuditLog;
    use kernel::id::UserId;
    use uuid::Uuid;

    struct BrokenSink;

    impl AuditSink for BrokenSink {
        async fn append(&self, _entry: &AuditEntry) -> AuditResult<()> {
            Err(AuditError::Unavailable("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn test_best_effort_swallows_errors() {
        let entry = AuditEntry::new(UserId::new(), "session", Uuid::new_v4(), "created");
        // Must complete without panicking or returning an error
        append_best_effort(&BrokenSink, entry).await;
    }

    #[tokio::test]
    async fn test_best_effort_appends() {
        let log = InMemoryAuditLog::new();
        let entry = AuditEntry::new(UserId::new(), "session", Uuid::new_v4(), "created");
        append_best_effort(&log, entry.clone()).await;

        assert_eq!(log.entries().await, vec![entry]);
    }
}

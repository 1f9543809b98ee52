//! In-memory audit journal, for tests and local runs

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::entry::AuditEntry;
use crate::domain::sink::AuditSink;
use crate::error::AuditResult;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditLog {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry, oldest first
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().await.clone()
    }

    /// Event names (`entity_type.action`), oldest first
    pub async fn event_names(&self) -> Vec<String> {
        self.entries
            .lock()
            .await
            .iter()
            .map(AuditEntry::event_name)
            .collect()
    }
}

impl AuditSink for InMemoryAuditLog {
    async fn append(&self, entry: &AuditEntry) -> AuditResult<()> {
        self.entries.lock().await.push(entry.clone());
        Ok(())
    }
}

//! PostgreSQL Audit Journal

use sqlx::PgPool;

use crate::domain::entry::AuditEntry;
use crate::domain::sink::AuditSink;
use crate::error::AuditResult;

/// PostgreSQL-backed audit journal (`audit_logs`)
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AuditSink for PgAuditLogRepository {
    async fn append(&self, entry: &AuditEntry) -> AuditResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (
                id,
                user_id,
                entity_type,
                entity_id,
                action,
                action_data,
                occurred_at,
                ip_address,
                user_agent
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.user_id.as_uuid())
        .bind(&entry.entity_type)
        .bind(entry.entity_id)
        .bind(&entry.action)
        .bind(&entry.action_data)
        .bind(entry.occurred_at)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

//! Network intelligence repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use nci_core::types::IntelligenceRecord;

use crate::error::StoreResult;

/// Intelligence record storage
#[async_trait]
pub trait IntelligenceRepository: Send + Sync {
    /// Append a new intelligence record
    async fn append(&self, record: IntelligenceRecord) -> StoreResult<()>;

    /// Active (unexpired) records, optionally filtered to an industry,
    /// ordered severity descending then detected-at descending
    async fn find_active(
        &self,
        now: DateTime<Utc>,
        industry: Option<&str>,
    ) -> StoreResult<Vec<IntelligenceRecord>>;

    /// Most recently detected records, newest first
    async fn find_recent(&self, limit: usize) -> StoreResult<Vec<IntelligenceRecord>>;

    /// Drop expired records, returning how many were removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> StoreResult<u64>;
}

/// In-memory intelligence repository
#[derive(Default)]
pub struct MemoryIntelligenceRepo {
    rows: RwLock<Vec<IntelligenceRecord>>,
}

impl MemoryIntelligenceRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IntelligenceRepository for MemoryIntelligenceRepo {
    async fn append(&self, record: IntelligenceRecord) -> StoreResult<()> {
        self.rows.write().await.push(record);
        Ok(())
    }

    async fn find_active(
        &self,
        now: DateTime<Utc>,
        industry: Option<&str>,
    ) -> StoreResult<Vec<IntelligenceRecord>> {
        let rows = self.rows.read().await;
        let mut active: Vec<IntelligenceRecord> = rows
            .iter()
            .filter(|r| r.is_active(now) && r.matches_industry(industry))
            .cloned()
            .collect();
        active.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then(b.detected_at.cmp(&a.detected_at))
        });
        Ok(active)
    }

    async fn find_recent(&self, limit: usize) -> StoreResult<Vec<IntelligenceRecord>> {
        let rows = self.rows.read().await;
        let mut recent: Vec<IntelligenceRecord> = rows.iter().cloned().collect();
        recent.sort_by(|a, b| b.detected_at.cmp(&a.detected_at));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.is_active(now));
        Ok((before - rows.len()) as u64)
    }
}

//! Tenant contribution repository

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use nci_core::types::{TenantContribution, TenantId};

use crate::error::StoreResult;

/// Tenant contribution storage
#[async_trait]
pub trait TenantContributionRepository: Send + Sync {
    /// Insert or replace a tenant's contribution row
    async fn save(&self, contribution: TenantContribution) -> StoreResult<()>;

    /// Look up a tenant's contribution row
    async fn find(&self, tenant: &TenantId) -> StoreResult<Option<TenantContribution>>;
}

/// In-memory tenant contribution repository
#[derive(Default)]
pub struct MemoryTenantContributionRepo {
    rows: RwLock<HashMap<TenantId, TenantContribution>>,
}

impl MemoryTenantContributionRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TenantContributionRepository for MemoryTenantContributionRepo {
    async fn save(&self, contribution: TenantContribution) -> StoreResult<()> {
        self.rows
            .write()
            .await
            .insert(contribution.tenant_id.clone(), contribution);
        Ok(())
    }

    async fn find(&self, tenant: &TenantId) -> StoreResult<Option<TenantContribution>> {
        Ok(self.rows.read().await.get(tenant).cloned())
    }
}

//! Command handlers for the CLI

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use nci_api::{run_server, ApiConfig};
use nci_core::types::{ContributionTier, PaymentEvent, TenantId};
use nci_store::{AggregationService, ContributionService, NetworkStore, PatternService};

use crate::scheduler::{Scheduler, SchedulerConfig};

pub type CmdResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// One payment record in a seed file
///
/// Same shape as the contribute endpoint's request body, so a captured
/// request log replays directly.
#[derive(Debug, Deserialize)]
pub struct SeedRecord {
    pub tenant_id: String,
    pub buyer_identifier: String,
    pub days_to_pay: i32,
    pub invoice_amount: Decimal,
    pub transaction_date: DateTime<Utc>,
    pub paid_on_time: bool,
    pub had_dispute: bool,
    #[serde(default)]
    pub was_partial_payment: bool,
    pub industry_code: String,
    pub region: String,
    pub revenue_class: String,
}

/// Register every tenant in the seed and contribute its records
pub async fn load_seed(store: &NetworkStore, path: &Path) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let raw = std::fs::read_to_string(path)?;
    let records: Vec<SeedRecord> = serde_json::from_str(&raw)?;
    let contributions = ContributionService::new(store.clone());

    for record in &records {
        let tenant = TenantId(record.tenant_id.clone());
        if store.contributions.find(&tenant).await?.is_none() {
            contributions
                .register_tenant(tenant, ContributionTier::Standard)
                .await?;
        }
    }

    let count = records.len();
    for record in records {
        let event = PaymentEvent {
            days_to_pay: record.days_to_pay,
            invoice_amount: record.invoice_amount,
            transaction_date: record.transaction_date,
            paid_on_time: record.paid_on_time,
            had_dispute: record.had_dispute,
            was_partial_payment: record.was_partial_payment,
            industry_code: record.industry_code,
            region: record.region,
            revenue_class: record.revenue_class,
        };
        contributions
            .contribute_payment_observation(
                &TenantId(record.tenant_id),
                &record.buyer_identifier,
                &event,
            )
            .await;
    }

    Ok(count)
}

/// Start the API server, optionally with the scheduled background jobs
pub async fn handle_serve(
    host: String,
    port: u16,
    scheduler_config: Option<SchedulerConfig>,
) -> CmdResult {
    println!("Starting NCI API server on {}:{}...", host, port);

    let store = NetworkStore::in_memory();

    if let Some(config) = scheduler_config {
        Arc::new(Scheduler::new(store.clone(), config)).start();
    }

    let config = ApiConfig {
        host,
        port,
        enable_cors: true,
    };

    run_server(&config, store).await?;
    Ok(())
}

/// Run the aggregation batch once over an in-memory store
pub async fn handle_aggregate(seed: Option<PathBuf>) -> CmdResult {
    let store = NetworkStore::in_memory();

    if let Some(path) = &seed {
        let count = load_seed(&store, path).await?;
        println!("Seeded {} payment records from {}", count, path.display());
    }

    let summary = AggregationService::new(store.clone())
        .aggregate_network_data()
        .await?;

    println!("Aggregation complete!");
    println!("  Buyers processed: {}", summary.processed);
    println!("  Profiles updated: {}", summary.updated);
    println!("  Duration: {} ms", summary.duration_ms);

    for buyer in store.observations.distinct_buyers().await? {
        if let Some(profile) = store.profiles.find(&buyer).await? {
            println!(
                "  {}: score {:.1}, tier {}, {} data points from {} tenants",
                &profile.global_buyer_id.0[..16.min(profile.global_buyer_id.0.len())],
                profile.community_score,
                profile.trust_tier,
                profile.data_points,
                profile.verified_by_count
            );
        }
    }

    Ok(())
}

/// Run the pattern detectors once over an in-memory store
pub async fn handle_detect(seed: Option<PathBuf>) -> CmdResult {
    let store = NetworkStore::in_memory();

    if let Some(path) = &seed {
        let count = load_seed(&store, path).await?;
        println!("Seeded {} payment records from {}", count, path.display());
    }

    let records = PatternService::new(store)
        .detect_emerging_risks()
        .await?;

    println!("Detection complete: {} findings", records.len());
    for record in records {
        println!("  [{}] {} - {}", record.severity, record.kind, record.title);
        println!("    Recommendation: {}", record.recommendation);
        if let Some(industry) = &record.industry_code {
            println!("    Industry: {}", industry);
        }
        if let Some(region) = &record.region {
            println!("    Region: {}", region);
        }
        println!("    Valid until: {}", record.valid_until);
    }

    Ok(())
}

/// Register a tenant against a running server
pub async fn handle_register(api_url: &str, tenant: String, tier: Option<String>) -> CmdResult {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/network/register", api_url))
        .json(&json!({ "tenant_id": tenant, "tier": tier }))
        .send()
        .await?
        .error_for_status()?
        .json::<serde_json::Value>()
        .await?;

    println!("Tenant registered!");
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Arguments for the contribute command
pub struct ContributeArgs {
    pub tenant: String,
    pub buyer: String,
    pub days_to_pay: i32,
    pub amount: Decimal,
    pub on_time: bool,
    pub dispute: bool,
    pub partial: bool,
    pub industry: String,
    pub region: String,
    pub revenue_class: String,
}

/// Contribute a payment observation through a running server
pub async fn handle_contribute(api_url: &str, args: ContributeArgs) -> CmdResult {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/network/contribute", api_url))
        .json(&json!({
            "tenant_id": args.tenant,
            "buyer_identifier": args.buyer,
            "days_to_pay": args.days_to_pay,
            "invoice_amount": args.amount,
            "transaction_date": Utc::now().to_rfc3339(),
            "paid_on_time": args.on_time,
            "had_dispute": args.dispute,
            "was_partial_payment": args.partial,
            "industry_code": args.industry,
            "region": args.region,
            "revenue_class": args.revenue_class,
        }))
        .send()
        .await?
        .error_for_status()?
        .json::<serde_json::Value>()
        .await?;

    println!("Contribution accepted: {}", response["accepted"]);
    Ok(())
}

/// Look up a buyer's community score through a running server
pub async fn handle_score(api_url: &str, buyer: &str, tenant: &str) -> CmdResult {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/network/score/{}", api_url, buyer))
        .query(&[("tenant_id", tenant)])
        .send()
        .await?
        .error_for_status()?
        .json::<serde_json::Value>()
        .await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// List active intelligence records through a running server
pub async fn handle_intelligence(
    api_url: &str,
    tenant: &str,
    industry: Option<&str>,
) -> CmdResult {
    let client = reqwest::Client::new();
    let mut query = vec![("tenant_id", tenant)];
    if let Some(industry) = industry {
        query.push(("industry", industry));
    }

    let response = client
        .get(format!("{}/network/intelligence", api_url))
        .query(&query)
        .send()
        .await?
        .error_for_status()?
        .json::<serde_json::Value>()
        .await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn seed_json() -> String {
        let record = |tenant: &str, buyer: &str, days: i32, on_time: bool| {
            json!({
                "tenant_id": tenant,
                "buyer_identifier": buyer,
                "days_to_pay": days,
                "invoice_amount": 45000,
                "transaction_date": Utc::now().to_rfc3339(),
                "paid_on_time": on_time,
                "had_dispute": false,
                "industry_code": "textiles",
                "region": "MH",
                "revenue_class": "sme"
            })
        };
        serde_json::to_string(&vec![
            record("t1", "BUYER-1", 10, true),
            record("t1", "BUYER-1", 12, true),
            record("t2", "BUYER-1", 14, true),
            record("t2", "BUYER-2", 40, false),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_seed_registers_and_contributes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(seed_json().as_bytes()).unwrap();

        let store = NetworkStore::in_memory();
        let count = load_seed(&store, file.path()).await.unwrap();

        assert_eq!(count, 4);
        assert_eq!(store.observations.count().await.unwrap(), 4);
        let t1 = store
            .contributions
            .find(&TenantId("t1".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(t1.transactions_shared, 2);
        assert_eq!(t1.buyers_shared, 1);
    }

    #[tokio::test]
    async fn test_load_seed_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json ]").unwrap();

        let store = NetworkStore::in_memory();
        assert!(load_seed(&store, file.path()).await.is_err());
    }
}

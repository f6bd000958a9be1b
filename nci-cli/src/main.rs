//! NCI Command Line Interface
//!
//! Usage:
//!   nci serve                 - Start the API server with scheduled jobs
//!   nci aggregate             - Run the buyer profile aggregation batch
//!   nci detect                - Run the risk pattern detectors
//!   nci register              - Register a tenant against a running server
//!   nci contribute            - Contribute a payment observation
//!   nci score <buyer>         - Look up a buyer's community score
//!   nci intelligence          - List active intelligence records

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod commands;
mod scheduler;

#[derive(Parser)]
#[command(name = "nci")]
#[command(about = "Network Credit Intelligence CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the NCI API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Seconds between aggregation runs
        #[arg(long, default_value = "86400")]
        aggregation_interval_secs: u64,
        /// Seconds between pattern detection runs
        #[arg(long, default_value = "86400")]
        detection_interval_secs: u64,
        /// Disable the scheduled background jobs
        #[arg(long)]
        no_scheduler: bool,
    },

    /// Run the buyer profile aggregation batch once
    Aggregate {
        /// JSON file of payment records to contribute before aggregating
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },

    /// Run the risk pattern detectors once
    Detect {
        /// JSON file of payment records to contribute before detecting
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },

    /// Register a tenant for network participation
    Register {
        /// API server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        api_url: String,
        /// Tenant ID
        #[arg(short, long)]
        tenant: String,
        /// Contribution tier (basic, standard, premium)
        #[arg(long)]
        tier: Option<String>,
    },

    /// Contribute a payment observation
    Contribute {
        /// API server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        api_url: String,
        /// Contributing tenant ID
        #[arg(short, long)]
        tenant: String,
        /// Plaintext buyer identifier (hashed before storage)
        #[arg(short, long)]
        buyer: String,
        /// Days between invoice issue and settlement
        #[arg(short, long)]
        days_to_pay: i32,
        /// Invoice amount
        #[arg(long)]
        amount: Decimal,
        /// Invoice was settled within terms
        #[arg(long)]
        on_time: bool,
        /// A dispute was raised on the invoice
        #[arg(long)]
        dispute: bool,
        /// Invoice was settled in partial payments
        #[arg(long)]
        partial: bool,
        /// Buyer industry code
        #[arg(long)]
        industry: String,
        /// Buyer region
        #[arg(long)]
        region: String,
        /// Buyer revenue class
        #[arg(long, default_value = "sme")]
        revenue_class: String,
    },

    /// Look up a buyer's community score
    Score {
        /// Plaintext buyer identifier
        buyer: String,
        /// API server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        api_url: String,
        /// Requesting tenant ID
        #[arg(short, long)]
        tenant: String,
    },

    /// List active intelligence records
    Intelligence {
        /// API server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        api_url: String,
        /// Requesting tenant ID
        #[arg(short, long)]
        tenant: String,
        /// Restrict to one industry
        #[arg(long)]
        industry: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run_command(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_command(cli: Cli) -> commands::CmdResult {
    match cli.command {
        Commands::Serve {
            host,
            port,
            aggregation_interval_secs,
            detection_interval_secs,
            no_scheduler,
        } => {
            let scheduler_config = (!no_scheduler).then_some(scheduler::SchedulerConfig {
                aggregation_interval_secs,
                detection_interval_secs,
                ..Default::default()
            });
            commands::handle_serve(host, port, scheduler_config).await
        }

        Commands::Aggregate { seed } => commands::handle_aggregate(seed).await,

        Commands::Detect { seed } => commands::handle_detect(seed).await,

        Commands::Register {
            api_url,
            tenant,
            tier,
        } => commands::handle_register(&api_url, tenant, tier).await,

        Commands::Contribute {
            api_url,
            tenant,
            buyer,
            days_to_pay,
            amount,
            on_time,
            dispute,
            partial,
            industry,
            region,
            revenue_class,
        } => {
            commands::handle_contribute(
                &api_url,
                commands::ContributeArgs {
                    tenant,
                    buyer,
                    days_to_pay,
                    amount,
                    on_time,
                    dispute,
                    partial,
                    industry,
                    region,
                    revenue_class,
                },
            )
            .await
        }

        Commands::Score {
            buyer,
            api_url,
            tenant,
        } => commands::handle_score(&api_url, &buyer, &tenant).await,

        Commands::Intelligence {
            api_url,
            tenant,
            industry,
        } => commands::handle_intelligence(&api_url, &tenant, industry.as_deref()).await,
    }
}

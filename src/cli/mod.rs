pub mod freeze;
pub mod inactivity;
pub mod ledger;
pub mod maturity;
pub mod transfer;
pub mod unreachable;
pub mod violations;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::info;

use crate::classifier::{classify, ClassifiedAccount};
use crate::config::RuleConfig;
use crate::error::{DormctlError, Result};
use crate::importer::read_accounts_file;

#[derive(Parser)]
#[command(
    name = "dormctl",
    about = "Dormant-account compliance reports from bank CSV extracts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every report.
#[derive(Args)]
pub struct CommonArgs {
    /// Path to the account extract CSV
    pub file: String,
    /// Reference date for elapsed-time calculations: YYYY-MM-DD (default: today)
    #[arg(long = "as-of")]
    pub as_of: Option<String>,
    /// Also write the report rows to this CSV file
    #[arg(long)]
    pub output: Option<String>,
    /// JSON rule-config file overriding the built-in thresholds
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify accounts inactive past a threshold and tier them by severity.
    Inactivity {
        #[command(flatten)]
        common: CommonArgs,
        /// Inactivity period in years (fractional allowed)
        #[arg(long)]
        years: Option<f64>,
        /// Account types to check (comma-separated)
        #[arg(long = "types", value_delimiter = ',')]
        types: Option<Vec<String>>,
        /// Years for the LOW tier threshold
        #[arg(long)]
        low: Option<f64>,
        /// Years for the MEDIUM tier threshold
        #[arg(long)]
        medium: Option<f64>,
        /// Years for the HIGH tier threshold
        #[arg(long)]
        high: Option<f64>,
        /// Keep only these branches
        #[arg(long)]
        branch: Option<Vec<String>>,
        /// Keep only these customer types
        #[arg(long = "customer-type")]
        customer_type: Option<Vec<String>>,
        /// Keep only these inactivity tiers (MONITOR/LOW/MEDIUM/HIGH)
        #[arg(long)]
        tier: Option<Vec<String>>,
        /// Keep only these amount categories (LOW/MEDIUM/HIGH)
        #[arg(long)]
        amount: Option<Vec<String>>,
    },
    /// Track Fixed Deposit accounts unclaimed past maturity (365.25-day years).
    Maturity {
        #[command(flatten)]
        common: CommonArgs,
        /// Keep only these maturity statuses
        #[arg(long)]
        status: Option<Vec<String>>,
        /// Keep only these branches
        #[arg(long)]
        branch: Option<Vec<String>>,
    },
    /// Flag accounts eligible for transfer to the central bank.
    Transfer {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Flag dormant accounts with expired KYC for freezing.
    Freeze {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Segregate dormant accounts into high/low-value ledgers.
    Ledger {
        #[command(flatten)]
        common: CommonArgs,
        /// Show only one ledger category (high/low/standard)
        #[arg(long)]
        category: Option<String>,
    },
    /// Detect long-inactive accounts of a given type with no contact attempts.
    Violations {
        #[command(flatten)]
        common: CommonArgs,
        /// Substring matched against account type, case-insensitive
        #[arg(long = "type-contains", default_value = "Investment")]
        type_contains: String,
        /// Inactivity period in years
        #[arg(long)]
        years: Option<f64>,
    },
    /// List dormant customers unreachable on every contact channel.
    Unreachable {
        #[command(flatten)]
        common: CommonArgs,
    },
}

pub(crate) fn parse_as_of(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| DormctlError::Other(format!("invalid --as-of date: {s} (expected YYYY-MM-DD)"))),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub(crate) fn load_config(path: Option<&str>) -> Result<RuleConfig> {
    match path {
        Some(p) => RuleConfig::load(Path::new(p)),
        None => Ok(RuleConfig::default()),
    }
}

/// Ingest and classify: the invocation-scoped pipeline front half shared by
/// every report.
pub(crate) fn load_classified(
    common: &CommonArgs,
    config: &RuleConfig,
) -> Result<Vec<ClassifiedAccount>> {
    let as_of = parse_as_of(common.as_of.as_deref())?;
    let ingested = read_accounts_file(&PathBuf::from(&common.file))?;
    info!(
        "ingested {} record(s) from {} ({} with unknown dates)",
        ingested.records.len(),
        common.file,
        ingested.unparseable_dates
    );
    classify(ingested.records, as_of, config)
}

pub(crate) fn write_output(path: &str, csv_text: &str) -> Result<()> {
    std::fs::write(path, csv_text)?;
    println!("Wrote {path}");
    Ok(())
}

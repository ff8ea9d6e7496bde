use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{DormctlError, Result};

/// All classification thresholds as one config surface, with named defaults
/// overridable per-run from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Inactivity period (years, fractional allowed) for the dormancy filter.
    #[serde(default = "default_inactivity_years")]
    pub inactivity_years: f64,
    /// Account types included by the inactivity report when no --types given.
    #[serde(default = "default_account_types")]
    pub account_types: Vec<String>,

    /// Ascending inactivity tier thresholds (years). Must satisfy low < medium < high.
    #[serde(default = "default_tier_low")]
    pub tier_low: f64,
    #[serde(default = "default_tier_medium")]
    pub tier_medium: f64,
    #[serde(default = "default_tier_high")]
    pub tier_high: f64,

    /// Balance tier breakpoints (ascending).
    #[serde(default = "default_balance_medium")]
    pub balance_medium: f64,
    #[serde(default = "default_balance_high")]
    pub balance_high: f64,

    /// Last-transaction cutoff for central-bank transfer eligibility (inclusive).
    #[serde(default = "default_transfer_cutoff")]
    pub transfer_cutoff: NaiveDate,

    /// Freeze rule: dormant status, last transaction strictly before this
    /// cutoff, and KYC status equal to `freeze_kyc_status`.
    #[serde(default = "default_freeze_cutoff")]
    pub freeze_cutoff: NaiveDate,
    #[serde(default = "default_freeze_kyc_status")]
    pub freeze_kyc_status: String,

    /// Ledger segregation: last transaction strictly before this cutoff,
    /// split into high/low value at `ledger_breakpoint`.
    #[serde(default = "default_ledger_cutoff")]
    pub ledger_cutoff: NaiveDate,
    #[serde(default = "default_ledger_breakpoint")]
    pub ledger_breakpoint: f64,
}

fn default_inactivity_years() -> f64 {
    3.0
}

fn default_account_types() -> Vec<String> {
    vec!["Savings/Call/Current".to_string()]
}

fn default_tier_low() -> f64 {
    3.0
}

fn default_tier_medium() -> f64 {
    4.0
}

fn default_tier_high() -> f64 {
    5.0
}

fn default_balance_medium() -> f64 {
    100_000.0
}

fn default_balance_high() -> f64 {
    300_000.0
}

fn default_transfer_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 4, 24).unwrap()
}

fn default_freeze_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
}

fn default_freeze_kyc_status() -> String {
    "Expired".to_string()
}

fn default_ledger_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 12, 31).unwrap()
}

fn default_ledger_breakpoint() -> f64 {
    100_000.0
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            inactivity_years: default_inactivity_years(),
            account_types: default_account_types(),
            tier_low: default_tier_low(),
            tier_medium: default_tier_medium(),
            tier_high: default_tier_high(),
            balance_medium: default_balance_medium(),
            balance_high: default_balance_high(),
            transfer_cutoff: default_transfer_cutoff(),
            freeze_cutoff: default_freeze_cutoff(),
            freeze_kyc_status: default_freeze_kyc_status(),
            ledger_cutoff: default_ledger_cutoff(),
            ledger_breakpoint: default_ledger_breakpoint(),
        }
    }
}

impl RuleConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RuleConfig = serde_json::from_str(&content)
            .map_err(|e| DormctlError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject misordered thresholds before any classification runs. A violated
    /// ordering would produce contradictory or unreachable tiers.
    pub fn validate(&self) -> Result<()> {
        if !(self.tier_low < self.tier_medium && self.tier_medium < self.tier_high) {
            return Err(DormctlError::Config(format!(
                "inactivity tier thresholds must be strictly ascending: low={} medium={} high={}",
                self.tier_low, self.tier_medium, self.tier_high
            )));
        }
        if self.balance_medium >= self.balance_high {
            return Err(DormctlError::Config(format!(
                "balance breakpoints must be strictly ascending: medium={} high={}",
                self.balance_medium, self.balance_high
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = RuleConfig::default();
        assert_eq!(c.inactivity_years, 3.0);
        assert_eq!(c.account_types, vec!["Savings/Call/Current"]);
        assert_eq!((c.tier_low, c.tier_medium, c.tier_high), (3.0, 4.0, 5.0));
        assert_eq!(c.transfer_cutoff, NaiveDate::from_ymd_opt(2020, 4, 24).unwrap());
        assert_eq!(c.freeze_cutoff, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(c.freeze_kyc_status, "Expired");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_overlay_merges_with_defaults() {
        let c: RuleConfig =
            serde_json::from_str(r#"{"tier_low": 2.0, "freeze_kyc_status": "Lapsed"}"#).unwrap();
        assert_eq!(c.tier_low, 2.0);
        assert_eq!(c.tier_medium, 4.0);
        assert_eq!(c.freeze_kyc_status, "Lapsed");
    }

    #[test]
    fn test_validate_rejects_misordered_tiers() {
        let mut c = RuleConfig::default();
        c.tier_medium = 3.0; // low == medium
        assert!(c.validate().is_err());
        c.tier_medium = 6.0; // medium > high
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_misordered_balance_breakpoints() {
        let mut c = RuleConfig::default();
        c.balance_medium = 300_000.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, r#"{"inactivity_years": 2.5, "transfer_cutoff": "2019-06-30"}"#)
            .unwrap();
        let c = RuleConfig::load(&path).unwrap();
        assert_eq!(c.inactivity_years, 2.5);
        assert_eq!(c.transfer_cutoff, NaiveDate::from_ymd_opt(2019, 6, 30).unwrap());
    }

    #[test]
    fn test_load_rejects_invalid_ordering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, r#"{"tier_low": 5.0, "tier_medium": 4.0}"#).unwrap();
        assert!(RuleConfig::load(&path).is_err());
    }
}

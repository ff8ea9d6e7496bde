use std::fmt;

use chrono::NaiveDate;

use crate::config::RuleConfig;
use crate::error::Result;
use crate::models::AccountRecord;

const DAYS_PER_YEAR: f64 = 365.0;
// The fixed-deposit maturity feature models leap-year-aware windows.
const DAYS_PER_YEAR_MATURITY: f64 = 365.25;

// ---------------------------------------------------------------------------
// Tier enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InactivityTier {
    Monitor,
    Low,
    Medium,
    High,
}

impl InactivityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monitor => "MONITOR",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MONITOR" => Some(Self::Monitor),
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for InactivityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BalanceTier {
    Low,
    Medium,
    High,
}

impl BalanceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for BalanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactTier {
    NoContact,
    Partial,
    Full,
}

impl ContactTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoContact => "No Contact",
            Self::Partial => "Partial Contact",
            Self::Full => "Full Contact",
        }
    }
}

impl fmt::Display for ContactTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaturityStatus {
    Active,
    Approaching,
    HighRisk,
    Inactive,
}

impl MaturityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Approaching => "Approaching Inactivity",
            Self::HighRisk => "High Risk",
            Self::Inactive => "Inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "approaching inactivity" | "approaching" => Some(Self::Approaching),
            "high risk" | "high-risk" => Some(Self::HighRisk),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for MaturityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerCategory {
    HighValue,
    LowValue,
    Standard,
}

impl LedgerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighValue => "High-Value Dormant Ledger",
            Self::LowValue => "Low-Value Dormant Ledger",
            Self::Standard => "Standard Dormant Ledger",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if lower.starts_with("high") {
            Some(Self::HighValue)
        } else if lower.starts_with("low") {
            Some(Self::LowValue)
        } else if lower.starts_with("standard") {
            Some(Self::Standard)
        } else {
            None
        }
    }
}

impl fmt::Display for LedgerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Rule functions
// ---------------------------------------------------------------------------

/// Strict `>` on ascending thresholds; a value exactly equal to a threshold
/// falls into the lower tier.
pub fn inactivity_tier(years: f64, low: f64, medium: f64, high: f64) -> InactivityTier {
    if years > high {
        InactivityTier::High
    } else if years > medium {
        InactivityTier::Medium
    } else if years > low {
        InactivityTier::Low
    } else {
        InactivityTier::Monitor
    }
}

pub fn contact_tier(attempts: u8) -> ContactTier {
    match attempts {
        0 => ContactTier::NoContact,
        1 | 2 => ContactTier::Partial,
        _ => ContactTier::Full,
    }
}

pub fn balance_tier(balance: f64, medium_breakpoint: f64, high_breakpoint: f64) -> BalanceTier {
    if balance > high_breakpoint {
        BalanceTier::High
    } else if balance > medium_breakpoint {
        BalanceTier::Medium
    } else {
        BalanceTier::Low
    }
}

/// Maturity bands use inclusive lower bounds, unlike the inactivity tiers.
pub fn maturity_status(years: f64) -> MaturityStatus {
    if years < 1.0 {
        MaturityStatus::Active
    } else if years < 2.0 {
        MaturityStatus::Approaching
    } else if years < 3.0 {
        MaturityStatus::HighRisk
    } else {
        MaturityStatus::Inactive
    }
}

/// Inclusive cutoff: an account last touched exactly on the cutoff date is
/// eligible. Unknown dates are never eligible.
pub fn transfer_eligible(last_txn: Option<NaiveDate>, cutoff: NaiveDate) -> bool {
    matches!(last_txn, Some(d) if d <= cutoff)
}

pub fn freeze_eligible(
    status: &str,
    last_txn: Option<NaiveDate>,
    kyc_status: &str,
    cutoff: NaiveDate,
    required_kyc: &str,
) -> bool {
    let dormant = status == "Dormant";
    let stale = matches!(last_txn, Some(d) if d < cutoff);
    let kyc_match = kyc_status == required_kyc;
    dormant && stale && kyc_match
}

pub fn ledger_category(
    balance: f64,
    last_txn: Option<NaiveDate>,
    cutoff: NaiveDate,
    breakpoint: f64,
) -> LedgerCategory {
    match last_txn {
        Some(d) if d < cutoff => {
            if balance > breakpoint {
                LedgerCategory::HighValue
            } else {
                LedgerCategory::LowValue
            }
        }
        _ => LedgerCategory::Standard,
    }
}

// ---------------------------------------------------------------------------
// Classified row
// ---------------------------------------------------------------------------

/// An account record decorated with every derived column. Produced once per
/// run; never mutated afterwards. Elapsed-time fields are `None` when the
/// last-transaction date is unknown, so such rows can never satisfy an
/// age-threshold comparison.
#[derive(Debug, Clone)]
pub struct ClassifiedAccount {
    pub record: AccountRecord,
    /// Signed; negative when the last transaction is in the future
    /// (a data-quality condition, preserved as computed).
    pub days_inactive: Option<i64>,
    /// days / 365, unrounded. Round only for display.
    pub years_inactive: Option<f64>,
    /// days / 365.25, the maturity-window convention.
    pub maturity_years: Option<f64>,
    pub inactivity_tier: Option<InactivityTier>,
    pub contact_tier: ContactTier,
    pub balance_tier: BalanceTier,
    pub maturity_status: Option<MaturityStatus>,
    /// Maturity-feature flag: 3+ years since last transaction.
    pub inactive_flag: bool,
    pub transfer_eligible: bool,
    pub freeze_eligible: bool,
    pub ledger_category: LedgerCategory,
}

impl ClassifiedAccount {
    pub fn transfer_status(&self) -> &'static str {
        if self.transfer_eligible {
            "Eligible for Transfer"
        } else {
            "Not Eligible"
        }
    }

    pub fn freeze_status(&self) -> &'static str {
        if self.freeze_eligible {
            "Frozen"
        } else {
            "Active"
        }
    }
}

/// Run every derivation rule over a row set against an injected reference
/// date. Validates the configuration first; a misordered threshold table is
/// rejected before any row is classified.
pub fn classify(
    records: Vec<AccountRecord>,
    today: NaiveDate,
    config: &RuleConfig,
) -> Result<Vec<ClassifiedAccount>> {
    config.validate()?;
    Ok(records
        .into_iter()
        .map(|record| classify_one(record, today, config))
        .collect())
}

fn classify_one(record: AccountRecord, today: NaiveDate, config: &RuleConfig) -> ClassifiedAccount {
    let days_inactive = record.last_txn_date.map(|d| (today - d).num_days());
    let years_inactive = days_inactive.map(|d| d as f64 / DAYS_PER_YEAR);
    let maturity_years = days_inactive.map(|d| d as f64 / DAYS_PER_YEAR_MATURITY);

    let inactivity_tier = years_inactive
        .map(|y| inactivity_tier(y, config.tier_low, config.tier_medium, config.tier_high));
    let maturity = maturity_years.map(maturity_status);
    let inactive_flag = maturity_years.map_or(false, |y| y >= 3.0);

    let transfer = transfer_eligible(record.last_txn_date, config.transfer_cutoff);
    let freeze = freeze_eligible(
        &record.account_status,
        record.last_txn_date,
        &record.kyc_status,
        config.freeze_cutoff,
        &config.freeze_kyc_status,
    );
    let ledger = ledger_category(
        record.balance,
        record.last_txn_date,
        config.ledger_cutoff,
        config.ledger_breakpoint,
    );

    ClassifiedAccount {
        contact_tier: contact_tier(record.contact_attempts()),
        balance_tier: balance_tier(record.balance, config.balance_medium, config.balance_high),
        days_inactive,
        years_inactive,
        maturity_years,
        inactivity_tier,
        maturity_status: maturity,
        inactive_flag,
        transfer_eligible: transfer,
        freeze_eligible: freeze,
        ledger_category: ledger,
        record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(balance: f64, last_txn: Option<NaiveDate>) -> AccountRecord {
        AccountRecord {
            account_id: "ACC0001".into(),
            account_type: "Savings/Call/Current".into(),
            branch: "Main Branch".into(),
            customer_type: "Individual".into(),
            account_status: "Dormant".into(),
            balance,
            last_txn_date: last_txn,
            last_txn_raw: last_txn.map(|d| d.to_string()).unwrap_or_default(),
            kyc_status: "Valid".into(),
            email_attempt: "No".into(),
            sms_attempt: "No".into(),
            phone_attempt: "No".into(),
        }
    }

    #[test]
    fn test_inactivity_tier_boundaries_are_strict() {
        // a value exactly at a threshold falls into the lower tier
        assert_eq!(inactivity_tier(3.0, 3.0, 4.0, 5.0), InactivityTier::Monitor);
        assert_eq!(inactivity_tier(4.0, 3.0, 4.0, 5.0), InactivityTier::Low);
        assert_eq!(inactivity_tier(4.0001, 3.0, 4.0, 5.0), InactivityTier::Medium);
        assert_eq!(inactivity_tier(5.0, 3.0, 4.0, 5.0), InactivityTier::Medium);
        assert_eq!(inactivity_tier(5.0001, 3.0, 4.0, 5.0), InactivityTier::High);
    }

    #[test]
    fn test_inactivity_tier_monotonic() {
        let samples = [0.0, 2.9, 3.0, 3.1, 3.9, 4.0, 4.5, 5.0, 5.5, 20.0];
        let tiers: Vec<_> = samples
            .iter()
            .map(|&e| inactivity_tier(e, 3.0, 4.0, 5.0))
            .collect();
        for pair in tiers.windows(2) {
            assert!(pair[0] <= pair[1], "tier must be non-decreasing in years");
        }
    }

    #[test]
    fn test_contact_tier_truth_table() {
        assert_eq!(contact_tier(0), ContactTier::NoContact);
        assert_eq!(contact_tier(1), ContactTier::Partial);
        assert_eq!(contact_tier(2), ContactTier::Partial);
        assert_eq!(contact_tier(3), ContactTier::Full);
    }

    #[test]
    fn test_balance_tier_breakpoints() {
        assert_eq!(balance_tier(100_000.0, 100_000.0, 300_000.0), BalanceTier::Low);
        assert_eq!(balance_tier(100_000.01, 100_000.0, 300_000.0), BalanceTier::Medium);
        assert_eq!(balance_tier(300_000.0, 100_000.0, 300_000.0), BalanceTier::Medium);
        assert_eq!(balance_tier(350_000.0, 100_000.0, 300_000.0), BalanceTier::High);
    }

    #[test]
    fn test_maturity_status_bands_inclusive_lower() {
        assert_eq!(maturity_status(0.5), MaturityStatus::Active);
        assert_eq!(maturity_status(1.0), MaturityStatus::Approaching);
        assert_eq!(maturity_status(1.99), MaturityStatus::Approaching);
        assert_eq!(maturity_status(2.0), MaturityStatus::HighRisk);
        assert_eq!(maturity_status(3.0), MaturityStatus::Inactive);
        assert_eq!(maturity_status(10.0), MaturityStatus::Inactive);
    }

    #[test]
    fn test_transfer_cutoff_inclusive() {
        let cutoff = date(2020, 4, 24);
        assert!(transfer_eligible(Some(date(2020, 4, 24)), cutoff));
        assert!(!transfer_eligible(Some(date(2020, 4, 25)), cutoff));
        assert!(transfer_eligible(Some(date(2019, 1, 1)), cutoff));
        assert!(!transfer_eligible(None, cutoff));
    }

    #[test]
    fn test_freeze_requires_all_three_conditions() {
        let cutoff = date(2022, 1, 1);
        let stale = Some(date(2021, 6, 1));
        assert!(freeze_eligible("Dormant", stale, "Expired", cutoff, "Expired"));
        assert!(!freeze_eligible("Active", stale, "Expired", cutoff, "Expired"));
        assert!(!freeze_eligible("Dormant", stale, "Valid", cutoff, "Expired"));
        assert!(!freeze_eligible("Dormant", Some(date(2022, 1, 1)), "Expired", cutoff, "Expired"));
        assert!(!freeze_eligible("Dormant", None, "Expired", cutoff, "Expired"));
        // status equality is case-sensitive, matching the rule source
        assert!(!freeze_eligible("dormant", stale, "Expired", cutoff, "Expired"));
    }

    #[test]
    fn test_ledger_segregation() {
        let cutoff = date(2021, 12, 31);
        assert_eq!(
            ledger_category(150_000.0, Some(date(2021, 1, 1)), cutoff, 100_000.0),
            LedgerCategory::HighValue
        );
        assert_eq!(
            ledger_category(100_000.0, Some(date(2021, 1, 1)), cutoff, 100_000.0),
            LedgerCategory::LowValue
        );
        assert_eq!(
            ledger_category(500_000.0, Some(date(2022, 6, 1)), cutoff, 100_000.0),
            LedgerCategory::Standard
        );
        assert_eq!(
            ledger_category(500_000.0, None, cutoff, 100_000.0),
            LedgerCategory::Standard
        );
    }

    #[test]
    fn test_classify_worked_example() {
        // Balance 350k, one Yes flag, ~4.2 years ago with thresholds 3/4/5
        let today = date(2025, 6, 1);
        let last = today - chrono::Duration::days((4.2 * 365.0) as i64);
        let mut r = record(350_000.0, Some(last));
        r.email_attempt = "Yes".into();
        let rows = classify(vec![r], today, &RuleConfig::default()).unwrap();
        let c = &rows[0];
        assert_eq!(c.inactivity_tier, Some(InactivityTier::Medium));
        assert_eq!(c.balance_tier, BalanceTier::High);
        assert_eq!(c.contact_tier, ContactTier::Partial);
    }

    #[test]
    fn test_classify_unknown_date_yields_none_elapsed() {
        let rows = classify(
            vec![record(1000.0, None)],
            date(2025, 6, 1),
            &RuleConfig::default(),
        )
        .unwrap();
        let c = &rows[0];
        assert_eq!(c.days_inactive, None);
        assert_eq!(c.years_inactive, None);
        assert_eq!(c.inactivity_tier, None);
        assert_eq!(c.maturity_status, None);
        assert!(!c.inactive_flag);
        assert!(!c.transfer_eligible);
        assert!(!c.freeze_eligible);
    }

    #[test]
    fn test_classify_future_date_preserved_negative() {
        let today = date(2025, 6, 1);
        let rows = classify(
            vec![record(1000.0, Some(date(2025, 7, 1)))],
            today,
            &RuleConfig::default(),
        )
        .unwrap();
        assert_eq!(rows[0].days_inactive, Some(-30));
        assert!(rows[0].years_inactive.unwrap() < 0.0);
        assert_eq!(rows[0].inactivity_tier, Some(InactivityTier::Monitor));
    }

    #[test]
    fn test_classify_rejects_bad_config() {
        let mut config = RuleConfig::default();
        config.tier_low = 5.0;
        let err = classify(vec![record(1000.0, None)], date(2025, 6, 1), &config);
        assert!(err.is_err());
    }

    #[test]
    fn test_classify_is_idempotent() {
        let today = date(2025, 6, 1);
        let r = record(250_000.0, Some(date(2020, 4, 24)));
        let config = RuleConfig::default();
        let a = classify(vec![r.clone()], today, &config).unwrap();
        let b = classify(vec![r], today, &config).unwrap();
        assert_eq!(a[0].days_inactive, b[0].days_inactive);
        assert_eq!(a[0].inactivity_tier, b[0].inactivity_tier);
        assert_eq!(a[0].transfer_eligible, b[0].transfer_eligible);
        assert_eq!(a[0].ledger_category, b[0].ledger_category);
        assert_eq!(a[0].transfer_status(), "Eligible for Transfer");
    }

    #[test]
    fn test_maturity_convention_uses_365_25() {
        let today = date(2025, 1, 1);
        // 1096 days clears three years under both conventions; 1095 days
        // clears neither (exactly 3.0 at 365, short of it at 365.25)
        let rows = classify(
            vec![
                record(1.0, Some(today - chrono::Duration::days(1096))),
                record(1.0, Some(today - chrono::Duration::days(1095))),
            ],
            today,
            &RuleConfig::default(),
        )
        .unwrap();
        assert!(rows[0].inactive_flag);
        assert!(!rows[1].inactive_flag);
        assert_eq!(rows[1].maturity_status, Some(MaturityStatus::HighRisk));
    }
}

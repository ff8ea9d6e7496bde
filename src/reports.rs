use std::collections::HashMap;

use crate::classifier::ClassifiedAccount;

// ---------------------------------------------------------------------------
// Generic aggregations
// ---------------------------------------------------------------------------

/// Unique-value counts for any categorical accessor. Counts always sum to the
/// row count.
pub fn value_counts<F>(accounts: &[ClassifiedAccount], f: F) -> HashMap<String, usize>
where
    F: Fn(&ClassifiedAccount) -> String,
{
    let mut counts = HashMap::new();
    for account in accounts {
        *counts.entry(f(account)).or_insert(0) += 1;
    }
    counts
}

/// Top-N categories by count, descending; ties broken by label so output is
/// deterministic.
pub fn top_n(counts: &HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<_> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

/// Numeric summary over the balance column. `None` for an empty row set; the
/// caller is responsible for not rendering percentages off nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSummary {
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

pub fn balance_summary(accounts: &[ClassifiedAccount]) -> Option<BalanceSummary> {
    if accounts.is_empty() {
        return None;
    }
    let balances: Vec<f64> = accounts.iter().map(|a| a.record.balance).collect();
    let total: f64 = balances.iter().sum();
    Some(BalanceSummary {
        total,
        mean: total / balances.len() as f64,
        min: balances.iter().cloned().fold(f64::INFINITY, f64::min),
        max: balances.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    })
}

// ---------------------------------------------------------------------------
// Inactivity report summary
// ---------------------------------------------------------------------------

pub struct InactivitySummary {
    pub total: usize,
    pub type_counts: HashMap<String, usize>,
    pub branch_counts: HashMap<String, usize>,
    pub customer_type_counts: HashMap<String, usize>,
    pub tier_counts: HashMap<String, usize>,
    pub amount_counts: HashMap<String, usize>,
    pub contact_counts: HashMap<String, usize>,
    pub balances: Option<BalanceSummary>,
}

pub fn inactivity_summary(accounts: &[ClassifiedAccount]) -> InactivitySummary {
    InactivitySummary {
        total: accounts.len(),
        type_counts: value_counts(accounts, |a| a.record.account_type.clone()),
        branch_counts: value_counts(accounts, |a| a.record.branch.clone()),
        customer_type_counts: value_counts(accounts, |a| a.record.customer_type.clone()),
        tier_counts: value_counts(accounts, |a| {
            a.inactivity_tier
                .map(|t| t.to_string())
                .unwrap_or_else(|| "UNKNOWN".to_string())
        }),
        amount_counts: value_counts(accounts, |a| a.balance_tier.to_string()),
        contact_counts: value_counts(accounts, |a| a.contact_tier.to_string()),
        balances: balance_summary(accounts),
    }
}

// ---------------------------------------------------------------------------
// Fixed-deposit maturity summary
// ---------------------------------------------------------------------------

pub struct BranchStat {
    pub branch: String,
    pub count: usize,
    pub total_balance: f64,
}

pub struct MaturitySummary {
    pub total: usize,
    pub inactive: usize,
    pub active: usize,
    pub inactive_value: f64,
    /// Inactive accounts grouped by branch, sorted by branch name.
    pub branch_stats: Vec<BranchStat>,
    pub status_counts: HashMap<String, usize>,
}

pub fn maturity_summary(accounts: &[ClassifiedAccount]) -> MaturitySummary {
    let inactive: Vec<&ClassifiedAccount> =
        accounts.iter().filter(|a| a.inactive_flag).collect();
    let inactive_value: f64 = inactive.iter().map(|a| a.record.balance).sum();

    let mut grouped: HashMap<String, (usize, f64)> = HashMap::new();
    for account in &inactive {
        let entry = grouped.entry(account.record.branch.clone()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += account.record.balance;
    }
    let mut branch_stats: Vec<BranchStat> = grouped
        .into_iter()
        .map(|(branch, (count, total_balance))| BranchStat {
            branch,
            count,
            total_balance,
        })
        .collect();
    branch_stats.sort_by(|a, b| a.branch.cmp(&b.branch));

    MaturitySummary {
        total: accounts.len(),
        inactive: inactive.len(),
        active: accounts.len() - inactive.len(),
        inactive_value,
        branch_stats,
        status_counts: value_counts(accounts, |a| {
            a.maturity_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "Unknown".to_string())
        }),
    }
}

// ---------------------------------------------------------------------------
// Contact-attempt summary
// ---------------------------------------------------------------------------

pub struct ContactSummary {
    pub email_attempts: usize,
    pub sms_attempts: usize,
    pub phone_attempts: usize,
    /// Accounts with no attempt on any channel.
    pub no_contact: usize,
    pub total: usize,
}

pub fn contact_summary(accounts: &[ClassifiedAccount]) -> ContactSummary {
    let yes = |v: &str| v.trim().eq_ignore_ascii_case("yes");
    ContactSummary {
        email_attempts: accounts.iter().filter(|a| yes(&a.record.email_attempt)).count(),
        sms_attempts: accounts.iter().filter(|a| yes(&a.record.sms_attempt)).count(),
        phone_attempts: accounts.iter().filter(|a| yes(&a.record.phone_attempt)).count(),
        no_contact: accounts.iter().filter(|a| a.record.contact_attempts() == 0).count(),
        total: accounts.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::config::RuleConfig;
    use crate::models::AccountRecord;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(branch: &str, balance: f64, last_txn: Option<NaiveDate>) -> AccountRecord {
        AccountRecord {
            account_id: "ACC".into(),
            account_type: "Fixed Deposit".into(),
            branch: branch.into(),
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

    fn classified(records: Vec<AccountRecord>) -> Vec<ClassifiedAccount> {
        classify(records, date(2025, 6, 1), &RuleConfig::default()).unwrap()
    }

    #[test]
    fn test_value_counts_sum_to_total() {
        let rows = classified(vec![
            record("Main", 100.0, Some(date(2020, 1, 1))),
            record("Main", 200.0, Some(date(2020, 1, 1))),
            record("Downtown", 300.0, Some(date(2020, 1, 1))),
        ]);
        let counts = value_counts(&rows, |a| a.record.branch.clone());
        assert_eq!(counts["Main"], 2);
        assert_eq!(counts["Downtown"], 1);
        assert_eq!(counts.values().sum::<usize>(), rows.len());
    }

    #[test]
    fn test_top_n_deterministic_order() {
        let rows = classified(vec![
            record("B", 0.0, None),
            record("A", 0.0, None),
            record("C", 0.0, None),
            record("C", 0.0, None),
        ]);
        let counts = value_counts(&rows, |a| a.record.branch.clone());
        let top = top_n(&counts, 2);
        assert_eq!(top, vec![("C".to_string(), 2), ("A".to_string(), 1)]);
    }

    #[test]
    fn test_balance_summary() {
        let rows = classified(vec![
            record("Main", 100.0, None),
            record("Main", 300.0, None),
        ]);
        let s = balance_summary(&rows).unwrap();
        assert_eq!(s.total, 400.0);
        assert_eq!(s.mean, 200.0);
        assert_eq!(s.min, 100.0);
        assert_eq!(s.max, 300.0);
    }

    #[test]
    fn test_empty_input_yields_empty_structures_not_errors() {
        let rows: Vec<ClassifiedAccount> = vec![];
        assert_eq!(balance_summary(&rows), None);
        let summary = inactivity_summary(&rows);
        assert_eq!(summary.total, 0);
        assert!(summary.branch_counts.is_empty());
        assert!(summary.balances.is_none());
        let fd = maturity_summary(&rows);
        assert_eq!(fd.total, 0);
        assert_eq!(fd.inactive_value, 0.0);
        assert!(fd.branch_stats.is_empty());
    }

    #[test]
    fn test_maturity_summary_counts_and_value() {
        let rows = classified(vec![
            record("Main", 50_000.0, Some(date(2020, 1, 1))),     // inactive
            record("Main", 25_000.0, Some(date(2019, 1, 1))),     // inactive
            record("Downtown", 10_000.0, Some(date(2025, 1, 1))), // active
        ]);
        let s = maturity_summary(&rows);
        assert_eq!(s.total, 3);
        assert_eq!(s.inactive, 2);
        assert_eq!(s.active, 1);
        assert_eq!(s.inactive_value, 75_000.0);
        assert_eq!(s.branch_stats.len(), 1);
        assert_eq!(s.branch_stats[0].branch, "Main");
        assert_eq!(s.branch_stats[0].count, 2);
        assert_eq!(s.branch_stats[0].total_balance, 75_000.0);
    }

    #[test]
    fn test_contact_summary() {
        let mut a = record("Main", 0.0, None);
        a.email_attempt = "Yes".into();
        let mut b = record("Main", 0.0, None);
        b.email_attempt = "Yes".into();
        b.sms_attempt = "yes".into();
        let c = record("Main", 0.0, None);
        let rows = classified(vec![a, b, c]);
        let s = contact_summary(&rows);
        assert_eq!(s.email_attempts, 2);
        assert_eq!(s.sms_attempts, 1);
        assert_eq!(s.phone_attempts, 0);
        assert_eq!(s.no_contact, 1);
        assert_eq!(s.total, 3);
    }

    #[test]
    fn test_inactivity_summary_tier_buckets_unknown() {
        let rows = classified(vec![
            record("Main", 100.0, Some(date(2018, 1, 1))),
            record("Main", 100.0, None),
        ]);
        let s = inactivity_summary(&rows);
        assert_eq!(s.tier_counts.get("HIGH"), Some(&1));
        assert_eq!(s.tier_counts.get("UNKNOWN"), Some(&1));
        assert_eq!(s.tier_counts.values().sum::<usize>(), 2);
    }
}

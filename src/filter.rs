use crate::classifier::{BalanceTier, ClassifiedAccount, ContactTier, InactivityTier, MaturityStatus};

const DAYS_PER_YEAR: f64 = 365.0;

/// Conjunction of per-column tests. `None` means the column is unconstrained;
/// `Some(vec![])` on a multi-select is an explicit empty selection and
/// matches nothing; it is never reinterpreted as "select all".
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub account_types: Option<Vec<String>>,
    /// Case-insensitive substring match on account type, e.g. "Investment"
    /// also catching "Investment Plus".
    pub type_contains: Option<String>,
    pub branches: Option<Vec<String>>,
    pub customer_types: Option<Vec<String>>,
    pub tiers: Option<Vec<InactivityTier>>,
    pub balance_tiers: Option<Vec<BalanceTier>>,
    pub maturity_statuses: Option<Vec<MaturityStatus>>,
    pub contact_tier: Option<ContactTier>,
    /// Case-insensitive equality on account status.
    pub status: Option<String>,
    /// Inactive for strictly more than this many years. Rows with an unknown
    /// last-transaction date never pass.
    pub min_years_inactive: Option<f64>,
}

impl AccountFilter {
    pub fn matches(&self, account: &ClassifiedAccount) -> bool {
        let r = &account.record;
        if let Some(types) = &self.account_types {
            if !types.iter().any(|t| t == &r.account_type) {
                return false;
            }
        }
        if let Some(pattern) = &self.type_contains {
            if !r
                .account_type
                .to_lowercase()
                .contains(&pattern.to_lowercase())
            {
                return false;
            }
        }
        if let Some(branches) = &self.branches {
            if !branches.iter().any(|b| b == &r.branch) {
                return false;
            }
        }
        if let Some(customer_types) = &self.customer_types {
            if !customer_types.iter().any(|c| c == &r.customer_type) {
                return false;
            }
        }
        if let Some(tiers) = &self.tiers {
            match account.inactivity_tier {
                Some(tier) if tiers.contains(&tier) => {}
                _ => return false,
            }
        }
        if let Some(balance_tiers) = &self.balance_tiers {
            if !balance_tiers.contains(&account.balance_tier) {
                return false;
            }
        }
        if let Some(statuses) = &self.maturity_statuses {
            match account.maturity_status {
                Some(status) if statuses.contains(&status) => {}
                _ => return false,
            }
        }
        if let Some(contact) = &self.contact_tier {
            if account.contact_tier != *contact {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if !r.account_status.eq_ignore_ascii_case(status) {
                return false;
            }
        }
        if let Some(years) = self.min_years_inactive {
            // date < (today - years*365d) is the same as days > years*365
            match account.days_inactive {
                Some(days) if days as f64 > years * DAYS_PER_YEAR => {}
                _ => return false,
            }
        }
        true
    }

    /// Subset satisfying all tests, relative order preserved.
    pub fn apply(&self, accounts: &[ClassifiedAccount]) -> Vec<ClassifiedAccount> {
        accounts.iter().filter(|a| self.matches(a)).cloned().collect()
    }
}

/// Explicit sort used by the inactivity report: longest-dormant first.
/// Unknown-date rows sort last.
pub fn sort_by_days_inactive_desc(accounts: &mut [ClassifiedAccount]) {
    accounts.sort_by(|a, b| match (b.days_inactive, a.days_inactive) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

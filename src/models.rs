use chrono::NaiveDate;

/// One row of an uploaded account extract, as ingested.
///
/// `last_txn_date` is `None` when the source value was empty or unparseable;
/// such rows are excluded from every age-based comparison downstream. The raw
/// date string is kept so exports reproduce what the bank sent us.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub account_id: String,
    pub account_type: String,
    pub branch: String,
    pub customer_type: String,
    pub account_status: String,
    pub balance: f64,
    pub last_txn_date: Option<NaiveDate>,
    pub last_txn_raw: String,
    pub kyc_status: String,
    pub email_attempt: String,
    pub sms_attempt: String,
    pub phone_attempt: String,
}

impl AccountRecord {
    /// Number of outreach channels marked "Yes" (case-insensitive).
    pub fn contact_attempts(&self) -> u8 {
        [&self.email_attempt, &self.sms_attempt, &self.phone_attempt]
            .iter()
            .filter(|v| v.trim().eq_ignore_ascii_case("yes"))
            .count() as u8
    }

    /// Date string as exported: parsed dates normalized to YYYY-MM-DD,
    /// unknown dates passed through verbatim.
    pub fn last_txn_display(&self) -> String {
        match self.last_txn_date {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => self.last_txn_raw.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: &str, sms: &str, phone: &str) -> AccountRecord {
        AccountRecord {
            account_id: "ACC0001".into(),
            account_type: "Savings/Call/Current".into(),
            branch: "Main Branch".into(),
            customer_type: "Individual".into(),
            account_status: "Dormant".into(),
            balance: 1000.0,
            last_txn_date: None,
            last_txn_raw: String::new(),
            kyc_status: "Valid".into(),
            email_attempt: email.into(),
            sms_attempt: sms.into(),
            phone_attempt: phone.into(),
        }
    }

    #[test]
    fn test_contact_attempts_counts_yes_flags() {
        assert_eq!(record("No", "No", "No").contact_attempts(), 0);
        assert_eq!(record("Yes", "No", "No").contact_attempts(), 1);
        assert_eq!(record("Yes", "Yes", "Yes").contact_attempts(), 3);
    }

    #[test]
    fn test_contact_attempts_case_insensitive() {
        assert_eq!(record("YES", "yes", "yEs").contact_attempts(), 3);
        assert_eq!(record(" Yes ", "NO", "maybe").contact_attempts(), 1);
    }

    #[test]
    fn test_last_txn_display_normalizes_known_dates() {
        let mut r = record("No", "No", "No");
        r.last_txn_date = NaiveDate::from_ymd_opt(2021, 3, 5);
        r.last_txn_raw = "2021-03-05T10:22:00".into();
        assert_eq!(r.last_txn_display(), "2021-03-05");
    }

    #[test]
    fn test_last_txn_display_preserves_unknown_raw() {
        let mut r = record("No", "No", "No");
        r.last_txn_raw = "not-a-date".into();
        assert_eq!(r.last_txn_display(), "not-a-date");
    }
}

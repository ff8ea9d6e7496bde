use crate::classifier::ClassifiedAccount;
use crate::error::{DormctlError, Result};
use crate::models::AccountRecord;

pub const BASE_HEADER: [&str; 11] = [
    "Account ID",
    "Account Type",
    "Branch",
    "Customer Type",
    "Account Status",
    "Account Balance",
    "Last Transaction Date",
    "KYC Status",
    "Email Contact Attempt",
    "SMS Contact Attempt",
    "Phone Call Attempt",
];

const DERIVED_HEADER: [&str; 9] = [
    "Days Inactive",
    "Years Inactive",
    "Inactivity Category",
    "Contact Status",
    "Amount Category",
    "Maturity Status",
    "Transfer Status",
    "Freeze Status",
    "Dormant Ledger Category",
];

fn base_fields(r: &AccountRecord) -> Vec<String> {
    vec![
        r.account_id.clone(),
        r.account_type.clone(),
        r.branch.clone(),
        r.customer_type.clone(),
        r.account_status.clone(),
        format_balance(r.balance),
        r.last_txn_display(),
        r.kyc_status.clone(),
        r.email_attempt.clone(),
        r.sms_attempt.clone(),
        r.phone_attempt.clone(),
    ]
}

fn format_balance(balance: f64) -> String {
    if balance == balance.trunc() {
        format!("{balance:.0}")
    } else {
        balance.to_string()
    }
}

fn write_csv<I>(header: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(&row)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| DormctlError::Other(format!("CSV buffer flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| DormctlError::Other(format!("non-UTF8 CSV output: {e}")))
}

/// Serialize the full derived schema: base columns followed by every derived
/// column, in fixed order.
pub fn export_classified(accounts: &[ClassifiedAccount]) -> Result<String> {
    let header: Vec<&str> = BASE_HEADER.iter().chain(DERIVED_HEADER.iter()).copied().collect();
    write_csv(
        &header,
        accounts.iter().map(|a| {
            let mut fields = base_fields(&a.record);
            fields.push(a.days_inactive.map(|d| d.to_string()).unwrap_or_default());
            fields.push(
                a.years_inactive
                    .map(|y| format!("{y:.2}"))
                    .unwrap_or_default(),
            );
            fields.push(
                a.inactivity_tier
                    .map(|t| t.to_string())
                    .unwrap_or_default(),
            );
            fields.push(a.contact_tier.to_string());
            fields.push(a.balance_tier.to_string());
            fields.push(
                a.maturity_status
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
            );
            fields.push(a.transfer_status().to_string());
            fields.push(a.freeze_status().to_string());
            fields.push(a.ledger_category.to_string());
            fields
        }),
    )
}

/// The transfer report's fixed four-column extract.
pub fn export_transfer_report(accounts: &[ClassifiedAccount]) -> Result<String> {
    write_csv(
        &["Account ID", "Account Type", "Branch", "Transfer Status"],
        accounts.iter().map(|a| {
            vec![
                a.record.account_id.clone(),
                a.record.account_type.clone(),
                a.record.branch.clone(),
                a.transfer_status().to_string(),
            ]
        }),
    )
}

/// The freeze report's fixed four-column extract.
pub fn export_freeze_report(accounts: &[ClassifiedAccount]) -> Result<String> {
    write_csv(
        &["Account ID", "Account Type", "Branch", "Freeze Status"],
        accounts.iter().map(|a| {
            vec![
                a.record.account_id.clone(),
                a.record.account_type.clone(),
                a.record.branch.clone(),
                a.freeze_status().to_string(),
            ]
        }),
    )
}

/// The ledger report's fixed four-column extract.
pub fn export_ledger_report(accounts: &[ClassifiedAccount]) -> Result<String> {
    write_csv(
        &["Account ID", "Account Type", "Branch", "Dormant Ledger Category"],
        accounts.iter().map(|a| {
            vec![
                a.record.account_id.clone(),
                a.record.account_type.clone(),
                a.record.branch.clone(),
                a.ledger_category.to_string(),
            ]
        }),
    )
}

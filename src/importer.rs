use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use log::warn;

use crate::error::{DormctlError, Result};
use crate::models::AccountRecord;

/// Parse a last-activity date: `YYYY-MM-DD`, optionally with a `T<time>`
/// suffix which is discarded. Returns None for anything else; a bad date is
/// a data-quality condition, not an error.
pub fn parse_activity_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn parse_balance(raw: &str, row: usize) -> Result<f64> {
    let s = raw.trim().replace(',', "");
    s.parse().map_err(|_| DormctlError::InvalidBalance {
        row,
        value: raw.trim().to_string(),
    })
}

#[derive(Debug)]
pub struct IngestResult {
    pub records: Vec<AccountRecord>,
    /// Rows whose Last Transaction Date could not be parsed.
    pub unparseable_dates: usize,
}

struct ColumnIndex {
    account_id: usize,
    account_type: usize,
    branch: usize,
    customer_type: usize,
    account_status: usize,
    balance: usize,
    last_txn: usize,
    kyc_status: usize,
    email: usize,
    sms: usize,
    phone: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DormctlError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            account_id: find("Account ID")?,
            account_type: find("Account Type")?,
            branch: find("Branch")?,
            customer_type: find("Customer Type")?,
            account_status: find("Account Status")?,
            balance: find("Account Balance")?,
            last_txn: find("Last Transaction Date")?,
            kyc_status: find("KYC Status")?,
            email: find("Email Contact Attempt")?,
            sms: find("SMS Contact Attempt")?,
            phone: find("Phone Call Attempt")?,
        })
    }
}

/// Read an account extract from any reader. Column order is free; column
/// names must match the expected schema exactly. Halts on a missing column
/// or non-numeric balance, never on a bad date.
pub fn read_accounts<R: Read>(reader: R) -> Result<IngestResult> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let idx = ColumnIndex::resolve(rdr.headers()?)?;

    let mut records = Vec::new();
    let mut unparseable_dates = 0usize;
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 1; // 1-based data row, excluding header
        let field = |pos: usize| record.get(pos).unwrap_or("").to_string();

        let last_txn_raw = field(idx.last_txn);
        let last_txn_date = parse_activity_date(&last_txn_raw);
        if last_txn_date.is_none() {
            unparseable_dates += 1;
        }

        records.push(AccountRecord {
            account_id: field(idx.account_id),
            account_type: field(idx.account_type),
            branch: field(idx.branch),
            customer_type: field(idx.customer_type),
            account_status: field(idx.account_status),
            balance: parse_balance(record.get(idx.balance).unwrap_or(""), row)?,
            last_txn_date,
            last_txn_raw,
            kyc_status: field(idx.kyc_status),
            email_attempt: field(idx.email),
            sms_attempt: field(idx.sms),
            phone_attempt: field(idx.phone),
        });
    }

    if unparseable_dates > 0 {
        warn!("{unparseable_dates} row(s) have an unparseable Last Transaction Date; they are excluded from age-based checks");
    }

    Ok(IngestResult {
        records,
        unparseable_dates,
    })
}

pub fn read_accounts_file(path: &Path) -> Result<IngestResult> {
    let file = std::fs::File::open(path)?;
    read_accounts(std::io::BufReader::new(file))
}

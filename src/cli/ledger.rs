use comfy_table::{Cell, Table};

use crate::classifier::{ClassifiedAccount, LedgerCategory};
use crate::cli::{load_classified, load_config, write_output, CommonArgs};
use crate::error::{DormctlError, Result};
use crate::exporter::export_ledger_report;
use crate::fmt::money;
use crate::reports::value_counts;

pub fn run(common: &CommonArgs, category: Option<String>) -> Result<()> {
    let config = load_config(common.config.as_deref())?;
    let classified = load_classified(common, &config)?;

    let counts = value_counts(&classified, |a| a.ledger_category.to_string());
    println!("{}", format_counts(&counts));

    let selected = match category.as_deref() {
        Some(raw) => {
            let wanted = LedgerCategory::parse(raw)
                .ok_or_else(|| DormctlError::Other(format!("unknown ledger category: {raw}")))?;
            classified
                .iter()
                .filter(|a| a.ledger_category == wanted)
                .cloned()
                .collect()
        }
        None => classified.clone(),
    };

    if selected.is_empty() {
        println!("No accounts in the selected ledger category.");
    } else {
        println!("{}", format_rows(&selected));
    }

    if let Some(output) = &common.output {
        write_output(output, &export_ledger_report(&classified)?)?;
    }
    Ok(())
}

fn format_counts(counts: &std::collections::HashMap<String, usize>) -> String {
    let mut entries: Vec<_> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    let mut table = Table::new();
    table.set_header(vec!["Ledger Category", "Count"]);
    for (label, count) in entries {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    format!("Dormant Account Classification\n{table}")
}

pub fn format_rows(rows: &[ClassifiedAccount]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Account ID",
        "Account Type",
        "Branch",
        "Balance",
        "Last Txn",
        "Ledger Category",
    ]);
    for a in rows {
        table.add_row(vec![
            Cell::new(&a.record.account_id),
            Cell::new(&a.record.account_type),
            Cell::new(&a.record.branch),
            Cell::new(money(a.record.balance)),
            Cell::new(a.record.last_txn_display()),
            Cell::new(a.ledger_category.to_string()),
        ]);
    }
    format!("Segregated Dormant Accounts\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::config::RuleConfig;
    use crate::models::AccountRecord;
    use chrono::NaiveDate;

    fn record(id: &str, balance: f64, last_txn: &str) -> AccountRecord {
        let date = NaiveDate::parse_from_str(last_txn, "%Y-%m-%d").ok();
        AccountRecord {
            account_id: id.into(),
            account_type: "Savings/Call/Current".into(),
            branch: "Main Branch".into(),
            customer_type: "Individual".into(),
            account_status: "Dormant".into(),
            balance,
            last_txn_date: date,
            last_txn_raw: last_txn.into(),
            kyc_status: "Valid".into(),
            email_attempt: "No".into(),
            sms_attempt: "No".into(),
            phone_attempt: "No".into(),
        }
    }

    #[test]
    fn test_ledger_counts_cover_all_categories() {
        let rows = classify(
            vec![
                record("HIGH", 150_000.0, "2021-01-01"),
                record("LOW", 50_000.0, "2021-01-01"),
                record("STD", 500_000.0, "2023-01-01"),
            ],
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            &RuleConfig::default(),
        )
        .unwrap();
        let counts = value_counts(&rows, |a| a.ledger_category.to_string());
        assert_eq!(counts["High-Value Dormant Ledger"], 1);
        assert_eq!(counts["Low-Value Dormant Ledger"], 1);
        assert_eq!(counts["Standard Dormant Ledger"], 1);
        let out = format_rows(&rows);
        assert!(out.contains("High-Value Dormant Ledger"));
    }
}

use comfy_table::{Cell, Table};

use crate::classifier::{ClassifiedAccount, MaturityStatus};
use crate::cli::{load_classified, load_config, write_output, CommonArgs};
use crate::error::{DormctlError, Result};
use crate::exporter::export_classified;
use crate::filter::AccountFilter;
use crate::fmt::{money, years};
use crate::reports::{contact_summary, maturity_summary, ContactSummary, MaturitySummary};

const FIXED_DEPOSIT_TYPE: &str = "Fixed Deposit";

pub fn run(
    common: &CommonArgs,
    status: Option<Vec<String>>,
    branch: Option<Vec<String>>,
) -> Result<()> {
    let config = load_config(common.config.as_deref())?;
    let classified = load_classified(common, &config)?;

    let fd_only = AccountFilter {
        account_types: Some(vec![FIXED_DEPOSIT_TYPE.to_string()]),
        ..Default::default()
    };
    let fd_accounts = fd_only.apply(&classified);

    let summary = maturity_summary(&fd_accounts);
    let inactive: Vec<ClassifiedAccount> = fd_accounts
        .iter()
        .filter(|a| a.inactive_flag)
        .cloned()
        .collect();
    let contacts = contact_summary(&inactive);

    println!("{}", format_summary(&summary));
    println!("{}", format_contacts(&contacts));

    let refine = AccountFilter {
        maturity_statuses: parse_statuses(status)?,
        branches: branch,
        ..Default::default()
    };
    let rows = refine.apply(&fd_accounts);
    if rows.is_empty() {
        println!("No Fixed Deposit accounts match the selected filters.");
    } else {
        println!("{}", format_rows(&rows));
    }

    if let Some(output) = &common.output {
        write_output(output, &export_classified(&rows)?)?;
    }
    Ok(())
}

fn parse_statuses(raw: Option<Vec<String>>) -> Result<Option<Vec<MaturityStatus>>> {
    raw.map(|values| {
        values
            .iter()
            .map(|v| {
                MaturityStatus::parse(v)
                    .ok_or_else(|| DormctlError::Other(format!("unknown maturity status: {v}")))
            })
            .collect()
    })
    .transpose()
}

pub fn format_summary(summary: &MaturitySummary) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![Cell::new("Total FD Accounts"), Cell::new(summary.total)]);
    let share = if summary.total > 0 {
        format!(
            "{} ({:.1}%)",
            summary.inactive,
            summary.inactive as f64 / summary.total as f64 * 100.0
        )
    } else {
        summary.inactive.to_string()
    };
    table.add_row(vec![Cell::new("Inactive FD Accounts"), Cell::new(share)]);
    table.add_row(vec![Cell::new("Active FD Accounts"), Cell::new(summary.active)]);
    table.add_row(vec![
        Cell::new("Inactive Account Value"),
        Cell::new(money(summary.inactive_value)),
    ]);

    let mut status_table = Table::new();
    status_table.set_header(vec!["Maturity Status", "Count"]);
    let mut entries: Vec<_> = summary.status_counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (label, count) in entries {
        status_table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }

    let mut out = format!(
        "Fixed Deposit Maturity\n{table}\n\nBy Maturity Status\n{status_table}"
    );

    if !summary.branch_stats.is_empty() {
        let mut branch_table = Table::new();
        branch_table.set_header(vec!["Branch", "Inactive Accounts", "Total Balance"]);
        for stat in &summary.branch_stats {
            branch_table.add_row(vec![
                Cell::new(&stat.branch),
                Cell::new(stat.count),
                Cell::new(money(stat.total_balance)),
            ]);
        }
        out.push_str(&format!("\n\nInactive Accounts by Branch\n{branch_table}"));
    }
    out
}

pub fn format_contacts(contacts: &ContactSummary) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Method", "Count", "Coverage"]);
    let pct = |count: usize| {
        if contacts.total > 0 {
            format!("{:.1}%", count as f64 / contacts.total as f64 * 100.0)
        } else {
            "-".to_string()
        }
    };
    for (label, count) in [
        ("Email", contacts.email_attempts),
        ("SMS", contacts.sms_attempts),
        ("Phone Call", contacts.phone_attempts),
        ("No Attempts", contacts.no_contact),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(count), Cell::new(pct(count))]);
    }
    format!("Contact Attempts for Inactive Accounts\n{table}")
}

pub fn format_rows(rows: &[ClassifiedAccount]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Account ID",
        "Branch",
        "Customer",
        "Balance",
        "Last Txn",
        "Years Since",
        "Maturity Status",
        "Email",
        "SMS",
        "Phone",
    ]);
    for a in rows {
        table.add_row(vec![
            Cell::new(&a.record.account_id),
            Cell::new(&a.record.branch),
            Cell::new(&a.record.customer_type),
            Cell::new(money(a.record.balance)),
            Cell::new(a.record.last_txn_display()),
            Cell::new(a.maturity_years.map(years).unwrap_or_default()),
            Cell::new(
                a.maturity_status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "Unknown".to_string()),
            ),
            Cell::new(&a.record.email_attempt),
            Cell::new(&a.record.sms_attempt),
            Cell::new(&a.record.phone_attempt),
        ]);
    }
    format!("Account Details\n{table}")
}

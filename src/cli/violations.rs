use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::classifier::{ClassifiedAccount, ContactTier};
use crate::cli::{load_classified, load_config, write_output, CommonArgs};
use crate::error::Result;
use crate::exporter::export_classified;
use crate::filter::AccountFilter;
use crate::fmt::{money, years};
use crate::reports::{top_n, value_counts};

pub fn run(common: &CommonArgs, type_contains: &str, years_arg: Option<f64>) -> Result<()> {
    let config = load_config(common.config.as_deref())?;
    let classified = load_classified(common, &config)?;

    let filter = AccountFilter {
        type_contains: Some(type_contains.to_string()),
        min_years_inactive: Some(years_arg.unwrap_or(config.inactivity_years)),
        contact_tier: Some(ContactTier::NoContact),
        ..Default::default()
    };
    let violations = filter.apply(&classified);

    if violations.is_empty() {
        println!("No violations found for account types matching {type_contains:?}.");
        if let Some(output) = &common.output {
            write_output(output, &export_classified(&violations)?)?;
        }
        return Ok(());
    }

    println!(
        "{}",
        format!("Detected {} violation(s)", violations.len()).red().bold()
    );
    println!("{}", format_rows(&violations));
    println!("{}", format_executive_summary(&violations));

    if let Some(output) = &common.output {
        write_output(output, &export_classified(&violations)?)?;
    }
    Ok(())
}

pub fn format_rows(rows: &[ClassifiedAccount]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Account ID",
        "Account Type",
        "Branch",
        "Customer",
        "Balance",
        "Last Txn",
        "Years Inactive",
    ]);
    for a in rows {
        table.add_row(vec![
            Cell::new(&a.record.account_id),
            Cell::new(&a.record.account_type),
            Cell::new(&a.record.branch),
            Cell::new(&a.record.customer_type),
            Cell::new(money(a.record.balance)),
            Cell::new(a.record.last_txn_display()),
            Cell::new(a.years_inactive.map(years).unwrap_or_default()),
        ]);
    }
    format!("Accounts with No Contact Attempts\n{table}")
}

pub fn format_executive_summary(rows: &[ClassifiedAccount]) -> String {
    let branches = top_n(&value_counts(rows, |a| a.record.branch.clone()), 3);
    let customer_types = top_n(&value_counts(rows, |a| a.record.customer_type.clone()), 3);
    let join = |entries: &[(String, usize)]| {
        entries
            .iter()
            .map(|(label, _)| label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Executive Summary\n  Total Violations Found: {}\n  Branches Affected: {}\n  Most Common Customer Types: {}",
        rows.len(),
        join(&branches),
        join(&customer_types),
    )
}

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::classifier::{ClassifiedAccount, ContactTier};
use crate::cli::{load_classified, load_config, write_output, CommonArgs};
use crate::error::Result;
use crate::exporter::export_classified;
use crate::filter::AccountFilter;
use crate::fmt::money;
use crate::reports::{top_n, value_counts};

pub fn run(common: &CommonArgs) -> Result<()> {
    let config = load_config(common.config.as_deref())?;
    let classified = load_classified(common, &config)?;

    let filter = AccountFilter {
        contact_tier: Some(ContactTier::NoContact),
        status: Some("Dormant".to_string()),
        ..Default::default()
    };
    let unreachable = filter.apply(&classified);

    if unreachable.is_empty() {
        println!("No unreachable dormant customers found.");
        if let Some(output) = &common.output {
            write_output(output, &export_classified(&unreachable)?)?;
        }
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Detected {} unreachable customer(s) with no active products",
            unreachable.len()
        )
        .red()
    );
    println!("{}", format_rows(&unreachable));

    // Branch/customer-type impact is reported over the full extract, the way
    // the compliance desk reads it.
    let branches = top_n(&value_counts(&classified, |a| a.record.branch.clone()), 3);
    let customer_types = top_n(
        &value_counts(&classified, |a| a.record.customer_type.clone()),
        3,
    );
    let join = |entries: &[(String, usize)]| {
        entries
            .iter()
            .map(|(label, _)| label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!(
        "Executive Summary\n  Unreachable + No Active Accounts: {}\n  Top Impacted Branches: {}\n  Most Common Customer Types: {}",
        unreachable.len(),
        join(&branches),
        join(&customer_types),
    );

    if let Some(output) = &common.output {
        write_output(output, &export_classified(&unreachable)?)?;
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
        "Status",
        "Balance",
        "Last Txn",
    ]);
    for a in rows {
        table.add_row(vec![
            Cell::new(&a.record.account_id),
            Cell::new(&a.record.account_type),
            Cell::new(&a.record.branch),
            Cell::new(&a.record.customer_type),
            Cell::new(&a.record.account_status),
            Cell::new(money(a.record.balance)),
            Cell::new(a.record.last_txn_display()),
        ]);
    }
    format!("Unreachable Customers\n{table}")
}

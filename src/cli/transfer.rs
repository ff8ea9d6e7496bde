use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::classifier::ClassifiedAccount;
use crate::cli::{load_classified, load_config, write_output, CommonArgs};
use crate::error::Result;
use crate::exporter::export_transfer_report;
use crate::fmt::money;

pub fn run(common: &CommonArgs) -> Result<()> {
    let config = load_config(common.config.as_deref())?;
    let classified = load_classified(common, &config)?;

    let eligible: Vec<&ClassifiedAccount> =
        classified.iter().filter(|a| a.transfer_eligible).collect();

    println!(
        "{} of {} accounts eligible for transfer (last transaction on or before {})",
        eligible.len().to_string().bold(),
        classified.len(),
        config.transfer_cutoff
    );

    if eligible.is_empty() {
        println!("No accounts are eligible for transfer.");
    } else {
        println!("{}", format_eligible(&eligible));
    }

    if let Some(output) = &common.output {
        write_output(output, &export_transfer_report(&classified)?)?;
    }
    Ok(())
}

pub fn format_eligible(rows: &[&ClassifiedAccount]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Account ID",
        "Account Type",
        "Branch",
        "Balance",
        "Last Txn",
        "Transfer Status",
    ]);
    for a in rows {
        table.add_row(vec![
            Cell::new(&a.record.account_id),
            Cell::new(&a.record.account_type),
            Cell::new(&a.record.branch),
            Cell::new(money(a.record.balance)),
            Cell::new(a.record.last_txn_display()),
            Cell::new(a.transfer_status()),
        ]);
    }
    format!("Eligible Dormant Accounts for Transfer\n{table}")
}

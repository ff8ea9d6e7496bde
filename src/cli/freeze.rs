use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::classifier::ClassifiedAccount;
use crate::cli::{load_classified, load_config, write_output, CommonArgs};
use crate::error::Result;
use crate::exporter::export_freeze_report;
use crate::fmt::money;

pub fn run(common: &CommonArgs) -> Result<()> {
    let config = load_config(common.config.as_deref())?;
    let classified = load_classified(common, &config)?;

    let frozen: Vec<&ClassifiedAccount> =
        classified.iter().filter(|a| a.freeze_eligible).collect();

    println!(
        "{} of {} accounts meet the freeze conditions (dormant, last transaction before {}, KYC {})",
        frozen.len().to_string().bold(),
        classified.len(),
        config.freeze_cutoff,
        config.freeze_kyc_status
    );

    if frozen.is_empty() {
        println!("No accounts to freeze.");
    } else {
        println!("{}", format_frozen(&frozen));
    }

    if let Some(output) = &common.output {
        write_output(output, &export_freeze_report(&classified)?)?;
    }
    Ok(())
}

pub fn format_frozen(rows: &[&ClassifiedAccount]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Account ID",
        "Account Type",
        "Branch",
        "Balance",
        "Last Txn",
        "KYC Status",
        "Freeze Status",
    ]);
    for a in rows {
        table.add_row(vec![
            Cell::new(&a.record.account_id),
            Cell::new(&a.record.account_type),
            Cell::new(&a.record.branch),
            Cell::new(money(a.record.balance)),
            Cell::new(a.record.last_txn_display()),
            Cell::new(&a.record.kyc_status),
            Cell::new(a.freeze_status().red().to_string()),
        ]);
    }
    format!("Frozen Account List\n{table}")
}

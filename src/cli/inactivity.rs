use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::classifier::{BalanceTier, ClassifiedAccount, InactivityTier};
use crate::cli::{load_classified, load_config, write_output, CommonArgs};
use crate::error::{DormctlError, Result};
use crate::exporter::export_classified;
use crate::filter::{sort_by_days_inactive_desc, AccountFilter};
use crate::fmt::{money, years};
use crate::reports::{inactivity_summary, InactivitySummary};

#[allow(clippy::too_many_arguments)]
pub fn run(
    common: &CommonArgs,
    years_arg: Option<f64>,
    types: Option<Vec<String>>,
    low: Option<f64>,
    medium: Option<f64>,
    high: Option<f64>,
    branch: Option<Vec<String>>,
    customer_type: Option<Vec<String>>,
    tier: Option<Vec<String>>,
    amount: Option<Vec<String>>,
) -> Result<()> {
    let mut config = load_config(common.config.as_deref())?;
    if let Some(y) = years_arg {
        config.inactivity_years = y;
    }
    if let Some(t) = types {
        config.account_types = t;
    }
    if let Some(l) = low {
        config.tier_low = l;
    }
    if let Some(m) = medium {
        config.tier_medium = m;
    }
    if let Some(h) = high {
        config.tier_high = h;
    }
    config.validate()?;

    let classified = load_classified(common, &config)?;

    let selection = AccountFilter {
        account_types: Some(config.account_types.clone()),
        min_years_inactive: Some(config.inactivity_years),
        ..Default::default()
    };
    let mut inactive = selection.apply(&classified);
    sort_by_days_inactive_desc(&mut inactive);

    let refine = AccountFilter {
        branches: branch,
        customer_types: customer_type,
        tiers: parse_tiers(tier)?,
        balance_tiers: parse_balance_tiers(amount)?,
        ..Default::default()
    };
    let rows = refine.apply(&inactive);

    if rows.is_empty() {
        println!("No inactive accounts found with the specified criteria.");
        if let Some(output) = &common.output {
            write_output(output, &export_classified(&rows)?)?;
        }
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} inactive accounts", rows.len()).green()
    );
    let summary = inactivity_summary(&rows);
    println!("{}", format_summary(&summary));
    println!("{}", format_rows(&rows));

    if let Some(output) = &common.output {
        write_output(output, &export_classified(&rows)?)?;
    }
    Ok(())
}

fn parse_tiers(raw: Option<Vec<String>>) -> Result<Option<Vec<InactivityTier>>> {
    raw.map(|values| {
        values
            .iter()
            .map(|v| {
                InactivityTier::parse(v)
                    .ok_or_else(|| DormctlError::Other(format!("unknown inactivity tier: {v}")))
            })
            .collect()
    })
    .transpose()
}

fn parse_balance_tiers(raw: Option<Vec<String>>) -> Result<Option<Vec<BalanceTier>>> {
    raw.map(|values| {
        values
            .iter()
            .map(|v| {
                BalanceTier::parse(v)
                    .ok_or_else(|| DormctlError::Other(format!("unknown amount category: {v}")))
            })
            .collect()
    })
    .transpose()
}

fn counts_table(title: &str, counts: &std::collections::HashMap<String, usize>) -> String {
    let mut entries: Vec<_> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    let mut table = Table::new();
    table.set_header(vec![title, "Count"]);
    for (label, count) in entries {
        table.add_row(vec![Cell::new(label), Cell::new(count)]);
    }
    table.to_string()
}

pub fn format_summary(summary: &InactivitySummary) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![Cell::new("Total Accounts"), Cell::new(summary.total)]);
    if let Some(balances) = &summary.balances {
        table.add_row(vec![Cell::new("Total Balance"), Cell::new(money(balances.total))]);
        table.add_row(vec![Cell::new("Average Balance"), Cell::new(money(balances.mean))]);
        table.add_row(vec![Cell::new("Maximum Balance"), Cell::new(money(balances.max))]);
        table.add_row(vec![Cell::new("Minimum Balance"), Cell::new(money(balances.min))]);
    }
    table.add_row(vec![
        Cell::new("No Contact Made"),
        Cell::new(summary.contact_counts.get("No Contact").copied().unwrap_or(0)),
    ]);

    format!(
        "Account Statistics\n{table}\n\nInactivity Categories\n{}\n\nAmount Profile\n{}\n\nBy Account Type\n{}\n\nBy Branch\n{}\n\nBy Customer Type\n{}",
        counts_table("Category", &summary.tier_counts),
        counts_table("Amount", &summary.amount_counts),
        counts_table("Account Type", &summary.type_counts),
        counts_table("Branch", &summary.branch_counts),
        counts_table("Customer Type", &summary.customer_type_counts),
    )
}

pub fn format_rows(rows: &[ClassifiedAccount]) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Account ID",
        "Type",
        "Branch",
        "Customer",
        "Balance",
        "Last Txn",
        "Days",
        "Years",
        "Tier",
        "Contact",
        "Amount",
    ]);
    for a in rows {
        let tier = a
            .inactivity_tier
            .map(|t| t.to_string())
            .unwrap_or_default();
        let tier_cell = match a.inactivity_tier {
            Some(InactivityTier::High) => tier.red().bold().to_string(),
            Some(InactivityTier::Medium) => tier.yellow().to_string(),
            _ => tier,
        };
        table.add_row(vec![
            Cell::new(&a.record.account_id),
            Cell::new(&a.record.account_type),
            Cell::new(&a.record.branch),
            Cell::new(&a.record.customer_type),
            Cell::new(money(a.record.balance)),
            Cell::new(a.record.last_txn_display()),
            Cell::new(a.days_inactive.map(|d| d.to_string()).unwrap_or_default()),
            Cell::new(a.years_inactive.map(years).unwrap_or_default()),
            Cell::new(tier_cell),
            Cell::new(a.contact_tier.to_string()),
            Cell::new(a.balance_tier.to_string()),
        ]);
    }
    format!("Inactive Accounts\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::config::RuleConfig;
    use crate::models::AccountRecord;
    use chrono::NaiveDate;

    fn sample_rows() -> Vec<ClassifiedAccount> {
        let record = AccountRecord {
            account_id: "ACC0001".into(),
            account_type: "Savings/Call/Current".into(),
            branch: "Main Branch".into(),
            customer_type: "Individual".into(),
            account_status: "Dormant".into(),
            balance: 350_000.0,
            last_txn_date: NaiveDate::from_ymd_opt(2019, 1, 1),
            last_txn_raw: "2019-01-01".into(),
            kyc_status: "Valid".into(),
            email_attempt: "Yes".into(),
            sms_attempt: "No".into(),
            phone_attempt: "No".into(),
        };
        classify(
            vec![record],
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            &RuleConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_tiers() {
        let tiers = parse_tiers(Some(vec!["high".into(), "MONITOR".into()]))
            .unwrap()
            .unwrap();
        assert_eq!(tiers, vec![InactivityTier::High, InactivityTier::Monitor]);
        assert!(parse_tiers(Some(vec!["nope".into()])).is_err());
        assert!(parse_tiers(None).unwrap().is_none());
    }

    #[test]
    fn test_format_rows_includes_derived_columns() {
        let out = format_rows(&sample_rows());
        assert!(out.contains("ACC0001"));
        assert!(out.contains("Partial Contact"));
        assert!(out.contains("AED 350,000.00"));
    }

    #[test]
    fn test_format_summary_reports_balances() {
        let out = format_summary(&inactivity_summary(&sample_rows()));
        assert!(out.contains("Total Accounts"));
        assert!(out.contains("AED 350,000.00"));
        assert!(out.contains("Inactivity Categories"));
    }
}

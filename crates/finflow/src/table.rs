//! Terminal tables for snapshots and the applied-item log.

use finflow_core::Snapshot;
use finflow_core::model::{LogEffect, LogRecord};
use tabled::builder::Builder;
use tabled::settings::Style;

/// Format a balance with two decimal places, negatives parenthesised.
fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("({:.2})", -amount)
    } else {
        format!("{amount:.2}")
    }
}

fn month_label(date: jiff::civil::Date) -> String {
    date.strftime("%y/%m").to_string()
}

/// One row per month, one column per account.
pub fn snapshot_table(snapshots: &[Snapshot]) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Month".to_string()];
    if let Some(first) = snapshots.first() {
        header.extend(first.balances.iter().map(|b| b.name.clone()));
        header.push("Total".to_string());
    }
    builder.push_record(header);

    for snapshot in snapshots {
        let mut row = vec![month_label(snapshot.date)];
        row.extend(snapshot.balances.iter().map(|b| money(b.balance)));
        row.push(money(snapshot.net_total()));
        builder.push_record(row);
    }

    builder.build().with(Style::sharp()).to_string()
}

/// One row per applied (or skipped) item.
pub fn log_table(records: &[&LogRecord]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Month", "Handler", "Accounts", "Amount", "Details"]);

    for record in records {
        let (accounts, amount, details) = match &record.effect {
            LogEffect::Interest {
                account,
                annual_rate,
                amount,
                balance_after,
            } => (
                account.clone(),
                money(*amount),
                format!("{:.2}% APR, balance {}", annual_rate * 100.0, money(*balance_after)),
            ),
            LogEffect::Transfer {
                source,
                dest,
                amount,
            } => (
                format!(
                    "{} -> {}",
                    source.as_deref().unwrap_or("(external)"),
                    dest.as_deref().unwrap_or("(external)")
                ),
                money(*amount),
                String::new(),
            ),
            LogEffect::Skipped { account, handler } => (
                account.clone(),
                String::new(),
                format!("skipped: unknown account for {handler}"),
            ),
        };
        builder.push_record([
            month_label(record.date),
            record.handler().to_string(),
            accounts,
            amount,
            details,
        ]);
    }

    builder.build().with(Style::sharp()).to_string()
}

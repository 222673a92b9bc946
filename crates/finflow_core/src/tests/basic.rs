//! Tests for timeline construction and month stepping.

use jiff::civil::date;

use crate::model::{Account, Endpoint, ItemEffect};
use crate::schedule::ScheduledItem;
use crate::timeline::Timeline;

fn two_accounts() -> Vec<Account> {
    vec![
        Account::asset("Checking", 1_000.0),
        Account::asset("Savings", 5_000.0),
    ]
}

#[test]
fn test_initial_snapshot() {
    let timeline = Timeline::new(date(2025, 1, 1), two_accounts());

    assert_eq!(timeline.current_date(), date(2025, 1, 1));
    assert_eq!(timeline.history().len(), 1);

    let initial = &timeline.history()[0];
    assert_eq!(initial.date, date(2025, 1, 1));
    assert_eq!(initial.month, 0);
    assert_eq!(initial.balance("Checking"), Some(1_000.0));
    assert_eq!(initial.balance("Savings"), Some(5_000.0));
}

#[test]
fn test_advance_steps_one_calendar_month() {
    let mut timeline = Timeline::new(date(2025, 11, 1), two_accounts());

    let snapshot = timeline.advance_month();
    assert_eq!(snapshot.date, date(2025, 12, 1));
    assert_eq!(timeline.current_date(), date(2025, 12, 1));

    // Year boundary.
    let snapshot = timeline.advance_month();
    assert_eq!(snapshot.date, date(2026, 1, 1));
}

#[test]
fn test_advance_months_bounded_pull() {
    let mut timeline = Timeline::new(date(2025, 1, 1), two_accounts());

    let snapshots = timeline.advance_months(6);
    assert_eq!(snapshots.len(), 6);
    assert_eq!(snapshots[5].date, date(2025, 7, 1));
    assert_eq!(timeline.history().len(), 7);

    // The date never decreases across advances.
    let dates: Vec<_> = timeline.history().iter().map(|s| s.date).collect();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_snapshot_order_matches_account_order() {
    let accounts = vec![
        Account::asset("Zeta", 1.0),
        Account::asset("Alpha", 2.0),
        Account::liability("Mid", -3.0),
    ];
    let mut timeline = Timeline::new(date(2025, 1, 1), accounts);
    let snapshot = timeline.advance_month();

    let names: Vec<_> = snapshot.balances.iter().map(|b| b.name.as_str()).collect();
    let tracked: Vec<_> = timeline.accounts().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, tracked);
    assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
}

#[test]
fn test_no_items_means_constant_balances() {
    let mut timeline = Timeline::new(date(2025, 1, 1), two_accounts());
    for _ in 0..12 {
        let snapshot = timeline.advance_month();
        assert_eq!(snapshot.balance("Checking"), Some(1_000.0));
        assert_eq!(snapshot.balance("Savings"), Some(5_000.0));
    }
}

#[test]
fn test_account_advance_commits_staged_deltas() {
    let mut account = Account::asset("Checking", 100.0);
    assert_eq!(account.balance(), 100.0);

    account.stage(25.0);
    account.stage(-10.0);
    // Staging does not touch the committed balance.
    assert_eq!(account.balance(), 100.0);
    assert_eq!(account.projected(), 115.0);

    assert_eq!(account.advance(), 115.0);
    assert_eq!(account.balance(), 115.0);
    // A second advance with nothing staged is a no-op month.
    assert_eq!(account.advance(), 115.0);
}

#[test]
fn test_external_transfer_changes_only_tracked_side() {
    let mut timeline = Timeline::new(date(2025, 1, 1), two_accounts());
    timeline
        .add_item(ScheduledItem::once(
            date(2025, 1, 1),
            ItemEffect::transfer(Endpoint::External, Endpoint::internal("Checking"), 250.0),
        ))
        .unwrap();

    let snapshot = timeline.advance_month();
    assert_eq!(snapshot.balance("Checking"), Some(1_250.0));
    assert_eq!(snapshot.balance("Savings"), Some(5_000.0));
}

#[test]
fn test_transaction_log_filters() {
    use std::collections::HashSet;

    let mut timeline = Timeline::new(date(2025, 1, 1), two_accounts());
    timeline
        .add_item(ScheduledItem::recurring(
            date(2025, 1, 1),
            crate::model::Recurrence::monthly(),
            ItemEffect::interest("Savings", 0.05),
        ))
        .unwrap();
    timeline
        .add_item(ScheduledItem::once(
            date(2025, 2, 1),
            ItemEffect::transfer(
                Endpoint::internal("Checking"),
                Endpoint::internal("Savings"),
                100.0,
            ),
        ))
        .unwrap();
    timeline.advance_months(3);

    // Unfiltered: three interest firings plus one transfer.
    assert_eq!(timeline.transaction_log(None, None, None).len(), 4);

    let handlers = HashSet::from(["transfer".to_string()]);
    let transfers = timeline.transaction_log(None, None, Some(&handlers));
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].date, date(2025, 2, 1));

    let accounts = HashSet::from(["Checking".to_string()]);
    let touching_checking = timeline.transaction_log(None, Some(&accounts), None);
    assert_eq!(touching_checking.len(), 1);

    // Bounded by month count: only month 1's records.
    let first_month = timeline.transaction_log(Some(1), None, None);
    assert_eq!(first_month.len(), 1);
    assert_eq!(first_month[0].handler(), "interest");
}

//! Scenario config, builder DSL, and the reference projection.

use jiff::civil::date;

use crate::config::{AccountConfig, ItemConfig, PeriodConfig, ScenarioConfig, TimelineBuilder};
use crate::error::ConfigError;
use crate::model::{AccountKind, PeriodUnit};

/// The reference projection: a mortgage accruing 3.85% APR against a fund
/// accruing 10% APR, no transfers. Whole-unit values, fractional cents
/// dropped.
#[test]
fn test_reference_projection() {
    let mut timeline = TimelineBuilder::new()
        .start(2025, 1)
        .liability("Mortgage", -100_000.0)
        .asset("Fidelity", 100_000.0)
        .interest("Mortgage", 0.0385)
        .interest("Fidelity", 0.10)
        .build()
        .unwrap();

    let expected = [
        (-100_000.0, 100_000.0),
        (-100_315.0, 100_797.0),
        (-100_631.0, 101_601.0),
    ];
    for (month, (mortgage, fidelity)) in expected.iter().enumerate() {
        let snapshot = &timeline.history()[month];
        assert_eq!(snapshot.balance("Mortgage").unwrap().trunc(), *mortgage);
        assert_eq!(snapshot.balance("Fidelity").unwrap().trunc(), *fidelity);
        if month < expected.len() - 1 {
            timeline.advance_month();
        }
    }
}

fn reference_scenario() -> ScenarioConfig {
    ScenarioConfig {
        start: Some("2025/01".to_string()),
        accounts: vec![
            AccountConfig {
                name: "Mortgage".to_string(),
                balance: -100_000.0,
                kind: AccountKind::Liability,
            },
            AccountConfig {
                name: "Fidelity".to_string(),
                balance: 100_000.0,
                kind: AccountKind::Asset,
            },
        ],
        items: vec![
            ItemConfig::Interest {
                account: "Mortgage".to_string(),
                rate: 0.0385,
                period: Some(PeriodConfig {
                    every: 1,
                    unit: PeriodUnit::Month,
                }),
                start: None,
                until: None,
            },
            ItemConfig::Interest {
                account: "Fidelity".to_string(),
                rate: 0.10,
                period: Some(PeriodConfig {
                    every: 1,
                    unit: PeriodUnit::Month,
                }),
                start: None,
                until: None,
            },
        ],
    }
}

#[test]
fn test_scenario_config_builds_reference_timeline() {
    let mut timeline = reference_scenario().build(None).unwrap();
    assert_eq!(timeline.start_date(), date(2025, 1, 1));

    timeline.advance_months(2);
    let last = timeline.history().last().unwrap();
    assert_eq!(last.balance("Mortgage").unwrap().trunc(), -100_631.0);
    assert_eq!(last.balance("Fidelity").unwrap().trunc(), 101_601.0);
}

#[test]
fn test_scenario_start_falls_back_to_caller_default() {
    let mut scenario = reference_scenario();
    scenario.start = None;

    assert_eq!(scenario.build(None).unwrap_err(), ConfigError::MissingStart);

    let timeline = scenario.build(Some(date(2030, 6, 1))).unwrap();
    assert_eq!(timeline.start_date(), date(2030, 6, 1));
}

#[test]
fn test_scenario_rejects_unknown_account() {
    let mut scenario = reference_scenario();
    scenario.items.push(ItemConfig::Transfer {
        source: Some("Fidelity".to_string()),
        dest: Some("Nope".to_string()),
        amount: 100.0,
        period: None,
        start: None,
        until: None,
        source_floor: None,
        dest_ceiling: None,
    });
    assert_eq!(
        scenario.build(None).unwrap_err(),
        ConfigError::UnknownAccount("Nope".to_string())
    );
}

#[test]
fn test_scenario_rejects_duplicate_account() {
    let mut scenario = reference_scenario();
    scenario.accounts.push(AccountConfig {
        name: "Fidelity".to_string(),
        balance: 1.0,
        kind: AccountKind::Asset,
    });
    assert_eq!(
        scenario.build(None).unwrap_err(),
        ConfigError::DuplicateAccount("Fidelity".to_string())
    );
}

#[test]
fn test_scenario_rejects_bad_dates_and_numbers() {
    let mut scenario = reference_scenario();
    scenario.start = Some("not-a-month".to_string());
    assert!(matches!(
        scenario.build(None),
        Err(ConfigError::InvalidDate(_))
    ));

    let mut scenario = reference_scenario();
    scenario.items.push(ItemConfig::Transfer {
        source: None,
        dest: Some("Fidelity".to_string()),
        amount: f64::NAN,
        period: None,
        start: None,
        until: None,
        source_floor: None,
        dest_ceiling: None,
    });
    assert!(matches!(
        scenario.build(None),
        Err(ConfigError::NonFiniteNumber {
            field: "amount",
            ..
        })
    ));
}

#[test]
fn test_scenario_period_validation_propagates() {
    let mut scenario = reference_scenario();
    scenario.items.push(ItemConfig::Transfer {
        source: None,
        dest: Some("Fidelity".to_string()),
        amount: 10.0,
        period: Some(PeriodConfig {
            every: 0,
            unit: PeriodUnit::Month,
        }),
        start: None,
        until: None,
        source_floor: None,
        dest_ceiling: None,
    });
    assert!(matches!(
        scenario.build(None),
        Err(ConfigError::Schedule(_))
    ));
}

#[test]
fn test_builder_rejects_unknown_reference() {
    let result = TimelineBuilder::new()
        .start(2025, 1)
        .asset("A", 100.0)
        .interest("B", 0.05)
        .build();
    assert_eq!(result.unwrap_err(), ConfigError::UnknownAccount("B".to_string()));
}

#[test]
fn test_builder_requires_start() {
    let result = TimelineBuilder::new().asset("A", 100.0).build();
    assert_eq!(result.unwrap_err(), ConfigError::MissingStart);
}

#[test]
fn test_scenario_guarded_transfer() {
    let scenario = ScenarioConfig {
        start: Some("2025/01".to_string()),
        accounts: vec![
            AccountConfig {
                name: "Checking".to_string(),
                balance: 1_000.0,
                kind: AccountKind::Asset,
            },
            AccountConfig {
                name: "Savings".to_string(),
                balance: 900.0,
                kind: AccountKind::Asset,
            },
        ],
        items: vec![ItemConfig::Transfer {
            source: Some("Checking".to_string()),
            dest: Some("Savings".to_string()),
            amount: 500.0,
            period: Some(PeriodConfig {
                every: 1,
                unit: PeriodUnit::Month,
            }),
            start: None,
            until: None,
            source_floor: None,
            dest_ceiling: Some(1_000.0),
        }],
    };

    let mut timeline = scenario.build(None).unwrap();
    let snapshot = timeline.advance_month();
    // Only 100 fits under the destination ceiling.
    assert_eq!(snapshot.balance("Savings"), Some(1_000.0));
    assert_eq!(snapshot.balance("Checking"), Some(900.0));
}

//! Tests for the consumption ledger and JSON plans.

use chrono::{Duration, NaiveDate};
use depletion_engine::{
    forecast, predict_end_date_on, DepletionError, FixedClock, ForecastOptions, Outcome,
    Periodicity, Plan, RecurringUse,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

fn day(offset: i64) -> NaiveDate {
    today() + Duration::days(offset)
}

fn four_uses() -> Vec<RecurringUse> {
    vec![
        RecurringUse::daily(10, today()).unwrap(),
        RecurringUse::daily(10, today()).unwrap(),
        RecurringUse::weekly(20, today()).unwrap(),
        RecurringUse::weekly(40, today()).unwrap(),
    ]
}

fn bounded_uses() -> Vec<RecurringUse> {
    vec![
        RecurringUse::new(10, Periodicity::Daily, today(), Some(day(5))).unwrap(),
        RecurringUse::new(20, Periodicity::Weekly, today(), Some(day(10))).unwrap(),
    ]
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[test]
fn exact_depletion_ends_ledger_at_zero() {
    let result = forecast(today(), 500, &four_uses(), ForecastOptions::default());

    assert_eq!(result.outcome, Outcome::Depleted { date: day(15) });
    assert_eq!(result.remaining, 0);
    // 16 days of two dailies plus three weeks of two weeklies.
    assert_eq!(result.occurrences_consumed, 38);
    assert_eq!(result.ledger.len(), 38);
    assert_eq!(result.ledger.last().unwrap().remaining, 0);
    assert!(!result.truncated);
}

#[test]
fn overdraw_records_negative_remaining() {
    let result = forecast(today(), 501, &four_uses(), ForecastOptions::default());

    assert_eq!(result.outcome, Outcome::Depleted { date: day(15) });
    let last = result.ledger.last().unwrap();
    assert_eq!(last.date, day(16));
    assert_eq!(last.remaining, -9);
    assert_eq!(result.remaining, -9);
}

#[test]
fn bounded_uses_never_deplete() {
    let result = forecast(today(), 100, &bounded_uses(), ForecastOptions::default());

    assert_eq!(result.outcome, Outcome::NeverDepleted);
    assert_eq!(result.outcome.depletion_date(), None);
    assert_eq!(result.occurrences_consumed, 7);
    assert_eq!(result.remaining, 10);
}

#[test]
fn ledger_tracks_running_stock() {
    let uses = [RecurringUse::daily(10, today()).unwrap()];
    let result = forecast(today(), 50, &uses, ForecastOptions::default());

    let remaining: Vec<i64> = result.ledger.iter().map(|c| c.remaining).collect();
    assert_eq!(remaining, vec![40, 30, 20, 10, 0]);
    assert!(result
        .ledger
        .iter()
        .all(|c| c.amount == 10 && c.periodicity == Periodicity::Daily));
}

#[test]
fn ledger_dates_never_go_backwards() {
    let result = forecast(today(), 1_000, &four_uses(), ForecastOptions::default());
    for pair in result.ledger.windows(2) {
        assert!(pair[0].date <= pair[1].date, "{:?} > {:?}", pair[0], pair[1]);
    }
}

#[test]
fn agrees_with_predict_end_date() {
    for stock in [-1, 0, 1, 50, 99, 100, 499, 500, 501, 2_000] {
        let uses = four_uses();
        let result = forecast(today(), stock, &uses, ForecastOptions::default());
        assert_eq!(
            result.outcome.depletion_date(),
            predict_end_date_on(today(), stock, &uses),
            "stock {stock}"
        );
    }
}

#[test]
fn forecast_ends_at_last_representable_date() {
    let uses = [RecurringUse::daily(10, NaiveDate::MAX).unwrap()];
    let result = forecast(NaiveDate::MAX, 50, &uses, ForecastOptions::default());

    assert_eq!(result.outcome, Outcome::NeverDepleted);
    assert_eq!(result.occurrences_consumed, 1);
    assert_eq!(result.remaining, 40);
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[test]
fn horizon_stops_before_later_occurrences() {
    let uses = [RecurringUse::daily(10, today()).unwrap()];
    let options = ForecastOptions {
        horizon: Some(day(3)),
        ..ForecastOptions::default()
    };
    let result = forecast(today(), 100, &uses, options);

    assert_eq!(result.outcome, Outcome::HorizonReached { horizon: day(3) });
    assert_eq!(result.occurrences_consumed, 4);
    assert_eq!(result.remaining, 60);
}

#[test]
fn horizon_after_depletion_has_no_effect() {
    let uses = [RecurringUse::daily(10, today()).unwrap()];
    let options = ForecastOptions {
        horizon: Some(day(30)),
        ..ForecastOptions::default()
    };
    let result = forecast(today(), 50, &uses, options);
    assert_eq!(result.outcome, Outcome::Depleted { date: day(4) });
}

#[test]
fn horizon_on_depletion_date_still_depletes() {
    let uses = [RecurringUse::daily(10, today()).unwrap()];
    let options = ForecastOptions {
        horizon: Some(day(4)),
        ..ForecastOptions::default()
    };
    let result = forecast(today(), 50, &uses, options);
    assert_eq!(result.outcome, Outcome::Depleted { date: day(4) });
}

#[test]
fn max_entries_truncates_ledger_only() {
    let uses = [RecurringUse::daily(10, today()).unwrap()];
    let options = ForecastOptions {
        max_entries: Some(2),
        ..ForecastOptions::default()
    };
    let result = forecast(today(), 50, &uses, options);

    assert_eq!(result.outcome, Outcome::Depleted { date: day(4) });
    assert_eq!(result.occurrences_consumed, 5);
    assert_eq!(result.ledger.len(), 2);
    assert!(result.truncated);
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn outcome_serializes_with_status_tag() {
    let depleted = serde_json::to_value(Outcome::Depleted { date: day(4) }).unwrap();
    assert_eq!(
        depleted,
        serde_json::json!({"status": "depleted", "date": "2026-03-05"})
    );

    let never = serde_json::to_value(Outcome::NeverDepleted).unwrap();
    assert_eq!(never, serde_json::json!({"status": "never_depleted"}));
}

#[test]
fn forecast_serializes_ledger() {
    let uses = [RecurringUse::weekly(25, today()).unwrap()];
    let result = forecast(today(), 50, &uses, ForecastOptions::default());
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["today"], "2026-03-01");
    assert_eq!(value["starting_stock"], 50);
    assert_eq!(value["outcome"]["date"], "2026-03-08");
    assert_eq!(value["ledger"][1]["periodicity"], "weekly");
    assert_eq!(value["ledger"][1]["remaining"], 0);
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

const PLAN_JSON: &str = r#"{
    "stock": 500,
    "uses": [
        {"amount": 10, "periodicity": "daily", "start_date": "2026-03-01"},
        {"amount": 10, "periodicity": "daily", "start_date": "2026-03-01", "end_date": null},
        {"amount": 20, "periodicity": "weekly", "start_date": "2026-03-01"},
        {"amount": 40, "periodicity": "weekly", "start_date": "2026-03-01"}
    ]
}"#;

#[test]
fn plan_parses_and_predicts() {
    let plan = Plan::from_json(PLAN_JSON).expect("valid plan");
    assert_eq!(plan.stock, 500);
    assert_eq!(plan.uses, four_uses());
    assert_eq!(plan.predict_end_date(&FixedClock(today())), Some(day(15)));
}

#[test]
fn plan_forecast_uses_clock() {
    let plan = Plan::from_json(PLAN_JSON).unwrap();
    let result = plan.forecast(&FixedClock(today()), ForecastOptions::default());
    assert_eq!(result.today, today());
    assert_eq!(result.outcome, Outcome::Depleted { date: day(15) });
}

#[test]
fn plan_without_uses_never_depletes() {
    let plan = Plan::from_json(r#"{"stock": 10}"#).unwrap();
    assert!(plan.uses.is_empty());
    assert_eq!(plan.predict_end_date(&FixedClock(today())), None);
}

#[test]
fn malformed_plan_is_a_json_error() {
    let err = Plan::from_json("{ not json").unwrap_err();
    assert!(matches!(err, DepletionError::Json(_)));
}

#[test]
fn plan_with_invalid_use_is_rejected() {
    let json = r#"{"stock": 10, "uses": [{"amount": 5, "periodicity": "hourly", "start_date": "2026-03-01"}]}"#;
    let err = Plan::from_json(json).unwrap_err();
    assert!(err.to_string().contains("Unknown periodicity"), "{err}");
}

//! Consumption ledger -- the depletion simulation with every step recorded.

use chrono::NaiveDate;
use serde::Serialize;

use crate::recurring::{Periodicity, RecurringUse};
use crate::simulator::{Depletion, Occurrences};

/// One consumed occurrence and the stock left after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Consumption {
    pub date: NaiveDate,
    pub amount: i64,
    pub periodicity: Periodicity,
    /// Stock after this occurrence. Negative on the occurrence that overdraws.
    pub remaining: i64,
}

/// How a forecast ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The stock ran out on `date`.
    Depleted { date: NaiveDate },
    /// Every use stopped occurring with stock left over.
    NeverDepleted,
    /// The next occurrence falls after the horizon and the stock is not depleted yet.
    HorizonReached { horizon: NaiveDate },
}

impl Outcome {
    pub fn depletion_date(&self) -> Option<NaiveDate> {
        match self {
            Outcome::Depleted { date } => Some(*date),
            Outcome::NeverDepleted | Outcome::HorizonReached { .. } => None,
        }
    }
}

/// Bounds on a forecast run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForecastOptions {
    /// Last date to simulate (inclusive). Occurrences after it are not consumed.
    pub horizon: Option<NaiveDate>,
    /// Keep at most this many ledger rows. The simulation itself is not cut short.
    ///
    /// With neither this nor `horizon` set, the ledger holds one row per
    /// consumed occurrence, so its size grows with `stock` divided by the
    /// smallest use amount.
    pub max_entries: Option<usize>,
}

/// Result of [`forecast`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Forecast {
    pub today: NaiveDate,
    pub starting_stock: i64,
    pub outcome: Outcome,
    pub remaining: i64,
    pub occurrences_consumed: usize,
    pub ledger: Vec<Consumption>,
    /// True when `max_entries` dropped rows from the ledger.
    pub truncated: bool,
}

/// Simulate consumption of `stock` by `uses` from `today`, recording each step.
///
/// Without a horizon, `outcome.depletion_date()` always equals
/// [`crate::predict_end_date_on`] for the same arguments.
pub fn forecast(
    today: NaiveDate,
    stock: i64,
    uses: &[RecurringUse],
    options: ForecastOptions,
) -> Forecast {
    let mut depletion = Depletion::new(stock, today);
    let mut ledger = Vec::new();
    let mut consumed = 0usize;
    let mut truncated = false;
    let mut outcome = Outcome::NeverDepleted;

    for occurrence in Occurrences::new(uses, today) {
        if let Some(horizon) = options.horizon {
            if occurrence.date > horizon {
                outcome = Outcome::HorizonReached { horizon };
                break;
            }
        }

        let depleted = depletion.consume(&occurrence);
        consumed += 1;

        if options.max_entries.is_none_or(|max| ledger.len() < max) {
            ledger.push(Consumption {
                date: occurrence.date,
                amount: occurrence.recurring_use.amount(),
                periodicity: occurrence.recurring_use.periodicity(),
                remaining: depletion.remaining,
            });
        } else {
            truncated = true;
        }

        if let Some(date) = depleted {
            outcome = Outcome::Depleted { date };
            break;
        }
    }

    tracing::debug!(?outcome, consumed, "forecast finished");

    Forecast {
        today,
        starting_stock: stock,
        outcome,
        remaining: depletion.remaining,
        occurrences_consumed: consumed,
        ledger,
        truncated,
    }
}

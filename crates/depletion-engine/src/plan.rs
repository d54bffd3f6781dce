//! A stock plus the uses that consume it, as exchanged with callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::Result;
use crate::forecast::{self, Forecast, ForecastOptions};
use crate::recurring::RecurringUse;
use crate::simulator;

/// Starting stock and its recurring uses.
///
/// JSON shape:
///
/// ```json
/// {
///   "stock": 500,
///   "uses": [
///     { "amount": 10, "periodicity": "daily", "start_date": "2026-03-01" },
///     { "amount": 40, "periodicity": "weekly", "start_date": "2026-03-01", "end_date": "2026-06-01" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub stock: i64,
    #[serde(default)]
    pub uses: Vec<RecurringUse>,
}

impl Plan {
    /// Parse a plan, validating every use.
    ///
    /// # Errors
    /// Returns `DepletionError::Json` for malformed JSON or an invalid use.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn predict_end_date<C: Clock + ?Sized>(&self, clock: &C) -> Option<NaiveDate> {
        simulator::predict_end_date(clock, self.stock, &self.uses)
    }

    pub fn forecast<C: Clock + ?Sized>(&self, clock: &C, options: ForecastOptions) -> Forecast {
        forecast::forecast(clock.today(), self.stock, &self.uses, options)
    }
}

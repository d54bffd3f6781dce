//! Recurring uses -- the immutable description of one consumption event.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DepletionError, Result};

/// Recurrence class of a use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Periodicity {
    Daily,
    Weekly,
}

impl Periodicity {
    /// Days between two successive occurrences.
    pub fn step_days(self) -> i64 {
        match self {
            Periodicity::Daily => 1,
            Periodicity::Weekly => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Periodicity::Daily => "daily",
            Periodicity::Weekly => "weekly",
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = DepletionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Periodicity::Daily),
            "weekly" => Ok(Periodicity::Weekly),
            _ => Err(DepletionError::UnknownPeriodicity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Periodicity {
    type Error = DepletionError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// One recurring consumption of the stock.
///
/// `start_date` is inclusive: the first date the use can occur. `end_date` is
/// exclusive: the use never occurs on or after it. A use without an end date
/// recurs forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecurringUse")]
pub struct RecurringUse {
    amount: i64,
    periodicity: Periodicity,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

impl RecurringUse {
    /// Build a validated recurring use.
    ///
    /// # Errors
    /// Returns `DepletionError::NonPositiveAmount` if `amount <= 0`.
    /// Returns `DepletionError::InvalidDateRange` if `end_date` is not strictly
    /// after `start_date`.
    pub fn new(
        amount: i64,
        periodicity: Periodicity,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Self> {
        if amount <= 0 {
            return Err(DepletionError::NonPositiveAmount(amount));
        }
        if let Some(end) = end_date {
            if end <= start_date {
                return Err(DepletionError::InvalidDateRange {
                    start: start_date,
                    end,
                });
            }
        }
        Ok(Self {
            amount,
            periodicity,
            start_date,
            end_date,
        })
    }

    /// Shorthand for an unbounded daily use.
    pub fn daily(amount: i64, start_date: NaiveDate) -> Result<Self> {
        Self::new(amount, Periodicity::Daily, start_date, None)
    }

    /// Shorthand for an unbounded weekly use.
    pub fn weekly(amount: i64, start_date: NaiveDate) -> Result<Self> {
        Self::new(amount, Periodicity::Weekly, start_date, None)
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// True when the use can no longer occur on or after `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| end <= today)
    }

    /// True when an occurrence on `date` is still before the end date.
    pub fn occurs_before_end(&self, date: NaiveDate) -> bool {
        self.end_date.is_none_or(|end| end > date)
    }
}

/// Wire shape of a recurring use; every field goes through [`RecurringUse::new`].
#[derive(Deserialize)]
struct RawRecurringUse {
    amount: i64,
    periodicity: Periodicity,
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
}

impl TryFrom<RawRecurringUse> for RecurringUse {
    type Error = DepletionError;

    fn try_from(raw: RawRecurringUse) -> Result<Self> {
        RecurringUse::new(raw.amount, raw.periodicity, raw.start_date, raw.end_date)
    }
}

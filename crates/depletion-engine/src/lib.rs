//! # depletion-engine
//!
//! Deterministic prediction of the date a finite stock runs out, given a set of
//! daily and weekly recurring uses.
//!
//! The engine performs a streaming merge of three sources -- uses that have not
//! started yet, and one queue each of active daily and weekly uses -- consuming
//! occurrences in date order until the stock hits zero or every use has ended.
//! "Today" comes from an injected [`Clock`] and is read once per run.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use depletion_engine::{predict_end_date, FixedClock, RecurringUse};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
//! let uses = [RecurringUse::daily(10, today).unwrap()];
//!
//! let end = predict_end_date(&FixedClock(today), 50, &uses);
//! assert_eq!(end, Some(today + Duration::days(4)));
//! ```
//!
//! ## Modules
//!
//! - [`recurring`] — `RecurringUse` and its `Periodicity`
//! - [`clock`] — where "today" comes from
//! - [`occurrence`] — a use paired with its next occurrence date
//! - [`queue`] — FIFO of active occurrences of one recurrence class
//! - [`pending`] — filtering and ordering of uses that have not started
//! - [`simulator`] — the chronological merge and the depletion loop
//! - [`forecast`] — the same simulation with a per-occurrence ledger
//! - [`plan`] — stock + uses loaded from JSON
//! - [`error`] — Error types

pub mod clock;
pub mod error;
pub mod forecast;
pub mod occurrence;
pub mod pending;
pub mod plan;
pub mod queue;
pub mod recurring;
pub mod simulator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::DepletionError;
pub use forecast::{forecast, Consumption, Forecast, ForecastOptions, Outcome};
pub use plan::Plan;
pub use recurring::{Periodicity, RecurringUse};
pub use simulator::{predict_end_date, predict_end_date_on, Occurrence, Occurrences};

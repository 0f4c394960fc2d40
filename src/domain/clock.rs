//! Calendar access behind a trait
//!
//! Overdue checks depend on "today", and nothing below the handlers is
//! allowed to read the wall clock directly. Handlers take the date from the
//! clock in [`crate::infrastructure::AppState`] and pass it down, so tests
//! can pin the calendar with [`FixedClock`].

use chrono::NaiveDate;

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock calendar used by the running service
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Calendar pinned to one date
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

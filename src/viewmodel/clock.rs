//! Source of "today" for the workout buckets

use chrono::NaiveDate;

/// Supplies the client's current local calendar day.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Today as `YYYY-MM-DD`, the format workout dates are compared in
    fn today_string(&self) -> String {
        self.today().format("%Y-%m-%d").to_string()
    }
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock stuck on one day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

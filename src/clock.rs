use std::env;

use chrono::{Local, NaiveDate};

/// Environment variable pinning "today" to a fixed `YYYY-MM-DD` date.
pub const TODAY_ENV: &str = "CYCLE_PICKER_TODAY";

/// Clock abstracts access to the current local date so cycle math stays deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns today's date on the host's local calendar.
    fn today(&self) -> NaiveDate;
}

/// Real-time clock backed by the system local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen on a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Picks a [`FixedClock`] when [`TODAY_ENV`] holds a valid date, the system clock otherwise.
pub fn clock_from_env() -> Box<dyn Clock> {
    match env::var(TODAY_ENV) {
        Ok(raw) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Box::new(FixedClock(date)),
            Err(err) => {
                tracing::warn!(value = %raw, error = %err, "ignoring invalid {TODAY_ENV}");
                Box::new(SystemClock)
            }
        },
        Err(_) => Box::new(SystemClock),
    }
}

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::errors::CycleError;

use super::range::DateRange;

/// Day of month on which every cycle starts.
pub const CYCLE_START_DAY: u32 = 5;
/// Day of the following month on which every cycle ends.
pub const CYCLE_END_DAY: u32 = 4;

/// A billing cycle: the 5th of one month through the 4th of the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cycle(DateRange);

impl Cycle {
    pub fn range(&self) -> &DateRange {
        &self.0
    }

    pub fn start_day(&self) -> NaiveDate {
        self.0.start_day()
    }

    pub fn end_day(&self) -> NaiveDate {
        self.0.end_day()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.0.contains(day)
    }

    pub fn previous(&self) -> Result<Self, CycleError> {
        previous_cycle(self)
    }

    pub fn next(&self) -> Result<Self, CycleError> {
        next_cycle(self)
    }

    /// Cycle `steps` months away; negative steps walk backwards.
    pub fn shift(&self, steps: i32) -> Result<Self, CycleError> {
        let start = self.start_day();
        let moved = if steps >= 0 {
            start.checked_add_months(Months::new(steps.unsigned_abs()))
        } else {
            start.checked_sub_months(Months::new(steps.unsigned_abs()))
        };
        compute_cycle(moved.ok_or(CycleError::OutOfRange(start))?)
    }
}

impl From<Cycle> for DateRange {
    fn from(cycle: Cycle) -> Self {
        cycle.0
    }
}

/// Computes the cycle that contains `reference`.
///
/// References on or after the 5th belong to the cycle starting that month;
/// earlier days belong to the cycle that started the month before.
pub fn compute_cycle(reference: NaiveDate) -> Result<Cycle, CycleError> {
    let out_of_range = || CycleError::OutOfRange(reference);

    let anchor = reference
        .with_day(CYCLE_START_DAY)
        .ok_or_else(out_of_range)?;
    let start = if reference.day() >= CYCLE_START_DAY {
        anchor
    } else {
        anchor
            .checked_sub_months(Months::new(1))
            .ok_or_else(out_of_range)?
    };
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.with_day(CYCLE_END_DAY))
        .ok_or_else(out_of_range)?;

    Ok(Cycle(DateRange::new(start, end)?))
}

pub fn previous_cycle(cycle: &Cycle) -> Result<Cycle, CycleError> {
    let start = cycle.start_day();
    let reference = start
        .checked_sub_months(Months::new(1))
        .ok_or(CycleError::OutOfRange(start))?;
    compute_cycle(reference)
}

pub fn next_cycle(cycle: &Cycle) -> Result<Cycle, CycleError> {
    let start = cycle.start_day();
    let reference = start
        .checked_add_months(Months::new(1))
        .ok_or(CycleError::OutOfRange(start))?;
    compute_cycle(reference)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_before_fifth_belongs_to_previous_month() {
        let cycle = compute_cycle(d(2024, 6, 3)).unwrap();
        assert_eq!(cycle.start_day(), d(2024, 5, 5));
        assert_eq!(cycle.end_day(), d(2024, 6, 4));
    }

    #[test]
    fn fifth_starts_a_new_cycle() {
        let cycle = compute_cycle(d(2024, 6, 5)).unwrap();
        assert_eq!(cycle.start_day(), d(2024, 6, 5));
        assert_eq!(cycle.end_day(), d(2024, 7, 4));
    }

    #[test]
    fn cycle_wraps_the_year_boundary() {
        let december = compute_cycle(d(2024, 12, 31)).unwrap();
        assert_eq!(december.start_day(), d(2024, 12, 5));
        assert_eq!(december.end_day(), d(2025, 1, 4));

        let january = compute_cycle(d(2025, 1, 1)).unwrap();
        assert_eq!(january, december);
    }

    #[test]
    fn every_day_of_a_leap_year_lands_on_day_five_and_four() {
        let mut day = d(2024, 1, 1);
        while day.year() == 2024 {
            let cycle = compute_cycle(day).unwrap();
            assert_eq!(cycle.start_day().day(), CYCLE_START_DAY);
            assert_eq!(cycle.end_day().day(), CYCLE_END_DAY);
            assert!(cycle.contains(day), "{day} not inside {}", cycle.range());
            assert_eq!(
                cycle.end_day(),
                cycle
                    .start_day()
                    .checked_add_months(Months::new(1))
                    .unwrap()
                    .with_day(4)
                    .unwrap()
            );
            assert_eq!(compute_cycle(cycle.start_day()).unwrap(), cycle);
            day += Duration::days(1);
        }
    }

    #[test]
    fn neighbours_tile_without_gaps() {
        let mut cycle = compute_cycle(d(2023, 1, 17)).unwrap();
        for _ in 0..36 {
            let next = cycle.next().unwrap();
            assert_eq!(cycle.end_day() + Duration::days(1), next.start_day());
            assert_eq!(next.previous().unwrap(), cycle);
            assert_eq!(cycle.previous().unwrap().next().unwrap(), cycle);
            cycle = next;
        }
    }

    #[test]
    fn shift_moves_by_whole_cycles() {
        let cycle = compute_cycle(d(2024, 3, 10)).unwrap();
        assert_eq!(cycle.shift(0).unwrap(), cycle);
        assert_eq!(cycle.shift(-3).unwrap().start_day(), d(2023, 12, 5));
        assert_eq!(cycle.shift(10).unwrap().start_day(), d(2025, 1, 5));
    }

    #[test]
    fn calendar_limits_surface_as_errors() {
        assert!(matches!(
            compute_cycle(NaiveDate::MAX),
            Err(CycleError::OutOfRange(_))
        ));
        assert!(matches!(
            compute_cycle(NaiveDate::MIN),
            Err(CycleError::OutOfRange(_))
        ));
    }
}

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::errors::CycleError;

use super::calculator::{compute_cycle, Cycle};
use super::format::compact_span;
use super::locale::LocaleTable;

/// Number of presets offered when the caller does not choose one.
pub const DEFAULT_PRESET_COUNT: usize = 6;

/// A labelled cycle offered as a shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetEntry {
    pub label: String,
    pub value: Cycle,
}

/// Builds `count` presets, most recent first, relative to `reference`.
///
/// The first two entries carry the locale's "current" and "previous" labels;
/// older cycles are labelled with their compact month/year span.
pub fn build_presets(
    reference: NaiveDate,
    count: usize,
    locale: &dyn LocaleTable,
) -> Result<Vec<PresetEntry>, CycleError> {
    let mut presets = Vec::with_capacity(count);
    for offset in 0..count {
        let months = u32::try_from(offset).map_err(|_| CycleError::OutOfRange(reference))?;
        let shifted = reference
            .checked_sub_months(Months::new(months))
            .ok_or(CycleError::OutOfRange(reference))?;
        let value = compute_cycle(shifted)?;
        let label = match offset {
            0 => locale.current_cycle_label().to_string(),
            1 => locale.previous_cycle_label().to_string(),
            _ => locale.cycle_label(&compact_span(value.range(), locale)),
        };
        presets.push(PresetEntry { label, value });
    }
    tracing::debug!(%reference, count = presets.len(), "built cycle presets");
    Ok(presets)
}

/// Cycle values of `presets`, in order, for range classification.
pub fn known_cycles(presets: &[PresetEntry]) -> Vec<Cycle> {
    presets.iter().map(|preset| preset.value).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::cycle::locale::{EN_US, PT_BR};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn default_list_has_six_distinct_entries() {
        let reference = d(2024, 6, 10);
        let presets = build_presets(reference, DEFAULT_PRESET_COUNT, &PT_BR).unwrap();
        assert_eq!(presets.len(), 6);
        assert_eq!(presets[0].value, compute_cycle(reference).unwrap());
        assert_eq!(presets[1].value, compute_cycle(d(2024, 5, 10)).unwrap());

        let values: HashSet<_> = presets.iter().map(|p| p.value).collect();
        let labels: HashSet<_> = presets.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(values.len(), 6);
        assert_eq!(labels.len(), 6);
    }

    #[test]
    fn labels_follow_the_locale() {
        let presets = build_presets(d(2024, 2, 3), 4, &PT_BR).unwrap();
        let labels: Vec<_> = presets.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Ciclo atual",
                "Ciclo anterior",
                "Ciclo (11/23 - 12/23)",
                "Ciclo (10/23 - 11/23)",
            ]
        );

        let english = build_presets(d(2024, 2, 3), 3, &EN_US).unwrap();
        assert_eq!(english[0].label, "Current cycle");
        assert_eq!(english[2].label, "Cycle (11/23 - 12/23)");
    }

    #[test]
    fn end_of_month_reference_does_not_skip_cycles() {
        let presets = build_presets(d(2024, 3, 31), 3, &PT_BR).unwrap();
        let starts: Vec<_> = presets.iter().map(|p| p.value.start_day()).collect();
        assert_eq!(starts, [d(2024, 3, 5), d(2024, 2, 5), d(2024, 1, 5)]);
    }

    #[test]
    fn recomputing_is_stable() {
        let first = build_presets(d(2025, 1, 4), 6, &PT_BR).unwrap();
        let second = build_presets(d(2025, 1, 4), 6, &PT_BR).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn count_is_caller_controlled() {
        assert!(build_presets(d(2024, 6, 10), 0, &PT_BR).unwrap().is_empty());
        let long = build_presets(d(2024, 6, 10), 12, &PT_BR).unwrap();
        assert_eq!(long.len(), 12);
        assert_eq!(known_cycles(&long).len(), 12);
    }
}

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::CycleError;

use super::calculator::{compute_cycle, Cycle};
use super::classifier::classify;
use super::format::trigger_label;
use super::locale::LocaleTable;
use super::presets::{known_cycles, PresetEntry};
use super::range::{DateRange, Mode};

/// A user action on the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    PreviousCycle,
    NextCycle,
    /// The calendar was touched but the selection not yet confirmed.
    CalendarEdited,
    /// A confirmed selection; either bound may be missing. Clearing the
    /// input arrives as a confirm with neither bound.
    Confirm {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// Zero-based preset index.
    SelectPreset(usize),
}

/// Selected range and mode of one picker instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PickerState {
    pub range: Option<DateRange>,
    pub mode: Mode,
}

impl PickerState {
    /// State of a freshly mounted picker: the cycle containing `reference`.
    pub fn initial(reference: NaiveDate) -> Result<Self, CycleError> {
        let cycle = compute_cycle(reference)?;
        Ok(Self {
            range: Some(cycle.into()),
            mode: Mode::Cycle,
        })
    }

    /// Computes the state that follows `event`.
    ///
    /// `presets` doubles as the recognition window for confirmed ranges.
    pub fn apply(&self, event: PickerEvent, presets: &[PresetEntry]) -> Result<Self, CycleError> {
        let next = match event {
            PickerEvent::PreviousCycle => self.step(Cycle::previous)?,
            PickerEvent::NextCycle => self.step(Cycle::next)?,
            PickerEvent::CalendarEdited => Self {
                mode: Mode::Period,
                ..*self
            },
            PickerEvent::Confirm {
                start: Some(start),
                end: Some(end),
            } => {
                let range = DateRange::new(start, end)?;
                Self {
                    range: Some(range),
                    mode: classify(&range, &known_cycles(presets)),
                }
            }
            PickerEvent::Confirm { .. } => {
                tracing::debug!("ignoring incomplete selection");
                *self
            }
            PickerEvent::SelectPreset(index) => {
                let preset = presets.get(index).ok_or(CycleError::UnknownPreset {
                    index,
                    available: presets.len(),
                })?;
                let range = *preset.value.range();
                Self {
                    range: Some(range),
                    mode: classify(&range, &known_cycles(presets)),
                }
            }
        };
        tracing::debug!(?event, mode = %next.mode, "picker transition");
        Ok(next)
    }

    pub fn trigger(&self, locale: &dyn LocaleTable) -> String {
        trigger_label(self.mode, self.range.as_ref(), locale)
    }

    fn step(&self, towards: fn(&Cycle) -> Result<Cycle, CycleError>) -> Result<Self, CycleError> {
        let Some(range) = self.range else {
            return Ok(*self);
        };
        let current = compute_cycle(range.start_day())?;
        Ok(Self {
            range: Some(towards(&current)?.into()),
            mode: Mode::Cycle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::locale::PT_BR;
    use crate::cycle::presets::build_presets;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn setup() -> (PickerState, Vec<PresetEntry>) {
        let reference = d(2024, 6, 10);
        let state = PickerState::initial(reference).unwrap();
        let presets = build_presets(reference, 6, &PT_BR).unwrap();
        (state, presets)
    }

    #[test]
    fn starts_on_the_current_cycle() {
        let (state, _) = setup();
        assert_eq!(state.mode, Mode::Cycle);
        assert_eq!(
            state.trigger(&PT_BR),
            "Ciclo: Junho - Julho de 2024 (05/06 - 04/07)"
        );
    }

    #[test]
    fn arrows_step_between_cycles() {
        let (state, presets) = setup();
        let back = state.apply(PickerEvent::PreviousCycle, &presets).unwrap();
        assert_eq!(back.range.unwrap().start_day(), d(2024, 5, 5));
        let forward = back.apply(PickerEvent::NextCycle, &presets).unwrap();
        assert_eq!(forward, state);
    }

    #[test]
    fn arrows_snap_a_custom_period_back_to_cycles() {
        let (state, presets) = setup();
        let custom = state
            .apply(
                PickerEvent::Confirm {
                    start: Some(d(2024, 1, 10)),
                    end: Some(d(2024, 1, 20)),
                },
                &presets,
            )
            .unwrap();
        assert_eq!(custom.mode, Mode::Period);

        let next = custom.apply(PickerEvent::NextCycle, &presets).unwrap();
        assert_eq!(next.mode, Mode::Cycle);
        assert_eq!(next.range.unwrap().start_day(), d(2024, 2, 5));
        assert_eq!(next.range.unwrap().end_day(), d(2024, 3, 4));
    }

    #[test]
    fn arrows_far_outside_the_window_stay_in_cycle_mode() {
        let (mut state, presets) = setup();
        for _ in 0..12 {
            state = state.apply(PickerEvent::PreviousCycle, &presets).unwrap();
        }
        assert_eq!(state.mode, Mode::Cycle);
        assert_eq!(state.range.unwrap().start_day(), d(2023, 6, 5));
    }

    #[test]
    fn editing_the_calendar_switches_to_period() {
        let (state, presets) = setup();
        let edited = state.apply(PickerEvent::CalendarEdited, &presets).unwrap();
        assert_eq!(edited.mode, Mode::Period);
        assert_eq!(edited.range, state.range);
    }

    #[test]
    fn confirming_a_known_cycle_returns_to_cycle_mode() {
        let (state, presets) = setup();
        let edited = state.apply(PickerEvent::CalendarEdited, &presets).unwrap();
        let confirmed = edited
            .apply(
                PickerEvent::Confirm {
                    start: Some(d(2024, 3, 5)),
                    end: Some(d(2024, 4, 4)),
                },
                &presets,
            )
            .unwrap();
        assert_eq!(confirmed.mode, Mode::Cycle);
    }

    #[test]
    fn confirming_an_old_cycle_is_a_period() {
        let (state, presets) = setup();
        let confirmed = state
            .apply(
                PickerEvent::Confirm {
                    start: Some(d(2023, 9, 5)),
                    end: Some(d(2023, 10, 4)),
                },
                &presets,
            )
            .unwrap();
        assert_eq!(confirmed.mode, Mode::Period);
    }

    #[test]
    fn incomplete_selection_is_ignored() {
        let (state, presets) = setup();
        let event = PickerEvent::Confirm {
            start: Some(d(2024, 1, 10)),
            end: None,
        };
        assert_eq!(state.apply(event, &presets).unwrap(), state);
    }

    #[test]
    fn inverted_selection_is_an_error() {
        let (state, presets) = setup();
        let event = PickerEvent::Confirm {
            start: Some(d(2024, 1, 20)),
            end: Some(d(2024, 1, 10)),
        };
        assert!(matches!(
            state.apply(event, &presets),
            Err(CycleError::InvertedRange { .. })
        ));
    }

    #[test]
    fn presets_select_their_cycle() {
        let (state, presets) = setup();
        let edited = state.apply(PickerEvent::CalendarEdited, &presets).unwrap();
        let picked = edited.apply(PickerEvent::SelectPreset(3), &presets).unwrap();
        assert_eq!(picked.mode, Mode::Cycle);
        assert_eq!(picked.range.unwrap(), *presets[3].value.range());

        assert!(matches!(
            state.apply(PickerEvent::SelectPreset(6), &presets),
            Err(CycleError::UnknownPreset {
                index: 6,
                available: 6
            })
        ));
    }

    #[test]
    fn clearing_the_input_keeps_the_selection() {
        let (state, presets) = setup();
        let cleared = state
            .apply(
                PickerEvent::Confirm {
                    start: None,
                    end: None,
                },
                &presets,
            )
            .unwrap();
        assert_eq!(cleared.range, state.range);
        let back = cleared.apply(PickerEvent::PreviousCycle, &presets).unwrap();
        assert_eq!(back.range.unwrap().start_day(), d(2024, 5, 5));
    }

    #[test]
    fn empty_picker_shows_placeholder_and_ignores_arrows() {
        let (_, presets) = setup();
        let empty = PickerState {
            range: None,
            mode: Mode::Cycle,
        };
        assert_eq!(empty.trigger(&PT_BR), "Ciclo: Selecione um período");
        let after = empty.apply(PickerEvent::PreviousCycle, &presets).unwrap();
        assert_eq!(after, empty);
    }
}

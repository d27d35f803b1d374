use super::calculator::Cycle;
use super::range::{DateRange, Mode};

/// Decides whether `range` is one of the `known` cycles.
///
/// Only the supplied cycles are consulted. A range matching a cycle older
/// than the supplied window classifies as [`Mode::Period`].
pub fn classify(range: &DateRange, known: &[Cycle]) -> Mode {
    if matching_cycle(range, known).is_some() {
        Mode::Cycle
    } else {
        Mode::Period
    }
}

/// Position of the known cycle covering exactly the same days as `range`.
pub fn matching_cycle(range: &DateRange, known: &[Cycle]) -> Option<usize> {
    known
        .iter()
        .position(|cycle| cycle.range().same_days(range))
}

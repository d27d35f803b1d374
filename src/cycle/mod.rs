//! Billing-cycle arithmetic, range classification and trigger formatting.

pub mod calculator;
pub mod classifier;
pub mod format;
pub mod locale;
pub mod presets;
pub mod range;
pub mod state;

pub use calculator::{
    compute_cycle, next_cycle, previous_cycle, Cycle, CYCLE_END_DAY, CYCLE_START_DAY,
};
pub use classifier::{classify, matching_cycle};
pub use format::{capitalize, format_trigger, prefix_label, trigger_label};
pub use locale::{Locale, LocaleTable, EN_US, PT_BR};
pub use presets::{build_presets, known_cycles, PresetEntry, DEFAULT_PRESET_COUNT};
pub use range::{DateRange, Mode};
pub use state::{PickerEvent, PickerState};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;

use crate::{
    clock::{clock_from_env, Clock},
    config::{Config, ConfigManager},
    cycle::{build_presets, format_trigger, prefix_label, LocaleTable, PickerState, PresetEntry},
    errors::CycleError,
};

use super::commands;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Shell runtime: configuration plus the picker instance it hosts.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    clock: Box<dyn Clock>,
    /// Date the picker was mounted on; presets are relative to it.
    pub reference: NaiveDate,
    pub presets: Vec<PresetEntry>,
    pub state: PickerState,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CycleError> {
        Self::with_parts(mode, ConfigManager::new(), clock_from_env())
    }

    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CycleError> {
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences::from(&config));

        let reference = clock.today();
        let presets = build_presets(reference, config.preset_count, config.locale.table())?;
        let state = PickerState::initial(reference)?;

        Ok(Self {
            mode,
            registry: commands::REGISTRY,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            clock,
            reference,
            presets,
            state,
            running: true,
        })
    }

    pub fn locale(&self) -> &'static dyn LocaleTable {
        self.config.locale.table()
    }

    /// Drops the selection and starts over on today's cycle.
    pub fn remount(&mut self) -> Result<(), CycleError> {
        self.reference = self.clock.today();
        self.rebuild_presets()?;
        self.state = PickerState::initial(self.reference)?;
        tracing::info!(reference = %self.reference, "picker remounted");
        Ok(())
    }

    /// Recomputes presets after a locale or count change, keeping the selection.
    pub fn rebuild_presets(&mut self) -> Result<(), CycleError> {
        self.presets = build_presets(self.reference, self.config.preset_count, self.locale())?;
        Ok(())
    }

    pub fn trigger_parts(&self) -> (&'static str, String) {
        let locale = self.locale();
        (
            prefix_label(self.state.mode, locale),
            format_trigger(self.state.range.as_ref(), locale),
        )
    }

    pub fn render_trigger(&self) {
        let (prefix, text) = self.trigger_parts();
        output::trigger(prefix, &text);
    }

    pub fn prompt(&self) -> String {
        let arrow = if self.config.plain_output { ">" } else { "⮞" };
        format!("{} {arrow} ", self.state.mode)
    }
}

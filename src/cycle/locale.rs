//! Locale lookup tables consumed by the trigger formatter and preset builder.
//!
//! The formatting algorithms only ever go through [`LocaleTable`]; adding a
//! language means adding a table, not touching the formatter.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::CycleError;

/// Text and pattern lookups for one language.
pub trait LocaleTable: Send + Sync {
    /// BCP 47 tag, e.g. `pt-BR`.
    fn tag(&self) -> &'static str;

    /// Month name for a 1-based month, in the language's native casing.
    fn month_name(&self, month: u32) -> &'static str;

    /// Text placed between a month name and its year ("Maio de 2024").
    fn month_year_joiner(&self) -> &'static str;

    /// strftime pattern rendering a day and month, e.g. `05/06`.
    fn day_month_pattern(&self) -> &'static str;

    /// strftime pattern for the compact month/year used in preset labels.
    fn compact_month_year_pattern(&self) -> &'static str;

    /// strftime pattern accepted for manually typed dates.
    fn input_date_pattern(&self) -> &'static str;

    fn placeholder(&self) -> &'static str;
    fn cycle_prefix(&self) -> &'static str;
    fn period_prefix(&self) -> &'static str;
    fn current_cycle_label(&self) -> &'static str;
    fn previous_cycle_label(&self) -> &'static str;

    /// Label of an older preset, given its rendered month/year span.
    fn cycle_label(&self, span: &str) -> String;
}

/// Locale table backed by static strings.
#[derive(Debug)]
pub struct StaticLocale {
    tag: &'static str,
    months: [&'static str; 12],
    month_year_joiner: &'static str,
    day_month_pattern: &'static str,
    input_date_pattern: &'static str,
    placeholder: &'static str,
    cycle_prefix: &'static str,
    period_prefix: &'static str,
    current_cycle: &'static str,
    previous_cycle: &'static str,
    cycle_word: &'static str,
}

impl LocaleTable for StaticLocale {
    fn tag(&self) -> &'static str {
        self.tag
    }

    fn month_name(&self, month: u32) -> &'static str {
        let index = month.clamp(1, 12) as usize - 1;
        self.months[index]
    }

    fn month_year_joiner(&self) -> &'static str {
        self.month_year_joiner
    }

    fn day_month_pattern(&self) -> &'static str {
        self.day_month_pattern
    }

    fn compact_month_year_pattern(&self) -> &'static str {
        "%m/%y"
    }

    fn input_date_pattern(&self) -> &'static str {
        self.input_date_pattern
    }

    fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    fn cycle_prefix(&self) -> &'static str {
        self.cycle_prefix
    }

    fn period_prefix(&self) -> &'static str {
        self.period_prefix
    }

    fn current_cycle_label(&self) -> &'static str {
        self.current_cycle
    }

    fn previous_cycle_label(&self) -> &'static str {
        self.previous_cycle
    }

    fn cycle_label(&self, span: &str) -> String {
        format!("{} ({})", self.cycle_word, span)
    }
}

pub static PT_BR: StaticLocale = StaticLocale {
    tag: "pt-BR",
    months: [
        "janeiro",
        "fevereiro",
        "março",
        "abril",
        "maio",
        "junho",
        "julho",
        "agosto",
        "setembro",
        "outubro",
        "novembro",
        "dezembro",
    ],
    month_year_joiner: " de ",
    day_month_pattern: "%d/%m",
    input_date_pattern: "%d/%m/%Y",
    placeholder: "Selecione um período",
    cycle_prefix: "Ciclo:",
    period_prefix: "Período:",
    current_cycle: "Ciclo atual",
    previous_cycle: "Ciclo anterior",
    cycle_word: "Ciclo",
};

pub static EN_US: StaticLocale = StaticLocale {
    tag: "en-US",
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    month_year_joiner: " ",
    day_month_pattern: "%m/%d",
    input_date_pattern: "%m/%d/%Y",
    placeholder: "Select a range",
    cycle_prefix: "Cycle:",
    period_prefix: "Period:",
    current_cycle: "Current cycle",
    previous_cycle: "Previous cycle",
    cycle_word: "Cycle",
};

/// Selector for the shipped locale tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::PtBr, Locale::EnUs];

    pub fn table(self) -> &'static dyn LocaleTable {
        match self {
            Locale::PtBr => &PT_BR,
            Locale::EnUs => &EN_US,
        }
    }
}

impl FromStr for Locale {
    type Err = CycleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "pt-br" | "pt" => Ok(Locale::PtBr),
            "en-us" | "en" => Ok(Locale::EnUs),
            _ => Err(CycleError::UnknownLocale(raw.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table().tag())
    }
}

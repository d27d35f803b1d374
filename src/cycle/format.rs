use chrono::{Datelike, NaiveDate};

use super::locale::LocaleTable;
use super::range::{DateRange, Mode};

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Human-readable summary of `range`, or the locale placeholder when absent.
///
/// Ranges spanning two years name both years, ranges spanning two months of
/// one year name both months, and single-month ranges name the month once.
/// The day/month pair of each bound always follows in parentheses.
pub fn format_trigger(range: Option<&DateRange>, locale: &dyn LocaleTable) -> String {
    let Some(range) = range else {
        return locale.placeholder().to_string();
    };

    let start = range.start_day();
    let end = range.end_day();
    let start_month = month_label(start, locale);
    let end_month = month_label(end, locale);
    let joiner = locale.month_year_joiner();
    let days = format!(
        "({} - {})",
        start.format(locale.day_month_pattern()),
        end.format(locale.day_month_pattern())
    );

    if start.year() != end.year() {
        format!(
            "{start_month}{joiner}{} - {end_month}{joiner}{} {days}",
            start.year(),
            end.year()
        )
    } else if start.month() != end.month() {
        format!("{start_month} - {end_month}{joiner}{} {days}", start.year())
    } else {
        format!("{start_month}{joiner}{} {days}", start.year())
    }
}

pub fn prefix_label(mode: Mode, locale: &dyn LocaleTable) -> &'static str {
    match mode {
        Mode::Cycle => locale.cycle_prefix(),
        Mode::Period => locale.period_prefix(),
    }
}

/// Full trigger line: mode prefix followed by the formatted range.
pub fn trigger_label(mode: Mode, range: Option<&DateRange>, locale: &dyn LocaleTable) -> String {
    format!(
        "{} {}",
        prefix_label(mode, locale),
        format_trigger(range, locale)
    )
}

/// Compact `MM/YY - MM/YY` span used by preset labels.
pub fn compact_span(range: &DateRange, locale: &dyn LocaleTable) -> String {
    let pattern = locale.compact_month_year_pattern();
    format!(
        "{} - {}",
        range.start_day().format(pattern),
        range.end_day().format(pattern)
    )
}

fn month_label(day: NaiveDate, locale: &dyn LocaleTable) -> String {
    capitalize(locale.month_name(day.month()))
}

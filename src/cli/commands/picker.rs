use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::{ArgumentHint, CommandEntry};
use crate::cli::shell_context::{CliMode, ShellContext};
use crate::cycle::{known_cycles, matching_cycle, DateRange, LocaleTable, Mode, PickerEvent};

pub(crate) const COMMANDS: &[CommandEntry] = &[
    CommandEntry::new(
        "show",
        "Show the selected range",
        "show [--json]",
        cmd_show,
    )
    .completing(ArgumentHint::Words(&["--json"])),
    CommandEntry::new("prev", "Step to the previous cycle", "prev", cmd_prev),
    CommandEntry::new("next", "Step to the next cycle", "next", cmd_next),
    CommandEntry::new(
        "edit",
        "Start editing the range (switches to period mode)",
        "edit",
        cmd_edit,
    ),
    CommandEntry::new(
        "set",
        "Confirm a custom range",
        "set <start> <end>   (DD/MM/YYYY or YYYY-MM-DD)",
        cmd_set,
    ),
    CommandEntry::new("presets", "List cycle presets", "presets", cmd_presets),
    CommandEntry::new(
        "preset",
        "Select a cycle preset",
        "preset [number]",
        cmd_preset,
    )
    .completing(ArgumentHint::PresetNumber),
    CommandEntry::new(
        "clear",
        "Clear the input (the picker keeps its range)",
        "clear",
        cmd_clear,
    ),
    CommandEntry::new(
        "reset",
        "Return to today's cycle and rebuild presets",
        "reset",
        cmd_reset,
    ),
];

#[derive(Serialize)]
struct Snapshot<'a> {
    locale: &'static str,
    mode: Mode,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    trigger: String,
    presets: Vec<PresetView<'a>>,
}

#[derive(Serialize)]
struct PresetView<'a> {
    label: &'a str,
    start: NaiveDate,
    end: NaiveDate,
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            context.render_trigger();
            Ok(())
        }
        ["--json"] => {
            let locale = context.locale();
            let snapshot = Snapshot {
                locale: locale.tag(),
                mode: context.state.mode,
                start: context.state.range.map(|range| range.start_day()),
                end: context.state.range.map(|range| range.end_day()),
                trigger: context.state.trigger(locale),
                presets: context
                    .presets
                    .iter()
                    .map(|preset| PresetView {
                        label: &preset.label,
                        start: preset.value.start_day(),
                        end: preset.value.end_day(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
        _ => Err(usage("show [--json]")),
    }
}

fn cmd_prev(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_arguments(args, "prev")?;
    context.apply_event(PickerEvent::PreviousCycle)
}

fn cmd_next(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_arguments(args, "next")?;
    context.apply_event(PickerEvent::NextCycle)
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_arguments(args, "edit")?;
    context.apply_event(PickerEvent::CalendarEdited)
}

/// Mirrors a calendar interaction: touching the calendar switches to period
/// mode, then the confirmed bounds are classified. Bounds may be typed in
/// either order.
fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let locale = context.locale();
    let (start, end) = match args {
        [start] => (Some(parse_date(start, locale)?), None),
        [first, second] => {
            let (start, end) = ordered(parse_date(first, locale)?, parse_date(second, locale)?);
            (Some(start), Some(end))
        }
        _ => return Err(usage("set <start> <end>")),
    };

    context.state = context
        .state
        .apply(PickerEvent::CalendarEdited, &context.presets)?;
    if end.is_none() {
        output::warning("Selection incomplete; keeping the current range.");
    }
    context.apply_event(PickerEvent::Confirm { start, end })
}

fn cmd_presets(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_arguments(args, "presets")?;
    let locale = context.locale();
    let active = context
        .state
        .range
        .and_then(|range| matching_cycle(&range, &known_cycles(&context.presets)));

    output::section("Presets");
    for (index, preset) in context.presets.iter().enumerate() {
        let marker = if active == Some(index) { "*" } else { " " };
        output::info(format!(
            "{marker} {:>2}. {:<24} {}",
            index + 1,
            preset.label,
            describe(preset.value.range(), locale)
        ));
    }
    Ok(())
}

fn cmd_preset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = match args {
        [raw] => {
            let available = context.presets.len();
            match raw.parse::<usize>() {
                Ok(number) if (1..=available).contains(&number) => number - 1,
                _ => {
                    return Err(CommandError::InvalidArguments(format!(
                        "No preset `{raw}`; choose 1-{available}."
                    )))
                }
            }
        }
        [] if context.mode == CliMode::Interactive => {
            let labels: Vec<String> = context
                .presets
                .iter()
                .map(|preset| preset.label.clone())
                .collect();
            match cli_io::select_item(&context.theme, "Cycle", &labels, 0)? {
                Some(index) => index,
                None => return Ok(()),
            }
        }
        _ => return Err(usage("preset <number>")),
    };
    context.apply_event(PickerEvent::SelectPreset(index))
}

/// Clearing sends a change without bounds, which the picker ignores.
fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_arguments(args, "clear")?;
    output::warning("Nothing to confirm; keeping the current range.");
    context.apply_event(PickerEvent::Confirm {
        start: None,
        end: None,
    })
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_arguments(args, "reset")?;
    context.remount()?;
    context.render_trigger();
    Ok(())
}

/// Parses a date typed in the locale's pattern, falling back to ISO 8601.
pub(crate) fn parse_date(raw: &str, locale: &dyn LocaleTable) -> Result<NaiveDate, CommandError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, locale.input_date_pattern())
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map_err(|_| {
            let example = NaiveDate::from_ymd_opt(2024, 5, 5)
                .map(|day| day.format(locale.input_date_pattern()).to_string())
                .unwrap_or_default();
            CommandError::InvalidArguments(format!(
                "`{trimmed}` is not a date (expected e.g. {example} or 2024-05-05)"
            ))
        })
}

fn ordered(first: NaiveDate, second: NaiveDate) -> (NaiveDate, NaiveDate) {
    if second < first {
        (second, first)
    } else {
        (first, second)
    }
}

fn no_arguments(args: &[&str], usage_line: &str) -> CommandResult {
    if args.is_empty() {
        Ok(())
    } else {
        Err(usage(usage_line))
    }
}

fn usage(line: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Usage: {line}"))
}

fn describe(range: &DateRange, locale: &dyn LocaleTable) -> String {
    let pattern = locale.input_date_pattern();
    format!(
        "{} - {}",
        range.start_day().format(pattern),
        range.end_day().format(pattern)
    )
}

use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CommandError, LoopControl};
use crate::cli::output;
use crate::cli::registry::{ArgumentHint, CommandRegistry};
use crate::cli::shell_context::{CliMode, ShellContext};
use crate::config::Config;
use crate::cycle::Locale;

/// Environment variable switching the shell to line-by-line stdin scripting.
pub const SCRIPT_ENV: &str = "CYCLE_PICKER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    if mode == CliMode::Script {
        colored::control::set_override(false);
    }

    let mut context = ShellContext::new(mode)?;
    tracing::info!(?mode, reference = %context.reference, "shell started");
    context.render_trigger();

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.registry)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    while context.running {
        // `config set presets` may have changed how many presets exist.
        if let Some(helper) = editor.helper_mut() {
            helper.preset_count = context.presets.len();
        }

        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                run_line(context, trimmed);
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for (number, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        tracing::debug!(line = number + 1, input = %line, "script line");
        run_line(context, &line);
        if !context.running {
            break;
        }
    }
    Ok(())
}

fn run_line(context: &mut ShellContext, line: &str) {
    match handle_line(context, line) {
        Ok(LoopControl::Continue) => {}
        Ok(LoopControl::Exit) => context.running = false,
        Err(err) => context.report_error(err),
    }
}

fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err.to_string());
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.dispatch(&raw.to_lowercase(), raw, &args)
}

/// Completes command names and their picker-specific arguments.
struct CommandHelper {
    registry: CommandRegistry,
    preset_count: usize,
}

impl CommandHelper {
    fn new(registry: CommandRegistry) -> Self {
        Self {
            registry,
            preset_count: 0,
        }
    }

    /// Start of the word under the cursor and the words that may replace it.
    fn candidates(&self, prefix: &str) -> (usize, Vec<String>) {
        let start = prefix.rfind(char::is_whitespace).map_or(0, |index| index + 1);
        let typed: Vec<String> = prefix[..start]
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();
        let needle = prefix[start..].to_ascii_lowercase();

        let matches = self
            .words_after(&typed)
            .into_iter()
            .filter(|word| word.to_ascii_lowercase().starts_with(&needle))
            .collect();
        (start, matches)
    }

    fn words_after(&self, typed: &[String]) -> Vec<String> {
        let typed: Vec<&str> = typed.iter().map(String::as_str).collect();
        let Some((name, args)) = typed.split_first() else {
            return self.registry.names().map(String::from).collect();
        };
        let Some(entry) = self.registry.get(name) else {
            return Vec::new();
        };

        match (entry.arguments, args) {
            (ArgumentHint::Words(words), []) => words.iter().map(|word| word.to_string()).collect(),
            (ArgumentHint::PresetNumber, []) => (1..=self.preset_count)
                .map(|number| number.to_string())
                .collect(),
            (ArgumentHint::CommandName, []) => self.registry.names().map(String::from).collect(),
            (ArgumentHint::Setting, []) => vec!["show".to_string(), "set".to_string()],
            (ArgumentHint::Setting, ["set"]) => {
                Config::KEYS.iter().map(|key| key.to_string()).collect()
            }
            (ArgumentHint::Setting, ["set", key]) => setting_values(key),
            _ => Vec::new(),
        }
    }

    /// Usage of a known command once its name and a space have been typed.
    fn usage_hint(&self, line: &str) -> Option<String> {
        let name = line.strip_suffix(' ')?;
        if name.trim().contains(char::is_whitespace) {
            return None;
        }
        let entry = self.registry.get(&name.trim().to_ascii_lowercase())?;
        entry.argument_usage().map(String::from)
    }
}

fn setting_values(key: &str) -> Vec<String> {
    match key {
        "locale" => Locale::ALL.iter().map(Locale::to_string).collect(),
        "plain" | "high-contrast" => vec!["on".to_string(), "off".to_string()],
        _ => Vec::new(),
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(&line[..pos]);
        let pairs = words
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for CommandHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for CommandHelper {}

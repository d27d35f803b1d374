use std::{
    fmt,
    sync::{OnceLock, RwLock},
};

use colored::Colorize;

use crate::config::Config;

/// Brand colour of the picker trigger (#7A52E1).
const BRAND: (u8, u8, u8) = (0x7A, 0x52, 0xE1);

/// Style of a line emitted through the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPreferences {
    pub plain_mode: bool,
    pub high_contrast_mode: bool,
}

impl From<&Config> for OutputPreferences {
    fn from(config: &Config) -> Self {
        Self {
            plain_mode: config.plain_output,
            high_contrast_mode: config.high_contrast,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn label(kind: MessageKind, plain: bool) -> &'static str {
    match (kind, plain) {
        (MessageKind::Success, true) => "OK:",
        (MessageKind::Warning, true) => "WARNING:",
        (MessageKind::Error, true) => "ERROR:",
        (MessageKind::Success, false) => "✔",
        (MessageKind::Warning, false) => "⚠",
        (MessageKind::Error, false) => "✖",
        (MessageKind::Info | MessageKind::Section, _) => "",
    }
}

pub fn styled(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Info => text,
        _ => format!("{} {}", label(kind, prefs.plain_mode), text),
    };

    if prefs.plain_mode {
        return base;
    }

    if prefs.high_contrast_mode {
        return match kind {
            MessageKind::Info => base,
            _ => base.bold().to_string(),
        };
    }

    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = styled(kind, message, &current_preferences());
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        MessageKind::Error => eprintln!("{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Renders the trigger line: the mode prefix in the brand colour, then the range text.
pub fn trigger_text(prefix: &str, text: &str, prefs: &OutputPreferences) -> String {
    if prefs.plain_mode {
        return format!("{prefix} {text}");
    }
    if prefs.high_contrast_mode {
        return format!("{} {}", prefix.bold(), text.bold());
    }
    let (r, g, b) = BRAND;
    format!(
        "{} {}",
        prefix.truecolor(r, g, b).bold(),
        text.truecolor(r, g, b).underline()
    )
}

pub fn trigger(prefix: &str, text: &str) {
    println!("{}", trigger_text(prefix, text, &current_preferences()));
}

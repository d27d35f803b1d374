use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// What the shell offers when completing a command's arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentHint {
    Nothing,
    /// Fixed words, e.g. flags.
    Words(&'static [&'static str]),
    /// 1-based numbers of the current presets.
    PresetNumber,
    /// `show | set <key> <value>` over the configuration keys.
    Setting,
    /// Another command's name.
    CommandName,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub arguments: ArgumentHint,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            arguments: ArgumentHint::Nothing,
            handler,
        }
    }

    pub const fn completing(self, arguments: ArgumentHint) -> Self {
        Self { arguments, ..self }
    }

    /// Usage text after the command name, shown as an inline hint.
    pub fn argument_usage(&self) -> Option<&'static str> {
        let rest = self.usage.strip_prefix(self.name)?.trim_start();
        (!rest.is_empty()).then_some(rest)
    }
}

/// Fixed command table, grouped the way `help` lists it.
#[derive(Clone, Copy)]
pub struct CommandRegistry {
    groups: &'static [&'static [CommandEntry]],
}

impl CommandRegistry {
    pub const fn new(groups: &'static [&'static [CommandEntry]]) -> Self {
        Self { groups }
    }

    pub fn entries(&self) -> impl Iterator<Item = &'static CommandEntry> {
        let groups = self.groups;
        groups.iter().copied().flat_map(<[CommandEntry]>::iter)
    }

    pub fn get(&self, name: &str) -> Option<&'static CommandEntry> {
        self.entries().find(|entry| entry.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.entries().map(|entry| entry.name)
    }
}

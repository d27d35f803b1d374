use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{ArgumentHint, CommandEntry};
use crate::cli::shell_context::ShellContext;
use crate::config::Config;

pub(crate) const COMMANDS: &[CommandEntry] = &[CommandEntry::new(
    "config",
    "Show or change settings",
    "config [show | set <locale|presets|plain|high-contrast> <value>]",
    cmd_config,
)
.completing(ArgumentHint::Setting)];

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(context);
            Ok(())
        }
        ["set", key, value] => set(context, key, value),
        _ => Err(CommandError::InvalidArguments(
            "Usage: config [show | set <key> <value>]".into(),
        )),
    }
}

fn show(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  locale        : {}", config.locale));
    output::info(format!("  presets       : {}", config.preset_count));
    output::info(format!("  plain         : {}", on_off(config.plain_output)));
    output::info(format!("  high-contrast : {}", on_off(config.high_contrast)));
    output::info(format!(
        "  file          : {}",
        context.config_manager.path().display()
    ));
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated: Config = context.config.clone();
    updated.set(key, value)?;
    context.config_manager.save(&updated)?;

    let presets_changed = updated.locale != context.config.locale
        || updated.preset_count != context.config.preset_count;
    context.config = updated;
    output::set_preferences(OutputPreferences::from(&context.config));
    if presets_changed {
        context.rebuild_presets()?;
    }

    tracing::info!(key, value, "configuration updated");
    output::success(format!("Set {key} = {value}."));
    context.render_trigger();
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

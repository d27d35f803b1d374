pub mod config;
pub mod picker;
pub mod system;

use super::registry::CommandRegistry;

pub(crate) const REGISTRY: CommandRegistry =
    CommandRegistry::new(&[picker::COMMANDS, config::COMMANDS, system::COMMANDS]);

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn command_names_are_unique() {
        let names: Vec<&str> = REGISTRY.names().collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn help_lists_picker_commands_first() {
        let names: Vec<&str> = REGISTRY.names().collect();
        assert_eq!(names.first(), Some(&"show"));
        assert_eq!(names.last(), Some(&"exit"));
        assert!(REGISTRY.get("preset").is_some());
        assert!(REGISTRY.get("clear").is_some());
        assert!(REGISTRY.get("nxt").is_none());
    }

    #[test]
    fn usage_hints_skip_the_command_name() {
        let set = REGISTRY.get("set").unwrap();
        assert!(set.argument_usage().unwrap().starts_with("<start> <end>"));
        assert_eq!(REGISTRY.get("prev").unwrap().argument_usage(), None);
    }
}

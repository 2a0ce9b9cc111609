use std::collections::HashMap;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
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
            handler,
        }
    }

    /// Subcommand names taken from the leading `<a|b|c>` group of the usage line.
    pub fn subcommands(&self) -> Vec<&'static str> {
        let usage: &'static str = self.usage;
        let Some(rest) = usage.strip_prefix(self.name) else {
            return Vec::new();
        };
        let rest = rest.trim_start();
        match rest.strip_prefix('<').and_then(|inner| inner.split_once('>')) {
            Some((group, _)) if group.contains('|') => group.split('|').collect(),
            _ => Vec::new(),
        }
    }
}

/// Commands by name, remembering registration order for help output.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        if !self.commands.contains_key(entry.name) {
            self.order.push(entry.name);
        }
        self.commands.insert(entry.name, entry);
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|entry| entry.handler)
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn subcommands_come_from_usage() {
        let entry = CommandEntry::new("bill", "", "bill <add|pay|delete|list> [args]", noop);
        assert_eq!(entry.subcommands(), vec!["add", "pay", "delete", "list"]);

        let entry = CommandEntry::new("export", "", "export [dir]", noop);
        assert!(entry.subcommands().is_empty());
    }

    #[test]
    fn registration_order_is_kept() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("summary", "", "summary", noop));
        registry.register(CommandEntry::new("bill", "", "bill", noop));
        registry.register(CommandEntry::new("summary", "Totals", "summary", noop));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["summary", "bill"]);
        assert_eq!(registry.get("summary").map(|e| e.description), Some("Totals"));
    }
}

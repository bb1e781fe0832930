//! Machine-readable help.

use herald_core::{CommandSpec, HelpFormatter};
use serde_json::{Value, json};

/// Renders help as pretty-printed JSON.
///
/// Useful for shell completion generators and documentation tooling that
/// would otherwise scrape [`TableHelp`](super::TableHelp) output.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHelp;

impl JsonHelp {
    /// Creates the formatter.
    pub fn new() -> Self {
        Self
    }
}

fn summary(command: &CommandSpec) -> Value {
    json!({
        "name": command.name,
        "usage": command.usage,
        "description": command.description,
        "subcommand": command.target.is_delegating(),
    })
}

impl HelpFormatter for JsonHelp {
    fn help_list(&self, preamble: &str, commands: &[&CommandSpec]) -> String {
        let value = json!({
            "program": preamble,
            "commands": commands.iter().map(|c| summary(c)).collect::<Vec<_>>(),
        });
        format!("{value:#}")
    }

    fn help_command(&self, preamble: &str, command: &CommandSpec) -> String {
        let mut value = summary(command);
        value["program"] = json!(preamble);
        value["long_description"] = json!(command.long_description);
        value["options"] = json!(command.options.values().collect::<Vec<_>>());
        value["params"] = json!(command.params);
        format!("{value:#}")
    }
}

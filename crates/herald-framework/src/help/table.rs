//! The default plain-text help formatter.

use herald_core::{CommandSpec, HelpFormatter, OptionSpec};

const LIST_SEPARATOR: &str = " # ";
const OPTION_SEPARATOR: &str = ": ";

/// Renders help as two-column text tables.
///
/// A listing has one row per command:
///
/// ```text
///   hammer help [COMMAND] # list available commands or describe a specific command
///   hammer greet NAME     # say hello
/// ```
///
/// Detailed help shows the usage line, the descriptions, and an option table:
///
/// ```text
/// Usage:
///   hammer build [TARGET...]
///
/// build targets
///
/// Options:
///   -v, --verbose        : print each step
///   -o, --output [OUTPUT]: output file
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TableHelp;

impl TableHelp {
    /// Creates the formatter.
    pub fn new() -> Self {
        Self
    }
}

impl HelpFormatter for TableHelp {
    fn help_list(&self, preamble: &str, commands: &[&CommandSpec]) -> String {
        let rows: Vec<(String, &str)> = commands
            .iter()
            .map(|command| {
                (
                    format!("  {preamble} {}", command.usage),
                    command.description.as_str(),
                )
            })
            .collect();
        render_table(&rows, LIST_SEPARATOR)
    }

    fn help_command(&self, preamble: &str, command: &CommandSpec) -> String {
        let mut footer = String::new();
        footer.push_str(&command.description);
        footer.push('\n');
        if let Some(long) = &command.long_description {
            footer.push_str(long);
            footer.push('\n');
        }
        if command.has_options() {
            footer.push('\n');
            footer.push_str(&format_options(command.options.values()));
        }

        let output = format!(
            "Usage:\n  {preamble} {}\n\n{}",
            command.usage,
            footer.trim()
        );
        output.trim_end().to_string()
    }
}

fn format_options<'a>(options: impl Iterator<Item = &'a OptionSpec>) -> String {
    let rows: Vec<(String, &str)> = options
        .map(|option| (option_usage(option), option.description.as_str()))
        .collect();
    format!("Options:\n{}", render_table(&rows, OPTION_SEPARATOR))
}

fn option_usage(option: &OptionSpec) -> String {
    let mut usage = format!("  -{}, --{}", option.short, option.name);
    if let Some(placeholder) = option.placeholder() {
        usage.push_str(&format!(" [{placeholder}]"));
    }
    usage
}

/// Renders rows as `left<pad><separator>right`, padding the left column to
/// its widest entry.
fn render_table(rows: &[(String, &str)], separator: &str) -> String {
    let width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|(left, right)| {
            let line = format!("{left:<width$}{separator}{right}");
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::CommandTarget;

    fn command(name: &str, usage: &str, description: &str) -> CommandSpec {
        let mut spec = CommandSpec::new(name, CommandTarget::Unbound);
        spec.usage = usage.to_string();
        spec.description = description.to_string();
        spec
    }

    #[test]
    fn test_list_pads_left_column() {
        let help = CommandSpec::builtin_help();
        let greet = command("greet", "greet NAME", "say hello");
        let text = TableHelp::new().help_list("hammer", &[&help, &greet]);

        assert_eq!(
            text,
            "  hammer help [COMMAND] # list available commands or describe a specific command\n  \
             hammer greet NAME     # say hello"
        );
    }

    #[test]
    fn test_list_empty_description_trimmed() {
        let bare = command("bare", "bare", "");
        let text = TableHelp::new().help_list("app", &[&bare]);
        assert_eq!(text, "  app bare #");
    }

    #[test]
    fn test_command_without_options() {
        let greet = command("greet", "greet NAME", "say hello");
        let text = TableHelp::new().help_command("hammer", &greet);
        assert_eq!(text, "Usage:\n  hammer greet NAME\n\nsay hello");
    }

    #[test]
    fn test_command_with_long_description_and_options() {
        let mut build = command("build", "build [TARGET...]", "build targets");
        build.long_description = Some("Builds every TARGET in order.".to_string());
        for option in [
            OptionSpec::flag("verbose").describe("print each step"),
            OptionSpec::text("output").describe("output file"),
        ] {
            build.options.insert(option.name.clone(), option);
        }

        let text = TableHelp::new().help_command("hammer", &build);
        assert_eq!(
            text,
            "Usage:\n  hammer build [TARGET...]\n\nbuild targets\nBuilds every TARGET in order.\n\n\
             Options:\n  -v, --verbose        : print each step\n  \
             -o, --output [OUTPUT]: output file"
        );
    }

    #[test]
    fn test_command_without_description() {
        let bare = command("bare", "bare", "");
        let text = TableHelp::new().help_command("app", &bare);
        assert_eq!(text, "Usage:\n  app bare");
    }
}

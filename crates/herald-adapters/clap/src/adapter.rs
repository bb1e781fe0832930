//! The clap-backed [`OptionAdapter`].

use clap::Command;
use herald_core::{CommandSpec, OptionAdapter, OptionMap, OptionParseError};
use tracing::trace;

use crate::parser::{CachedParser, build_command, extract};

/// Parses command options with clap.
///
/// Recognizes `-s` and `--name` for every declared option, `--name=value` and
/// `-svalue` for valued options, and, unless disabled, `--no-name` for flags.
/// Non-option tokens keep their order and stay in the argument list.
///
/// The clap command for a spec is built on first use and cached on the spec.
#[derive(Debug, Clone, Copy)]
pub struct ClapAdapter {
    negatable_flags: bool,
}

impl Default for ClapAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClapAdapter {
    /// Creates an adapter with default settings.
    pub fn new() -> Self {
        Self {
            negatable_flags: true,
        }
    }

    /// Creates an adapter builder.
    pub fn builder() -> ClapAdapterBuilder {
        ClapAdapterBuilder::default()
    }

    /// Returns `true` if `--no-<flag>` is accepted.
    pub fn negatable_flags(&self) -> bool {
        self.negatable_flags
    }

    fn parser_for(&self, command: &CommandSpec) -> Command {
        let state = command.parser_state(|| {
            Box::new(CachedParser {
                negatable_flags: self.negatable_flags,
                command: build_command(command, self.negatable_flags),
            })
        });

        match state.downcast_ref::<CachedParser>() {
            Some(cached) if cached.negatable_flags == self.negatable_flags => {
                cached.command.clone()
            }
            _ => build_command(command, self.negatable_flags),
        }
    }
}

impl OptionAdapter for ClapAdapter {
    fn process_options(
        &self,
        args: &mut Vec<String>,
        command: &CommandSpec,
    ) -> Result<OptionMap, OptionParseError> {
        let parser = self.parser_for(command);

        let matches = parser
            .try_get_matches_from(args.iter())
            .map_err(|e| OptionParseError::new(&command.name, e.to_string().trim_end()))?;

        let (options, positional) = extract(&matches, command, self.negatable_flags)
            .map_err(|e| OptionParseError::new(&command.name, e.to_string()))?;

        trace!(command = %command.name, ?options, remaining = positional.len(), "Parsed options");

        *args = positional;
        Ok(options)
    }

    fn name(&self) -> &'static str {
        "clap"
    }
}

/// Builder for [`ClapAdapter`].
#[derive(Debug, Clone, Copy)]
pub struct ClapAdapterBuilder {
    negatable_flags: bool,
}

impl Default for ClapAdapterBuilder {
    fn default() -> Self {
        Self {
            negatable_flags: true,
        }
    }
}

impl ClapAdapterBuilder {
    /// Enable/disable `--no-<flag>` negation (default: `true`).
    pub fn negatable_flags(mut self, enabled: bool) -> Self {
        self.negatable_flags = enabled;
        self
    }

    /// Builds the adapter.
    pub fn build(self) -> ClapAdapter {
        ClapAdapter {
            negatable_flags: self.negatable_flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{CommandTarget, OptionSpec, OptionValue};

    fn spec(options: Vec<OptionSpec>) -> CommandSpec {
        let mut spec = CommandSpec::new("build", CommandTarget::Unbound);
        for option in options {
            spec.options.insert(option.name.clone(), option);
        }
        spec
    }

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_flag() {
        let spec = spec(vec![OptionSpec::flag("verbose")]);
        let mut argv = args(&["-v"]);
        let options = ClapAdapter::new().process_options(&mut argv, &spec).unwrap();

        assert_eq!(options.get("verbose"), Some(&OptionValue::Flag(true)));
        assert!(argv.is_empty());
    }

    #[test]
    fn test_absent_flag_is_omitted() {
        let spec = spec(vec![OptionSpec::flag("verbose")]);
        let mut argv = args(&["target"]);
        let options = ClapAdapter::new().process_options(&mut argv, &spec).unwrap();

        assert!(options.is_empty());
        assert_eq!(argv, ["target"]);
    }

    #[test]
    fn test_default_applied_when_absent() {
        let spec = spec(vec![OptionSpec::text("output").default_value("out.txt")]);
        let mut argv = Vec::new();
        let options = ClapAdapter::new().process_options(&mut argv, &spec).unwrap();

        assert_eq!(options.text("output"), Some("out.txt"));
    }

    #[test]
    fn test_long_value_overrides_default() {
        let spec = spec(vec![OptionSpec::text("output").default_value("out.txt")]);
        let mut argv = args(&["--output", "bin/app"]);
        let options = ClapAdapter::new().process_options(&mut argv, &spec).unwrap();

        assert_eq!(options.text("output"), Some("bin/app"));
    }

    #[test]
    fn test_positionals_keep_order_around_options() {
        let spec = spec(vec![OptionSpec::flag("verbose"), OptionSpec::integer("jobs")]);
        let mut argv = args(&["a", "-v", "b", "--jobs=4", "c"]);
        let options = ClapAdapter::new().process_options(&mut argv, &spec).unwrap();

        assert_eq!(argv, ["a", "b", "c"]);
        assert!(options.flag("verbose"));
        assert_eq!(options.integer("jobs"), Some(4));
    }

    #[test]
    fn test_double_dash_terminates_options() {
        let spec = spec(vec![OptionSpec::flag("verbose")]);
        let mut argv = args(&["--", "-v"]);
        let options = ClapAdapter::new().process_options(&mut argv, &spec).unwrap();

        assert!(options.is_empty());
        assert_eq!(argv, ["-v"]);
    }

    #[test]
    fn test_negated_flag() {
        let spec = spec(vec![OptionSpec::flag("color")]);
        let adapter = ClapAdapter::new();

        let mut argv = args(&["--no-color"]);
        let options = adapter.process_options(&mut argv, &spec).unwrap();
        assert_eq!(options.get("color"), Some(&OptionValue::Flag(false)));

        let mut argv = args(&["--no-color", "--color"]);
        let options = adapter.process_options(&mut argv, &spec).unwrap();
        assert_eq!(options.get("color"), Some(&OptionValue::Flag(true)));
    }

    #[test]
    fn test_negation_disabled() {
        let spec = spec(vec![OptionSpec::flag("color")]);
        let adapter = ClapAdapter::builder().negatable_flags(false).build();
        let mut argv = args(&["--no-color"]);

        assert!(adapter.process_options(&mut argv, &spec).is_err());
    }

    #[test]
    fn test_repeated_value_last_wins() {
        let spec = spec(vec![OptionSpec::text("output")]);
        let mut argv = args(&["-o", "a", "-o", "b"]);
        let options = ClapAdapter::new().process_options(&mut argv, &spec).unwrap();

        assert_eq!(options.text("output"), Some("b"));
    }

    #[test]
    fn test_unknown_option_is_parse_error() {
        let spec = spec(vec![OptionSpec::flag("verbose")]);
        let mut argv = args(&["--bogus"]);
        let err = ClapAdapter::new()
            .process_options(&mut argv, &spec)
            .unwrap_err();

        assert_eq!(err.command, "build");
        assert!(err.message.contains("--bogus"));
    }

    #[test]
    fn test_parse_error_shows_declared_usage() {
        let mut spec = spec(vec![OptionSpec::flag("verbose")]);
        spec.usage = "build [TARGET...]".to_string();
        let mut argv = args(&["--bogus"]);
        let err = ClapAdapter::new()
            .process_options(&mut argv, &spec)
            .unwrap_err();

        assert!(err.message.contains("Usage: build [TARGET...]"));
        assert!(!err.message.contains('\0'));
        assert!(!err.message.contains("positional"));
    }

    #[test]
    fn test_parse_error_without_usage_hides_internal_id() {
        let spec = spec(vec![OptionSpec::flag("verbose")]);
        let mut argv = args(&["--bogus"]);
        let err = ClapAdapter::new()
            .process_options(&mut argv, &spec)
            .unwrap_err();

        assert!(!err.message.contains('\0'));
        assert!(!err.message.contains("positional"));
    }

    #[test]
    fn test_negative_integer_value() {
        let spec = spec(vec![OptionSpec::integer("offset")]);
        let adapter = ClapAdapter::new();

        let mut argv = args(&["--offset", "-3", "file"]);
        let options = adapter.process_options(&mut argv, &spec).unwrap();
        assert_eq!(options.integer("offset"), Some(-3));
        assert_eq!(argv, ["file"]);

        let mut argv = args(&["-o", "-3"]);
        let options = adapter.process_options(&mut argv, &spec).unwrap();
        assert_eq!(options.integer("offset"), Some(-3));
    }

    #[test]
    fn test_negative_float_value() {
        let spec = spec(vec![OptionSpec::float("ratio")]);
        let mut argv = args(&["--ratio", "-0.5"]);
        let options = ClapAdapter::new().process_options(&mut argv, &spec).unwrap();

        assert_eq!(options.float("ratio"), Some(-0.5));
    }

    #[test]
    fn test_text_value_starting_with_dash() {
        let spec = spec(vec![OptionSpec::text("pattern"), OptionSpec::flag("verbose")]);
        let mut argv = args(&["--pattern", "-foo", "-v"]);
        let options = ClapAdapter::new().process_options(&mut argv, &spec).unwrap();

        assert_eq!(options.text("pattern"), Some("-foo"));
        assert!(options.flag("verbose"));
        assert!(argv.is_empty());
    }

    #[test]
    fn test_invalid_integer_is_parse_error() {
        let spec = spec(vec![OptionSpec::integer("jobs")]);
        let mut argv = args(&["--jobs", "many"]);

        assert!(ClapAdapter::new().process_options(&mut argv, &spec).is_err());
    }

    #[test]
    fn test_float_value() {
        let spec = spec(vec![OptionSpec::float("ratio")]);
        let mut argv = args(&["-r", "0.25"]);
        let options = ClapAdapter::new().process_options(&mut argv, &spec).unwrap();

        assert_eq!(options.float("ratio"), Some(0.25));
    }

    #[test]
    fn test_parser_is_cached_on_spec() {
        let spec = spec(vec![OptionSpec::flag("verbose")]);
        let adapter = ClapAdapter::new();
        adapter.process_options(&mut args(&["-v"]), &spec).unwrap();

        let state = spec.parser_state(|| Box::new(()));
        assert!(state.downcast_ref::<CachedParser>().is_some());

        let options = adapter.process_options(&mut args(&[]), &spec).unwrap();
        assert!(options.is_empty());
    }
}

//! Translation between [`CommandSpec`] options and a clap [`Command`].

use clap::parser::{MatchesError, ValueSource};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use herald_core::{CommandSpec, OptionKind, OptionMap, OptionSpec, OptionValue};

/// Id of the catch-all positional argument. The NUL prefix keeps it from
/// colliding with any declared option name.
pub(crate) const POSITIONAL_ID: &str = "\0positional";

/// A clap command built for one spec, tagged with the settings it was built
/// with so a differently configured adapter does not reuse it.
#[derive(Clone)]
pub(crate) struct CachedParser {
    pub(crate) negatable_flags: bool,
    pub(crate) command: Command,
}

fn negated_name(option: &OptionSpec) -> String {
    format!("no-{}", option.name)
}

/// Builds a clap command recognizing the options of `spec`.
///
/// Every non-option token is collected, in order, by one positional argument.
/// Tokens after `--` are always positional. Parse errors show the declared
/// usage line when there is one.
pub(crate) fn build_command(spec: &CommandSpec, negatable_flags: bool) -> Command {
    let mut command = Command::new(spec.name.clone())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true);
    if !spec.usage.is_empty() {
        command = command.override_usage(spec.usage.clone());
    }

    for option in spec.options.values() {
        command = command.arg(option_arg(option));

        let negated = negated_name(option);
        if negatable_flags
            && option.kind == OptionKind::Flag
            && !spec.options.contains_key(&negated)
        {
            command = command.arg(
                Arg::new(negated.clone())
                    .long(negated)
                    .action(ArgAction::SetTrue)
                    .hide(true),
            );
        }
    }

    command.arg(
        Arg::new(POSITIONAL_ID)
            .value_name("ARGS")
            .num_args(1..)
            .action(ArgAction::Append)
            .value_parser(value_parser!(String)),
    )
}

fn option_arg(option: &OptionSpec) -> Arg {
    let arg = Arg::new(option.name.clone())
        .long(option.name.clone())
        .short(option.short)
        .help(option.description.clone());

    // A valued option takes the next token even when it starts with `-`.
    let arg = match option.placeholder() {
        Some(placeholder) => arg
            .action(ArgAction::Set)
            .value_name(placeholder)
            .allow_hyphen_values(true),
        None => arg,
    };

    match option.kind {
        OptionKind::Flag => arg.action(ArgAction::SetTrue),
        OptionKind::Integer => arg.value_parser(value_parser!(i64)),
        OptionKind::Float => arg.value_parser(value_parser!(f64)),
        _ => arg.value_parser(value_parser!(String)),
    }
}

fn from_command_line(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

fn last_index(matches: &ArgMatches, id: &str) -> Option<usize> {
    matches.indices_of(id).and_then(|indices| indices.last())
}

/// Resolves a flag against its `--no-` form; the later occurrence wins.
fn flag_value(
    matches: &ArgMatches,
    spec: &CommandSpec,
    option: &OptionSpec,
    negatable_flags: bool,
) -> Option<bool> {
    let id = option.name.as_str();
    let negated = negated_name(option);
    let set = from_command_line(matches, id);
    let unset = negatable_flags
        && !spec.options.contains_key(&negated)
        && matches.try_contains_id(&negated).unwrap_or(false)
        && from_command_line(matches, &negated);

    match (set, unset) {
        (false, false) => None,
        (true, false) => Some(true),
        (false, true) => Some(false),
        (true, true) => Some(last_index(matches, id) > last_index(matches, &negated)),
    }
}

/// Reads the parsed values of `spec`'s options, applying declared defaults,
/// and returns them with the remaining positional tokens.
pub(crate) fn extract(
    matches: &ArgMatches,
    spec: &CommandSpec,
    negatable_flags: bool,
) -> Result<(OptionMap, Vec<String>), MatchesError> {
    let mut options = OptionMap::new();

    for option in spec.options.values() {
        let id = option.name.as_str();
        let parsed = match option.kind {
            OptionKind::Flag => {
                flag_value(matches, spec, option, negatable_flags).map(OptionValue::Flag)
            }
            OptionKind::Integer => matches
                .try_get_one::<i64>(id)?
                .copied()
                .map(OptionValue::Integer),
            OptionKind::Float => matches
                .try_get_one::<f64>(id)?
                .copied()
                .map(OptionValue::Float),
            _ => matches
                .try_get_one::<String>(id)?
                .cloned()
                .map(OptionValue::Text),
        };

        if let Some(value) = parsed.or_else(|| option.default.clone()) {
            options.insert(option.name.clone(), value);
        }
    }

    let positional = matches
        .try_get_many::<String>(POSITIONAL_ID)?
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    Ok((options, positional))
}

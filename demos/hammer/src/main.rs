//! Hammer Demo
//!
//! A toy build tool showing how a Herald program is put together:
//!
//! - leaf commands with required, optional, and rest parameters
//! - options with defaults and `--no-` negation
//! - a `db` command group declared first and bound to its dispatcher later
//!
//! # Usage
//!
//! ```bash
//! cargo run --package hammer -- greet Bob
//! cargo run --package hammer -- build -v --output app.bin core cli
//! cargo run --package hammer -- db migrate --force
//! cargo run --package hammer -- help build
//! ```
//!
//! Configuration is read from `hammer.toml` and `HAMMER_*` variables, e.g.
//! `HAMMER_LOGGING__LEVEL=debug`.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use herald::prelude::*;
use tracing::{debug, info};

// ============================================================================
// Handler Functions
// ============================================================================

fn greet(inv: Invocation) -> String {
    let name = inv.arg(0).unwrap_or("world");
    match inv.arg(1) {
        Some(greeting) => format!("{greeting}, {name}!"),
        None => format!("Hello, {name}!"),
    }
}

fn build(inv: Invocation) -> String {
    let output = inv.options.text("output").unwrap_or("out.txt");
    let jobs = inv.options.integer("jobs").unwrap_or(1);
    let targets: Vec<&str> = match inv.rest(0) {
        [] => vec!["all"],
        targets => targets.iter().map(String::as_str).collect(),
    };

    if inv.options.flag("verbose") {
        for target in &targets {
            info!(build_target = %target, jobs, "Building");
        }
    }
    format!("built {} -> {output}", targets.join(", "))
}

fn migrate(inv: Invocation) -> &'static str {
    if inv.options.flag("force") {
        "migrations re-applied"
    } else {
        "migrations applied"
    }
}

fn seed(inv: Invocation) -> Result<String> {
    let count: u32 = match inv.arg(0) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("COUNT must be a number, got '{raw}'"))?,
        None => 10,
    };
    debug!(count, "Seeding");
    Ok(format!("seeded {count} rows"))
}

// ============================================================================
// Command Tables
// ============================================================================

fn db_commands() -> Result<Dispatcher> {
    let mut db = CommandRegistry::new("db");

    db.declare("migrate", "apply pending migrations")
        .long_desc("Re-applies every migration when --force is given.")
        .option(OptionSpec::flag("force").describe("re-apply applied migrations"))
        .command("migrate", migrate)?;

    db.declare("seed [COUNT]", "insert sample rows")
        .optional("COUNT")
        .command("seed", seed)?;

    Ok(Dispatcher::new(db))
}

fn hammer_commands() -> Result<CommandRegistry> {
    let mut registry = CommandRegistry::new("hammer");

    registry
        .declare("greet NAME [GREETING]", "say hello")
        .required("NAME")
        .optional("GREETING")
        .command("greet", greet)?;

    registry
        .declare("build [TARGET...]", "build targets")
        .option(OptionSpec::flag("verbose").describe("log each target"))
        .option(
            OptionSpec::text("output")
                .describe("output file")
                .default_value("out.txt"),
        )
        .option(OptionSpec::integer("jobs").describe("parallel jobs"))
        .rest("TARGET")
        .command("build", build)?;

    // Two-step form: stage on the registry, then bind.
    registry.desc("db COMMAND", "database tasks");
    registry.register_group("db")?;
    registry.bind_subcommand("db", Arc::new(db_commands()?))?;

    Ok(registry)
}

fn main() -> ExitCode {
    let runtime = hammer_commands()
        .map(HeraldRuntime::new)
        .and_then(|runtime| runtime.load_config().map_err(Into::into));

    match runtime {
        Ok(runtime) => runtime.run(),
        Err(e) => {
            eprintln!("hammer: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tokens: &[&str]) -> (ExitCode, String) {
        let runtime = HeraldRuntime::new(hammer_commands().unwrap());
        let mut out = Vec::new();
        let args = tokens.iter().map(|s| s.to_string()).collect();
        let code = runtime.run_with(args, &mut out);
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_greet() {
        assert_eq!(run(&["greet", "Bob"]).1, "Hello, Bob!\n");
        assert_eq!(run(&["greet", "Bob", "Hi"]).1, "Hi, Bob!\n");
    }

    #[test]
    fn test_build_defaults() {
        let (code, out) = run(&["build"]);
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(out, "built all -> out.txt\n");
    }

    #[test]
    fn test_build_with_options() {
        let (_, out) = run(&["build", "core", "-o", "app.bin", "cli", "--jobs=4"]);
        assert_eq!(out, "built core, cli -> app.bin\n");
    }

    #[test]
    fn test_db_group() {
        assert_eq!(run(&["db", "migrate"]).1, "migrations applied\n");
        assert_eq!(run(&["db", "migrate", "-f"]).1, "migrations re-applied\n");
        assert_eq!(run(&["db", "seed", "3"]).1, "seeded 3 rows\n");
    }

    #[test]
    fn test_db_help_uses_full_preamble() {
        let (_, out) = run(&["db", "help", "seed"]);
        assert_eq!(out, "Usage:\n  hammer db seed [COUNT]\n\ninsert sample rows\n");
    }

    #[test]
    fn test_seed_error_exits_nonzero() {
        assert_eq!(run(&["db", "seed", "many"]).0, ExitCode::FAILURE);
    }

    #[test]
    fn test_listing() {
        let (_, out) = run(&[]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("  hammer db COMMAND"));
    }
}

//! Maps parsed CLI arguments to the `Action` the binary executes.

use crate::cli::{
    actions::{server::Args, Action},
    commands::{ARG_DSN, ARG_PORT, CMD_SEED},
};
use anyhow::{Context, Result};
use clap::parser::ValueSource;
use std::env;

/// Legacy database variable, honored only when neither `--dsn` nor
/// `SUPERHEROES_DSN` is given.
pub const ENV_DB_URI: &str = "DB_URI";

/// # Errors
/// Returns an error if a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let dsn = match (
        matches.value_source(ARG_DSN),
        env::var(ENV_DB_URI).ok().filter(|uri| !uri.is_empty()),
    ) {
        (Some(ValueSource::DefaultValue), Some(uri)) => uri,
        _ => matches
            .get_one::<String>(ARG_DSN)
            .cloned()
            .context("missing required argument: --dsn")?,
    };

    match matches.subcommand_name() {
        Some(CMD_SEED) => Ok(Action::Seed { dsn }),
        _ => Ok(Action::Server(Args {
            port: matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(5555),
            dsn,
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn no_subcommand_runs_server() {
        let matches = commands::new().get_matches_from(vec![
            "superheroes",
            "-p",
            "9000",
            "-d",
            "sqlite::memory:",
        ]);
        let action = handler(&matches);
        assert!(matches!(
            action,
            Ok(Action::Server(Args { port: 9000, ref dsn })) if dsn == "sqlite::memory:"
        ));
    }

    #[test]
    fn seed_subcommand() {
        let matches =
            commands::new().get_matches_from(vec!["superheroes", "-d", "sqlite::memory:", "seed"]);
        let action = handler(&matches);
        assert!(matches!(action, Ok(Action::Seed { ref dsn }) if dsn == "sqlite::memory:"));
    }

    fn dsn_from(args: &[&str]) -> Option<String> {
        let matches = commands::new().get_matches_from(args.iter().copied());
        match handler(&matches) {
            Ok(Action::Server(Args { dsn, .. }) | Action::Seed { dsn }) => Some(dsn),
            Err(_) => None,
        }
    }

    #[test]
    fn db_uri_replaces_default_dsn() {
        temp_env::with_vars(
            [
                (ENV_DB_URI, Some("sqlite://legacy.db?mode=rwc")),
                ("SUPERHEROES_DSN", None),
            ],
            || {
                assert_eq!(
                    dsn_from(&["superheroes"]).as_deref(),
                    Some("sqlite://legacy.db?mode=rwc")
                );
                assert_eq!(
                    dsn_from(&["superheroes", "seed"]).as_deref(),
                    Some("sqlite://legacy.db?mode=rwc")
                );
            },
        );
    }

    #[test]
    fn db_uri_loses_to_explicit_dsn() {
        temp_env::with_vars(
            [
                (ENV_DB_URI, Some("sqlite://legacy.db?mode=rwc")),
                ("SUPERHEROES_DSN", Some("sqlite://env.db?mode=rwc")),
            ],
            || {
                assert_eq!(
                    dsn_from(&["superheroes"]).as_deref(),
                    Some("sqlite://env.db?mode=rwc")
                );
                assert_eq!(
                    dsn_from(&["superheroes", "-d", "sqlite::memory:"]).as_deref(),
                    Some("sqlite::memory:")
                );
            },
        );
    }

    #[test]
    fn default_dsn_without_db_uri() {
        temp_env::with_vars(
            [(ENV_DB_URI, None::<&str>), ("SUPERHEROES_DSN", None)],
            || {
                assert_eq!(
                    dsn_from(&["superheroes"]).as_deref(),
                    Some(commands::DEFAULT_DSN)
                );
            },
        );
    }
}

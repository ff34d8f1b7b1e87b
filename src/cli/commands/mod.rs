pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";
pub const ARG_DSN: &str = "dsn";
pub const CMD_SEED: &str = "seed";

pub const DEFAULT_PORT: &str = "5555";
pub const DEFAULT_DSN: &str = "sqlite://app.db?mode=rwc";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("superheroes")
        .about("Heroes, powers and their strengths")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value(DEFAULT_PORT)
                .env("SUPERHEROES_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DSN)
                .short('d')
                .long("dsn")
                .help("Database connection string")
                .long_help(
                    "SQLite connection string, e.g. sqlite://app.db?mode=rwc or sqlite::memory:",
                )
                .default_value(DEFAULT_DSN)
                .env("SUPERHEROES_DSN"),
        )
        .subcommand(
            Command::new(CMD_SEED)
                .about("Delete all rows and load sample heroes, powers and hero powers"),
        );

    logging::with_args(command)
}

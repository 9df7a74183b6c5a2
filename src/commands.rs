//! Clap command definition.

use clap::{Arg, ArgAction, Command};

/// Build the CLI.
pub fn build_cli() -> Command {
    Command::new("tfjq")
        .about("Provider plugin exposing jq as a callable function")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log verbosity on stderr")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"])
                .default_value("warn"),
        )
        .arg(
            Arg::new("print-address")
                .long("print-address")
                .help("Print the provider registry address and exit")
                .action(ArgAction::SetTrue),
        )
}

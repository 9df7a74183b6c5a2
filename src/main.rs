//! tfjq provider binary
//!
//! Serves provider requests read from stdin, one JSON object per line, and
//! writes responses to stdout. Logs go to stderr.

mod commands;
mod logging;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::filter::LevelFilter;

use tfjq::{serve, Executor, FunctionProvider, PROVIDER_ADDRESS};

fn main() -> anyhow::Result<()> {
    let matches = commands::build_cli().get_matches();

    if matches.get_flag("print-address") {
        println!("{}", PROVIDER_ADDRESS);
        return Ok(());
    }

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn")
        .parse::<LevelFilter>()
        .context("invalid --log-level")?;
    logging::set_up_logging(level);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;

    let executor = Executor::new(Arc::new(FunctionProvider::new()));
    tracing::info!(target: "tfjq::serve", address = PROVIDER_ADDRESS, "serving");
    runtime.block_on(serve(executor, tokio::io::stdin(), tokio::io::stdout()))
}

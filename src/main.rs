#![allow(clippy::enum_variant_names)]

use clap::Parser as _;
use tracing::debug;

use crate::{application::Application, cli::Cli};

mod application;
mod cli;
mod ext;
mod filesystem;
mod snapshot;

fn main() {
    // Usage errors are reported like any other failure: printed, exit code 0.
    let cli_args = match Cli::try_parse() {
        Ok(cli_args) => cli_args,
        Err(err) => {
            let _ = err.print();
            return;
        }
    };
    setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    Application::run(cli_args);
}

fn setup_tracing(cli_args: &Cli) {
    if let Some(level) = cli_args.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .without_time()
            .compact()
            .init();
    }
}

//! Serve files from a document root over HTTP/1.1
//!
//! Runs until SIGINT or SIGTERM. Exits 0 after a clean shutdown and 1 on
//! any fatal error.

use clap::Parser;
use httpxfer::config::{self, ServerArgs, ServerConfig};
use httpxfer::docroot::FileServer;
use httpxfer::net::Listener;
use httpxfer::{logging, shutdown};
use std::process::ExitCode;

fn run(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    shutdown::install()?;

    let listener = Listener::bind(config.port)?;
    FileServer::from_config(config).run(&listener)?;

    Ok(())
}

fn main() -> ExitCode {
    let config: ServerConfig = match ServerArgs::try_parse() {
        Ok(args) => args.into(),
        Err(e) => config::exit_with_usage(e),
    };

    logging::init("info");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}

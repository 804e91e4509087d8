//! Fetch one resource over HTTP/1.1
//!
//! Exit codes: 0 on success, 1 on usage or transport errors, 2 when the
//! response is not HTTP/1.1, 3 when the server answers with a status other
//! than 200.

use clap::Parser;
use httpxfer::config::{self, ClientArgs, ClientConfig};
use httpxfer::{fetch, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config: ClientConfig = match ClientArgs::try_parse() {
        Ok(args) => args.into(),
        Err(e) => config::exit_with_usage(e),
    };

    logging::init("warn");

    match fetch::fetch(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

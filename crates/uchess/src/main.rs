//! uchess: play chess in the terminal against UCI engines
//!
//! ```bash
//! # Human (white) against stockfish on the PATH
//! uchess
//!
//! # Engine against engine using a config file
//! uchess --cfg uchess.json
//!
//! # Write a starting config
//! uchess --tmpl > uchess.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use tracing::{error, info};
use uchess::app;
use uchess::cli::Args;
use uchess::logging;
use uchess_core::Session;

fn main() -> Result<()> {
    let args = Args::parse();

    if args.tmpl {
        println!("{}", args.template().to_json_pretty()?);
        return Ok(());
    }

    logging::init(&args.log, "info")?;
    let config = args.config()?;
    info!(
        white = %config.uci_white,
        black = %config.uci_black,
        hint = %config.uci_hint,
        "starting uchess"
    );

    let mut session = Session::start(config).context("starting engines")?;
    println!("Moves: e4, Nf3, e7e5 | Commands: back reset resign save image fen hint quit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let result = app::run(&mut session, stdin.lock(), &mut stdout);
    if let Err(e) = &result {
        error!(error = %e, "host loop failed");
    }
    session.stop();
    info!("engines stopped");
    result
}

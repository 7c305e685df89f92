//! Sit between a UCI client and an engine, logging the conversation
//!
//! Point a GUI (or uchess) at this binary with the engine path as its only
//! argument. Lines from the client are logged as `<`, lines from the
//! engine as `>`, both at info level in `uchess.log`.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use tracing::info;
use uchess::logging;

#[derive(Parser, Debug)]
#[command(name = "uciproxy", about = "Relay and log a UCI engine conversation")]
struct Args {
    /// Engine executable
    engine: PathBuf,

    /// Log file
    #[arg(long, value_name = "FILE", default_value = logging::LOG_FILE)]
    log: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log, "info")?;

    let mut child = Command::new(&args.engine)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .with_context(|| format!("starting {}", args.engine.display()))?;
    let mut engine_in = child.stdin.take().context("engine stdin")?;
    let engine_out = child.stdout.take().context("engine stdout")?;

    let relay = thread::spawn(move || {
        let mut stdout = io::stdout();
        for line in BufReader::new(engine_out).lines() {
            let Ok(line) = line else { break };
            info!("> {}", line);
            if writeln!(stdout, "{}", line).and_then(|_| stdout.flush()).is_err() {
                break;
            }
        }
    });

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        info!("< {}", line);
        if writeln!(engine_in, "{}", line).and_then(|_| engine_in.flush()).is_err() {
            break;
        }
    }

    // Closing stdin lets the engine exit on its own
    drop(engine_in);
    child.wait().context("waiting for engine")?;
    let _ = relay.join();
    Ok(())
}

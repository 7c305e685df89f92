//! Command line flags

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use uchess_core::config::{Config, PlayerKind};

use crate::logging::LOG_FILE;

#[derive(Parser, Debug, Clone)]
#[command(name = "uchess", version, about = "Play chess in the terminal against UCI engines")]
pub struct Args {
    /// Config file (.json or .toml)
    #[arg(long, value_name = "FILE")]
    pub cfg: Option<PathBuf>,

    /// Print the default config as JSON and exit
    #[arg(long)]
    pub tmpl: bool,

    /// Who plays white: human or cpu
    #[arg(long, default_value = "human")]
    pub white: PlayerKind,

    /// Who plays black: human or cpu
    #[arg(long, default_value = "cpu")]
    pub black: PlayerKind,

    /// Engine executable for the default config
    #[arg(long, value_name = "PATH", default_value = "stockfish")]
    pub engine: PathBuf,

    /// Log file
    #[arg(long, value_name = "FILE", default_value = LOG_FILE)]
    pub log: PathBuf,
}

impl Args {
    /// The config the flags describe. A config file wins over the piece
    /// flags; without one the default engine setup is used.
    pub fn config(&self) -> Result<Config> {
        let mut config = match &self.cfg {
            Some(path) => {
                Config::load(path).with_context(|| format!("loading config {}", path.display()))?
            }
            None => {
                let mut config = self.template();
                config.white_piece = self.white;
                config.black_piece = self.black;
                config
            }
        };
        config.validate()?;
        config.fill_player_names();
        Ok(config)
    }

    /// Default config printed by `--tmpl`
    pub fn template(&self) -> Config {
        Config::default_with_engine(&self.engine)
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;

//! Pewen CLI - play with a virtual tree from the terminal
//!
//! This crate parses arguments, sets up logging and the runtime, and hands
//! the terminal to the REPL. All game logic lives in the `pewen` library.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use pewen::PewenConfig;

mod repl;

/// Adopt a virtual tree, keep it alive, return it for tokens.
#[derive(Parser, Debug)]
#[command(name = "pewen", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Milliseconds between decay ticks (overrides the config file)
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Seed for tree names and mock wallet addresses (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn load_config(&self) -> Result<PewenConfig> {
        let mut config = match &self.config {
            Some(path) => PewenConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => PewenConfig::default(),
        };
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = args.load_config()?;
    debug!("starting with {:?}", config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    repl::run(&runtime, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from(["pewen", "--tick-ms", "250", "--seed", "9"]);
        let config = args.load_config().unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["pewen"]);
        assert_eq!(args.load_config().unwrap(), PewenConfig::default());
    }

    #[test]
    fn test_zero_tick_rejected() {
        let args = Args::parse_from(["pewen", "--tick-ms", "0"]);
        assert!(args.load_config().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let args = Args::parse_from(["pewen", "--config", "/no/such/pewen.toml"]);
        let err = args.load_config().unwrap_err();
        assert!(err.to_string().contains("/no/such/pewen.toml"));
    }
}

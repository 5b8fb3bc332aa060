//! CLI for the FOSDEM search URL state codec.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fosdem_search_core::config;

use commands::{run_config_path, run_config_show, run_decode, run_encode, run_request};

/// Top-level CLI for the FOSDEM search state tools.
#[derive(Debug, Parser)]
#[command(name = "fosdem-search")]
#[command(about = "FOSDEM search: URL state codec and search request builder", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Encode a JSON search state into a URL path.
    Encode {
        /// State as a JSON object, e.g. '{"query":"rust","room":["K.1.1"]}'.
        state: String,
    },

    /// Decode a URL (absolute, path or bare query string) into a JSON search state.
    Decode {
        /// URL or search string, e.g. '/?track=Go'.
        url: String,
    },

    /// Show the search backend request for a URL.
    Request {
        /// URL or search string.
        url: String,

        /// Override the configured index name.
        #[arg(long, value_name = "NAME")]
        index: Option<String>,
    },

    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
    /// Print the configuration file path.
    Path,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Encode { state } => run_encode(&cfg, &state)?,
            CliCommand::Decode { url } => run_decode(&cfg, &url)?,
            CliCommand::Request { url, index } => run_request(&cfg, &url, index)?,
            CliCommand::Config { action } => match action {
                ConfigAction::Show => run_config_show(&cfg)?,
                ConfigAction::Path => run_config_path()?,
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

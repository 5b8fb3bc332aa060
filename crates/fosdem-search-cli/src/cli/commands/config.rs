//! `fosdem-search config show|path`.

use anyhow::Result;
use fosdem_search_core::config::{self, AppConfig};

pub fn run_config_show(cfg: &AppConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}

pub fn run_config_path() -> Result<()> {
    println!("{}", config::config_path()?.display());
    Ok(())
}

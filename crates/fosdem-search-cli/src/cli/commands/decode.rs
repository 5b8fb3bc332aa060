//! `fosdem-search decode <url>` – URL to JSON state.

use anyhow::Result;
use fosdem_search_core::config::AppConfig;

use super::state_from_url;

pub(crate) fn decode_to_json(cfg: &AppConfig, url: &str) -> Result<String> {
    let state = state_from_url(url, &cfg.codec);
    Ok(serde_json::to_string_pretty(&state)?)
}

pub fn run_decode(cfg: &AppConfig, url: &str) -> Result<()> {
    println!("{}", decode_to_json(cfg, url)?);
    Ok(())
}

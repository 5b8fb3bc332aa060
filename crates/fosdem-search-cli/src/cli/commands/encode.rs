//! `fosdem-search encode <json>` – state to URL path.

use anyhow::{Context, Result};
use fosdem_search_core::codec;
use fosdem_search_core::config::AppConfig;
use fosdem_search_core::SearchState;

pub(crate) fn encode_json(cfg: &AppConfig, json: &str) -> Result<String> {
    let state: SearchState = serde_json::from_str(json)
        .context("state must be a JSON object of strings, string arrays or objects")?;
    Ok(codec::encode_with(&state, &cfg.codec))
}

pub fn run_encode(cfg: &AppConfig, json: &str) -> Result<()> {
    println!("{}", encode_json(cfg, json)?);
    Ok(())
}

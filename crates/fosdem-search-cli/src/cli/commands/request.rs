//! `fosdem-search request <url>` – backend request for the state in a URL.

use anyhow::Result;
use fosdem_search_core::config::AppConfig;
use fosdem_search_core::request::SearchRequest;

use super::state_from_url;

pub(crate) fn build_request(
    cfg: &AppConfig,
    url: &str,
    index: Option<String>,
) -> Result<SearchRequest> {
    let mut cfg = cfg.clone();
    cfg.override_index(index);
    cfg.validate()?;
    let state = state_from_url(url, &cfg.codec);
    Ok(SearchRequest::from_state(&state, &cfg.search))
}

pub fn run_request(cfg: &AppConfig, url: &str, index: Option<String>) -> Result<()> {
    let request = build_request(cfg, url, index)?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

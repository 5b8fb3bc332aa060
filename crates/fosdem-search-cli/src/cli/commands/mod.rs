//! CLI command handlers. Each command is in its own file.

mod config;
mod decode;
mod encode;
mod request;

pub use config::{run_config_path, run_config_show};
pub use decode::run_decode;
pub use encode::run_encode;
pub use request::run_request;

#[cfg(test)]
pub(crate) use decode::decode_to_json;
#[cfg(test)]
pub(crate) use encode::encode_json;
#[cfg(test)]
pub(crate) use request::build_request;

use fosdem_search_core::codec::CodecOptions;
use fosdem_search_core::location::{MemoryHistory, Router};
use fosdem_search_core::SearchState;

/// Decodes the state carried by a URL argument, as a page load would.
pub(crate) fn state_from_url(url: &str, options: &CodecOptions) -> SearchState {
    Router::new(MemoryHistory::new(url), options.clone()).initial_state()
}

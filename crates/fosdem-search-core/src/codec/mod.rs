//! URL state codec: address-bar query string <-> [`SearchState`].
//!
//! Sequences are written with bracket indices (`room[0]=K.1.1&room[1]=H.1309`)
//! or empty brackets (`room[]=...`); nested mappings use bracket paths
//! (`refinementList[room][0]=K.1.1`). Repeated plain keys decode to a list.
//!
//! Only the `query` value is percent-encoded in full. Other keys and values are
//! written verbatim except for the characters the query-string grammar
//! reserves, so that [`decode`] is the exact inverse of [`encode`].

mod escape;
mod parse;
mod serialize;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::SearchState;

/// State key of the free-text search term.
pub const QUERY_KEY: &str = "query";

/// Smallest accepted array limit; large filter selections must not be truncated.
pub const MIN_ARRAY_LIMIT: usize = 1000;

/// Convention used for sequence values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFormat {
    /// `room[0]=a&room[1]=b`
    #[default]
    Indices,
    /// `room[]=a&room[]=b`
    Brackets,
}

/// Codec tuning (`[codec]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Highest `[n]` index still decoded as a list position.
    pub array_limit: usize,
    /// Maximum number of bracket segments per key.
    pub depth: usize,
    /// Maximum number of `&`-separated fragments considered; unlimited when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_limit: Option<usize>,
    pub array_format: ArrayFormat,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            array_limit: MIN_ARRAY_LIMIT,
            depth: 5,
            parameter_limit: None,
            array_format: ArrayFormat::Indices,
        }
    }
}

impl CodecOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.array_limit < MIN_ARRAY_LIMIT {
            return Err(ConfigError::ArrayLimitTooSmall {
                limit: self.array_limit,
                min: MIN_ARRAY_LIMIT,
            });
        }
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.parameter_limit == Some(0) {
            return Err(ConfigError::ZeroParameterLimit);
        }
        Ok(())
    }
}

/// Encodes `state` as a relative URL: `/` alone for an empty state,
/// otherwise `/?` followed by the query string.
pub fn encode(state: &SearchState) -> String {
    encode_with(state, &CodecOptions::default())
}

pub fn encode_with(state: &SearchState, opts: &CodecOptions) -> String {
    let query = serialize::serialize_state(state, opts);
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", query)
    }
}

/// Decodes the search portion of a location (with or without a leading `/`
/// and `?`). Malformed fragments are dropped.
pub fn decode(url: &str) -> SearchState {
    decode_with(url, &CodecOptions::default())
}

pub fn decode_with(url: &str, opts: &CodecOptions) -> SearchState {
    let url = url.strip_prefix('/').unwrap_or(url);
    let url = url.strip_prefix('?').unwrap_or(url);
    parse::parse_query(url, opts)
}

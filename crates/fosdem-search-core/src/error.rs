//! Error types for configuration loading and validation.
//!
//! The codec itself never fails; only the ambient configuration can be invalid.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("codec.array_limit = {limit} is below the minimum of {min}")]
    ArrayLimitTooSmall { limit: usize, min: usize },
    #[error("codec.depth must be at least 1")]
    ZeroDepth,
    #[error("codec.parameter_limit must be at least 1")]
    ZeroParameterLimit,
    #[error("search.index_name must not be empty")]
    EmptyIndexName,
    #[error("search.hits_per_page must be at least 1")]
    ZeroHitsPerPage,
    #[error("reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

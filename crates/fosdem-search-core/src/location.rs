//! Current location and history seam.
//!
//! The codec stays pure; the caller reads the current location through
//! [`LocationSource`] and applies new URLs through [`HistorySink`]. [`Router`]
//! ties the two to the codec: it decodes the initial state and replaces the
//! current history entry after each state change.

use crate::codec::{self, CodecOptions};
use crate::state::SearchState;

/// Path and search portion of an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    /// Search portion including its leading `?`, or empty.
    search: String,
}

impl Location {
    /// Parses an absolute URL (`https://host/path?x=1#frag`) or a relative
    /// `path?query` string. The fragment is discarded.
    ///
    /// A relative input without `?` that contains `=` (e.g. `/track=Go`) is
    /// taken as a bare search string.
    pub fn parse(input: &str) -> Location {
        if let Ok(url) = url::Url::parse(input) {
            if !url.cannot_be_a_base() {
                return Location {
                    path: url.path().to_string(),
                    search: url.query().map(|q| format!("?{}", q)).unwrap_or_default(),
                };
            }
        }

        let input = input.split_once('#').map_or(input, |(before, _)| before);
        match input.split_once('?') {
            Some((path, query)) => Location {
                path: if path.is_empty() { "/".to_string() } else { path.to_string() },
                search: format!("?{}", query),
            },
            None if input.contains('=') => Location {
                path: "/".to_string(),
                search: format!("?{}", input.strip_prefix('/').unwrap_or(input)),
            },
            None => Location {
                path: if input.is_empty() { "/".to_string() } else { input.to_string() },
                search: String::new(),
            },
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Relative form: path followed by the search portion.
    pub fn href(&self) -> String {
        format!("{}{}", self.path, self.search)
    }
}

/// Read access to the current location.
pub trait LocationSource {
    fn current(&self) -> Location;
}

/// Replaces the current history entry without a full navigation.
pub trait HistorySink {
    fn replace(&mut self, url: &str);
}

/// In-memory history holding a current entry and every replacement made.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    current: String,
    replaced: Vec<String>,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            current: initial.to_string(),
            replaced: Vec::new(),
        }
    }

    /// URLs passed to [`HistorySink::replace`], oldest first.
    pub fn replacements(&self) -> &[String] {
        &self.replaced
    }
}

impl LocationSource for MemoryHistory {
    fn current(&self) -> Location {
        Location::parse(&self.current)
    }
}

impl HistorySink for MemoryHistory {
    fn replace(&mut self, url: &str) {
        self.current = url.to_string();
        self.replaced.push(url.to_string());
    }
}

/// Keeps a history in step with the search state.
pub struct Router<H> {
    history: H,
    options: CodecOptions,
}

impl<H: LocationSource + HistorySink> Router<H> {
    pub fn new(history: H, options: CodecOptions) -> Self {
        Self { history, options }
    }

    /// State encoded in the current location.
    pub fn initial_state(&self) -> SearchState {
        let location = self.history.current();
        codec::decode_with(location.search(), &self.options)
    }

    /// Encodes `state` and replaces the current history entry when the URL
    /// changes. Returns the encoded URL.
    pub fn apply(&mut self, state: &SearchState) -> String {
        let url = codec::encode_with(state, &self.options);
        let current = self.history.current().href();
        if current == url {
            tracing::trace!(%url, "location unchanged");
        } else {
            tracing::debug!(from = %current, to = %url, "replacing history entry");
            self.history.replace(&url);
        }
        url
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn into_history(self) -> H {
        self.history
    }
}

//! URL state codec and search request model for the FOSDEM schedule search.

pub mod codec;
pub mod config;
pub mod error;
pub mod location;
pub mod logging;
pub mod request;
pub mod state;

pub use codec::{decode, encode};
pub use state::{SearchState, StateValue};

use std::num::ParseIntError;

use thiserror::Error;

/// Malformed textual input, caught before any simulation runs.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid input: empty field at position {position}")]
    EmptyField { position: usize },

    #[error("Invalid input: {token:?}: {source}")]
    InvalidInteger {
        token: String,
        #[source]
        source: ParseIntError,
    },
}

//! Environment variable handling.

use std::env;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Environment variable names.
pub mod vars {
    /// Target width for help output in runes.
    pub const CMDLINE_WIDTH: &str = "CMDLINE_WIDTH";
}

/// Process environment accessors.
pub struct Environment;

impl Environment {
    /// Get an integer variable. Surrounding whitespace is ignored.
    pub fn get_int<T: std::str::FromStr>(var: &str) -> Result<Option<T>, EnvError> {
        match env::var(var) {
            Ok(v) => v.trim().parse().map(Some).map_err(|_| EnvError::InvalidValue {
                var: var.to_string(),
                message: format!("expected integer, got {v:?}"),
            }),
            Err(_) => Ok(None),
        }
    }
}

//! Errors raised by the demo commands.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("sum overflows a 64-bit integer")]
    Overflow,

    #[error("wrap width must be positive, got {0}")]
    Width(i64),
}

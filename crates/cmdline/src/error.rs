//! Dispatch error handling.

use std::io;
use std::process::ExitCode;

use thiserror::Error;

/// Boxed error returned by command handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned from [`Program::execute`](crate::Program::execute).
#[derive(Debug, Error)]
pub enum Error {
    /// A usage-class failure. The contextual help block has already been
    /// written to the error sink when this is returned.
    #[error("usage error: {message}")]
    Usage { message: String },

    /// Raised by a handler through [`Context::usage_error`](crate::Context::usage_error).
    /// The dispatcher renders it and returns [`Error::Usage`] instead.
    #[error("{message}")]
    UsageRequested { message: String },

    /// Handler-domain error, passed through untouched.
    #[error(transparent)]
    Run(BoxError),

    /// Writing to the output or error sink failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Wrap a handler-domain error.
    pub fn run<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Run(err.into())
    }

    /// True for the usage sentinel.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }

    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usage { .. } | Self::UsageRequested { .. } => "E001",
            Self::Run(_) => "E002",
            Self::Io(_) => "E003",
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        let code = match self {
            Self::Usage { .. } | Self::UsageRequested { .. } => 2,
            Self::Run(_) => 1,
            Self::Io(_) => 3,
        };
        ExitCode::from(code)
    }

    /// Downcast a handler-domain error.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Run(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Run(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn test_usage_is_sentinel() {
        let err = Error::Usage {
            message: "prog: no command specified".into(),
        };
        assert!(err.is_usage());
        assert_eq!(err.code(), "E001");
        assert!(!Error::run(Boom).is_usage());
    }

    #[test]
    fn test_run_error_downcasts() {
        let err = Error::run(Boom);
        assert!(err.downcast_ref::<Boom>().is_some());
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_anyhow_converts_to_run() {
        let err: Error = anyhow::anyhow!("from anyhow").into();
        assert!(matches!(err, Error::Run(_)));
        assert_eq!(err.to_string(), "from anyhow");
    }
}

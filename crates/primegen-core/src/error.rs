//! Error type shared by every pipeline stage.

use std::path::PathBuf;

/// Error type for prime generation runs.
#[derive(Debug, thiserror::Error)]
pub enum PrimeError {
    /// Invalid options, detected before any work starts.
    #[error("configuration error: {0}")]
    Config(String),

    /// A file could not be opened, written, read, or removed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the presorted file is not a decimal integer.
    #[error("line {line} is not a decimal integer: {content:?}")]
    Parse { line: usize, content: String },

    /// Work was abandoned because cancellation was requested.
    #[error("operation cancelled")]
    Cancelled,

    /// A pipeline thread terminated abnormally.
    #[error("pipeline thread failed: {0}")]
    Worker(String),
}

impl PrimeError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prime_error_display() {
        let err = PrimeError::Config("start must be odd".into());
        assert_eq!(err.to_string(), "configuration error: start must be odd");

        let err = PrimeError::Parse {
            line: 3,
            content: "12a".into(),
        };
        assert_eq!(err.to_string(), "line 3 is not a decimal integer: \"12a\"");

        assert_eq!(PrimeError::Cancelled.to_string(), "operation cancelled");
    }

    #[test]
    fn io_error_includes_path() {
        let err = PrimeError::io(
            "/tmp/missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.txt"));
        assert!(msg.contains("not found"));
    }
}

// ABOUTME: Search error types with SNAFU pattern.
// ABOUTME: Separates tool failures from a genuine "no match" result.

use snafu::Snafu;
use std::time::Duration;

/// Failure of the search tool itself. A clean "not found" is never an error.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SearchError {
    #[snafu(display("failed to launch {program}: {source}"))]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("{program} exited with status {code}: {stderr}"))]
    Exit {
        program: String,
        code: i32,
        stderr: String,
    },

    #[snafu(display("{program} was terminated by a signal"))]
    Signal { program: String },

    #[snafu(display("{program} timed out after {}", humantime::format_duration(*timeout)))]
    Timeout { program: String, timeout: Duration },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorKind {
    /// The tool could not be started.
    Spawn,
    /// The tool ran and reported an error status (2 or higher).
    ToolError,
    /// The tool was killed before it finished.
    Interrupted,
    /// The tool did not finish within the configured timeout.
    Timeout,
}

impl SearchError {
    pub fn kind(&self) -> SearchErrorKind {
        match self {
            SearchError::Spawn { .. } => SearchErrorKind::Spawn,
            SearchError::Exit { .. } => SearchErrorKind::ToolError,
            SearchError::Signal { .. } => SearchErrorKind::Interrupted,
            SearchError::Timeout { .. } => SearchErrorKind::Timeout,
        }
    }

    /// Exit code reported by the tool, if it got that far.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            SearchError::Exit { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let err = SearchError::Exit {
            program: "ag".to_string(),
            code: 2,
            stderr: "bad pattern".to_string(),
        };
        assert_eq!(err.kind(), SearchErrorKind::ToolError);
        assert_eq!(err.exit_code(), Some(2));

        let err = SearchError::Timeout {
            program: "rg".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(err.kind(), SearchErrorKind::Timeout);
        assert!(err.exit_code().is_none());
        assert_eq!(err.to_string(), "rg timed out after 5s");
    }

    #[test]
    fn sub_second_timeout_is_not_shown_as_zero() {
        let err = SearchError::Timeout {
            program: "rg".to_string(),
            timeout: Duration::from_millis(100),
        };
        assert_eq!(err.to_string(), "rg timed out after 100ms");
    }

    #[test]
    fn spawn_error_mentions_program() {
        let err = SearchError::Spawn {
            program: "ag".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.kind(), SearchErrorKind::Spawn);
        assert!(err.to_string().starts_with("failed to launch ag"));
    }
}

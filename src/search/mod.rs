// ABOUTME: Text search capability used to decide whether an image is referenced.
// ABOUTME: Defines the TextSearcher trait and the external-command implementation.

mod command;
mod error;
mod tool;

pub use command::{CommandSearcher, DEFAULT_SEARCH_TIMEOUT, classify_status};
pub use error::{SearchError, SearchErrorKind};
pub use tool::{SearchCommand, SearchTool, ToolSpec, detect_tool};

use async_trait::async_trait;
use std::path::Path;

/// Answers one question: does `pattern` occur literally anywhere under `root`?
///
/// `Ok(false)` is a clean "no match". `Err` means the search itself failed
/// and says nothing about references; callers decide what that implies.
#[async_trait]
pub trait TextSearcher: Send + Sync {
    async fn has_match(&self, pattern: &str, root: &Path) -> Result<bool, SearchError>;

    /// Human-readable form of the search, echoed before it runs.
    fn describe(&self, pattern: &str, root: &Path) -> String {
        format!("search '{}' in {}", pattern, root.display())
    }
}

#[async_trait]
impl<T: TextSearcher + ?Sized> TextSearcher for &T {
    async fn has_match(&self, pattern: &str, root: &Path) -> Result<bool, SearchError> {
        (**self).has_match(pattern, root).await
    }

    fn describe(&self, pattern: &str, root: &Path) -> String {
        (**self).describe(pattern, root)
    }
}

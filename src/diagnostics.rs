// ABOUTME: Diagnostics accumulator for non-fatal warnings during a prune run.
// ABOUTME: Collects problems that shouldn't stop the run but should be shown to users.

/// Collects non-fatal warnings while pruning.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// A non-fatal warning collected during a run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a delete failure warning.
    pub fn delete_failed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::DeleteFailed,
            message: message.into(),
        }
    }

    /// Create a search failure warning.
    pub fn search_failed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::SearchFailed,
            message: message.into(),
        }
    }

    /// Create a skipped directory entry warning.
    pub fn skipped_entry(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::SkippedEntry,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur while pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// An unreferenced image could not be removed.
    DeleteFailed,
    /// The search tool failed for an image.
    SearchFailed,
    /// A directory entry could not be read or named.
    SkippedEntry,
}

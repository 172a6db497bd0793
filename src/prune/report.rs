// ABOUTME: Per-file outcomes and the summary of a prune run.
// ABOUTME: Exposes (deleted, scanned) counts plus collected warnings.

use std::path::Path;

use crate::diagnostics::Warning;
use crate::search::SearchErrorKind;
use crate::types::ImagePath;

/// Result of searching for one image's base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Found,
    NotFound,
    Failed(SearchErrorKind),
}

/// Final state of one image after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Kept,
    Deleted,
    /// Judged unused, but removing it failed.
    DeleteFailed,
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub image: ImagePath,
    pub search: SearchStatus,
    pub disposition: Disposition,
}

#[derive(Debug, Default)]
pub struct PruneReport {
    outcomes: Vec<FileOutcome>,
    warnings: Vec<Warning>,
}

impl PruneReport {
    pub fn new(outcomes: Vec<FileOutcome>, warnings: Vec<Warning>) -> Self {
        Self { outcomes, warnings }
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn scanned(&self) -> usize {
        self.outcomes.len()
    }

    pub fn deleted(&self) -> impl Iterator<Item = &Path> {
        self.with_disposition(Disposition::Deleted)
    }

    pub fn kept(&self) -> impl Iterator<Item = &Path> {
        self.with_disposition(Disposition::Kept)
    }

    /// `(deleted, scanned)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.deleted().count(), self.scanned())
    }

    pub fn summary(&self) -> String {
        let (deleted, scanned) = self.counts();
        format!("Removed {} of {} image(s)", deleted, scanned)
    }

    fn with_disposition(&self, disposition: Disposition) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter(move |o| o.disposition == disposition)
            .map(|o| o.image.path())
    }
}

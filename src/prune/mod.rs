// ABOUTME: Unused-image pruner: lists images, searches for each name, deletes the unreferenced.
// ABOUTME: Sequential per-file flow of Pending -> Searched -> Kept | Deleted | DeleteFailed.

mod policy;
mod report;

pub use policy::SearchErrorPolicy;
pub use report::{Disposition, FileOutcome, PruneReport, SearchStatus};

use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::output::Output;
use crate::search::TextSearcher;
use crate::types::ImagePath;

/// Where to look for images and where to look for references to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneTarget {
    pub image_dir: PathBuf,
    pub search_root: PathBuf,
    /// Lowercase extensions without the dot. Empty accepts every file.
    pub extensions: Vec<String>,
}

impl PruneTarget {
    pub fn new(image_dir: impl Into<PathBuf>, search_root: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
            search_root: search_root.into(),
            extensions: Vec::new(),
        }
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    fn accepts(&self, image: &ImagePath) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        image
            .extension()
            .is_some_and(|ext| self.extensions.contains(&ext))
    }
}

/// List candidate images directly under the image directory, sorted by path.
///
/// Subdirectories and dotfiles are never candidates. Entries that cannot be
/// read or named are skipped with a warning.
pub fn list_images(target: &PruneTarget, diag: &mut Diagnostics) -> Result<Vec<ImagePath>> {
    let dir = &target.image_dir;
    let entries = std::fs::read_dir(dir).map_err(|source| Error::ImageDirUnreadable {
        path: dir.clone(),
        source,
    })?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                diag.warn(Warning::skipped_entry(format!(
                    "unreadable entry in {}: {}",
                    dir.display(),
                    e
                )));
                continue;
            }
        };

        let path = entry.path();
        if entry.file_name().as_encoded_bytes().first() == Some(&b'.') || !is_file(&entry) {
            tracing::debug!(path = %path.display(), "not a candidate");
            continue;
        }

        let image = match ImagePath::new(path) {
            Ok(image) => image,
            Err(e) => {
                diag.warn(Warning::skipped_entry(format!("skipping {}", e)));
                continue;
            }
        };

        if !target.accepts(&image) {
            tracing::debug!(path = %image, "filtered by extension");
            continue;
        }

        images.push(image);
    }

    images.sort_by(|a, b| a.path().cmp(b.path()));
    Ok(images)
}

/// Regular files, or symlinks that resolve to one.
fn is_file(entry: &std::fs::DirEntry) -> bool {
    match entry.file_type() {
        Ok(ft) if ft.is_file() => true,
        Ok(ft) if ft.is_symlink() => entry.path().is_file(),
        _ => false,
    }
}

/// Deletes images whose base name is not found under the search root.
pub struct Pruner<S> {
    searcher: S,
    policy: SearchErrorPolicy,
}

impl<S: TextSearcher> Pruner<S> {
    pub fn new(searcher: S) -> Self {
        Self {
            searcher,
            policy: SearchErrorPolicy::default(),
        }
    }

    pub fn policy(mut self, policy: SearchErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run one pass over the image directory.
    ///
    /// Every listed image is searched exactly once. Only listed images are
    /// ever deleted, and only after their own search completed.
    pub async fn prune(&self, target: &PruneTarget, output: &Output) -> Result<PruneReport> {
        let mut diag = Diagnostics::default();
        let images = list_images(target, &mut diag)?;

        tracing::debug!(
            count = images.len(),
            dir = %target.image_dir.display(),
            "listed candidate images"
        );

        let mut outcomes = Vec::with_capacity(images.len());
        for image in images {
            let outcome = self
                .prune_one(image, &target.search_root, output, &mut diag)
                .await;
            outcomes.push(outcome);
        }

        Ok(PruneReport::new(outcomes, diag.into_warnings()))
    }

    async fn prune_one(
        &self,
        image: ImagePath,
        root: &Path,
        output: &Output,
        diag: &mut Diagnostics,
    ) -> FileOutcome {
        let pattern = image.base_name();
        output.search(&self.searcher.describe(pattern, root), image.path());

        let (search, referenced) = match self.searcher.has_match(pattern, root).await {
            Ok(true) => (SearchStatus::Found, true),
            Ok(false) => (SearchStatus::NotFound, false),
            Err(e) => {
                let verdict = if self.policy.deletes() { "deleting" } else { "keeping" };
                diag.warn(Warning::search_failed(format!(
                    "search for {} failed, {} {}: {}",
                    pattern, verdict, image, e
                )));
                (SearchStatus::Failed(e.kind()), !self.policy.deletes())
            }
        };
        tracing::debug!(image = %image, ?search, "searched");

        let disposition = if referenced {
            Disposition::Kept
        } else {
            let disposition = match tokio::fs::remove_file(image.path()).await {
                Ok(()) => {
                    tracing::info!(image = %image, "deleted");
                    Disposition::Deleted
                }
                Err(e) => {
                    diag.warn(Warning::delete_failed(format!(
                        "failed to delete {}: {}",
                        image, e
                    )));
                    Disposition::DeleteFailed
                }
            };
            output.unused(image.path());
            disposition
        };

        FileOutcome {
            image,
            search,
            disposition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"\x89PNG\r\n\x1a\n").unwrap();
    }

    fn names(images: &[ImagePath]) -> Vec<&str> {
        images.iter().map(|i| i.base_name()).collect()
    }

    #[test]
    fn lists_flat_files_sorted() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "b.png");
        touch(temp.path(), "a.png");
        fs::create_dir(temp.path().join("nested")).unwrap();
        touch(&temp.path().join("nested"), "c.png");

        let mut diag = Diagnostics::default();
        let images = list_images(&PruneTarget::new(temp.path(), "."), &mut diag).unwrap();

        assert_eq!(names(&images), vec!["a.png", "b.png"]);
        assert!(!diag.has_warnings());
    }

    #[test]
    fn skips_dotfiles() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), ".DS_Store");
        touch(temp.path(), "a.png");

        let mut diag = Diagnostics::default();
        let images = list_images(&PruneTarget::new(temp.path(), "."), &mut diag).unwrap();

        assert_eq!(names(&images), vec!["a.png"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_dirs_and_dotfiles_are_skipped_silently() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join(OsStr::from_bytes(b"old\xff"))).unwrap();
        fs::write(temp.path().join(OsStr::from_bytes(b".cache\xff")), b"").unwrap();
        touch(temp.path(), "a.png");

        let mut diag = Diagnostics::default();
        let images = list_images(&PruneTarget::new(temp.path(), "."), &mut diag).unwrap();

        assert_eq!(names(&images), vec!["a.png"]);
        assert!(!diag.has_warnings());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_file_is_skipped_with_warning() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join(OsStr::from_bytes(b"bad\xff.png")), b"").unwrap();
        touch(temp.path(), "a.png");

        let mut diag = Diagnostics::default();
        let images = list_images(&PruneTarget::new(temp.path(), "."), &mut diag).unwrap();

        assert_eq!(names(&images), vec!["a.png"]);
        assert!(diag.has_warnings());
    }

    #[test]
    fn extension_filter_is_case_insensitive() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "a.PNG");
        touch(temp.path(), "b.svg");
        touch(temp.path(), "notes.txt");

        let target = PruneTarget::new(temp.path(), ".").extensions([".png", "SVG"]);
        assert_eq!(target.extensions, vec!["png", "svg"]);

        let mut diag = Diagnostics::default();
        let images = list_images(&target, &mut diag).unwrap();
        assert_eq!(names(&images), vec!["a.PNG", "b.svg"]);
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let mut diag = Diagnostics::default();
        let images = list_images(&PruneTarget::new(temp.path(), "."), &mut diag).unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let mut diag = Diagnostics::default();
        let err = list_images(
            &PruneTarget::new(temp.path().join("missing"), "."),
            &mut diag,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ImageDirUnreadable { .. }));
    }
}

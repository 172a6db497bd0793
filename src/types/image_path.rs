// ABOUTME: Validated path to a candidate image file.
// ABOUTME: Guarantees a UTF-8 base name that can be used as a search pattern.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImagePathError {
    #[error("path has no file name: {0}")]
    NoFileName(PathBuf),

    #[error("file name is not valid UTF-8: {0}")]
    NonUtf8(PathBuf),
}

/// A file directly under the image directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImagePath {
    path: PathBuf,
    base_name: String,
}

impl ImagePath {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ImagePathError> {
        let path = path.into();
        let base_name = match path.file_name() {
            None => return Err(ImagePathError::NoFileName(path)),
            Some(name) => match name.to_str() {
                Some(s) => s.to_string(),
                None => return Err(ImagePathError::NonUtf8(path)),
            },
        };
        Ok(Self { path, base_name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The final path component, used verbatim as the search pattern.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Lowercased extension, if the base name has one.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }
}

impl fmt::Display for ImagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

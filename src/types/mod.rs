// ABOUTME: Validated domain types.
// ABOUTME: Image paths carry a checked UTF-8 base name.

mod image_path;

pub use image_path::{ImagePath, ImagePathError};

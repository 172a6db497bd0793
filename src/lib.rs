// ABOUTME: Library root for imgprune - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod prune;
pub mod search;
pub mod types;

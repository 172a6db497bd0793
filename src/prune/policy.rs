// ABOUTME: What to do with an image when the search tool itself fails.
// ABOUTME: Supports keep (default) and delete (treat a failure as "no references").

use serde::de::{self, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchErrorPolicy {
    /// Leave the image in place and record a warning.
    #[default]
    Keep,
    /// Delete the image, the same as a clean "not found".
    Delete,
}

impl SearchErrorPolicy {
    pub fn deletes(&self) -> bool {
        matches!(self, SearchErrorPolicy::Delete)
    }
}

impl FromStr for SearchErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(SearchErrorPolicy::Keep),
            "delete" => Ok(SearchErrorPolicy::Delete),
            _ => Err(format!(
                "unknown search error policy: {} (expected keep or delete)",
                s
            )),
        }
    }
}

impl fmt::Display for SearchErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchErrorPolicy::Keep => write!(f, "keep"),
            SearchErrorPolicy::Delete => write!(f, "delete"),
        }
    }
}

impl<'de> Deserialize<'de> for SearchErrorPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps() {
        assert_eq!(SearchErrorPolicy::default(), SearchErrorPolicy::Keep);
        assert!(!SearchErrorPolicy::Keep.deletes());
        assert!(SearchErrorPolicy::Delete.deletes());
    }

    #[test]
    fn parse_and_display() {
        for policy in [SearchErrorPolicy::Keep, SearchErrorPolicy::Delete] {
            assert_eq!(policy.to_string().parse::<SearchErrorPolicy>(), Ok(policy));
        }
        assert!("ignore".parse::<SearchErrorPolicy>().is_err());
    }
}

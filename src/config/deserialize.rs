// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Normalizes the extension filter list.

use serde::Deserialize;

/// Accepts `png`, `.png` or `PNG`; stores `png`. Empty entries are rejected.
pub fn deserialize_extensions<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<String> = Vec::deserialize(deserializer)?;
    values
        .into_iter()
        .map(|v| {
            let ext = v.trim().trim_start_matches('.').to_ascii_lowercase();
            if ext.is_empty() {
                Err(serde::de::Error::custom("extension cannot be empty"))
            } else {
                Ok(ext)
            }
        })
        .collect()
}

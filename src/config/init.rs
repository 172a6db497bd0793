// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates imgprune.yml template files.

use std::path::Path;

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = generate_template_yaml(&Config::default());
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"# Directory holding the images to check (not searched recursively)
images: "{}"
# Tree searched for references to each image's file name
root: "{}"
# Search tool: ag, rg or grep (auto-detected in that order when unset),
# or a custom command using {{pattern}} and {{root}} placeholders:
#   tool:
#     program: ./scripts/find-ref
#     args: ["{{pattern}}", "{{root}}"]
# tool: ag
# When the search tool fails: keep the image (default) or delete it
on_search_error: {}
# Only consider these extensions (default: every file)
# extensions: [png, jpg, svg]
search_timeout: {}s
"#,
        config.images.display(),
        config.root.display(),
        config.on_search_error,
        config.search_timeout.as_secs(),
    )
}

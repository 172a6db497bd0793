// ABOUTME: Configuration types and parsing for imgprune.yml.
// ABOUTME: Handles YAML parsing, discovery, defaults, and path resolution.

mod deserialize;
mod init;

pub use init::init_config;

use crate::error::{Error, Result};
use crate::prune::{PruneTarget, SearchErrorPolicy};
use crate::search::{CommandSearcher, DEFAULT_SEARCH_TIMEOUT, ToolSpec, detect_tool};
use deserialize::deserialize_extensions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "imgprune.yml";
pub const CONFIG_FILENAME_ALT: &str = "imgprune.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".imgprune/config.yml";

pub const DEFAULT_IMAGE_DIR: &str = "docs/img";
pub const DEFAULT_SEARCH_ROOT: &str = ".";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_images")]
    pub images: PathBuf,

    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// None means auto-detect.
    #[serde(default)]
    pub tool: Option<ToolSpec>,

    #[serde(default)]
    pub on_search_error: SearchErrorPolicy,

    #[serde(default, deserialize_with = "deserialize_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_search_timeout", with = "humantime_serde")]
    pub search_timeout: Duration,
}

fn default_images() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE_DIR)
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_SEARCH_ROOT)
}

fn default_search_timeout() -> Duration {
    DEFAULT_SEARCH_TIMEOUT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images: default_images(),
            root: default_root(),
            tool: None,
            on_search_error: SearchErrorPolicy::default(),
            extensions: Vec::new(),
            search_timeout: default_search_timeout(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Find the first config file in `dir`.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Like [`Config::discover`], falling back to defaults when no file exists.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::discover(dir) {
            Err(Error::ConfigNotFound(_)) => {
                tracing::debug!(dir = %dir.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Resolve relative directories, and a relative custom tool path, against `base`.
    ///
    /// A bare program name such as `find-ref` is still looked up on `PATH`.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        self.images = base.join(&self.images);
        self.root = base.join(&self.root);
        if let Some(ToolSpec::Custom(cmd)) = &mut self.tool {
            let program = Path::new(&cmd.program);
            if program.is_relative() && program.components().count() > 1 {
                cmd.program = base.join(program).display().to_string();
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.search_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "search_timeout must be greater than zero".to_string(),
            ));
        }
        if self.images.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("images cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn target(&self) -> PruneTarget {
        PruneTarget::new(&self.images, &self.root).extensions(&self.extensions)
    }

    /// Build the external searcher, auto-detecting a tool when none is set.
    ///
    /// Fails before any image is touched if the program is not on `PATH`.
    pub fn searcher(&self) -> Result<CommandSearcher> {
        let spec = match &self.tool {
            Some(spec) => spec.clone(),
            None => detect_tool().map(ToolSpec::from).ok_or_else(|| {
                Error::SearchToolNotFound("none of ag, rg or grep is on PATH".to_string())
            })?,
        };

        let command = spec.command();
        let program = command.program.clone();
        let searcher = CommandSearcher::new(command)
            .map_err(|e| Error::SearchToolNotFound(format!("{}: {}", program, e)))?;
        tracing::debug!(%program, "using search tool");

        Ok(searcher.timeout(self.search_timeout))
    }
}

// ABOUTME: Search tool presets, custom command templates, and PATH detection.
// ABOUTME: Supports ag, rg, grep, or any program with {pattern}/{root} placeholders.

use serde::Deserialize;
use serde::de::{self, Deserializer};
use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const PATTERN_VAR: &str = "{pattern}";
const ROOT_VAR: &str = "{root}";

/// Built-in search tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTool {
    /// The Silver Searcher.
    Ag,
    /// ripgrep.
    Rg,
    /// POSIX grep with GNU/BSD recursive extensions.
    Grep,
}

impl SearchTool {
    /// Auto-detection order when no tool is configured.
    pub const DETECTION_ORDER: [SearchTool; 3] = [SearchTool::Ag, SearchTool::Rg, SearchTool::Grep];

    pub fn program(&self) -> &'static str {
        match self {
            SearchTool::Ag => "ag",
            SearchTool::Rg => "rg",
            SearchTool::Grep => "grep",
        }
    }

    /// Command template for this preset. All three report 0 on a match and
    /// 1 when nothing matched. `--` keeps dash-leading names out of option
    /// parsing. `grep -I` skips binary files.
    pub fn command(&self) -> SearchCommand {
        let args: &[&str] = match self {
            SearchTool::Ag => &["-c", "-Q", "--", PATTERN_VAR, ROOT_VAR],
            SearchTool::Rg => &["-c", "-F", "--", PATTERN_VAR, ROOT_VAR],
            SearchTool::Grep => &["-r", "-c", "-F", "-I", "--", PATTERN_VAR, ROOT_VAR],
        };
        SearchCommand {
            program: self.program().to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl FromStr for SearchTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ag" => Ok(SearchTool::Ag),
            "rg" | "ripgrep" => Ok(SearchTool::Rg),
            "grep" => Ok(SearchTool::Grep),
            _ => Err(format!("unknown search tool: {} (expected ag, rg or grep)", s)),
        }
    }
}

impl fmt::Display for SearchTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

impl<'de> Deserialize<'de> for SearchTool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// An external program plus argument template.
///
/// `{pattern}` and `{root}` in any argument are replaced per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl SearchCommand {
    /// Substitute placeholders. An argument that is exactly `{root}` is
    /// passed through as the raw OS path.
    pub fn resolve_args(&self, pattern: &str, root: &Path) -> Vec<OsString> {
        let root_display = root.display().to_string();
        self.args
            .iter()
            .map(|arg| {
                if arg == ROOT_VAR {
                    root.as_os_str().to_owned()
                } else {
                    OsString::from(substitute(arg, pattern, &root_display))
                }
            })
            .collect()
    }

    /// Shell-like rendering of one invocation, for the console.
    pub fn describe(&self, pattern: &str, root: &Path) -> String {
        let root_display = root.display().to_string();
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            let resolved = substitute(arg, pattern, &root_display);
            if arg.contains(PATTERN_VAR) {
                line.push_str(&format!("'{}'", resolved));
            } else {
                line.push_str(&resolved);
            }
        }
        line
    }
}

/// Replace `{pattern}` and `{root}` in one left-to-right pass, so text
/// coming from one placeholder is never expanded again.
fn substitute(arg: &str, pattern: &str, root: &str) -> String {
    let mut out = String::with_capacity(arg.len());
    let mut rest = arg;
    while let Some(i) = rest.find('{') {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        if let Some(after) = tail.strip_prefix(PATTERN_VAR) {
            out.push_str(pattern);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(ROOT_VAR) {
            out.push_str(root);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Tool selection as written in the config file: a preset name or a custom command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ToolSpec {
    Preset(SearchTool),
    Custom(SearchCommand),
}

impl ToolSpec {
    pub fn command(&self) -> SearchCommand {
        match self {
            ToolSpec::Preset(tool) => tool.command(),
            ToolSpec::Custom(cmd) => cmd.clone(),
        }
    }
}

impl From<SearchTool> for ToolSpec {
    fn from(tool: SearchTool) -> Self {
        ToolSpec::Preset(tool)
    }
}

/// Find the first preset available on `PATH`.
pub fn detect_tool() -> Option<SearchTool> {
    SearchTool::DETECTION_ORDER
        .into_iter()
        .find(|tool| which::which(tool.program()).is_ok())
}

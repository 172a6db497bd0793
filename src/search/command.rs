// ABOUTME: TextSearcher backed by an external search program.
// ABOUTME: Maps exit status 0/1 to found/not found and everything else to SearchError.

use async_trait::async_trait;
use snafu::ResultExt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;

use super::error::{ExitSnafu, SearchError, SignalSnafu, SpawnSnafu, TimeoutSnafu};
use super::tool::SearchCommand;
use super::TextSearcher;

pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs one external process per search.
#[derive(Debug, Clone)]
pub struct CommandSearcher {
    command: SearchCommand,
    executable: PathBuf,
    timeout: Duration,
}

impl CommandSearcher {
    /// Create a searcher, resolving the program on `PATH`.
    ///
    /// Fails if the program cannot be found, so no file is touched when the
    /// tool is missing.
    pub fn new(command: SearchCommand) -> Result<Self, which::Error> {
        let executable = which::which(&command.program)?;
        Ok(Self {
            command,
            executable,
            timeout: DEFAULT_SEARCH_TIMEOUT,
        })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Interpret a search tool's exit status.
pub fn classify_status(
    program: &str,
    status: ExitStatus,
    stderr: &[u8],
) -> Result<bool, SearchError> {
    match status.code() {
        Some(0) => Ok(true),
        Some(1) => Ok(false),
        Some(code) => ExitSnafu {
            program,
            code,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
        .fail(),
        None => SignalSnafu { program }.fail(),
    }
}

#[async_trait]
impl TextSearcher for CommandSearcher {
    async fn has_match(&self, pattern: &str, root: &Path) -> Result<bool, SearchError> {
        let program = self.command.program.as_str();
        let args = self.command.resolve_args(pattern, root);

        let mut cmd = Command::new(&self.executable);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                TimeoutSnafu {
                    program,
                    timeout: self.timeout,
                }
                .build()
            })?
            .context(SpawnSnafu { program })?;

        classify_status(program, output.status, &output.stderr)
    }

    fn describe(&self, pattern: &str, root: &Path) -> String {
        self.command.describe(pattern, root)
    }
}

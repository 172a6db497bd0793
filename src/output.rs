// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with one line per search
    Normal,
    /// Minimal output for CI (unused files and final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Echo a search invocation before it runs.
    pub fn search(&self, command_line: &str, path: &Path) {
        match self.mode {
            OutputMode::Normal => println!("{command_line}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit_stdout("search", command_line, Some(path)),
        }
    }

    /// Report an image with no references.
    pub fn unused(&self, path: &Path) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{} unused", path.display()),
            OutputMode::Json => self.emit_stdout("unused", "unused", Some(path)),
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(&self.event("warning", message, None)) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{message}");
            }
            OutputMode::Json => self.emit_stdout("success", message, None),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(&self.event("error", message, None)) {
                    eprintln!("{json}");
                }
            }
        }
    }

    fn emit_stdout(&self, event: &str, message: &str, path: Option<&Path>) {
        if let Ok(json) = serde_json::to_string(&self.event(event, message, path)) {
            println!("{json}");
        }
    }

    fn event<'a>(&self, event: &'a str, message: &'a str, path: Option<&'a Path>) -> JsonEvent<'a> {
        JsonEvent {
            event,
            message,
            path,
            duration_secs: if self.start_time.is_some() {
                Some(self.elapsed_secs())
            } else {
                None
            },
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_zero_without_timer() {
        let output = Output::new(OutputMode::Quiet);
        assert_eq!(output.elapsed_secs(), 0.0);
    }

    #[test]
    fn json_event_omits_missing_fields() {
        let output = Output::new(OutputMode::Json);
        let json = serde_json::to_string(&output.event("success", "done", None)).unwrap();
        assert_eq!(json, r#"{"event":"success","message":"done"}"#);
    }

    #[test]
    fn json_event_includes_path() {
        let output = Output::new(OutputMode::Json);
        let path = Path::new("docs/img/a.png");
        let json = serde_json::to_string(&output.event("unused", "unused", Some(path))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["path"], "docs/img/a.png");
        assert_eq!(value["event"], "unused");
    }
}

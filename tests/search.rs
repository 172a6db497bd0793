// ABOUTME: Integration tests for the external-command searcher.
// ABOUTME: Uses real grep plus shell-script fake tools to exercise exit-status handling.

#![cfg(unix)]

use imgprune::search::{
    CommandSearcher, SearchCommand, SearchErrorKind, SearchTool, TextSearcher,
};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

fn create_tool(dir: &TempDir, name: &str, script: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, script).unwrap();

    // Make executable
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn custom(program: &Path) -> CommandSearcher {
    CommandSearcher::new(SearchCommand {
        program: program.display().to_string(),
        args: vec!["{pattern}".to_string(), "{root}".to_string()],
    })
    .unwrap()
}

#[tokio::test]
async fn grep_finds_literal_name() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README.md"), "![logo](docs/img/logo.png)\n").unwrap();

    let grep = CommandSearcher::new(SearchTool::Grep.command()).unwrap();
    assert!(grep.has_match("logo.png", temp.path()).await.unwrap());
    assert!(!grep.has_match("banner.png", temp.path()).await.unwrap());
}

#[tokio::test]
async fn grep_searches_recursively() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("docs/guide/deep")).unwrap();
    fs::write(
        temp.path().join("docs/guide/deep/page.md"),
        "<img src=\"chart.svg\">\n",
    )
    .unwrap();

    let grep = CommandSearcher::new(SearchTool::Grep.command()).unwrap();
    assert!(grep.has_match("chart.svg", temp.path()).await.unwrap());
}

#[tokio::test]
async fn grep_handles_dash_leading_names() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("page.md"), "see -wide.png\n").unwrap();

    let grep = CommandSearcher::new(SearchTool::Grep.command()).unwrap();
    assert!(grep.has_match("-wide.png", temp.path()).await.unwrap());
}

#[tokio::test]
async fn ag_handles_dash_leading_names() {
    // ag is optional on build machines
    let Ok(ag) = CommandSearcher::new(SearchTool::Ag.command()) else {
        return;
    };
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("page.md"), "see -logo.png\n").unwrap();

    assert!(ag.has_match("-logo.png", temp.path()).await.unwrap());
    assert!(!ag.has_match("-lost.png", temp.path()).await.unwrap());
}

#[tokio::test]
async fn placeholders_are_passed_to_custom_tool() {
    let temp = TempDir::new().unwrap();
    let tool = create_tool(
        &temp,
        "find-ref",
        "#!/bin/sh\n[ \"$1\" = \"a.png\" ] && [ -d \"$2\" ] && exit 0\nexit 1\n",
    );

    let searcher = custom(&tool);
    assert!(searcher.has_match("a.png", temp.path()).await.unwrap());
    assert!(!searcher.has_match("b.png", temp.path()).await.unwrap());
}

#[tokio::test]
async fn status_two_is_a_tool_error_with_stderr() {
    let temp = TempDir::new().unwrap();
    let tool = create_tool(
        &temp,
        "broken",
        "#!/bin/sh\necho 'ERR: cannot read tree' >&2\nexit 2\n",
    );

    let err = custom(&tool)
        .has_match("a.png", temp.path())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), SearchErrorKind::ToolError);
    assert_eq!(err.exit_code(), Some(2));
    assert!(err.to_string().contains("cannot read tree"));
}

#[tokio::test]
async fn slow_tool_times_out() {
    let temp = TempDir::new().unwrap();
    let tool = create_tool(&temp, "slow", "#!/bin/sh\nsleep 5\nexit 0\n");

    let err = custom(&tool)
        .timeout(Duration::from_millis(100))
        .has_match("a.png", temp.path())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), SearchErrorKind::Timeout);
}

#[tokio::test]
async fn unrunnable_tool_is_a_spawn_error() {
    let temp = TempDir::new().unwrap();
    // Executable bit set but no valid interpreter line
    let tool = create_tool(&temp, "garbage", "#!/nonexistent/interpreter\n");

    let err = custom(&tool)
        .has_match("a.png", temp.path())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), SearchErrorKind::Spawn);
}

#[test]
fn describe_echoes_the_invocation() {
    let grep = CommandSearcher::new(SearchTool::Grep.command()).unwrap();
    assert_eq!(
        grep.describe("a.png", Path::new(".")),
        "grep -r -c -F -I -- 'a.png' ."
    );
}

//! End-to-end tests for the `pillar` binary using `--replay` with saved responses, so no
//! network or API key is needed.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../pillar/tests/fixtures")
        .join(name)
}

/// Runs the binary in `dir` with an environment that cannot pick up a real key or config.
fn run_pillar(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pillar"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("PILLAR_MODEL")
        .env_remove("LOG_FILE")
        .output()
        .expect("failed to run pillar binary")
}

fn replay_arg() -> String {
    format!("--replay={}", fixture("generate_content.json").display())
}

#[test]
fn cli_help_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_pillar(dir.path(), &["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Pillar"));
    assert!(stdout.contains("--replay"));
    assert!(stdout.contains("--csv"));
}

#[test]
fn cli_replay_prints_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let replay = replay_arg();
    let out = run_pillar(
        dir.path(),
        &[&replay, "--sort", "difficulty", "Sustainable", "Coffee", "Farming"],
    );
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Sustainable Coffee Farming: The Complete Guide"));
    assert!(stdout.contains("HIERARCHY"));
    assert!(stdout.contains("(sorted by difficulty asc)"));
    assert!(stdout.contains("RESEARCH SOURCES"));
    assert!(stdout.contains("worldcoffeeresearch.org"));
}

#[test]
fn cli_replay_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let replay = replay_arg();
    let out = run_pillar(dir.path(), &[&replay, "--json", "coffee"]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout is JSON");
    assert_eq!(v["subPillars"].as_array().map(Vec::len), Some(10));
    assert_eq!(v["sources"][2]["title"], "Source");
}

#[test]
fn cli_replay_writes_default_csv() {
    let dir = tempfile::tempdir().unwrap();
    let replay = replay_arg();
    let out = run_pillar(
        dir.path(),
        &[&replay, "--csv", "Sustainable", "Coffee", "Farming"],
    );
    assert!(out.status.success());
    let csv = std::fs::read_to_string(
        dir.path()
            .join("seo-strategy-sustainable-coffee-farming.csv"),
    )
    .expect("default csv file");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 12);
    assert!(lines[0].starts_with("Type,Topic/Keyword,Intent,Difficulty"));
    assert!(lines[1].starts_with("Core Pillar,Sustainable Coffee Farming: The Complete Guide,"));
    assert!(lines[2].starts_with("Sub-Pillar,\"coffee farm certification\",Informational,Medium,"));
}

#[test]
fn cli_replay_csv_name_stays_in_current_dir() {
    let dir = tempfile::tempdir().unwrap();
    let replay = replay_arg();
    let out = run_pillar(dir.path(), &[&replay, "--csv", "AI/ML", "Tools"]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(dir.path().join("seo-strategy-ai-ml-tools.csv").is_file());
}

#[test]
fn cli_replay_without_payload_fails() {
    let dir = tempfile::tempdir().unwrap();
    let replay = format!("--replay={}", fixture("no_payload.json").display());
    let out = run_pillar(dir.path(), &[&replay, "coffee"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("could not parse structured data"));
}

#[test]
fn cli_without_api_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_pillar(dir.path(), &["coffee"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("GEMINI_API_KEY"), "stderr: {}", stderr);
}

#[test]
fn cli_without_topic_fails() {
    let dir = tempfile::tempdir().unwrap();
    let replay = replay_arg();
    let out = run_pillar(dir.path(), &[&replay]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("topic is required"));
}

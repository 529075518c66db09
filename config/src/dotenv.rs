//! Parse a project `.env` file into a key-value map. Nothing is applied here; see `load_and_apply`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `.env` in `override_dir` if given, else in the current directory; `None` when absent.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = match override_dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().ok()?,
    };
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Strips one pair of matching surrounding quotes. Double quotes unescape `\"`; single quotes
/// are literal.
fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return value[1..value.len() - 1].replace("\\\"", "\"");
    }
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return value[1..value.len() - 1].to_string();
    }
    value.to_string()
}

/// One `KEY=VALUE` line. Blank lines, `#` comments and lines without `=` yield `None`.
/// An optional leading `export ` is accepted so shell-style files work unchanged.
fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (k, v) = line.split_once('=')?;
    let key = k.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(v.trim())))
}

fn parse_dotenv(content: &str) -> HashMap<String, String> {
    content.lines().filter_map(parse_line).collect()
}

/// Load `.env` from `override_dir` or the current directory. Missing file returns an empty map.
pub fn load_env_map(override_dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    let Some(path) = dotenv_path(override_dir) else {
        return Ok(HashMap::new());
    };
    let content = std::fs::read_to_string(&path)?;
    Ok(parse_dotenv(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_key_and_model() {
        let m = parse_dotenv("GEMINI_API_KEY=abc123\nPILLAR_MODEL=gemini-2.5-flash\n");
        assert_eq!(m.get("GEMINI_API_KEY").map(String::as_str), Some("abc123"));
        assert_eq!(
            m.get("PILLAR_MODEL").map(String::as_str),
            Some("gemini-2.5-flash")
        );
    }

    #[test]
    fn skips_comments_blank_and_malformed_lines() {
        let m = parse_dotenv("\n# key below\nNO_EQUALS\n=orphan\nKEY=val\n   \n");
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("KEY").map(String::as_str), Some("val"));
    }

    #[test]
    fn export_prefix_is_accepted() {
        let m = parse_dotenv("export API_KEY=xyz");
        assert_eq!(m.get("API_KEY").map(String::as_str), Some("xyz"));
    }

    #[test]
    fn quoted_values_are_unwrapped() {
        let m = parse_dotenv("A=\"hello world\"\nB='single # kept'\nC=\"say \\\"hi\\\"\"\nD=\"\"\n");
        assert_eq!(m.get("A").map(String::as_str), Some("hello world"));
        assert_eq!(m.get("B").map(String::as_str), Some("single # kept"));
        assert_eq!(m.get("C").map(String::as_str), Some("say \"hi\""));
        assert_eq!(m.get("D").map(String::as_str), Some(""));
    }

    #[test]
    fn lone_quote_is_kept_verbatim() {
        let m = parse_dotenv("Q=\"");
        assert_eq!(m.get("Q").map(String::as_str), Some("\""));
    }

    #[test]
    fn missing_file_returns_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_map(Some(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn reads_file_from_override_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "GEMINI_BASE_URL=http://localhost:9\n").unwrap();
        let m = load_env_map(Some(dir.path())).unwrap();
        assert_eq!(
            m.get("GEMINI_BASE_URL").map(String::as_str),
            Some("http://localhost:9")
        );
    }
}

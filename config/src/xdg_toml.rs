//! Load `$XDG_CONFIG_HOME/<app>/config.toml`: the raw `[env]` table plus the typed `[gemini]`
//! table, flattened into env keys.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::LoadError;

/// Env key for the Gemini API key.
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
/// Env key for the Gemini model id.
pub const ENV_MODEL: &str = "PILLAR_MODEL";
/// Env key for the Gemini API base URL.
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";

/// Resolves the config file path for `app_name`. `XDG_CONFIG_HOME` wins when set, otherwise
/// the platform config dir.
pub fn config_file_path(app_name: &str) -> Result<PathBuf, LoadError> {
    let base = match std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::config_dir()
            .ok_or_else(|| LoadError::XdgPath("no config directory for this platform".into()))?,
    };
    Ok(base.join(app_name).join("config.toml"))
}

#[derive(Deserialize, Default)]
struct GeminiTable {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
    #[serde(default)]
    gemini: GeminiTable,
}

impl ConfigFile {
    /// `[gemini]` entries override same-named keys from `[env]`.
    fn into_env_map(self) -> HashMap<String, String> {
        let mut map = self.env;
        let typed = [
            (ENV_API_KEY, self.gemini.api_key),
            (ENV_MODEL, self.gemini.model),
            (ENV_BASE_URL, self.gemini.base_url),
        ];
        for (key, value) in typed {
            if let Some(v) = value {
                map.insert(key.to_string(), v);
            }
        }
        map
    }
}

/// Returns env key-value pairs from the config file. Missing file returns an empty map.
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let path = config_file_path(app_name)?;
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config.into_env_map())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ENV_LOCK;
    use std::env;

    fn with_xdg<T>(body: &str, app: &str, f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join(app);
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), body).unwrap();

        let prev = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", dir.path());
        let out = f();
        match prev {
            Some(p) => env::set_var("XDG_CONFIG_HOME", p),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
        out
    }

    #[test]
    fn gemini_table_flattens_to_env_keys() {
        let map = with_xdg(
            "[gemini]\napi_key = \"k\"\nmodel = \"m\"\nbase_url = \"http://x\"\n",
            "flatten",
            || load_env_map("flatten").unwrap(),
        );
        assert_eq!(map.get(ENV_API_KEY).map(String::as_str), Some("k"));
        assert_eq!(map.get(ENV_MODEL).map(String::as_str), Some("m"));
        assert_eq!(map.get(ENV_BASE_URL).map(String::as_str), Some("http://x"));
    }

    #[test]
    fn gemini_table_overrides_raw_env_entry() {
        let map = with_xdg(
            "[env]\nPILLAR_MODEL = \"raw\"\nRUST_LOG = \"debug\"\n\n[gemini]\nmodel = \"typed\"\n",
            "override",
            || load_env_map("override").unwrap(),
        );
        assert_eq!(map.get(ENV_MODEL).map(String::as_str), Some("typed"));
        assert_eq!(map.get("RUST_LOG").map(String::as_str), Some("debug"));
    }

    #[test]
    fn unrelated_sections_yield_empty_map() {
        let map = with_xdg("[other]\nkey = \"ignored\"\n", "noenv", || {
            load_env_map("noenv").unwrap()
        });
        assert!(map.is_empty());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let result = with_xdg("not valid toml [[[\n", "badapp", || load_env_map("badapp"));
        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }

    #[test]
    fn missing_file_returns_empty_map() {
        let map = load_env_map("pillar-config-test-nonexistent-12345").unwrap();
        assert!(map.is_empty());
    }
}

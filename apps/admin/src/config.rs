use std::{fs, path::Path};

use anyhow::Context;
use client_core::DEFAULT_BASE_URL;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub log_filter: String,
    pub require_language: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.into(),
            log_filter: "info".into(),
            require_language: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    log_filter: Option<String>,
    require_language: Option<bool>,
}

/// Defaults, then `config_path` (if present), then environment, then the
/// `--api-url` flag.
pub fn load_settings(config_path: &Path, api_url_flag: Option<&str>) -> anyhow::Result<Settings> {
    let file_contents = match fs::read_to_string(config_path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| {
                format!("failed to read config file '{}'", config_path.display())
            })
        }
    };

    let settings = resolve_settings(
        file_contents.as_deref(),
        |key| std::env::var(key).ok(),
        api_url_flag,
    )
    .with_context(|| format!("invalid settings (config file '{}')", config_path.display()))?;
    Ok(settings)
}

fn resolve_settings(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    api_url_flag: Option<&str>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file_cfg: FileSettings = toml::from_str(raw).context("malformed TOML")?;
        if let Some(v) = file_cfg.api_base_url {
            settings.api_base_url = v;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
        if let Some(v) = file_cfg.require_language {
            settings.require_language = v;
        }
    }

    if let Some(v) = env("API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__REQUIRE_LANGUAGE") {
        settings.require_language = parse_flag(&v)
            .with_context(|| format!("APP__REQUIRE_LANGUAGE must be true or false, got '{v}'"))?;
    }

    if let Some(v) = api_url_flag {
        settings.api_base_url = v.to_string();
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
    Ok(settings)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Settings::default().api_base_url);
    }

    let url = Url::parse(raw).with_context(|| format!("api_base_url '{raw}' is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("api_base_url '{raw}' must use http or https");
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_directory() {
        let settings = resolve_settings(None, env_from(&[]), None).expect("settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api_base_url, "http://localhost:5000");
    }

    #[test]
    fn file_then_env_then_flag() {
        let file = r#"
            api_base_url = "http://directory.internal:8080/"
            log_filter = "debug"
            require_language = true
        "#;

        let from_file = resolve_settings(Some(file), env_from(&[]), None).expect("file");
        assert_eq!(from_file.api_base_url, "http://directory.internal:8080");
        assert_eq!(from_file.log_filter, "debug");
        assert!(from_file.require_language);

        let env = env_from(&[
            ("API_BASE_URL", "http://legacy:5000"),
            ("APP__API_BASE_URL", "https://directory.example.com"),
            ("APP__REQUIRE_LANGUAGE", "off"),
        ]);
        let from_env = resolve_settings(Some(file), env, None).expect("env");
        assert_eq!(from_env.api_base_url, "https://directory.example.com");
        assert!(!from_env.require_language);

        let from_flag = resolve_settings(
            Some(file),
            env_from(&[("APP__API_BASE_URL", "https://directory.example.com")]),
            Some("http://127.0.0.1:9000"),
        )
        .expect("flag");
        assert_eq!(from_flag.api_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(resolve_settings(None, env_from(&[]), Some("ftp://files")).is_err());
        assert!(resolve_settings(None, env_from(&[]), Some("::nope")).is_err());
        assert!(resolve_settings(Some("api_base_url = 5"), env_from(&[]), None).is_err());
        assert!(
            resolve_settings(None, env_from(&[("APP__REQUIRE_LANGUAGE", "maybe")]), None).is_err()
        );
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let settings =
            resolve_settings(None, env_from(&[("APP__API_BASE_URL", "  ")]), None).expect("ok");
        assert_eq!(settings.api_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_config_file_is_not_an_error() {
        let path = std::env::temp_dir().join("customer_admin_missing_config_for_test.toml");
        let _ = fs::remove_file(&path);
        let settings = load_settings(&path, Some("http://localhost:7000")).expect("settings");
        assert_eq!(settings.api_base_url, "http://localhost:7000");
    }
}

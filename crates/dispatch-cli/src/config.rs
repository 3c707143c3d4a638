//! Service configuration – reads `~/.dispatch/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dispatch_server::DEFAULT_PORT;
use dispatch_source::DEFAULT_ROBOTS_URL;
use dispatch_types::DEFAULT_WITHIN_DISTANCE;

/// Where the robot listing comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Remote JSON listing at `robots_url`.
    #[default]
    Http,
    /// The built-in 100-robot fixture.
    Fixture,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Http => write!(f, "http"),
            SourceKind::Fixture => write!(f, "fixture"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(SourceKind::Http),
            "fixture" => Ok(SourceKind::Fixture),
            other => Err(format!("unknown robot source {other:?}")),
        }
    }
}

/// Settings for `dispatchd`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP port the move endpoint listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Robot listing endpoint used when `source = "http"`.
    #[serde(default = "default_robots_url")]
    pub robots_url: String,

    #[serde(default)]
    pub source: SourceKind,

    /// Threshold applied when a request omits `withinDistance`.
    #[serde(default = "default_within_distance")]
    pub within_distance: f64,

    /// Upper bound on a single robot-listing fetch.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_robots_url() -> String {
    DEFAULT_ROBOTS_URL.to_string()
}
fn default_within_distance() -> f64 {
    DEFAULT_WITHIN_DISTANCE
}
fn default_fetch_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            robots_url: default_robots_url(),
            source: SourceKind::default(),
            within_distance: default_within_distance(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl Config {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.within_distance.is_nan() || self.within_distance < 0.0 {
            return Err(format!(
                "within_distance must be a non-negative number, got {}",
                self.within_distance
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Return the config path: `$DISPATCH_CONFIG`, else `~/.dispatch/config.toml`.
pub fn config_path() -> PathBuf {
    if let Ok(p) = std::env::var("DISPATCH_CONFIG") {
        return PathBuf::from(p);
    }
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".dispatch").join("config.toml")
}

/// Load the config from disk with environment overrides applied.  A missing
/// file yields the defaults.
pub fn load() -> Result<Config, String> {
    let mut cfg = load_from(&config_path())?.unwrap_or_default();
    apply_env_overrides(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}

/// Load the config file at `path` as written.  Returns `None` if the file
/// does not exist.
pub(crate) fn load_from(path: &Path) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let cfg: Config =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))?;
    Ok(Some(cfg))
}

/// Apply `DISPATCH_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `DISPATCH_PORT` | `port` |
/// | `DISPATCH_ROBOTS_URL` | `robots_url` |
/// | `DISPATCH_SOURCE` | `source` |
/// | `DISPATCH_WITHIN_DISTANCE` | `within_distance` |
/// | `DISPATCH_FETCH_TIMEOUT_SECS` | `fetch_timeout_secs` |
///
/// Values that do not parse are ignored.
pub fn apply_env_overrides(cfg: &mut Config) {
    apply_overrides_from(cfg, |key| std::env::var(key).ok());
}

fn apply_overrides_from(cfg: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(port) = lookup("DISPATCH_PORT").and_then(|v| v.parse().ok()) {
        cfg.port = port;
    }
    if let Some(url) = lookup("DISPATCH_ROBOTS_URL") {
        cfg.robots_url = url;
    }
    if let Some(source) = lookup("DISPATCH_SOURCE").and_then(|v| v.parse().ok()) {
        cfg.source = source;
    }
    if let Some(d) = lookup("DISPATCH_WITHIN_DISTANCE").and_then(|v| v.parse().ok()) {
        cfg.within_distance = d;
    }
    if let Some(secs) = lookup("DISPATCH_FETCH_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        cfg.fetch_timeout_secs = secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn config_path_points_to_dispatch_dir() {
        let p = config_path_for_home("/home/testuser");
        assert!(p.to_string_lossy().contains(".dispatch"));
        assert!(p.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn load_from_returns_none_when_missing() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        assert!(load_from(&path).expect("no error").is_none());
    }

    #[test]
    fn load_from_fills_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = 9000\nsource = \"fixture\"\n").expect("write");

        let cfg = load_from(&path).expect("load ok").expect("some");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.source, SourceKind::Fixture);
        assert_eq!(cfg.robots_url, DEFAULT_ROBOTS_URL);
        assert_eq!(cfg.within_distance, DEFAULT_WITHIN_DISTANCE);
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = \"eighty\"\n").expect("write");
        let err = load_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse config"));
    }

    #[test]
    fn roundtrip_through_toml() {
        let cfg = Config {
            within_distance: 12.5,
            ..Config::default()
        };
        let raw = toml::to_string_pretty(&cfg).expect("serialize");
        let back: Config = toml::from_str(&raw).expect("parse");
        assert_eq!(back, cfg);
    }

    #[test]
    fn overrides_apply() {
        let mut cfg = Config::default();
        apply_overrides_from(
            &mut cfg,
            overrides(&[
                ("DISPATCH_PORT", "9999"),
                ("DISPATCH_ROBOTS_URL", "http://fleet:8000/robots"),
                ("DISPATCH_SOURCE", "Fixture"),
                ("DISPATCH_WITHIN_DISTANCE", "2.5"),
                ("DISPATCH_FETCH_TIMEOUT_SECS", "3"),
            ]),
        );
        assert_eq!(cfg.port, 9999);
        assert_eq!(cfg.robots_url, "http://fleet:8000/robots");
        assert_eq!(cfg.source, SourceKind::Fixture);
        assert_eq!(cfg.within_distance, 2.5);
        assert_eq!(cfg.fetch_timeout_secs, 3);
    }

    #[test]
    fn unparseable_overrides_are_ignored() {
        let mut cfg = Config::default();
        apply_overrides_from(
            &mut cfg,
            overrides(&[
                ("DISPATCH_PORT", "not-a-port"),
                ("DISPATCH_SOURCE", "carrier-pigeon"),
                ("DISPATCH_WITHIN_DISTANCE", "far"),
            ]),
        );
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn validate_rejects_negative_threshold() {
        let cfg = Config {
            within_distance: -1.0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let cfg = Config {
            fetch_timeout_secs: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }
}

use std::path::{Path, PathBuf};

use super::types::AppConfig;

pub const CONFIG_ENV: &str = "BROWSERACT_CONFIG";
pub const API_KEY_ENV: &str = "BROWSERACT_API_KEY";
pub const BASE_URL_ENV: &str = "BROWSERACT_BASE_URL";
pub const LOG_LEVEL_ENV: &str = "BROWSERACT_LOG_LEVEL";

/// Get the default data directory: ~/.browseract
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".browseract"))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read config {}: {}", path.display(), e))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("parse config {}: {}", path.display(), e))?;
    Ok(cfg)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: explicit path from the environment
    // Priority 2: ~/.browseract/config.toml
    // Priority 3: ./config.toml
    let explicit = std::env::var(CONFIG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);
    let home_config = get_data_dir().ok().map(|d| d.join("config.toml"));
    let local_config = PathBuf::from("config.toml");

    let mut cfg = if let Some(path) = explicit {
        load_from_path(&path)?
    } else if let Some(path) = home_config.filter(|p| p.exists()) {
        load_from_path(&path)?
    } else if local_config.exists() {
        load_from_path(&local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |name| std::env::var(name).ok());
    Ok(cfg)
}

/// Environment variable overrides (highest priority after CLI flags).
pub fn apply_env_overrides(cfg: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty(API_KEY_ENV) {
        cfg.api.api_key = v;
    }
    if let Some(v) = non_empty(BASE_URL_ENV) {
        cfg.api.base_url = v;
    }
    if let Some(v) = non_empty(LOG_LEVEL_ENV) {
        cfg.logging.level = v;
    }
}

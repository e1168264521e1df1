use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Default data directory: ~/.dhubdump
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".dhubdump"))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    let cfg = toml::from_str::<AppConfig>(&s)?;
    Ok(cfg)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.dhubdump/config.toml (highest)
    let user_config = get_data_dir()?.join("config.toml");

    // Priority 2: ./dhubdump.toml (current directory)
    let local_config = Path::new("dhubdump.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |name| std::env::var(name).ok());
    Ok(cfg)
}

fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("DHUBDUMP_BASE_URL") {
        cfg.api.base_url = v;
    }
    if let Some(v) = non_empty("DHUBDUMP_CLIENT_ID") {
        cfg.api.client_id = Some(v);
    }
    if let Some(v) = non_empty("DHUBDUMP_SECRET") {
        cfg.api.secret = Some(v);
    }
}

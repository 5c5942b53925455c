use crate::error::{Result, ScoreError};
use crate::types::config::ScoreConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "credscore.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".credscore/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/credscore/config.toml";
pub const GLOBAL_CONFIG_ENV: &str = "CREDSCORE_CONFIG";

pub fn load_config(root: &Path) -> Result<Option<ScoreConfig>> {
    let global = global_config_path(|key| std::env::var_os(key));
    load_config_with_global(root, global.as_deref())
}

// CREDSCORE_CONFIG names the global file directly; otherwise it lives under HOME.
fn global_config_path(var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    if let Some(path) = var(GLOBAL_CONFIG_ENV).filter(|path| !path.is_empty()) {
        return Some(PathBuf::from(path));
    }
    var("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE))
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<ScoreConfig>> {
    let project_path = root.join(DEFAULT_CONFIG_FILE);
    if !project_path.exists() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    let mut layers = Vec::new();
    let candidates = global_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain([project_path.clone(), root.join(DEFAULT_LOCAL_FILE)]);
    for path in candidates {
        if merge_file_if_exists(&mut merged, &path)? {
            layers.push(path.display().to_string());
        }
    }
    debug!(?layers, "merged config layers");

    let cfg: ScoreConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ScoreError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    info!(path = %project_path.display(), "loaded config");
    Ok(Some(cfg))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(true)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ScoreError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use rehab_client::DEFAULT_BACKEND_URL;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const BACKEND_URL_ENV: &str = "REHAB_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RehabConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub backend_url: String,
    pub created_at: jiff::Timestamp,
}

impl RehabConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            backend_url: backend_url.into(),
            created_at: jiff::Timestamp::now(),
        }
    }
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("rehab"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config from the platform directory, if one has been saved.
pub fn load_config() -> eyre::Result<Option<RehabConfig>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(None);
    }
    load_config_from(&path).map(Some)
}

pub fn load_config_from(path: &Path) -> eyre::Result<RehabConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: RehabConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Refuse configs written by a newer build. Files without a version predate
/// versioning and share the v1 shape.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update rehab."
        ));
    }

    if from_version < CURRENT_VERSION {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(CURRENT_VERSION.into()),
        );
    }

    Ok(json)
}

pub fn save_config(config: &RehabConfig) -> eyre::Result<PathBuf> {
    save_config_to(&config_dir()?, config)
}

pub fn save_config_to(dir: &Path, config: &RehabConfig) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(path)
}

pub fn delete_config() -> eyre::Result<()> {
    let path = config_path()?;
    if path.exists() {
        std::fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}

/// Backend URL by precedence: flag, environment, config file, default.
pub fn resolve_backend_url(
    flag: Option<&str>,
    env: Option<&str>,
    config: Option<&RehabConfig>,
) -> String {
    [flag, env]
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty())
        .map(str::to_string)
        .or_else(|| config.map(|c| c.backend_url.clone()))
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
}

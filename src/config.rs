use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_SESSION_PATH: &str = "~/.meetings/session.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionFileConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionFileConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub download_dir: String,
}

impl Config {
    /// Load configuration from defaults, an optional file and `MEETINGS__*`
    /// environment variables, in increasing order of precedence.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("session.path", DEFAULT_SESSION_PATH)?
            .set_default("export.download_dir", ".")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("MEETINGS").separator("__"))
            .build()
            .with_context(|| format!("Failed to read config from {}", path))?;

        let mut cfg: Config = settings.try_deserialize()?;
        cfg.api.base_url = normalize_base_url(&cfg.api.base_url);
        Ok(cfg)
    }

    /// Session file path with `~` and environment variables expanded
    pub fn session_path(&self) -> Result<PathBuf> {
        expand_path(&self.session.path)
    }

    pub fn download_dir(&self) -> Result<PathBuf> {
        expand_path(&self.export.download_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            session: SessionFileConfig {
                path: DEFAULT_SESSION_PATH.to_string(),
            },
            export: ExportConfig {
                download_dir: ".".to_string(),
            },
        }
    }
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).with_context(|| format!("Cannot expand path {}", raw))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

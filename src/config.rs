use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app_dirs::AppDirs;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the screening backend, without the `/app/...` path.
    pub server_url: String,
    /// Value sent in the `X-CSRFToken` header.
    pub csrf_token: Option<String>,
    /// Session cookie of a logged-in candidate.
    pub session_id: Option<String>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            csrf_token: None,
            session_id: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Apply command line values on top of the stored ones.
    pub fn with_overrides(
        mut self,
        server_url: Option<String>,
        csrf_token: Option<String>,
        session_id: Option<String>,
    ) -> Self {
        if let Some(url) = server_url {
            self.server_url = url;
        }
        if csrf_token.is_some() {
            self.csrf_token = csrf_token;
        }
        if session_id.is_some() {
            self.session_id = session_id;
        }
        self
    }

    /// Where a successful submission sends the candidate next.
    pub fn dashboard_url(&self) -> String {
        format!("{}/app/", self.server_url.trim_end_matches('/'))
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("fitquiz_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing files give the defaults; unreadable ones are logged and ignored.
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring malformed config file");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

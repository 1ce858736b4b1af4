use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Browser-like User-Agent; the host rejects obvious non-browser clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36";

/// Chunk size for streaming the media body to disk.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Global configuration loaded from `~/.config/doodl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoodlConfig {
    /// User-Agent sent on every request (set once on the HTTP client).
    pub user_agent: String,
    /// TCP/TLS connect timeout in seconds. Applies to all requests.
    pub connect_timeout_secs: u64,
    /// Total timeout in seconds for the embed page and pass_md5 GETs.
    /// The media GET never has a read timeout.
    pub page_timeout_secs: u64,
    /// Bytes per write when streaming the media body.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Extension appended to the title when the filename is derived.
    #[serde(default = "default_extension")]
    pub file_extension: String,
    /// Render a progress bar in the CLI.
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_extension() -> String {
    "mp4".to_string()
}

fn default_show_progress() -> bool {
    true
}

impl Default for DoodlConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_secs: 15,
            page_timeout_secs: 30,
            chunk_size: DEFAULT_CHUNK_SIZE,
            file_extension: default_extension(),
            show_progress: true,
        }
    }
}

impl DoodlConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("doodl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DoodlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DoodlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: DoodlConfig = toml::from_str(&data)?;
    Ok(cfg)
}

use anyhow::Context;
use serde::Deserialize;
use simplelog::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use std::{env, fs};

use carthing::artwork::DEFAULT_ARTWORK_PATH;
use carthing::transport::http::DEFAULT_BASE_URL;

/// Overrides `api.access_token` when set
pub const TOKEN_ENV_VAR: &str = "SPOTIFY_ACCESS_TOKEN";

const MIN_POLL_INTERVAL_MS: u64 = 200;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiConfig,
    pub poll: PollConfig,
    pub artwork: ArtworkConfig,
    pub assets: AssetsConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let mut candidates = Vec::new();

        if let Ok(current_dir) = env::current_dir() {
            candidates.push(current_dir.join("config.toml"));
            candidates.push(current_dir.join("config").join("config.toml"));
            candidates.push(current_dir.join("config").join("carthing.toml"));
        }

        if let Ok(exe) = env::current_exe() {
            if let Some(dir) = exe.parent() {
                candidates.push(dir.join("config.toml"));
                candidates.push(dir.join("config").join("config.toml"));
                candidates.push(dir.join("config").join("carthing.toml"));
            }
        }

        let mut config = Config::default();
        for path in candidates {
            if path.exists() {
                let data = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                config = Config::from_toml(&data)
                    .with_context(|| format!("Failed to parse config: {}", path.display()))?;
                break;
            }
        }

        Ok(config.with_token_override(env::var(TOKEN_ENV_VAR).ok()))
    }

    pub fn from_toml(data: &str) -> anyhow::Result<Self> {
        let doc: ConfigDocument = toml::from_str(data)?;
        Config::try_from(doc)
    }

    fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
            self.api.access_token = token;
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_token: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: String::new(),
            timeout: Duration::from_millis(10_000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: carthing::poller::DEFAULT_INTERVAL,
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        self.interval
            .clamp(Duration::from_millis(MIN_POLL_INTERVAL_MS), carthing::poller::MAX_INTERVAL)
    }
}

#[derive(Debug, Clone)]
pub struct ArtworkConfig {
    pub path: PathBuf,
    pub fade: Duration,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ARTWORK_PATH),
            fade: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssetsConfig {
    /// Verified at start-up only when set
    pub icons_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub file: PathBuf,
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("carthing.log"),
            level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    api: ApiSection,
    #[serde(default)]
    poll: PollSection,
    #[serde(default)]
    artwork: ArtworkSection,
    #[serde(default)]
    assets: AssetsSection,
    #[serde(default)]
    log: LogSection,
}

impl TryFrom<ConfigDocument> for Config {
    type Error = anyhow::Error;

    fn try_from(value: ConfigDocument) -> anyhow::Result<Self> {
        let defaults = Config::default();

        let level = match value.log.level {
            Some(level) => LevelFilter::from_str(&level)
                .map_err(|_| anyhow::anyhow!("Unknown log level: {}", level))?,
            None => defaults.log.level,
        };

        Ok(Config {
            api: ApiConfig {
                base_url: value.api.base_url.unwrap_or(defaults.api.base_url),
                access_token: value.api.access_token.unwrap_or_default(),
                timeout: value
                    .api
                    .timeout_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.api.timeout),
            },
            poll: PollConfig {
                interval: value
                    .poll
                    .interval_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.poll.interval),
            },
            artwork: ArtworkConfig {
                path: value.artwork.path.unwrap_or(defaults.artwork.path),
                fade: value
                    .artwork
                    .fade_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.artwork.fade),
            },
            assets: AssetsConfig {
                icons_dir: value.assets.icons_dir,
            },
            log: LogConfig {
                file: value.log.file.unwrap_or(defaults.log.file),
                level,
            },
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct ApiSection {
    base_url: Option<String>,
    access_token: Option<String>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct PollSection {
    interval_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ArtworkSection {
    path: Option<PathBuf>,
    fade_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetsSection {
    icons_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LogSection {
    file: Option<PathBuf>,
    level: Option<String>,
}

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::AppError;
use crate::parser::DumpZone;
use crate::refresh::DEFAULT_REFRESH_INTERVAL;
use crate::snapshot::SnapshotStore;

const DEFAULT_CONFIG_PATH: &str = "/etc/airboard.conf";
const DEFAULT_DUMP_FILE: &str = "dump-01.csv";
const DEFAULT_OUI_FILE: &str = "oui.txt";
const DEFAULT_CID_FILE: &str = "cid.txt";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 12121;
const DEFAULT_LOG_LEVEL: &str = "info";

const ENV_PREFIX: &str = "AIRBOARD_";

#[derive(Debug, Clone)]
pub struct Config {
    /// airodump-ng CSV dump to watch.
    pub dump_file: PathBuf,
    pub oui_file: PathBuf,
    pub cid_file: PathBuf,
    /// Directory that contains `public/`.
    pub base_dir: PathBuf,
    pub bind_address: String,
    pub port: u16,
    pub refresh_interval: Duration,
    pub dump_zone: DumpZone,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dump_file: PathBuf::from(DEFAULT_DUMP_FILE),
            oui_file: PathBuf::from(DEFAULT_OUI_FILE),
            cid_file: PathBuf::from(DEFAULT_CID_FILE),
            base_dir: default_base_dir(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            dump_zone: DumpZone::Local,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load defaults, then the config file, then `AIRBOARD_*` environment
    /// overrides.
    ///
    /// An explicit `path` must exist. Otherwise `AIRBOARD_CONFIG` or
    /// `/etc/airboard.conf` is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut config = Config::default();

        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Config(format!("Cannot read config {:?}: {}", path, e))
                })?;
                config.apply_file(&content)?;
            }
            None => {
                let fallback = std::env::var(format!("{}CONFIG", ENV_PREFIX))
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
                if fallback.exists() {
                    let content = std::fs::read_to_string(&fallback)?;
                    config.apply_file(&content)?;
                }
            }
        }

        config.apply_env_from(std::env::vars())?;
        Ok(config)
    }

    /// Apply `key = value` lines. Blank lines and `#` comments are skipped.
    pub fn apply_file(&mut self, content: &str) -> Result<(), AppError> {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                self.apply_setting(key.trim(), value.trim())?;
            }
        }
        Ok(())
    }

    /// Apply overrides such as `AIRBOARD_PORT=8080`.
    pub fn apply_env_from<I>(&mut self, vars: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            if let Some(key) = name.strip_prefix(ENV_PREFIX) {
                if key == "CONFIG" {
                    continue;
                }
                self.apply_setting(&key.to_ascii_lowercase(), &value)?;
            }
        }
        Ok(())
    }

    fn apply_setting(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "dump_file" => self.dump_file = PathBuf::from(value),
            "oui_file" => self.oui_file = PathBuf::from(value),
            "cid_file" => self.cid_file = PathBuf::from(value),
            "base_dir" => self.base_dir = PathBuf::from(value),
            "bind_address" => self.bind_address = value.to_string(),
            "port" => {
                self.port = value
                    .parse()
                    .map_err(|_| AppError::Config(format!("Invalid port: {}", value)))?;
            }
            "refresh_interval" => {
                let secs: u64 = value.parse().map_err(|_| {
                    AppError::Config(format!("Invalid refresh_interval: {}", value))
                })?;
                self.refresh_interval = Duration::from_secs(secs);
            }
            "dump_zone" => self.dump_zone = parse_zone(value)?,
            "log_level" => self.log_level = value.to_string(),
            _ => tracing::debug!("Ignoring unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn public_dir(&self) -> PathBuf {
        self.base_dir.join("public")
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        let ip: IpAddr = self.bind_address.parse().map_err(|_| {
            AppError::Config(format!("Invalid bind_address: {}", self.bind_address))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Filter directive for `tracing_subscriber::EnvFilter`.
    pub fn tracing_filter(&self) -> &str {
        &self.log_level
    }
}

fn parse_zone(value: &str) -> Result<DumpZone, AppError> {
    match value.to_ascii_lowercase().as_str() {
        "local" => Ok(DumpZone::Local),
        "utc" => Ok(DumpZone::Utc),
        _ => Err(AppError::Config(format!("Invalid dump_zone: {}", value))),
    }
}

/// Directory of the running executable, or the working directory.
fn default_base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Shared state handed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
    pub public_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: Arc<SnapshotStore>, public_dir: PathBuf) -> Self {
        AppState {
            store,
            public_dir: Arc::new(public_dir),
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.public_dir.join("index.html")
    }
}

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::ImageSource;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageEntry {
    pub title: String,
    pub source: String,
    #[serde(default)]
    pub description: String,
}

impl ImageEntry {
    fn new(title: &str, source: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            source: source.to_string(),
            description: description.to_string(),
        }
    }

    pub fn image_source(&self) -> ImageSource {
        ImageSource::parse(&self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub username: String,

    /// Simulated latency of the mock dashboard source
    pub fetch_latency_ms: u64,

    /// Duration of the "Start Loading" demo on the Advanced section
    pub loading_demo_ms: u64,

    /// Make the mock dashboard source fail every fetch
    pub fail_fetches: bool,

    /// Directory bundled image paths are resolved against
    pub asset_dir: Option<String>,

    pub image_timeout_ms: u64,

    pub images: Vec<ImageEntry>,

    pub log_level: String,

    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: "demo".to_string(),
            fetch_latency_ms: 1000,
            loading_demo_ms: 2000,
            fail_fetches: false,
            asset_dir: None,
            image_timeout_ms: 10_000,
            images: default_images(),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }

    pub fn loading_demo(&self) -> Duration {
        Duration::from_millis(self.loading_demo_ms)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_millis(self.image_timeout_ms)
    }

    /// Asset directory, falling back to the working directory
    pub fn asset_root(&self) -> PathBuf {
        self.asset_dir
            .as_deref()
            .and_then(expand_path)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Log file path, falling back to the data directory
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .and_then(expand_path)
            .or_else(|| data_dir().map(|dir| dir.join("showcase.log")))
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub username: Option<String>,
    pub fetch_latency_ms: Option<u64>,
    pub asset_dir: Option<String>,
    pub log_file: Option<String>,
    pub fail_fetches: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(username) = self.username.as_deref().filter(|u| !u.trim().is_empty()) {
            config.username = username.to_string();
        }
        if let Some(latency) = self.fetch_latency_ms {
            config.fetch_latency_ms = latency;
        }
        if let Some(dir) = &self.asset_dir {
            config.asset_dir = Some(dir.clone());
        }
        if let Some(file) = &self.log_file {
            config.log_file = Some(file.clone());
        }
        config.fail_fetches |= self.fail_fetches;
    }
}

fn default_images() -> Vec<ImageEntry> {
    vec![
        ImageEntry::new(
            "App Illustration",
            "./logo.png",
            "Local illustration bundled with the app",
        ),
        ImageEntry::new(
            "Remote Image",
            "https://reactnative.dev/img/tiny_logo.png",
            "React Native logo from official website",
        ),
        ImageEntry::new(
            "Local Image",
            "logo.png",
            "Local logo.png from components folder",
        ),
        ImageEntry::new(
            "Test Image",
            "https://via.placeholder.com/150x150/4CAF50/FFFFFF?text=Success",
            "Placeholder test image",
        ),
    ]
}

/// Load the config file. A missing file yields the defaults; a malformed one
/// is an error so the caller can report it.
pub fn load() -> Result<Config> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("read config {}", path.display()));
        }
    };
    parse(&content).with_context(|| format!("parse config {}", path.display()))
}

pub fn parse(content: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(content)?;
    if config.username.trim().is_empty() {
        config.username = Config::default().username;
    }
    Ok(config)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SHOWCASE_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("showcase").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("showcase").join("config.toml"));
    }

    directories::ProjectDirs::from("dev", "showcase", "showcase")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("showcase"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("showcase"));
    }
    directories::ProjectDirs::from("dev", "showcase", "showcase")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return Some(home.join(rest));
        }
    }

    let mut buf = PathBuf::from(trimmed);
    if buf.is_relative() {
        if let Ok(cwd) = std::env::current_dir() {
            buf = cwd.join(buf);
        }
    }
    Some(buf)
}

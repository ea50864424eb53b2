use directories::ProjectDirs;
use fanmenu::{AnimationTiming, GeometryConfig};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::{Srgb, Srgba, WithAlpha};
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Overlay fill, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr)]
pub struct BackgroundColor(pub Srgba<f64>);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid colour '{0}', expected #rrggbb or #rrggbbaa")]
pub struct ColorParseError(String);

impl FromStr for BackgroundColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let (rgb, alpha) = match hex.len() {
            6 => (hex, 255),
            8 => (
                &hex[..6],
                u8::from_str_radix(&hex[6..], 16).map_err(|_| invalid())?,
            ),
            _ => return Err(invalid()),
        };

        let rgb = Srgb::<u8>::from_str(rgb).map_err(|_| invalid())?;
        Ok(Self(
            rgb.into_format::<f64>()
                .with_alpha(f64::from(alpha) / 255.0),
        ))
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub background: Option<BackgroundColor>,
    #[serde(default)]
    pub icons: Vec<PathBuf>,
    #[serde(default)]
    pub timing: AnimationTiming,
    #[serde(default)]
    pub geometry: GeometryConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "fanmenu", "fanpad").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Where configuration comes from: a file (explicit or per-user) plus icons
/// given on the command line, which replace the file's list.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub path: Option<PathBuf>,
    pub icons: Vec<PathBuf>,
}

impl ConfigSources {
    pub fn new(path: Option<PathBuf>, icons: Vec<PathBuf>) -> Self {
        Self { path, icons }
    }

    pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.path {
            Some(p) => Ok(p.clone()),
            None => default_config_path(),
        }
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        let mut config = load_config(&self.config_path()?)?;
        if !self.icons.is_empty() {
            config.icons = self.icons.clone();
        }
        Ok(config)
    }

    pub fn load_or_default(&self) -> Config {
        self.load().unwrap_or_else(|e| {
            log::warn!("Using default configuration: {}", e);
            Config {
                icons: self.icons.clone(),
                ..Config::default()
            }
        })
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("FANPAD").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

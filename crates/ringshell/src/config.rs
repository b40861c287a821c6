use crate::events::AppEvent;
use crate::icon::IconName;
use crate::launch::ExecCommand;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use ringmenu::Config as MenuConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Exec value of the item offered when no config file exists yet.
pub const SETUP_EXEC: &str = "RINGSHELL_SETUP";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ItemConfig {
    pub label: String,
    pub icon: Option<IconName>,
    pub exec: Option<ExecCommand>,
}

impl ItemConfig {
    pub fn is_setup(&self) -> bool {
        self.exec.as_ref().is_some_and(|e| e.as_str() == SETUP_EXEC)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl Settings {
    fn setup() -> Self {
        Self {
            menu: MenuConfig::default(),
            items: vec![ItemConfig {
                label: "Setup".to_string(),
                icon: Some(IconName::new("preferences-system")),
                exec: Some(ExecCommand::new(SETUP_EXEC)),
            }],
        }
    }
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

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "ringshell", "ringshell")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("RINGSHELL")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<Settings, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn settings_from_toml(toml: &str) -> Result<Settings, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Settings {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        return Settings::setup();
    }

    match load_config() {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to load config, falling back to setup: {}", e);
            Settings::setup()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Whether a watcher event touches the config file itself.
///
/// The parent directory is what gets watched, because editors that save by
/// renaming a temp file over the original would otherwise drop the watch.
fn is_config_change(event: &Event, config_path: &Path) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    relevant && event.paths.iter().any(|p| p == config_path)
}

/// Sends `ConfigReload` whenever the config file is written, replaced or removed.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        log::error!("Config path {} has no parent", config_path.display());
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            if bridge_tx.send_blocking(res).is_err() {
                log::debug!("Config watcher stopped, dropping event");
            }
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create config watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch {}: {}", config_dir.display(), e);
        return;
    }
    log::info!("Watching {} for changes", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                log::debug!("{:?} on {}", event.kind, config_path.display());
                // one save often arrives as several events
                while bridge_rx.try_recv().is_ok() {}
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Config watch error: {}", e),
        }
    }
}

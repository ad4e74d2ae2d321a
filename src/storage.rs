use directories::ProjectDirs;
use drill_core::{KeyValueStore, MemoryStore, RoundConfig, StoreError};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "math_drill";
const ORG_NAME: &str = "practice";
const SAVE_FILE: &str = "storage.json";
const CONFIG_FILE: &str = "config.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", ORG_NAME, APP_NAME)
}

/// Key-value entries kept as one JSON object on disk.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs = project_dirs().ok_or(StoreError::NoDataDir)?;
        Ok(Self::open(dirs.data_dir().join(SAVE_FILE)))
    }

    pub fn open(path: PathBuf) -> Self {
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("starting with empty storage, {} unreadable: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    if !path.exists() {
        debug!("no storage file at {}", path.display());
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// File-backed storage, or memory when there is no data directory.
pub enum AppStore {
    File(FileStore),
    Memory(MemoryStore),
}

impl AppStore {
    pub fn open() -> Self {
        match FileStore::open_default() {
            Ok(store) => AppStore::File(store),
            Err(e) => {
                warn!("level will not be saved: {}", e);
                AppStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for AppStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            AppStore::File(s) => s.get(key),
            AppStore::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            AppStore::File(s) => s.set(key, value),
            AppStore::Memory(s) => s.set(key, value),
        }
    }
}

pub fn load_config() -> RoundConfig {
    let Some(dirs) = project_dirs() else {
        return RoundConfig::default();
    };
    let path = dirs.config_dir().join(CONFIG_FILE);
    if !path.exists() {
        return RoundConfig::default();
    }
    let parsed = fs::read_to_string(&path)
        .map_err(StoreError::from)
        .and_then(|content| RoundConfig::from_json_str(&content).map_err(StoreError::from));
    match parsed {
        Ok(config) => config,
        Err(e) => {
            warn!("ignoring {}: {}", path.display(), e);
            RoundConfig::default()
        }
    }
}

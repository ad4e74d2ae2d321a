use log::{debug, warn};
use std::collections::HashMap;
use thiserror::Error;

pub const LEVEL_KEY: &str = "mathLevel";
pub const DEFAULT_LEVEL: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine data directory")]
    NoDataDir,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to (de)serialize storage: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value storage local to the client.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn load_level<S: KeyValueStore + ?Sized>(store: &S) -> u32 {
    let Some(raw) = store.get(LEVEL_KEY) else {
        debug!("no stored level, starting at {}", DEFAULT_LEVEL);
        return DEFAULT_LEVEL;
    };
    match raw.trim().parse::<u32>() {
        Ok(level) if level >= 1 => level,
        _ => {
            warn!("ignoring stored level {:?}", raw);
            DEFAULT_LEVEL
        }
    }
}

pub fn save_level<S: KeyValueStore + ?Sized>(store: &mut S, level: u32) -> Result<(), StoreError> {
    store.set(LEVEL_KEY, &level.to_string())
}

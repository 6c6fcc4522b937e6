use std::fs;
use std::path::Path;
use std::sync::RwLock;

use anyhow::Context;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use toml::Table;

static GLOBAL_CONFIG: OnceCell<RwLock<Table>> = OnceCell::new();

/// Loads `path` into the process-wide store. A missing file or a syntax
/// error leaves the store empty, so every section reads as its default.
pub fn init<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();

    let content = if path.exists() {
        log::info!("Loading config from {:?}", path);
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?
    } else {
        log::warn!("Config file not found at {:?}, using defaults.", path);
        String::new()
    };

    init_from_str(&content)
}

/// Replaces the store with the parsed `content`.
pub fn init_from_str(content: &str) -> anyhow::Result<()> {
    let table: Table = toml::from_str(content).unwrap_or_else(|e| {
        log::error!("Config syntax error: {}, using empty config.", e);
        Table::new()
    });

    let store = GLOBAL_CONFIG.get_or_init(|| RwLock::new(Table::new()));
    let mut guard = store
        .write()
        .map_err(|_| anyhow::anyhow!("Config store poisoned"))?;
    *guard = table;
    Ok(())
}

/// Reads section `key` as `T`. An absent store, section, or a section that
/// does not match `T` yields `T::default()`.
pub fn get<T: DeserializeOwned + Default>(key: &str) -> T {
    let Some(store) = GLOBAL_CONFIG.get() else {
        log::debug!("Config not initialized, section '[{}]' uses defaults.", key);
        return T::default();
    };
    let Ok(read_guard) = store.read() else {
        return T::default();
    };

    if let Some(value) = read_guard.get(key) {
        value.clone().try_into().unwrap_or_else(|e| {
            log::warn!("Config section '[{}]' mismatch: {}. Using default.", key, e);
            T::default()
        })
    } else {
        T::default()
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use reel_core::config::{StageConfig, SystemConfig};

#[derive(Serialize)]
struct FullConfig {
    system: SystemConfig,
    stage: StageConfig,

    #[cfg(feature = "skia")]
    window: reel_skia_renderer::config::WindowConfig,
}

impl Default for FullConfig {
    fn default() -> Self {
        Self {
            system: SystemConfig::default(),
            stage: StageConfig::default(),
            #[cfg(feature = "skia")]
            window: reel_skia_renderer::config::WindowConfig::default(),
        }
    }
}

pub fn default_config() -> Result<String> {
    toml::to_string_pretty(&FullConfig::default()).context("Failed to serialize default config")
}

/// Writes a default config to `path` unless a file is already there.
pub fn ensure_config_exists(path: &str) -> Result<()> {
    if Path::new(path).exists() {
        return Ok(());
    }

    println!("Creating default configuration at '{}'...", path);
    fs::write(path, default_config()?).with_context(|| format!("Failed to write config file {}", path))?;
    println!("Config file created successfully.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_the_store() {
        let text = default_config().unwrap();
        assert!(text.contains("[system]"));
        assert!(text.contains("[stage]"));

        let table: toml::Table = toml::from_str(&text).unwrap();
        let system: SystemConfig = table["system"].clone().try_into().unwrap();
        assert_eq!(system.script_dir, "animation_files/");
        let stage: StageConfig = table["stage"].clone().try_into().unwrap();
        assert_eq!(stage.initial_opacity, 255);
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frontend {
    #[default]
    Window,
    Terminal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub script_dir: String,
    pub assets_dir: String,
    pub log_path:   String,
    pub log_level:  String,
    pub frontend:   Frontend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Cover alpha a scene starts with when installed.
    pub initial_opacity: u8,
    /// Scene the driver starts from.
    pub start_scene: i64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            script_dir: "animation_files/".into(),
            assets_dir: "images/".into(),
            log_path:   "logs/".into(),
            log_level:  "info".into(),
            frontend:   Frontend::Window,
        }
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            initial_opacity: 255,
            start_scene: 0,
        }
    }
}

impl SystemConfig {
    pub fn load() -> Self {
        reel_shared::config::get("system")
    }
}

impl StageConfig {
    pub fn load() -> Self {
        reel_shared::config::get("stage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_deserialize_with_defaults() {
        let table: toml::Table = toml::from_str("frontend = \"terminal\"\nlog_level = \"debug\"").unwrap();
        let sys: SystemConfig = toml::Value::Table(table).try_into().unwrap();
        assert_eq!(sys.frontend, Frontend::Terminal);
        assert_eq!(sys.log_level, "debug");
        assert_eq!(sys.script_dir, "animation_files/");

        let stage: StageConfig = toml::from_str("start_scene = 3").unwrap();
        assert_eq!(stage.start_scene, 3);
        assert_eq!(stage.initial_opacity, 255);
    }
}

use std::io::Write;

use reel_shared::config;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
struct Demo {
    name: String,
    speed: u32,
}

impl Default for Demo {
    fn default() -> Self {
        Self { name: "default".into(), speed: 1 }
    }
}

// The store is process-wide, so the whole lifecycle runs in one test.
#[test]
fn sections_fall_back_to_defaults() {
    assert_eq!(config::get::<Demo>("demo"), Demo::default());

    config::init_from_str("[demo]\nname = \"fast\"\n").unwrap();
    assert_eq!(config::get::<Demo>("demo"), Demo { name: "fast".into(), speed: 1 });
    assert_eq!(config::get::<Demo>("missing"), Demo::default());

    config::init_from_str("[demo]\nspeed = \"not a number\"\n").unwrap();
    assert_eq!(config::get::<Demo>("demo"), Demo::default());

    config::init_from_str("this is = = not toml").unwrap();
    assert_eq!(config::get::<Demo>("demo"), Demo::default());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[demo]\nspeed = 9").unwrap();
    config::init(file.path()).unwrap();
    assert_eq!(config::get::<Demo>("demo"), Demo { name: "default".into(), speed: 9 });

    config::init(file.path().with_extension("absent")).unwrap();
    assert_eq!(config::get::<Demo>("demo"), Demo::default());
}

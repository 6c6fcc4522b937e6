use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Target};
use reel_core::config::SystemConfig;

use crate::config_gen;

pub const CONFIG_PATH: &str = "config.toml";

/// Loads `config.toml`, creating it first if needed.
pub fn init_config() {
    if let Err(e) = config_gen::ensure_config_exists(CONFIG_PATH) {
        eprintln!("Config creation warning: {:#}", e);
    }

    if let Err(e) = reel_shared::config::init(CONFIG_PATH) {
        eprintln!("Config load warning: {:#}", e);
    }
}

struct TeeWriter<W1, W2>(W1, W2);

impl<W1: Write, W2: Write> Write for TeeWriter<W1, W2> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.0.write(buf)?;
        self.1.write_all(&buf[..n])?;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()?;
        self.1.flush()?;
        Ok(())
    }
}

/// In terminal mode log records only go to the file so they do not mix with
/// the story text.
pub fn init_logger(sys_cfg: &SystemConfig, is_terminal: bool) {
    if let Err(e) = fs::create_dir_all(&sys_cfg.log_path) {
        eprintln!("Failed to create log dir: {}", e);
    }

    let log_file_path = Path::new(&sys_cfg.log_path).join("reel.log");
    let log_file = OpenOptions::new().create(true).append(true).open(&log_file_path);

    let mut builder = Builder::from_env(env_logger::Env::default().default_filter_or(&sys_cfg.log_level));
    match (log_file, is_terminal) {
        (Ok(file), true) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        (Ok(file), false) => {
            builder.target(Target::Pipe(Box::new(TeeWriter(std::io::stdout(), file))));
        }
        (Err(e), _) => {
            eprintln!("Failed to open log file {:?}: {}", log_file_path, e);
            builder.target(Target::Stderr);
        }
    }

    builder.init();
}

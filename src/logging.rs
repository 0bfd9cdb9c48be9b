//! Log file setup
//!
//! The terminal belongs to the UI, so log lines go to
//! `~/.local/share/clanboard/clanboard.log`. `RUST_LOG` overrides the level.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Level from the config, raised by each `-v`
pub fn resolve_level(configured: &str, verbose: u8) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the subscriber. Returns the log path, or `None` if logging is unavailable.
pub fn init_logging(level: &str) -> Option<PathBuf> {
    let dir = dirs::data_local_dir()?.join("clanboard");
    fs::create_dir_all(&dir).ok()?;

    let path = dir.join("clanboard.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("clanboard={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok()?;

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_level() {
        assert_eq!(resolve_level("warn", 0), "warn");
        assert_eq!(resolve_level("warn", 1), "debug");
        assert_eq!(resolve_level("info", 3), "trace");
    }
}

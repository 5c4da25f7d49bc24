// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! File logging for the interactive session.
//!
//! The TUI owns the terminal, so events only go to a file and only when one
//! is configured. Filter priority, highest first:
//!
//! 1. `TIERVIEW_LOG` directives
//! 2. `RUST_LOG`
//! 3. `[log].level` from the config file
//! 4. `warn`

use crate::config::{Config, DEFAULT_LOG_LEVEL};
use anyhow::{Context, Result, anyhow};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const LOG_ENV: &str = "TIERVIEW_LOG";

/// Installs the global subscriber when a log file is configured. Returns the
/// file in use, or `None` when logging stays off.
pub fn init(config: &Config) -> Result<Option<PathBuf>> {
    let Some(path) = config.log_file() else {
        return Ok(None);
    };
    let file = open_log_file(&path)?;

    tracing_subscriber::registry()
        .with(build_env_filter(config.log_level()))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;

    Ok(Some(path))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Unparseable env directives fall through to the next source instead of
/// failing startup.
fn build_env_filter(config_level: &str) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV)
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::try_new(config_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::{LOG_ENV, build_env_filter, open_log_file};
    use anyhow::Result;
    use crate::test_support::env_lock;
    use std::io::Write;

    fn clear_log_env() {
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(LOG_ENV);
            std::env::remove_var("RUST_LOG");
        }
    }

    #[test]
    fn config_level_applies_without_env() {
        let _guard = env_lock();
        clear_log_env();
        assert_eq!(build_env_filter("debug").to_string(), "debug");
    }

    #[test]
    fn invalid_config_level_falls_back_to_warn() {
        let _guard = env_lock();
        clear_log_env();
        assert_eq!(build_env_filter("tierview=loud").to_string(), "warn");
    }

    #[test]
    fn tierview_log_beats_rust_log() {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(LOG_ENV, "tierview_app=trace");
            std::env::set_var("RUST_LOG", "error");
        }
        let filter = build_env_filter("info").to_string();
        clear_log_env();
        assert!(filter.contains("tierview_app=trace"), "got {filter}");
    }

    #[test]
    fn rust_log_beats_config_level() {
        let _guard = env_lock();
        clear_log_env();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("RUST_LOG", "error");
        }
        let filter = build_env_filter("info").to_string();
        clear_log_env();
        assert_eq!(filter, "error");
    }

    #[test]
    fn open_log_file_creates_parents_and_appends() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("nested/dir/tierview.log");
        writeln!(open_log_file(&path)?, "first")?;
        writeln!(open_log_file(&path)?, "second")?;
        assert_eq!(std::fs::read_to_string(&path)?, "first\nsecond\n");
        Ok(())
    }
}

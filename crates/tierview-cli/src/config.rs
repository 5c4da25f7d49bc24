// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tierview_app::{DEFAULT_COLUMN_WIDTH, LayoutSpec};
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "tierview";
pub const CONFIG_PATH_ENV: &str = "TIERVIEW_CONFIG_PATH";
pub const LOG_FILE_ENV: &str = "TIERVIEW_LOG_FILE";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
const CONFIG_VERSION: i64 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            source: Source::default(),
            layout: Layout::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Source {
    pub document: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Layout {
    pub category_width: Option<u16>,
    pub function_width: Option<u16>,
    pub sub_item_width: Option<u16>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            category_width: Some(DEFAULT_COLUMN_WIDTH),
            function_width: Some(DEFAULT_COLUMN_WIDTH),
            sub_item_width: Some(DEFAULT_COLUMN_WIDTH),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub file: Option<String>,
    pub level: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            file: None,
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and put settings under [source], [layout], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let widths = [
            ("category_width", self.layout.category_width),
            ("function_width", self.layout.function_width),
            ("sub_item_width", self.layout.sub_item_width),
        ];
        for (name, width) in widths {
            if width == Some(0) {
                bail!("layout.{name} in {} must be positive, got 0", path.display());
            }
        }

        if let Some(document) = &self.source.document
            && document.trim().is_empty()
        {
            bail!("source.document in {} must not be empty", path.display());
        }

        if let Some(level) = &self.log.level
            && let Err(error) = EnvFilter::try_new(level)
        {
            bail!(
                "log.level in {} is not a valid filter ({error}); use a level such as \"warn\" or directives such as \"tierview_app=debug,warn\"",
                path.display()
            );
        }

        Ok(())
    }

    pub fn document(&self) -> Option<PathBuf> {
        self.source.document.as_deref().map(PathBuf::from)
    }

    pub fn layout_spec(&self) -> LayoutSpec {
        LayoutSpec {
            category_width: self.layout.category_width.unwrap_or(DEFAULT_COLUMN_WIDTH),
            function_width: self.layout.function_width.unwrap_or(DEFAULT_COLUMN_WIDTH),
            sub_item_width: self.layout.sub_item_width.unwrap_or(DEFAULT_COLUMN_WIDTH),
        }
    }

    /// `[log].file` wins over the environment; logging stays off when neither
    /// is set.
    pub fn log_file(&self) -> Option<PathBuf> {
        if let Some(file) = &self.log.file {
            return Some(PathBuf::from(file));
        }
        env::var_os(LOG_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# tierview config\n# Place this file at: {}\n\nversion = 1\n\n[source]\n# Outline opened when no path is given on the command line\n# document = \"/absolute/path/to/outline.txt\"\n\n[layout]\ncategory_width = {width}\nfunction_width = {width}\nsub_item_width = {width}\n\n[log]\n# Logging is off unless a file is set (or {LOG_FILE_ENV} is exported)\n# file = \"/tmp/tierview.log\"\nlevel = \"{DEFAULT_LOG_LEVEL}\"\n",
            path.display(),
            width = DEFAULT_COLUMN_WIDTH,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{CONFIG_PATH_ENV, Config, LOG_FILE_ENV};
    use anyhow::Result;
    use crate::test_support::env_lock;
    use std::path::PathBuf;
    use tierview_app::LayoutSpec;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.layout_spec(), LayoutSpec::default());
        assert_eq!(config.document(), None);
        assert_eq!(config.log_level(), "warn");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[layout]\ncategory_width = 20\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[source], [layout], and [log]"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[source]\ndocument = \"/data/outline.txt\"\n[layout]\ncategory_width = 24\nsub_item_width = 10\n[log]\nfile = \"/tmp/tv.log\"\nlevel = \"tierview_app=debug,warn\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.document(), Some(PathBuf::from("/data/outline.txt")));
        assert_eq!(
            config.layout_spec(),
            LayoutSpec {
                category_width: 24,
                function_width: 16,
                sub_item_width: 10,
            }
        );
        assert_eq!(config.log_file(), Some(PathBuf::from("/tmp/tv.log")));
        assert_eq!(config.log_level(), "tierview_app=debug,warn");
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn zero_width_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[layout]\nfunction_width = 0\n")?;
        let error = Config::load(&path).expect_err("zero width should fail");
        assert!(error.to_string().contains("layout.function_width"));
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn negative_width_fails_to_decode() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[layout]\ncategory_width = -3\n")?;
        let error = Config::load(&path).expect_err("negative width should fail");
        assert!(error.to_string().contains("decode config"));
        Ok(())
    }

    #[test]
    fn invalid_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"tierview=loud\"\n")?;
        let error = Config::load(&path).expect_err("bad level should fail");
        assert!(error.to_string().contains("log.level"));
        Ok(())
    }

    #[test]
    fn blank_document_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[source]\ndocument = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank document should fail");
        assert!(error.to_string().contains("source.document"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(CONFIG_PATH_ENV, &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(CONFIG_PATH_ENV);
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("tierview/config.toml"));
        Ok(())
    }

    #[test]
    fn log_file_prefers_config_over_env() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n[log]\nfile = \"/from/config.log\"\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(LOG_FILE_ENV, "/from/env.log");
        }
        let config = Config::load(&path)?;
        let from_config = config.log_file();
        let from_env = Config::default().log_file();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(LOG_FILE_ENV);
        }
        assert_eq!(from_config, Some(PathBuf::from("/from/config.log")));
        assert_eq!(from_env, Some(PathBuf::from("/from/env.log")));
        assert_eq!(Config::default().log_file(), None);
        Ok(())
    }

    #[test]
    fn example_config_loads_cleanly() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[source]"));
        assert!(example.contains("[layout]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.layout_spec(), LayoutSpec::default());
        Ok(())
    }
}

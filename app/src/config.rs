use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::*;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogFile, MemoryCatalog};

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Config {
    pub catalog: CatalogConfig,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

/// Settings that may be overridden from `VEGMENU_*` environment variables.
#[derive(Deserialize, Debug, Default)]
struct EnvOverrides {
    catalog: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Config {
    pub fn from_toml(src: &str) -> Result<Self> {
        let config = toml::from_str(src).context("parse config")?;
        Ok(config)
    }

    /// Applies `VEGMENU_CATALOG` on top of the file settings.
    pub fn with_env_overrides(self) -> Result<Self> {
        let env: EnvOverrides = envy::prefixed("VEGMENU_")
            .from_env()
            .context("read VEGMENU_* environment")?;
        Ok(self.with_overrides(env))
    }

    fn with_overrides(mut self, env: EnvOverrides) -> Self {
        if let Some(path) = env.catalog {
            debug!("Catalog path overridden to {:?}", path);
            self.catalog.path = path;
        }
        self
    }
}

impl CatalogConfig {
    pub fn build(&self) -> Result<MemoryCatalog> {
        debug!("Build catalog from {:?}", self);
        let file = CatalogFile::load(&self.path)?;
        let catalog = file
            .into_catalog()
            .with_context(|| format!("load catalog {:?}", self.path))?;
        Ok(catalog)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct EnvLogger {
    #[serde(default)]
    level: Option<LogLevel>,
    #[serde(default)]
    modules: HashMap<String, LogLevel>,
    #[serde(default)]
    timestamp_nanos: bool,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl EnvLogger {
    pub fn builder(&self) -> env_logger::Builder {
        let mut b = env_logger::Builder::from_default_env();
        if let Some(level) = self.level {
            b.filter_level(level.into());
        }

        for (module, level) in self.modules.iter() {
            b.filter_module(module, (*level).into());
        }

        if self.timestamp_nanos {
            b.format_timestamp_nanos();
        }

        b
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Wrapper {
        #[serde(flatten)]
        vegmenu: Config,
        env_logger: EnvLogger,
    }

    #[test]
    fn parses_binary_config() -> Result<()> {
        let src = r#"
            [catalog]
            path = "demos/catalog.toml"

            [env_logger]
            level = "info"
            modules = { vegmenu = "debug" }
            timestamp_nanos = true
        "#;
        let config: Wrapper = toml::from_str(src)?;
        assert_eq!(config.vegmenu.catalog.path, PathBuf::from("demos/catalog.toml"));
        assert_eq!(config.env_logger.level, Some(LogLevel::Info));
        assert_eq!(
            config.env_logger.modules,
            hashmap! { "vegmenu".to_string() => LogLevel::Debug }
        );
        assert!(config.env_logger.timestamp_nanos);
        Ok(())
    }

    #[test]
    fn logger_section_fields_are_optional() -> Result<()> {
        let logger: EnvLogger = toml::from_str("")?;
        assert_eq!(logger.level, None);
        assert!(logger.modules.is_empty());
        assert!(!logger.timestamp_nanos);
        Ok(())
    }

    #[test]
    fn environment_overrides_catalog_path() -> Result<()> {
        let config = Config::from_toml("[catalog]\npath = \"a.toml\"\n")?;
        let env: EnvOverrides = envy::prefixed("VEGMENU_").from_iter(vec![(
            "VEGMENU_CATALOG".to_string(),
            "b.toml".to_string(),
        )])?;
        let config = config.with_overrides(env);
        assert_eq!(config.catalog.path, PathBuf::from("b.toml"));

        let untouched = Config::from_toml("[catalog]\npath = \"a.toml\"\n")?
            .with_overrides(EnvOverrides::default());
        assert_eq!(untouched.catalog.path, PathBuf::from("a.toml"));
        Ok(())
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let config = CatalogConfig {
            path: PathBuf::from("/nonexistent/vegmenu/catalog.toml"),
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn log_levels_map_to_filters() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::Off), LevelFilter::Off);
    }
}

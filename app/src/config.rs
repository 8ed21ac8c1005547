use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::*;
use serde::{Deserialize, Serialize};

use crate::menu::Price;

const ENV_PREFIX: &str = "MENUBUILDER_";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency: String,
}

#[derive(Deserialize, Debug, Default)]
struct EnvOverrides {
    currency: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct EnvLogger {
    level: Option<LogLevel>,
    modules: HashMap<String, LogLevel>,
    timestamp_nanos: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            currency: "$".to_string(),
        }
    }
}

impl DisplayConfig {
    pub fn price(&self, price: Price) -> String {
        price.with_currency(&self.currency)
    }
}

impl Config {
    pub fn from_toml(src: &str) -> Result<Self> {
        let config = toml::from_str(src).context("parse configuration")?;
        Ok(config)
    }

    /// Applies `MENUBUILDER_*` variables from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(std::env::vars())
    }

    pub fn with_overrides_from<I>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let overrides: EnvOverrides = envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .context("read environment overrides")?;
        debug!("Environment overrides: {:?}", overrides);
        if let Some(currency) = overrides.currency {
            self.display.currency = currency;
        }
        Ok(self)
    }
}

/// Reads a TOML file into any of the configuration shapes; a missing path
/// yields the defaults.
pub fn load<T>(path: Option<&Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    match path {
        Some(path) => {
            let src = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            let config = toml::from_str(&src)
                .with_context(|| format!("parse config {}", path.display()))?;
            Ok(config)
        }
        None => Ok(T::default()),
    }
}

impl LogLevel {
    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl EnvLogger {
    pub fn builder(&self) -> env_logger::Builder {
        let mut b = env_logger::Builder::from_default_env();
        if let Some(level) = self.level {
            b.filter_level(level.to_filter());
        }

        for (module, level) in self.modules.iter() {
            b.filter_module(module, level.to_filter());
        }

        if self.timestamp_nanos {
            b.format_timestamp_nanos();
        }

        b
    }
}

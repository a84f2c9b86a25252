//! CLI configuration
//!
//! Layers, lowest precedence first: built-in defaults, the config file,
//! `OPENFEATURE_GEN__*` environment variables. Command-line flags are applied
//! on top by the caller.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "openfeature-gen";

pub const ENV_PREFIX: &str = "OPENFEATURE_GEN";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Flag manifest to read
    pub manifest: PathBuf,
    /// Directory generated files are written into
    pub output: PathBuf,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "openfeature_codegen=debug"
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl AppConfig {
    /// Load configuration from `path` (or the default file, if present) and
    /// the process environment, after reading a `.env` file if one exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("manifest", "flags.json")?
            .set_default("output", ".")?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(file)
            .add_source(env)
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

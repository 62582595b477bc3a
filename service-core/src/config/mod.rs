use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Dotenv files consulted at startup, most specific first.
///
/// dotenvy never overrides a variable that is already set, so earlier files win.
pub const DOTENV_FILES: [&str; 2] = [".env.local", ".env"];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        load_dotenv();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Socket address string the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load dotenv files into the process environment, ignoring missing ones.
pub fn load_dotenv() {
    for file in DOTENV_FILES {
        if let Ok(path) = dotenvy::from_filename(file) {
            tracing::debug!(path = %path.display(), "Loaded environment file");
        }
    }
}

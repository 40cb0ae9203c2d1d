//! Log settings read from the environment.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Directory for the rolling `app.log` / `error.log` files.
    pub dir: PathBuf,
    /// Level for this crate when `RUST_LOG` is not set.
    pub level: String,
    /// JSON lines instead of the pretty development format.
    pub json: bool,
    pub environment: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        Self::for_environment(
            &environment,
            std::env::var("LOG_LEVEL").ok(),
            std::env::var("LOG_DIR").ok(),
        )
    }

    pub fn for_environment(environment: &str, level: Option<String>, dir: Option<String>) -> Self {
        let is_production = environment == "production";
        Self {
            dir: PathBuf::from(dir.unwrap_or_else(|| "logs".to_string())),
            level: level.unwrap_or_else(|| if is_production { "info" } else { "debug" }.to_string()),
            json: is_production,
            environment: environment.to_string(),
        }
    }

    /// Filter directives used when `RUST_LOG` is absent.
    pub fn default_directives(&self) -> String {
        format!(
            "portfolio_site={},tower_http=debug,axum=debug,sqlx=warn",
            self.level
        )
    }
}

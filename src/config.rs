//! Runtime configuration, read once from the environment at startup.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

/// Insecure fallback secret; `run` refuses to start with it in production.
pub const DEFAULT_JWT_SECRET: &str = "default-jwt-secret-change-in-production";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub admin_email: String,
    /// bcrypt hash of the admin password.
    pub admin_password_hash: String,
    pub site_url: String,
    pub static_dir: PathBuf,
    pub upload_dir: PathBuf,
    /// Serve the built-in sample content when a public read comes back empty or fails.
    pub sample_fallback: bool,
    pub github: GitHubConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Default)]
pub struct GitHubConfig {
    pub username: Option<String>,
    pub token: Option<String>,
    pub api_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct EmailConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub api_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = var_or("ENVIRONMENT", "development");

        let admin_password_hash = match (non_empty("ADMIN_HASH_PASSWORD"), non_empty("ADMIN_PASSWORD")) {
            (Some(hash), _) => hash,
            (None, Some(plain)) => bcrypt::hash(plain, bcrypt::DEFAULT_COST).unwrap_or_default(),
            (None, None) => {
                tracing::warn!("ADMIN_HASH_PASSWORD not set, using the development password 'admin123'");
                bcrypt::hash("admin123", bcrypt::DEFAULT_COST).unwrap_or_default()
            }
        };

        Self {
            host: var_or("HOST", "127.0.0.1"),
            port: parse_or("PORT", 3001),
            environment,
            database_url: non_empty("DATABASE_URL"),
            jwt_secret: var_or("JWT_SECRET", DEFAULT_JWT_SECRET),
            admin_email: var_or("ADMIN_EMAIL", "admin@example.com"),
            admin_password_hash,
            site_url: var_or("SITE_URL", "http://localhost:3000")
                .trim_end_matches('/')
                .to_string(),
            static_dir: PathBuf::from(var_or("STATIC_DIR", "out")),
            upload_dir: PathBuf::from(var_or("UPLOAD_DIR", "uploads")),
            sample_fallback: parse_or("SAMPLE_FALLBACK", true),
            github: GitHubConfig {
                username: non_empty("GITHUB_USERNAME"),
                token: non_empty("GITHUB_TOKEN"),
                api_url: var_or("GITHUB_API_URL", "https://api.github.com"),
            },
            email: EmailConfig {
                service_id: non_empty("EMAILJS_SERVICE_ID"),
                template_id: non_empty("EMAILJS_TEMPLATE_ID"),
                public_key: non_empty("EMAILJS_PUBLIC_KEY"),
                api_url: var_or("EMAILJS_API_URL", "https://api.emailjs.com"),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Configuration for tests: in-memory store, throwaway secret, password "admin123".
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            database_url: None,
            jwt_secret: "test-secret".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password_hash: bcrypt::hash("admin123", 4).unwrap_or_default(),
            site_url: "https://example.com".to_string(),
            static_dir: PathBuf::from("out"),
            upload_dir: env::temp_dir().join("portfolio-site-test-uploads"),
            sample_fallback: true,
            github: GitHubConfig {
                username: None,
                token: None,
                api_url: "https://api.github.com".to_string(),
            },
            email: EmailConfig {
                api_url: "https://api.emailjs.com".to_string(),
                ..EmailConfig::default()
            },
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    non_empty(key).unwrap_or_else(|| {
        tracing::debug!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_or<T: FromStr + Display>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match non_empty(key) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_for_tests_is_not_production() {
        let config = AppConfig::for_tests();
        assert!(!config.is_production());
        assert!(config.sample_fallback);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_parse_or_falls_back_on_missing_key() {
        let port: u16 = parse_or("PORTFOLIO_SITE_TEST_UNSET_PORT", 4242);
        assert_eq!(port, 4242);
    }
}

use serde::{Deserialize, Serialize};

use crate::error::AbricosError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub catalog: CatalogConfig,
    pub detail: DetailConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// `tracing_subscriber::EnvFilter` directive used by native hosts.
    pub log_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub popular_count: usize,
    pub genre_chip_limit: usize,
    pub teaser_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailConfig {
    /// Record shown when the requested anime id is unknown.
    pub fallback_anime_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Delay before returning home after a successful login or registration.
    pub redirect_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_file: String,
}

impl AppConfig {
    /// Parse a config document.
    pub fn from_toml(s: &str) -> Result<Self, AbricosError> {
        toml::from_str(s).map_err(|e| AbricosError::Config(e.to_string()))
    }
}

#[cfg(feature = "native")]
mod native {
    use std::path::PathBuf;

    use directories::ProjectDirs;

    use super::AppConfig;
    use crate::error::AbricosError;

    impl AppConfig {
        /// Load config: user file if it exists, built-in defaults otherwise.
        pub fn load() -> Result<Self, AbricosError> {
            let user_path = Self::config_path();
            if user_path.exists() {
                let user_str = std::fs::read_to_string(&user_path)
                    .map_err(|e| AbricosError::Config(e.to_string()))?;
                Self::from_toml(&user_str)
            } else {
                Ok(Self::default())
            }
        }

        /// Path to user config file (XDG on Linux, AppData on Windows).
        pub fn config_path() -> PathBuf {
            Self::project_dirs()
                .map(|d| d.config_dir().join("config.toml"))
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        }

        /// Ensure the data directory exists and return the key-value database path.
        pub fn ensure_db_path(&self) -> Result<PathBuf, AbricosError> {
            let path = Self::project_dirs()
                .map(|d| d.data_dir().join(&self.storage.database_file))
                .unwrap_or_else(|| PathBuf::from(&self.storage.database_file));
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Ok(path)
        }

        fn project_dirs() -> Option<ProjectDirs> {
            ProjectDirs::from("", "", "abricos")
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.catalog.popular_count, 3);
        assert_eq!(config.catalog.genre_chip_limit, 5);
        assert_eq!(config.detail.fallback_anime_id, 1);
        assert_eq!(config.auth.redirect_delay_ms, 1500);
        assert_eq!(config.general.log_filter, "abricos=debug");
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::from_toml(&serialized).unwrap();
        assert_eq!(deserialized.storage.database_file, config.storage.database_file);
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let err = AppConfig::from_toml("[general").unwrap_err();
        assert!(matches!(err, AbricosError::Config(_)));
    }
}

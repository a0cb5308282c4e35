//! Repository factory for dependency injection.
//!
//! Builds the repository named by the `[storage]` configuration section and
//! hands it out as `Arc<dyn FullRepository>` so the HTTP layer never sees the
//! concrete type.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::config::{AppConfig, StorageConfig};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("local", "memory").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use heatwise::config::StorageConfig;
/// use heatwise::db::RepositoryFactory;
///
/// let repo = RepositoryFactory::create(&StorageConfig::default()).unwrap();
/// # let _ = repo;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository from the `[storage]` section.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ConfigurationError)` - If the type is unknown
    pub fn create(config: &StorageConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Local if config.seed_sample_data => {
                info!("Creating in-memory repository seeded with sample data");
                Ok(Self::create_local_with_sample_data())
            }
            RepositoryType::Local => {
                info!("Creating empty in-memory repository");
                Ok(Self::create_local())
            }
        }
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create an in-memory repository holding the demo shelters and weather.
    pub fn create_local_with_sample_data() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::with_sample_data())
    }

    /// Create a repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = AppConfig::from_file(config_path)
            .map_err(|e| RepositoryError::configuration(format!("{:#}", e)))?;
        Self::create(&config.storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ShelterRepository;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(
            RepositoryType::from_str("local").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str(" Memory ").unwrap(),
            RepositoryType::Local
        );
        assert!(RepositoryType::from_str("postgres").is_err());
    }

    #[tokio::test]
    async fn test_create_local_repository() {
        let repo = RepositoryFactory::create_local();
        assert!(repo.health_check().await.unwrap());
        assert!(repo.list_shelters().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_honours_seed_flag() {
        let seeded = RepositoryFactory::create(&StorageConfig::default()).unwrap();
        assert_eq!(seeded.list_shelters().await.unwrap().len(), 5);

        let empty = RepositoryFactory::create(&StorageConfig {
            seed_sample_data: false,
            ..StorageConfig::default()
        })
        .unwrap();
        assert!(empty.list_shelters().await.unwrap().is_empty());
    }

    #[test]
    fn test_unknown_type_is_configuration_error() {
        let err = RepositoryFactory::create(&StorageConfig {
            storage_type: "azure".to_string(),
            ..StorageConfig::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }
}

//! Repository factory.
//!
//! Central place for creating repository instances from runtime
//! configuration. The chosen repository is constructed once at process
//! start and passed by reference into the HTTP layer; there is no global
//! singleton.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
use super::repository::{BeerRepository, RepositoryError, RepositoryResult};
#[cfg(feature = "postgres-repo")]
use super::PostgresConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + sqlx implementation
    Postgres,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to Postgres when a database URL is
    /// present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() || std::env::var("PG_DATABASE_URL").is_ok() {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn BeerRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a Postgres repository.
    ///
    /// # Returns
    /// * `Ok(Arc<PostgresRepository>)` once connected
    /// * `Err(RepositoryError)` if the pool cannot be established
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<PostgresRepository>> {
        let repo = PostgresRepository::connect(config).await?;
        Ok(Arc::new(repo))
    }

    /// Create a repository from a TOML configuration file.
    ///
    /// # Arguments
    /// * `path` - path to a `repository.toml` file
    pub async fn from_config_file<P: AsRef<Path>>(
        path: P,
    ) -> RepositoryResult<Arc<dyn BeerRepository>> {
        let config = RepositoryConfig::from_file(path)?;
        Self::from_config(&config).await
    }

    /// Create a repository from `repository.toml` in a default location.
    ///
    /// Searches the current directory and its parent; see
    /// [`RepositoryConfig::from_default_location`].
    pub async fn from_default_location() -> RepositoryResult<Arc<dyn BeerRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_config(&config).await
    }

    /// Create a repository from a parsed configuration.
    async fn from_config(config: &RepositoryConfig) -> RepositoryResult<Arc<dyn BeerRepository>> {
        #[cfg(feature = "postgres-repo")]
        if let Some(pg_config) = config.to_postgres_config()? {
            let repo = Self::create_postgres(&pg_config).await?;
            return Ok(repo as Arc<dyn BeerRepository>);
        }
        // Errors when the file selects postgres but the feature is off, or
        // when the repository type is unknown.
        #[cfg(not(feature = "postgres-repo"))]
        config.to_postgres_config()?;

        Ok(Self::create_local())
    }

    /// Create a repository from runtime configuration.
    ///
    /// A `repository.toml` in a default location takes precedence; otherwise
    /// `REPOSITORY_TYPE` (or the presence of `DATABASE_URL`) selects the
    /// backend, see [`RepositoryType::from_env`].
    pub async fn from_env() -> RepositoryResult<Arc<dyn BeerRepository>> {
        if let Ok(config) = RepositoryConfig::from_default_location() {
            return Self::from_config(&config).await;
        }

        match RepositoryType::from_env() {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config = PostgresConfig::from_env()
                        .map_err(RepositoryError::configuration)?;
                    let repo = Self::create_postgres(&config).await?;
                    Ok(repo as Arc<dyn BeerRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(
            "postgres".parse::<RepositoryType>().unwrap(),
            RepositoryType::Postgres
        );
        assert_eq!(
            "pg".parse::<RepositoryType>().unwrap(),
            RepositoryType::Postgres
        );
        assert_eq!(
            "Local".parse::<RepositoryType>().unwrap(),
            RepositoryType::Local
        );
        assert!("mongo".parse::<RepositoryType>().is_err());
    }

    #[tokio::test]
    async fn test_create_local() {
        let repo = RepositoryFactory::create_local();
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_from_config_file_local() {
        let path = std::env::temp_dir().join("brewery-factory-local.toml");
        std::fs::write(&path, "[repository]\ntype = \"local\"\n").unwrap();

        let repo = RepositoryFactory::from_config_file(&path).await.unwrap();
        assert!(repo.health_check().await.unwrap());

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_from_config_file_rejects_unknown_type() {
        let path = std::env::temp_dir().join("brewery-factory-bad.toml");
        std::fs::write(&path, "[repository]\ntype = \"mongo\"\n").unwrap();

        let err = RepositoryFactory::from_config_file(&path)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_from_config_file_missing_is_configuration_error() {
        let err = RepositoryFactory::from_config_file("/nonexistent/repository.toml")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }
}

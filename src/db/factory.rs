//! Repository factory for dependency injection.
//!
//! Creates and configures repository instances based on runtime
//! configuration (environment variables or `repository.toml`).

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::error::{RepositoryError, RepositoryResult};
use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::{PostgresConfig, PostgresRepository};
use super::repository::FullRepository;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
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
    /// Reads `REPOSITORY_TYPE`; defaults to Postgres when `DATABASE_URL` is
    /// present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config = PostgresConfig::from_env()
                        .map_err(RepositoryError::configuration)?;
                    let repo = PostgresRepository::new(config)?;
                    Ok(Arc::new(repo) as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a repository from environment configuration.
    pub fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        Self::create(RepositoryType::from_env())
    }

    /// Create a repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config)
    }

    /// Create a repository from `repository.toml` in a standard location.
    pub fn from_default_config() -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_repository_config(&config)
    }

    fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let pg_config = config.to_postgres_config()?.ok_or_else(|| {
                        RepositoryError::configuration(
                            "Postgres repository requires database configuration",
                        )
                    })?;
                    let repo = PostgresRepository::new(pg_config)?;
                    Ok(Arc::new(repo) as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repository_types() {
        assert_eq!(
            "local".parse::<RepositoryType>().unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            "Postgres".parse::<RepositoryType>().unwrap(),
            RepositoryType::Postgres
        );
        assert_eq!(
            "pg".parse::<RepositoryType>().unwrap(),
            RepositoryType::Postgres
        );
        assert!("sqlite".parse::<RepositoryType>().is_err());
    }

    #[tokio::test]
    async fn local_factory_produces_a_healthy_repository() {
        let repo = RepositoryFactory::create_local();
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn builds_a_repository_from_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repository.toml");
        std::fs::write(&path, "[repository]\ntype = \"local\"\n").unwrap();

        let repo = RepositoryFactory::from_config_file(&path).unwrap();
        assert!(repo.health_check().await.unwrap());
    }

    #[test]
    fn config_file_with_unknown_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repository.toml");
        std::fs::write(&path, "[repository]\ntype = \"sqlite\"\n").unwrap();

        assert!(RepositoryFactory::from_config_file(&path).is_err());
    }
}

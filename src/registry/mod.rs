pub mod project_path;
pub mod store;

use thiserror::Error;
use tracing::{debug, warn};

pub use project_path::ProjectPath;
use store::RegistryStore;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Input to normalization was empty or otherwise unusable as a path.
    #[error("invalid project path {0:?}")]
    InvalidPath(String),

    /// The project list could not be written to disk. The in-memory list
    /// still holds the requested change, a later successful save repairs the
    /// file.
    #[error("failed to persist project registry")]
    Persist(#[source] anyhow::Error),
}

/// The set of tracked project directories, in insertion order. Every
/// successful mutation rewrites the whole persisted list before returning.
pub struct ProjectRegistry<S> {
    store: S,
    projects: Vec<ProjectPath>,
}

impl<S: RegistryStore> ProjectRegistry<S> {
    /// Loads the registry from `store`. Read failures of any kind produce an
    /// empty registry instead of an error, an absent or corrupt store is
    /// recovered by treating it as "no projects yet".
    pub async fn load(store: S) -> Self {
        let projects = match store.read().await {
            Ok(v) => v,
            Err(e) => {
                warn!("Couldn't read project registry, starting empty: {e:?}");
                vec![]
            }
        };
        debug!("Loaded {} tracked projects", projects.len());
        Self { store, projects }
    }

    /// Adds a project. Returns `Ok(false)` without touching the store when
    /// the normalized path is already tracked.
    pub async fn add(&mut self, raw: &str) -> Result<bool, RegistryError> {
        let path = ProjectPath::normalize(raw)?;
        if self.projects.contains(&path) {
            return Ok(false);
        }
        self.projects.push(path);
        self.persist().await?;
        Ok(true)
    }

    /// Removes a project. Removing a path that isn't tracked is a no-op and
    /// returns `Ok(false)`.
    pub async fn remove(&mut self, raw: &str) -> Result<bool, RegistryError> {
        let path = ProjectPath::normalize(raw)?;
        let Some(position) = self.projects.iter().position(|v| *v == path) else {
            return Ok(false);
        };
        self.projects.remove(position);
        self.persist().await?;
        Ok(true)
    }

    pub fn projects(&self) -> &[ProjectPath] {
        &self.projects
    }

    async fn persist(&self) -> Result<(), RegistryError> {
        self.store
            .write(&self.projects)
            .await
            .map_err(RegistryError::Persist)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};
    use tempfile::tempdir;

    use super::{
        store::{JsonRegistryStore, RegistryStore},
        ProjectPath, ProjectRegistry, RegistryError,
    };

    #[tokio::test]
    async fn test_add_and_list_preserve_insertion_order() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonRegistryStore::new(dir.path().join("projects.json"))?;
        let mut registry = ProjectRegistry::load(store).await;

        assert!(registry.add("/home/u/proj2").await?);
        assert!(registry.add("/home/u/proj1").await?);

        let listed: Vec<&str> = registry.projects().iter().map(|v| v.as_str()).collect();
        assert_eq!(listed, vec!["/home/u/proj2", "/home/u/proj1"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_is_idempotent_under_normalization() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonRegistryStore::new(dir.path().join("projects.json"))?;
        let mut registry = ProjectRegistry::load(store).await;

        assert!(registry.add("/home/u/proj1").await?);
        assert!(!registry.add("/home/u/proj1/").await?);
        assert_eq!(registry.projects().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_rejects_empty_path() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonRegistryStore::new(dir.path().join("projects.json"))?;
        let mut registry = ProjectRegistry::load(store).await;

        assert!(matches!(
            registry.add("   ").await,
            Err(RegistryError::InvalidPath(_))
        ));
        assert!(registry.projects().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_absent_path_is_noop() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonRegistryStore::new(dir.path().join("projects.json"))?;
        let mut registry = ProjectRegistry::load(store).await;

        registry.add("/home/u/proj1").await?;
        assert!(!registry.remove("/home/u/other").await?);
        assert_eq!(registry.projects().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_mutations_survive_reload() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("projects.json");

        {
            let store = JsonRegistryStore::new(file.clone())?;
            let mut registry = ProjectRegistry::load(store).await;
            registry.add("/home/u/proj2").await?;
            registry.add("/home/u/proj1").await?;
            registry.remove("/home/u/proj2/").await?;
        }

        let store = JsonRegistryStore::new(file)?;
        let registry = ProjectRegistry::load(store).await;
        let listed: Vec<&str> = registry.projects().iter().map(|v| v.as_str()).collect();
        assert_eq!(listed, vec!["/home/u/proj1"]);
        Ok(())
    }

    /// Store that accepts nothing, for checking persist failure semantics.
    struct FailingStore;

    impl RegistryStore for FailingStore {
        async fn read(&self) -> Result<Vec<ProjectPath>> {
            Ok(vec![])
        }

        async fn write(&self, _projects: &[ProjectPath]) -> Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_in_memory_entry() -> Result<()> {
        let mut registry = ProjectRegistry::load(FailingStore).await;

        let result = registry.add("/home/u/proj1").await;
        assert!(matches!(result, Err(RegistryError::Persist(_))));

        // The user's intent is kept so a later save can repair the file.
        assert_eq!(registry.projects().len(), 1);
        assert!(!registry.add("/home/u/proj1").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_recovers_from_read_error() -> Result<()> {
        struct BrokenReadStore;

        impl RegistryStore for BrokenReadStore {
            async fn read(&self) -> Result<Vec<ProjectPath>> {
                Err(anyhow!("io error"))
            }

            async fn write(&self, _projects: &[ProjectPath]) -> Result<()> {
                Ok(())
            }
        }

        let registry = ProjectRegistry::load(BrokenReadStore).await;
        assert!(registry.projects().is_empty());
        Ok(())
    }
}

use std::{future::Future, io::ErrorKind, path::PathBuf};

use anyhow::Result;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{debug, warn};

use super::project_path::ProjectPath;

/// Interface for abstracting persistence of the project list.
pub trait RegistryStore {
    /// Retrieves the persisted project list. A missing or unreadable store
    /// reads as an empty list, booting into "no projects yet" is always valid.
    fn read(&self) -> impl Future<Output = Result<Vec<ProjectPath>>> + Send;

    /// Replaces the persisted project list with `projects`.
    fn write(&self, projects: &[ProjectPath]) -> impl Future<Output = Result<()>> + Send;
}

/// The main realization of [RegistryStore]. Keeps the list as a JSON array of
/// path strings in a single file.
pub struct JsonRegistryStore {
    file_path: PathBuf,
}

impl JsonRegistryStore {
    pub fn new(file_path: PathBuf) -> Result<Self, std::io::Error> {
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    async fn read_inner(&self) -> Result<Vec<ProjectPath>> {
        let contents = match tokio::fs::read_to_string(&self.file_path).await {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };

        let entries = match serde_json::from_str::<Vec<String>>(&contents) {
            Ok(v) => v,
            Err(e) => {
                // ignore illegal content. Might happen after shutdowns
                warn!(
                    "During parsing in path {:?} found illegal json: {e}",
                    self.file_path
                );
                return Ok(vec![]);
            }
        };

        let mut projects = Vec::<ProjectPath>::new();
        for entry in entries {
            let path = match ProjectPath::normalize(&entry) {
                Ok(v) => v,
                Err(e) => {
                    warn!("Skipping unusable registry entry {entry:?}: {e}");
                    continue;
                }
            };
            if !projects.contains(&path) {
                projects.push(path);
            }
        }
        Ok(projects)
    }
}

impl RegistryStore for JsonRegistryStore {
    async fn read(&self) -> Result<Vec<ProjectPath>> {
        debug!("Extracting {:?}", self.file_path);
        self.read_inner().await
    }

    async fn write(&self, projects: &[ProjectPath]) -> Result<()> {
        // Write into a sibling file and rename over the target. A cut-off
        // write must never leave a truncated file as the only copy.
        let temp_path = self.file_path.with_extension("json.tmp");

        let mut buffer = serde_json::to_vec_pretty(projects)?;
        buffer.push(b'\n');

        let mut file = File::create(&temp_path).await?;
        file.write_all(&buffer).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&temp_path, &self.file_path).await?;
        Ok(())
    }
}

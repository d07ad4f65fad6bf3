use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::RegistryError;

/// A normalized path to a tracked repository root.
///
/// Normalization trims surrounding whitespace and trailing separators, so
/// `/home/u/proj` and `/home/u/proj/` compare equal inside the registry.
/// The path is not resolved against the filesystem, a project can be
/// registered before it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectPath(String);

impl ProjectPath {
    pub fn normalize(raw: &str) -> Result<ProjectPath, RegistryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::InvalidPath(raw.to_string()));
        }

        let stripped = trimmed.trim_end_matches(['/', std::path::MAIN_SEPARATOR]);

        // Trimming "/" down to nothing would lose the path entirely.
        if stripped.is_empty() {
            return Ok(ProjectPath(trimmed[..1].to_string()));
        }

        Ok(ProjectPath(stripped.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display name of the project, its final path component.
    pub fn name(&self) -> &str {
        self.0
            .rsplit(['/', std::path::MAIN_SEPARATOR])
            .next()
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.0)
    }
}

impl Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Job description presets persisted as a `{title: description}` JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Preset file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preset file JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A named job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPreset {
    pub title: String,
    pub description: String,
}

/// Presets used when the file is missing or unreadable.
pub fn default_presets() -> BTreeMap<String, String> {
    [
        (
            "Data Scientist",
            "Looking for a candidate with expertise in ML, Python, data visualization, and cloud.",
        ),
        (
            "Frontend Developer",
            "Must be skilled in React, CSS, HTML, and responsive UI design.",
        ),
        (
            "DevOps Engineer",
            "Strong knowledge of Docker, Kubernetes, AWS, and CI/CD pipelines.",
        ),
    ]
    .into_iter()
    .map(|(title, description)| (title.to_string(), description.to_string()))
    .collect()
}

/// Job description presets backed by a `{title: description}` JSON file.
///
/// The whole map is held in memory; every save rewrites the file.
pub struct JobPresetStore {
    path: PathBuf,
    presets: RwLock<BTreeMap<String, String>>,
}

impl JobPresetStore {
    /// Loads presets from `path`, falling back to [`default_presets`] when the
    /// file does not exist or does not parse.
    pub async fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let presets = match read_presets(&path).await {
            Ok(presets) => {
                info!("Loaded {} job description preset(s) from {}", presets.len(), path.display());
                presets
            }
            Err(PresetError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No preset file at {}; using defaults", path.display());
                default_presets()
            }
            Err(e) => {
                warn!("Ignoring preset file {}: {e}", path.display());
                default_presets()
            }
        };

        Self {
            path,
            presets: RwLock::new(presets),
        }
    }

    pub async fn list(&self) -> Vec<JobPreset> {
        self.presets
            .read()
            .await
            .iter()
            .map(|(title, description)| JobPreset {
                title: title.clone(),
                description: description.clone(),
            })
            .collect()
    }

    pub async fn get(&self, title: &str) -> Option<String> {
        self.presets.read().await.get(title).cloned()
    }

    /// Inserts or replaces a preset and persists the full set.
    /// The in-memory map is only updated once the file write succeeds.
    pub async fn save(&self, title: &str, description: &str) -> Result<JobPreset, PresetError> {
        let mut presets = self.presets.write().await;

        let mut updated = presets.clone();
        updated.insert(title.to_string(), description.to_string());
        write_presets(&self.path, &updated).await?;
        *presets = updated;

        info!("Saved job description preset '{title}'");
        Ok(JobPreset {
            title: title.to_string(),
            description: description.to_string(),
        })
    }
}

async fn read_presets(path: &Path) -> Result<BTreeMap<String, String>, PresetError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Writes a sibling temp file and renames it over `path`, so readers see
/// either the old file or the new one, never a partial write.
async fn write_presets(path: &Path, presets: &BTreeMap<String, String>) -> Result<(), PresetError> {
    let json = serde_json::to_string_pretty(presets)?;
    let tmp_path = temp_path(path);
    tokio::fs::write(&tmp_path, json).await?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "presets".into());
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JobPresetStore::open(dir.path().join("presets.json")).await;

        let titles: Vec<String> = store.list().await.into_iter().map(|p| p.title).collect();
        assert_eq!(
            titles,
            vec!["Data Scientist", "DevOps Engineer", "Frontend Developer"]
        );
    }

    #[tokio::test]
    async fn test_malformed_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JobPresetStore::open(&path).await;
        assert!(store.get("DevOps Engineer").await.is_some());
    }

    #[tokio::test]
    async fn test_existing_file_replaces_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.json");
        std::fs::write(&path, r#"{"Rust Engineer": "Tokio, axum, serde"}"#).unwrap();

        let store = JobPresetStore::open(&path).await;
        assert_eq!(store.list().await.len(), 1);
        assert_eq!(
            store.get("Rust Engineer").await.as_deref(),
            Some("Tokio, axum, serde")
        );
        assert!(store.get("DevOps Engineer").await.is_none());
    }

    #[tokio::test]
    async fn test_save_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.json");

        let store = JobPresetStore::open(&path).await;
        store
            .save("Frontend Developer", "React, TypeScript, accessibility")
            .await
            .unwrap();
        store.save("SRE", "On-call, Kubernetes").await.unwrap();

        let reloaded = JobPresetStore::open(&path).await;
        assert_eq!(
            reloaded.get("Frontend Developer").await.as_deref(),
            Some("React, TypeScript, accessibility")
        );
        assert_eq!(reloaded.get("SRE").await.as_deref(), Some("On-call, Kubernetes"));
        assert_eq!(reloaded.list().await.len(), 4);
    }

    #[tokio::test]
    async fn test_save_replaces_file_without_leaving_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.json");
        std::fs::write(&path, r#"{"Rust Engineer": "Tokio, axum, serde"}"#).unwrap();

        let store = JobPresetStore::open(&path).await;
        store.save("SRE", "On-call, Kubernetes").await.unwrap();

        assert!(!temp_path(&path).exists());
        let on_disk: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 2);
        assert_eq!(on_disk["Rust Engineer"], "Tokio, axum, serde");
    }

    #[tokio::test]
    async fn test_stale_temp_file_is_ignored_and_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("presets.json");
        std::fs::write(&path, r#"{"Rust Engineer": "Tokio"}"#).unwrap();
        std::fs::write(temp_path(&path), "{ half written").unwrap();

        let store = JobPresetStore::open(&path).await;
        assert_eq!(store.get("Rust Engineer").await.as_deref(), Some("Tokio"));

        store.save("SRE", "On-call").await.unwrap();
        let reloaded = JobPresetStore::open(&path).await;
        assert_eq!(reloaded.list().await.len(), 2);
    }

    #[test]
    fn test_temp_path_is_a_sibling() {
        let path = Path::new("/data/job_descriptions.json");
        assert_eq!(
            temp_path(path),
            PathBuf::from("/data/job_descriptions.json.tmp")
        );
    }

    #[tokio::test]
    async fn test_failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = JobPresetStore::open(dir.path().join("missing-dir").join("presets.json")).await;

        let result = store.save("SRE", "On-call").await;
        assert!(matches!(result, Err(PresetError::Io(_))));
        assert!(store.get("SRE").await.is_none());
    }
}

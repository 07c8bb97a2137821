//! File-backed selection store
//!
//! Persists the modal filter selections as a small JSON file - the
//! server-side analog of the browser's localStorage. Writes go through a
//! temp file and rename so a crash mid-write never leaves a torn file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use promoboard_core::selections::ports::SelectionStore;
use promoboard_domain::{PromoboardError, Result, SavedSelections};
use tracing::{debug, warn};

/// JSON-file selection store
pub struct FileSelectionStore {
    path: PathBuf,
}

impl FileSelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SelectionStore for FileSelectionStore {
    async fn load(&self) -> Result<Option<SavedSelections>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(PromoboardError::Store(format!(
                    "failed to read selections from {}: {err}",
                    self.path.display()
                )))
            }
        };

        match serde_json::from_str(&contents) {
            Ok(selections) => Ok(Some(selections)),
            Err(err) => {
                // A torn or hand-edited file starts the user fresh instead
                // of wedging the filter dialog
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "discarding unreadable selections file"
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, selections: &SavedSelections) -> Result<()> {
        let contents = serde_json::to_string_pretty(selections)
            .map_err(|err| PromoboardError::Store(format!("failed to encode selections: {err}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|err| {
                    PromoboardError::Store(format!(
                        "failed to create {}: {err}",
                        parent.display()
                    ))
                })?;
            }
        }

        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, contents).await.map_err(|err| {
            PromoboardError::Store(format!("failed to write {}: {err}", staging.display()))
        })?;
        tokio::fs::rename(&staging, &self.path).await.map_err(|err| {
            PromoboardError::Store(format!("failed to commit {}: {err}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), "selections saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selections() -> SavedSelections {
        SavedSelections {
            promo_type: vec!["Promo".to_string()],
            channel_tags: vec!["Web".to_string(), "App".to_string()],
            year: vec!["2026".to_string()],
            ..SavedSelections::default()
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSelectionStore::new(dir.path().join("selections.json"));

        store.save(&selections()).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, Some(selections()));
    }

    #[tokio::test]
    async fn load_without_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSelectionStore::new(dir.path().join("never-written.json"));
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_fresh_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selections.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = FileSelectionStore::new(&path);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_replaces_previous_selections() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSelectionStore::new(dir.path().join("selections.json"));

        store.save(&selections()).await.unwrap();
        let updated = SavedSelections { status: vec!["draft".to_string()], ..SavedSelections::default() };
        store.save(&updated).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSelectionStore::new(dir.path().join("nested/deeper/selections.json"));
        store.save(&selections()).await.unwrap();
        assert!(store.path().exists());
    }
}

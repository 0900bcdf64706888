//! Store backed by one JSON file per path inside a data directory.

use crate::store::{Store, StoreError};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<path>.json`. Paths are plain names; anything that could escape the directory is refused.
    fn file_for(&self, path: &str) -> Result<PathBuf, StoreError> {
        let valid = !path.is_empty()
            && path
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::Unavailable(format!("Invalid store path '{}'", path)));
        }
        Ok(self.dir.join(format!("{}.json", path)))
    }
}

impl Store for FileStore {
    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let file = self.file_for(path)?;
        log::debug!("Reading {}", file.display());
        match tokio::fs::read(&file).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let file = self.file_for(path)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(&value)?;
        // Write beside the target then rename, so readers never see half a document.
        let tmp = file.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &file).await?;
        Ok(())
    }
}

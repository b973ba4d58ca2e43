use crate::errors::LoadError;
use crate::lifecycle::DatasetSource;
use crate::models::Dataset;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::info;

pub const DEFAULT_DATA_PATH: &str = "data/dashboard_data.json";

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("DASHBOARD_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_DATA_PATH)
}

pub async fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let bytes = fs::read(path).await.map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_dataset(&bytes)?;
    info!(path = %path.display(), "read dataset");
    Ok(dataset)
}

pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, LoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Dataset read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<Dataset, LoadError> {
        load_dataset(&self.path).await
    }
}

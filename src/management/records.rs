use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::TrackRecord;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot write output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot serialize record: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The newline-delimited JSON file a run produces.
pub struct RecordFile {
    path: PathBuf,
}

impl RecordFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One JSON object per line, non-ASCII characters written as-is.
    pub fn render(records: &[TrackRecord]) -> Result<String, OutputError> {
        let mut out = String::new();
        for record in records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Writes `records`, replacing any previous file at the same path.
    ///
    /// The content goes to a sibling temporary file first and is renamed into
    /// place, so readers never see a half-written file.
    ///
    /// # Returns
    ///
    /// `true` if a previous file was replaced.
    pub async fn persist(&self, records: &[TrackRecord]) -> Result<bool, OutputError> {
        let content = Self::render(records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let replaced = self.path.is_file();
        let tmp = self.tmp_path();
        let written = match async_fs::write(&tmp, content).await {
            Ok(()) => async_fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = async_fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        Ok(replaced)
    }

    pub async fn load(&self) -> Result<Vec<TrackRecord>, OutputError> {
        let content = async_fs::read_to_string(&self.path).await?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(OutputError::from))
            .collect()
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

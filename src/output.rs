//! Match records and the append-only output file
//!
//! Each confirmed match is written as a one-element YAML sequence. Because the
//! serializer emits no document markers, successive appends concatenate into a single
//! valid YAML sequence, so the whole file can be read back as `Vec<MatchRecord>`.

use crate::classifier::PackPath;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// One confirmed pack-to-link association
///
/// Field order is the on-disk key order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Directory containing the pack (the pack's parent)
    pub path: String,

    /// Locator of the matched release; omitted when the indexer gave none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Pack directory name, equal to the matched release title
    #[serde(rename = "packName")]
    pub pack_name: String,

    /// The file entry that triggered the search
    pub entry: String,
}

impl MatchRecord {
    /// Build a record for a classified pack and the matched release link
    pub fn new(pack: &PackPath, link: Option<String>) -> Self {
        Self {
            path: pack.pack_parent_path.to_string_lossy().into_owned(),
            link,
            pack_name: pack.pack_name.clone(),
            entry: pack.entry.to_string_lossy().into_owned(),
        }
    }

    /// Render this record as the YAML document appended to the output file
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(std::slice::from_ref(self))?)
    }
}

/// Append-only writer for match records
#[derive(Clone, Debug)]
pub struct OutputSink {
    path: PathBuf,
}

impl OutputSink {
    /// Create a sink writing to `path`; the file is created on first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file if needed; existing content is never touched
    pub async fn append(&self, record: &MatchRecord) -> Result<()> {
        let document = record.to_yaml()?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(document.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Read every record currently in the output file
    ///
    /// A missing file reads as empty.
    pub async fn read_all(&self) -> Result<Vec<MatchRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_yaml::from_str(&content)?)
    }
}

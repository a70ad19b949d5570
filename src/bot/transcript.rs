//! Append-only chat transcript file.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::BotResult;

/// Writes one timestamped line per observed chat message.
///
/// Separate from the tracing output so the transcript stays a plain,
/// grep-friendly record of the conversation.
#[derive(Debug, Clone)]
pub struct Transcript {
    path: PathBuf,
}

impl Transcript {
    /// Creates a transcript writer for the given file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Appends a line, creating the file on first write.
    pub async fn log(&self, line: &str) -> BotResult<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let stamped = format!("{} - {}\n", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"), line);
        file.write_all(stamped.as_bytes()).await?;
        Ok(())
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

/// Generated file content waiting to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime: &'static str,
    pub content: Vec<u8>,
}

impl Download {
    pub fn new(filename: impl Into<String>, mime: &'static str, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            mime,
            content: content.into(),
        }
    }
}

/// Destination for generated files. Failures are returned to the caller
/// as-is; nothing is retried.
pub trait DownloadSink {
    fn deliver(&self, download: Download) -> io::Result<PathBuf>;
}

/// Saves downloads into a directory, keeping only the final path component
/// of the requested filename.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for FileSink {
    fn deliver(&self, download: Download) -> io::Result<PathBuf> {
        let name = Path::new(&download.filename).file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid download filename: {:?}", download.filename),
            )
        })?;

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, &download.content)?;

        info!(
            "Saved {} ({}, {} bytes)",
            path.display(),
            download.mime,
            download.content.len()
        );
        Ok(path)
    }
}

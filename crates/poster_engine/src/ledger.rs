use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use poster_core::{Feed, PublishDecision};
use poster_logging::{poster_debug, poster_info};
use tempfile::NamedTempFile;

use crate::LedgerError;

/// Single-line marker file holding the link of the last published item.
#[derive(Debug, Clone)]
pub struct MarkerLedger {
    path: PathBuf,
}

impl MarkerLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current marker content. A missing file reads as empty and is created,
    /// parent directories included, so the first commit has a stable diff.
    pub fn read(&self) -> Result<String, LedgerError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                poster_debug!("Read last post file: {:?}", self.path);
                Ok(content)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                poster_info!("No {:?} file found, creating it", self.path);
                self.bootstrap()?;
                Ok(String::new())
            }
            Err(source) => Err(self.io_error(source)),
        }
    }

    /// Whether the newest item was already published. Never writes the link.
    pub fn check(&self, feed: &Feed) -> Result<bool, LedgerError> {
        let latest = feed.latest().ok_or(LedgerError::EmptyFeed)?;
        self.check_link(&latest.link)
    }

    pub fn check_link(&self, link: &str) -> Result<bool, LedgerError> {
        let marker = self.read()?;
        let already = PublishDecision::from_marker(&marker, link).already_published();
        if already {
            poster_info!("Post already published: {}", link);
        }
        Ok(already)
    }

    /// Check, and on a new item overwrite the marker with its link right away.
    ///
    /// Returns `true` when the item was already published; the file is then left
    /// untouched.
    pub fn check_and_mark(&self, feed: &Feed) -> Result<bool, LedgerError> {
        let latest = feed.latest().ok_or(LedgerError::EmptyFeed)?;
        if self.check_link(&latest.link)? {
            return Ok(true);
        }
        self.mark(&latest.link)?;
        Ok(false)
    }

    /// Replace the marker with `link`, no trailing newline.
    pub fn mark(&self, link: &str) -> Result<(), LedgerError> {
        let dir = self.parent_dir();
        ensure_marker_dir(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(link.as_bytes())
            .and_then(|_| tmp.flush())
            .and_then(|_| tmp.as_file_mut().sync_all())
            .map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        poster_info!("Saving post link to {:?}: {}", self.path, link);
        Ok(())
    }

    fn bootstrap(&self) -> Result<(), LedgerError> {
        ensure_marker_dir(&self.parent_dir())?;
        fs::write(&self.path, "").map_err(|e| self.io_error(e))
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn io_error(&self, source: io::Error) -> LedgerError {
        LedgerError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Ensure the marker directory exists; create if missing.
pub fn ensure_marker_dir(dir: &Path) -> Result<(), LedgerError> {
    let directory_error = |message: String| LedgerError::Directory {
        path: dir.to_path_buf(),
        message,
    };
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| directory_error(e.to_string()))?;
        if !meta.is_dir() {
            return Err(directory_error("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| directory_error(e.to_string()))?;
    }
    Ok(())
}

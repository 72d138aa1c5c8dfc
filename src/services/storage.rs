use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::AppResult;

/// The flat directory holding uploads and converted files.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

/// `stem.ext` for the first attempt, `stem (n).ext` afterwards.
pub fn unique_name(stem: &str, extension: Option<&str>, attempt: u32) -> String {
    let stem = if attempt == 0 {
        stem.to_string()
    } else {
        format!("{} ({})", stem, attempt)
    };

    match extension {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    }
}

impl Storage {
    pub async fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        info!(root = %root.display(), "Storage directory ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates a new file named after `file_name`, suffixing the stem until
    /// the name is free.
    ///
    /// Each attempt is an exclusive create, so two requests racing for the
    /// same name can never both get it.
    pub async fn create_unique(&self, file_name: &str) -> AppResult<(PathBuf, File)> {
        let name = Path::new(file_name);
        let stem = name
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        let extension = name.extension().and_then(|e| e.to_str());

        let mut attempt = 0u32;
        loop {
            let candidate = self.root.join(unique_name(stem, extension, attempt));
            match OpenOptions::new().write(true).create_new(true).open(&candidate).await {
                Ok(file) => return Ok((candidate, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %candidate.display(), "Name taken, trying next suffix");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Writes `contents` under a collision-free variant of `file_name`.
    pub async fn write_unique(&self, file_name: &str, contents: &[u8]) -> AppResult<PathBuf> {
        let (path, mut file) = self.create_unique(file_name).await?;

        let written = async {
            file.write_all(contents).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            self.remove_quietly(&path).await.ok();
            return Err(e.into());
        }

        debug!(path = %path.display(), bytes = contents.len(), "File written");
        Ok(path)
    }

    /// Removes a file; a file that is already gone counts as removed.
    pub async fn remove_quietly(&self, path: &Path) -> AppResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "File removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "File already gone");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove file");
                Err(e.into())
            }
        }
    }

    /// Path for a download name, or `None` unless the name is a single plain
    /// path segment.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let unsafe_name = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(|c| c == '/' || c == '\\' || c == '\0');

        if unsafe_name {
            None
        } else {
            Some(self.root.join(name))
        }
    }
}

//! In-memory snapshot of the repository files under review.
//!
//! Every accepted file is copied into one contiguous arena and indexed by
//! its sanitized relative path. Snapshots come from a local checkout or
//! from a GitHub zip archive.

mod entry;
mod error;
mod github;
mod path;


pub use entry::{short_digest, FileEntry};
pub use error::SnapshotError;
pub use github::GithubRepo;
pub use path::{sanitize, strip_archive_root};

use crate::filter::FileFilter;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Immutable, arena-backed set of repository files
#[derive(Debug)]
pub struct Snapshot {
    arena: Vec<u8>,
    index: BTreeMap<String, FileEntry>,
    source: String,
}

/// Mutable builder for a [`Snapshot`]
pub struct SnapshotBuilder {
    arena: Vec<u8>,
    index: BTreeMap<String, FileEntry>,
    max_file_size: u64,
    max_total_size: u64,
    source: String,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            index: BTreeMap::new(),
            max_file_size: 10 * 1024 * 1024,   // 10 MB per file
            max_total_size: 200 * 1024 * 1024, // 200 MB total
            source: String::new(),
        }
    }

    pub fn max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn max_total_size(mut self, size: u64) -> Self {
        self.max_total_size = size;
        self
    }

    /// Describe where the files came from (URL or directory)
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Copy a file into the arena under its sanitized path.
    /// Re-adding a path replaces the index entry.
    pub fn add_file(&mut self, raw_path: &str, data: &[u8]) -> Result<(), SnapshotError> {
        let path = sanitize(raw_path)?;

        let size = data.len() as u64;
        if size > self.max_file_size {
            return Err(SnapshotError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        let new_total = self.arena.len() as u64 + size;
        if new_total > self.max_total_size {
            return Err(SnapshotError::FileTooLarge {
                size: new_total,
                max: self.max_total_size,
            });
        }

        let offset = self.arena.len();
        self.arena.extend_from_slice(data);

        let digest = hex::encode(Sha256::digest(data));
        self.index.insert(
            path.clone(),
            FileEntry {
                offset,
                length: data.len(),
                path,
                digest,
            },
        );
        Ok(())
    }

    /// Walk a local checkout, adding every file the filter accepts.
    ///
    /// Ignored directories are pruned. Unreadable and non-UTF-8 files are
    /// logged and skipped.
    pub fn ingest_dir(mut self, root: &Path, filter: &FileFilter) -> Result<Self, SnapshotError> {
        info!(root = %root.display(), "Scanning local repository");
        if self.source.is_empty() {
            self.source = root.display().to_string();
        }

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                match relative(root, e.path()) {
                    Some(rel) => !filter.is_ignored_dir(&rel),
                    None => true,
                }
            });

        for entry in walker {
            let entry = entry.map_err(|e| SnapshotError::Io {
                path: e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string()),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(rel) = relative(root, entry.path()) else {
                continue;
            };
            if !filter.should_analyze(&rel) {
                continue;
            }

            let data = match std::fs::read(entry.path()) {
                Ok(data) => data,
                Err(e) => {
                    warn!(path = %rel, error = %e, "Skipping unreadable file");
                    continue;
                }
            };
            if std::str::from_utf8(&data).is_err() {
                warn!(path = %rel, "Skipping file that is not valid UTF-8");
                continue;
            }
            self.add_file(&rel, &data)?;
            debug!(path = %rel, bytes = data.len(), "Added file");
        }

        info!(files = self.index.len(), bytes = self.arena.len(), "Local scan complete");
        Ok(self)
    }

    /// Download a repository zip archive and add every file the filter accepts
    pub async fn ingest_github(
        mut self,
        repo: &GithubRepo,
        token: Option<&str>,
        filter: &FileFilter,
    ) -> Result<Self, SnapshotError> {
        let url = repo.archive_url();
        info!(repo = %repo.full_name(), %url, "Downloading repository archive");
        if self.source.is_empty() {
            self.source = format!("https://github.com/{}", repo.full_name());
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("repolens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SnapshotError::DownloadFailed(e.to_string()))?;

        let mut request = client.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SnapshotError::DownloadFailed(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnapshotError::DownloadFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            SnapshotError::DownloadFailed(format!("Failed to read response body: {}", e))
        })?;
        debug!(bytes = bytes.len(), "Archive downloaded");

        self.add_archive(&bytes, filter)?;
        info!(files = self.index.len(), bytes = self.arena.len(), "Archive ingested");
        Ok(self)
    }

    /// Add the accepted entries of an in-memory GitHub-style zip archive
    pub fn add_archive(&mut self, bytes: &[u8], filter: &FileFilter) -> Result<(), SnapshotError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| SnapshotError::ArchiveFailed(e.to_string()))?;

        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| SnapshotError::ArchiveFailed(e.to_string()))?;
            if file.is_dir() {
                continue;
            }

            let raw_path = file.name().to_string();
            let Some(path) = strip_archive_root(&raw_path) else {
                continue;
            };
            if !filter.should_analyze(path) {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)
                .map_err(|e| SnapshotError::ArchiveFailed(e.to_string()))?;
            if std::str::from_utf8(&contents).is_err() {
                warn!(path, "Skipping archive entry that is not valid UTF-8");
                continue;
            }
            self.add_file(path, &contents)?;
        }
        Ok(())
    }

    pub fn build(self) -> Snapshot {
        Snapshot {
            arena: self.arena,
            index: self.index,
            source: self.source,
        }
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot {
    /// A file's bytes, borrowed from the arena
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.index
            .get(path)
            .map(|entry| &self.arena[entry.offset..entry.offset + entry.length])
    }

    /// A file's contents as text; `None` if missing or not valid UTF-8
    pub fn text(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Entries in path order
    pub fn list(&self) -> impl Iterator<Item = &FileEntry> {
        self.index.values()
    }

    pub fn get_entry(&self, path: &str) -> Option<&FileEntry> {
        self.index.get(path)
    }

    pub fn file_count(&self) -> usize {
        self.index.len()
    }

    pub fn total_size(&self) -> usize {
        self.arena.len()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// `/`-joined path of `path` relative to `root`
fn relative(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
    let joined = parts?.join("/");
    (!joined.is_empty()).then_some(joined)
}

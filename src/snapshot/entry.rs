/// Location and fingerprint of one file inside the snapshot arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Byte offset into the arena
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
    /// Sanitized repository-relative path (e.g., "app/Models/User.php")
    pub path: String,
    /// Hex SHA-256 of the contents
    pub digest: String,
}

impl FileEntry {
    pub fn short_digest(&self) -> &str {
        short_digest(&self.digest)
    }
}

/// First 12 hex digits, enough to tell revisions apart in a report
pub fn short_digest(digest: &str) -> &str {
    &digest[..digest.len().min(12)]
}

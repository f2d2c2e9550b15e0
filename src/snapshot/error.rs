use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to download repository: {0}")]
    DownloadFailed(String),

    #[error("Failed to read ZIP archive: {0}")]
    ArchiveFailed(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Not a GitHub repository URL: {0}")]
    InvalidUrl(String),

    #[error("File too large: {size} bytes (max: {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

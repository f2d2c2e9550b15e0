// Public API exports
pub mod ad;
pub mod chunker;
pub mod completion;
pub mod complexity;
pub mod config;
pub mod filter;
pub mod logging;
pub mod review;
pub mod snapshot;

// Re-export main types for convenience
pub use chunker::{
    split, split_text, BpeCounter, Chunk, ChunkError, ChunkMetadata, Document, HeuristicCounter,
    TokenCounter, TokenizeError, DEFAULT_MAX_TOKENS,
};

pub use snapshot::{FileEntry, GithubRepo, Snapshot, SnapshotBuilder, SnapshotError};

pub use filter::FileFilter;

pub use complexity::{analyze_complexity, ComplexityReport, Thresholds};

pub use completion::{ChatRequest, Completer, CompletionError, CompletionSettings, OpenAiClient};

pub use review::{FileKind, FileReview, Report, Reviewer};

pub use config::ReviewConfig;

pub use ad::{AdCopy, AdError, AdGenerator, Language};

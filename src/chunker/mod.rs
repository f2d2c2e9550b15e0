mod counter;
mod error;
mod splitter;


pub use counter::{BpeCounter, HeuristicCounter, TokenCounter};
pub use error::{ChunkError, TokenizeError};
pub use splitter::{
    Chunk, ChunkMetadata, Document, LINE_SEPARATOR, reassemble, split, split_text,
};

/// Default per-request token limit; chunks get half of it
pub const DEFAULT_MAX_TOKENS: i64 = 4000;

/// Budget reserved for code in a request of `max_tokens`, leaving the
/// other half for the prompt wrapper and the reply.
pub fn chunk_budget(max_tokens: i64) -> i64 {
    max_tokens / 2
}

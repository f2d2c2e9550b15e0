use thiserror::Error;

/// Failure raised by a [`TokenCounter`](super::TokenCounter).
#[derive(Error, Debug)]
pub enum TokenizeError {
    #[error("Failed to load token encoding: {0}")]
    Encoding(String),

    #[error("Failed to tokenize text: {0}")]
    Tokenize(String),
}

#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("Invalid token budget {budget}: must be greater than zero")]
    InvalidArgument { budget: i64 },

    #[error("Token counter failed")]
    Tokenizer(#[from] TokenizeError),
}

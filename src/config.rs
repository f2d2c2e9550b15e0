//! Review run settings, passed explicitly to the components that need them.

use crate::chunker::{chunk_budget, DEFAULT_MAX_TOKENS};
use crate::complexity::Thresholds;

/// Reply tokens requested per reviewed chunk
pub const DEFAULT_REPLY_TOKENS: u32 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewConfig {
    /// Context size assumed per request; half goes to code
    pub max_tokens: i64,
    pub reply_tokens: u32,
    pub thresholds: Thresholds,
}

impl ReviewConfig {
    /// Token budget handed to the chunk splitter
    pub fn chunk_budget(&self) -> i64 {
        chunk_budget(self.max_tokens)
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            reply_tokens: DEFAULT_REPLY_TOKENS,
            thresholds: Thresholds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReviewConfig::default();
        assert_eq!(config.max_tokens, 4000);
        assert_eq!(config.chunk_budget(), 2000);
        assert_eq!(config.thresholds.max_file_lines, 300);
        assert_eq!(config.thresholds.max_methods, 20);
        assert_eq!(config.thresholds.max_method_lines, 50);
    }

    #[test]
    fn test_tiny_max_tokens_gives_invalid_budget() {
        let config = ReviewConfig {
            max_tokens: 1,
            ..ReviewConfig::default()
        };
        assert_eq!(config.chunk_budget(), 0);
    }
}

use super::TokenizeError;
use tiktoken_rs::CoreBPE;

/// Maps text to an estimated token count for some downstream model.
pub trait TokenCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizeError>;
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> Result<usize, TokenizeError>,
{
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizeError> {
        self(text)
    }
}

/// Cheap estimate: one token per four characters, never zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicCounter;

impl HeuristicCounter {
    pub fn estimate(text: &str) -> usize {
        (text.chars().count() / 4).max(1)
    }
}

impl TokenCounter for HeuristicCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizeError> {
        Ok(Self::estimate(text))
    }
}

/// Exact counts using the `cl100k_base` vocabulary (gpt-3.5-turbo / gpt-4).
pub struct BpeCounter {
    bpe: CoreBPE,
}

impl BpeCounter {
    pub fn cl100k() -> Result<Self, TokenizeError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| TokenizeError::Encoding(e.to_string()))?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for BpeCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizeError> {
        Ok(self.bpe.encode_with_special_tokens(text).len())
    }
}

impl std::fmt::Debug for BpeCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BpeCounter").field("encoding", &"cl100k_base").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_estimation() {
        assert_eq!(HeuristicCounter::estimate(""), 1);
        assert_eq!(HeuristicCounter::estimate("test"), 1);
        assert_eq!(HeuristicCounter::estimate("test test"), 2);
        assert_eq!(HeuristicCounter::estimate(&"x".repeat(8000)), 2000);
    }

    #[test]
    fn test_heuristic_counts_chars_not_bytes() {
        // 8 chars, 24 bytes
        assert_eq!(HeuristicCounter::estimate("世界世界世界世界"), 2);
    }

    #[test]
    fn test_closure_counter() {
        let words = |text: &str| Ok::<_, TokenizeError>(text.split_whitespace().count());
        assert_eq!(words.count_tokens("one two three").unwrap(), 3);
    }

    #[test]
    fn test_bpe_counter_counts_tokens() {
        let counter = BpeCounter::cl100k().unwrap();
        let count = counter.count_tokens("hello world").unwrap();
        assert_eq!(count, 2);
        assert_eq!(counter.count_tokens("").unwrap(), 0);
    }
}

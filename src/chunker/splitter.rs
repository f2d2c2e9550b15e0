use super::{ChunkError, TokenCounter};

/// Separator used both to split a document and to rejoin chunk lines.
pub const LINE_SEPARATOR: &str = "\n";

/// Immutable, ordered lines borrowed from the source text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Document<'a> {
    /// Split text on `\n`. The empty string is a document with no lines;
    /// any other text keeps every line, including a trailing empty one.
    pub fn from_text(text: &'a str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            lines: text.split(LINE_SEPARATOR).collect(),
        }
    }

    pub fn from_lines(lines: Vec<&'a str>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A contiguous run of document lines, rejoined into one string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Lines joined by the separator, without a trailing one
    pub text: String,
    /// Metadata about the chunk
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Sum of each line's cost, separator included
    pub token_count: usize,
    /// First line covered, 1-based
    pub start_line: usize,
    /// Last line covered, 1-based, inclusive
    pub end_line: usize,
}

impl Chunk {
    pub fn line_count(&self) -> usize {
        self.metadata.end_line + 1 - self.metadata.start_line
    }
}

/// Greedily pack document lines into chunks whose estimated cost stays
/// within `budget`.
///
/// Each line costs `counter(line + "\n")`. A line that would push the
/// running total past the budget closes the current chunk and opens a new
/// one. A single line that alone exceeds the budget still becomes its own
/// chunk; lines are never split.
pub fn split<C>(document: &Document<'_>, counter: &C, budget: i64) -> Result<Vec<Chunk>, ChunkError>
where
    C: TokenCounter + ?Sized,
{
    if budget <= 0 {
        return Err(ChunkError::InvalidArgument { budget });
    }
    let budget = budget as u64;

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_tokens: u64 = 0;
    let mut start_line = 1;

    for (idx, line) in document.lines().iter().enumerate() {
        let line_tokens = counter.count_tokens(&format!("{line}{LINE_SEPARATOR}"))? as u64;

        if current_tokens + line_tokens > budget && !current.is_empty() {
            chunks.push(close_chunk(&current, current_tokens, start_line));
            current.clear();
            current_tokens = 0;
            start_line = idx + 1;
        }

        current.push(line);
        current_tokens += line_tokens;
    }

    if !current.is_empty() {
        chunks.push(close_chunk(&current, current_tokens, start_line));
    }

    Ok(chunks)
}

/// Convenience wrapper: build a [`Document`] from text and split it.
pub fn split_text<C>(text: &str, counter: &C, budget: i64) -> Result<Vec<Chunk>, ChunkError>
where
    C: TokenCounter + ?Sized,
{
    split(&Document::from_text(text), counter, budget)
}

/// Rejoin chunks into the text they were split from.
pub fn reassemble(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

fn close_chunk(lines: &[&str], token_count: u64, start_line: usize) -> Chunk {
    Chunk {
        text: lines.join(LINE_SEPARATOR),
        metadata: ChunkMetadata {
            token_count: token_count as usize,
            start_line,
            end_line: start_line + lines.len() - 1,
        },
    }
}

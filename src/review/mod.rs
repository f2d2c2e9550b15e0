//! Chunked model review of repository files.
//!
//! Each file gets a rule-based complexity report, is split into
//! token-budgeted chunks, and every chunk is sent to the model in order.

mod kind;
mod prompt;
mod report;


pub use kind::FileKind;
pub use prompt::{build_review_prompt, REVIEW_SYSTEM_PROMPT};
pub use report::{group_name, Report, ReportEntry, ReviewSummary, DEFAULT_REPORT_FILE};

use crate::chunker::{split_text, ChunkError, TokenCounter};
use crate::completion::{ChatRequest, Completer};
use crate::complexity::{analyze_complexity, ComplexityReport, Thresholds};
use crate::config::ReviewConfig;
use crate::snapshot::Snapshot;
use tracing::{info, info_span, warn, Instrument};

/// Model answer for one chunk, or why there is none
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    Reviewed(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub start_line: usize,
    pub end_line: usize,
    pub token_count: usize,
    pub outcome: SectionOutcome,
}

/// Everything learned about one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReview {
    pub path: String,
    pub kind: FileKind,
    pub digest: Option<String>,
    pub complexity: ComplexityReport,
    pub thresholds: Thresholds,
    pub sections: Vec<Section>,
}

impl FileReview {
    pub fn has_warnings(&self) -> bool {
        self.complexity.has_warnings()
    }

    pub fn failed_sections(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| matches!(s.outcome, SectionOutcome::Failed(_)))
            .count()
    }
}

pub struct Reviewer<C, T> {
    completer: C,
    counter: T,
    config: ReviewConfig,
}

impl<C, T> Reviewer<C, T>
where
    C: Completer,
    T: TokenCounter,
{
    pub fn new(completer: C, counter: T, config: ReviewConfig) -> Self {
        Self {
            completer,
            counter,
            config,
        }
    }

    /// Review one file's source text.
    ///
    /// Chunking errors (bad budget, tokenizer failure) fail the file.
    /// A failed model call only fails its own section.
    pub async fn review_file(&self, path: &str, code: &str) -> Result<FileReview, ChunkError> {
        let kind = FileKind::from_path(path);
        let complexity = analyze_complexity(code, &self.config.thresholds);
        let chunks = split_text(code, &self.counter, self.config.chunk_budget())?;
        let total = chunks.len();

        let mut sections = Vec::with_capacity(total);
        for (index, chunk) in chunks.into_iter().enumerate() {
            let prompt = build_review_prompt(kind, path, index, total, &chunk.text);
            let request = ChatRequest::new(REVIEW_SYSTEM_PROMPT, prompt, self.config.reply_tokens);

            let outcome = match self.completer.complete(request).await {
                Ok(text) => SectionOutcome::Reviewed(text.trim().to_string()),
                Err(e) => {
                    warn!(path, chunk = index + 1, total, error = %e, "Chunk review failed");
                    SectionOutcome::Failed(e.to_string())
                }
            };

            sections.push(Section {
                start_line: chunk.metadata.start_line,
                end_line: chunk.metadata.end_line,
                token_count: chunk.metadata.token_count,
                outcome,
            });
        }

        Ok(FileReview {
            path: path.to_string(),
            kind,
            digest: None,
            complexity,
            thresholds: self.config.thresholds,
            sections,
        })
    }

    /// Review every file in the snapshot, in path order.
    ///
    /// A file that cannot be reviewed is recorded as failed and the run
    /// moves on to the next file.
    pub async fn review_snapshot(&self, snapshot: &Snapshot) -> Report {
        let mut report = Report::new(snapshot.source());
        let total = snapshot.file_count();
        info!(files = total, source = snapshot.source(), "Review started");

        for (n, entry) in snapshot.list().enumerate() {
            let path = entry.path.as_str();
            let span = info_span!("file", path, n = n + 1, total);

            let Some(code) = snapshot.text(path) else {
                warn!(path, "File is not valid UTF-8");
                report.push(ReportEntry::Failed {
                    path: path.to_string(),
                    error: "file is not valid UTF-8".to_string(),
                });
                continue;
            };

            match self.review_file(path, code).instrument(span).await {
                Ok(mut review) => {
                    review.digest = Some(entry.digest.clone());
                    if review.has_warnings() {
                        info!(path, "Issues found");
                    } else {
                        info!(path, sections = review.sections.len(), "Analyzed");
                    }
                    report.push(ReportEntry::Reviewed(review));
                }
                Err(e) => {
                    warn!(path, error = %e, "File review failed");
                    report.push(ReportEntry::Failed {
                        path: path.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let summary = report.summary();
        info!(
            total = summary.total,
            with_warnings = summary.with_warnings,
            failed = summary.failed,
            clean = summary.clean,
            "Review finished"
        );
        report
    }
}

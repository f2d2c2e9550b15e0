use super::{FileReview, SectionOutcome};
use crate::snapshot::short_digest;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;
use uuid::Uuid;

pub const DEFAULT_REPORT_FILE: &str = "code_analysis_report.md";

const SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, Clone, PartialEq)]
pub enum ReportEntry {
    Reviewed(FileReview),
    Failed { path: String, error: String },
}

impl ReportEntry {
    pub fn path(&self) -> &str {
        match self {
            ReportEntry::Reviewed(review) => &review.path,
            ReportEntry::Failed { path, .. } => path,
        }
    }

    fn has_warnings(&self) -> bool {
        matches!(self, ReportEntry::Reviewed(review) if review.has_warnings())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSummary {
    pub total: usize,
    pub with_warnings: usize,
    pub failed: usize,
    pub clean: usize,
}

/// Results of one review run
#[derive(Debug, Clone)]
pub struct Report {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    entries: Vec<ReportEntry>,
}

impl Report {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            source: source.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn summary(&self) -> ReviewSummary {
        let total = self.entries.len();
        let with_warnings = self.entries.iter().filter(|e| e.has_warnings()).count();
        let failed = self
            .entries
            .iter()
            .filter(|e| matches!(e, ReportEntry::Failed { .. }))
            .count();
        ReviewSummary {
            total,
            with_warnings,
            failed,
            clean: total - with_warnings - failed,
        }
    }

    pub fn render(&self) -> String {
        let summary = self.summary();
        let mut out = String::from("# Code Analysis Report\n\n");

        if !self.source.is_empty() {
            let _ = writeln!(out, "- Source: {}", self.source);
        }
        let _ = writeln!(out, "- Run: {}", self.id);
        let _ = writeln!(out, "- Generated: {}\n", self.generated_at.to_rfc3339());

        out.push_str("## Summary Statistics\n\n");
        let _ = writeln!(out, "- Total Files Analyzed: {}", summary.total);
        let _ = writeln!(out, "- Files with Complexity Warnings: {}", summary.with_warnings);
        if summary.failed > 0 {
            let _ = writeln!(out, "- Files that Failed: {}", summary.failed);
        }
        out.push('\n');

        if summary.with_warnings > 0 {
            out.push_str("### Files Needing Attention\n\n");
            for entry in self.entries.iter().filter(|e| e.has_warnings()) {
                let _ = writeln!(out, "- {}", entry.path());
            }
            out.push('\n');
        }

        // Groups keep first-seen order
        let mut groups: Vec<(&str, Vec<&ReportEntry>)> = Vec::new();
        for entry in &self.entries {
            let name = group_name(entry.path());
            match groups.iter().position(|(g, _)| *g == name) {
                Some(pos) => groups[pos].1.push(entry),
                None => groups.push((name, vec![entry])),
            }
        }

        for (name, members) in groups {
            let _ = write!(out, "## {}\n\n", name);
            for entry in members {
                let _ = write!(out, "### {}\n\n", entry.path());
                match entry {
                    ReportEntry::Reviewed(review) => out.push_str(&review.render()),
                    ReportEntry::Failed { error, .. } => {
                        let _ = write!(out, "Error in analysis: {}", error);
                    }
                }
                out.push_str(SEPARATOR);
            }
        }

        out
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.render())
    }
}

/// Report section for a path: the directory below the top-level one
/// (`app/Models/User.php` -> `Models`), the top-level directory for
/// shallow paths (`routes/web.php` -> `routes`), or `Other`.
/// A file name is never used as a group.
pub fn group_name(path: &str) -> &str {
    let parts: Vec<&str> = path.split('/').collect();
    match parts.len() {
        0 | 1 => "Other",
        2 => parts[0],
        _ => parts[1],
    }
}

impl FileReview {
    /// Markdown analysis for this file alone
    pub fn render(&self) -> String {
        let c = &self.complexity;
        let t = &self.thresholds;
        let mut out = String::from("# File Analysis Summary\n\n");

        if c.has_warnings() {
            out.push_str("## Complexity Warnings\n\n");
            if c.exceeds.file_too_long {
                let _ = writeln!(
                    out,
                    "- File is too long ({} lines, recommended max: {})",
                    c.total_lines, t.max_file_lines
                );
            }
            if c.exceeds.too_many_methods {
                let _ = writeln!(
                    out,
                    "- Too many methods ({} methods, recommended max: {})",
                    c.method_count, t.max_methods
                );
            }
            if c.exceeds.has_long_methods {
                let _ = writeln!(
                    out,
                    "- Contains {} methods longer than {} lines",
                    c.long_methods.len(),
                    t.max_method_lines
                );
            }
            out.push('\n');
        }

        out.push_str("## Metrics\n\n");
        let _ = writeln!(out, "- Total Lines: {}", c.total_lines);
        let _ = writeln!(out, "- Method Count: {}", c.method_count);
        let _ = writeln!(out, "- Long Methods: {}", c.long_methods.len());
        if let Some(digest) = &self.digest {
            let _ = writeln!(out, "- SHA-256: {}", short_digest(digest));
        }
        out.push('\n');

        match self.sections.as_slice() {
            [] => out.push_str("## Analysis\n\nNo code to review."),
            [only] => {
                out.push_str("## Analysis\n\n");
                out.push_str(outcome_text(&only.outcome).as_str());
            }
            sections => {
                out.push_str("## Detailed Analysis\n\n");
                for (i, section) in sections.iter().enumerate() {
                    let _ = write!(
                        out,
                        "### Section {} (lines {}-{})\n\n{}\n\n",
                        i + 1,
                        section.start_line,
                        section.end_line,
                        outcome_text(&section.outcome)
                    );
                }
            }
        }

        out
    }
}

fn outcome_text(outcome: &SectionOutcome) -> String {
    match outcome {
        SectionOutcome::Reviewed(text) => text.clone(),
        SectionOutcome::Failed(error) => format!("Error analyzing code chunk: {}", error),
    }
}

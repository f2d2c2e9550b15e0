//! Rule-based complexity checks run before any model call.

use regex::Regex;
use std::sync::OnceLock;

/// Limits above which a file is flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub max_file_lines: usize,
    pub max_methods: usize,
    pub max_method_lines: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_file_lines: 300,
            max_methods: 20,
            max_method_lines: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdFlags {
    pub file_too_long: bool,
    pub too_many_methods: bool,
    pub has_long_methods: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexityReport {
    pub total_lines: usize,
    pub method_count: usize,
    /// Line counts of the methods longer than the limit, in file order
    pub long_methods: Vec<usize>,
    pub exceeds: ThresholdFlags,
}

impl ComplexityReport {
    pub fn has_warnings(&self) -> bool {
        self.exceeds.file_too_long || self.exceeds.too_many_methods || self.exceeds.has_long_methods
    }
}

fn method_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"function\s+\w+\s*\(").expect("valid method regex"))
}

/// Count lines and PHP-style `function name(` declarations.
///
/// A method's length is measured from just after its declaration to the
/// next declaration (or end of file), so trailing code after the last
/// method counts toward it.
pub fn analyze_complexity(code: &str, thresholds: &Thresholds) -> ComplexityReport {
    let total_lines = code.split('\n').count();
    let pattern = method_pattern();

    let method_count = pattern.find_iter(code).count();
    let long_methods: Vec<usize> = pattern
        .split(code)
        .skip(1)
        .map(|block| block.split('\n').count())
        .filter(|&lines| lines > thresholds.max_method_lines)
        .collect();

    ComplexityReport {
        total_lines,
        method_count,
        exceeds: ThresholdFlags {
            file_too_long: total_lines > thresholds.max_file_lines,
            too_many_methods: method_count > thresholds.max_methods,
            has_long_methods: !long_methods.is_empty(),
        },
        long_methods,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn php_method(name: &str, body_lines: usize) -> String {
        let mut s = format!("    public function {}($request)\n    {{\n", name);
        for i in 0..body_lines {
            s.push_str(&format!("        $x{} = {};\n", i, i));
        }
        s.push_str("    }\n");
        s
    }

    #[test]
    fn test_small_clean_file() {
        let code = format!("<?php\nclass A {{\n{}}}\n", php_method("index", 3));
        let report = analyze_complexity(&code, &Thresholds::default());

        assert_eq!(report.method_count, 1);
        assert!(report.long_methods.is_empty());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_total_lines_counts_trailing_empty_line() {
        let report = analyze_complexity("a\nb\n", &Thresholds::default());
        assert_eq!(report.total_lines, 3);
        assert_eq!(analyze_complexity("", &Thresholds::default()).total_lines, 1);
    }

    #[test]
    fn test_method_detection_variants() {
        let code = "function a() {}\nfunction   b  ($x) {}\nprivate static function c(\n$fn = function ($y) {};";
        let report = analyze_complexity(code, &Thresholds::default());
        // Closures without a name are not methods
        assert_eq!(report.method_count, 3);
    }

    #[test]
    fn test_long_method_flagged() {
        let code = format!(
            "<?php\nclass A {{\n{}{}}}\n",
            php_method("short", 2),
            php_method("huge", 60)
        );
        let thresholds = Thresholds::default();
        let report = analyze_complexity(&code, &thresholds);

        assert_eq!(report.method_count, 2);
        assert_eq!(report.long_methods.len(), 1);
        assert!(report.long_methods[0] > thresholds.max_method_lines);
        assert!(report.exceeds.has_long_methods);
        assert!(!report.exceeds.file_too_long);
    }

    #[test]
    fn test_file_and_method_count_limits() {
        let thresholds = Thresholds {
            max_file_lines: 10,
            max_methods: 2,
            max_method_lines: 50,
        };
        let code: String = (0..3).map(|i| php_method(&format!("m{}", i), 2)).collect();
        let report = analyze_complexity(&code, &thresholds);

        assert_eq!(report.method_count, 3);
        assert!(report.exceeds.too_many_methods);
        assert!(report.exceeds.file_too_long);
        assert!(report.has_warnings());
    }
}

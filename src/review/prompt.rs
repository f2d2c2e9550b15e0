use super::FileKind;

pub const REVIEW_SYSTEM_PROMPT: &str = "You are a Laravel expert performing code review. \
Focus on Laravel best practices, design patterns, and potential security issues.";

const CHECKLIST: [&str; 5] = [
    "Overview of the code's functionality",
    "Laravel best practices assessment",
    "Potential security vulnerabilities",
    "Performance considerations",
    "Suggested improvements",
];

/// User prompt for one chunk of one file
pub fn build_review_prompt(
    kind: FileKind,
    path: &str,
    chunk_index: usize,
    total_chunks: usize,
    code: &str,
) -> String {
    let mut prompt = format!("Analyze the following Laravel {} file ({}).\n", kind, path);
    if total_chunks > 1 {
        prompt.push_str(&format!(
            "This is chunk {} of {} from the file.\n",
            chunk_index + 1,
            total_chunks
        ));
    }

    prompt.push_str("\nProvide:\n");
    for (i, item) in CHECKLIST.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, item));
    }

    let focus = kind.focus_areas();
    if !focus.is_empty() {
        prompt.push_str("\nFocus on Laravel-specific aspects such as:\n");
        for area in focus {
            prompt.push_str(&format!("- {}\n", area));
        }
    }

    prompt.push_str("\nCode:\n");
    prompt.push_str(code);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_context() {
        let prompt = build_review_prompt(
            FileKind::Controller,
            "app/Http/Controllers/UserController.php",
            1,
            3,
            "<?php class UserController {}",
        );

        assert!(prompt.starts_with(
            "Analyze the following Laravel Controller file (app/Http/Controllers/UserController.php)."
        ));
        assert!(prompt.contains("This is chunk 2 of 3 from the file."));
        assert!(prompt.contains("3. Potential security vulnerabilities"));
        assert!(prompt.contains("- Route model binding"));
        assert!(prompt.ends_with("Code:\n<?php class UserController {}"));
    }

    #[test]
    fn test_single_chunk_and_no_focus() {
        let prompt = build_review_prompt(FileKind::Config, "config/app.php", 0, 1, "<?php return [];");

        assert!(!prompt.contains("chunk"));
        assert!(!prompt.contains("Focus on"));
    }
}

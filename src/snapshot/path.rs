use super::SnapshotError;
use std::path::{Component, Path};

/// Normalize an archive or walk path into a `/`-joined relative path.
///
/// Rejects empty paths, absolute paths, `..` components (zip slip) and
/// components that are not valid UTF-8. `.` components are dropped.
pub fn sanitize(raw_path: &str) -> Result<String, SnapshotError> {
    let invalid = |reason: &str| SnapshotError::InvalidPath(format!("{}: {:?}", reason, raw_path));

    if raw_path.is_empty() {
        return Err(invalid("empty path"));
    }

    let mut parts = Vec::new();
    for component in Path::new(raw_path).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return Err(invalid("absolute path")),
            Component::ParentDir => return Err(invalid("parent directory traversal")),
            Component::CurDir => {}
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| invalid("non UTF-8 component"))?;
                parts.push(part);
            }
        }
    }

    if parts.is_empty() {
        return Err(invalid("no path components"));
    }
    Ok(parts.join("/"))
}

/// Drop the single top-level directory GitHub wraps archive entries in
/// (`owner-repo-<sha>/app/Models/User.php` -> `app/Models/User.php`).
/// Returns `None` for the wrapper directory itself.
pub fn strip_archive_root(raw_path: &str) -> Option<&str> {
    match raw_path.split_once('/') {
        Some((_, rest)) if !rest.is_empty() => Some(rest),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paths() {
        assert_eq!(sanitize("app/Models/User.php").unwrap(), "app/Models/User.php");
        assert_eq!(sanitize("./routes//web.php").unwrap(), "routes/web.php");
        assert_eq!(sanitize(".github/workflows/ci.yml").unwrap(), ".github/workflows/ci.yml");
    }

    #[test]
    fn test_rejects_traversal() {
        let err = sanitize("app/../../etc/passwd").unwrap_err();
        assert!(err.to_string().contains("parent directory traversal"));
    }

    #[test]
    fn test_rejects_absolute() {
        let err = sanitize("/etc/passwd").unwrap_err();
        assert!(err.to_string().contains("absolute path"));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(sanitize("").is_err());
        assert!(sanitize(".").is_err());
        assert!(sanitize("./").is_err());
    }

    #[test]
    fn test_strip_archive_root() {
        assert_eq!(
            strip_archive_root("laravel-laravel-1a2b3c/app/Models/User.php"),
            Some("app/Models/User.php")
        );
        assert_eq!(strip_archive_root("laravel-laravel-1a2b3c/"), None);
        assert_eq!(strip_archive_root("README.md"), None);
    }
}

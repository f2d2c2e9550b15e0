//! Decides which repository files are worth reviewing.

/// Analysis scope: path prefixes with the extensions reviewed under them,
/// plus ignore patterns that win over any prefix.
#[derive(Debug, Clone)]
pub struct FileFilter {
    analysis_paths: Vec<(String, Vec<String>)>,
    ignore: Vec<String>,
}

impl FileFilter {
    pub fn new() -> Self {
        Self {
            analysis_paths: Vec::new(),
            ignore: Vec::new(),
        }
    }

    /// Review files under `prefix` ending in one of `extensions` (with dot)
    pub fn analyze(mut self, prefix: &str, extensions: &[&str]) -> Self {
        self.analysis_paths.push((
            prefix.to_string(),
            extensions.iter().map(|e| e.to_string()).collect(),
        ));
        self
    }

    /// Skip paths matching `pattern`.
    ///
    /// `dir/` matches by prefix, `*.ext` by suffix, anything else by suffix
    /// or substring.
    pub fn ignore(mut self, pattern: &str) -> Self {
        self.ignore.push(pattern.to_string());
        self
    }

    /// Laravel application layout
    pub fn laravel() -> Self {
        let mut filter = Self::new();
        for prefix in [
            "app",
            "routes",
            "config",
            "database/migrations",
            "app/Http/Controllers",
            "app/Http/Middleware",
            "app/Models",
            "app/Services",
            "app/Providers",
        ] {
            filter = filter.analyze(prefix, &[".php"]);
        }
        for pattern in [
            "vendor/",
            "node_modules/",
            "storage/",
            "public/",
            "tests/",
            ".git/",
            "bootstrap/cache/",
            ".env",
            "*.min.js",
            "*.min.css",
            "package-lock.json",
            "composer.lock",
            "yarn.lock",
        ] {
            filter = filter.ignore(pattern);
        }
        filter
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore.iter().any(|pattern| {
            if pattern.ends_with('/') {
                path.starts_with(pattern.as_str())
            } else if let Some(suffix) = pattern.strip_prefix('*') {
                path.ends_with(suffix)
            } else {
                path.ends_with(pattern.as_str()) || path.contains(pattern.as_str())
            }
        })
    }

    /// Whether a relative, `/`-separated path should be reviewed
    pub fn should_analyze(&self, path: &str) -> bool {
        if self.is_ignored(path) {
            return false;
        }

        self.analysis_paths
            .iter()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))
            .map(|(_, extensions)| extensions.iter().any(|ext| path.ends_with(ext.as_str())))
            .unwrap_or(false)
    }

    /// Whether a directory (relative, no trailing slash) can be pruned from a walk
    pub fn is_ignored_dir(&self, dir: &str) -> bool {
        self.is_ignored(&format!("{}/", dir))
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::laravel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_laravel_controllers_are_analyzed() {
        let filter = FileFilter::laravel();
        assert!(filter.should_analyze("app/Http/Controllers/UserController.php"));
        assert!(filter.should_analyze("routes/web.php"));
        assert!(filter.should_analyze("database/migrations/2024_01_01_create_users.php"));
        assert!(filter.should_analyze("config/app.php"));
    }

    #[test]
    fn test_outside_analysis_paths() {
        let filter = FileFilter::laravel();
        assert!(!filter.should_analyze("resources/views/welcome.blade.php"));
        assert!(!filter.should_analyze("artisan"));
        assert!(!filter.should_analyze("database/seeders/DatabaseSeeder.php"));
    }

    #[test]
    fn test_wrong_extension() {
        let filter = FileFilter::laravel();
        assert!(!filter.should_analyze("app/Models/README.md"));
        assert!(!filter.should_analyze("routes/api.js"));
    }

    #[test]
    fn test_ignore_rules() {
        let filter = FileFilter::laravel();
        assert!(filter.is_ignored("vendor/laravel/framework/src/Foo.php"));
        assert!(filter.is_ignored("public/js/app.min.js"));
        assert!(filter.is_ignored("composer.lock"));
        assert!(filter.is_ignored("config/.env"));
        assert!(!filter.is_ignored("app/Models/User.php"));
    }

    #[test]
    fn test_directory_prefix_only_matches_at_root() {
        let filter = FileFilter::laravel();
        // "tests/" is a directory rule, anchored at the repository root
        assert!(!filter.is_ignored("app/Services/tests/Helper.php"));
        assert!(filter.is_ignored_dir("tests"));
        assert!(filter.is_ignored_dir("bootstrap/cache"));
        assert!(!filter.is_ignored_dir("app"));
    }

    #[test]
    fn test_first_matching_prefix_decides() {
        let filter = FileFilter::new()
            .analyze("src", &[".rs"])
            .analyze("src/scripts", &[".py"]);
        assert!(filter.should_analyze("src/lib.rs"));
        // "src" matches first and only allows .rs
        assert!(!filter.should_analyze("src/scripts/gen.py"));
    }
}

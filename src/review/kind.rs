use std::fmt;

/// Laravel role of a file, inferred from its path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Controller,
    Model,
    Middleware,
    ServiceProvider,
    Migration,
    Route,
    Config,
    Php,
}

impl FileKind {
    /// First matching marker wins, so `app/Http/Controllers/Models/X.php`
    /// is a controller.
    pub fn from_path(path: &str) -> Self {
        const MARKERS: [(&str, FileKind); 7] = [
            ("Controllers", FileKind::Controller),
            ("Models", FileKind::Model),
            ("Middleware", FileKind::Middleware),
            ("Providers", FileKind::ServiceProvider),
            ("migrations", FileKind::Migration),
            ("routes", FileKind::Route),
            ("config", FileKind::Config),
        ];
        MARKERS
            .iter()
            .find(|(marker, _)| path.contains(marker))
            .map(|(_, kind)| *kind)
            .unwrap_or(FileKind::Php)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Controller => "Controller",
            FileKind::Model => "Model",
            FileKind::Middleware => "Middleware",
            FileKind::ServiceProvider => "Service Provider",
            FileKind::Migration => "Migration",
            FileKind::Route => "Route",
            FileKind::Config => "Config",
            FileKind::Php => "PHP",
        }
    }

    /// Framework concerns the reviewer should look at for this kind
    pub fn focus_areas(&self) -> &'static [&'static str] {
        match self {
            FileKind::Controller => &[
                "RESTful practices",
                "Route model binding",
                "Form validation",
                "Authorization",
                "Response handling",
            ],
            FileKind::Model => &[
                "Eloquent relationships",
                "Attributes and casting",
                "Scopes and mutators",
                "Mass assignment protection",
                "Query optimization",
            ],
            FileKind::Middleware => &[
                "Request handling",
                "Auth checks",
                "Input sanitization",
                "Response modification",
            ],
            FileKind::Migration => &["Schema design", "Indexes", "Foreign keys", "Rollback handling"],
            FileKind::Route => &[
                "Organization",
                "Middleware usage",
                "Route naming",
                "Model binding",
                "API versioning",
            ],
            FileKind::ServiceProvider | FileKind::Config | FileKind::Php => &[],
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

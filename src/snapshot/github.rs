use super::SnapshotError;

const API_BASE: &str = "https://api.github.com";

/// A GitHub repository reference parsed from a web URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepo {
    pub owner: String,
    pub name: String,
    /// Branch, tag or commit from a `/tree/<ref>` URL; `None` means the default branch
    pub git_ref: Option<String>,
}

impl GithubRepo {
    /// Parse `https://github.com/<owner>/<repo>[.git][/tree/<ref>][/]`
    pub fn parse(url: &str) -> Result<Self, SnapshotError> {
        let invalid = || SnapshotError::InvalidUrl(url.to_string());

        let rest = url
            .trim()
            .strip_prefix("https://")
            .or_else(|| url.trim().strip_prefix("http://"))
            .ok_or_else(invalid)?;
        let rest = rest.strip_prefix("www.").unwrap_or(rest);
        let rest = rest.strip_prefix("github.com/").ok_or_else(invalid)?;

        let mut segments = rest.trim_end_matches('/').split('/');
        let owner = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let name = segments
            .next()
            .map(|s| s.strip_suffix(".git").unwrap_or(s))
            .filter(|s| !s.is_empty())
            .ok_or_else(invalid)?;

        let git_ref = match segments.next() {
            None => None,
            Some("tree") => {
                let r = segments.collect::<Vec<_>>().join("/");
                if r.is_empty() {
                    return Err(invalid());
                }
                Some(r)
            }
            Some(_) => return Err(invalid()),
        };

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            git_ref,
        })
    }

    /// Zip archive endpoint for this repository
    pub fn archive_url(&self) -> String {
        match &self.git_ref {
            Some(r) => format!("{}/repos/{}/{}/zipball/{}", API_BASE, self.owner, self.name, r),
            None => format!("{}/repos/{}/{}/zipball", API_BASE, self.owner, self.name),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_url() {
        let repo = GithubRepo::parse("https://github.com/laravel/laravel").unwrap();
        assert_eq!(repo.owner, "laravel");
        assert_eq!(repo.name, "laravel");
        assert_eq!(repo.git_ref, None);
        assert_eq!(repo.full_name(), "laravel/laravel");
        assert_eq!(
            repo.archive_url(),
            "https://api.github.com/repos/laravel/laravel/zipball"
        );
    }

    #[test]
    fn test_parse_trailing_slash_and_git_suffix() {
        let repo = GithubRepo::parse("https://github.com/laravel/framework.git/").unwrap();
        assert_eq!(repo.name, "framework");
    }

    #[test]
    fn test_parse_tree_ref() {
        let repo = GithubRepo::parse("https://github.com/laravel/laravel/tree/release/11.x").unwrap();
        assert_eq!(repo.git_ref.as_deref(), Some("release/11.x"));
        assert_eq!(
            repo.archive_url(),
            "https://api.github.com/repos/laravel/laravel/zipball/release/11.x"
        );
    }

    #[test]
    fn test_reject_other_urls() {
        for url in [
            "https://gitlab.com/a/b",
            "github.com/a/b",
            "https://github.com/onlyowner",
            "https://github.com/a/b/issues/3",
            "https://github.com/a/b/tree/",
        ] {
            assert!(GithubRepo::parse(url).is_err(), "accepted {}", url);
        }
    }
}

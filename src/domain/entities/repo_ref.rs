//! Repository reference parsed from a repository URL.

use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

use crate::error::AppError;

/// Matches the first two path segments after the host in a repository URL,
/// with or without a scheme: `https://github.com/<owner>/<name>` or
/// `github.com/<owner>/<name>`.
static REPO_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.-]*://)?[^/\s]+/([^/\s]+)/([^/\s]+)").unwrap()
});

/// An (owner, name) reference to a remote repository.
///
/// Parsing is case-sensitive and keeps the segments verbatim; anything past
/// the second path segment is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses a repository URL into an owner/name pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidReference`] when the URL does not carry a
    /// host followed by two non-empty path segments.
    pub fn parse(url: &str) -> Result<Self, AppError> {
        let captures = REPO_URL_REGEX.captures(url.trim()).ok_or_else(|| {
            AppError::invalid_reference(
                format!("Invalid repository URL: {url}"),
                json!({ "url": url }),
            )
        })?;

        Ok(Self {
            owner: captures[1].to_string(),
            name: captures[2].to_string(),
        })
    }

    /// Canonical `owner/name` form.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_url() {
        let repo = RepoRef::parse("https://github.com/vercel/next.js").unwrap();
        assert_eq!(repo.owner, "vercel");
        assert_eq!(repo.name, "next.js");
    }

    #[test]
    fn test_parse_without_scheme() {
        let repo = RepoRef::parse("github.com/facebook/react").unwrap();
        assert_eq!(repo.owner, "facebook");
        assert_eq!(repo.name, "react");
    }

    #[test]
    fn test_parse_generic_host() {
        let repo = RepoRef::parse("host/alice/repo1").unwrap();
        assert_eq!(repo.owner, "alice");
        assert_eq!(repo.name, "repo1");
    }

    #[test]
    fn test_parse_ignores_extra_segments() {
        let repo = RepoRef::parse("https://github.com/rust-lang/rust/tree/master").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "rust");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let repo = RepoRef::parse("https://github.com/Microsoft/VSCode").unwrap();
        assert_eq!(repo.owner, "Microsoft");
        assert_eq!(repo.name, "VSCode");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let repo = RepoRef::parse("  https://github.com/a/b ").unwrap();
        assert_eq!(repo.full_name(), "a/b");
    }

    #[test]
    fn test_parse_missing_name_segment() {
        let err = RepoRef::parse("https://github.com/owner-only").unwrap_err();
        assert!(matches!(err, AppError::InvalidReference { .. }));
    }

    #[test]
    fn test_parse_host_only() {
        let err = RepoRef::parse("https://github.com/").unwrap_err();
        assert!(matches!(err, AppError::InvalidReference { .. }));
    }

    #[test]
    fn test_parse_empty_string() {
        let err = RepoRef::parse("").unwrap_err();
        assert!(matches!(err, AppError::InvalidReference { .. }));
    }

    #[test]
    fn test_parse_bare_word() {
        let err = RepoRef::parse("not-a-url").unwrap_err();
        assert!(matches!(err, AppError::InvalidReference { .. }));
    }

    #[test]
    fn test_full_name_and_display() {
        let repo = RepoRef::new("alice", "repo1");
        assert_eq!(repo.full_name(), "alice/repo1");
        assert_eq!(repo.to_string(), "alice/repo1");
    }
}

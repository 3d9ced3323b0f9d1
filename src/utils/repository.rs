use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

static REPOSITORY_PATTERN: OnceLock<Regex> = OnceLock::new();

fn repository_pattern() -> &'static Regex {
    REPOSITORY_PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)/([A-Za-z0-9._-]+)$")
            .expect("repository pattern is a valid regex")
    })
}

/// An `owner/name` repository identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryId {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parse an `owner/name` identifier. A trailing `.git` is dropped.
pub fn parse_repository(identifier: &str) -> Option<RepositoryId> {
    let trimmed = identifier.trim();
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let captures = repository_pattern().captures(trimmed)?;
    let name = captures[2].to_string();
    if name == "." || name == ".." {
        return None;
    }
    Some(RepositoryId {
        owner: captures[1].to_string(),
        name,
    })
}

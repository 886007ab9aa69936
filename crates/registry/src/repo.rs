//! Repository URL parsing and URL derivation for the source-control host

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_BROWSE_HOST: &str = "github.com";
pub const DEFAULT_RAW_HOST: &str = "raw.githubusercontent.com";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_PREVIEW_FILE: &str = "PLUGIN_PREVIEW.md";

/// Owner and name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Extract `(owner, name)` from a URL on the default host
    pub fn parse(url: &str) -> Option<Self> {
        Self::parse_with(&SourceHost::default(), url)
    }

    /// Extract `(owner, name)` from the first `<browse_host>/<owner>/<name>`
    /// occurrence in `url`. Anything after `name` is ignored.
    pub fn parse_with(host: &SourceHost, url: &str) -> Option<Self> {
        let pattern = format!(r"{}/([^/]+)/([^/]+)", regex::escape(&host.browse_host));
        let re = Regex::new(&pattern).ok()?;
        let captures = re.captures(url)?;

        Some(Self {
            owner: captures[1].to_string(),
            name: captures[2].to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Source-control host the plugins live on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceHost {
    /// Scheme used for every derived URL
    pub scheme: String,

    /// Host serving browsable pages (`<host>/<owner>/<name>/blob/<branch>/...`)
    pub browse_host: String,

    /// Host serving raw file contents
    pub raw_host: String,

    /// Branch all derived URLs point at
    pub branch: String,

    /// Preview document path inside a plugin repository
    pub preview_file: String,
}

impl Default for SourceHost {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            browse_host: DEFAULT_BROWSE_HOST.to_string(),
            raw_host: DEFAULT_RAW_HOST.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            preview_file: DEFAULT_PREVIEW_FILE.to_string(),
        }
    }
}

impl SourceHost {
    pub fn repo_ref(&self, repo_url: &str) -> Option<RepoRef> {
        RepoRef::parse_with(self, repo_url)
    }

    /// Base URL for raw file bytes, e.g. images
    pub fn raw_base(&self, repo: &RepoRef) -> String {
        format!(
            "{}://{}/{}/{}/{}",
            self.scheme, self.raw_host, repo.owner, repo.name, self.branch
        )
    }

    /// Base URL for human-navigable links
    pub fn browse_base(&self, repo: &RepoRef) -> String {
        format!(
            "{}://{}/{}/{}/blob/{}",
            self.scheme, self.browse_host, repo.owner, repo.name, self.branch
        )
    }

    /// Location of a plugin's preview document.
    ///
    /// Returns `None` when `repo_url` is not a repository on this host, which
    /// means there is no preview to show.
    pub fn preview_document_url(&self, repo_url: &str) -> Option<String> {
        let repo = self.repo_ref(repo_url)?;
        Some(format!("{}/{}", self.raw_base(&repo), self.preview_file))
    }
}

/// Preview document location on the default host
pub fn preview_document_url(repo_url: &str) -> Option<String> {
    SourceHost::default().preview_document_url(repo_url)
}

use crate::error::ExtractError;
use crate::normalize::{NormalizedLink, site_origin};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::{Origin, Url};

/// Which links of the page end up in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Every link on the page
    All,
    /// Links sharing the start URL's origin
    Internal,
    /// Links to any other origin
    External,
    /// Same-origin links inside the sidebar navigation only
    #[default]
    Sidebar,
}

impl Scope {
    /// Whether extraction is limited to the detected sidebar element
    pub fn needs_sidebar(self) -> bool {
        matches!(self, Scope::Sidebar)
    }

    fn admits(self, internal: bool) -> bool {
        match self {
            Scope::All => true,
            Scope::Internal | Scope::Sidebar => internal,
            Scope::External => !internal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::All => "all",
            Scope::Internal => "internal",
            Scope::External => "external",
            Scope::Sidebar => "sidebar",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for link filtering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlFilterConfig {
    /// Scope of links to keep; unset means the tool's default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,

    /// Regex patterns a link must match (if empty, all links pass)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns that drop a link (these take precedence over include patterns)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Outcome of running a normalized link through the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep,
    OutOfScope,
    Excluded,
}

/// Scope and pattern filter applied after normalization
#[derive(Debug)]
pub struct UrlFilter {
    scope: Scope,
    origin: Origin,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a filter for links found on `start`
    pub fn new(config: &UrlFilterConfig, start: &Url) -> Result<Self, ExtractError> {
        Ok(Self {
            scope: config.scope.unwrap_or_default(),
            origin: site_origin(start),
            include_regexes: compile(&config.include_patterns)?,
            exclude_regexes: compile(&config.exclude_patterns)?,
        })
    }

    /// Filter with only a scope and no patterns
    pub fn for_scope(scope: Scope, start: &Url) -> Self {
        Self {
            scope,
            origin: site_origin(start),
            include_regexes: Vec::new(),
            exclude_regexes: Vec::new(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Whether the link shares the start URL's origin
    pub fn is_internal(&self, link: &NormalizedLink) -> bool {
        link.origin() == self.origin
    }

    /// Decide whether a normalized link belongs in the output
    pub fn decide(&self, link: &NormalizedLink) -> Decision {
        if !self.scope.admits(self.is_internal(link)) {
            return Decision::OutOfScope;
        }

        let url_str = link.as_str();
        if self.exclude_regexes.iter().any(|re| re.is_match(url_str)) {
            return Decision::Excluded;
        }
        if !self.include_regexes.is_empty()
            && !self.include_regexes.iter().any(|re| re.is_match(url_str))
        {
            return Decision::Excluded;
        }

        Decision::Keep
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>, ExtractError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| ExtractError::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

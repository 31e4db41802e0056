//! Sidebar detection.
//!
//! Candidate elements are gathered with a fixed set of selector rules and
//! the best one is picked by a three-step filter: drop "On this page"
//! tables of contents, prefer elements mentioning "Navigation", then take
//! the one with the most internal links.

pub mod candidates;
pub mod scoring;

pub use candidates::find_candidates;
pub use scoring::{NoCandidateFound, Verdict, assess, select_best};

use scraper::{ElementRef, Html};
use std::fmt;
use url::Url;

/// Selector rule that matched a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    /// `nav` with `aria-label="Navigation"`
    AriaLabel,
    /// `nav[role="navigation"]`
    RoleNavigation,
    /// `nav` inside an `aside`
    AsideNav,
    /// id or class containing "sidebar" or "nav"; holds the matching value
    IdOrClass(String),
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchRule::AriaLabel => f.write_str("nav with aria-label=\"Navigation\""),
            MatchRule::RoleNavigation => f.write_str("nav with role=\"navigation\""),
            MatchRule::AsideNav => f.write_str("nav inside aside element"),
            MatchRule::IdOrClass(value) => {
                write!(f, "element with id/class containing sidebar/nav: {value}")
            }
        }
    }
}

/// An element that may be the sidebar, with the metrics used to rank it
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub element: ElementRef<'a>,
    pub matched_by: MatchRule,
    pub contains_navigation_text: bool,
    pub contains_on_this_page_text: bool,
    pub internal_link_count: usize,
}

impl fmt::Display for Candidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}> ({}): navigation={}, on_this_page={}, internal_links={}",
            self.element.value().name(),
            self.matched_by,
            self.contains_navigation_text,
            self.contains_on_this_page_text,
            self.internal_link_count
        )
    }
}

/// Find and rank candidates, returning the sidebar element
pub fn locate<'a>(document: &'a Html, start: &Url) -> Result<Candidate<'a>, NoCandidateFound> {
    select_best(find_candidates(document, start))
}

//! Extract sidebar navigation links from a documentation page.
//!
//! One page is fetched and parsed, the sidebar element is located with the
//! heuristics in [`sidebar`], and the links inside it are normalized,
//! deduplicated and written one per line.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod links;
pub mod normalize;
pub mod parsers;
pub mod results;
pub mod sidebar;

pub use config::ExtractorConfig;
pub use error::{ExtractError, FetchError, Result};
pub use fetch::{FileSource, HttpSource, Page, PageSource, StaticSource};
pub use filter::{Scope, UrlFilter};
pub use links::Extraction;
pub use normalize::{NormalizedLink, Rejected, normalize};
pub use results::ResultSet;

use scraper::Html;
use std::path::{Path, PathBuf};
use url::Url;

/// Outcome of one extraction
#[derive(Debug, Clone)]
pub struct Report {
    /// Page the links were taken from
    pub start_url: Url,

    /// Scope the links were filtered with
    pub scope: Scope,

    /// Number of sidebar candidates considered (sidebar scope only)
    pub candidates: usize,

    /// Description of the chosen sidebar element (sidebar scope only)
    pub sidebar: Option<String>,

    /// Links and skip counts
    pub extraction: Extraction,
}

impl Report {
    pub fn links(&self) -> &ResultSet {
        &self.extraction.links
    }
}

/// Builder for a single fetch, select, extract and write pass
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an extractor from a configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Set the scope of links to keep
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.config.filter.scope = Some(scope);
        self
    }

    /// Append anchor text to each output line
    pub fn with_include_text(mut self, include_text: bool) -> Self {
        self.config.include_text = include_text;
        self
    }

    /// Set the output file
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.config.output = output.into();
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn output(&self) -> &Path {
        &self.config.output
    }

    /// Parsed start URL
    pub fn start_url(&self) -> Result<Url> {
        Url::parse(&self.config.start_url).map_err(|source| ExtractError::InvalidStartUrl {
            url: self.config.start_url.clone(),
            source,
        })
    }

    /// Fetch the start page and extract its links without writing them
    pub async fn extract<S: PageSource>(&self, source: &S) -> Result<Report> {
        let start = self.start_url()?;
        let filter = UrlFilter::new(&self.config.filter, &start)?;

        ::log::info!(
            "Target origin: {}",
            normalize::site_origin(&start).ascii_serialization()
        );
        ::log::info!("Scope: {}", filter.scope());

        let page = source.fetch(&start).await?;
        let document = parsers::parse_page(&page)?;

        extract_from_document(&document, &start, &filter, self.config.include_text)
    }

    /// Extract the links and write them to the output file.
    ///
    /// Nothing is written when any step fails.
    pub async fn run<S: PageSource>(&self, source: &S) -> Result<Report> {
        let report = self.extract(source).await?;
        report.links().write_to(&self.config.output)?;
        Ok(report)
    }
}

/// Extract links from an already parsed document.
///
/// In sidebar scope the sidebar element is located first and only its
/// links are considered; other scopes walk the whole document.
pub fn extract_from_document(
    document: &Html,
    start: &Url,
    filter: &UrlFilter,
    include_text: bool,
) -> Result<Report> {
    let scope = filter.scope();

    if !scope.needs_sidebar() {
        let extraction =
            links::extract_links(document.root_element(), start, filter, include_text);
        return Ok(Report {
            start_url: start.clone(),
            scope,
            candidates: 0,
            sidebar: None,
            extraction,
        });
    }

    let candidates = sidebar::find_candidates(document, start);
    let candidate_count = candidates.len();
    let chosen = sidebar::select_best(candidates).map_err(|_| ExtractError::NoCandidateFound {
        url: start.to_string(),
    })?;

    let extraction = links::extract_links(chosen.element, start, filter, include_text);
    ::log::info!(
        "Extracted {} unique internal links from sidebar",
        extraction.links.len()
    );

    Ok(Report {
        start_url: start.clone(),
        scope,
        candidates: candidate_count,
        sidebar: Some(chosen.to_string()),
        extraction,
    })
}

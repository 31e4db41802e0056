use crate::filter::{Decision, UrlFilter};
use crate::normalize::{Rejected, normalize};
use crate::parsers::html::{anchors, element_text};
use crate::results::ResultSet;
use scraper::ElementRef;
use url::Url;

/// Per-reason counts of hrefs the normalizer dropped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectionCounts {
    pub empty: usize,
    pub fragment_only: usize,
    pub ignored_scheme: usize,
    pub unresolvable: usize,
    pub unsupported_scheme: usize,
}

impl RejectionCounts {
    fn record(&mut self, rejected: &Rejected) {
        match rejected {
            Rejected::Empty => self.empty += 1,
            Rejected::FragmentOnly => self.fragment_only += 1,
            Rejected::IgnoredScheme(_) => self.ignored_scheme += 1,
            Rejected::Unresolvable(_) => self.unresolvable += 1,
            Rejected::UnsupportedScheme(_) => self.unsupported_scheme += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.empty
            + self.fragment_only
            + self.ignored_scheme
            + self.unresolvable
            + self.unsupported_scheme
    }
}

/// Links collected from one container, with what was skipped
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub links: ResultSet,
    pub rejected: RejectionCounts,
    pub out_of_scope: usize,
    pub excluded: usize,
    pub duplicates: usize,
}

/// Collect the links under `container` in document order.
///
/// Rejected hrefs and links the filter drops are skipped silently; the
/// first occurrence of each normalized URL wins.
pub fn extract_links(
    container: ElementRef<'_>,
    start: &Url,
    filter: &UrlFilter,
    include_text: bool,
) -> Extraction {
    let mut extraction = Extraction::default();

    for (anchor, href) in anchors(container) {
        let link = match normalize(href, start) {
            Ok(link) => link,
            Err(rejected) => {
                ::log::trace!("Skipping href {:?}: {}", href, rejected);
                extraction.rejected.record(&rejected);
                continue;
            }
        };

        match filter.decide(&link) {
            Decision::Keep => {}
            Decision::OutOfScope => {
                ::log::trace!("Out of {} scope: {}", filter.scope(), link);
                extraction.out_of_scope += 1;
                continue;
            }
            Decision::Excluded => {
                ::log::trace!("Excluded by pattern: {}", link);
                extraction.excluded += 1;
                continue;
            }
        }

        let text = include_text.then(|| element_text(anchor));
        if !extraction.links.insert(link, text) {
            extraction.duplicates += 1;
        }
    }

    ::log::debug!(
        "Extracted {} unique links ({} rejected, {} out of scope, {} excluded, {} duplicates)",
        extraction.links.len(),
        extraction.rejected.total(),
        extraction.out_of_scope,
        extraction.excluded,
        extraction.duplicates
    );

    extraction
}

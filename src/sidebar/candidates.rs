use super::{Candidate, MatchRule};
use crate::normalize::{normalize, site_origin};
use crate::parsers::html::{anchors, attr, element_text};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::{Origin, Url};

static NAV_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("nav[aria-label]").expect("valid nav selector"));
static ROLE_NAV_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"nav[role="navigation"]"#).expect("valid role selector")
});
static ASIDE_NAV_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("aside nav").expect("valid aside selector"));
static ID_OR_CLASS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[id], [class]").expect("valid id/class selector"));

/// Substrings of an id or class that mark a sidebar-like element
const SIDEBAR_MARKERS: [&str; 2] = ["sidebar", "nav"];

/// Run every sidebar rule against the document, in rule order.
///
/// An element matched by several rules is reported once, under the first
/// rule that found it.
pub fn find_candidates<'a>(document: &'a Html, start: &Url) -> Vec<Candidate<'a>> {
    let mut matches: Vec<(ElementRef<'a>, MatchRule)> = Vec::new();
    let mut push = |element: ElementRef<'a>, rule: MatchRule| {
        if !matches.iter().any(|(seen, _)| *seen == element) {
            matches.push((element, rule));
        }
    };

    for element in document.select(&NAV_SELECTOR) {
        if attr(element, "aria-label").eq_ignore_ascii_case("navigation") {
            push(element, MatchRule::AriaLabel);
        }
    }
    for element in document.select(&ROLE_NAV_SELECTOR) {
        push(element, MatchRule::RoleNavigation);
    }
    for element in document.select(&ASIDE_NAV_SELECTOR) {
        push(element, MatchRule::AsideNav);
    }
    for element in document.select(&ID_OR_CLASS_SELECTOR) {
        if let Some(value) = sidebar_marker(element) {
            push(element, MatchRule::IdOrClass(value));
        }
    }

    ::log::debug!("Found {} initial sidebar candidates", matches.len());

    let origin = site_origin(start);
    matches
        .into_iter()
        .map(|(element, rule)| measure(element, rule, start, &origin))
        .collect()
}

/// The id or class value carrying a sidebar marker, if any
fn sidebar_marker(element: ElementRef<'_>) -> Option<String> {
    ["id", "class"].into_iter().find_map(|name| {
        let value = attr(element, name);
        let lowered = value.to_lowercase();
        SIDEBAR_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
            .then(|| value.chars().take(50).collect())
    })
}

fn measure<'a>(
    element: ElementRef<'a>,
    rule: MatchRule,
    start: &Url,
    origin: &Origin,
) -> Candidate<'a> {
    let text = element_text(element).to_lowercase();
    let internal_link_count = anchors(element)
        .filter(|(_, href)| normalize(href, start).is_ok_and(|link| link.origin() == *origin))
        .count();

    Candidate {
        element,
        matched_by: rule,
        contains_navigation_text: text.contains("navigation"),
        contains_on_this_page_text: text.contains("on this page"),
        internal_link_count,
    }
}

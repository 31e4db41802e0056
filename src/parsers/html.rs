use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Parses an HTML document into a queryable tree
pub fn parse(html: &str) -> Html {
    let doc = Html::parse_document(html);
    if !doc.errors.is_empty() {
        ::log::trace!("HTML parser recovered from {} errors", doc.errors.len());
    }
    doc
}

/// Elements whose text never renders
const HIDDEN_TEXT_PARENTS: [&str; 4] = ["script", "style", "template", "noscript"];

/// Visible text of an element with whitespace collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter(|node| {
            !node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|parent| HIDDEN_TEXT_PARENTS.contains(&parent.name()))
        })
        .filter_map(|node| node.value().as_text())
        .flat_map(|text| text.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every `<a href>` below `element` in document order, with its raw href
pub fn anchors<'a>(element: ElementRef<'a>) -> impl Iterator<Item = (ElementRef<'a>, &'a str)> {
    element
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href").map(|href| (a, href)))
}

/// Attribute value, or an empty string when absent
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> &'a str {
    element.value().attr(name).unwrap_or("")
}

pub mod html;

#[cfg(test)]
mod tests;

use crate::error::ExtractError;
use crate::fetch::Page;
use scraper::Html;

/// Kind of document a page holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserType {
    /// HTML or XHTML markup
    Html,
    /// Anything else (images, JSON, PDFs, ...)
    Other,
}

impl ParserType {
    /// Classify by Content-Type; a missing header is assumed to be HTML
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return ParserType::Html;
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if mime.is_empty()
            || mime.contains("html")
            || mime.ends_with("/xml")
            || mime == "text/plain"
        {
            ParserType::Html
        } else {
            ::log::debug!("Classifying {} as Other", mime);
            ParserType::Other
        }
    }
}

/// Parse a fetched page, refusing bodies that cannot hold a document
pub fn parse_page(page: &Page) -> Result<Html, ExtractError> {
    let parse_err = |reason: String| ExtractError::Parse {
        url: page.url.to_string(),
        reason,
    };

    ::log::debug!(
        "Parsing {} (HTTP {}, {} bytes)",
        page.url,
        page.status,
        page.body.len()
    );

    if !(200..300).contains(&page.status) {
        return Err(parse_err(format!("page was served with HTTP {}", page.status)));
    }
    if ParserType::from_content_type(page.content_type.as_deref()) != ParserType::Html {
        return Err(parse_err(format!(
            "unsupported content type {}",
            page.content_type.as_deref().unwrap_or("")
        )));
    }
    if page.body.trim().is_empty() {
        return Err(parse_err("empty response body".to_string()));
    }

    Ok(html::parse(&page.body))
}

use std::fmt;
use thiserror::Error;
use url::{Origin, Url};

/// Schemes that never point at a page
const IGNORED_SCHEMES: [&str; 4] = ["mailto:", "tel:", "javascript:", "data:"];

/// Why an href was dropped instead of becoming a link
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("empty href")]
    Empty,

    #[error("fragment-only href")]
    FragmentOnly,

    #[error("ignored scheme {0}")]
    IgnoredScheme(&'static str),

    #[error("unresolvable href: {0}")]
    Unresolvable(url::ParseError),

    #[error("unsupported scheme {0}")]
    UnsupportedScheme(String),
}

/// An absolute, fragment-free, scheme-canonicalized URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedLink(Url);

impl NormalizedLink {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn origin(&self) -> Origin {
        self.0.origin()
    }
}

impl fmt::Display for NormalizedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve `href` against `base` and canonicalize it.
///
/// Fragments are dropped, the query is kept, same-host `http` links are
/// upgraded to `https`, and a single trailing slash is removed from any
/// path other than `/`.
pub fn normalize(href: &str, base: &Url) -> Result<NormalizedLink, Rejected> {
    let href = href.trim();
    if href.is_empty() {
        return Err(Rejected::Empty);
    }
    if href.starts_with('#') {
        return Err(Rejected::FragmentOnly);
    }

    let lowered = href.to_ascii_lowercase();
    if let Some(scheme) = IGNORED_SCHEMES
        .iter()
        .copied()
        .find(|s| lowered.starts_with(s))
    {
        return Err(Rejected::IgnoredScheme(scheme));
    }

    let mut url = base.join(href).map_err(Rejected::Unresolvable)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Rejected::UnsupportedScheme(url.scheme().to_string()));
    }

    url.set_fragment(None);

    if url.scheme() == "http" && url.host_str().is_some() && url.host_str() == base.host_str() {
        // http -> https is always accepted by the url crate
        let _ = url.set_scheme("https");
    }

    let path = url.path();
    if path != "/" && path.ends_with('/') {
        let trimmed = path[..path.len() - 1].to_string();
        url.set_path(&trimmed);
    }

    Ok(NormalizedLink(url))
}

/// Origin used for internal/external classification.
///
/// The start URL gets the same https upgrade as its links, so an `http://`
/// start URL still matches the links normalized against it.
pub fn site_origin(start: &Url) -> Origin {
    if start.scheme() == "http" {
        let mut upgraded = start.clone();
        if upgraded.set_scheme("https").is_ok() {
            return upgraded.origin();
        }
    }
    start.origin()
}

use crate::error::ExtractError;
use crate::normalize::NormalizedLink;
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Separator between a URL and its anchor text in the output
pub const TEXT_DELIMITER: &str = " | ";

/// A link kept for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// Normalized URL
    pub link: NormalizedLink,

    /// Anchor text of the first occurrence (if requested)
    pub text: Option<String>,
}

impl LinkEntry {
    /// Output line for this entry
    pub fn line(&self) -> String {
        match self.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => format!("{}{TEXT_DELIMITER}{}", self.link, text),
            _ => self.link.to_string(),
        }
    }
}

/// Ordered, duplicate-free links in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    entries: Vec<LinkEntry>,
    seen: HashSet<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link unless an equal normalized URL is already present.
    ///
    /// Returns `false` for duplicates; the first occurrence keeps its
    /// position and text.
    pub fn insert(&mut self, link: NormalizedLink, text: Option<String>) -> bool {
        if !self.seen.insert(link.as_str().to_string()) {
            return false;
        }
        self.entries.push(LinkEntry { link, text });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinkEntry> {
        self.entries.iter()
    }

    /// The normalized URLs in order
    pub fn urls(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.link.as_str()).collect()
    }

    /// File contents: one entry per line, newline terminated
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(entry.line().trim_end());
            out.push('\n');
        }
        out
    }

    /// Replace `path` with the rendered links.
    ///
    /// The contents go to a temporary sibling first and are renamed into
    /// place, so a failed write leaves any previous file untouched.
    pub fn write_to(&self, path: &Path) -> Result<(), ExtractError> {
        let write_err = |source| ExtractError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = temp_sibling(path);
        if let Err(e) = fs::write(&tmp, self.render()) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }

        ::log::info!("Wrote {} links to {}", self.len(), path.display());
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a LinkEntry;
    type IntoIter = std::slice::Iter<'a, LinkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(OsStr::new("links")));
    name.push(".tmp");
    path.with_file_name(name)
}

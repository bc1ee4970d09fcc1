//! Document-level entry points.
//!
//! [`HtmlScraper`] ties the lexer and the automaton together for a whole
//! document held in memory or on disk.

use std::fs;
use std::path::Path;

use linkscan_common::warning::clear_warnings;

use crate::automaton::{ScanResult, TagAutomaton};
use crate::error::ScrapeError;
use crate::lexer::HtmlLexer;

/// Read access to the links a scraper found.
pub trait WebScraper {
    /// The URLs of every anchor (`<a href>`) in the document, in document order.
    fn retrieve_hyperlinks_a(&self) -> &[String];

    /// The URLs of every image (`<img src>`) in the document, in document order.
    fn retrieve_hyperlinks_img(&self) -> &[String];
}

impl WebScraper for ScanResult {
    fn retrieve_hyperlinks_a(&self) -> &[String] {
        self.anchor_links()
    }

    fn retrieve_hyperlinks_img(&self) -> &[String] {
        self.image_links()
    }
}

/// A scanned HTML document.
#[derive(Debug, Clone)]
pub struct HtmlScraper {
    result: ScanResult,
}

impl HtmlScraper {
    /// Lex and scan an HTML string.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::MalformedStream`] if the markup cannot be lexed.
    pub fn from_html(html: &str) -> Result<Self, ScrapeError> {
        clear_warnings();
        let result = TagAutomaton::new().scan(HtmlLexer::new(html.to_string()))?;
        Ok(Self { result })
    }

    /// Read an HTML file as UTF-8, then lex and scan it.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Io`] if the file cannot be read and
    /// [`ScrapeError::MalformedStream`] if its markup cannot be lexed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        let html = fs::read_to_string(path).map_err(|source| ScrapeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_html(&html)
    }

    /// True if every tag in the document was correctly nested and closed.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.result.is_balanced()
    }

    /// The full scan result.
    #[must_use]
    pub const fn result(&self) -> &ScanResult {
        &self.result
    }

    /// Take the scan result.
    #[must_use]
    pub fn into_result(self) -> ScanResult {
        self.result
    }
}

impl WebScraper for HtmlScraper {
    fn retrieve_hyperlinks_a(&self) -> &[String] {
        self.result.anchor_links()
    }

    fn retrieve_hyperlinks_img(&self) -> &[String] {
        self.result.image_links()
    }
}

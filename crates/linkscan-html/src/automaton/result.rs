use serde::Serialize;

/// A structural problem found while scanning.
///
/// Issues never stop a scan; each one also clears the balanced flag of the
/// [`ScanResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanIssue {
    /// Human-readable description of the violation.
    pub message: String,
    /// Index into the token stream of the token that revealed the violation.
    pub token_index: usize,
}

/// Everything one scan of a document produces.
///
/// Link lists keep document order and duplicates; values are the literal
/// attribute values with no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub(super) anchor_links: Vec<String>,
    pub(super) image_links: Vec<String>,
    pub(super) balanced: bool,
    pub(super) issues: Vec<ScanIssue>,
}

impl ScanResult {
    /// The `href` of every anchor tag, in document order.
    #[must_use]
    pub fn anchor_links(&self) -> &[String] {
        &self.anchor_links
    }

    /// The `src` of every image tag, in document order.
    #[must_use]
    pub fn image_links(&self) -> &[String] {
        &self.image_links
    }

    /// True if every opened tag was closed in the right order (or was
    /// self-closing) by the end of the stream.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.balanced
    }

    /// The structural violations found, in the order they were found.
    #[must_use]
    pub fn issues(&self) -> &[ScanIssue] {
        &self.issues
    }
}

//! Scraper warnings with colored terminal output.
//!
//! Provides deduplication so a document with the same defect repeated many
//! times does not flood the terminal. Used by the lexer to report markup it
//! had to step over.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// When set, warnings are still recorded but never printed.
static QUIET: AtomicBool = AtomicBool::new(false);

/// Warn about questionable markup (prints once per unique message).
///
/// Returns `true` if this is the first time the message was seen since the
/// last [`clear_warnings`] call.
///
/// # Example
/// ```
/// use linkscan_common::warning::warn_once;
///
/// linkscan_common::warning::set_quiet(true);
/// assert!(warn_once("Scraper", "closing tag </b> does not match open <i>"));
/// assert!(!warn_once("Scraper", "closing tag </b> does not match open <i>"));
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first_time && !QUIET.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[linkscan {component}] ⚠ {message}").yellow());
    }
    first_time
}

/// Clear all recorded warnings (call before scanning a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Silence (or re-enable) printing of warnings.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

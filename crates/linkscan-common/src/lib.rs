//! Common utilities for the linkscan scraper.
//!
//! This crate provides shared infrastructure used by the lexer, the tag
//! automaton and the command-line front end:
//! - **Warning System** - deduplicated, colored diagnostics on stderr

pub mod warning;

//! # Sniff
//!
//! Sniff searches a file tree for a literal word and prints the matching
//! lines with surrounding context. It also generates small pieces of
//! Python boilerplate for notebook work.
//!
//! ## Features
//!
//! * Pattern expansion - Glob patterns with recursive `**`, anchored at a base directory
//! * Line loading - Plain text and `.ipynb` notebooks, skipping unreadable files
//! * Searching - Literal matching, context windows and a cap on collected files
//! * Rendering - File headers, hit markers, line indices and run separators
//! * Snippets - Import blocks, date conversions, list literals and path expressions

/// Configuration errors
pub mod error;
/// Loading files as ordered sequences of lines
pub mod lines;
/// Base directory resolution and path helpers
pub mod paths;
/// Glob pattern expansion into candidate files
pub mod pattern;
/// Rendering search results as text or JSON
pub mod render;
/// Word search with context windows over candidate files
pub mod search;
/// Python boilerplate generators
pub mod snippet;
/// Logging setup
pub mod telemetry;

pub use error::SniffError;

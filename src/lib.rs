//! # wikimerge - Merge two Wikipedia articles into one page
//!
//! `wikimerge` fetches two Wikipedia articles, possibly from different
//! language editions, translates both into one target language with DeepL,
//! merges them section by section and writes a static HTML page.
//!
//! ## Quick Start
//!
//! ```bash
//! export DEEPL_API_KEY=...
//!
//! wikimerge \
//!   --url1 https://es.wikipedia.org/wiki/Madrid \
//!   --url2 https://fr.wikipedia.org/wiki/Madrid \
//!   --title "Madrid" --out madrid
//!
//! # Or answer the prompts
//! wikimerge
//! ```
//!
//! ## Merge order
//!
//! The `Lead` section comes first, then the first article's sections, then
//! sections only the second article has. Inside a section the first
//! article's paragraphs precede the second's.
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/wikimerge/config.toml`:
//!
//! ```toml
//! [wikimerge]
//! to = "EN-US"
//! output_dir = "output"
//!
//! [deepl]
//! endpoint = "https://api-free.deepl.com"
//! api_key_env = "DEEPL_API_KEY"
//! ```

/// Wikipedia link parsing and article retrieval.
pub mod article;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// Section-keyed document types.
pub mod document;

/// Error taxonomy for retrieval, translation and merging.
pub mod error;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Combining two translated documents.
pub mod merge;

/// Global output configuration (quiet mode, colors, logging).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Retrieval, translation, merge and render in sequence.
pub mod pipeline;

/// HTML rendering of merged documents.
pub mod render;

/// Translation client and batched article translation.
pub mod translation;

/// Terminal UI components (spinner, colors, prompts).
pub mod ui;

pub use document::{
    LEAD_SECTION, MergedDocument, ParagraphRecord, RawDocument, SectionMap, TranslatedDocument,
};
pub use error::{Error, ErrorKind, Result};
pub use merge::{merge, merge_json};

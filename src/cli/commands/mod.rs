//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// Merge command handler for translated JSON documents.
pub mod merge;

/// Full pipeline handler (the default command).
pub mod run;

/// Single-article translation handler.
pub mod translate;

//! Configuration file management and CLI-over-file resolution.

mod manager;

pub use manager::{
    ConfigError, ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_OUTPUT_DIR, DeeplConfig,
    ResolveOptions, ResolvedConfig, WikimergeConfig, WikipediaConfig, resolve_config,
};

//! Global output configuration and utilities.
//!
//! - The path of the written page goes to stdout (for scripting)
//! - Status messages, progress and logs go to stderr
//! - Quiet mode suppresses non-essential output
//! - Colors can be disabled via flag or `NO_COLOR`

use std::sync::OnceLock;

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // https://no-color.org/
            no_color: std::env::var_os("NO_COLOR").is_some(),
        }
    }
}

/// Initialize the global output configuration.
///
/// Called once at startup with the CLI flags; later calls are ignored.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

/// Installs the `log` backend.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output for this crate when `verbose` is on.
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose { "wikimerge=debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Print a status message to stderr (respects quiet mode).
///
/// Use this for progress and step completion messages.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::article::DEFAULT_USER_AGENT;
use crate::paths;
use crate::translation::{DEFAULT_ENDPOINT, DEFAULT_TARGET_LANGUAGE};

/// Environment variable consulted for the DeepL key when none is configured.
pub const DEFAULT_API_KEY_ENV: &str = "DEEPL_API_KEY";

/// Directory relative output file names are placed in.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Configuration problems that stop a run before any work starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "DeepL API key is missing\n\n\
         Set the {env_var} environment variable (or add it to a .env file):\n  \
         export {env_var}=\"your-api-key\"\n\n\
         Or set api_key under [deepl] in ~/.config/wikimerge/config.toml"
    )]
    MissingApiKey { env_var: String },
}

/// Default settings in the `[wikimerge]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikimergeConfig {
    /// Target language both articles are translated into.
    pub to: Option<String>,
    /// Directory for relative output file names.
    pub output_dir: Option<String>,
}

/// Translation service settings in the `[deepl]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeeplConfig {
    /// API base URL (free and pro accounts use different hosts).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl DeeplConfig {
    /// Name of the environment variable holding the key.
    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    /// Gets the API key, preferring the environment variable over the config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(self.api_key_env())
            && !key.trim().is_empty()
        {
            return Some(key.trim().to_string());
        }
        self.api_key.clone().filter(|key| !key.trim().is_empty())
    }
}

/// Content API settings in the `[wikipedia]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikipediaConfig {
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/wikimerge/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub wikimerge: WikimergeConfig,
    #[serde(default)]
    pub deepl: DeeplConfig,
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
}

/// Resolved configuration after merging CLI arguments, config file and defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The target language code, as given (normalized at request time).
    pub target_language: String,
    /// DeepL API base URL.
    pub endpoint: String,
    /// DeepL API key, if one was found.
    pub api_key: Option<String>,
    /// Environment variable the key is read from.
    pub api_key_env: String,
    /// User agent sent to Wikipedia.
    pub user_agent: String,
    /// Directory relative output names resolve against.
    pub output_dir: PathBuf,
}

impl ResolvedConfig {
    /// Returns the API key, or an error naming where it should come from.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            })
    }
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Target language override.
    pub to: Option<String>,
    /// Output directory override.
    pub output_dir: Option<String>,
}

/// Resolves configuration: CLI options, then config file, then defaults.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> ResolvedConfig {
    let target_language = options
        .to
        .as_ref()
        .or(config_file.wikimerge.to.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());

    let output_dir = options
        .output_dir
        .as_ref()
        .or(config_file.wikimerge.output_dir.as_ref())
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);

    let endpoint = config_file
        .deepl
        .endpoint
        .clone()
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let user_agent = config_file
        .wikipedia
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    ResolvedConfig {
        target_language,
        endpoint,
        api_key: config_file.deepl.get_api_key(),
        api_key_env: config_file.deepl.api_key_env().to_string(),
        user_agent,
        output_dir,
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/wikimerge/config.toml`
    /// or `~/.config/wikimerge/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager {
            config_path: temp_dir.path().join("config.toml"),
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let config = ConfigFile {
            wikimerge: WikimergeConfig {
                to: Some("en-gb".to_string()),
                output_dir: Some("/tmp/pages".to_string()),
            },
            deepl: DeeplConfig {
                endpoint: Some("https://api.deepl.com".to_string()),
                api_key: None,
                api_key_env: Some("MY_DEEPL_KEY".to_string()),
            },
            wikipedia: WikipediaConfig::default(),
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.wikimerge.to, Some("en-gb".to_string()));
        assert_eq!(loaded.wikimerge.output_dir, Some("/tmp/pages".to_string()));
        assert_eq!(loaded.deepl.api_key_env(), "MY_DEEPL_KEY");
        assert!(loaded.wikipedia.user_agent.is_none());
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        assert!(manager.load_or_default().unwrap().wikimerge.to.is_none());
    }

    #[test]
    fn test_load_or_default_reports_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[wikimerge\nto = ").unwrap();

        assert!(manager.load_or_default().is_err());
    }

    #[test]
    fn test_load_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[wikimerge]\nto = \"de\"\n").unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.wikimerge.to.as_deref(), Some("de"));
        assert!(loaded.deepl.endpoint.is_none());
    }

    #[test]
    #[serial]
    fn test_get_api_key_from_env() {
        // SAFETY: serialized with the other env-mutating tests
        unsafe {
            std::env::set_var("WIKIMERGE_TEST_KEY", "env-key");
        }

        let deepl = DeeplConfig {
            endpoint: None,
            api_key: Some("file-key".to_string()),
            api_key_env: Some("WIKIMERGE_TEST_KEY".to_string()),
        };
        assert_eq!(deepl.get_api_key(), Some("env-key".to_string()));

        // SAFETY: serialized with the other env-mutating tests
        unsafe {
            std::env::remove_var("WIKIMERGE_TEST_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_get_api_key_fallback_to_file() {
        // SAFETY: serialized with the other env-mutating tests
        unsafe {
            std::env::remove_var("WIKIMERGE_TEST_MISSING_KEY");
        }

        let deepl = DeeplConfig {
            endpoint: None,
            api_key: Some("file-key".to_string()),
            api_key_env: Some("WIKIMERGE_TEST_MISSING_KEY".to_string()),
        };
        assert_eq!(deepl.get_api_key(), Some("file-key".to_string()));
    }

    #[test]
    #[serial]
    fn test_require_api_key_names_env_var() {
        let config = ConfigFile {
            deepl: DeeplConfig {
                endpoint: None,
                api_key: None,
                api_key_env: Some("WIKIMERGE_TEST_ABSENT_KEY".to_string()),
            },
            ..ConfigFile::default()
        };

        let resolved = resolve_config(&ResolveOptions::default(), &config);
        let err = resolved.require_api_key().unwrap_err();
        assert!(err.to_string().contains("WIKIMERGE_TEST_ABSENT_KEY"));
    }

    #[test]
    fn test_resolve_config_defaults() {
        let resolved = resolve_config(&ResolveOptions::default(), &ConfigFile::default());

        assert_eq!(resolved.target_language, DEFAULT_TARGET_LANGUAGE);
        assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(resolved.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(resolved.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(resolved.api_key_env, DEFAULT_API_KEY_ENV);
    }
}

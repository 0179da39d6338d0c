//! Configure command handler for editing default settings.

use anyhow::Result;
use inquire::Select;

use crate::config::{
    ConfigFile, ConfigManager, DEFAULT_OUTPUT_DIR, ResolveOptions, WikimergeConfig,
    resolve_config,
};
use crate::translation::{DEFAULT_TARGET_LANGUAGE, SOURCE_LANGUAGES, TARGET_VARIANTS};
use crate::ui::{Style, handle_prompt_cancellation, prompt_with_default};

/// Runs the configure command.
///
/// With `show`, prints the effective configuration; otherwise edits the
/// `[wikimerge]` defaults interactively.
pub fn run_configure(show: bool) -> Result<()> {
    if show {
        return print_configuration();
    }
    handle_prompt_cancellation(run_configure_inner).map(|_| ())
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config);

    let to = select_target_language(config.wikimerge.to.as_deref())?;
    let output_dir = prompt_with_default(
        "Output directory:",
        "Relative output file names are placed here",
        Some(
            config
                .wikimerge
                .output_dir
                .as_deref()
                .unwrap_or(DEFAULT_OUTPUT_DIR),
        ),
    )?;

    config.wikimerge = WikimergeConfig {
        to: Some(to),
        output_dir: (!output_dir.is_empty()).then_some(output_dir),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_current_defaults(config: &ConfigFile) {
    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}          {}",
        Style::label("to"),
        config
            .wikimerge
            .to
            .as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("output_dir"),
        config
            .wikimerge
            .output_dir
            .as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
    println!();
}

fn print_configuration() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;
    let resolved = resolve_config(&ResolveOptions::default(), &config);

    println!("{}", Style::header("Configuration"));
    println!(
        "  {}      {}",
        Style::label("file"),
        Style::secondary(manager.config_path().display())
    );
    println!("  {}        {}", Style::label("to"), Style::value(&resolved.target_language));
    println!(
        "  {}    {}",
        Style::label("output"),
        Style::value(resolved.output_dir.display())
    );
    println!("  {}  {}", Style::label("endpoint"), Style::value(&resolved.endpoint));
    println!(
        "  {}   {} {}",
        Style::label("api_key"),
        if resolved.api_key.is_some() {
            Style::success("(set)")
        } else {
            Style::warning("(not set)")
        },
        Style::secondary(format!("via {}", resolved.api_key_env))
    );
    println!(
        "  {}    {}",
        Style::label("agent"),
        Style::value(&resolved.user_agent)
    );

    Ok(())
}

fn select_target_language(default: Option<&str>) -> Result<String> {
    let codes: Vec<(&str, &str)> = TARGET_VARIANTS
        .iter()
        .chain(SOURCE_LANGUAGES.iter().filter(|(code, _)| *code != "no"))
        .copied()
        .collect();

    let options: Vec<String> = codes
        .iter()
        .map(|(code, name)| format!("{code} - {name}"))
        .collect();

    let default = default.unwrap_or(DEFAULT_TARGET_LANGUAGE);
    let default_index = codes
        .iter()
        .position(|(code, _)| code.eq_ignore_ascii_case(default))
        .unwrap_or(0);

    let selection = Select::new("Default target language:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    // Extract code from "code - Name" format
    let code = selection.split(" - ").next().unwrap_or(&selection);

    Ok(code.to_string())
}

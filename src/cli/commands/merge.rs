//! Merging two previously translated documents.

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::error::Error;
use crate::input::{InputReader, STDIN_PATH};
use crate::merge::merge_json;
use crate::render::{render_html, resolve_output_path};
use crate::ui::Style;

pub struct MergeOptions {
    pub first: String,
    pub second: String,
    pub title: String,
    pub out: Option<String>,
    pub output_dir: Option<String>,
}

fn read_document(path: &str) -> Result<Value> {
    let text = InputReader::read(path)?;
    let value = serde_json::from_str(&text)
        .map_err(|e| Error::invalid_input(format!("{path} is not valid JSON: {e}")))?;
    Ok(value)
}

pub fn run_merge(options: &MergeOptions) -> Result<()> {
    if options.first == STDIN_PATH && options.second == STDIN_PATH {
        bail!("Only one of the two documents can be read from stdin");
    }

    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default()?;
    let settings = resolve_config(
        &ResolveOptions {
            to: None,
            output_dir: options.output_dir.clone(),
        },
        &file_config,
    );

    let first = read_document(&options.first)?;
    let second = read_document(&options.second)?;
    let merged = merge_json(&first, &second)
        .with_context(|| format!("Cannot merge {} and {}", options.first, options.second))?;

    let outfile = resolve_output_path(options.out.as_deref().unwrap_or_default(), &settings.output_dir);
    render_html(&options.title, &merged, &outfile)
        .with_context(|| format!("Failed to write {}", outfile.display()))?;

    crate::status!(
        "{} {} section(s), {} paragraph(s) written to {}",
        Style::success("✓"),
        merged.len(),
        merged.total_items(),
        Style::value(outfile.display())
    );
    println!("{}", outfile.display());
    Ok(())
}

//! Single-article translation command.

use anyhow::{Context, Result};
use std::path::Path;

use crate::article::{WikipediaClient, language_from_url};
use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::fs::atomic_write;
use crate::pipeline::{ArticleSource, fetch_and_translate};
use crate::translation::{ArticleTranslator, TranslationClient, validate_target_language};
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub url: String,
    pub lang: Option<String>,
    pub to: Option<String>,
    pub out: Option<String>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default()?;
    let settings = resolve_config(
        &ResolveOptions {
            to: options.to.clone(),
            output_dir: None,
        },
        &file_config,
    );

    let lang = options
        .lang
        .or_else(|| language_from_url(&options.url))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Cannot infer the article language from '{}'\n\n\
                 Pass it explicitly: wikimerge translate --lang <code> <url>",
                options.url
            )
        })?;

    let source = ArticleSource {
        url: options.url,
        lang,
    };
    let title = source.title()?;
    validate_target_language(&settings.target_language)?;
    let api_key = settings.require_api_key()?;

    let wiki = WikipediaClient::new(settings.user_agent.clone());
    let client = TranslationClient::new(settings.endpoint.clone(), api_key.to_string());
    let translator = ArticleTranslator::new(&client, &settings.target_language);

    let spinner = Spinner::new(&format!("Translating '{title}'..."));
    let translated = fetch_and_translate(&source, &title, &wiki, &translator).await?;
    spinner.stop();

    let json =
        serde_json::to_string_pretty(&translated).context("Failed to serialize document")?;

    match options.out {
        Some(out) => {
            atomic_write(Path::new(&out), &json)?;
            crate::status!(
                "{} {} section(s), {} paragraph(s) written to {}",
                Style::success("✓"),
                translated.len(),
                translated.total_items(),
                Style::value(&out)
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

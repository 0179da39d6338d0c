//! End-to-end run: retrieval, translation, merge, render.
//!
//! Steps run one after another and the first failure ends the run; the page
//! is written last, so a failed run leaves no output behind.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::article::{WikipediaClient, url_to_title};
use crate::config::ResolvedConfig;
use crate::document::TranslatedDocument;
use crate::merge::merge;
use crate::render::render_html;
use crate::translation::{
    ArticleTranslator, BatchTranslate, TranslationClient, validate_source_language,
    validate_target_language,
};
use crate::ui::{Spinner, Style};

/// One article to merge: its link and the language of its edition.
#[derive(Debug, Clone)]
pub struct ArticleSource {
    pub url: String,
    pub lang: String,
}

impl ArticleSource {
    /// Validates the link and language, returning the article title.
    pub fn title(&self) -> Result<String> {
        validate_source_language(&self.lang)?;
        url_to_title(&self.url).with_context(|| format!("Cannot use article URL '{}'", self.url))
    }
}

/// Everything a pipeline run needs from the user.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub first: ArticleSource,
    pub second: ArticleSource,
    /// Heading of the generated page.
    pub title: String,
    /// Final location of the page.
    pub outfile: PathBuf,
}

/// Fetches one article and translates it.
pub async fn fetch_and_translate<T: BatchTranslate>(
    source: &ArticleSource,
    title: &str,
    wiki: &WikipediaClient,
    translator: &ArticleTranslator<'_, T>,
) -> Result<TranslatedDocument> {
    let raw = wiki
        .get_article(&source.lang, title)
        .await
        .with_context(|| format!("Failed to fetch '{title}' from {}.wikipedia.org", source.lang))?;

    translator
        .translate(&raw, &source.lang)
        .await
        .with_context(|| format!("Failed to translate '{title}'"))
}

/// Runs the whole pipeline and returns the path of the written page.
pub async fn run_pipeline(config: &PipelineConfig, settings: &ResolvedConfig) -> Result<PathBuf> {
    let first_title = config.first.title()?;
    let second_title = config.second.title()?;
    validate_target_language(&settings.target_language)?;
    let api_key = settings.require_api_key()?;

    let wiki = WikipediaClient::new(settings.user_agent.clone());
    let client = TranslationClient::new(settings.endpoint.clone(), api_key.to_string());
    let translator = ArticleTranslator::new(&client, &settings.target_language);

    let spinner = Spinner::new(&format!("Processing '{first_title}'..."));
    let first = fetch_and_translate(&config.first, &first_title, &wiki, &translator).await?;
    crate::status!(
        "{} {first_title} ({}): {} section(s), {} paragraph(s)",
        Style::success("✓"),
        config.first.lang,
        first.len(),
        first.total_items()
    );

    spinner.set_message(&format!("Processing '{second_title}'..."));
    let second = fetch_and_translate(&config.second, &second_title, &wiki, &translator).await?;
    crate::status!(
        "{} {second_title} ({}): {} section(s), {} paragraph(s)",
        Style::success("✓"),
        config.second.lang,
        second.len(),
        second.total_items()
    );

    spinner.set_message("Rendering...");
    let merged = merge(&first, &second);
    render_html(&config.title, &merged, &config.outfile)
        .with_context(|| format!("Failed to write {}", config.outfile.display()))?;
    spinner.stop();

    Ok(config.outfile.clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};

    fn source(url: &str, lang: &str) -> ArticleSource {
        ArticleSource {
            url: url.to_string(),
            lang: lang.to_string(),
        }
    }

    #[test]
    fn test_article_source_title() {
        let title = source("https://es.wikipedia.org/wiki/Madrid", "es")
            .title()
            .unwrap();
        assert_eq!(title, "Madrid");
    }

    #[test]
    fn test_article_source_bad_url_keeps_kind() {
        let err = source("madrid", "es").title().unwrap_err();
        let core = err.downcast_ref::<Error>().unwrap();
        assert_eq!(core.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_article_source_bad_language() {
        let err = source("https://es.wikipedia.org/wiki/Madrid", "xx")
            .title()
            .unwrap_err();
        assert!(err.to_string().contains("Invalid source language"));
    }

    #[tokio::test]
    async fn test_run_pipeline_fails_before_network_on_bad_url() {
        let config = PipelineConfig {
            first: source("https://es.wikipedia.org/wiki/Madrid", "es"),
            second: source("https://example.com/wiki/Paris", "fr"),
            title: "Capitals".to_string(),
            outfile: PathBuf::from("/nonexistent/never-written.html"),
        };
        let settings = ResolvedConfig {
            target_language: "en-us".to_string(),
            endpoint: "http://127.0.0.1:9".to_string(),
            api_key: None,
            api_key_env: "UNUSED".to_string(),
            user_agent: "test".to_string(),
            output_dir: PathBuf::from("output"),
        };

        let err = run_pipeline(&config, &settings).await.unwrap_err();
        assert!(err.to_string().contains("example.com"));
        assert!(!config.outfile.exists());
    }
}

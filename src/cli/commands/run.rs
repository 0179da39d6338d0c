//! Full pipeline command, prompting for anything not given as a flag.

use anyhow::Result;

use crate::article::language_from_url;
use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::pipeline::{ArticleSource, PipelineConfig, run_pipeline};
use crate::render::resolve_output_path;
use crate::ui::{Style, handle_prompt_cancellation, prompt_required, prompt_with_default};

#[derive(Debug, Default)]
pub struct RunOptions {
    pub url1: Option<String>,
    pub lang1: Option<String>,
    pub url2: Option<String>,
    pub lang2: Option<String>,
    pub title: Option<String>,
    pub out: Option<String>,
    pub to: Option<String>,
    pub output_dir: Option<String>,
}

/// Values gathered from flags and prompts.
struct Inputs {
    first: ArticleSource,
    second: ArticleSource,
    title: String,
    out: String,
}

pub async fn run(options: RunOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load_or_default()?;
    let settings = resolve_config(
        &ResolveOptions {
            to: options.to.clone(),
            output_dir: options.output_dir.clone(),
        },
        &file_config,
    );

    let Some(inputs) = handle_prompt_cancellation(|| complete_inputs(options))? else {
        return Ok(());
    };

    let config = PipelineConfig {
        first: inputs.first,
        second: inputs.second,
        title: inputs.title,
        outfile: resolve_output_path(&inputs.out, &settings.output_dir),
    };

    let written = run_pipeline(&config, &settings).await?;

    crate::status!(
        "{} Merged article written to {}",
        Style::success("✓"),
        Style::value(written.display())
    );
    println!("{}", written.display());
    Ok(())
}

fn complete_inputs(options: RunOptions) -> Result<Inputs> {
    let mut prompted = false;

    let first = complete_source(options.url1, options.lang1, 1, &mut prompted)?;
    let second = complete_source(options.url2, options.lang2, 2, &mut prompted)?;

    let title = match options.title {
        Some(title) => title,
        None => {
            prompted = true;
            prompt_required("Output article title:", "Heading of the merged page")?
        }
    };

    // Only ask for a file name in an interactive session; flag-driven runs
    // fall back to the default name.
    let out = match options.out {
        Some(out) => out,
        None if prompted => prompt_with_default(
            "Output file name:",
            "Without the .html extension; placed in the output directory",
            None,
        )?,
        None => String::new(),
    };

    Ok(Inputs {
        first,
        second,
        title,
        out,
    })
}

fn complete_source(
    url: Option<String>,
    lang: Option<String>,
    number: usize,
    prompted: &mut bool,
) -> Result<ArticleSource> {
    let url = match url {
        Some(url) => url,
        None => {
            *prompted = true;
            prompt_required(
                &format!("Article URL {number}:"),
                "e.g. https://es.wikipedia.org/wiki/Madrid",
            )?
        }
    };

    let lang = match (lang, language_from_url(&url)) {
        (Some(lang), _) => lang,
        (None, Some(inferred)) if !*prompted => inferred,
        (None, inferred) => {
            *prompted = true;
            let answer = prompt_with_default(
                &format!("Article language code {number}:"),
                "e.g. 'es', 'fr'",
                inferred.as_deref(),
            )?;
            if answer.is_empty() {
                anyhow::bail!("Article language code {number} cannot be empty");
            }
            answer
        }
    };

    Ok(ArticleSource { url, lang })
}

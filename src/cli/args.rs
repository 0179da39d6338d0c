use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wikimerge")]
#[command(about = "Merge two Wikipedia articles into one translated HTML page")]
#[command(version)]
pub struct Args {
    /// URL of the first article
    #[arg(long)]
    pub url1: Option<String>,

    /// Language code of the first article (inferred from the URL if omitted)
    #[arg(long)]
    pub lang1: Option<String>,

    /// URL of the second article
    #[arg(long)]
    pub url2: Option<String>,

    /// Language code of the second article (inferred from the URL if omitted)
    #[arg(long)]
    pub lang2: Option<String>,

    /// Title of the merged page
    #[arg(long)]
    pub title: Option<String>,

    /// Output HTML file name (placed in the output directory unless absolute)
    #[arg(short = 'o', long = "out")]
    pub out: Option<String>,

    /// Target language code (e.g., en-us, en-gb, de)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Directory relative output file names are placed in
    #[arg(long, global = true)]
    pub output_dir: Option<String>,

    /// Suppress progress output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Show debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and translate a single article, writing it as JSON
    Translate {
        /// Wikipedia article URL
        url: String,

        /// Language code of the article (inferred from the URL if omitted)
        #[arg(short = 'l', long)]
        lang: Option<String>,

        /// Target language code
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        /// Write JSON here instead of stdout
        #[arg(short = 'o', long = "out")]
        out: Option<String>,
    },
    /// Merge two translated JSON documents and render them as HTML
    Merge {
        /// First translated document ("-" for stdin)
        first: String,

        /// Second translated document ("-" for stdin)
        second: String,

        /// Title of the merged page
        #[arg(long)]
        title: String,

        /// Output HTML file name
        #[arg(short = 'o', long = "out")]
        out: Option<String>,
    },
    /// Configure wikimerge defaults
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// List supported language codes
    Languages,
}

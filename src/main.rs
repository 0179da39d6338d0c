use anyhow::Result;
use clap::Parser;

use wikimerge::cli::commands::{configure, merge, run, translate};
use wikimerge::cli::{Args, Command};
use wikimerge::config::ConfigError;
use wikimerge::output::{self, OutputConfig};
use wikimerge::translation::print_languages;
use wikimerge::ui::Style;
use wikimerge::{Error, ErrorKind};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env is fine; the key may come from the environment or config.
    let _ = dotenv::dotenv();

    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || OutputConfig::default().no_color,
    });
    output::init_logger(args.verbose);

    if let Err(err) = dispatch(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(exit_code(&err));
    }
}

async fn dispatch(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        Some(Command::Translate { url, lang, to, out }) => {
            translate::run_translate(translate::TranslateOptions { url, lang, to, out }).await?;
        }
        Some(Command::Merge {
            first,
            second,
            title,
            out,
        }) => {
            merge::run_merge(&merge::MergeOptions {
                first,
                second,
                title,
                out,
                output_dir: args.output_dir,
            })?;
        }
        None => {
            let options = run::RunOptions {
                url1: args.url1,
                lang1: args.lang1,
                url2: args.url2,
                lang2: args.lang2,
                title: args.title,
                out: args.out,
                to: args.to,
                output_dir: args.output_dir,
            };
            run::run(options).await?;
        }
    }

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ConfigError>().is_some() {
        return exitcode::CONFIG;
    }
    err.downcast_ref::<Error>()
        .map_or(exitcode::SOFTWARE, |e| match e.kind() {
            ErrorKind::InvalidInput | ErrorKind::InputTooLarge => exitcode::USAGE,
            ErrorKind::Connection | ErrorKind::Service => exitcode::UNAVAILABLE,
            ErrorKind::Decode => exitcode::DATAERR,
        })
}

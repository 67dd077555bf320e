use anyhow::{Context, Result};
use autometa_batch::{BatchConfig, BatchRegenerator};
use autometa_generate::{DescriptionGenerator, MetaDescriptionGenerator};
use autometa_hook::{ARTICLE_CONTEXT, SaveOutcome, SkipReason, before_save};
use autometa_logging::{LogCollector, LogFormat, LogLevel, LoggingConfig};
use autometa_options::{GenerationOptions, load_options};
use autometa_ports::Article;
use autometa_store_jsonl::JsonlArticleStore;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const COMPONENT: &str = "autometa";

#[derive(Parser, Debug)]
#[command(name = "autometa", version)]
#[command(about = "Generate SEO meta descriptions for CMS articles.", long_about = None)]
struct Cli {
    /// Log debug detail to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Format of log lines written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormatArg::Plain, global = true)]
    log_format: LogFormatArg,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatArg {
    Plain,
    Json,
}

/// Generation options: a config file plus per-field overrides.
#[derive(Args, Debug)]
struct OptionArgs {
    /// JSON or YAML options file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum description length in characters.
    #[arg(long)]
    max_length: Option<usize>,
    /// Placed between the title and the body text.
    #[arg(long)]
    separator: Option<String>,
    /// Leave the title out.
    #[arg(long)]
    no_title: bool,
    /// Leave the body text out.
    #[arg(long)]
    no_body: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the description for one title and body.
    Generate {
        #[arg(long, default_value = "")]
        title: String,
        /// Body HTML.
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,
        /// Read the body HTML from a file.
        #[arg(long)]
        body_file: Option<PathBuf>,
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Run the before-save hook on a JSON article and print the result.
    Save {
        /// JSON file with title, introtext and metadesc.
        #[arg(long)]
        article: PathBuf,
        /// Save context reported by the CMS.
        #[arg(long, default_value = ARTICLE_CONTEXT)]
        context: String,
        /// Replace an existing description.
        #[arg(long)]
        overwrite: bool,
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Regenerate every description in a JSONL article file.
    Regenerate {
        #[arg(long)]
        input: PathBuf,
        /// Where to write the updated articles. Defaults to the input file.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Articles fetched per page.
        #[arg(long, default_value_t = autometa_batch::PAGE_SIZE)]
        page_size: usize,
        #[command(flatten)]
        options: OptionArgs,
    },
}

impl OptionArgs {
    fn resolve(&self, log: &mut LogCollector) -> Result<GenerationOptions> {
        let mut options = match &self.config {
            Some(path) => {
                log.debug(COMPONENT, format!("loading options from {}", path.display()));
                load_options(path)?
            }
            None => GenerationOptions::default(),
        };

        if let Some(max_length) = self.max_length {
            options.max_length = max_length;
        }
        if let Some(separator) = &self.separator {
            options.separator = separator.clone();
        }
        if self.no_title {
            options.include_title = false;
        }
        if self.no_body {
            options.include_body = false;
        }

        options.validate()?;
        Ok(options)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let format = match cli.log_format {
        LogFormatArg::Plain => LogFormat::Plain,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut log = LogCollector::new(LoggingConfig::new().with_level(level).with_format(format))
        .with_sink(std::io::stderr());

    run(cli.cmd, &mut log)
}

fn run(cmd: Command, log: &mut LogCollector) -> Result<()> {
    let generator = MetaDescriptionGenerator;

    match cmd {
        Command::Generate {
            title,
            body,
            body_file,
            options,
        } => {
            let options = options.resolve(log)?;
            let body = match body_file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("read body {path:?}"))?,
                None => body.unwrap_or_default(),
            };
            println!("{}", generator.generate(&title, &body, &options));
        }

        Command::Save {
            article,
            context,
            overwrite,
            options,
        } => {
            let mut options = options.resolve(log)?;
            options.overwrite_existing |= overwrite;

            let text = std::fs::read_to_string(&article)
                .with_context(|| format!("read {article:?}"))?;
            let mut record: Article = serde_json::from_str(&text)
                .with_context(|| format!("parse article {article:?}"))?;

            match before_save(&context, &mut record, &options, &generator) {
                SaveOutcome::Generated => log.debug(COMPONENT, "generated meta description"),
                SaveOutcome::Skipped(SkipReason::OtherContext) => {
                    log.info(COMPONENT, format!("skipped: context {context} is not an article"))
                }
                SaveOutcome::Skipped(SkipReason::ExistingDescription) => {
                    log.info(COMPONENT, "skipped: meta description already set")
                }
            }

            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Command::Regenerate {
            input,
            out,
            page_size,
            options,
        } => {
            let options = options.resolve(log)?;
            let mut store = JsonlArticleStore::open(&input)?;

            let report = BatchRegenerator::new(&generator)
                .with_config(BatchConfig { page_size })
                .run(&mut store, &options, log)?;
            report.log_outcome(log);

            let out = out.unwrap_or(input);
            store.save(&out)?;
            log.debug(COMPONENT, format!("wrote {}", out.display()));

            println!("{report}");
        }
    }

    Ok(())
}

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::LevelFilter;

use corpus_wordcount::{Config, CorpusDriver, IndexPolicy, ParityScope};

#[derive(Parser, Debug)]
#[command(version, about = "Word frequencies and running median over a text corpus")]
struct Cli {
    /// JSON configuration file; flags below override it
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding the *.txt corpus files
    #[arg(short, long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// Word frequency output file
    #[arg(long, value_name = "PATH")]
    word_output: Option<PathBuf>,

    /// Running median output file
    #[arg(long, value_name = "PATH")]
    median_output: Option<PathBuf>,

    /// Also write a JSON run summary
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Initial number of word index slots
    #[arg(long, value_name = "SLOTS")]
    index_capacity: Option<usize>,

    /// Never resize the word index; a full index aborts the run
    #[arg(long)]
    fixed_index: bool,

    /// Truncate tokens to this many bytes
    #[arg(long, value_name = "BYTES")]
    max_token_len: Option<usize>,

    /// Keep the median parity toggle running across files instead of
    /// restarting it with each file
    #[arg(long)]
    corpus_parity: bool,

    /// Number of most frequent words to log and put in the summary
    #[arg(long, value_name = "N")]
    top_words: Option<usize>,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    quiet: u8,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        if let Some(dir) = self.input_dir {
            config.input_dir = dir;
        }
        if let Some(path) = self.word_output {
            config.word_output = path;
        }
        if let Some(path) = self.median_output {
            config.median_output = path;
        }
        if self.summary.is_some() {
            config.summary_output = self.summary;
        }
        if let Some(capacity) = self.index_capacity {
            config.index_capacity = capacity;
        }
        if self.fixed_index {
            config.index_policy = IndexPolicy::Fixed;
        }
        if let Some(len) = self.max_token_len {
            config.max_token_len = len;
        }
        if self.corpus_parity {
            config.median_parity = ParityScope::Corpus;
        }
        if let Some(n) = self.top_words {
            config.top_words = n;
        }
        Ok(config)
    }
}

/// Level forced by -v/-q. Without either, RUST_LOG (default "info") decides
fn forced_level(verbose: u8, quiet: u8) -> Option<LevelFilter> {
    match (quiet, verbose) {
        (0, 0) => None,
        (0, 1) => Some(LevelFilter::Debug),
        (0, _) => Some(LevelFilter::Trace),
        (1, _) => Some(LevelFilter::Warn),
        _ => Some(LevelFilter::Error),
    }
}

fn init_logging(verbose: u8, quiet: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if let Some(level) = forced_level(verbose, quiet) {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    log::debug!("{:?}", config);
    let mut driver = CorpusDriver::new(config).context("invalid configuration")?;
    driver.run().context("word count run failed")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    log::info!("Word Count toolkit v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

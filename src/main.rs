mod config;
mod display;
mod error;
mod random_codes;
mod words;

use crate::{
    config::Settings,
    display::{CodeDisplay, JsonDisplay, PlainDisplay, TerminalDisplay},
    error::{PromoError, PromoResult},
    random_codes::{generate_codes, seeded_rng},
    words::{load_pool, WordFilter},
};
use anyhow::Context;
use clap::Parser;
use std::{
    ffi::OsString,
    io::{self, IsTerminal},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 3;

/// Generate unique three-word promo codes from a dictionary
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// How many codes to generate
    #[arg(allow_negative_numbers = true, value_parser = parse_count)]
    count: Option<usize>,

    /// Word list to draw from, one word per line
    #[arg(short, long, value_name = "PATH")]
    dict: Option<PathBuf>,

    /// Shortest word to accept
    #[arg(long)]
    min_len: Option<usize>,

    /// Longest word to accept
    #[arg(long)]
    max_len: Option<usize>,

    /// Fixed seed, for reproducible codes
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print codes one per line, without colors or waiting for a key
    #[arg(long, conflicts_with = "json")]
    plain: bool,

    /// Print codes as a JSON document
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Terminal,
    Plain,
    Json,
}

impl OutputMode {
    const fn pick(plain: bool, json: bool, stdout_is_terminal: bool) -> Self {
        match (plain, json) {
            (_, true) => Self::Json,
            (true, _) => Self::Plain,
            _ if stdout_is_terminal => Self::Terminal,
            _ => Self::Plain,
        }
    }
}

fn parse_count(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err("count must be a positive integer".to_string()),
    }
}

/// Parses the command line, turning malformed input into [`PromoError::InvalidArgument`].
///
/// `--help` and `--version` still print and exit the way clap does.
fn parse_args<I, T>(argv: I) -> PromoResult<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(argv).map_err(|e| {
        if !e.use_stderr() {
            e.exit();
        }

        let rendered = e.render().to_string();
        let first_line = rendered.lines().next().unwrap_or_default();
        PromoError::invalid(first_line.strip_prefix("error: ").unwrap_or(first_line))
    })
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let count = args.count.unwrap_or(DEFAULT_COUNT);

    let settings = Settings::from_env()
        .with_overrides(args.dict, args.min_len, args.max_len)
        .validate()?;

    let filter = WordFilter::new(settings.min_word_len, settings.max_word_len);
    let pool = load_pool(&settings.dict_path, &filter).context("failed to build word pool")?;

    let codes = generate_codes(&pool, count, &mut seeded_rng(args.seed))
        .context("failed to generate promo codes")?;

    let mut display: Box<dyn CodeDisplay> =
        match OutputMode::pick(args.plain, args.json, io::stdout().is_terminal()) {
            OutputMode::Terminal => Box::new(TerminalDisplay::new(rand::rng())),
            OutputMode::Plain => Box::new(PlainDisplay::new(io::stdout().lock())),
            OutputMode::Json => Box::new(JsonDisplay::new(io::stdout().lock())),
        };

    display.show(&codes).context("failed to display promo codes")
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = parse_args(std::env::args_os())?;
    run(args)
}

//! textrank-nl: rank keywords and phrases in Dutch text

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use textrank_nl::{bundled_language, load_language, LanguageModel, TextRank, TextRankConfig};

#[derive(Parser)]
#[command(name = "textrank-nl")]
#[command(version, about = "TextRank keyword and phrase extraction for Dutch text", long_about = None)]
struct Cli {
    /// Resource directory containing models/ (bundled models when omitted)
    #[arg(short, long, value_name = "DIR")]
    resources: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of keywords and phrases to print
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Input file (stdin when omitted)
    input: Option<PathBuf>,
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("textrank_nl=debug")
        } else {
            EnvFilter::new("textrank_nl=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => TextRankConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TextRankConfig::default(),
    };
    if let Some(top) = cli.top {
        config.top_n = top;
    }

    let language: Arc<dyn LanguageModel> = match &cli.resources {
        Some(dir) => load_language(dir, &config.language)
            .with_context(|| format!("failed to load language resources from {}", dir.display()))?,
        None => bundled_language(&config.language).context("failed to load bundled models")?,
    };

    let text = read_input(cli.input.as_ref())?;
    let engine = TextRank::new(language, config)?;
    let result = engine.analyze(&text)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("keywords:");
    for kw in &result.keywords {
        println!("  {:.4}  {}  ({}x)", kw.score, kw.text, kw.count);
    }
    println!("phrases:");
    for phrase in &result.phrases {
        println!("  {:.4}  {}  ({}x)", phrase.score, phrase.text, phrase.count);
    }

    Ok(())
}

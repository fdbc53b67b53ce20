use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::config::{ToolConfig, DEFAULT_CONFIG_FILE};
use crate::engine::{FrequencyTable, Reduction};
use crate::report::{CodeReport, FrequencyReport, TreeReport};
use crate::utils::io::read_text;

#[derive(Parser)]
#[command(name = "huffseed")]
#[command(about = "Build Huffman trees from symbol frequencies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Config file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Maximum bytes read from an input file (overrides config)")]
    max_bytes: Option<usize>,

    #[arg(long, global = true, help = "Output as JSON")]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the symbol frequency table
    Frequencies {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Reduce the frequencies to a Huffman tree
    Tree {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, help = "Also list every merge in order")]
        merges: bool,
    },
    /// Show the prefix code of every symbol
    Codes {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Write a default config file
    GenerateConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Config file path")]
        output: String,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input file
    path: Option<PathBuf>,

    #[arg(long, conflicts_with = "path", help = "Use this text instead of a file")]
    text: Option<String>,
}

struct Input {
    source: String,
    bytes: Vec<u8>,
}

impl InputArgs {
    async fn acquire(&self, config: &ToolConfig) -> Result<Input> {
        match (&self.path, &self.text) {
            (Some(path), _) => Ok(Input {
                source: path.display().to_string(),
                bytes: read_text(path, config.max_text_bytes).await?,
            }),
            (None, Some(text)) => Ok(Input {
                source: "<inline>".to_string(),
                bytes: text.as_bytes().to_vec(),
            }),
            (None, None) => bail!("an input file or --text is required"),
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ToolConfig::load(cli.config.as_deref())?;
    if let Some(max_bytes) = cli.max_bytes {
        config.max_text_bytes = max_bytes;
    }
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .init();

    match cli.command {
        Commands::Frequencies { input } => {
            let input = input.acquire(&config).await?;
            let table = FrequencyTable::build(&input.bytes)?;
            emit(cli.json, &FrequencyReport::new(input.source, &table), FrequencyReport::render)
        }
        Commands::Tree { input, merges } => {
            let input = input.acquire(&config).await?;
            let report = build_tree(input, merges)?;
            emit(cli.json, &report, TreeReport::render)
        }
        Commands::Codes { input } => {
            let input = input.acquire(&config).await?;
            let report = build_tree(input, false)?;
            emit(cli.json, &CodeReport::new(report.source, &report.tree), CodeReport::render)
        }
        Commands::GenerateConfig { output } => {
            ToolConfig::default().save(&output)?;
            if cli.json {
                println!("{}", serde_json::json!({"config": output}));
            } else {
                println!("✅ Wrote default config to {}", output);
            }
            Ok(())
        }
    }
}

fn build_tree(input: Input, keep_merges: bool) -> Result<TreeReport> {
    let table = FrequencyTable::build(&input.bytes)?;
    let mut reduction = Reduction::seeding();
    reduction
        .seed(&table)
        .with_context(|| format!("cannot build a tree from {}", input.source))?;
    let leaves = reduction.remaining();

    let mut merges = Vec::new();
    while let Some(merge) = reduction.step()? {
        if keep_merges {
            merges.push(merge);
        }
    }
    let tree = reduction.finish()?;
    info!("built tree for {}: {} leaves, weight {}", input.source, leaves, tree.weight);

    Ok(TreeReport::new(input.source, tree, keep_merges.then_some(merges)))
}

fn emit<T: Serialize>(json: bool, report: &T, render: fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render(report));
    }
    Ok(())
}

//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with all three stages
    Full,
    /// Only the final synthesized answer
    Final,
    /// JSON output
    Json,
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - a council of models answers, ranks, and synthesizes")]
#[command(long_about = r#"
llm-council sends your question to a council of LLMs and returns one answer.

The deliberation has three stages:
1. Response Collection: every council member answers your question in parallel
2. Peer Ranking: each member ranks the anonymized answers of the whole council
3. Synthesis: a designated model folds answers and rankings into the final reply

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/llm-council/config.toml   Global config

Example:
  llm-council "What's the best way to handle errors in Rust?"
  llm-council -m openai/gpt-5.1 -m anthropic/claude-sonnet-4.5 "Compare async patterns"
  llm-council --stream "Why is the sky blue?"
"#)]
pub struct Cli {
    /// The question to ask the council
    pub question: String,

    /// Stream deliberation events as JSON lines instead of waiting
    #[arg(short, long)]
    pub stream: bool,

    /// Continue an existing conversation instead of starting a new one
    #[arg(long, value_name = "ID")]
    pub conversation: Option<String>,

    /// Council member models (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Model to use for the final synthesis
    #[arg(long, value_name = "MODEL")]
    pub synthesizer: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "final")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}

//! CLI entrypoint for llm-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod cli;
mod output;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, OutputFormat};
use council_application::ports::conversation_store::ConversationStore;
use council_application::use_cases::send_message::SendMessageUseCase;
use council_domain::{Model, UserPrompt};
use council_infrastructure::{ConfigLoader, FileConversationStore, OpenRouterGateway};
use output::ConsoleFormatter;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting llm-council");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?
    };

    // Build the roster: config first, CLI flags override
    let mut roster = config.council.roster();
    if !cli.model.is_empty() {
        roster.members = cli
            .model
            .iter()
            .map(|name| Model::from(name.as_str()))
            .collect();
    }
    if let Some(name) = &cli.synthesizer {
        roster.synthesizer = Model::from(name.as_str());
    }

    let Some(api_key) = config.openrouter.api_key else {
        bail!(
            "no OpenRouter API key configured; set OPENROUTER_API_KEY or \
             add api_key under [openrouter] in the config file"
        );
    };

    // === Dependency Injection ===
    let gateway = Arc::new(OpenRouterGateway::with_base_url(
        api_key,
        config.openrouter.base_url.as_str(),
    ));
    let data_dir = config.storage.resolved_data_dir();
    let store = Arc::new(
        FileConversationStore::new(&data_dir)
            .with_context(|| format!("cannot open data directory {}", data_dir.display()))?,
    );

    // New conversation unless one is being continued
    let conversation_id = match cli.conversation {
        Some(id) => {
            if store.get(&id).await?.is_none() {
                bail!("conversation not found: {}", id);
            }
            id
        }
        None => {
            let id = Uuid::new_v4().to_string();
            store.create(&id).await?;
            id
        }
    };

    let prompt = UserPrompt::try_new(&cli.question)
        .context("the question must not be empty")?;
    let use_case = SendMessageUseCase::new(gateway, store, roster);

    if cli.stream {
        // NDJSON on stdout, one event per line
        let mut rx = use_case.execute_streaming(&conversation_id, prompt);
        let mut failed = false;
        while let Some(event) = rx.recv().await {
            print!("{}", event.to_json_line());
            if matches!(event, council_domain::CouncilEvent::Error { .. }) {
                failed = true;
            }
        }
        if failed {
            std::process::exit(1);
        }
        eprintln!("conversation: {}", conversation_id);
        return Ok(());
    }

    let result = use_case.execute(&conversation_id, prompt).await?;

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&cli.question, &result),
        OutputFormat::Final => ConsoleFormatter::format_final(&cli.question, &result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };

    println!("{}", output);
    eprintln!("conversation: {}", conversation_id);

    Ok(())
}

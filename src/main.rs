//! Spirit Guide command-line entry point.
//!
//! Wires the file-backed stores and the backend client together, then lists
//! the locally stored conversations, newest first.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use spirit_guide::adapters::http::{ApiClient, ApiClientConfig};
use spirit_guide::adapters::{FileKeyValueStore, HttpAiRepository, LocalConversationStore, TokenStore};
use spirit_guide::application::{LoadConversationsHandler, LoadConversationsQuery};
use spirit_guide::config::AppConfig;
use spirit_guide::ports::KeyValueStore;

const DEFAULT_LIST_LIMIT: i64 = 20;

#[derive(Parser)]
#[command(name = "spirit-guide")]
#[command(about = "List locally stored Spirit Guide conversations, newest first", long_about = None)]
struct Cli {
    /// Maximum number of conversations to show
    #[arg(short, long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: i64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.logging.init() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&config, cli.limit).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &AppConfig, limit: i64) -> Result<(), String> {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(&config.storage.data_dir));
    let tokens = Arc::new(TokenStore::new(store.clone()));
    let client = ApiClient::new(
        ApiClientConfig::new(config.api.base_url.clone()).with_timeout(config.api.timeout()),
        tokens,
    )
    .map_err(|e| e.to_string())?;
    let repository = Arc::new(HttpAiRepository::new(
        Arc::new(client),
        LocalConversationStore::new(store),
    ));

    tracing::info!(data_dir = %config.storage.data_dir.display(), limit, "Loading conversations");
    let result = LoadConversationsHandler::new(repository)
        .handle(LoadConversationsQuery { limit: Some(limit) })
        .await
        .map_err(|e| e.to_string())?;

    if result.conversations.is_empty() {
        println!("No conversations yet.");
    }
    for conversation in &result.conversations {
        let preview = conversation.preview(60).unwrap_or_default();
        println!(
            "{}  {}  {} messages  {}",
            conversation.id(),
            conversation.updated_at().to_rfc3339(),
            conversation.message_count(),
            conversation.summary().unwrap_or(&preview)
        );
    }
    Ok(())
}

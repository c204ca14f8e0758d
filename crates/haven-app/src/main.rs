//! Haven entry point.
//!
//! Serves the HTTP API by default; `--chat` runs a terminal conversation
//! against the same dialogue router instead.

mod cli;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use haven_advisor::{GoogleMapsClient, HousingAdvisor};
use haven_api::auth::{expand_home, load_or_generate_token};
use haven_api::{start_server, AppState};
use haven_chat::{validate_message, DialogueRouter, SessionContext};
use haven_core::HavenConfig;

use cli::CliArgs;

const EXIT_WORDS: [&str; 3] = ["quit", "exit", "bye"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let mut config = HavenConfig::load_or_default(&config_file);
    config.general.port = args.resolve_port(config.general.port);

    // Logs go to stderr so they never interleave with chat output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(args.resolve_log_filter(&config.general.log_level))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_file.display(),
        "Starting Haven"
    );

    if args.chat {
        return run_chat(&config).await;
    }

    let maps = GoogleMapsClient::from_config(&config.places)?;
    let advisor = HousingAdvisor::with_google(maps);
    let token = load_or_generate_token(&expand_home(&config.general.api_token_path));
    let state = AppState::new(config.clone(), advisor, token);

    start_server(&config, state).await?;
    Ok(())
}

/// Line-oriented chat on stdin/stdout until EOF or an exit word.
async fn run_chat(config: &HavenConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = DialogueRouter::new(&config.coach);
    let mut session = SessionContext::new();
    tracing::info!(session = %session.id, "Chat session started");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"Hi, I'm Haven. Tell me what you're looking for in a new home. Type 'quit' to leave.\n> ")
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if EXIT_WORDS.contains(&message.to_lowercase().as_str()) {
            break;
        }

        let output = match validate_message(message, config.coach.max_message_length) {
            Ok(()) => {
                let reply = router.converse(&mut session, message).await;
                format!("\n{}\n\n> ", reply.response.message)
            }
            Err(e) => format!("({})\n> ", e),
        };
        stdout.write_all(output.as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!(
        session = %session.id,
        messages = session.len(),
        "Chat session ended"
    );
    stdout.write_all(b"\nTake care!\n").await?;
    Ok(())
}

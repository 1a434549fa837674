use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use shinegate::config::Config;
use shinegate::output::terminal::{display_filter_result, display_moderation_error};
use shinegate::requests::{CreateMessageRequest, CreateReplyRequest};
use shinegate::{ContentFilterService, FilterResult, Mode, ModerationError};

/// Shinegate: content moderation gate for outgoing messages and replies.
///
/// Runs text through the local profanity filter and the remote moderation
/// service the same way the app does before posting.
#[derive(Parser)]
#[command(name = "shinegate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the local submission filter only (no network)
    Check {
        text: String,

        /// Mode wire value: "light" (Shine) or "dark" (Shadow)
        #[arg(long)]
        mode: Option<String>,
    },

    /// Mode-independent profanity check, as used for typing feedback
    Profanity { text: String },

    /// Run the full pipeline: local filter, then the moderation service
    Submit {
        text: String,

        #[arg(long)]
        mode: Option<String>,
    },

    /// Screen a create-message request and print it if allowed
    Message {
        body: String,

        #[arg(long)]
        mode: Option<String>,
    },

    /// Screen a create-reply request and print it if allowed
    Reply {
        body: String,

        /// ID of the message being replied to
        #[arg(long)]
        parent_id: String,

        /// Post the reply privately
        #[arg(long)]
        private: bool,

        #[arg(long)]
        mode: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shinegate=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let service = ContentFilterService::from_config(&config)?;
    let pick_mode = |mode: Option<String>| {
        mode.map(|m| Mode::from_api_value(&m))
            .unwrap_or(config.default_mode)
    };

    info!(
        words = service.profanity_list().len(),
        server_check = config.server_check,
        "Content filter ready"
    );

    let allowed = match cli.command {
        Commands::Check { text, mode } => {
            let mode = pick_mode(mode);
            let result = service.filter_content(&text, mode);
            display_filter_result(&result, Some(mode));
            result.is_allowed()
        }

        Commands::Profanity { text } => {
            let result = service.check_profanity(&text);
            display_filter_result(&result, None);
            result.is_allowed()
        }

        Commands::Submit { text, mode } => {
            let mode = pick_mode(mode);
            report(service.moderate(&text, mode).await, mode)
        }

        Commands::Message { body, mode } => {
            let request = CreateMessageRequest::new(body, pick_mode(mode));
            let outcome = service.screen_message(&request).await;
            let allowed = report(outcome, request.mode);
            if allowed {
                println!("{}", serde_json::to_string_pretty(&request)?.dimmed());
            }
            allowed
        }

        Commands::Reply {
            body,
            parent_id,
            private,
            mode,
        } => {
            let mode = pick_mode(mode);
            let request = CreateReplyRequest::new(body, !private, parent_id);
            let outcome = service.screen_reply(&request, mode).await;
            let allowed = report(outcome, mode);
            if allowed {
                println!("{}", serde_json::to_string_pretty(&request)?.dimmed());
            }
            allowed
        }
    };

    Ok(if allowed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Display a pipeline outcome; returns whether the content was allowed.
fn report(outcome: Result<FilterResult, ModerationError>, mode: Mode) -> bool {
    match outcome {
        Ok(result) => {
            display_filter_result(&result, Some(mode));
            true
        }
        Err(err) => {
            display_moderation_error(&err);
            false
        }
    }
}

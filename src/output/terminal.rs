// Colored terminal output for filter results and moderation failures.
//
// main.rs delegates all display here so the command handlers stay about
// wiring, not formatting.

use colored::Colorize;

use crate::error::ModerationError;
use crate::filter::result::FilterResult;
use crate::mode::Mode;

/// Display the outcome of a local check.
pub fn display_filter_result(result: &FilterResult, mode: Option<Mode>) {
    let context = mode
        .map(|m| format!(" ({} mode)", m.display_name()))
        .unwrap_or_default();

    if result.is_allowed() {
        println!("{}{}", "Allowed".green().bold(), context.dimmed());
        return;
    }

    println!("{}{}", "Rejected".red().bold(), context.dimmed());
    let categories: Vec<String> = result.violations().iter().map(|v| v.to_string()).collect();
    println!("  Violations: {}", categories.join(", "));
    println!("  Detected words: {}", result.detected_words().join(", ").yellow());
}

/// Display why a full submission didn't go through.
pub fn display_moderation_error(error: &ModerationError) {
    match error {
        ModerationError::ClientSideViolation {
            violation_type,
            detected_words,
            mode,
        } => {
            println!(
                "{} {}",
                "Rejected locally:".red().bold(),
                format!("contains {violation_type} ({} mode)", mode.display_name()).dimmed()
            );
            println!("  Detected words: {}", detected_words.join(", ").yellow());
        }
        ModerationError::ServerSideViolation {
            violation_type,
            mode,
            server_message,
            suggestion,
        } => {
            let category = violation_type
                .map(|v| v.to_string())
                .unwrap_or_else(|| "unspecified".to_string());
            println!(
                "{} {}",
                "Rejected by moderation service:".red().bold(),
                format!("{category} ({} mode)", mode.display_name()).dimmed()
            );
            println!("  {server_message}");
            if let Some(suggestion) = suggestion {
                println!("  {} {}", "Suggestion:".cyan(), suggestion);
            }
        }
        ModerationError::RateLimited {
            retry_after_seconds,
        } => {
            println!("{}", "Rate limited by moderation service".yellow().bold());
            match retry_after_seconds {
                Some(secs) => println!("  Try again in {secs}s"),
                None => println!("  Try again shortly"),
            }
        }
        ModerationError::ServiceError { cause } => {
            println!("{}", "Moderation service unavailable".yellow().bold());
            if let Some(cause) = cause {
                println!("  {}", cause.dimmed());
            }
        }
    }
}

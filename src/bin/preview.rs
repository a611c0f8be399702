//! Preview binary - prints the envelope of one response operation
//!
//! Usage:
//!   cargo run --bin preview -- not-found          # English
//!   cargo run --bin preview -- insert-failed fa   # Persian
//!   cargo run --bin preview -- list               # Available operations
//!
//! Optional environment variables:
//! - LANG_DIR (directory of <code>.json language packs to load)

use anyhow::{bail, Context, Result};
use respond::i18n::{DirectorySource, TranslationRegistry};
use respond::respond::{Respond, ResponseEnvelope};
use serde_json::json;
use std::io::Write;

const OPERATIONS: [&str; 13] = [
    "succeed",
    "insert-succeeded",
    "insert-failed",
    "update-succeeded",
    "update-failed",
    "delete-succeeded",
    "delete-failed",
    "not-found",
    "wrong-parameters",
    "method-not-allowed",
    "request-field-not-found",
    "request-field-duplicated",
    "validation-errors",
];

fn run(respond: Respond<'_>, operation: &str) -> Result<ResponseEnvelope> {
    Ok(match operation {
        "succeed" => respond.succeed(json!({"data": "Test"})),
        "insert-succeeded" => respond.insert_succeeded(),
        "insert-failed" => respond.insert_failed(),
        "update-succeeded" => respond.update_succeeded(),
        "update-failed" => respond.update_failed(),
        "delete-succeeded" => respond.delete_succeeded(),
        "delete-failed" => respond.delete_failed(),
        "not-found" => respond.not_found(),
        "wrong-parameters" => respond.wrong_parameters(),
        "method-not-allowed" => respond.method_not_allowed(),
        "request-field-not-found" => respond.request_field_not_found(),
        "request-field-duplicated" => respond.request_field_duplicated(),
        "validation-errors" => respond.validation_errors(json!({"name": ["is required"]})),
        other => bail!(
            "Unknown operation '{}'. Available: {}",
            other,
            OPERATIONS.join(", ")
        ),
    })
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("respond=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let operation = args.first().map(String::as_str).unwrap_or("list");
    let lang = args.get(1).map(String::as_str).unwrap_or("en");

    let mut stdout = std::io::stdout().lock();

    if operation == "list" {
        for name in OPERATIONS {
            writeln!(stdout, "{}", name)?;
        }
        return Ok(());
    }

    let registry = TranslationRegistry::bundled();
    if let Ok(dir) = std::env::var("LANG_DIR") {
        registry
            .seed(&DirectorySource::new(&dir))
            .with_context(|| format!("Failed to load language packs from {}", dir))?;
    }

    let envelope = run(Respond::with_lang(&registry, lang), operation)?;

    writeln!(stdout, "HTTP {}", envelope.status_code())?;
    envelope
        .write_json(&mut stdout)
        .context("Failed to write response document")?;
    writeln!(stdout)?;
    Ok(())
}

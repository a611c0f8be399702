//! HTTP service exposing the translation registry.
//!
//! Every response, including 404 and 405, is built with [`Respond`] in the
//! language requested through `Accept-Language`.

use crate::config::Config;
use crate::i18n::{LanguageCode, LanguagePack, TranslationRegistry};
use crate::respond::{Lang, ResponseEnvelope};
use crate::security::api_key_matches;
use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Header carrying the key for the registration endpoint
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TranslationRegistry>,
    pub config: Arc<Config>,
}

#[derive(Debug, Serialize)]
struct Health {
    healthy: bool,
}

#[derive(Debug, Serialize)]
struct LanguageList {
    fallback: LanguageCode,
    languages: Vec<LanguageCode>,
}

#[derive(Debug, Serialize)]
struct RegistrationErrors {
    errors: Vec<String>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health).fallback(method_not_allowed))
        .route("/languages", get(list_languages).fallback(method_not_allowed))
        .route(
            "/languages/:code",
            get(get_language)
                .put(register_language)
                .fallback(method_not_allowed),
        )
        .route("/metrics", get(metrics).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured port and serve until the process exits.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, router(state))
        .await
        .context("Server error")?;
    Ok(())
}

async fn health(State(state): State<AppState>, lang: Lang) -> ResponseEnvelope {
    lang.respond(&state.registry).succeed(Health { healthy: true })
}

async fn list_languages(State(state): State<AppState>, lang: Lang) -> ResponseEnvelope {
    let list = LanguageList {
        fallback: state.registry.fallback_code().clone(),
        languages: state.registry.languages(),
    };
    lang.respond(&state.registry).succeed(list)
}

async fn get_language(
    State(state): State<AppState>,
    lang: Lang,
    Path(code): Path<String>,
) -> ResponseEnvelope {
    let respond = lang.respond(&state.registry);
    match state.registry.get(&code) {
        Some(pack) => respond.succeed(pack.as_ref()),
        None => respond.not_found(),
    }
}

async fn register_language(
    State(state): State<AppState>,
    lang: Lang,
    Path(code): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ResponseEnvelope {
    let respond = lang.respond(&state.registry);

    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if !api_key_matches(state.config.api_key.as_deref(), presented) {
        warn!("Rejected language registration for '{}': bad API key", code);
        return respond.unauthorized();
    }

    let pack: LanguagePack = match serde_json::from_slice(&body) {
        Ok(pack) => pack,
        Err(e) => {
            warn!("Malformed language pack for '{}': {}", code, e);
            return respond.wrong_parameters();
        }
    };

    match state.registry.register(&code, pack) {
        Ok(_) => respond.insert_succeeded(),
        Err(e) => respond.validation_errors(RegistrationErrors {
            errors: vec![e.to_string()],
        }),
    }
}

async fn metrics(State(state): State<AppState>, lang: Lang) -> ResponseEnvelope {
    let report = state.registry.metrics().report();
    lang.respond(&state.registry).succeed(report)
}

async fn not_found(State(state): State<AppState>, lang: Lang) -> ResponseEnvelope {
    lang.respond(&state.registry).not_found()
}

async fn method_not_allowed(State(state): State<AppState>, lang: Lang) -> ResponseEnvelope {
    lang.respond(&state.registry).method_not_allowed()
}

//! Consistent, localized JSON API responses.
//!
//! A shared [`TranslationRegistry`](i18n::TranslationRegistry) maps language
//! codes to language packs. Per-request [`Respond`](respond::Respond) builders
//! resolve a pack and assemble a [`ResponseEnvelope`](respond::ResponseEnvelope)
//! with a transport status code and a JSON document.

pub mod config;
pub mod error;
pub mod i18n;
pub mod respond;
pub mod security;
pub mod server;

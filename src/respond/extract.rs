//! axum extractor for the response language.

use crate::i18n::{LanguageCode, TranslationRegistry};
use crate::respond::builder::Respond;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use std::convert::Infallible;

/// Languages requested through the `Accept-Language` header, most preferred
/// first.
///
/// Never rejects: a missing or unusable header yields an empty list and the
/// registry's fallback language is used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lang(pub Vec<LanguageCode>);

impl Lang {
    /// Start a response builder in the best language the registry has.
    pub fn respond<'a>(&self, registry: &'a TranslationRegistry) -> Respond<'a> {
        match registry.negotiate(&self.0) {
            Some(code) => Respond::with_lang(registry, code.as_str()),
            None => Respond::new(registry),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Lang
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let codes = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(LanguageCode::from_accept_language)
            .unwrap_or_default();
        Ok(Lang(codes))
    }
}

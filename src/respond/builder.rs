//! Response builder.
//!
//! A [`Respond`] is created per request, configured with set-once setters and
//! consumed by exactly one terminal operation, which resolves the language
//! pack once and produces a [`ResponseEnvelope`].
//!
//! ```rust,ignore
//! let registry = TranslationRegistry::bundled();
//!
//! let envelope = Respond::with_lang(&registry, "fa").not_found();
//! assert_eq!(envelope.status_code(), 404);
//! ```

use crate::i18n::{Bucket, Category, LanguagePack, TranslationRegistry};
use crate::respond::envelope::{Body, Document, ResponseEnvelope};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Message used when a pack has no text for the requested key.
pub const MISSING_MESSAGE: &str = "Message not found.";

/// Transport status codes of the terminal operations.
pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const NOT_FOUND: u16 = 404;
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    pub const NOT_ACCEPTABLE: u16 = 406;
    pub const VALIDATION_FAILED: u16 = 420;
    pub const REQUEST_FIELD_NOT_FOUND: u16 = 446;
    pub const DELETE_FAILED: u16 = 447;
    pub const INSERT_FAILED: u16 = 448;
    pub const UPDATE_FAILED: u16 = 449;
}

/// Domain error codes of the terminal operations.
pub mod error_code {
    pub const REQUEST_FIELD_NOT_FOUND: u32 = 1001;
    pub const REQUEST_FIELD_DUPLICATED: u32 = 1004;
    pub const UNAUTHORIZED: u32 = 5401;
    pub const NOT_FOUND: u32 = 5404;
    pub const METHOD_NOT_ALLOWED: u32 = 5405;
    pub const WRONG_PARAMETERS: u32 = 5406;
    pub const VALIDATION_FAILED: u32 = 5420;
}

/// Per-request response builder.
///
/// Status code, status text and error code are set-once: the first value
/// sticks and later setters are no-ops. Terminal operations take `self`, so a
/// builder emits at most one envelope.
#[derive(Debug, Clone)]
#[must_use = "a Respond does nothing until a terminal operation is called"]
pub struct Respond<'a> {
    registry: &'a TranslationRegistry,
    lang: Option<String>,
    status_code: Option<u16>,
    status_text: Option<String>,
    error_code: Option<u32>,
}

impl<'a> Respond<'a> {
    /// Builder in the registry's fallback language.
    pub fn new(registry: &'a TranslationRegistry) -> Self {
        Self {
            registry,
            lang: None,
            status_code: None,
            status_text: None,
            error_code: None,
        }
    }

    /// Builder in the given language.
    pub fn with_lang(registry: &'a TranslationRegistry, lang: impl Into<String>) -> Self {
        Self::new(registry).lang(lang)
    }

    // ==================== Configuration ====================

    /// Select the response language.
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Set the transport status code, unless already set.
    pub fn set_status_code(mut self, code: u16) -> Self {
        if self.status_code.is_none() {
            self.status_code = Some(code);
        }
        self
    }

    /// Set the status text, unless already set.
    pub fn set_status_text(mut self, text: impl Into<String>) -> Self {
        if self.status_text.is_none() {
            self.status_text = Some(text.into());
        }
        self
    }

    /// Set the domain error code, unless already set.
    pub fn set_error_code(mut self, code: u32) -> Self {
        if self.error_code.is_none() {
            self.error_code = Some(code);
        }
        self
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    pub fn error_code(&self) -> Option<u32> {
        self.error_code
    }

    /// Language this builder resolves, falling back to the registry default.
    pub fn language(&self) -> &str {
        self.lang
            .as_deref()
            .unwrap_or_else(|| self.registry.fallback_code().as_str())
    }

    // ==================== Low-level emitters ====================

    /// Emit a result-form envelope with whatever has been set.
    ///
    /// An unset status code means 200; an unset status text is taken from the
    /// pack according to the status code. Result-form documents never carry
    /// the error code.
    pub fn respond_with_result(self, result: impl Serialize) -> ResponseEnvelope {
        let pack = self.resolve();
        self.emit_result(&pack, result)
    }

    /// Emit a message-form envelope with whatever has been set.
    pub fn respond_with_message(self, message: impl Into<String>) -> ResponseEnvelope {
        let pack = self.resolve();
        self.emit_message(&pack, message.into())
    }

    // ==================== Success ====================

    /// 200 with the payload as result.
    pub fn succeed(self, payload: impl Serialize) -> ResponseEnvelope {
        let pack = self.resolve();
        self.set_status_code(status::OK)
            .set_status_text(pack.success.as_str())
            .emit_result(&pack, payload)
    }

    pub fn insert_succeeded(self) -> ResponseEnvelope {
        self.category(status::OK, Bucket::Success, Category::Insert)
    }

    pub fn update_succeeded(self) -> ResponseEnvelope {
        self.category(status::OK, Bucket::Success, Category::Update)
    }

    pub fn delete_succeeded(self) -> ResponseEnvelope {
        self.category(status::OK, Bucket::Success, Category::Delete)
    }

    // ==================== Category failures ====================

    pub fn insert_failed(self) -> ResponseEnvelope {
        self.category(status::INSERT_FAILED, Bucket::Failed, Category::Insert)
    }

    pub fn update_failed(self) -> ResponseEnvelope {
        self.category(status::UPDATE_FAILED, Bucket::Failed, Category::Update)
    }

    pub fn delete_failed(self) -> ResponseEnvelope {
        self.category(status::DELETE_FAILED, Bucket::Failed, Category::Delete)
    }

    // ==================== Errors ====================

    pub fn not_found(self) -> ResponseEnvelope {
        self.error(status::NOT_FOUND, error_code::NOT_FOUND)
    }

    pub fn wrong_parameters(self) -> ResponseEnvelope {
        self.error(status::NOT_ACCEPTABLE, error_code::WRONG_PARAMETERS)
    }

    pub fn method_not_allowed(self) -> ResponseEnvelope {
        self.error(status::METHOD_NOT_ALLOWED, error_code::METHOD_NOT_ALLOWED)
    }

    pub fn request_field_not_found(self) -> ResponseEnvelope {
        self.error(
            status::REQUEST_FIELD_NOT_FOUND,
            error_code::REQUEST_FIELD_NOT_FOUND,
        )
    }

    pub fn request_field_duplicated(self) -> ResponseEnvelope {
        self.error(status::BAD_REQUEST, error_code::REQUEST_FIELD_DUPLICATED)
    }

    pub fn unauthorized(self) -> ResponseEnvelope {
        self.error(status::UNAUTHORIZED, error_code::UNAUTHORIZED)
    }

    /// 420 with the validation errors as result.
    pub fn validation_errors(self, errors: impl Serialize) -> ResponseEnvelope {
        let pack = self.resolve();
        self.set_status_code(status::VALIDATION_FAILED)
            .set_status_text(pack.failed.as_str())
            .set_error_code(error_code::VALIDATION_FAILED)
            .emit_result(&pack, errors)
    }

    /// Generic failure: every named error helper ends up here.
    ///
    /// The message is the pack's entry for `error_code`, or
    /// [`MISSING_MESSAGE`] if the pack has none.
    pub fn error(self, status_code: u16, error_code: u32) -> ResponseEnvelope {
        let pack = self.resolve();
        let message = self
            .registry
            .lookup_error_entry(&pack, error_code)
            .map_or(MISSING_MESSAGE, |entry| entry.message.as_str())
            .to_string();

        self.set_status_code(status_code)
            .set_status_text(pack.failed.as_str())
            .set_error_code(error_code)
            .emit_message(&pack, message)
    }

    // ==================== Internals ====================

    fn category(self, status_code: u16, bucket: Bucket, category: Category) -> ResponseEnvelope {
        let pack = self.resolve();
        let message = self
            .registry
            .lookup_category_message(&pack, bucket, category.as_str())
            .unwrap_or(MISSING_MESSAGE)
            .to_string();

        let text = match bucket {
            Bucket::Success => pack.success.as_str(),
            Bucket::Failed => pack.failed.as_str(),
        };

        self.set_status_code(status_code)
            .set_status_text(text)
            .emit_message(&pack, message)
    }

    fn resolve(&self) -> std::sync::Arc<LanguagePack> {
        self.registry.resolve(self.language())
    }

    fn emit_result(self, pack: &LanguagePack, result: impl Serialize) -> ResponseEnvelope {
        let result = serde_json::to_value(result).unwrap_or_else(|e| {
            warn!("Response payload could not be serialized: {}", e);
            Value::Null
        });
        let (status_code, status) = self.finish(pack);

        ResponseEnvelope {
            status_code,
            document: Document {
                status,
                body: Body::Result { result },
            },
        }
    }

    fn emit_message(self, pack: &LanguagePack, message: String) -> ResponseEnvelope {
        let error = self.error_code;
        let (status_code, status) = self.finish(pack);

        ResponseEnvelope {
            status_code,
            document: Document {
                status,
                body: Body::Message { message, error },
            },
        }
    }

    fn finish(self, pack: &LanguagePack) -> (u16, String) {
        let status_code = self.status_code.unwrap_or(status::OK);
        let status = self
            .status_text
            .unwrap_or_else(|| pack.status_text_for(status_code).to_string());
        (status_code, status)
    }
}

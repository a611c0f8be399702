//! Internationalization (i18n) module for localized response messages.
//!
//! # Architecture
//!
//! - `pack`: One language's catalog (status labels, category messages, error entries)
//! - `language`: Validated `LanguageCode` type
//! - `registry`: Concurrent `TranslationRegistry` with a guaranteed fallback language
//! - `defaults`: Bundled English and Persian packs
//! - `source`: Pack sources (bundled, directory of JSON files)
//! - `metrics`: Per-registry translation counters
//!
//! # Example
//!
//! ```rust,ignore
//! use respond::i18n::{LanguagePack, TranslationRegistry};
//!
//! let registry = TranslationRegistry::bundled();
//! registry.register("de", LanguagePack::new("erfolgreich", "fehlgeschlagen"))?;
//!
//! // Unknown languages resolve to English
//! let pack = registry.resolve("xx");
//! ```

mod defaults;
mod language;
mod metrics;
mod pack;
mod registry;
mod source;

pub use defaults::{english, persian};
pub use language::LanguageCode;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use pack::{Bucket, Category, CategoryMessages, ErrorEntry, LanguagePack, REQUIRED_ERROR_CODES};
pub use registry::TranslationRegistry;
pub use source::{BundledPacks, DirectorySource, LoadedPack, PackSource};

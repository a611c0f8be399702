//! Response assembly.
//!
//! - `builder`: the per-request [`Respond`] builder and its terminal operations
//! - `envelope`: the emitted [`ResponseEnvelope`] and its JSON document
//! - `extract`: [`Lang`] extractor for axum handlers

mod builder;
mod envelope;
mod extract;

pub use builder::{error_code, status, Respond, MISSING_MESSAGE};
pub use envelope::{Body, Document, ResponseEnvelope};
pub use extract::Lang;

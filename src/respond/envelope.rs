//! Response envelope: transport status code plus the JSON document.
//!
//! Two document shapes exist:
//!
//! - result form: `{"status": .., "result": ..}`
//! - message form: `{"status": .., "message": ..}` plus `"error"` when an
//!   error code was set

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io;

/// Document body: either a result payload or a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Result {
        result: Value,
    },
    Message {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<u32>,
    },
}

/// The JSON document sent to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub status: String,

    #[serde(flatten)]
    pub body: Body,
}

/// A finished response, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    #[serde(skip)]
    pub status_code: u16,

    #[serde(flatten)]
    pub document: Document,
}

impl ResponseEnvelope {
    /// The status code as set on the builder.
    ///
    /// Codes outside 100..=999 are not valid HTTP statuses; the axum sink
    /// sends those as 500 while this still reports the original value.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status(&self) -> &str {
        &self.document.status
    }

    /// Error code carried by a message-form envelope.
    pub fn error_code(&self) -> Option<u32> {
        match &self.document.body {
            Body::Message { error, .. } => *error,
            Body::Result { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.document.body {
            Body::Message { message, .. } => Some(message),
            Body::Result { .. } => None,
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.document.body {
            Body::Result { result } => Some(result),
            Body::Message { .. } => None,
        }
    }

    /// The document as a JSON value.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("status".to_string(), Value::from(self.document.status.clone()));

        match &self.document.body {
            Body::Result { result } => {
                map.insert("result".to_string(), result.clone());
            }
            Body::Message { message, error } => {
                map.insert("message".to_string(), Value::from(message.clone()));
                if let Some(code) = error {
                    map.insert("error".to_string(), Value::from(*code));
                }
            }
        }

        Value::Object(map)
    }

    /// Write the document as JSON to any writer.
    ///
    /// Write failures come back as plain I/O errors.
    pub fn write_json<W: io::Write>(&self, writer: W) -> io::Result<()> {
        serde_json::to_writer(writer, &self.document).map_err(io::Error::from)
    }
}

/// Sends the document as JSON with the envelope's status code, or 500 when
/// that code is not a valid HTTP status.
impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.document)).into_response()
    }
}

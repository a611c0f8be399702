//! Language pack: one locale's message catalog.
//!
//! A pack carries the two status labels, the per-category messages for the
//! `success` and `failed` buckets, and a table of error entries keyed by
//! numeric error code. Packs are validated once, when they are registered,
//! and are immutable afterwards.

use crate::error::PackError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error codes every complete pack is expected to define.
pub const REQUIRED_ERROR_CODES: [u32; 6] = [5404, 5405, 5406, 1001, 1004, 5420];

/// Which category table a message is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Success,
    Failed,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Success => "success",
            Bucket::Failed => "failed",
        }
    }
}

/// The write operations that have localized outcome messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Insert,
    Update,
    Delete,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Insert, Category::Update, Category::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Insert => "insert",
            Category::Update => "update",
            Category::Delete => "delete",
        }
    }
}

/// Localized narration for one error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub message: String,
}

impl ErrorEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Category messages split into the `success` and `failed` buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMessages {
    #[serde(default)]
    pub success: BTreeMap<String, String>,

    #[serde(default)]
    pub failed: BTreeMap<String, String>,
}

impl CategoryMessages {
    /// Get the table for a bucket.
    pub fn bucket(&self, bucket: Bucket) -> &BTreeMap<String, String> {
        match bucket {
            Bucket::Success => &self.success,
            Bucket::Failed => &self.failed,
        }
    }
}

/// A complete message catalog for one language.
///
/// The JSON form is:
///
/// ```json
/// {
///   "success": "success",
///   "failed": "failed",
///   "messages": {
///     "success": { "insert": "...", "update": "...", "delete": "..." },
///     "failed":  { "insert": "...", "update": "...", "delete": "..." }
///   },
///   "errors": { "5404": { "message": "..." } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePack {
    /// Status label for successful operations
    pub success: String,

    /// Status label for failed operations
    pub failed: String,

    /// Per-category outcome messages
    #[serde(default)]
    pub messages: CategoryMessages,

    /// Error catalog keyed by domain error code
    #[serde(default)]
    pub errors: BTreeMap<u32, ErrorEntry>,
}

impl LanguagePack {
    /// Create a pack with only its status labels set.
    pub fn new(success: impl Into<String>, failed: impl Into<String>) -> Self {
        Self {
            success: success.into(),
            failed: failed.into(),
            messages: CategoryMessages::default(),
            errors: BTreeMap::new(),
        }
    }

    /// Add (or replace) a category message.
    pub fn with_message(
        mut self,
        bucket: Bucket,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let table = match bucket {
            Bucket::Success => &mut self.messages.success,
            Bucket::Failed => &mut self.messages.failed,
        };
        table.insert(category.into(), message.into());
        self
    }

    /// Add (or replace) an error entry.
    pub fn with_error(mut self, code: u32, message: impl Into<String>) -> Self {
        self.errors.insert(code, ErrorEntry::new(message));
        self
    }

    /// Look up an error entry. `None` is the not-found sentinel.
    pub fn error_entry(&self, code: u32) -> Option<&ErrorEntry> {
        self.errors.get(&code)
    }

    /// Look up a category message. `None` is the not-found sentinel.
    pub fn category_message(&self, bucket: Bucket, category: &str) -> Option<&str> {
        self.messages.bucket(bucket).get(category).map(String::as_str)
    }

    /// Status label for a transport status code: failure text from 400 up.
    pub fn status_text_for(&self, status_code: u16) -> &str {
        if status_code < 400 {
            &self.success
        } else {
            &self.failed
        }
    }

    /// Reject malformed packs.
    ///
    /// Both status labels must be non-empty, and every message that is present
    /// must be non-empty. Absent keys are allowed; see [`missing_required`].
    ///
    /// [`missing_required`]: LanguagePack::missing_required
    pub fn validate(&self) -> Result<(), PackError> {
        if self.success.trim().is_empty() {
            return Err(PackError::EmptyStatusText { field: "success" });
        }
        if self.failed.trim().is_empty() {
            return Err(PackError::EmptyStatusText { field: "failed" });
        }

        for bucket in [Bucket::Success, Bucket::Failed] {
            if let Some((category, _)) = self
                .messages
                .bucket(bucket)
                .iter()
                .find(|(_, message)| message.trim().is_empty())
            {
                return Err(PackError::EmptyCategoryMessage {
                    bucket: bucket.as_str(),
                    category: category.clone(),
                });
            }
        }

        if let Some((code, _)) = self
            .errors
            .iter()
            .find(|(_, entry)| entry.message.trim().is_empty())
        {
            return Err(PackError::EmptyErrorMessage { code: *code });
        }

        Ok(())
    }

    /// List the expected keys this pack does not define.
    ///
    /// Entries look like `"success.insert"` or `"errors.5404"`.
    pub fn missing_required(&self) -> Vec<String> {
        let mut missing = Vec::new();

        for bucket in [Bucket::Success, Bucket::Failed] {
            for category in Category::ALL {
                if self.category_message(bucket, category.as_str()).is_none() {
                    missing.push(format!("{}.{}", bucket.as_str(), category.as_str()));
                }
            }
        }

        for code in REQUIRED_ERROR_CODES {
            if self.error_entry(code).is_none() {
                missing.push(format!("errors.{}", code));
            }
        }

        missing
    }
}

//! Language code type: validated, normalized language tag.

use crate::error::PackError;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Language tag pattern (e.g. "en", "fa", "pt-br"), checked after normalization
static CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn code_regex() -> &'static Regex {
    CODE_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z]{2,3}(-[a-z0-9]{2,8})*$").expect("language code pattern is valid")
    })
}

/// A validated language code.
///
/// Codes are trimmed and lowercased on construction, so `"EN "` and `"en"`
/// name the same language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Code of the canonical fallback language.
    pub const FALLBACK: &'static str = "en";

    /// Parse and normalize a language code.
    ///
    /// # Returns
    /// * `Ok(LanguageCode)` if the code is a well-formed language tag
    /// * `Err(PackError::InvalidLanguageCode)` otherwise
    pub fn parse(code: &str) -> Result<Self, PackError> {
        let normalized = normalize(code);
        if code_regex().is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(PackError::InvalidLanguageCode(code.to_string()))
        }
    }

    /// The canonical fallback language ("en").
    pub fn fallback() -> Self {
        Self(Self::FALLBACK.to_string())
    }

    /// Well-formed languages from an `Accept-Language` value, most preferred
    /// first.
    ///
    /// Tags are ordered by their `q` weight; equal weights keep header order.
    /// Wildcards, malformed tags and tags with `q=0` or an unreadable weight
    /// are dropped. `"en;q=0.1, fa;q=0.9"` yields `[fa, en]`.
    pub fn from_accept_language(header: &str) -> Vec<Self> {
        let mut weighted: Vec<(Self, f32)> = header
            .split(',')
            .filter_map(|part| {
                let mut params = part.split(';');
                let tag = params.next()?.trim();
                if tag.is_empty() || tag == "*" {
                    return None;
                }
                let quality = quality(params)?;
                if quality <= 0.0 {
                    return None;
                }
                Some((Self::parse(tag).ok()?, quality))
            })
            .collect();

        weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
        weighted.into_iter().map(|(code, _)| code).collect()
    }

    /// The primary subtag of a regional code (`fa-ir` gives `fa`).
    pub fn primary(&self) -> Option<Self> {
        self.0
            .split_once('-')
            .map(|(primary, _)| Self(primary.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The `q` parameter of one `Accept-Language` entry, 1.0 when absent.
fn quality<'a>(params: impl Iterator<Item = &'a str>) -> Option<f32> {
    for param in params {
        if let Some((key, value)) = param.split_once('=') {
            if key.trim().eq_ignore_ascii_case("q") {
                return value.trim().parse::<f32>().ok().filter(|q| q.is_finite());
            }
        }
    }
    Some(1.0)
}

/// Trim, lowercase, and turn `_` into `-`.
fn normalize(code: &str) -> String {
    code.trim().to_ascii_lowercase().replace('_', "-")
}

//! Error types produced by message lookup and formatting.
//!
//! A missing key is not an error: lookup APIs return `Ok(None)` so callers
//! can fall through to the next message source. The variants here cover the
//! conditions that must surface immediately instead — a key that resolves to
//! a sub-tree, a backend that rejects a format string, a malformed message
//! table, and the final "nothing anywhere provides this key" conversion.

use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::formatter::FormatterError;

/// Errors that can occur while resolving or formatting messages.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MessageError {
    /// A fully traversed key path landed on a nested bundle rather than a
    /// message format string.
    #[error("value at '{key}' is not a message format string")]
    NotAMessage {
        /// Dot-delimited key whose path resolved to an interior node.
        key: String,
    },

    /// The formatting backend reported a failure.
    #[error(transparent)]
    FormatFailed(Box<FormatFailure>),

    /// A message table offered for bundle construction was not a valid
    /// nested string structure.
    #[error("invalid message table: {reason}")]
    BadMessages {
        /// Why the table was rejected.
        reason: String,
    },

    /// No registered source provides the requested key.
    #[error("no message available for key '{key}'")]
    NoMessage {
        /// Dot-delimited key that every source missed.
        key: String,
    },
}

impl MessageError {
    /// Builds a [`MessageError::NotAMessage`] for `key`.
    #[must_use]
    pub fn not_a_message(key: impl Into<String>) -> Self {
        Self::NotAMessage { key: key.into() }
    }

    /// Builds a [`MessageError::BadMessages`] with the given reason.
    #[must_use]
    pub fn bad_messages(reason: impl Into<String>) -> Self {
        Self::BadMessages {
            reason: reason.into(),
        }
    }

    /// Builds a [`MessageError::NoMessage`] for `key`.
    #[must_use]
    pub fn no_message(key: impl Into<String>) -> Self {
        Self::NoMessage { key: key.into() }
    }

    /// Boxes a [`FormatFailure`] into a [`MessageError::FormatFailed`].
    #[must_use]
    pub fn format_failed(failure: FormatFailure) -> Self {
        Self::FormatFailed(Box::new(failure))
    }
}

/// Diagnostic payload for a failed formatting attempt.
///
/// Captures everything needed to reproduce the failure: the key that located
/// the format string, the locale the formatting ran under, the format string
/// itself, a JSON snapshot of the context, and the backend's own error.
#[derive(Debug, Error)]
#[error(
    "error formatting message '{key}': {source}\nlocale: {locale}\nformat: {format}\ncontext: {context}"
)]
pub struct FormatFailure {
    /// Dot-delimited key that located the format string.
    pub key: String,
    /// Locale the formatting ran under.
    pub locale: LanguageIdentifier,
    /// Format string handed to the backend.
    pub format: String,
    /// JSON snapshot of the formatting context.
    pub context: String,
    /// Backend failure that triggered the error.
    #[source]
    pub source: FormatterError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use unic_langid::langid;

    #[test]
    fn format_failure_display_carries_diagnostics() {
        let failure = FormatFailure {
            key: String::from("greeting.morning"),
            locale: langid!("en-US"),
            format: String::from("hello, {name}"),
            context: String::from(r#"{"name":"world"}"#),
            source: FormatterError {
                code: 1,
                message: String::from("U_UNKNOWN_ERROR"),
            },
        };

        let rendered = MessageError::format_failed(failure).to_string();
        assert!(rendered.contains("greeting.morning"));
        assert!(rendered.contains("(1) U_UNKNOWN_ERROR"));
        assert!(rendered.contains("locale: en-US"));
        assert!(rendered.contains(r#"context: {"name":"world"}"#));
    }

    #[test]
    fn not_found_is_not_represented_here() {
        // The enum deliberately has no NotFound variant; misses travel as
        // Ok(None) through the lookup APIs.
        let err = MessageError::no_message("absent.key");
        assert_eq!(err.to_string(), "no message available for key 'absent.key'");
    }
}

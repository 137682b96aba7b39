//! The formatting backend seam.
//!
//! [`MessageFormatter`] abstracts final substitution so applications can
//! delegate to a locale-aware, ICU-capable engine when one is available.
//! The trait is object-safe: registries store implementations behind
//! `Arc<dyn MessageFormatter>` and thread them through at runtime. When no
//! backend is installed, [`TemplateFormatter`] performs basic substitution
//! and ignores locale and complex format instructions entirely.

use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::context::MessageContext;
use crate::template::Template;

/// Locale-aware formatting backend for resolved message format strings.
pub trait MessageFormatter: Send + Sync {
    /// Formats `format` under `locale`, substituting values from `context`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatterError`] when the backend rejects the format
    /// string or cannot produce output; the registry enriches this into a
    /// [`crate::MessageError::FormatFailed`] with full diagnostics.
    fn format(
        &self,
        locale: &LanguageIdentifier,
        format: &str,
        context: &MessageContext,
    ) -> Result<String, FormatterError>;
}

/// Failure reported by a formatting backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("({code}) {message}")]
pub struct FormatterError {
    /// Backend-specific error code.
    pub code: i32,
    /// Backend-supplied description of the failure.
    pub message: String,
}

/// Built-in backend that emulates basic ICU substitution.
///
/// Uses [`Template`] for plain string substitution; the locale is ignored
/// and sub-format instructions are discarded, by design. This backend never
/// fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateFormatter;

impl TemplateFormatter {
    /// Creates a new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MessageFormatter for TemplateFormatter {
    fn format(
        &self,
        _locale: &LanguageIdentifier,
        format: &str,
        context: &MessageContext,
    ) -> Result<String, FormatterError> {
        Ok(Template::parse(format).render(context))
    }
}

//! Support for types that carry their own fallback message table.
//!
//! A registry is the preferred message source, but a type can embed a last
//! resort table of its own so diagnostics keep working before any bundles
//! are registered. [`MakesMessages::make_message`] chains the two sources
//! and is the one place a missing key becomes a caller-visible error.

use unic_langid::LanguageIdentifier;

use crate::bundle::MessageBundle;
use crate::context::MessageContext;
use crate::error::MessageError;
use crate::registry::MessageRegistry;
use crate::resolver;
use crate::template::Template;

/// Builds messages from a registry with a per-type fallback table.
///
/// Implementations supply [`MakesMessages::messages`], typically backed by a
/// `LazyLock` static, and may override [`MakesMessages::message_group`] to
/// scope registry lookups to a named group.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
/// use parlance::{MakesMessages, MessageBundle, MessageContext, MessageRegistry};
///
/// static MESSAGES: LazyLock<MessageBundle> = LazyLock::new(|| {
///     [("not-ready", "widget is not ready")].into_iter().collect()
/// });
///
/// struct Widget;
///
/// impl MakesMessages for Widget {
///     fn messages() -> &'static MessageBundle {
///         &MESSAGES
///     }
/// }
///
/// let registry = MessageRegistry::new();
/// let message = Widget::make_message(&registry, "not-ready", &MessageContext::new(), None)
///     .expect("the fallback table provides the key");
/// assert_eq!(message, "widget is not ready");
/// ```
pub trait MakesMessages {
    /// The type's own fallback message table.
    fn messages() -> &'static MessageBundle;

    /// Registry group searched before the shared unnamed group.
    #[must_use]
    fn message_group() -> &'static str {
        ""
    }

    /// Builds the message for `key`, preferring registry bundles over the
    /// type's own table.
    ///
    /// Registry hits are formatted with the registry's installed backend;
    /// the type's own table is always rendered with the built-in
    /// substituter, since it exists precisely for when nothing richer is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NoMessage`] when neither the registry nor
    /// the fallback table provides the key. [`MessageError::NotAMessage`]
    /// and [`MessageError::FormatFailed`] from either stage propagate
    /// unchanged.
    fn make_message(
        registry: &MessageRegistry,
        key: &str,
        context: &MessageContext,
        locale: Option<&LanguageIdentifier>,
    ) -> Result<String, MessageError> {
        if let Some(message) =
            registry.format_message_in(Self::message_group(), key, context, locale)?
        {
            return Ok(message);
        }

        match resolver::find_format([Self::messages()], key)? {
            Some(format) => Ok(Template::parse(format).render(context)),
            None => Err(MessageError::no_message(key)),
        }
    }
}

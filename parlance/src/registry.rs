//! The message registry: grouped bundles, a default locale, and the
//! lookup-and-format entry points.
//!
//! A [`MessageRegistry`] is an explicitly constructed, owned value. There is
//! no process-wide instance: applications build one during startup and pass
//! it (or an `Arc`/lock around it) to whatever needs messages. All mutation
//! goes through `&mut self`, so a shared registry is serialised by whatever
//! lock the caller chooses.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use unic_langid::LanguageIdentifier;

use crate::bundle::MessageBundle;
use crate::context::MessageContext;
use crate::error::{FormatFailure, MessageError};
use crate::formatter::{MessageFormatter, TemplateFormatter};
use crate::resolver;

/// Name of the unnamed group, searched after any named group.
///
/// Bundles registered here form the universal fallback scope: they are
/// consulted for every lookup, whichever group the caller asked for.
pub const DEFAULT_GROUP: &str = "";

/// Ordered collections of message bundles plus formatting configuration.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use parlance::{MessageBundle, MessageContext, MessageRegistry};
///
/// # fn main() -> Result<(), parlance::MessageError> {
/// let bundle = MessageBundle::try_from(serde_json::json!({
///     "greeting": { "morning": "good morning, {name}!" },
/// }))?;
///
/// let mut registry = MessageRegistry::new();
/// registry.register(Arc::new(bundle));
///
/// let mut context = MessageContext::new();
/// context.set("name", "dawn");
/// let message = registry.format_message("greeting.morning", &context, None)?;
/// assert_eq!(message.as_deref(), Some("good morning, dawn!"));
/// # Ok(())
/// # }
/// ```
pub struct MessageRegistry {
    groups: HashMap<String, Vec<Arc<MessageBundle>>>,
    default_locale: LanguageIdentifier,
    formatter: Arc<dyn MessageFormatter>,
}

impl Default for MessageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageRegistry {
    /// Creates an empty registry.
    ///
    /// The default locale starts as the `und` root sentinel and the built-in
    /// [`TemplateFormatter`] handles substitution until a locale-aware
    /// backend is installed with [`MessageRegistry::set_formatter`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            default_locale: LanguageIdentifier::default(),
            formatter: Arc::new(TemplateFormatter::new()),
        }
    }

    /// The locale used when a lookup does not supply one.
    #[must_use]
    pub fn default_locale(&self) -> &LanguageIdentifier {
        &self.default_locale
    }

    /// Replaces the default locale.
    pub fn set_default_locale(&mut self, locale: LanguageIdentifier) {
        self.default_locale = locale;
    }

    /// Installs a formatting backend, replacing the built-in substituter.
    pub fn set_formatter(&mut self, formatter: Arc<dyn MessageFormatter>) {
        self.formatter = formatter;
    }

    /// Appends a bundle to the unnamed fallback group.
    pub fn register(&mut self, bundle: Arc<MessageBundle>) {
        self.register_in(DEFAULT_GROUP, bundle);
    }

    /// Appends a bundle to `group`, creating the group if absent.
    ///
    /// Registration order is search priority: within a group, the first
    /// registered bundle that satisfies a key wins.
    pub fn register_in(&mut self, group: &str, bundle: Arc<MessageBundle>) {
        tracing::debug!(group, entries = bundle.len(), "registering message bundle");
        self.groups.entry(group.to_owned()).or_default().push(bundle);
    }

    /// Removes `bundle` from the unnamed fallback group.
    pub fn unregister(&mut self, bundle: &Arc<MessageBundle>) -> bool {
        self.unregister_from(DEFAULT_GROUP, bundle)
    }

    /// Removes the first reference-identical occurrence of `bundle` from
    /// `group`, reporting whether anything was removed.
    ///
    /// Identity means the same allocation: a value-equal clone does not
    /// match. Absent bundles and absent groups are a no-op.
    pub fn unregister_from(&mut self, group: &str, bundle: &Arc<MessageBundle>) -> bool {
        let Some(bundles) = self.groups.get_mut(group) else {
            return false;
        };
        let Some(index) = bundles.iter().position(|entry| Arc::ptr_eq(entry, bundle)) else {
            return false;
        };
        bundles.remove(index);
        true
    }

    /// Finds the first format string for `key` in the unnamed group.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotAMessage`] when the key resolves to a
    /// nested bundle.
    pub fn find_format(&self, key: &str) -> Result<Option<&str>, MessageError> {
        self.find_format_in(DEFAULT_GROUP, key)
    }

    /// Finds the first format string for `key`, searching `group` before
    /// the unnamed group.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotAMessage`] when the key resolves to a
    /// nested bundle.
    pub fn find_format_in(&self, group: &str, key: &str) -> Result<Option<&str>, MessageError> {
        resolver::find_format(self.candidate_roots(group), key)
    }

    /// Looks up and formats the message identified by `key` using the
    /// unnamed group.
    ///
    /// `Ok(None)` means no bundle provides the key; the caller decides
    /// whether that is an error.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotAMessage`] for sub-tree hits and
    /// [`MessageError::FormatFailed`] when the backend rejects the format.
    pub fn format_message(
        &self,
        key: &str,
        context: &MessageContext,
        locale: Option<&LanguageIdentifier>,
    ) -> Result<Option<String>, MessageError> {
        self.format_message_in(DEFAULT_GROUP, key, context, locale)
    }

    /// Looks up and formats the message identified by `key`, searching
    /// `group` before the unnamed group.
    ///
    /// `locale` falls back to the registry default when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::NotAMessage`] for sub-tree hits and
    /// [`MessageError::FormatFailed`] when the backend rejects the format.
    pub fn format_message_in(
        &self,
        group: &str,
        key: &str,
        context: &MessageContext,
        locale: Option<&LanguageIdentifier>,
    ) -> Result<Option<String>, MessageError> {
        let Some(format) = self.find_format_in(group, key)? else {
            tracing::debug!(%key, group, "no registered bundle provides the key");
            return Ok(None);
        };

        let target_locale = locale.unwrap_or(&self.default_locale);
        match self.formatter.format(target_locale, format, context) {
            Ok(rendered) => Ok(Some(rendered)),
            Err(failure) => {
                tracing::warn!(
                    %key,
                    locale = %target_locale,
                    code = failure.code,
                    error = %failure.message,
                    "message formatting failed"
                );
                Err(MessageError::format_failed(FormatFailure {
                    key: key.to_owned(),
                    locale: target_locale.clone(),
                    format: format.to_owned(),
                    context: context.to_json(),
                    source: failure,
                }))
            }
        }
    }

    fn candidate_roots<'a>(&'a self, group: &str) -> impl Iterator<Item = &'a MessageBundle> {
        let named = self
            .groups
            .get(group)
            .filter(|_| !group.is_empty())
            .into_iter()
            .flatten();
        let shared = self.groups.get(DEFAULT_GROUP).into_iter().flatten();
        named.chain(shared).map(|bundle| bundle.as_ref())
    }
}

impl fmt::Debug for MessageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut groups: Vec<(&str, usize)> = self
            .groups
            .iter()
            .map(|(name, bundles)| (name.as_str(), bundles.len()))
            .collect();
        groups.sort_unstable();
        f.debug_struct("MessageRegistry")
            .field("groups", &groups)
            .field("default_locale", &self.default_locale)
            .field("formatter", &"<formatter>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use unic_langid::langid;

    use super::*;

    fn bundle_of(value: serde_json::Value) -> Arc<MessageBundle> {
        Arc::new(MessageBundle::try_from(value).expect("test tables are valid"))
    }

    #[test]
    fn starts_with_the_root_locale_sentinel() {
        let registry = MessageRegistry::new();
        assert_eq!(registry.default_locale(), &langid!("und"));
    }

    #[test]
    fn registration_order_defines_priority() {
        let mut registry = MessageRegistry::new();
        registry.register(bundle_of(json!({ "key": "first" })));
        registry.register(bundle_of(json!({ "key": "second" })));

        let found = registry.find_format("key").expect("no structural error");
        assert_eq!(found, Some("first"));
    }

    #[test]
    fn named_group_is_searched_before_the_default_group() {
        let mut registry = MessageRegistry::new();
        registry.register(bundle_of(json!({ "key": "shared", "only-shared": "everywhere" })));
        registry.register_in("special", bundle_of(json!({ "key": "scoped" })));

        let scoped = registry
            .find_format_in("special", "key")
            .expect("no structural error");
        assert_eq!(scoped, Some("scoped"));

        // The default group still answers for keys the named group misses.
        let fallthrough = registry
            .find_format_in("special", "only-shared")
            .expect("no structural error");
        assert_eq!(fallthrough, Some("everywhere"));
    }

    #[test]
    fn unknown_group_falls_back_to_the_default_group() {
        let mut registry = MessageRegistry::new();
        registry.register(bundle_of(json!({ "key": "shared" })));

        let found = registry
            .find_format_in("never-registered", "key")
            .expect("no structural error");
        assert_eq!(found, Some("shared"));
    }

    #[test]
    fn unregistration_is_by_identity_not_value() {
        let original = bundle_of(json!({ "key": "value" }));
        let lookalike = bundle_of(json!({ "key": "value" }));

        let mut registry = MessageRegistry::new();
        registry.register(Arc::clone(&original));

        assert!(!registry.unregister(&lookalike));
        assert!(registry.unregister(&original));
        assert!(!registry.unregister(&original));
        assert_eq!(registry.find_format("key").expect("no error"), None);
    }

    #[test]
    fn debug_output_elides_bundle_contents() {
        let mut registry = MessageRegistry::new();
        registry.register_in("special", bundle_of(json!({ "key": "value" })));
        let rendered = format!("{registry:?}");
        assert!(rendered.contains("special"));
        assert!(!rendered.contains("value"));
    }
}

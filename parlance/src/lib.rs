//! Hierarchical message bundles with graceful ICU-style fallback formatting.
//!
//! `parlance` resolves a dot-delimited message key to a human-readable
//! string by searching an ordered collection of [`MessageBundle`]s, then
//! substitutes named placeholders in the located format string. It emulates
//! a useful subset of ICU MessageFormat quoting — doubled quotes, escaped
//! brace spans, named placeholders — without evaluating plural, date, or
//! number sub-formats: those are consumed and discarded, and the raw context
//! value is substituted as plain text. Applications with a full ICU engine
//! available plug it in through [`MessageFormatter`]; everyone else gets a
//! rendition that degrades gracefully instead of erroring.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use parlance::{MessageBundle, MessageContext, MessageRegistry, langid};
//!
//! # fn main() -> Result<(), parlance::MessageError> {
//! let bundle = MessageBundle::try_from(serde_json::json!({
//!     "checkout": {
//!         "confirm": "that will set you back about {price, number, currency}",
//!     },
//! }))?;
//!
//! let mut registry = MessageRegistry::new();
//! registry.set_default_locale(langid!("en-US"));
//! registry.register(Arc::new(bundle));
//!
//! let mut context = MessageContext::new();
//! context.set_value("price", &serde_json::json!(20));
//!
//! // The number style is discarded; the raw value is substituted.
//! let message = registry.format_message("checkout.confirm", &context, None)?;
//! assert_eq!(message.as_deref(), Some("that will set you back about 20"));
//! # Ok(())
//! # }
//! ```

mod bundle;
mod context;
mod error;
mod formatter;
mod messages;
mod registry;
mod resolver;
mod template;

pub use bundle::{MessageBundle, MessageNode};
pub use context::MessageContext;
pub use error::{FormatFailure, MessageError};
pub use formatter::{FormatterError, MessageFormatter, TemplateFormatter};
pub use messages::MakesMessages;
pub use registry::{DEFAULT_GROUP, MessageRegistry};
pub use resolver::find_format;
pub use template::{Segment, Template};

pub use unic_langid::{LanguageIdentifier, langid};

//! Hierarchical message bundles.
//!
//! A [`MessageBundle`] maps single path segments to [`MessageNode`]s, each of
//! which is either a message format string or a nested bundle. Bundles are
//! built up front and never mutated afterwards; resolution only reads them.
//!
//! Segment names are normalised at construction *and* at lookup: namespace
//! separator characters (`\` and `:`) become underscores, so keys derived
//! from qualified type names round-trip instead of colliding with the
//! dot-delimited path syntax.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::MessageError;

/// A single entry in a bundle: a message leaf or a nested bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageNode {
    /// A formattable message string.
    Message(String),
    /// A nested bundle of further segments.
    Bundle(MessageBundle),
}

impl From<&str> for MessageNode {
    fn from(format: &str) -> Self {
        Self::Message(format.to_owned())
    }
}

impl From<String> for MessageNode {
    fn from(format: String) -> Self {
        Self::Message(format)
    }
}

impl From<MessageBundle> for MessageNode {
    fn from(bundle: MessageBundle) -> Self {
        Self::Bundle(bundle)
    }
}

/// A hierarchical, read-only tree of message format strings.
///
/// # Examples
///
/// ```
/// use parlance::{MessageBundle, MessageNode};
///
/// let bundle = MessageBundle::try_from(serde_json::json!({
///     "greeting": "hello, {name}",
///     "nested": { "key": "hello again" },
/// }))
/// .expect("tables of strings are valid bundles");
///
/// assert_eq!(bundle.len(), 2);
/// assert!(matches!(bundle.get("greeting"), Some(MessageNode::Message(_))));
/// assert!(matches!(bundle.get("nested"), Some(MessageNode::Bundle(_))));
/// assert!(bundle.get("absent").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBundle {
    entries: HashMap<String, MessageNode>,
}

impl MessageBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a message format string under `segment`.
    pub fn insert_message(&mut self, segment: impl Into<String>, format: impl Into<String>) {
        self.entries
            .insert(normalize_owned(segment.into()), MessageNode::Message(format.into()));
    }

    /// Inserts a nested bundle under `segment`.
    pub fn insert_bundle(&mut self, segment: impl Into<String>, bundle: Self) {
        self.entries
            .insert(normalize_owned(segment.into()), MessageNode::Bundle(bundle));
    }

    /// Looks up the immediate entry for a single (normalised) path segment.
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&MessageNode> {
        self.entries.get(normalize_segment(segment).as_ref())
    }

    /// Number of immediate entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bundle has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the normalised segment names of the immediate entries.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for MessageBundle
where
    K: Into<String>,
    V: Into<MessageNode>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(segment, node)| (normalize_owned(segment.into()), node.into()))
            .collect();
        Self { entries }
    }
}

impl TryFrom<serde_json::Value> for MessageBundle {
    type Error = MessageError;

    fn try_from(value: serde_json::Value) -> Result<Self, MessageError> {
        match value {
            serde_json::Value::Object(map) => from_json_map(map),
            other => Err(MessageError::bad_messages(format!(
                "a message table must be an object, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

impl TryFrom<serde_json::Value> for MessageNode {
    type Error = MessageError;

    fn try_from(value: serde_json::Value) -> Result<Self, MessageError> {
        match value {
            serde_json::Value::String(format) => Ok(Self::Message(format)),
            serde_json::Value::Object(map) => Ok(Self::Bundle(from_json_map(map)?)),
            other => Err(MessageError::bad_messages(format!(
                "message values must be strings or nested tables, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

/// Accepts any self-describing format that produces nested string tables.
///
/// Deserialisation funnels through [`MessageBundle::try_from`], so segment
/// names are normalised and invalid shapes are rejected with the same
/// diagnostics as direct construction.
impl<'de> serde::Deserialize<'de> for MessageBundle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "toml")]
impl TryFrom<toml::Table> for MessageBundle {
    type Error = MessageError;

    fn try_from(table: toml::Table) -> Result<Self, MessageError> {
        let mut entries = HashMap::with_capacity(table.len());
        for (segment, value) in table {
            let node = match value {
                toml::Value::String(format) => MessageNode::Message(format),
                toml::Value::Table(child) => MessageNode::Bundle(Self::try_from(child)?),
                other => {
                    return Err(MessageError::bad_messages(format!(
                        "message values must be strings or nested tables, found {}",
                        other.type_str()
                    )));
                }
            };
            entries.insert(normalize_owned(segment), node);
        }
        Ok(Self { entries })
    }
}

fn from_json_map(
    map: serde_json::Map<String, serde_json::Value>,
) -> Result<MessageBundle, MessageError> {
    let mut entries = HashMap::with_capacity(map.len());
    for (segment, value) in map {
        entries.insert(normalize_owned(segment), MessageNode::try_from(value)?);
    }
    Ok(MessageBundle { entries })
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

const SEPARATORS: [char; 2] = ['\\', ':'];

fn normalize_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains(SEPARATORS) {
        Cow::Owned(segment.replace(SEPARATORS, "_"))
    } else {
        Cow::Borrowed(segment)
    }
}

fn normalize_owned(segment: String) -> String {
    if segment.contains(SEPARATORS) {
        segment.replace(SEPARATORS, "_")
    } else {
        segment
    }
}

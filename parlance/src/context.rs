//! Named values substituted into message templates.
//!
//! The substituter only ever consumes strings; [`MessageContext::set_value`]
//! is the boundary where structured application values are flattened into
//! their one canonical textual rendering.

use std::collections::BTreeMap;

/// Named replacement values for a single formatting operation.
///
/// # Examples
///
/// ```
/// use parlance::MessageContext;
///
/// let mut context = MessageContext::new();
/// context.set("name", "world");
/// context.set_value("price", &serde_json::json!(20));
///
/// assert_eq!(context.get("name"), Some("world"));
/// assert_eq!(context.get("price"), Some("20"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageContext {
    values: BTreeMap<String, String>,
}

impl MessageContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Sets an already-stringified replacement value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Sets a structured value, rendering it to its canonical string form.
    ///
    /// Strings pass through unchanged; numbers and booleans render in their
    /// JSON form; null renders as `null`; arrays and objects render as
    /// compact JSON documents.
    pub fn set_value(&mut self, name: impl Into<String>, value: &serde_json::Value) {
        self.values.insert(name.into(), render_value(value));
    }

    /// Looks up a replacement value by placeholder name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of replacement values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context carries no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Renders the context as a JSON object in sorted key order.
    ///
    /// Used for diagnostics when formatting fails; the output is stable
    /// regardless of insertion order.
    #[must_use]
    pub fn to_json(&self) -> String {
        let map: serde_json::Map<String, serde_json::Value> = self
            .values
            .iter()
            .map(|(name, text)| (name.clone(), serde_json::Value::String(text.clone())))
            .collect();
        serde_json::Value::Object(map).to_string()
    }
}

impl<K, V> FromIterator<(K, V)> for MessageContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { values }
    }
}

/// The one exhaustive stringification of structured values.
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::from("null"),
        serde_json::Value::Bool(flag) => flag.to_string(),
        serde_json::Value::Number(number) => number.to_string(),
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => value.to_string(),
    }
}

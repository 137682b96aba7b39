//! Dot-delimited key resolution over ordered bundle fallbacks.
//!
//! Each candidate root is walked segment by segment. A missing segment means
//! the root simply cannot satisfy the key and the next root is tried; a full
//! path that lands on a nested bundle is a structural mismatch and aborts
//! the whole search, because every later root would be shadowed by the
//! ambiguous hit.

use crate::bundle::{MessageBundle, MessageNode};
use crate::error::MessageError;

/// Finds the first message format string for `key` across `roots`.
///
/// Roots are searched in the order supplied; the first full-path leaf wins
/// and later roots are never consulted. Returns `Ok(None)` when every root
/// misses.
///
/// # Errors
///
/// Returns [`MessageError::NotAMessage`] when a fully traversed path lands
/// on an interior node. This is definitive for the key: resolution does not
/// fall through to the remaining roots.
pub fn find_format<'a, I>(roots: I, key: &str) -> Result<Option<&'a str>, MessageError>
where
    I: IntoIterator<Item = &'a MessageBundle>,
{
    for root in roots {
        if let Some(format) = find_in_root(root, key)? {
            return Ok(Some(format));
        }
        tracing::trace!(%key, "bundle does not provide the key; trying the next root");
    }
    Ok(None)
}

fn find_in_root<'a>(root: &'a MessageBundle, key: &str) -> Result<Option<&'a str>, MessageError> {
    let mut current = root;
    let mut segments = key.split('.').peekable();
    while let Some(segment) = segments.next() {
        let Some(node) = current.get(segment) else {
            return Ok(None);
        };
        match node {
            MessageNode::Message(format) => {
                if segments.peek().is_some() {
                    // More segments but no more bundles: not found here.
                    return Ok(None);
                }
                return Ok(Some(format));
            }
            MessageNode::Bundle(child) => {
                if segments.peek().is_none() {
                    return Err(MessageError::not_a_message(key));
                }
                current = child;
            }
        }
    }
    Ok(None)
}

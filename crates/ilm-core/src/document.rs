//! # Schema-Tolerant Document Views
//!
//! Remote-fetched policy documents omit whole subtrees depending on
//! which lifecycle phases were previously configured. [`DocView`] lets
//! the reconciler navigate such a partially-known tree with chained
//! lookups that never fail: a missing or wrongly-typed step yields the
//! empty view, and a leaf read through any number of missing levels
//! yields `""`.
//!
//! ## Design
//!
//! Decoding stays separate from navigation. Malformed top-level JSON
//! is a hard parse error in `ilm-client`; a missing inner field is an
//! ordinary, expected state of the document and is not an error here.

use serde_json::{Map, Value};

/// A cheap read-only view over an optional JSON object node.
///
/// `DocView` is `Copy` and borrows from the decoded document, so
/// chained access like
/// `view.get_map("policy").get_map("phases").get_str("min_age")`
/// allocates nothing and cannot panic, whatever shape the tree has.
#[derive(Debug, Clone, Copy)]
pub struct DocView<'a> {
    node: Option<&'a Map<String, Value>>,
}

impl<'a> DocView<'a> {
    /// View over `value` if it is a JSON object, else the empty view.
    pub fn root(value: &'a Value) -> Self {
        Self {
            node: value.as_object(),
        }
    }

    /// The empty view. All lookups on it return zero values.
    pub fn empty() -> Self {
        Self { node: None }
    }

    /// Child object at `key`, or the empty view if `key` is absent or
    /// its value is not an object.
    pub fn get_map(&self, key: &str) -> DocView<'a> {
        Self {
            node: self
                .node
                .and_then(|m| m.get(key))
                .and_then(Value::as_object),
        }
    }

    /// String at `key`, or `""` if `key` is absent or its value is not
    /// a string.
    pub fn get_str(&self, key: &str) -> &'a str {
        self.node
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// True when the view holds no object node.
    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }
}

impl Default for DocView<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

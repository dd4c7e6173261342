//! Label sets.
//!
//! Backed by a `BTreeMap` so iteration is always key-sorted: two label sets
//! built in different insertion orders compare, hash, and render identically.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Unordered key/value tags attached to a metric instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, String>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a label. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when every pair of `subset` is present here with the same value.
    /// An empty subset matches everything.
    pub fn matches(&self, subset: &Labels) -> bool {
        subset.iter().all(|(k, v)| self.get(k) == Some(v))
    }

    /// Canonical `{k1="v1",k2="v2"}` rendering (empty string when no labels).
    /// Values are escaped so distinct label sets never collide.
    pub fn canonical(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let mut out = String::with_capacity(self.0.len() * 16);
        out.push('{');
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}=\"{}\"", k, escape_label_value(v));
        }
        out.push('}');
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Labels {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Registry identity: metric name followed by the canonical label rendering.
pub fn identity_key(name: &str, labels: &Labels) -> String {
    let mut key = String::with_capacity(name.len() + labels.len() * 16);
    key.push_str(name);
    key.push_str(&labels.canonical());
    key
}

/// Escape a label value per the text exposition grammar.
pub(crate) fn escape_label_value(v: &str) -> String {
    let mut out = String::with_capacity(v.len());
    for c in v.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_does_not_change_identity() {
        let a = Labels::new().with("method", "GET").with("path", "/a");
        let b = Labels::new().with("path", "/a").with("method", "GET");
        assert_eq!(a, b);
        assert_eq!(identity_key("x", &a), identity_key("x", &b));
        assert_eq!(identity_key("x", &a), "x{method=\"GET\",path=\"/a\"}");
    }

    #[test]
    fn empty_labels_key_is_bare_name() {
        assert_eq!(identity_key("up", &Labels::new()), "up");
    }

    #[test]
    fn escaped_values_keep_keys_distinct() {
        let tricky = Labels::from([("a", "1\",b=\"2")]);
        let plain = Labels::from([("a", "1"), ("b", "2")]);
        assert_ne!(identity_key("m", &tricky), identity_key("m", &plain));
    }

    #[test]
    fn escape_quote_backslash_newline() {
        assert_eq!(escape_label_value("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_label_value("C:\\tmp"), "C:\\\\tmp");
        assert_eq!(escape_label_value("a\nb"), "a\\nb");
    }

    #[test]
    fn subset_matching() {
        let l = Labels::from([("method", "GET"), ("status", "200")]);
        assert!(l.matches(&Labels::new()));
        assert!(l.matches(&Labels::from([("method", "GET")])));
        assert!(!l.matches(&Labels::from([("method", "POST")])));
        assert!(!l.matches(&Labels::from([("env", "prod")])));
    }
}

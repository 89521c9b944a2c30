//! Per-turn execution context
//!
//! A [`Context`] travels with one operator turn. It carries the answer
//! language and a few bookkeeping values (turn number, topic) as loosely
//! typed JSON so that agents can add their own entries without changing
//! this crate.

use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Answer language code (e.g., "pt", "en")
    pub const LANGUAGE: &str = "language";
    /// 1-based index of the current console turn
    pub const TURN: &str = "turn";
    /// Topic the operator asked about
    pub const TOPIC: &str = "topic";
}

/// Context passed to agents during execution
///
/// # Example
///
/// ```
/// use agent_core::Context;
///
/// let ctx = Context::new().with_language("pt").with_turn(3);
///
/// assert_eq!(ctx.language(), Some("pt"));
/// assert_eq!(ctx.turn(), Some(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    data: HashMap<String, serde_json::Value>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the answer language
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.set_language(lang);
        self
    }

    /// Set the turn number
    pub fn with_turn(mut self, turn: u64) -> Self {
        self.insert(keys::TURN, serde_json::json!(turn));
        self
    }

    /// Get the answer language
    pub fn language(&self) -> Option<&str> {
        self.get(keys::LANGUAGE).and_then(|v| v.as_str())
    }

    /// Set the answer language
    pub fn set_language(&mut self, lang: impl Into<String>) {
        self.insert(keys::LANGUAGE, serde_json::json!(lang.into()));
    }

    /// Get the turn number
    pub fn turn(&self) -> Option<u64> {
        self.get(keys::TURN).and_then(serde_json::Value::as_u64)
    }

    /// Get the topic recorded for this turn
    pub fn topic(&self) -> Option<&str> {
        self.get(keys::TOPIC).and_then(|v| v.as_str())
    }

    /// Record the topic for this turn
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.insert(keys::TOPIC, serde_json::json!(topic.into()));
    }

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

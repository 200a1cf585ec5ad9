//! Per-request command context.
//!
//! A `CommandContext` is created for every `execute` or `suggest` request. It
//! carries the sender, the raw input and the values parsed so far, so later
//! components and the handler can read earlier arguments.

use core::any::{Any, type_name};
use core::fmt;
use core::marker::PhantomData;
use std::collections::HashMap;

use crate::error::ContextError;

/// Type-erased parsed value.
pub type ParsedValue = Box<dyn Any + Send + Sync>;

/// Typed key for context values.
///
/// ```rust
/// use nut_dispatch::context::ContextKey;
///
/// const X: ContextKey<i64> = ContextKey::of("x");
/// assert_eq!(X.name(), "x");
/// ```
pub struct ContextKey<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    /// Key for values stored under `name`.
    pub const fn of(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    /// Key name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextKey")
            .field("name", &self.name)
            .field("type", &type_name::<T>())
            .finish()
    }
}

/// Request-scoped key-value store handed to parsers and handlers.
pub struct CommandContext<S> {
    /// Issuing sender
    sender: S,

    /// True while computing suggestions
    suggestion_mode: bool,

    /// Input as received (after namespace stripping)
    raw_input: String,

    /// Values stored by component name
    values: HashMap<String, ParsedValue>,
}

impl<S> CommandContext<S> {
    /// Create an empty context.
    pub fn new(sender: S, suggestion_mode: bool, raw_input: impl Into<String>) -> Self {
        Self {
            sender,
            suggestion_mode,
            raw_input: raw_input.into(),
            values: HashMap::new(),
        }
    }

    /// The issuing sender.
    pub fn sender(&self) -> &S {
        &self.sender
    }

    /// Whether this context belongs to a suggestion request.
    pub fn is_suggestion_mode(&self) -> bool {
        self.suggestion_mode
    }

    /// The input line this context was created for.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn store<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Box::new(value));
    }

    /// Store an already type-erased value.
    pub fn store_value(&mut self, key: impl Into<String>, value: ParsedValue) {
        self.values.insert(key.into(), value);
    }

    /// Value stored under `key`, if present and of type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref::<T>()
    }

    /// Value stored under a typed key.
    pub fn get_key<T: Any>(&self, key: ContextKey<T>) -> Option<&T> {
        self.get(key.name())
    }

    /// Value stored under `key`, or an error describing why it is unavailable.
    pub fn require<T: Any>(&self, key: &str) -> Result<&T, ContextError> {
        let value = self.values.get(key).ok_or_else(|| ContextError::Missing {
            key: key.to_string(),
        })?;

        value
            .downcast_ref::<T>()
            .ok_or_else(|| ContextError::WrongType {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Clone of the value under `key`, or `default`.
    pub fn get_or<T: Any + Clone>(&self, key: &str, default: T) -> T {
        self.get::<T>(key).cloned().unwrap_or(default)
    }

    /// Whether anything is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove and return the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<ParsedValue> {
        self.values.remove(key)
    }

    /// Consume the context, returning the sender.
    pub fn into_sender(self) -> S {
        self.sender
    }
}

impl<S: fmt::Debug> fmt::Debug for CommandContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();

        f.debug_struct("CommandContext")
            .field("sender", &self.sender)
            .field("suggestion_mode", &self.suggestion_mode)
            .field("raw_input", &self.raw_input)
            .field("keys", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_get() {
        let mut ctx = CommandContext::new((), false, "tp 1");
        ctx.store("x", 1_i64);

        assert_eq!(ctx.get::<i64>("x"), Some(&1));
        assert_eq!(ctx.get::<String>("x"), None);
        assert!(ctx.contains("x"));
        assert!(!ctx.contains("y"));
        assert_eq!(ctx.raw_input(), "tp 1");
    }

    #[test]
    fn test_typed_key() {
        const WORLD: ContextKey<String> = ContextKey::of("world");
        let mut ctx = CommandContext::new((), false, "");
        ctx.store(WORLD.name(), String::from("overworld"));

        assert_eq!(ctx.get_key(WORLD).map(String::as_str), Some("overworld"));
    }

    #[test]
    fn test_require_errors() {
        let mut ctx = CommandContext::new((), false, "");
        ctx.store("x", 5_i64);

        assert_eq!(
            ctx.require::<i64>("y"),
            Err(ContextError::Missing { key: "y".into() })
        );
        assert!(matches!(
            ctx.require::<bool>("x"),
            Err(ContextError::WrongType { .. })
        ));
        assert_eq!(ctx.require::<i64>("x"), Ok(&5));
    }

    #[test]
    fn test_get_or_and_remove() {
        let mut ctx = CommandContext::new((), true, "");
        assert!(ctx.is_suggestion_mode());
        assert_eq!(ctx.get_or("amount", 1_i64), 1);

        ctx.store("amount", 64_i64);
        assert_eq!(ctx.get_or("amount", 1_i64), 64);

        assert!(ctx.remove("amount").is_some());
        assert!(!ctx.contains("amount"));
    }
}

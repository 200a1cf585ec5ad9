//! Suggestion values and providers.
//!
//! A [`Suggestion`] is a candidate completion for the partial token at the end
//! of an input. Components may override their parser's suggestions with a
//! [`SuggestionProvider`], which is asynchronous so it can consult external
//! state (online players, world names, ...).

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use crate::context::CommandContext;

/// A candidate completion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Suggestion {
    /// Replacement text for the partial token
    pub text: String,

    /// Optional hover text
    pub tooltip: Option<String>,
}

impl Suggestion {
    /// Suggestion without tooltip.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tooltip: None,
        }
    }

    /// Attach a tooltip.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl From<&str> for Suggestion {
    fn from(text: &str) -> Self {
        Suggestion::new(text)
    }
}

impl From<String> for Suggestion {
    fn from(text: String) -> Self {
        Suggestion::new(text)
    }
}

/// Result of a suggestion request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    /// Byte offset in the original input where the partial token starts
    pub offset: usize,

    /// Ordered, deduplicated suggestions
    pub list: Vec<Suggestion>,
}

impl Suggestions {
    /// Empty result at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self {
            offset,
            list: Vec::new(),
        }
    }

    /// Suggestion texts, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.list.iter().map(|s| s.text.as_str()).collect()
    }

    /// Whether there are no suggestions.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Suggestions in the form hosts send to clients: numeric texts become
    /// integer values.
    pub fn rendered(&self) -> Vec<RenderedSuggestion> {
        self.list
            .iter()
            .map(|s| RenderedSuggestion {
                value: match s.text.parse::<i32>() {
                    Ok(n) => SuggestionValue::Integer(n),
                    Err(_) => SuggestionValue::Text(s.text.clone()),
                },
                tooltip: s.tooltip.clone(),
            })
            .collect()
    }
}

/// Rendered suggestion value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionValue {
    /// Text that parses as a 32-bit integer
    Integer(i32),

    /// Any other text
    Text(String),
}

/// Suggestion ready for a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSuggestion {
    /// Value
    pub value: SuggestionValue,

    /// Optional hover text
    pub tooltip: Option<String>,
}

/// Source of suggestions attached to a component.
///
/// Overrides the component parser's own suggestions. Closures of the form
/// `Fn(&CommandContext<S>, &str) -> Vec<Suggestion>` implement it.
pub trait SuggestionProvider<S>: Send + Sync {
    /// Suggestions for `partial`, the remaining input of this component.
    fn suggestions<'a>(
        &'a self,
        ctx: &'a CommandContext<S>,
        partial: &'a str,
    ) -> BoxFuture<'a, Vec<Suggestion>>;
}

impl<S, F> SuggestionProvider<S> for F
where
    F: Fn(&CommandContext<S>, &str) -> Vec<Suggestion> + Send + Sync,
{
    fn suggestions<'a>(
        &'a self,
        ctx: &'a CommandContext<S>,
        partial: &'a str,
    ) -> BoxFuture<'a, Vec<Suggestion>> {
        future::ready(self(ctx, partial)).boxed()
    }
}

/// Fixed suggestion list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSuggestions {
    values: Vec<Suggestion>,
}

impl StaticSuggestions {
    /// Provider returning `values` in order.
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Suggestion>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S> SuggestionProvider<S> for StaticSuggestions {
    fn suggestions<'a>(
        &'a self,
        _ctx: &'a CommandContext<S>,
        _partial: &'a str,
    ) -> BoxFuture<'a, Vec<Suggestion>> {
        future::ready(self.values.clone()).boxed()
    }
}

/// Shorthand for [`StaticSuggestions::new`].
///
/// ```rust
/// use nut_dispatch::suggestion::suggesting;
///
/// let worlds = suggesting(["overworld", "nether"]);
/// # let _ = worlds;
/// ```
pub fn suggesting<I, T>(values: I) -> StaticSuggestions
where
    I: IntoIterator<Item = T>,
    T: Into<Suggestion>,
{
    StaticSuggestions::new(values)
}

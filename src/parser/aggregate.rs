//! Aggregate parser: several named sub-components combined into one value.

use core::any::{Any, type_name};
use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::ArgumentParser;
use crate::context::{CommandContext, ParsedValue};
use crate::error::ParseError;
use crate::input::CommandInput;
use crate::suggestion::Suggestion;

type Mapper<S> =
    Arc<dyn Fn(&CommandContext<S>, &AggregateValues) -> Result<ParsedValue, ParseError> + Send + Sync>;

/// Values parsed by an aggregate's sub-components, keyed by name.
///
/// Local to one aggregate parse; never stored in the command context.
#[derive(Default)]
pub struct AggregateValues {
    values: HashMap<String, ParsedValue>,
}

impl AggregateValues {
    /// Value of the named sub-component, if present and of type `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.values.get(name)?.downcast_ref::<T>()
    }

    /// Value of the named sub-component, or a parse failure.
    pub fn require<T: Any>(&self, name: &str) -> Result<&T, ParseError> {
        self.get(name).ok_or_else(|| {
            ParseError::Custom(format!("no {} value for '{}'", type_name::<T>(), name))
        })
    }

    /// Number of parsed sub-components.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was parsed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for AggregateValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

/// Parses ordered sub-components, then maps them to a single value.
///
/// A failing sub-component fails the whole aggregate, attributed to the
/// sub-component's name and the offset of its first token.
///
/// ```rust
/// use nut_dispatch::parser::{AggregateParser, IntegerParser};
///
/// let point = AggregateParser::<()>::builder()
///     .with_component("x", IntegerParser::new())
///     .with_component("y", IntegerParser::new())
///     .with_mapper(|_ctx, values| {
///         Ok((*values.require::<i64>("x")?, *values.require::<i64>("y")?))
///     });
/// # let _ = point;
/// ```
pub struct AggregateParser<S> {
    components: Vec<(String, Arc<dyn ArgumentParser<S>>)>,
    mapper: Mapper<S>,
}

impl<S> AggregateParser<S> {
    /// Start building an aggregate.
    pub fn builder() -> AggregateBuilder<S> {
        AggregateBuilder {
            components: Vec::new(),
        }
    }

    /// Sub-component names, in parse order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|(name, _)| name.as_str())
    }
}

impl<S> Clone for AggregateParser<S> {
    fn clone(&self) -> Self {
        Self {
            components: self.components.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

impl<S> fmt::Debug for AggregateParser<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateParser")
            .field("components", &self.component_names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Builder for [`AggregateParser`].
pub struct AggregateBuilder<S> {
    components: Vec<(String, Arc<dyn ArgumentParser<S>>)>,
}

impl<S> AggregateBuilder<S> {
    /// Append a named sub-component.
    pub fn with_component<P>(mut self, name: impl Into<String>, parser: P) -> Self
    where
        P: ArgumentParser<S> + 'static,
    {
        self.components.push((name.into(), Arc::new(parser)));
        self
    }

    /// Finish with the function combining the sub-component values.
    pub fn with_mapper<T, F>(self, mapper: F) -> AggregateParser<S>
    where
        S: 'static,
        T: Any + Send + Sync,
        F: Fn(&CommandContext<S>, &AggregateValues) -> Result<T, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let mapper: Mapper<S> = Arc::new(move |ctx: &CommandContext<S>, values: &AggregateValues| {
            mapper(ctx, values).map(|v| Box::new(v) as ParsedValue)
        });

        AggregateParser {
            components: self.components,
            mapper,
        }
    }
}

impl<S> fmt::Debug for AggregateBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.components.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("AggregateBuilder")
            .field("components", &names)
            .finish()
    }
}

impl<S: Send + Sync> ArgumentParser<S> for AggregateParser<S> {
    fn parse(
        &self,
        ctx: &CommandContext<S>,
        input: &mut CommandInput<'_>,
    ) -> Result<ParsedValue, ParseError> {
        let mut values = AggregateValues::default();

        for (name, parser) in &self.components {
            input.skip_whitespace();
            let offset = input.cursor();
            let value = parser
                .parse(ctx, input)
                .map_err(|e| ParseError::at(name, offset, e))?;
            values.values.insert(name.clone(), value);
        }

        (self.mapper)(ctx, &values)
    }

    fn suggestions<'a>(
        &'a self,
        ctx: &'a CommandContext<S>,
        input: CommandInput<'a>,
    ) -> BoxFuture<'a, Vec<Suggestion>> {
        async move {
            let mut input = input;
            input.skip_whitespace();
            let begin = input.cursor();

            for (_, parser) in &self.components {
                input.skip_whitespace();
                if input.remaining_tokens() <= parser.requested_tokens() {
                    // suggestions replace the whole aggregate input
                    let consumed = input.input().get(begin..input.cursor()).unwrap_or_default();
                    let mut found = parser.suggestions(ctx, input).await;
                    for suggestion in &mut found {
                        suggestion.text.insert_str(0, consumed);
                    }
                    return found;
                }
                if parser.parse(ctx, &mut input).is_err() {
                    return Vec::new();
                }
            }
            Vec::new()
        }
        .boxed()
    }

    fn requested_tokens(&self) -> usize {
        self.components
            .iter()
            .fold(0usize, |acc, (_, p)| acc.saturating_add(p.requested_tokens()))
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self
            .components
            .iter()
            .map(|(name, p)| format!("{}: {}", name, p.describe()))
            .collect();
        format!("aggregate({})", parts.join(", "))
    }
}

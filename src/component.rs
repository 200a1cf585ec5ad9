//! Command components: the named, typed pieces a command is made of.

use core::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::context::CommandContext;
use crate::input::CommandInput;
use crate::parser::{AggregateParser, ArgumentParser, GREEDY, LiteralParser};
use crate::suggestion::{Suggestion, SuggestionProvider};

/// Component kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Fixed keyword with aliases
    Literal,

    /// Variable value parsed by an argument parser
    Argument,

    /// Several sub-values parsed together
    Aggregate,
}

/// One element of a command path.
///
/// Immutable once attached to the tree; cloning shares the parser.
pub struct CommandComponent<S> {
    name: String,
    parser: Arc<dyn ArgumentParser<S>>,
    component_type: ComponentType,
    required: bool,
    default_value: Option<String>,
    /// Literal aliases, primary name first; empty for arguments
    aliases: Vec<String>,
    case_sensitive: bool,
    suggestion_provider: Option<Arc<dyn SuggestionProvider<S>>>,
    description: Option<String>,
}

impl<S: 'static> CommandComponent<S> {
    /// Literal keyword `name` with extra `aliases`.
    pub fn literal<I, A>(name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let name = name.into();
        let mut all = vec![name.clone()];
        for alias in aliases {
            let alias = alias.into();
            if !all.contains(&alias) {
                all.push(alias);
            }
        }

        Self {
            parser: Arc::new(LiteralParser::new(all.clone())),
            name,
            component_type: ComponentType::Literal,
            required: true,
            default_value: None,
            aliases: all,
            case_sensitive: true,
            suggestion_provider: None,
            description: None,
        }
    }

    /// Required argument.
    pub fn required<P>(name: impl Into<String>, parser: P) -> Self
    where
        P: ArgumentParser<S> + 'static,
    {
        Self::argument(name.into(), Arc::new(parser), ComponentType::Argument, true)
    }

    /// Optional argument.
    pub fn optional<P>(name: impl Into<String>, parser: P) -> Self
    where
        P: ArgumentParser<S> + 'static,
    {
        Self::argument(name.into(), Arc::new(parser), ComponentType::Argument, false)
    }

    /// Required aggregate.
    pub fn aggregate(name: impl Into<String>, parser: AggregateParser<S>) -> Self
    where
        S: Send + Sync,
    {
        Self::argument(name.into(), Arc::new(parser), ComponentType::Aggregate, true)
    }

    fn argument(
        name: String,
        parser: Arc<dyn ArgumentParser<S>>,
        component_type: ComponentType,
        required: bool,
    ) -> Self {
        Self {
            name,
            parser,
            component_type,
            required,
            default_value: None,
            aliases: Vec::new(),
            case_sensitive: true,
            suggestion_provider: None,
            description: None,
        }
    }

    /// Raw default parsed when an optional component is omitted.
    pub fn with_default(mut self, raw: impl Into<String>) -> Self {
        self.default_value = Some(raw.into());
        self
    }

    /// Override the parser's suggestions.
    pub fn with_suggestions<P>(mut self, provider: P) -> Self
    where
        P: SuggestionProvider<S> + 'static,
    {
        self.suggestion_provider = Some(Arc::new(provider));
        self
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Apply a literal case policy. Arguments are returned unchanged.
    pub fn with_case_policy(mut self, case_sensitive: bool) -> Self {
        if self.is_literal() && self.case_sensitive != case_sensitive {
            self.case_sensitive = case_sensitive;
            self.parser = Arc::new(
                LiteralParser::new(self.aliases.clone()).with_case_sensitive(case_sensitive),
            );
        }
        self
    }

    /// Literal with the union of both alias sets, primary name kept.
    pub(crate) fn merge_aliases(&self, other: &[String]) -> Self {
        let mut merged = self.clone();
        let mut changed = false;
        for alias in other {
            if !merged.has_alias(alias) {
                merged.aliases.push(alias.clone());
                changed = true;
            }
        }
        if changed {
            merged.parser = Arc::new(
                LiteralParser::new(merged.aliases.clone())
                    .with_case_sensitive(merged.case_sensitive),
            );
        }
        merged
    }
}

impl<S> CommandComponent<S> {
    /// Component name (primary alias for literals).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parser.
    pub fn parser(&self) -> &Arc<dyn ArgumentParser<S>> {
        &self.parser
    }

    /// Kind.
    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// Whether this is a literal.
    pub fn is_literal(&self) -> bool {
        self.component_type == ComponentType::Literal
    }

    /// Whether the component must be present.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Raw default value.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Literal aliases, primary first. Empty for arguments.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Tokens requested by the parser.
    pub fn requested_tokens(&self) -> usize {
        self.parser.requested_tokens()
    }

    /// Whether the parser consumes all remaining input.
    pub fn is_greedy(&self) -> bool {
        self.requested_tokens() == GREEDY
    }

    /// Parser definition used for conflict detection.
    pub fn describe(&self) -> String {
        self.parser.describe()
    }

    /// Whether `token` is one of this literal's aliases under its case policy.
    pub fn has_alias(&self, token: &str) -> bool {
        self.aliases.iter().any(|alias| {
            if self.case_sensitive {
                alias == token
            } else {
                alias.to_lowercase() == token.to_lowercase()
            }
        })
    }

    /// Whether `name` is this component's name; literals apply their case policy.
    pub fn is_named(&self, name: &str) -> bool {
        if self.is_literal() && !self.case_sensitive {
            self.name.to_lowercase() == name.to_lowercase()
        } else {
            self.name == name
        }
    }

    /// Whether a path segment names this component.
    pub fn matches_name(&self, segment: &str) -> bool {
        self.name == segment || (self.is_literal() && self.has_alias(segment))
    }

    /// Syntax form: `name`, `<name>` or `[name]`.
    pub fn syntax(&self) -> String {
        match (self.component_type, self.required) {
            (ComponentType::Literal, _) => self.name.clone(),
            (_, true) => format!("<{}>", self.name),
            (_, false) => format!("[{}]", self.name),
        }
    }

    /// Suggestions for the remaining input: the provider if set, else the parser.
    pub fn suggestions<'a>(
        &'a self,
        ctx: &'a CommandContext<S>,
        input: CommandInput<'a>,
    ) -> BoxFuture<'a, Vec<Suggestion>> {
        match &self.suggestion_provider {
            Some(provider) => provider.suggestions(ctx, input.remaining().trim_start()),
            None => self.parser.suggestions(ctx, input),
        }
    }
}

impl<S> Clone for CommandComponent<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            parser: Arc::clone(&self.parser),
            component_type: self.component_type,
            required: self.required,
            default_value: self.default_value.clone(),
            aliases: self.aliases.clone(),
            case_sensitive: self.case_sensitive,
            suggestion_provider: self.suggestion_provider.clone(),
            description: self.description.clone(),
        }
    }
}

impl<S> fmt::Debug for CommandComponent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandComponent")
            .field("name", &self.name)
            .field("type", &self.component_type)
            .field("required", &self.required)
            .field("parser", &self.parser.describe())
            .field("aliases", &self.aliases)
            .field("default", &self.default_value)
            .finish_non_exhaustive()
    }
}

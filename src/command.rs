//! Registered commands and the command builder.

use core::fmt;
use std::sync::Arc;

use crate::access::{AccessRule, CommandSender, Permission};
use crate::component::CommandComponent;
use crate::context::CommandContext;
use crate::manager::handler::{CommandHandler, FnHandler};
use crate::parser::{AggregateParser, ArgumentParser};

/// A registered command: its component path, handler and access requirement.
///
/// Build with [`Command::builder`].
///
/// ```rust,ignore
/// let tp = Command::builder("tp")
///     .required("world", StringParser::single())
///     .required("x", IntegerParser::new())
///     .permission("cmd.tp")
///     .handler_fn(|ctx| {
///         let x: &i64 = ctx.require("x")?;
///         println!("x = {x}");
///         Ok(())
///     });
/// ```
pub struct Command<S: CommandSender> {
    components: Vec<CommandComponent<S>>,
    handler: Arc<dyn CommandHandler<S>>,
    permission: Permission,
    sender_kind: Option<S::Kind>,
    description: Option<String>,
}

impl<S: CommandSender> Command<S> {
    /// Start building a command rooted at literal `name`.
    pub fn builder(name: impl Into<String>) -> CommandBuilder<S> {
        CommandBuilder {
            components: vec![CommandComponent::literal(name, [] as [String; 0])],
            permission: Permission::Empty,
            sender_kind: None,
            description: None,
        }
    }

    /// Components, root literal first.
    pub fn components(&self) -> &[CommandComponent<S>] {
        &self.components
    }

    /// Handler.
    pub fn handler(&self) -> &Arc<dyn CommandHandler<S>> {
        &self.handler
    }

    /// Required permission.
    pub fn permission(&self) -> &Permission {
        &self.permission
    }

    /// Required sender kind, if any.
    pub fn sender_kind(&self) -> Option<S::Kind> {
        self.sender_kind
    }

    /// Description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The rule this command adds to every node on its path.
    pub fn access_rule(&self) -> AccessRule<S::Kind> {
        AccessRule::new(self.sender_kind, self.permission.clone())
    }

    /// Component names, root first.
    pub fn path(&self) -> Vec<String> {
        self.components.iter().map(|c| c.name().to_string()).collect()
    }

    /// Usage string, e.g. `tp <world> <x> [y]`.
    pub fn syntax(&self) -> String {
        let parts: Vec<String> = self.components.iter().map(|c| c.syntax()).collect();
        parts.join(" ")
    }

    /// Apply a literal case policy to every literal component.
    pub fn with_case_policy(mut self, case_sensitive: bool) -> Self {
        self.components = self
            .components
            .into_iter()
            .map(|c| c.with_case_policy(case_sensitive))
            .collect();
        self
    }
}

impl<S: CommandSender> fmt::Debug for Command<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("syntax", &self.syntax())
            .field("permission", &self.permission)
            .field("sender_kind", &self.sender_kind)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Command`].
pub struct CommandBuilder<S: CommandSender> {
    components: Vec<CommandComponent<S>>,
    permission: Permission,
    sender_kind: Option<S::Kind>,
    description: Option<String>,
}

impl<S: CommandSender> CommandBuilder<S> {
    /// Add an alias to the most recent literal.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if let Some(last) = self.components.iter_mut().rev().find(|c| c.is_literal()) {
            *last = last.merge_aliases(&[alias]);
        }
        self
    }

    /// Append a literal.
    pub fn literal(self, name: impl Into<String>) -> Self {
        self.component(CommandComponent::literal(name, [] as [String; 0]))
    }

    /// Append a literal with aliases.
    pub fn literal_with_aliases<I, A>(self, name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.component(CommandComponent::literal(name, aliases))
    }

    /// Append a required argument.
    pub fn required<P>(self, name: impl Into<String>, parser: P) -> Self
    where
        P: ArgumentParser<S> + 'static,
    {
        self.component(CommandComponent::required(name, parser))
    }

    /// Append an optional argument.
    pub fn optional<P>(self, name: impl Into<String>, parser: P) -> Self
    where
        P: ArgumentParser<S> + 'static,
    {
        self.component(CommandComponent::optional(name, parser))
    }

    /// Append an optional argument with a raw default.
    pub fn optional_with_default<P>(
        self,
        name: impl Into<String>,
        parser: P,
        default: impl Into<String>,
    ) -> Self
    where
        P: ArgumentParser<S> + 'static,
    {
        self.component(CommandComponent::optional(name, parser).with_default(default))
    }

    /// Append an aggregate.
    pub fn aggregate(self, name: impl Into<String>, parser: AggregateParser<S>) -> Self {
        self.component(CommandComponent::aggregate(name, parser))
    }

    /// Append a prepared component.
    pub fn component(mut self, component: CommandComponent<S>) -> Self {
        self.components.push(component);
        self
    }

    /// Required permission.
    pub fn permission(mut self, permission: impl Into<Permission>) -> Self {
        self.permission = permission.into();
        self
    }

    /// Restrict to senders of `kind`.
    pub fn sender_kind(mut self, kind: S::Kind) -> Self {
        self.sender_kind = Some(kind);
        self
    }

    /// Description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Finish with a handler.
    pub fn handler<H>(self, handler: H) -> Command<S>
    where
        H: CommandHandler<S> + 'static,
    {
        Command {
            components: self.components,
            handler: Arc::new(handler),
            permission: self.permission,
            sender_kind: self.sender_kind,
            description: self.description,
        }
    }

    /// Finish with a synchronous closure.
    pub fn handler_fn<F>(self, f: F) -> Command<S>
    where
        F: Fn(&mut CommandContext<S>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handler(FnHandler::new(f))
    }
}

impl<S: CommandSender> fmt::Debug for CommandBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBuilder")
            .field("components", &self.components)
            .field("permission", &self.permission)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::SenderKind;
    use crate::component::ComponentType;
    use crate::parser::IntegerParser;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    enum Kind {
        Player,
    }

    impl SenderKind for Kind {
        fn name(&self) -> &'static str {
            "player"
        }
    }

    #[derive(Debug)]
    struct Sender;

    impl CommandSender for Sender {
        type Kind = Kind;

        fn kinds(&self) -> &[Kind] {
            &[Kind::Player]
        }
    }

    #[test]
    fn test_builder_path_and_syntax() {
        let cmd = Command::<Sender>::builder("give")
            .alias("g")
            .required("amount", IntegerParser::with_range(1, 64))
            .optional_with_default("count", IntegerParser::new(), "1")
            .permission("cmd.give")
            .sender_kind(Kind::Player)
            .handler_fn(|_ctx| Ok(()));

        assert_eq!(cmd.path(), ["give", "amount", "count"]);
        assert_eq!(cmd.syntax(), "give <amount> [count]");
        assert_eq!(cmd.components()[0].aliases(), ["give", "g"]);
        assert_eq!(cmd.components()[1].component_type(), ComponentType::Argument);
        assert_eq!(
            cmd.access_rule(),
            AccessRule::new(Some(Kind::Player), Permission::of("cmd.give"))
        );
    }

    #[test]
    fn test_case_policy_reaches_literals() {
        let cmd = Command::<Sender>::builder("Tp")
            .literal("Here")
            .handler_fn(|_ctx| Ok(()))
            .with_case_policy(false);

        assert!(cmd.components()[0].has_alias("tp"));
        assert!(cmd.components()[1].has_alias("HERE"));
    }
}

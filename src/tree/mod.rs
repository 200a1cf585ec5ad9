//! Command tree data structures.
//!
//! Registered commands are merged into a single tree rooted at a component-less
//! node. Each node owns its children (literals first, then at most one
//! argument) and carries the access rules of every command routed through it.
//!
//! Mutations are transactional: they work on a clone of the root and only
//! replace it once every step succeeded.

use core::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::access::{AccessRule, CommandSender};
use crate::command::Command;
use crate::component::CommandComponent;
use crate::error::RegistrationError;

// Sub-modules
pub mod resolve;
pub mod suggest;

/// Tree node.
pub struct CommandNode<S: CommandSender> {
    /// `None` only for the root
    component: Option<CommandComponent<S>>,

    /// Literals first (registration order), then the argument child
    children: Vec<CommandNode<S>>,

    /// Executor, set iff the path to this node is invocable
    command: Option<Arc<Command<S>>>,

    /// Union of the rules of every command routed through this node
    access: Vec<AccessRule<S::Kind>>,
}

impl<S: CommandSender> CommandNode<S> {
    fn root() -> Self {
        Self {
            component: None,
            children: Vec::new(),
            command: None,
            access: Vec::new(),
        }
    }

    fn with_component(component: CommandComponent<S>) -> Self {
        Self {
            component: Some(component),
            ..Self::root()
        }
    }

    /// Whether this is the tree root.
    pub fn is_root(&self) -> bool {
        self.component.is_none()
    }

    /// Whether this node holds a literal.
    pub fn is_literal(&self) -> bool {
        self.component.as_ref().is_some_and(|c| c.is_literal())
    }

    /// Component name; empty for the root.
    pub fn name(&self) -> &str {
        self.component.as_ref().map_or("", |c| c.name())
    }

    /// Component, `None` for the root.
    pub fn component(&self) -> Option<&CommandComponent<S>> {
        self.component.as_ref()
    }

    /// Children, literals first.
    pub fn children(&self) -> &[CommandNode<S>] {
        &self.children
    }

    /// Executor attached to this node.
    pub fn command(&self) -> Option<&Arc<Command<S>>> {
        self.command.as_ref()
    }

    /// Access rules gating this node.
    pub fn access(&self) -> &[AccessRule<S::Kind>] {
        &self.access
    }

    /// Literal children.
    pub fn literal_children(&self) -> impl Iterator<Item = &CommandNode<S>> {
        self.children.iter().filter(|c| c.is_literal())
    }

    /// The argument child, if any.
    pub fn argument_child(&self) -> Option<&CommandNode<S>> {
        self.children.iter().find(|c| !c.is_literal())
    }

    /// Child named by `segment` (argument name or literal alias).
    pub fn find_child(&self, segment: &str) -> Option<&CommandNode<S>> {
        self.children
            .iter()
            .find(|c| c.component.as_ref().is_some_and(|comp| comp.matches_name(segment)))
    }

    fn has_alias(&self, alias: &str) -> bool {
        self.component
            .as_ref()
            .is_some_and(|c| c.is_literal() && c.has_alias(alias))
    }

    /// Syntax form of this node's component.
    pub fn syntax(&self) -> String {
        self.component.as_ref().map(|c| c.syntax()).unwrap_or_default()
    }
}

impl<S: CommandSender> Clone for CommandNode<S> {
    fn clone(&self) -> Self {
        Self {
            component: self.component.clone(),
            children: self.children.clone(),
            command: self.command.clone(),
            access: self.access.clone(),
        }
    }
}

impl<S: CommandSender> fmt::Debug for CommandNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name())
            .field("executable", &self.command.is_some())
            .field("access", &self.access)
            .field("children", &self.children)
            .finish()
    }
}

/// The command tree.
pub struct CommandTree<S: CommandSender> {
    root: CommandNode<S>,
}

impl<S: CommandSender> Default for CommandTree<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CommandSender> Clone for CommandTree<S> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<S: CommandSender> fmt::Debug for CommandTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTree")
            .field("root", &self.root)
            .finish()
    }
}

impl<S: CommandSender> CommandTree<S> {
    /// Empty tree.
    pub fn new() -> Self {
        Self {
            root: CommandNode::root(),
        }
    }

    /// Root node.
    pub fn root(&self) -> &CommandNode<S> {
        &self.root
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Primary names of the top-level literals, in registration order.
    pub fn root_literals(&self) -> Vec<&str> {
        self.root.literal_children().map(|c| c.name()).collect()
    }

    /// Node at `path` (argument names or literal aliases).
    pub fn find(&self, path: &[&str]) -> Option<&CommandNode<S>> {
        path.iter()
            .try_fold(&self.root, |node, segment| node.find_child(segment))
    }

    /// Every distinct registered command, in tree order.
    pub fn commands(&self) -> Vec<Arc<Command<S>>> {
        let mut out = Vec::new();
        collect_commands(&self.root, &mut out);
        out
    }

    /// Merge `command` into the tree.
    ///
    /// On error the tree is unchanged. Inserting the same command twice is a
    /// no-op.
    pub fn insert(&mut self, command: Arc<Command<S>>) -> Result<(), RegistrationError> {
        validate(&command)?;

        let mut root = self.root.clone();
        let components = command.components();
        let attach_from = components.iter().rposition(|c| c.is_required()).unwrap_or(0);

        let mut node = &mut root;
        let mut path: Vec<&str> = Vec::with_capacity(components.len());
        for (i, component) in components.iter().enumerate() {
            let index = merge_child(node, component, &path)?;
            node = &mut node.children[index];
            path.push(component.name());

            if i >= attach_from {
                attach(node, &command, &path)?;
            }
        }

        rebuild_access(&mut root);
        self.root = root;

        debug!(path = %command.syntax(), "inserted command");
        Ok(())
    }

    /// Detach the subtree at `path` and return the commands it contained.
    ///
    /// Executors of removed commands on ancestors are cleared, and ancestors
    /// left without children or executor are pruned (the root is kept).
    pub fn remove(&mut self, path: &[&str]) -> Result<Vec<Arc<Command<S>>>, RegistrationError> {
        let not_found = || RegistrationError::NotFound {
            path: path.join(" "),
        };

        if path.is_empty() {
            return Err(not_found());
        }

        let mut indices = Vec::with_capacity(path.len());
        let mut node = &self.root;
        for segment in path {
            let index = node
                .children
                .iter()
                .position(|c| c.component.as_ref().is_some_and(|comp| comp.matches_name(segment)))
                .ok_or_else(not_found)?;
            indices.push(index);
            node = &node.children[index];
        }

        let mut root = self.root.clone();
        let (last, ancestors) = indices.split_last().ok_or_else(not_found)?;

        let parent = ancestors
            .iter()
            .fold(&mut root, |node, &i| &mut node.children[i]);
        let detached = parent.children.remove(*last);

        let mut removed = Vec::new();
        collect_commands(&detached, &mut removed);

        clear_and_prune(&mut root, ancestors, &removed);
        rebuild_access(&mut root);
        self.root = root;

        debug!(path = %path.join(" "), removed = removed.len(), "removed subtree");
        Ok(removed)
    }
}

fn validate<S: CommandSender>(command: &Command<S>) -> Result<(), RegistrationError> {
    let invalid = |reason: &str| {
        Err(RegistrationError::InvalidCommand {
            reason: reason.to_string(),
        })
    };

    let components = command.components();
    match components.first() {
        None => return invalid("command has no components"),
        Some(first) if !first.is_literal() => return invalid("first component must be a literal"),
        Some(_) => {}
    }

    let last = components.len() - 1;
    let mut seen_optional = false;
    for (i, component) in components.iter().enumerate() {
        if component.is_greedy() && i != last {
            return invalid(&format!("greedy component '{}' must be last", component.name()));
        }
        if !component.is_required() {
            seen_optional = true;
        } else if seen_optional {
            return invalid(&format!(
                "required component '{}' follows an optional one",
                component.name()
            ));
        }
    }

    Ok(())
}

/// Find or create the child for `component`; returns its index.
fn merge_child<S: CommandSender>(
    parent: &mut CommandNode<S>,
    component: &CommandComponent<S>,
    path: &[&str],
) -> Result<usize, RegistrationError> {
    let ambiguous = |existing: &str, candidate: &str| RegistrationError::Ambiguous {
        path: path.join(" "),
        existing: existing.to_string(),
        candidate: candidate.to_string(),
    };

    if component.is_literal() {
        let same = parent
            .children
            .iter()
            .position(|c| {
                c.component
                    .as_ref()
                    .is_some_and(|existing| existing.is_literal() && existing.is_named(component.name()))
            });

        for alias in component.aliases() {
            let clash = parent
                .children
                .iter()
                .enumerate()
                .find(|(i, c)| Some(*i) != same && c.has_alias(alias));
            if let Some((_, other)) = clash {
                return Err(ambiguous(other.name(), alias));
            }
        }

        return Ok(match same {
            Some(i) => {
                let child = &mut parent.children[i];
                if let Some(existing) = child.component.as_ref() {
                    child.component = Some(existing.merge_aliases(component.aliases()));
                }
                i
            }
            None => {
                let at = parent
                    .children
                    .iter()
                    .position(|c| !c.is_literal())
                    .unwrap_or(parent.children.len());
                parent
                    .children
                    .insert(at, CommandNode::with_component(component.clone()));
                at
            }
        });
    }

    match parent.children.iter().position(|c| !c.is_literal()) {
        Some(i) => {
            let existing = &parent.children[i];
            if existing.name() != component.name() {
                return Err(ambiguous(existing.name(), component.name()));
            }

            let (current, candidate) = (
                existing.component.as_ref().map(|c| c.describe()).unwrap_or_default(),
                component.describe(),
            );
            if current != candidate {
                return Err(RegistrationError::ConflictingParser {
                    path: path.join(" "),
                    component: component.name().to_string(),
                    existing: current,
                    candidate,
                });
            }
            Ok(i)
        }
        None => {
            parent
                .children
                .push(CommandNode::with_component(component.clone()));
            Ok(parent.children.len() - 1)
        }
    }
}

fn attach<S: CommandSender>(
    node: &mut CommandNode<S>,
    command: &Arc<Command<S>>,
    path: &[&str],
) -> Result<(), RegistrationError> {
    match &node.command {
        Some(existing) if Arc::ptr_eq(existing, command) => Ok(()),
        Some(_) => Err(RegistrationError::DuplicateExecutor {
            path: path.join(" "),
        }),
        None => {
            node.command = Some(Arc::clone(command));
            Ok(())
        }
    }
}

/// Recompute every node's rules from its own executor and its children.
fn rebuild_access<S: CommandSender>(node: &mut CommandNode<S>) {
    let mut rules: Vec<AccessRule<S::Kind>> = Vec::new();

    if let Some(command) = &node.command {
        rules.push(command.access_rule());
    }

    for child in &mut node.children {
        rebuild_access(child);
        for rule in &child.access {
            if !rules.contains(rule) {
                rules.push(rule.clone());
            }
        }
    }

    node.access = rules;
}

fn collect_commands<S: CommandSender>(node: &CommandNode<S>, out: &mut Vec<Arc<Command<S>>>) {
    if let Some(command) = &node.command
        && !out.iter().any(|c| Arc::ptr_eq(c, command))
    {
        out.push(Arc::clone(command));
    }

    for child in &node.children {
        collect_commands(child, out);
    }
}

/// Walk `indices` from `node`, clearing executors of `removed` commands and
/// pruning emptied nodes on the way back up.
fn clear_and_prune<S: CommandSender>(
    node: &mut CommandNode<S>,
    indices: &[usize],
    removed: &[Arc<Command<S>>],
) {
    let Some((&first, rest)) = indices.split_first() else {
        return;
    };

    let child = &mut node.children[first];
    if child
        .command
        .as_ref()
        .is_some_and(|c| removed.iter().any(|r| Arc::ptr_eq(r, c)))
    {
        child.command = None;
    }

    clear_and_prune(child, rest, removed);

    if child.children.is_empty() && child.command.is_none() {
        node.children.remove(first);
    }
}

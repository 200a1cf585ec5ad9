//! Input resolution against the command tree.
//!
//! Walks the tree from the root, one component at a time:
//! 1. Input exhausted at a node with an executor: the command is returned and
//!    defaults of the omitted optional components are stored in the context
//! 2. Input exhausted without executor: `MissingArgument` for the first
//!    accessible child, `NoPermission` if none is accessible
//! 3. Otherwise the accessible literal children are tried in order, then the
//!    argument child. Access is checked before any parser runs, and a failing
//!    argument parser ends resolution (no backtracking). If an inaccessible
//!    literal matched the token, the failure is reported as `NoPermission`
//! 4. Nothing matched: `NoPermission` if an inaccessible child would have
//!    matched, `NoSuchCommand` at the root, `InvalidSyntax` elsewhere

use std::sync::Arc;

use tracing::trace;

use crate::access::{CommandSender, PermissionChecker, has_access};
use crate::command::Command;
use crate::context::CommandContext;
use crate::error::CommandError;
use crate::input::CommandInput;
use crate::tree::{CommandNode, CommandTree};

/// Resolve `line` to a command, storing parsed values in `ctx`.
pub fn resolve<S, P>(
    tree: &CommandTree<S>,
    ctx: &mut CommandContext<S>,
    line: &str,
    checker: &P,
) -> Result<Arc<Command<S>>, CommandError>
where
    S: CommandSender,
    P: PermissionChecker<S> + ?Sized,
{
    let mut input = CommandInput::new(line);
    let mut node = tree.root();
    let mut path: Vec<&CommandNode<S>> = Vec::new();

    loop {
        input.skip_whitespace();
        if input.is_empty() {
            return finish(node, &path, ctx, checker, input.cursor());
        }

        let start = input.cursor();
        let token = input.peek_token().unwrap_or_default();
        let mut denied = false;
        let mut next = None;

        for child in node.literal_children() {
            let Some(component) = child.component() else {
                continue;
            };

            if !has_access(ctx.sender(), child, checker) {
                denied |= component.has_alias(token);
                continue;
            }

            let mut probe = input;
            if component.parser().parse(ctx, &mut probe).is_ok() {
                trace!(literal = component.name(), offset = start, "matched literal");
                input = probe;
                next = Some(child);
                break;
            }
        }

        if next.is_none()
            && let Some(child) = node.argument_child()
            && let Some(component) = child.component()
        {
            if has_access(ctx.sender(), child, checker) {
                let value = match component.parser().parse(ctx, &mut input) {
                    Ok(value) => value,
                    Err(_) if denied => {
                        return Err(CommandError::NoPermission {
                            node: token.to_string(),
                        });
                    }
                    Err(e) => return Err(CommandError::argument(component.name(), start, e)),
                };
                trace!(argument = component.name(), offset = start, "parsed argument");
                ctx.store_value(component.name(), value);
                next = Some(child);
            } else {
                denied = true;
            }
        }

        match next {
            Some(child) => {
                path.push(child);
                node = child;
            }
            None if denied => {
                return Err(CommandError::NoPermission {
                    node: token.to_string(),
                });
            }
            None if node.is_root() => {
                return Err(CommandError::NoSuchCommand {
                    name: token.to_string(),
                });
            }
            None => {
                return Err(CommandError::InvalidSyntax {
                    offset: start,
                    token: token.to_string(),
                    syntax: syntax_hint(&path, node, ctx.sender(), checker),
                });
            }
        }
    }
}

fn finish<S, P>(
    node: &CommandNode<S>,
    path: &[&CommandNode<S>],
    ctx: &mut CommandContext<S>,
    checker: &P,
    offset: usize,
) -> Result<Arc<Command<S>>, CommandError>
where
    S: CommandSender,
    P: PermissionChecker<S> + ?Sized,
{
    if let Some(command) = node.command() {
        let rule = command.access_rule();
        if !rule.allows(ctx.sender(), checker) {
            trace!(command = %command.syntax(), %rule, "command rule denied");
            return Err(CommandError::NoPermission {
                node: command.path().join(" "),
            });
        }

        let omitted = command.components().get(path.len()..).unwrap_or_default();
        for component in omitted {
            let Some(raw) = component.default_value() else {
                continue;
            };
            let mut default = CommandInput::new(raw);
            let value = component
                .parser()
                .parse(ctx, &mut default)
                .map_err(|e| CommandError::argument(component.name(), offset, e))?;
            ctx.store_value(component.name(), value);
        }

        trace!(command = %command.syntax(), "resolved");
        return Ok(Arc::clone(command));
    }

    if node.is_root() {
        return Err(CommandError::NoSuchCommand {
            name: String::new(),
        });
    }

    match node
        .children()
        .iter()
        .find(|child| has_access(ctx.sender(), child, checker))
    {
        Some(child) => Err(CommandError::MissingArgument {
            component: child.name().to_string(),
            offset,
        }),
        None => Err(CommandError::NoPermission {
            node: path.iter().map(|n| n.name()).collect::<Vec<_>>().join(" "),
        }),
    }
}

/// `prefix alt1|alt2` where the alternatives are the accessible children.
fn syntax_hint<S, P>(path: &[&CommandNode<S>], node: &CommandNode<S>, sender: &S, checker: &P) -> String
where
    S: CommandSender,
    P: PermissionChecker<S> + ?Sized,
{
    let prefix: Vec<String> = path.iter().map(|n| n.syntax()).collect();
    let alternatives: Vec<String> = node
        .children()
        .iter()
        .filter(|child| has_access(sender, child, checker))
        .map(|child| child.syntax())
        .collect();

    if alternatives.is_empty() {
        prefix.join(" ")
    } else {
        format!("{} {}", prefix.join(" "), alternatives.join("|"))
    }
}

//! Suggestion traversal for partial input.
//!
//! Follows the same path as resolution but never fails: a component that
//! cannot be parsed simply contributes nothing. Uses stub function pattern -
//! module always exists, the walk returns nothing when the `suggestions`
//! feature is disabled.

#![cfg_attr(not(feature = "suggestions"), allow(unused_imports))]

use crate::access::{CommandSender, PermissionChecker};
use crate::context::CommandContext;
use crate::input::CommandInput;
use crate::suggestion::Suggestions;
use crate::tree::CommandTree;

#[cfg(feature = "suggestions")]
use {
    crate::access::has_access,
    crate::suggestion::Suggestion,
    crate::tree::CommandNode,
    futures::FutureExt,
    futures::future::BoxFuture,
    tracing::trace,
};

// ============================================================================
// Feature-enabled implementation
// ============================================================================

/// Raw suggestions for `line`, in traversal order.
///
/// The returned offset is the byte position in `line` where the input handed
/// to the completing component starts; every suggestion replaces the input
/// from there. Without suggestions it is the start of the last token.
///
/// # Feature-enabled behavior
///
/// At each node, with `n` tokens left (a trailing space opens an empty
/// partial token):
/// 1. Every accessible child requesting at least `n` tokens contributes its
///    suggestions for the remaining input
/// 2. Otherwise the first accessible literal that parses is followed, else
///    the argument child is parsed (its value stored) and followed
///
/// Below the root, argument suggestions equal to an alias of a sibling literal
/// are dropped, whether or not that literal is accessible. Suggestions made
/// deeper than the first completing node are prefixed with the input between
/// the two, so they share one offset.
#[cfg(feature = "suggestions")]
pub async fn collect<S: CommandSender>(
    tree: &CommandTree<S>,
    ctx: &mut CommandContext<S>,
    line: &str,
    checker: &dyn PermissionChecker<S>,
) -> Suggestions {
    let mut out = Collector::default();
    walk(tree.root(), ctx, CommandInput::new(line), checker, &mut out).await;

    Suggestions {
        offset: out.start.unwrap_or_else(|| last_token_start(line)),
        list: out.list,
    }
}

/// Suggestions anchored at the first completing cursor.
#[cfg(feature = "suggestions")]
#[derive(Default)]
struct Collector {
    start: Option<usize>,
    list: Vec<Suggestion>,
}

#[cfg(feature = "suggestions")]
impl Collector {
    fn add(&mut self, line: &str, start: usize, found: Vec<Suggestion>) {
        if found.is_empty() {
            return;
        }

        let first = *self.start.get_or_insert(start);
        let prefix = line.get(first..start).unwrap_or_default();
        self.list.extend(found.into_iter().map(|mut s| {
            s.text.insert_str(0, prefix);
            s
        }));
    }
}

#[cfg(feature = "suggestions")]
fn walk<'a, S: CommandSender>(
    node: &'a CommandNode<S>,
    ctx: &'a mut CommandContext<S>,
    input: CommandInput<'a>,
    checker: &'a dyn PermissionChecker<S>,
    out: &'a mut Collector,
) -> BoxFuture<'a, ()> {
    async move {
        let mut input = input;
        input.skip_whitespace();
        let start = input.cursor();
        let remaining = input.remaining_tokens();
        let accessible: Vec<&CommandNode<S>> = node
            .children()
            .iter()
            .filter(|child| has_access(ctx.sender(), child, checker))
            .collect();

        for child in &accessible {
            let Some(component) = child.component() else {
                continue;
            };
            if remaining > component.requested_tokens() {
                continue;
            }

            let mut found = component.suggestions(ctx, input).await;
            if !node.is_root() && !component.is_literal() {
                found.retain(|s| !node.literal_children().any(|lit| lit.has_alias(&s.text)));
            }
            trace!(component = component.name(), count = found.len(), "collected suggestions");
            out.add(input.input(), start, found);
        }

        let follow = accessible.iter().filter(|child| {
            child
                .component()
                .is_some_and(|c| remaining > c.requested_tokens())
        });

        let mut argument = None;
        for child in follow {
            let Some(component) = child.component() else {
                continue;
            };
            if !component.is_literal() {
                argument = Some((*child, component));
                continue;
            }

            let mut probe = input;
            if component.parser().parse(ctx, &mut probe).is_ok() {
                walk(child, ctx, probe, checker, out).await;
                return;
            }
        }

        if let Some((child, component)) = argument {
            let mut probe = input;
            if let Ok(value) = component.parser().parse(ctx, &mut probe) {
                ctx.store_value(component.name(), value);
                walk(child, ctx, probe, checker, out).await;
            }
        }
    }
    .boxed()
}

// ============================================================================
// Feature-disabled stub implementation
// ============================================================================

/// Stub implementation when the `suggestions` feature is disabled.
///
/// Returns no suggestions.
#[cfg(not(feature = "suggestions"))]
pub async fn collect<S: CommandSender>(
    _tree: &CommandTree<S>,
    _ctx: &mut CommandContext<S>,
    line: &str,
    _checker: &dyn PermissionChecker<S>,
) -> Suggestions {
    Suggestions::empty(last_token_start(line))
}

fn last_token_start(line: &str) -> usize {
    line.len() - CommandInput::new(line).last_token().len()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(all(test, feature = "suggestions"))]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::parser::{IntegerParser, StringParser};
    use crate::suggestion::suggesting;
    use crate::tree::tests::{Sender, checker, noop};

    fn tree() -> CommandTree<Sender> {
        let mut tree = CommandTree::new();
        let commands = [
            noop("tp")
                .component(
                    crate::component::CommandComponent::required("world", StringParser::single())
                        .with_suggestions(suggesting(["overworld", "nether"])),
                )
                .required("x", IntegerParser::new())
                .required("y", IntegerParser::new())
                .required("z", IntegerParser::new()),
            noop("give").required("item", StringParser::single()),
            noop("get").permission("cmd.get"),
            noop("kit")
                .component(
                    crate::component::CommandComponent::required("name", StringParser::single())
                        .with_suggestions(suggesting(["basic", "vip", "pvp"])),
                ),
            noop("kit").literal("vip").permission("kit.vip"),
        ];
        for builder in commands {
            tree.insert(Arc::new(builder.handler_fn(|_ctx| Ok(())))).unwrap();
        }
        tree
    }

    async fn texts(sender: Sender, line: &str) -> Vec<String> {
        let tree = tree();
        let mut ctx = CommandContext::new(sender, true, line);
        collect(&tree, &mut ctx, line, &checker)
            .await
            .list
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[tokio::test]
    async fn test_root_lists_accessible_literals() {
        assert_eq!(texts(Sender::player(&[]), "").await, ["tp", "give", "kit"]);
        assert_eq!(
            texts(Sender::player(&["cmd.get"]), "g").await,
            ["tp", "give", "get", "kit"]
        );
    }

    #[tokio::test]
    async fn test_partial_last_token() {
        let got = texts(Sender::player(&[]), "tp overworld 10 6").await;
        assert_eq!(got.first().map(String::as_str), Some("6"));
        assert!(got.contains(&"69".to_string()));
    }

    #[tokio::test]
    async fn test_trailing_space_moves_to_next_component() {
        let got = texts(Sender::player(&[]), "tp overworld 10 6 ").await;
        assert_eq!(got.len(), 10);
        assert_eq!(got.first().map(String::as_str), Some("0"));
    }

    #[tokio::test]
    async fn test_provider_suggestions() {
        assert_eq!(texts(Sender::player(&[]), "tp ").await, ["overworld", "nether"]);
    }

    #[tokio::test]
    async fn test_shadowed_alias_removed_below_root() {
        assert_eq!(texts(Sender::player(&[]), "kit ").await, ["basic", "pvp"]);
        assert_eq!(
            texts(Sender::player(&["kit.vip"]), "kit ").await,
            ["vip", "basic", "pvp"]
        );
    }

    #[tokio::test]
    async fn test_offset_marks_completed_input() {
        let tree = tree();

        let line = "tp overworld 10 6";
        let mut ctx = CommandContext::new(Sender::player(&[]), true, line);
        assert_eq!(collect(&tree, &mut ctx, line, &checker).await.offset, 16);

        let line = "  kit  b";
        let mut ctx = CommandContext::new(Sender::player(&[]), true, line);
        let got = collect(&tree, &mut ctx, line, &checker).await;
        assert_eq!(got.offset, 7);

        let line = "fly ";
        let mut ctx = CommandContext::new(Sender::player(&[]), true, line);
        assert_eq!(collect(&tree, &mut ctx, line, &checker).await.offset, 4);
    }

    #[tokio::test]
    async fn test_unparseable_prefix_yields_nothing() {
        assert!(texts(Sender::player(&[]), "tp overworld ten ").await.is_empty());
        assert!(texts(Sender::player(&[]), "fly ").await.is_empty());
    }
}

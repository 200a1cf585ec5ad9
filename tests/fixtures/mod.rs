//! Test fixtures and utilities for nut-dispatch testing.
//!
//! Provides:
//! - `Kind`: Sender kinds derived with `#[derive(SenderKind)]`
//! - `TestSender`: Sender with a fixed permission set
//! - `HostPlayer`: Host-native sender mapped through `SenderMapper`
//! - `manager()`: Manager preloaded with the test command set

#![allow(dead_code)]

use nut_dispatch::parser::{AggregateParser, IntegerParser, StringParser};
use nut_dispatch::suggestion::suggesting;
use nut_dispatch::{
    Command, CommandComponent, CommandManager, CommandSender, ManagerConfig, Permission,
    SenderKind,
};

// ============================================================================
// Senders
// ============================================================================

/// Sender kinds used in tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, SenderKind)]
pub enum Kind {
    Console,
    Player,
}

/// Engine-side test sender.
#[derive(Debug, Clone)]
pub struct TestSender {
    pub name: String,
    pub kinds: Vec<Kind>,
    pub permissions: Vec<String>,
}

impl TestSender {
    /// Console sender with no permission nodes.
    pub fn console() -> Self {
        Self {
            name: "console".into(),
            kinds: vec![Kind::Console],
            permissions: Vec::new(),
        }
    }

    /// Player holding `permissions`.
    pub fn player(name: &str, permissions: &[&str]) -> Self {
        Self {
            name: name.into(),
            kinds: vec![Kind::Player],
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Player holding every permission used by the test commands.
    pub fn admin() -> Self {
        Self::player("admin", &["cmd.tp", "cmd.op", "kit.vip", "cmd.warp"])
    }
}

impl CommandSender for TestSender {
    type Kind = Kind;

    fn kinds(&self) -> &[Kind] {
        &self.kinds
    }
}

/// Permission checker backed by `TestSender::permissions`.
pub fn checker(sender: &TestSender, permission: &str) -> bool {
    sender.permissions.iter().any(|p| p == permission)
}

/// Host-native sender representation.
#[derive(Debug, Clone)]
pub struct HostPlayer {
    pub id: u32,
    pub operator: bool,
}

/// Maps host players onto test senders.
pub fn map_host(host: &HostPlayer) -> TestSender {
    let permissions: &[&str] = if host.operator { &["cmd.op", "cmd.tp"] } else { &[] };
    TestSender::player(&format!("player-{}", host.id), permissions)
}

// ============================================================================
// Command set
// ============================================================================

/// `(x, y)` aggregate.
pub fn point_parser() -> AggregateParser<TestSender> {
    AggregateParser::builder()
        .with_component("x", IntegerParser::new())
        .with_component("y", IntegerParser::new())
        .with_mapper(|_ctx, values| {
            Ok((*values.require::<i64>("x")?, *values.require::<i64>("y")?))
        })
}

/// Register the shared test command set on `manager`.
pub fn register_all<C: ManagerConfig>(manager: &CommandManager<TestSender, C>) {
    let commands = vec![
        Command::builder("tp")
            .component(
                CommandComponent::required("world", StringParser::single())
                    .with_suggestions(suggesting(["overworld", "nether", "the_end"])),
            )
            .required("x", IntegerParser::new())
            .required("y", IntegerParser::new())
            .required("z", IntegerParser::new())
            .permission("cmd.tp")
            .sender_kind(Kind::Player)
            .handler_fn(|ctx| {
                let world = ctx.require::<String>("world")?.clone();
                ctx.store("teleported", world);
                Ok(())
            }),
        Command::builder("give")
            .required("item", StringParser::single())
            .optional_with_default("amount", IntegerParser::with_range(1, 64), "1")
            .handler_fn(|ctx| {
                let item = ctx.require::<String>("item")?.clone();
                let amount = *ctx.require::<i64>("amount")?;
                ctx.store("given", format!("{amount}x{item}"));
                Ok(())
            }),
        Command::builder("get")
            .required("key", StringParser::single())
            .handler_fn(|_ctx| Ok(())),
        Command::builder("point")
            .aggregate("pos", point_parser())
            .handler_fn(|_ctx| Ok(())),
        Command::builder("op")
            .required("target", StringParser::single())
            .permission("cmd.op")
            .handler_fn(|_ctx| Ok(())),
        Command::builder("kit")
            .component(
                CommandComponent::required("name", StringParser::single())
                    .with_suggestions(suggesting(["basic", "vip", "pvp"])),
            )
            .handler_fn(|_ctx| Ok(())),
        Command::builder("kit")
            .literal("vip")
            .permission("kit.vip")
            .handler_fn(|ctx| {
                ctx.store("vip", true);
                Ok(())
            }),
        Command::builder("say")
            .required("message", StringParser::greedy())
            .handler_fn(|_ctx| Ok(())),
        Command::builder("warp")
            .required("name", StringParser::single())
            .permission(Permission::AnyOf(vec!["cmd.warp".into(), "cmd.tp".into()]))
            .handler_fn(|_ctx| Ok(())),
        Command::builder("stop")
            .sender_kind(Kind::Console)
            .handler_fn(|_ctx| Ok(())),
        Command::builder("fail")
            .handler_fn(|_ctx| anyhow::bail!("boom")),
    ];

    for command in commands {
        manager.command(command).expect("test command registers");
    }
}

/// Manager with the default configuration and the test command set.
pub fn manager() -> CommandManager<TestSender> {
    let manager = CommandManager::new(checker);
    register_all(&manager);
    manager
}

//! Integration tests for the access filter.
//!
//! Validates fail-closed behavior for sender kinds and permission nodes during
//! both execution and suggestion.

#[path = "fixtures/mod.rs"]
mod fixtures;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fixtures::{Kind, TestSender, checker, manager};
use nut_dispatch::parser::IntegerParser;
use nut_dispatch::{AllowAll, Command, CommandError, CommandManager, Permission, SenderKind};

#[test]
fn test_derived_sender_kind_names() {
    assert_eq!(Kind::Console.name(), "console");
    assert_eq!(Kind::Player.name(), "player");
}

#[test]
fn test_command_rule_display() {
    let tree = manager().snapshot();
    let tp = tree.find(&["tp"]).unwrap();
    let rule = tp.command().map(|c| c.access_rule().to_string());
    assert_eq!(rule, None);

    let z = tree.find(&["tp", "world", "x", "y", "z"]).unwrap();
    let rule = z.command().map(|c| c.access_rule().to_string());
    assert_eq!(rule.as_deref(), Some("player with cmd.tp"));

    let stop = tree.find(&["stop"]).unwrap();
    assert_eq!(stop.access()[0].to_string(), "console");
}

#[tokio::test]
async fn test_missing_permission_is_denied() {
    let err = manager()
        .execute(TestSender::player("guest", &[]), "op someone")
        .await
        .unwrap_err();
    assert!(matches!(err, CommandError::NoPermission { ref node } if node == "op"));
}

#[tokio::test]
async fn test_wrong_sender_kind_is_denied() {
    let manager = manager();

    // holds the permission node but is not a player
    let mut console = TestSender::console();
    console.permissions.push("cmd.tp".into());
    let err = manager
        .execute(console, "tp overworld 1 2 3")
        .await
        .unwrap_err();
    assert!(matches!(err, CommandError::NoPermission { .. }));

    let err = manager
        .execute(TestSender::admin(), "stop")
        .await
        .unwrap_err();
    assert!(matches!(err, CommandError::NoPermission { .. }));
    assert!(manager.execute(TestSender::console(), "stop").await.is_ok());
}

#[tokio::test]
async fn test_compound_permission() {
    let manager = manager();

    let warp = TestSender::player("w", &["cmd.warp"]);
    let tp = TestSender::player("t", &["cmd.tp"]);
    let none = TestSender::player("n", &[]);

    assert!(manager.execute(warp, "warp home").await.is_ok());
    assert!(manager.execute(tp, "warp home").await.is_ok());
    assert!(manager.execute(none, "warp home").await.is_err());
}

#[tokio::test]
async fn test_denied_literal_falls_back_to_argument() {
    let result = manager()
        .execute(TestSender::player("guest", &[]), "kit vip")
        .await
        .unwrap();

    assert_eq!(
        result.context.get::<String>("name").map(String::as_str),
        Some("vip")
    );
    assert!(!result.context.contains("vip"));

    let result = manager()
        .execute(TestSender::admin(), "kit vip")
        .await
        .unwrap();
    assert_eq!(result.context.get::<bool>("vip"), Some(&true));
}

#[tokio::test]
async fn test_denied_literal_reported_when_argument_rejects_token() {
    let manager: CommandManager<TestSender> = CommandManager::new(checker);
    manager
        .command(
            Command::builder("tp")
                .required("x", IntegerParser::new())
                .handler_fn(|_ctx| Ok(())),
        )
        .unwrap();
    manager
        .command(
            Command::builder("tp")
                .literal("here")
                .permission("cmd.here")
                .handler_fn(|_ctx| Ok(())),
        )
        .unwrap();

    let guest = TestSender::player("guest", &[]);
    let err = manager.execute(guest.clone(), "tp here").await.unwrap_err();
    assert!(matches!(err, CommandError::NoPermission { ref node } if node == "here"));

    // tokens no literal claims still report the parse failure
    let err = manager.execute(guest.clone(), "tp there").await.unwrap_err();
    assert!(matches!(err, CommandError::ArgumentParse { ref component, .. } if component == "x"));

    assert!(manager.execute(guest, "tp 4").await.is_ok());
    let allowed = TestSender::player("mod", &["cmd.here"]);
    assert!(manager.execute(allowed, "tp here").await.is_ok());
}

#[tokio::test]
async fn test_empty_permission_never_consults_checker() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let manager: CommandManager<TestSender> =
        CommandManager::new(move |_: &TestSender, _: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            false
        });

    manager
        .command(Command::builder("list").handler_fn(|_ctx| Ok(())))
        .unwrap();
    manager
        .command(
            Command::builder("ban")
                .permission(Permission::of("cmd.ban"))
                .handler_fn(|_ctx| Ok(())),
        )
        .unwrap();

    assert!(manager.execute(TestSender::console(), "list").await.is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(manager.execute(TestSender::console(), "ban").await.is_err());
    assert!(calls.load(Ordering::SeqCst) > 0);
}

#[tokio::test]
async fn test_intermediate_node_gates_descendants() {
    let manager: CommandManager<TestSender> = CommandManager::new(AllowAll);
    manager
        .command(
            Command::builder("admin")
                .literal("reload")
                .sender_kind(Kind::Console)
                .handler_fn(|_ctx| Ok(())),
        )
        .unwrap();

    let err = manager
        .execute(TestSender::player("p", &[]), "admin reload")
        .await
        .unwrap_err();
    assert!(matches!(err, CommandError::NoPermission { ref node } if node == "admin"));
}

//! # nut-dispatch
//!
//! Command definition and dispatch engine for text commands.
//!
//! **Key features:**
//! - **Command tree** - Commands are merged into one tree of literal and argument nodes
//! - **Typed arguments** - Parsers turn tokens into typed values stored in a per-request context
//! - **Suggestions** - Asynchronous completion of partial input, filtered by permission
//! - **Access control** - Sender kinds and permission nodes, fail-closed
//! - **Snapshots** - Requests run on an immutable tree snapshot; registration never blocks them
//!
//! ## Example
//!
//! ```rust
//! use nut_dispatch::{AllowAll, Command, CommandManager, CommandSender, SenderKind};
//! use nut_dispatch::parser::IntegerParser;
//!
//! #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, SenderKind)]
//! enum Kind {
//!     Console,
//! }
//!
//! #[derive(Debug)]
//! struct Console;
//!
//! impl CommandSender for Console {
//!     type Kind = Kind;
//!
//!     fn kinds(&self) -> &[Kind] {
//!         &[Kind::Console]
//!     }
//! }
//!
//! let manager: CommandManager<Console> = CommandManager::new(AllowAll);
//! manager
//!     .command(
//!         Command::builder("double")
//!             .required("x", IntegerParser::new())
//!             .handler_fn(|ctx| {
//!                 let x = *ctx.require::<i64>("x")?;
//!                 ctx.store("result", x * 2);
//!                 Ok(())
//!             }),
//!     )
//!     .unwrap();
//!
//! let result = futures::executor::block_on(manager.execute(Console, "double 21")).unwrap();
//! assert_eq!(result.context.get::<i64>("result"), Some(&42));
//! ```
//!
//! ## Optional Features
//!
//! - `suggestions` (default) - Suggestion engine; when disabled `suggest` returns nothing
//!
//! The library provides a `#[derive(SenderKind)]` macro that's always available.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Re-export derive macro (always available)
pub use nut_dispatch_macros::SenderKind;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod access;
pub mod command;
pub mod component;
pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod manager;
pub mod parser;
pub mod suggestion;
pub mod tree;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Access control
pub use access::{AccessRule, AllowAll, CommandSender, Permission, PermissionChecker, SenderKind};

// Commands
pub use command::{Command, CommandBuilder};
pub use component::{CommandComponent, ComponentType};

// Configuration
pub use config::{DefaultConfig, ManagerConfig, NamespacedConfig};

// Request state
pub use context::{CommandContext, ContextKey};

// Error types
pub use error::{CommandError, ContextError, ParseError, RegistrationError};

// Manager
pub use manager::{
    CommandHandler, CommandManager, CommandResult, IdentityMapper, NoopRegistration,
    RegistrationHandler, SenderMapper,
};

// Suggestions
pub use suggestion::{Suggestion, SuggestionProvider, Suggestions};

// Tree
pub use tree::{CommandNode, CommandTree};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

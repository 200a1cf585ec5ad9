//! Command manager: registration and the `execute` / `suggest` entry points.
//!
//! The manager owns the current tree snapshot behind a `RwLock<Arc<_>>`.
//! Requests clone the `Arc` and release the lock at once, so they never block
//! registrations and always observe a consistent tree. Mutations serialise on
//! a separate mutex, build a new tree from a clone, and swap it in only after
//! the host's [`RegistrationHandler`] accepted the change.

use core::fmt;
use core::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::access::{CommandSender, PermissionChecker};
use crate::command::Command;
use crate::config::{DefaultConfig, ManagerConfig};
use crate::context::CommandContext;
use crate::error::{CommandError, RegistrationError};
use crate::input::strip_namespace;
use crate::suggestion::{Suggestion, Suggestions};
use crate::tree::{CommandTree, resolve, suggest};

// Sub-modules
pub mod handler;
pub mod mapper;
pub mod registration;

// Re-export key types
pub use handler::{CommandHandler, FnHandler};
pub use mapper::{IdentityMapper, SenderMapper};
pub use registration::{NoopRegistration, RegistrationHandler};

/// Outcome of a successful `execute`.
pub struct CommandResult<S: CommandSender> {
    /// Context after the handler ran
    pub context: CommandContext<S>,

    /// The executed command
    pub command: Arc<Command<S>>,
}

impl<S: CommandSender> fmt::Debug for CommandResult<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandResult")
            .field("context", &self.context)
            .field("command", &self.command)
            .finish()
    }
}

/// Registration and dispatch front-end.
///
/// Generic over `C: ManagerConfig` for input limits and matching policy.
pub struct CommandManager<S: CommandSender, C: ManagerConfig = DefaultConfig> {
    /// Current snapshot
    tree: RwLock<Arc<CommandTree<S>>>,

    /// Serialises mutations
    registration_lock: Mutex<()>,

    permission_checker: Arc<dyn PermissionChecker<S>>,
    registration_handler: Arc<dyn RegistrationHandler<S>>,

    _config: PhantomData<fn() -> C>,
}

impl<S: CommandSender, C: ManagerConfig> fmt::Debug for CommandManager<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandManager")
            .field("tree", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl<S: CommandSender, C: ManagerConfig> CommandManager<S, C> {
    /// Create a manager with an empty tree.
    pub fn new<P>(permission_checker: P) -> Self
    where
        P: PermissionChecker<S> + 'static,
    {
        Self {
            tree: RwLock::new(Arc::new(CommandTree::new())),
            registration_lock: Mutex::new(()),
            permission_checker: Arc::new(permission_checker),
            registration_handler: Arc::new(NoopRegistration),
            _config: PhantomData,
        }
    }

    /// Replace the registration handler.
    pub fn with_registration_handler<R>(mut self, handler: R) -> Self
    where
        R: RegistrationHandler<S> + 'static,
    {
        self.registration_handler = Arc::new(handler);
        self
    }

    /// Current tree snapshot.
    pub fn snapshot(&self) -> Arc<CommandTree<S>> {
        let guard = self.tree.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    fn publish(&self, tree: CommandTree<S>) {
        let mut guard = self.tree.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(tree);
    }

    /// Register a command.
    ///
    /// On error the visible tree is unchanged.
    pub fn command(&self, command: Command<S>) -> Result<Arc<Command<S>>, RegistrationError> {
        let command = Arc::new(command.with_case_policy(C::CASE_SENSITIVE_LITERALS));
        let _lock = self
            .registration_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut tree = CommandTree::clone(&self.snapshot());
        tree.insert(Arc::clone(&command))?;

        if let Err(e) = self.registration_handler.on_insert(&command) {
            warn!(command = %command.syntax(), error = %e, "registration rejected");
            return Err(RegistrationError::Rejected(e));
        }

        self.publish(tree);
        debug!(command = %command.syntax(), access = %command.access_rule(), "registered");
        Ok(command)
    }

    /// Remove the subtree at `path`, returning the commands it held.
    pub fn remove(&self, path: &[&str]) -> Result<Vec<Arc<Command<S>>>, RegistrationError> {
        let _lock = self
            .registration_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut tree = CommandTree::clone(&self.snapshot());
        let removed = tree.remove(path)?;

        let owned: Vec<String> = path.iter().map(|s| s.to_string()).collect();
        if let Err(e) = self.registration_handler.on_remove(&owned) {
            warn!(path = %owned.join(" "), error = %e, "removal rejected");
            return Err(RegistrationError::Rejected(e));
        }

        self.publish(tree);
        debug!(path = %owned.join(" "), removed = removed.len(), "unregistered");
        Ok(removed)
    }

    /// Apply the namespace policy; returns the line and the bytes stripped.
    fn preprocess<'a>(&self, input: &'a str) -> (&'a str, usize) {
        match C::NAMESPACE_DELIMITER {
            Some(delimiter) => strip_namespace(input, delimiter),
            None => (input, 0),
        }
    }

    /// Resolve and run `input` on behalf of `sender`.
    pub async fn execute(&self, sender: S, input: &str) -> Result<CommandResult<S>, CommandError> {
        if input.len() > C::MAX_INPUT {
            return Err(CommandError::InputTooLong {
                len: input.len(),
                max: C::MAX_INPUT,
            });
        }

        let (line, trimmed) = self.preprocess(input);
        let tree = self.snapshot();
        let mut context = CommandContext::new(sender, false, line);

        let command = match resolve::resolve(&tree, &mut context, line, &*self.permission_checker) {
            Ok(command) => command,
            Err(e) => {
                debug!(input = line, error = %e, "dispatch failed");
                return Err(e.shifted(trimmed));
            }
        };

        command
            .handler()
            .execute(&mut context)
            .await
            .map_err(CommandError::Execution)?;

        debug!(command = %command.syntax(), "executed");
        Ok(CommandResult { context, command })
    }

    /// Completions for the partial `input`.
    ///
    /// Never fails; input over the length limit yields no suggestions.
    pub async fn suggest(&self, sender: S, input: &str) -> Suggestions {
        if input.len() > C::MAX_INPUT {
            return Suggestions::empty(input.len());
        }

        let (line, trimmed) = self.preprocess(input);
        let tree = self.snapshot();
        let mut context = CommandContext::new(sender, true, line);
        let raw = suggest::collect(&tree, &mut context, line, &*self.permission_checker).await;
        let partial = line.get(raw.offset..).unwrap_or_default();

        Suggestions {
            offset: trimmed + raw.offset,
            list: postprocess::<C>(raw.list, partial),
        }
    }

    /// [`execute`](Self::execute) for a host-native sender.
    pub async fn execute_as<N, M>(
        &self,
        native: &N,
        mapper: &M,
        input: &str,
    ) -> Result<CommandResult<S>, CommandError>
    where
        M: SenderMapper<N, S> + ?Sized,
    {
        self.execute(mapper.map(native), input).await
    }

    /// [`suggest`](Self::suggest) for a host-native sender.
    pub async fn suggest_as<N, M>(&self, native: &N, mapper: &M, input: &str) -> Suggestions
    where
        M: SenderMapper<N, S> + ?Sized,
    {
        self.suggest(mapper.map(native), input).await
    }
}

/// Prefix-filter, deduplicate (first occurrence wins) and truncate.
fn postprocess<C: ManagerConfig>(raw: Vec<Suggestion>, partial: &str) -> Vec<Suggestion> {
    let partial = partial.to_lowercase();
    let mut list: Vec<Suggestion> = Vec::with_capacity(raw.len().min(C::MAX_SUGGESTIONS));

    for suggestion in raw {
        if list.len() >= C::MAX_SUGGESTIONS {
            break;
        }
        if C::FILTER_SUGGESTIONS && !suggestion.text.to_lowercase().starts_with(&partial) {
            continue;
        }
        if list.iter().any(|s| s.text == suggestion.text) {
            continue;
        }
        list.push(suggestion);
    }

    list
}

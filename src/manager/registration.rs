//! Host callback invoked on tree shape changes.

use crate::access::CommandSender;
use crate::command::Command;

/// Observes every accepted tree mutation before it becomes visible.
///
/// Returning an error rolls the mutation back; the caller then receives
/// [`RegistrationError::Rejected`](crate::error::RegistrationError::Rejected).
pub trait RegistrationHandler<S: CommandSender>: Send + Sync {
    /// A command is about to be inserted.
    fn on_insert(&self, command: &Command<S>) -> anyhow::Result<()>;

    /// The subtree at `path` is about to be removed.
    fn on_remove(&self, path: &[String]) -> anyhow::Result<()>;
}

/// Handler accepting every change.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct NoopRegistration;

impl<S: CommandSender> RegistrationHandler<S> for NoopRegistration {
    fn on_insert(&self, _command: &Command<S>) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_remove(&self, _path: &[String]) -> anyhow::Result<()> {
        Ok(())
    }
}

//! Command handler trait for executing commands.
//!
//! The tree stores only structure; execution is delegated to the handler
//! attached to each command.

use core::fmt;

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use crate::context::CommandContext;

/// Command execution handler.
///
/// Receives the context populated by the resolution engine. The returned
/// future is `Send`, so handlers may run on a multi-threaded executor.
pub trait CommandHandler<S>: Send + Sync {
    /// Execute the command.
    fn execute<'a>(&'a self, ctx: &'a mut CommandContext<S>) -> BoxFuture<'a, anyhow::Result<()>>;
}

/// Handler wrapping a synchronous closure.
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F> {
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

impl<S, F> CommandHandler<S> for FnHandler<F>
where
    F: Fn(&mut CommandContext<S>) -> anyhow::Result<()> + Send + Sync,
{
    fn execute<'a>(&'a self, ctx: &'a mut CommandContext<S>) -> BoxFuture<'a, anyhow::Result<()>> {
        future::ready((self.f)(ctx)).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubler;

    impl CommandHandler<()> for Doubler {
        fn execute<'a>(
            &'a self,
            ctx: &'a mut CommandContext<()>,
        ) -> BoxFuture<'a, anyhow::Result<()>> {
            async move {
                let x = *ctx.require::<i64>("x")?;
                ctx.store("result", x * 2);
                Ok::<_, anyhow::Error>(())
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn test_fn_handler() {
        let handler = FnHandler::new(|ctx: &mut CommandContext<()>| -> anyhow::Result<()> {
            ctx.store("ran", true);
            Ok(())
        });
        let mut ctx = CommandContext::new((), false, "x");
        handler.execute(&mut ctx).await.unwrap();
        assert_eq!(ctx.get::<bool>("ran"), Some(&true));
    }

    #[tokio::test]
    async fn test_async_handler() {
        let mut ctx = CommandContext::new((), false, "x 2");
        ctx.store("x", 2_i64);
        Doubler.execute(&mut ctx).await.unwrap();
        assert_eq!(ctx.get::<i64>("result"), Some(&4));

        let mut empty = CommandContext::new((), false, "x");
        assert!(Doubler.execute(&mut empty).await.is_err());
    }

    #[tokio::test]
    async fn test_fn_handler_error() {
        let handler = FnHandler::new(|_: &mut CommandContext<()>| -> anyhow::Result<()> {
            anyhow::bail!("nope")
        });
        let mut ctx = CommandContext::new((), false, "");
        let err = handler.execute(&mut ctx).await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}

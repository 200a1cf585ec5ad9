//! Argument parsers.
//!
//! A parser turns the tokens at the cursor into a typed value and can propose
//! completions for a partial input. Built-in variants:
//! - [`LiteralParser`] - one of a fixed set of aliases
//! - [`IntegerParser`] - bounded `i64`
//! - [`BooleanParser`] - `true`/`false` (optionally `yes/no/on/off`)
//! - [`StringParser`] - single word, quoted phrase or the rest of the line
//! - [`AggregateParser`] - named sub-components combined by a mapper

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use crate::context::{CommandContext, ParsedValue};
use crate::error::ParseError;
use crate::input::CommandInput;
use crate::suggestion::Suggestion;

mod aggregate;
mod boolean;
mod integer;
mod literal;
mod string;

pub use aggregate::{AggregateBuilder, AggregateParser, AggregateValues};
pub use boolean::BooleanParser;
pub use integer::IntegerParser;
pub use literal::LiteralParser;
pub use string::{StringMode, StringParser};

/// Token count requested by parsers that consume the rest of the input.
pub const GREEDY: usize = usize::MAX;

/// Converts input tokens into a typed value.
///
/// `parse` consumes tokens by advancing `input`; the tokens consumed are the
/// cursor delta. On failure the caller discards the cursor, so a parser may
/// leave it anywhere.
pub trait ArgumentParser<S>: Send + Sync {
    /// Parse a value from the tokens at the cursor.
    ///
    /// Returns [`ParseError::NoInput`] when no token is left.
    fn parse(
        &self,
        ctx: &CommandContext<S>,
        input: &mut CommandInput<'_>,
    ) -> Result<ParsedValue, ParseError>;

    /// Completions for the remaining input, which may be empty or partial.
    ///
    /// Must not fail. Order is stable between calls.
    fn suggestions<'a>(
        &'a self,
        _ctx: &'a CommandContext<S>,
        _input: CommandInput<'a>,
    ) -> BoxFuture<'a, Vec<Suggestion>> {
        future::ready(Vec::new()).boxed()
    }

    /// Number of tokens this parser consumes, [`GREEDY`] for "all remaining".
    fn requested_tokens(&self) -> usize {
        1
    }

    /// Parser definition. Two arguments with the same name and different
    /// definitions cannot share a tree node.
    fn describe(&self) -> String;
}

/// Read the next token or fail with [`ParseError::NoInput`].
pub(crate) fn next_token<'a>(input: &mut CommandInput<'a>) -> Result<&'a str, ParseError> {
    input.read_token().ok_or(ParseError::NoInput)
}

/// The partial token a single-token parser completes.
pub(crate) fn partial<'a>(input: &CommandInput<'a>) -> &'a str {
    input.remaining().trim_start()
}

/// Keep only `candidates` that extend `partial`.
pub(crate) fn starting_with<'a, I>(candidates: I, partial: &str) -> Vec<Suggestion>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter(|c| c.starts_with(partial))
        .map(Suggestion::new)
        .collect()
}

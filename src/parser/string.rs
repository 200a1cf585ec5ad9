//! String parser.

use super::{ArgumentParser, GREEDY, next_token};
use crate::context::{CommandContext, ParsedValue};
use crate::error::ParseError;
use crate::input::CommandInput;

/// How much input a [`StringParser`] consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringMode {
    /// One whitespace-delimited token
    Single,

    /// One token, or a phrase wrapped in `"` or `'`
    Quoted,

    /// Everything left on the line; only valid as the last component
    Greedy,
}

/// Parses text into a `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringParser {
    mode: StringMode,
}

impl StringParser {
    /// Parser with the given mode.
    pub fn new(mode: StringMode) -> Self {
        Self { mode }
    }

    /// Single-token parser.
    pub fn single() -> Self {
        Self::new(StringMode::Single)
    }

    /// Quoted-phrase parser.
    pub fn quoted() -> Self {
        Self::new(StringMode::Quoted)
    }

    /// Rest-of-line parser.
    pub fn greedy() -> Self {
        Self::new(StringMode::Greedy)
    }

    /// Parse mode.
    pub fn mode(&self) -> StringMode {
        self.mode
    }
}

fn read_quoted(input: &mut CommandInput<'_>) -> Result<String, ParseError> {
    input.skip_whitespace();
    let remaining = input.remaining();

    let quote = match remaining.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        Some(_) => return next_token(input).map(str::to_string),
        None => return Err(ParseError::NoInput),
    };

    let body = &remaining[quote.len_utf8()..];
    let end = body.find(quote).ok_or(ParseError::UnterminatedQuote)?;
    input.advance(quote.len_utf8() * 2 + end);
    Ok(body[..end].to_string())
}

impl<S> ArgumentParser<S> for StringParser {
    fn parse(
        &self,
        _ctx: &CommandContext<S>,
        input: &mut CommandInput<'_>,
    ) -> Result<ParsedValue, ParseError> {
        let value = match self.mode {
            StringMode::Single => next_token(input)?.to_string(),
            StringMode::Quoted => read_quoted(input)?,
            StringMode::Greedy => {
                let rest = input.read_remaining();
                if rest.is_empty() {
                    return Err(ParseError::NoInput);
                }
                rest.to_string()
            }
        };

        Ok(Box::new(value))
    }

    fn requested_tokens(&self) -> usize {
        match self.mode {
            StringMode::Greedy => GREEDY,
            _ => 1,
        }
    }

    fn describe(&self) -> String {
        match self.mode {
            StringMode::Single => "string(single)",
            StringMode::Quoted => "string(quoted)",
            StringMode::Greedy => "string(greedy)",
        }
        .to_string()
    }
}

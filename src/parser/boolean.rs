//! Boolean parser.

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use super::{ArgumentParser, next_token, partial, starting_with};
use crate::context::{CommandContext, ParsedValue};
use crate::error::ParseError;
use crate::input::CommandInput;
use crate::suggestion::Suggestion;

const STRICT_TRUE: &[&str] = &["true"];
const STRICT_FALSE: &[&str] = &["false"];
const LIBERAL_TRUE: &[&str] = &["true", "yes", "on"];
const LIBERAL_FALSE: &[&str] = &["false", "no", "off"];

/// Parses `true`/`false`, case-insensitively.
///
/// Liberal mode also accepts `yes`/`no` and `on`/`off`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanParser {
    liberal: bool,
}

impl BooleanParser {
    /// Strict parser.
    pub fn new() -> Self {
        Self { liberal: false }
    }

    /// Liberal parser.
    pub fn liberal() -> Self {
        Self { liberal: true }
    }

    fn words(&self) -> (&'static [&'static str], &'static [&'static str]) {
        if self.liberal {
            (LIBERAL_TRUE, LIBERAL_FALSE)
        } else {
            (STRICT_TRUE, STRICT_FALSE)
        }
    }
}

impl<S> ArgumentParser<S> for BooleanParser {
    fn parse(
        &self,
        _ctx: &CommandContext<S>,
        input: &mut CommandInput<'_>,
    ) -> Result<ParsedValue, ParseError> {
        let token = next_token(input)?;
        let lower = token.to_lowercase();
        let (yes, no) = self.words();

        if yes.contains(&lower.as_str()) {
            Ok(Box::new(true))
        } else if no.contains(&lower.as_str()) {
            Ok(Box::new(false))
        } else {
            Err(ParseError::InvalidBoolean {
                input: token.to_string(),
            })
        }
    }

    fn suggestions<'a>(
        &'a self,
        _ctx: &'a CommandContext<S>,
        input: CommandInput<'a>,
    ) -> BoxFuture<'a, Vec<Suggestion>> {
        let (yes, no) = self.words();
        let lower = partial(&input).to_lowercase();
        let words = yes.iter().zip(no.iter()).flat_map(|(y, n)| [*y, *n]);
        future::ready(starting_with(words, &lower)).boxed()
    }

    fn describe(&self) -> String {
        if self.liberal {
            "boolean(liberal)".to_string()
        } else {
            "boolean".to_string()
        }
    }
}

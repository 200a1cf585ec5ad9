//! Bounded integer parser.

use std::collections::BTreeSet;

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use super::{ArgumentParser, next_token, partial};
use crate::context::{CommandContext, ParsedValue};
use crate::error::ParseError;
use crate::input::CommandInput;
use crate::suggestion::Suggestion;

/// Parses an `i64` within inclusive bounds.
///
/// Out-of-range values are rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerParser {
    min: i64,
    max: i64,
}

impl IntegerParser {
    /// Unbounded parser.
    pub fn new() -> Self {
        Self {
            min: i64::MIN,
            max: i64::MAX,
        }
    }

    /// Parser accepting `min..=max`.
    pub fn with_range(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Lower bound.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> i64 {
        self.max
    }

    fn in_range(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Completions for `partial`: the typed number and every number formed by
    /// appending one digit, kept within bounds.
    pub fn suggest_numbers(&self, partial: &str) -> Vec<String> {
        let negative = partial.starts_with('-');
        let digits = if negative { &partial[1..] } else { partial };

        let typed: u64 = if digits.is_empty() {
            0
        } else {
            match digits.parse() {
                Ok(n) => n,
                Err(_) => return Vec::new(),
            }
        };

        let mut numbers = BTreeSet::new();
        numbers.insert(typed);
        for digit in 0..10 {
            if let Some(n) = typed.checked_mul(10).and_then(|n| n.checked_add(digit)) {
                numbers.insert(n);
            }
        }

        numbers
            .into_iter()
            .filter_map(|n| {
                let n = i64::try_from(n).ok()?;
                Some(if negative { -n } else { n })
            })
            .filter(|n| self.in_range(*n))
            .map(|n| n.to_string())
            .collect()
    }
}

impl Default for IntegerParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ArgumentParser<S> for IntegerParser {
    fn parse(
        &self,
        _ctx: &CommandContext<S>,
        input: &mut CommandInput<'_>,
    ) -> Result<ParsedValue, ParseError> {
        let token = next_token(input)?;
        let value: i64 = token.parse().map_err(|_| ParseError::InvalidInteger {
            input: token.to_string(),
        })?;

        if !self.in_range(value) {
            return Err(ParseError::IntegerOutOfRange {
                input: token.to_string(),
                min: self.min,
                max: self.max,
            });
        }

        Ok(Box::new(value))
    }

    fn suggestions<'a>(
        &'a self,
        _ctx: &'a CommandContext<S>,
        input: CommandInput<'a>,
    ) -> BoxFuture<'a, Vec<Suggestion>> {
        let numbers = self
            .suggest_numbers(partial(&input))
            .into_iter()
            .map(Suggestion::new)
            .collect();
        future::ready(numbers).boxed()
    }

    fn describe(&self) -> String {
        format!("integer({}..={})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(parser: IntegerParser, s: &str) -> Result<i64, ParseError> {
        let ctx = CommandContext::new((), false, s);
        let mut input = CommandInput::new(s);
        ArgumentParser::<()>::parse(&parser, &ctx, &mut input)
            .map(|v| *v.downcast::<i64>().expect("integer yields i64"))
    }

    #[test]
    fn test_parse_in_range() {
        let parser = IntegerParser::with_range(-10, 10);
        assert_eq!(parse(parser, "7"), Ok(7));
        assert_eq!(parse(parser, "-10"), Ok(-10));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let parser = IntegerParser::with_range(0, 10);
        assert_eq!(
            parse(parser, "11"),
            Err(ParseError::IntegerOutOfRange {
                input: "11".into(),
                min: 0,
                max: 10
            })
        );
    }

    #[test]
    fn test_invalid_and_missing() {
        let parser = IntegerParser::new();
        assert_eq!(
            parse(parser, "abc"),
            Err(ParseError::InvalidInteger {
                input: "abc".into()
            })
        );
        assert_eq!(parse(parser, ""), Err(ParseError::NoInput));
    }

    #[test]
    fn test_consumes_one_token() {
        let ctx = CommandContext::new((), false, "");
        let mut input = CommandInput::new("10 6");
        ArgumentParser::<()>::parse(&IntegerParser::new(), &ctx, &mut input).unwrap();
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_suggestions_append_digit() {
        let parser = IntegerParser::new();
        assert_eq!(
            parser.suggest_numbers("6"),
            vec!["6", "60", "61", "62", "63", "64", "65", "66", "67", "68", "69"]
        );
        assert_eq!(
            parser.suggest_numbers(""),
            vec!["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]
        );
    }

    #[test]
    fn test_suggestions_respect_range_and_sign() {
        let parser = IntegerParser::with_range(-20, 15);
        assert_eq!(parser.suggest_numbers("1"), vec!["1", "10", "11", "12", "13", "14", "15"]);
        assert_eq!(parser.suggest_numbers("-1"), vec!["-1", "-10", "-11", "-12", "-13", "-14", "-15", "-16", "-17", "-18", "-19"]);
        assert!(parser.suggest_numbers("x").is_empty());
    }
}

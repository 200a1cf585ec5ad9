//! Literal keyword parser.

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use super::{ArgumentParser, next_token};
use crate::context::{CommandContext, ParsedValue};
use crate::error::ParseError;
use crate::input::CommandInput;
use crate::suggestion::Suggestion;

/// Matches one of a fixed alias set and yields the primary name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralParser {
    /// Accepted aliases; the first one is the primary name
    aliases: Vec<String>,

    /// Whether matching is case-sensitive
    case_sensitive: bool,
}

impl LiteralParser {
    /// Case-sensitive parser for `aliases`.
    pub fn new(aliases: Vec<String>) -> Self {
        Self {
            aliases,
            case_sensitive: true,
        }
    }

    /// Change the case policy.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Accepted aliases.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Whether `token` matches one of the aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.aliases.iter().any(|alias| {
            if self.case_sensitive {
                alias == token
            } else {
                alias.to_lowercase() == token.to_lowercase()
            }
        })
    }
}

impl<S> ArgumentParser<S> for LiteralParser {
    fn parse(
        &self,
        _ctx: &CommandContext<S>,
        input: &mut CommandInput<'_>,
    ) -> Result<ParsedValue, ParseError> {
        let token = next_token(input)?;
        if self.matches(token) {
            let primary = self.aliases.first().cloned().unwrap_or_default();
            Ok(Box::new(primary))
        } else {
            Err(ParseError::UnknownLiteral {
                input: token.to_string(),
                expected: self.aliases.clone(),
            })
        }
    }

    fn suggestions<'a>(
        &'a self,
        _ctx: &'a CommandContext<S>,
        _input: CommandInput<'a>,
    ) -> BoxFuture<'a, Vec<Suggestion>> {
        let all = self.aliases.iter().map(|a| Suggestion::new(a.as_str())).collect();
        future::ready(all).boxed()
    }

    fn describe(&self) -> String {
        format!("literal({})", self.aliases.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(parser: &LiteralParser, s: &str) -> Result<String, ParseError> {
        let ctx = CommandContext::new((), false, s);
        let mut input = CommandInput::new(s);
        ArgumentParser::<()>::parse(parser, &ctx, &mut input)
            .map(|v| *v.downcast::<String>().expect("literal yields String"))
    }

    #[test]
    fn test_alias_yields_primary_name() {
        let parser = LiteralParser::new(vec!["give".into(), "g".into()]);
        assert_eq!(parse(&parser, "g"), Ok("give".to_string()));
        assert_eq!(parse(&parser, "give"), Ok("give".to_string()));
    }

    #[test]
    fn test_case_policy() {
        let strict = LiteralParser::new(vec!["tp".into()]);
        assert!(matches!(
            parse(&strict, "TP"),
            Err(ParseError::UnknownLiteral { .. })
        ));

        let relaxed = strict.with_case_sensitive(false);
        assert_eq!(parse(&relaxed, "TP"), Ok("tp".to_string()));
    }

    #[test]
    fn test_empty_input() {
        let parser = LiteralParser::new(vec!["tp".into()]);
        assert_eq!(parse(&parser, "  "), Err(ParseError::NoInput));
    }

    #[tokio::test]
    async fn test_suggests_all_aliases() {
        let parser = LiteralParser::new(vec!["teleport".into(), "tp".into()]);
        let ctx = CommandContext::new((), true, "");
        let got = ArgumentParser::<()>::suggestions(&parser, &ctx, CommandInput::new("x")).await;
        assert_eq!(got, vec![Suggestion::new("teleport"), Suggestion::new("tp")]);
    }
}

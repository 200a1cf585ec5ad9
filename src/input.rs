//! Input cursor over whitespace-separated tokens.
//!
//! Parsers consume input by advancing a [`CommandInput`] cursor. The number of
//! tokens a parser consumed is the cursor delta, so a failed parse on a cloned
//! cursor never disturbs the caller's position.
//!
//! # Example
//!
//! ```rust
//! use nut_dispatch::input::CommandInput;
//!
//! let mut input = CommandInput::new("tp overworld 10");
//! assert_eq!(input.read_token(), Some("tp"));
//! assert_eq!(input.remaining_tokens(), 2);
//! assert_eq!(input.last_token(), "10");
//! ```

/// Cursor over a raw input line.
///
/// Offsets are byte offsets into the original input. Cloning is cheap and is
/// how callers probe a parser without committing the consumed tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInput<'a> {
    /// Original input
    input: &'a str,

    /// Byte offset of the first unconsumed character
    cursor: usize,
}

impl<'a> CommandInput<'a> {
    /// Create a cursor at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    /// The full original input.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset of the first unconsumed character.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Unconsumed input, including any leading whitespace.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    /// Length of the unconsumed input in bytes.
    pub fn remaining_len(&self) -> usize {
        self.input.len() - self.cursor
    }

    /// True when nothing but whitespace is left.
    pub fn is_empty(&self) -> bool {
        self.remaining().trim_start().is_empty()
    }

    /// Advance past leading whitespace.
    pub fn skip_whitespace(&mut self) {
        let remaining = self.remaining();
        self.cursor += remaining.len() - remaining.trim_start().len();
    }

    /// Next token without consuming it.
    pub fn peek_token(&self) -> Option<&'a str> {
        self.remaining().split_whitespace().next()
    }

    /// Consume and return the next token.
    ///
    /// Returns `None` (and consumes only whitespace) when no token is left.
    pub fn read_token(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let remaining = self.remaining();
        if remaining.is_empty() {
            return None;
        }

        let end = remaining
            .find(char::is_whitespace)
            .unwrap_or(remaining.len());
        self.cursor += end;
        Some(&remaining[..end])
    }

    /// Consume everything that is left, without leading whitespace.
    pub fn read_remaining(&mut self) -> &'a str {
        self.skip_whitespace();
        let remaining = self.remaining();
        self.cursor = self.input.len();
        remaining
    }

    /// Advance by `bytes`, clamped to the end of input.
    ///
    /// `bytes` must land on a char boundary of the remaining input.
    pub fn advance(&mut self, bytes: usize) {
        self.cursor = (self.cursor + bytes).min(self.input.len());
    }

    /// Number of tokens left, counting the partial token being typed.
    ///
    /// Trailing whitespace (or an empty remainder) opens a new, empty partial
    /// token: `"6"` has one token left, `"6 "` has two.
    pub fn remaining_tokens(&self) -> usize {
        let remaining = self.remaining();
        let complete = remaining.split_whitespace().count();
        if remaining.is_empty() || remaining.ends_with(char::is_whitespace) {
            complete + 1
        } else {
            complete
        }
    }

    /// The partial token at the end of the input (empty after trailing whitespace).
    pub fn last_token(&self) -> &'a str {
        self.remaining()
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
    }
}

/// Strip a `namespace<delimiter>` prefix from the first token.
///
/// Returns the stripped input and the number of bytes removed. Input whose
/// first token has no delimiter is returned unchanged.
///
/// ```rust
/// use nut_dispatch::input::strip_namespace;
///
/// assert_eq!(strip_namespace("minecraft:tp a", ':'), ("tp a", 10));
/// assert_eq!(strip_namespace("tp a:b", ':'), ("tp a:b", 0));
/// ```
pub fn strip_namespace(input: &str, delimiter: char) -> (&str, usize) {
    let leading = input.split(char::is_whitespace).next().unwrap_or("");
    match leading.find(delimiter) {
        Some(index) => {
            let trimmed = index + delimiter.len_utf8();
            (&input[trimmed..], trimmed)
        }
        None => (input, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_tokens() {
        let mut input = CommandInput::new("give  diamond 64");
        assert_eq!(input.read_token(), Some("give"));
        assert_eq!(input.cursor(), 4);
        assert_eq!(input.read_token(), Some("diamond"));
        assert_eq!(input.read_token(), Some("64"));
        assert_eq!(input.read_token(), None);
        assert!(input.is_empty());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let input = CommandInput::new("  tp x");
        assert_eq!(input.peek_token(), Some("tp"));
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_skip_whitespace_points_at_token() {
        let mut input = CommandInput::new("point 5 badtoken");
        input.read_token();
        input.read_token();
        input.skip_whitespace();
        assert_eq!(input.cursor(), 8);
        assert_eq!(input.remaining(), "badtoken");
    }

    #[test]
    fn test_read_remaining() {
        let mut input = CommandInput::new("say hello there ");
        input.read_token();
        assert_eq!(input.read_remaining(), "hello there ");
        assert!(input.is_empty());
        assert_eq!(input.remaining_len(), 0);
    }

    #[test]
    fn test_remaining_tokens_counts_partial() {
        assert_eq!(CommandInput::new("").remaining_tokens(), 1);
        assert_eq!(CommandInput::new("6").remaining_tokens(), 1);
        assert_eq!(CommandInput::new("6 ").remaining_tokens(), 2);
        assert_eq!(CommandInput::new("10 6").remaining_tokens(), 2);
        assert_eq!(CommandInput::new("   ").remaining_tokens(), 1);
    }

    #[test]
    fn test_last_token() {
        assert_eq!(CommandInput::new("tp overworld 10 6").last_token(), "6");
        assert_eq!(CommandInput::new("tp overworld ").last_token(), "");
        assert_eq!(CommandInput::new("").last_token(), "");
    }

    #[test]
    fn test_advance_is_clamped() {
        let mut input = CommandInput::new("abc");
        input.advance(10);
        assert_eq!(input.cursor(), 3);
        assert!(input.is_empty());
    }

    #[test]
    fn test_strip_namespace() {
        assert_eq!(strip_namespace("ns:give x", ':'), ("give x", 3));
        assert_eq!(strip_namespace("give x", ':'), ("give x", 0));
        assert_eq!(strip_namespace("give ns:x", ':'), ("give ns:x", 0));
        assert_eq!(strip_namespace("", ':'), ("", 0));
    }
}

//! Error types for parsing, dispatch and registration.
//!
//! Three layers are kept apart so callers can tell "bad input" from
//! "command logic failed" from "bad command definition":
//! - [`ParseError`] - one parser rejected its input
//! - [`CommandError`] - a dispatch request failed (parse, syntax, permission or handler)
//! - [`RegistrationError`] - a tree mutation was refused

use thiserror::Error;

/// Parser-level failure cause.
///
/// Produced by [`ArgumentParser::parse`](crate::parser::ArgumentParser::parse).
/// The dispatch engine wraps it into [`CommandError::ArgumentParse`] together
/// with the component name and input offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No token left to parse
    #[error("no input was provided")]
    NoInput,

    /// Token is not a whole number
    #[error("'{input}' is not a valid integer")]
    InvalidInteger {
        /// Offending token
        input: String,
    },

    /// Whole number outside the parser's inclusive bounds
    #[error("{input} is not in the range {min}..={max}")]
    IntegerOutOfRange {
        /// Offending token
        input: String,
        /// Lower bound (inclusive)
        min: i64,
        /// Upper bound (inclusive)
        max: i64,
    },

    /// Token is not a recognised boolean
    #[error("'{input}' is not a valid boolean")]
    InvalidBoolean {
        /// Offending token
        input: String,
    },

    /// Token matches none of a literal's aliases
    #[error("'{input}' does not match any of: {}", .expected.join(", "))]
    UnknownLiteral {
        /// Offending token
        input: String,
        /// Accepted aliases
        expected: Vec<String>,
    },

    /// Quoted string without closing quote
    #[error("unterminated quoted string")]
    UnterminatedQuote,

    /// A sub-component of an aggregate failed
    #[error("invalid value for '{component}' at offset {offset}: {source}")]
    Component {
        /// Sub-component name
        component: String,
        /// Byte offset of the sub-component's first token
        offset: usize,
        /// Underlying cause
        source: Box<ParseError>,
    },

    /// Free-form failure from a custom parser or aggregate mapper
    #[error("{0}")]
    Custom(String),
}

impl ParseError {
    /// Attribute a failure to the named component starting at `offset`.
    ///
    /// Failures that already carry a component (nested aggregates) keep the
    /// innermost attribution.
    pub fn at(component: &str, offset: usize, cause: ParseError) -> Self {
        match cause {
            nested @ ParseError::Component { .. } => nested,
            cause => ParseError::Component {
                component: component.to_string(),
                offset,
                source: Box::new(cause),
            },
        }
    }
}

/// Dispatch error returned from `execute`.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A parser rejected its input
    #[error("invalid argument '{component}' at offset {offset}: {cause}")]
    ArgumentParse {
        /// Name of the component whose parser failed
        component: String,
        /// Byte offset where the rejected input starts
        offset: usize,
        /// Parser-level cause
        #[source]
        cause: ParseError,
    },

    /// The first token names no registered command
    #[error("unknown command '{name}'")]
    NoSuchCommand {
        /// First token of the input
        name: String,
    },

    /// A later token matches nothing under an otherwise valid prefix
    #[error("invalid syntax at offset {offset}, expected: {syntax}")]
    InvalidSyntax {
        /// Byte offset of the rejected token
        offset: usize,
        /// The rejected token
        token: String,
        /// Syntax hint for the matched prefix
        syntax: String,
    },

    /// Input ended before a required component
    #[error("missing argument '{component}'")]
    MissingArgument {
        /// First missing component
        component: String,
        /// Byte offset where the component was expected
        offset: usize,
    },

    /// Input matched structurally but the sender may not use it
    #[error("no permission to use '{node}'")]
    NoPermission {
        /// Token or command path that was denied
        node: String,
    },

    /// Input exceeds the configured maximum length
    #[error("input is {len} bytes, limit is {max}")]
    InputTooLong {
        /// Received length
        len: usize,
        /// Configured limit
        max: usize,
    },

    /// The handler ran and failed
    #[error("command execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}

impl CommandError {
    /// Build an [`ArgumentParse`](Self::ArgumentParse) error, lifting the
    /// sub-component attribution of aggregate failures to the top level.
    pub fn argument(component: &str, offset: usize, cause: ParseError) -> Self {
        match cause {
            ParseError::Component {
                component,
                offset,
                source,
            } => CommandError::ArgumentParse {
                component,
                offset,
                cause: *source,
            },
            cause => CommandError::ArgumentParse {
                component: component.to_string(),
                offset,
                cause,
            },
        }
    }

    /// Move every offset `bytes` further into the input.
    pub(crate) fn shifted(mut self, bytes: usize) -> Self {
        match &mut self {
            CommandError::ArgumentParse { offset, .. }
            | CommandError::InvalidSyntax { offset, .. }
            | CommandError::MissingArgument { offset, .. } => *offset += bytes,
            _ => {}
        }
        self
    }

    /// True for errors caused by the input rather than by the handler.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, CommandError::Execution(_))
    }
}

/// Tree mutation error returned from `insert`/`remove`.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The command definition itself is malformed
    #[error("invalid command: {reason}")]
    InvalidCommand {
        /// What is wrong with it
        reason: String,
    },

    /// Same argument name at the same position with a different parser definition
    #[error("conflicting parser for '{component}' at '{path}': {existing} vs {candidate}")]
    ConflictingParser {
        /// Path of the parent node
        path: String,
        /// Argument name
        component: String,
        /// Parser already in the tree
        existing: String,
        /// Parser of the new command
        candidate: String,
    },

    /// The insertion would make the tree unresolvable
    #[error("ambiguous node at '{path}': '{existing}' and '{candidate}'")]
    Ambiguous {
        /// Path of the parent node
        path: String,
        /// Component already in the tree
        existing: String,
        /// Component of the new command
        candidate: String,
    },

    /// Two different executors on an indistinguishable path
    #[error("a command is already registered at '{path}'")]
    DuplicateExecutor {
        /// Path of the contested node
        path: String,
    },

    /// Removal target does not exist
    #[error("no node at '{path}'")]
    NotFound {
        /// Requested path
        path: String,
    },

    /// The host's registration handler refused the change
    #[error("registration handler rejected the change: {0}")]
    Rejected(#[source] anyhow::Error),
}

/// Typed context lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// Nothing stored under the key
    #[error("no value stored for '{key}'")]
    Missing {
        /// Requested key
        key: String,
    },

    /// A value exists but has a different type
    #[error("value for '{key}' is not a {expected}")]
    WrongType {
        /// Requested key
        key: String,
        /// Requested type name
        expected: &'static str,
    },
}

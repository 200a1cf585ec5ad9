//! Configuration traits and implementations for dispatch behavior.
//!
//! The `ManagerConfig` trait allows compile-time configuration of input limits,
//! literal matching and suggestion post-processing without runtime overhead.

/// Manager configuration trait defining limits and matching policy.
///
/// All values are const (zero runtime cost). A `CommandManager` is generic over
/// its configuration, so two managers with different policies never share state.
pub trait ManagerConfig: 'static {
    /// Maximum accepted input length in bytes (default: 32767)
    const MAX_INPUT: usize;

    /// Maximum number of suggestions returned per request (default: 64)
    const MAX_SUGGESTIONS: usize;

    /// Whether literal aliases are matched case-sensitively (default: true)
    const CASE_SENSITIVE_LITERALS: bool;

    /// Whether suggestions are filtered against the partial token (default: true)
    const FILTER_SUGGESTIONS: bool;

    /// Delimiter of an optional `namespace:` prefix on the first token (default: none)
    const NAMESPACE_DELIMITER: Option<char>;
}

/// Default configuration.
///
/// - MAX_INPUT: 32767 bytes
/// - MAX_SUGGESTIONS: 64
/// - CASE_SENSITIVE_LITERALS: true
/// - FILTER_SUGGESTIONS: true
/// - NAMESPACE_DELIMITER: none
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl ManagerConfig for DefaultConfig {
    const MAX_INPUT: usize = 32767;
    const MAX_SUGGESTIONS: usize = 64;
    const CASE_SENSITIVE_LITERALS: bool = true;
    const FILTER_SUGGESTIONS: bool = true;
    const NAMESPACE_DELIMITER: Option<char> = None;
}

/// Configuration for hosts that prefix commands with a namespace (`plugin:cmd`).
///
/// - MAX_INPUT: 32767 bytes
/// - MAX_SUGGESTIONS: 128
/// - CASE_SENSITIVE_LITERALS: false
/// - FILTER_SUGGESTIONS: true
/// - NAMESPACE_DELIMITER: `:`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NamespacedConfig;

impl ManagerConfig for NamespacedConfig {
    const MAX_INPUT: usize = 32767;
    const MAX_SUGGESTIONS: usize = 128;
    const CASE_SENSITIVE_LITERALS: bool = false;
    const FILTER_SUGGESTIONS: bool = true;
    const NAMESPACE_DELIMITER: Option<char> = Some(':');
}

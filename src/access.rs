//! Senders, permissions and the access filter.
//!
//! This module provides:
//! - `SenderKind` trait for a closed set of sender capability tags (derivable)
//! - `CommandSender` trait implemented by the host's sender type
//! - `Permission` requirements and the `PermissionChecker` callback
//! - `AccessRule` pairs and the `has_access` filter used by both dispatch and suggestion

use core::fmt;
use core::hash::Hash;

use crate::tree::CommandNode;

/// Sender capability tag.
///
/// Implement this trait (or `#[derive(SenderKind)]`) on a fieldless enum that
/// lists every kind of sender a host can produce, e.g. console and player.
/// Commands restricted to a kind are only reachable by senders that report it.
/// Tags are compared by value; `name` is only used to display access rules.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// pub enum Kind {
///     Console,
///     Player,
/// }
///
/// impl SenderKind for Kind {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Console => "console",
///             Self::Player => "player",
///         }
///     }
/// }
/// ```
pub trait SenderKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Display name of the tag.
    fn name(&self) -> &'static str;
}

/// The identity issuing a command, as seen by the engine.
///
/// Hosts map their native sender representation onto this type with a
/// [`SenderMapper`](crate::manager::SenderMapper).
pub trait CommandSender: fmt::Debug + Send + Sync + 'static {
    /// Capability tag type.
    type Kind: SenderKind;

    /// Every capability tag this sender satisfies.
    fn kinds(&self) -> &[Self::Kind];

    /// Whether this sender satisfies `kind`.
    fn satisfies(&self, kind: Self::Kind) -> bool {
        self.kinds().contains(&kind)
    }
}

/// Permission requirement attached to a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Permission {
    /// No requirement; never consults the checker
    #[default]
    Empty,

    /// A single permission node, e.g. `"cmd.teleport"`
    Node(String),

    /// Satisfied when any member is satisfied
    AnyOf(Vec<Permission>),

    /// Satisfied when every member is satisfied
    AllOf(Vec<Permission>),
}

impl Permission {
    /// Single permission node. An empty string yields [`Permission::Empty`].
    pub fn of(node: impl Into<String>) -> Self {
        let node = node.into();
        if node.is_empty() {
            Permission::Empty
        } else {
            Permission::Node(node)
        }
    }

    /// Whether this is the empty requirement.
    pub fn is_empty(&self) -> bool {
        matches!(self, Permission::Empty)
    }

    /// Evaluate the requirement for `sender`.
    pub fn test<S, P>(&self, sender: &S, checker: &P) -> bool
    where
        P: PermissionChecker<S> + ?Sized,
    {
        match self {
            Permission::Empty => true,
            Permission::Node(node) => checker.has_permission(sender, node),
            Permission::AnyOf(members) => members.iter().any(|p| p.test(sender, checker)),
            Permission::AllOf(members) => members.iter().all(|p| p.test(sender, checker)),
        }
    }
}

impl From<&str> for Permission {
    fn from(node: &str) -> Self {
        Permission::of(node)
    }
}

impl From<String> for Permission {
    fn from(node: String) -> Self {
        Permission::of(node)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, members: &[Permission], sep: &str) -> fmt::Result {
            for (i, member) in members.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{}", member)?;
            }
            Ok(())
        }

        match self {
            Permission::Empty => Ok(()),
            Permission::Node(node) => f.write_str(node),
            Permission::AnyOf(members) => join(f, members, "|"),
            Permission::AllOf(members) => join(f, members, "&"),
        }
    }
}

/// Host callback deciding whether a sender holds a permission node.
///
/// May consult caches or other shared state, but must be safe to call
/// concurrently and repeatedly for the same pair. Closures
/// `Fn(&S, &str) -> bool` implement it.
pub trait PermissionChecker<S>: Send + Sync {
    /// Whether `sender` holds `permission`.
    fn has_permission(&self, sender: &S, permission: &str) -> bool;
}

impl<S, F> PermissionChecker<S> for F
where
    F: Fn(&S, &str) -> bool + Send + Sync,
{
    fn has_permission(&self, sender: &S, permission: &str) -> bool {
        self(sender, permission)
    }
}

/// Checker granting every permission node.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AllowAll;

impl<S> PermissionChecker<S> for AllowAll {
    fn has_permission(&self, _sender: &S, _permission: &str) -> bool {
        true
    }
}

/// A `(sender kind, permission)` pair registered on a node.
///
/// `sender_kind: None` applies to every sender.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessRule<K: SenderKind> {
    /// Required sender capability
    pub sender_kind: Option<K>,

    /// Required permission
    pub permission: Permission,
}

impl<K: SenderKind> AccessRule<K> {
    /// Create a rule.
    pub fn new(sender_kind: Option<K>, permission: Permission) -> Self {
        Self {
            sender_kind,
            permission,
        }
    }

    /// Whether the rule grants `sender` access.
    pub fn allows<S, P>(&self, sender: &S, checker: &P) -> bool
    where
        S: CommandSender<Kind = K>,
        P: PermissionChecker<S> + ?Sized,
    {
        self.sender_kind.is_none_or(|kind| sender.satisfies(kind))
            && self.permission.test(sender, checker)
    }
}

impl<K: SenderKind> fmt::Display for AccessRule<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.sender_kind.map_or("any", |kind| kind.name());
        if self.permission.is_empty() {
            write!(f, "{kind}")
        } else {
            write!(f, "{kind} with {}", self.permission)
        }
    }
}

/// Whether `sender` may traverse or execute `node`.
///
/// The root is always accessible. Any other node grants access when at least
/// one of its rules applies to the sender's kinds and passes the checker; a
/// node without a matching rule denies access.
pub fn has_access<S, P>(sender: &S, node: &CommandNode<S>, checker: &P) -> bool
where
    S: CommandSender,
    P: PermissionChecker<S> + ?Sized,
{
    if node.is_root() {
        return true;
    }

    node.access().iter().any(|rule| rule.allows(sender, checker))
}

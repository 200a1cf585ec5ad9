//! Mapping from host-native senders to engine senders.

/// Converts a host-native sender into the engine's sender type.
///
/// Must be total and side-effect free. Closures `Fn(&N) -> S` implement it.
pub trait SenderMapper<N, S>: Send + Sync {
    /// Map `native` to an engine sender.
    fn map(&self, native: &N) -> S;
}

impl<N, S, F> SenderMapper<N, S> for F
where
    F: Fn(&N) -> S + Send + Sync,
{
    fn map(&self, native: &N) -> S {
        self(native)
    }
}

/// Mapper for hosts whose native sender already is the engine sender.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct IdentityMapper;

impl<S: Clone> SenderMapper<S, S> for IdentityMapper {
    fn map(&self, native: &S) -> S {
        native.clone()
    }
}

//! Errors reported by the search library.

use thiserror::Error;

/// Represents possible errors that can occur while composing or running a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError{
    /// A sequence was advanced past its end marker.
    ///
    /// This is always a composition bug: the library's own combinators never
    /// request an element after observing the end.
    #[error("sequence advanced past its end marker")]
    Exhausted,
    /// The search configuration was rejected before any tree was built.
    #[error("invalid config: {msg}")]
    InvalidConfig { msg: &'static str }
}

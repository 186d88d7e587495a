//! Demand-driven sequences used to expose tree children and decomposed values.

use std::iter::{Fuse, Peekable};

use crate::SearchError;

/// A possibly-infinite, lazily-produced sequence with an explicit end marker.
///
/// Elements are produced only when a consumer asks for them through `head`,
/// `tail` or iteration. The sequence is backed by an iterator rather than by
/// recursively nested thunks, so walking a long sequence never grows the
/// call stack.
///
/// # Type Parameters
/// - `'a`: The lifetime of whatever the producing iterator borrows.
/// - `T`: The element type.
pub struct Seq<'a, T>{
    inner: Peekable<Fuse<Box<dyn Iterator<Item = T> + 'a>>>
}

impl<'a, T: 'a> Seq<'a, T>{
    /// Creates a sequence that is already at its end marker.
    #[inline]
    pub fn end() -> Self{
        Self::from_iter(std::iter::empty())
    }

    /// Creates a finite sequence over the elements of a list.
    #[inline]
    pub fn from_vec(values: Vec<T>) -> Self{
        Self::from_iter(values)
    }

    /// Wraps any iterator as a lazy sequence.
    ///
    /// Nothing is pulled from `iter` until the sequence is consumed.
    pub fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a
    {
        let boxed: Box<dyn Iterator<Item = T> + 'a> = Box::new(iter.into_iter());
        Seq { inner: boxed.fuse().peekable() }
    }

    /// Creates a sequence that yields `sentinel` forever and never ends.
    ///
    /// Useful as an always-present fallback: chaining it after a finite
    /// sequence lets callers probe "is there another element" without
    /// branching on an end marker.
    pub fn repeat(sentinel: T) -> Self
    where
        T: Clone
    {
        Self::from_iter(std::iter::repeat(sentinel))
    }

    /// Returns the first element, or `None` at the end marker.
    ///
    /// Forces at most one element of the underlying producer.
    #[inline]
    pub fn head(&mut self) -> Option<&T>{
        self.inner.peek()
    }

    /// Checks whether the end marker has been reached.
    #[inline]
    pub fn is_end(&mut self) -> bool{
        self.head().is_none()
    }

    /// Returns the sequence without its first element.
    ///
    /// # Panics
    /// Panics if the sequence is already at its end marker. Advancing past the
    /// end is a composition bug and is never silently absorbed.
    pub fn tail(self) -> Self{
        match self.try_tail(){
            Ok(rest) => rest,
            Err(err) => panic!("{err}")
        }
    }

    /// Returns the sequence without its first element.
    ///
    /// # Returns
    /// `Err(SearchError::Exhausted)` if the sequence is already at its end marker.
    pub fn try_tail(mut self) -> Result<Self, SearchError>{
        match self.inner.next(){
            Some(_) => Ok(self),
            None => Err(SearchError::Exhausted)
        }
    }

    /// Lazily transforms every element with `f`.
    pub fn map<U: 'a, F>(self, f: F) -> Seq<'a, U>
    where
        F: FnMut(T) -> U + 'a
    {
        Seq::from_iter(self.inner.map(f))
    }

    /// Materializes at most the first `n` elements.
    ///
    /// Safe on infinite sequences; intended for diagnostics.
    pub fn prefix(self, n: usize) -> Vec<T>{
        self.inner.take(n).collect()
    }

    /// Materializes the whole sequence.
    ///
    /// Never terminates on an infinite sequence.
    pub fn to_list(self) -> Vec<T>{
        self.inner.collect()
    }
}

impl<'a, T> Iterator for Seq<'a, T>{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T>{
        self.inner.next()
    }
}

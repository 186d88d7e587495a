//! Lazy game trees and the composable wrappers that reshape them.
//!
//! Every wrapper is an immutable view over the tree it wraps. Children are
//! built only when a consumer pulls them from `desc`, so an unbounded
//! `Unfold` costs nothing until it is explored, and a tree can be walked any
//! number of times by independent callers.

use std::{cmp::Reverse, sync::Arc};

use crate::{Polarity, Seq};

/// A node value with a lazily-produced sequence of subtrees.
///
/// Implementations must be pure: calling `node` or `desc` twice yields the
/// same values, and nothing is shared mutably between calls.
pub trait Tree: Sized{
    /// The value carried by each node.
    type Node;

    /// Returns the value at this node.
    fn node(&self) -> Self::Node;

    /// Returns the subtrees of this node, in exploration order.
    ///
    /// Each call returns a fresh sequence; no subtree is built before it is pulled.
    fn desc(&self) -> Seq<'_, Self>;

    /// Checks whether this node has no children.
    ///
    /// Forces at most the first child.
    #[inline]
    fn is_leaf(&self) -> bool{
        self.desc().is_end()
    }

    /// Materializes the immediate children of this node (not their subtrees).
    #[inline]
    fn children(&self) -> Vec<Self>{
        self.desc().to_list()
    }

    /// Maps every node value with `f`.
    #[inline]
    fn transform<U, F>(self, f: F) -> Transform<Self, F>
    where
        F: Fn(Self::Node) -> U
    {
        Transform::new(self, f)
    }

    /// Cuts the tree off `depth` plies below this node.
    #[inline]
    fn prune(self, depth: usize) -> Prune<Self>{
        Prune::new(self, depth)
    }

    /// Orders children best-first for a maximizer at this node.
    #[inline]
    fn reorder(self) -> Reorder<Self>{
        Reorder::new(self, Polarity::Maximize)
    }

    /// Orders children best-first for the side given by `polarity` at this node.
    #[inline]
    fn reorder_for(self, polarity: Polarity) -> Reorder<Self>{
        Reorder::new(self, polarity)
    }

    /// Keeps only the first `n` children at every node.
    #[inline]
    fn limit(self, n: usize) -> Limit<Self>{
        Limit::new(self, n)
    }

    /// Drops the first `n` children at every node.
    #[inline]
    fn skip(self, n: usize) -> Skip<Self>{
        Skip::new(self, n)
    }
}

/// Builds the game tree rooted at `seed`, expanding positions with `successors`.
///
/// # Parameters
/// - `seed`: The root position.
/// - `successors`: Maps a position to its next positions; an empty list marks a terminal node.
///
/// # Examples
/// ```rust
/// use lazy_minimax::{build, Tree};
/// let tree = build(0u8, |&n| if n < 3 { vec![n + 1] } else { vec![] });
/// assert_eq!(tree.node(), 0);
/// assert_eq!(tree.children()[0].node(), 1);
/// ```
#[inline]
pub fn build<S, F>(seed: S, successors: F) -> Unfold<S, F>
where
    S: Clone,
    F: Fn(&S) -> Vec<S>
{
    Unfold::new(seed, successors)
}

/// A tree generated from a seed and an expansion rule.
pub struct Unfold<S, F>{
    seed: S,
    expand: Arc<F>
}

impl<S, F> Unfold<S, F>{
    /// Creates the tree rooted at `seed`.
    #[inline]
    pub fn new(seed: S, expand: F) -> Self{
        Unfold { seed: seed, expand: Arc::new(expand) }
    }

    /// Gets a reference to the seed at this node.
    #[inline]
    pub fn seed(&self) -> &S{
        &self.seed
    }
}

impl<S, F> Tree for Unfold<S, F>
where
    S: Clone,
    F: Fn(&S) -> Vec<S>
{
    type Node = S;

    #[inline]
    fn node(&self) -> S{
        self.seed.clone()
    }

    fn desc(&self) -> Seq<'_, Self>{
        let expand = &self.expand;
        Seq::from_iter(
            (self.expand)(&self.seed)
                .into_iter()
                .map(move |seed| Unfold { seed: seed, expand: Arc::clone(expand) })
        )
    }
}

/// A view of a tree with every node value mapped.
pub struct Transform<Tr, F>{
    tree: Tr,
    f: Arc<F>
}

impl<Tr, F> Transform<Tr, F>{
    #[inline]
    pub fn new(tree: Tr, f: F) -> Self{
        Transform { tree: tree, f: Arc::new(f) }
    }
}

impl<Tr, F, U> Tree for Transform<Tr, F>
where
    Tr: Tree,
    F: Fn(Tr::Node) -> U
{
    type Node = U;

    #[inline]
    fn node(&self) -> U{
        (self.f)(self.tree.node())
    }

    fn desc(&self) -> Seq<'_, Self>{
        let f = &self.f;
        self.tree.desc().map(move |tree| Transform { tree: tree, f: Arc::clone(f) })
    }
}

/// A depth-bounded view of a tree.
///
/// Nodes at the horizon are presented as leaves, which forces a finite
/// search over an otherwise unbounded `Unfold`.
pub struct Prune<Tr>{
    tree: Tr,
    depth: usize
}

impl<Tr> Prune<Tr>{
    #[inline]
    pub fn new(tree: Tr, depth: usize) -> Self{
        Prune { tree: tree, depth: depth }
    }

    /// Returns the number of plies still visible below this node.
    #[inline]
    pub fn depth(&self) -> usize{
        self.depth
    }
}

impl<Tr: Tree> Tree for Prune<Tr>{
    type Node = Tr::Node;

    #[inline]
    fn node(&self) -> Tr::Node{
        self.tree.node()
    }

    fn desc(&self) -> Seq<'_, Self>{
        if self.depth == 0{
            return Seq::end();
        }

        let depth = self.depth - 1;
        self.tree.desc().map(move |tree| Prune { tree: tree, depth: depth })
    }
}

/// A view of a tree with children sorted best-first for the side to move.
///
/// At a `Maximize` node children are sorted by descending node value, at a
/// `Minimize` node by ascending value, and polarity alternates every ply.
/// Sorting materializes the immediate children only; their subtrees stay
/// lazy. Ties keep the order of the wrapped tree.
pub struct Reorder<Tr>{
    tree: Tr,
    polarity: Polarity
}

impl<Tr> Reorder<Tr>{
    #[inline]
    pub fn new(tree: Tr, polarity: Polarity) -> Self{
        Reorder { tree: tree, polarity: polarity }
    }

    #[inline]
    pub fn polarity(&self) -> Polarity{
        self.polarity
    }
}

impl<Tr> Tree for Reorder<Tr>
where
    Tr: Tree,
    Tr::Node: Ord
{
    type Node = Tr::Node;

    #[inline]
    fn node(&self) -> Tr::Node{
        self.tree.node()
    }

    fn desc(&self) -> Seq<'_, Self>{
        let below = self.polarity.flip();
        let mut children: Vec<Self> = self.tree.desc()
            .map(move |tree| Reorder { tree: tree, polarity: below })
            .to_list();

        match self.polarity{
            Polarity::Maximize => children.sort_by_cached_key(|child| Reverse(child.node())),
            Polarity::Minimize => children.sort_by_cached_key(|child| child.node())
        }

        Seq::from_vec(children)
    }
}

/// A view of a tree keeping only the first `n` children of every node.
///
/// Bounds the branching factor, and with it the work done per node. Placed
/// after a `Reorder`, it keeps the `n` most promising moves.
pub struct Limit<Tr>{
    tree: Tr,
    n: usize
}

impl<Tr> Limit<Tr>{
    #[inline]
    pub fn new(tree: Tr, n: usize) -> Self{
        Limit { tree: tree, n: n }
    }
}

impl<Tr: Tree> Tree for Limit<Tr>{
    type Node = Tr::Node;

    #[inline]
    fn node(&self) -> Tr::Node{
        self.tree.node()
    }

    fn desc(&self) -> Seq<'_, Self>{
        let n = self.n;
        Seq::from_iter(
            self.tree.desc()
                .take(n)
                .map(move |tree| Limit { tree: tree, n: n })
        )
    }
}

/// A view of a tree with the first `n` children of every node dropped.
pub struct Skip<Tr>{
    tree: Tr,
    n: usize
}

impl<Tr> Skip<Tr>{
    #[inline]
    pub fn new(tree: Tr, n: usize) -> Self{
        Skip { tree: tree, n: n }
    }
}

impl<Tr: Tree> Tree for Skip<Tr>{
    type Node = Tr::Node;

    #[inline]
    fn node(&self) -> Tr::Node{
        self.tree.node()
    }

    fn desc(&self) -> Seq<'_, Self>{
        let n = self.n;
        Seq::from_iter(
            self.tree.desc()
                .skip(n)
                .map(move |tree| Skip { tree: tree, n: n })
        )
    }
}

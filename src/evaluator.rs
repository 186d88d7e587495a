//! Decomposed minimax with lazy omission.
//!
//! `maxi(tree)` yields one value per child of `tree`: the minimum of that
//! child's own decomposition `mini(child)`. The maximum of the whole
//! sequence is the minimax value of `tree`, and `mini` is the mirror image.
//! Both halves are one routine, `Decomposed`, parameterized by `Polarity`.
//!
//! Omission keeps a running potential, the best value yielded so far. A
//! later child's decomposition is pulled one element at a time, and as soon
//! as an element shows the child cannot beat the potential the rest of it
//! is abandoned. Because those elements are produced lazily, abandoning
//! them means the subtrees behind them are never evaluated. This gives the
//! cutoffs of alpha-beta without threading any bounds through the search.
//!
//! Every function here must only be used on trees of finite depth, for
//! example behind a `Prune`. On an unbounded tree it does not terminate.

use crate::{Polarity, Seq, Tree};

enum Stage<'a, Tr: Tree>{
    /// A node without children, yielding its own value once.
    Leaf(Option<&'a Tr>),
    /// A node with children, yielding at most one value per child.
    Branch{
        children: Seq<'a, Tr>,
        potential: Option<Tr::Node>
    }
}

/// The decomposed value sequence of a tree for one side.
///
/// The sequence is lazy: each call to `next` evaluates just enough of the
/// next children to produce one value, and children that cannot improve on
/// the values already yielded produce nothing.
///
/// # Type Parameters
/// - `'a`: The lifetime of the borrowed tree.
/// - `Tr`: The tree type, whose node values must be totally ordered.
pub struct Decomposed<'a, Tr: Tree>{
    polarity: Polarity,
    omission: bool,
    stage: Stage<'a, Tr>
}

impl<'a, Tr> Decomposed<'a, Tr>
where
    Tr: Tree,
    Tr::Node: Ord + Clone
{
    /// Decomposes `tree` for the side given by `polarity`, with omission.
    ///
    /// # Parameters
    /// - `tree`: The tree to evaluate; must have finite depth.
    /// - `polarity`: The side choosing at the root of `tree`.
    ///
    /// # Returns
    /// A non-empty lazy sequence whose `polarity` extremum is the minimax value of `tree`.
    #[inline]
    pub fn new(tree: &'a Tr, polarity: Polarity) -> Self{
        Self::with_omission(tree, polarity, true)
    }

    /// Decomposes `tree` without omission: every child contributes its exact value.
    ///
    /// Returns the same extremum as `new` while evaluating every leaf.
    #[inline]
    pub fn exhaustive(tree: &'a Tr, polarity: Polarity) -> Self{
        Self::with_omission(tree, polarity, false)
    }

    fn with_omission(tree: &'a Tr, polarity: Polarity, omission: bool) -> Self{
        let mut children = tree.desc();
        let stage = if children.is_end(){
            Stage::Leaf(Some(tree))
        }
        else{
            Stage::Branch { children: children, potential: None }
        };

        Decomposed { polarity: polarity, omission: omission, stage: stage }
    }

    /// Returns the side this sequence is decomposed for.
    #[inline]
    pub fn polarity(&self) -> Polarity{
        self.polarity
    }

    /// Reduces the decomposition of `child` to its exact value, unless some
    /// element shows it cannot beat `potential` for the side above it.
    ///
    /// # Returns
    /// `None` when the child was omitted, otherwise its value.
    fn bounded(child: &Tr, polarity: Polarity, potential: &Tr::Node) -> Option<Tr::Node>{
        let inner = polarity.flip();
        let mut best: Option<Tr::Node> = None;

        for (pulled, value) in Decomposed::new(child, inner).enumerate(){
            if !polarity.prefers(&value, potential){
                log::trace!("{:?} omits a child after {} of its values", polarity, pulled + 1);
                return None;
            }
            best = Some(match best{
                Some(current) => inner.pick(current, value),
                None => value
            });
        }

        best
    }
}

impl<'a, Tr> Iterator for Decomposed<'a, Tr>
where
    Tr: Tree,
    Tr::Node: Ord + Clone
{
    type Item = Tr::Node;

    fn next(&mut self) -> Option<Tr::Node>{
        let polarity = self.polarity;
        let omission = self.omission;

        match &mut self.stage{
            Stage::Leaf(tree) => tree.take().map(|tree| tree.node()),
            Stage::Branch { children, potential } => {
                for child in children.by_ref(){
                    if !omission{
                        return Some(resolve(&child, polarity.flip(), false));
                    }

                    let value = match potential.as_ref(){
                        None => resolve(&child, polarity.flip(), true),
                        Some(bound) => match Self::bounded(&child, polarity, bound){
                            Some(value) => value,
                            None => continue
                        }
                    };

                    // only values strictly better than the potential get here
                    *potential = Some(value.clone());
                    return Some(value);
                }

                None
            }
        }
    }
}

fn resolve<Tr>(tree: &Tr, polarity: Polarity, omission: bool) -> Tr::Node
where
    Tr: Tree,
    Tr::Node: Ord + Clone
{
    polarity
        .extremum(Decomposed::with_omission(tree, polarity, omission))
        .expect("a decomposed sequence always yields at least one value")
}

/// Decomposes `tree` for a maximizer at its root.
#[inline]
pub fn maxi<Tr>(tree: &Tr) -> Decomposed<'_, Tr>
where
    Tr: Tree,
    Tr::Node: Ord + Clone
{
    Decomposed::new(tree, Polarity::Maximize)
}

/// Decomposes `tree` for a minimizer at its root.
#[inline]
pub fn mini<Tr>(tree: &Tr) -> Decomposed<'_, Tr>
where
    Tr: Tree,
    Tr::Node: Ord + Clone
{
    Decomposed::new(tree, Polarity::Minimize)
}

/// Computes the minimax value of `tree` for the side given by `polarity`, with omission.
///
/// # Parameters
/// - `tree`: The tree to evaluate; must have finite depth.
/// - `polarity`: The side choosing at the root.
///
/// # Returns
/// The game-theoretic value of the root, using leaf node values as scores.
#[inline]
pub fn value<Tr>(tree: &Tr, polarity: Polarity) -> Tr::Node
where
    Tr: Tree,
    Tr::Node: Ord + Clone
{
    resolve(tree, polarity, true)
}

/// Computes the minimax value of `tree` with the maximizer to move.
///
/// # Examples
/// ```rust
/// use lazy_minimax::maximize;
/// use lazy_minimax::test_utils::{synthetic, Synthetic};
/// // max(min(-1, 0), min(1, 1))
/// let root = synthetic(0, vec![
///     synthetic(0, vec![Synthetic::leaf(-1), Synthetic::leaf(0)]),
///     synthetic(0, vec![Synthetic::leaf(1), Synthetic::leaf(1)]),
/// ]);
/// assert_eq!(maximize(&Synthetic::tree(root)), 1);
/// ```
#[inline]
pub fn maximize<Tr>(tree: &Tr) -> Tr::Node
where
    Tr: Tree,
    Tr::Node: Ord + Clone
{
    value(tree, Polarity::Maximize)
}

/// Computes the minimax value of `tree` with the minimizer to move.
#[inline]
pub fn minimize<Tr>(tree: &Tr) -> Tr::Node
where
    Tr: Tree,
    Tr::Node: Ord + Clone
{
    value(tree, Polarity::Minimize)
}

/// Computes the minimax value of `tree` by plain recursion over every leaf.
///
/// Performs no omission and no laziness beyond what `desc` provides; used
/// as the reference the decomposed evaluator is checked against.
pub fn minimax<Tr>(tree: &Tr, polarity: Polarity) -> Tr::Node
where
    Tr: Tree,
    Tr::Node: Ord
{
    let below = polarity.flip();
    polarity
        .extremum(tree.desc().map(move |child| minimax(&child, below)))
        .unwrap_or_else(|| tree.node())
}

#[cfg(test)]
mod tests {
    use std::{sync::{atomic::{AtomicUsize, Ordering}, Arc}, thread};

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{build, test_utils::{random_tree, synthetic, Synthetic}};

    /// root -> [A, B]; A -> [-1, 0]; B -> [1, 1]
    fn fixture() -> Arc<Synthetic>{
        synthetic(0, vec![
            synthetic(0, vec![Synthetic::leaf(-1), Synthetic::leaf(0)]),
            synthetic(0, vec![Synthetic::leaf(1), Synthetic::leaf(1)]),
        ])
    }

    /// root -> [A, B]; A -> [3, 5]; B -> [2, 9, 9]
    fn cutoff_fixture() -> Arc<Synthetic>{
        synthetic(0, vec![
            synthetic(0, vec![Synthetic::leaf(3), Synthetic::leaf(5)]),
            synthetic(0, vec![Synthetic::leaf(2), Synthetic::leaf(9), Synthetic::leaf(9)]),
        ])
    }

    #[test]
    fn test_fixture(){
        let tree = Synthetic::tree(fixture());

        assert_eq!(maximize(&tree), 1);
        assert_eq!(minimize(&tree), 0);
        assert_eq!(minimax(&tree, Polarity::Maximize), 1);
    }

    #[test]
    fn test_leaf(){
        let tree = Synthetic::tree(Synthetic::leaf(4));

        assert_eq!(maxi(&tree).collect::<Vec<_>>(), vec![4]);
        assert_eq!(mini(&tree).collect::<Vec<_>>(), vec![4]);
        assert_eq!(maximize(&tree), 4);
        assert_eq!(minimize(&tree), 4);
    }

    #[test]
    fn test_decomposition(){
        let tree = Synthetic::tree(cutoff_fixture());

        // B is omitted as soon as its first leaf shows min(B) <= 3
        assert_eq!(maxi(&tree).collect::<Vec<_>>(), vec![3]);
        assert_eq!(Decomposed::exhaustive(&tree, Polarity::Maximize).collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(maxi(&tree).polarity(), Polarity::Maximize);
    }

    #[test]
    fn test_omission_reduces_evaluations(){
        let evaluations = AtomicUsize::new(0);
        let tree = build(cutoff_fixture(), |node: &Arc<Synthetic>| node.children.clone())
            .transform(|node| {
                evaluations.fetch_add(1, Ordering::SeqCst);
                node.value
            });

        assert_eq!(maximize(&tree), 3);
        let pruned = evaluations.swap(0, Ordering::SeqCst);

        assert_eq!(Polarity::Maximize.extremum(Decomposed::exhaustive(&tree, Polarity::Maximize)), Some(3));
        let unpruned = evaluations.swap(0, Ordering::SeqCst);

        assert_eq!(minimax(&tree, Polarity::Maximize), 3);
        let naive = evaluations.swap(0, Ordering::SeqCst);

        assert_eq!(pruned, 3);
        assert_eq!(unpruned, 5);
        assert_eq!(naive, 5);
    }

    #[test]
    fn test_decomposition_is_lazy(){
        let evaluations = AtomicUsize::new(0);
        let tree = build(cutoff_fixture(), |node: &Arc<Synthetic>| node.children.clone())
            .transform(|node| {
                evaluations.fetch_add(1, Ordering::SeqCst);
                node.value
            });

        let mut values = maxi(&tree);
        assert_eq!(evaluations.load(Ordering::SeqCst), 0);
        assert_eq!(values.next(), Some(3));
        assert_eq!(evaluations.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_matches_naive_minimax(){
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200{
            let tree = Synthetic::tree(random_tree(&mut rng, 5, 4));

            assert_eq!(maximize(&tree), minimax(&tree, Polarity::Maximize));
            assert_eq!(minimize(&tree), minimax(&tree, Polarity::Minimize));
        }
    }

    #[test]
    fn test_duality(){
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..100{
            let root = random_tree(&mut rng, 4, 3);
            let tree = Synthetic::tree(root.clone());
            let negated = Synthetic::tree(root).transform(|score| -score);

            assert_eq!(minimize(&negated), -maximize(&tree));
        }
    }

    #[test]
    fn test_reorder_preserves_value(){
        let mut rng = StdRng::seed_from_u64(23);

        for _ in 0..100{
            let root = random_tree(&mut rng, 5, 4);

            assert_eq!(maximize(&Synthetic::tree(root.clone()).reorder()), maximize(&Synthetic::tree(root.clone())));
            assert_eq!(
                minimize(&Synthetic::tree(root.clone()).reorder_for(Polarity::Minimize)),
                minimize(&Synthetic::tree(root))
            );
        }
    }

    #[test]
    fn test_omission_never_evaluates_more(){
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100{
            let root = random_tree(&mut rng, 5, 4);
            let evaluations = AtomicUsize::new(0);
            let tree = build(root, |node: &Arc<Synthetic>| node.children.clone())
                .transform(|node| {
                    evaluations.fetch_add(1, Ordering::SeqCst);
                    node.value
                });

            let pruned_value = maximize(&tree);
            let pruned = evaluations.swap(0, Ordering::SeqCst);
            let unpruned_value = Polarity::Maximize
                .extremum(Decomposed::exhaustive(&tree, Polarity::Maximize))
                .unwrap();
            let unpruned = evaluations.swap(0, Ordering::SeqCst);

            assert_eq!(pruned_value, unpruned_value);
            assert!(pruned <= unpruned);
        }
    }

    #[test]
    fn test_pruned_unbounded_tree(){
        // n -> [n - 1, n + 1] forever, scored by the position itself
        let tree = build(0i32, |&n| vec![n - 1, n + 1]).prune(4);

        assert_eq!(maximize(&tree), minimax(&tree, Polarity::Maximize));
        assert_eq!(maximize(&tree), 0);
    }

    #[test]
    fn test_concurrent_evaluation(){
        let mut rng = StdRng::seed_from_u64(5);
        let tree = Synthetic::tree(random_tree(&mut rng, 6, 3));
        let expected = minimax(&tree, Polarity::Maximize);

        thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| maximize(&tree))).collect();
            for handle in handles{
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}

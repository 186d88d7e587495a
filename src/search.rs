//! Configured searches over a `Game`.
//!
//! This module composes the lazy tree wrappers into the usual pipeline:
//! the game tree is unfolded from a seed, cut at a depth horizon, scored
//! with the game's heuristic, optionally ordered best-first and limited in
//! branching, and finally handed to the decomposed evaluator.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{build, evaluator, Game, Polarity, Score, SearchError, Tree};

/// Configuration parameters for a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig{
    /// Number of plies explored below the root.
    ///
    /// `None` searches the whole game tree; the caller then vouches that the
    /// game has no infinite line of play, otherwise the search never ends.
    pub depth: Option<usize>,
    /// Whether children are sorted best-first by their heuristic value
    /// before being evaluated. Ordering never changes the result, only how
    /// much of the tree omission can skip.
    pub ordered: bool,
    /// Maximum number of children explored per node, if any. With `ordered`,
    /// the most promising children are kept.
    pub branch_limit: Option<usize>,
    /// Whether the evaluator may omit children that cannot change the result.
    pub omission: bool
}

impl SearchConfig{
    /// The default search configuration.
    ///
    /// - `depth`: 9 plies, enough to solve tic-tac-toe from the empty board.
    /// - `ordered`: `true`.
    /// - `branch_limit`: `None`.
    /// - `omission`: `true`.
    pub const DEFAULT: SearchConfig = SearchConfig{
        depth: Some(9),
        ordered: true,
        branch_limit: None,
        omission: true
    };

    /// Checks that this configuration describes a meaningful search.
    ///
    /// # Returns
    /// `Err(SearchError::InvalidConfig { .. })` if `branch_limit` is zero,
    /// which would turn every root into a leaf.
    pub fn validate(&self) -> Result<(), SearchError>{
        if self.branch_limit == Some(0){
            return Err(SearchError::InvalidConfig { msg: "branch_limit must be at least 1" });
        }
        Ok(())
    }
}

impl Default for SearchConfig{
    fn default() -> Self{
        SearchConfig::DEFAULT
    }
}

/// The outcome of one search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchReport{
    /// The minimax value of the root.
    pub score: Score,
    /// Number of heuristic evaluations performed, including those made to
    /// order children.
    pub evaluations: usize
}

/// A configured minimax search over a game.
///
/// # Type Parameters
/// - `G`: The game type that implements the `Game` trait.
pub struct Search<G: Game>{
    game: G,
    config: SearchConfig
}

impl<G: Game> Search<G>{
    /// Creates a search with `SearchConfig::DEFAULT`.
    #[inline]
    pub fn new(game: G) -> Self{
        Search { game: game, config: SearchConfig::DEFAULT }
    }

    /// Creates a search with a custom configuration.
    ///
    /// # Returns
    /// `Err(SearchError::InvalidConfig { .. })` if the configuration is rejected.
    pub fn from_config(game: G, config: &SearchConfig) -> Result<Self, SearchError>{
        config.validate()?;
        Ok(Search { game: game, config: config.clone() })
    }

    #[inline]
    pub fn game(&self) -> &G{
        &self.game
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig{
        &self.config
    }

    /// Searches from `seed` with the maximizer to move.
    #[inline]
    pub fn maximize(&self, seed: G::State) -> SearchReport{
        self.search(seed, Polarity::Maximize)
    }

    /// Searches from `seed` with the minimizer to move.
    #[inline]
    pub fn minimize(&self, seed: G::State) -> SearchReport{
        self.search(seed, Polarity::Minimize)
    }

    /// Searches from `seed` with `polarity` to move.
    ///
    /// Each call builds its own tree and counter, so separate searches share
    /// no mutable state.
    ///
    /// # Examples
    /// ```rust
    /// use lazy_minimax::{Polarity, Search};
    /// use lazy_minimax::test_utils::{Board, TicTacToe};
    /// let search = Search::new(TicTacToe);
    /// // X completes the top row
    /// let report = search.search(Board::from_picture("XX.OO...."), Polarity::Maximize);
    /// assert_eq!(report.score, 1);
    /// ```
    pub fn search(&self, seed: G::State, polarity: Polarity) -> SearchReport{
        log::debug!(
            "searching {:?} to depth {:?} (ordered: {}, branch limit: {:?}, omission: {})",
            polarity, self.config.depth, self.config.ordered, self.config.branch_limit, self.config.omission
        );

        let evaluations = AtomicUsize::new(0);
        let game = &self.game;
        let tree = build(seed, |state| game.successors(state))
            .prune(self.config.depth.unwrap_or(usize::MAX))
            .transform(|state| {
                evaluations.fetch_add(1, Ordering::Relaxed);
                game.evaluate(&state)
            });

        let limit = self.config.branch_limit.unwrap_or(usize::MAX);
        let score = if self.config.ordered{
            self.evaluate(&tree.reorder_for(polarity).limit(limit), polarity)
        }
        else{
            self.evaluate(&tree.limit(limit), polarity)
        };

        let report = SearchReport { score: score, evaluations: evaluations.load(Ordering::Relaxed) };
        log::debug!("{:?} resolved to {} after {} evaluations", polarity, report.score, report.evaluations);
        report
    }

    fn evaluate<Tr: Tree<Node = Score>>(&self, tree: &Tr, polarity: Polarity) -> Score{
        if self.config.omission{
            evaluator::value(tree, polarity)
        }
        else{
            polarity
                .extremum(evaluator::Decomposed::exhaustive(tree, polarity))
                .expect("a decomposed sequence always yields at least one value")
        }
    }
}

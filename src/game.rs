//! Module defining the game collaborator contract and the score conventions used by the search.

/// Numeric value assigned to a position.
///
/// By convention the static heuristic returns `VICTORY` when the maximizer
/// has won, `DEFEAT` when the minimizer has won and `DRAW` otherwise.
pub type Score = i32;

/// Score of a position the maximizer has won.
pub const VICTORY: Score = 1;
/// Score of a position the minimizer has won.
pub const DEFEAT: Score = -1;
/// Score of a drawn or undecided position.
pub const DRAW: Score = 0;

/// Trait defining the rules a game must supply to be searched.
///
/// States are immutable values: every move produces a new state and nothing
/// is mutated in place. The search never validates states; a panic raised by
/// `successors` on a state it cannot interpret propagates to the caller
/// unmodified.
pub trait Game{
    /// The immutable representation of one position.
    type State: Clone;

    /// Returns the legal next states of `state`, in the order they should be explored.
    ///
    /// An empty list marks a terminal state. The order never affects the
    /// value of a search, only how much of the tree the evaluator can omit.
    ///
    /// # Examples
    /// ```rust
    /// use lazy_minimax::Game;
    /// use lazy_minimax::test_utils::{Board, TicTacToe};
    /// let game = TicTacToe;
    /// assert_eq!(game.successors(&Board::new()).len(), 9);
    /// ```
    fn successors(&self, state: &Self::State) -> Vec<Self::State>;

    /// Returns the static heuristic value of `state`.
    ///
    /// Expected to be exact at terminal states; the search does not enforce
    /// the `VICTORY`/`DEFEAT`/`DRAW` convention.
    fn evaluate(&self, state: &Self::State) -> Score;
}

/// Which side is choosing at a node: the maximizer or the minimizer.
///
/// Polarity flips on every ply, which lets the evaluator and the reordering
/// wrapper express their mutually recursive halves as one routine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity{
    Maximize,
    Minimize
}

impl Polarity{
    /// Returns the polarity of the opponent, one ply down.
    #[inline]
    pub fn flip(self) -> Self{
        match self{
            Polarity::Maximize => Polarity::Minimize,
            Polarity::Minimize => Polarity::Maximize
        }
    }

    /// Checks whether `candidate` is strictly better than `incumbent` for this side.
    #[inline]
    pub fn prefers<T: Ord>(self, candidate: &T, incumbent: &T) -> bool{
        match self{
            Polarity::Maximize => candidate > incumbent,
            Polarity::Minimize => candidate < incumbent
        }
    }

    /// Returns whichever of `a` and `b` this side would choose.
    #[inline]
    pub fn pick<T: Ord>(self, a: T, b: T) -> T{
        match self{
            Polarity::Maximize => a.max(b),
            Polarity::Minimize => a.min(b)
        }
    }

    /// Reduces `values` to the extremum this side would choose.
    ///
    /// # Returns
    /// `None` if `values` is empty.
    pub fn extremum<T: Ord, I: IntoIterator<Item = T>>(self, values: I) -> Option<T>{
        values.into_iter().reduce(|a, b| self.pick(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip(){
        assert_eq!(Polarity::Maximize.flip(), Polarity::Minimize);
        assert_eq!(Polarity::Minimize.flip(), Polarity::Maximize);
        assert_eq!(Polarity::Maximize.flip().flip(), Polarity::Maximize);
    }

    #[test]
    fn test_prefers_is_strict(){
        assert!(Polarity::Maximize.prefers(&2, &1));
        assert!(!Polarity::Maximize.prefers(&1, &1));
        assert!(Polarity::Minimize.prefers(&-1, &0));
        assert!(!Polarity::Minimize.prefers(&0, &0));
    }

    #[test]
    fn test_extremum(){
        assert_eq!(Polarity::Maximize.extremum(vec![3, -2, 7, 0]), Some(7));
        assert_eq!(Polarity::Minimize.extremum(vec![3, -2, 7, 0]), Some(-2));
        assert_eq!(Polarity::Minimize.extremum(Vec::<Score>::new()), None);
    }
}

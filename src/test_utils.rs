//! Test utilities: a tic-tac-toe game and hand-built synthetic trees

use std::sync::Arc;

use rand::{rngs::StdRng, Rng};

use crate::{build, Game, Score, Transform, Tree, Unfold, DEFEAT, DRAW, VICTORY};

/// A player mark on the tic-tac-toe board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark{
    X,
    O
}

/// The eight winning lines, as cell indices.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8],
    [0, 3, 6], [1, 4, 7], [2, 5, 8],
    [0, 4, 8], [2, 4, 6]
];

/// A tic-tac-toe position; cells are numbered row by row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Board{
    cells: [Option<Mark>; 9]
}

impl Board{
    pub fn new() -> Self{
        Board::default()
    }

    /// Builds a board from a 9-character picture using `X`, `O` and any other character for empty.
    pub fn from_picture(picture: &str) -> Self{
        let mut cells = [None; 9];
        for (cell, c) in cells.iter_mut().zip(picture.chars()){
            *cell = match c{
                'X' => Some(Mark::X),
                'O' => Some(Mark::O),
                _ => None
            };
        }
        Board { cells: cells }
    }

    /// Returns the mark to play; X always moves first.
    pub fn to_move(&self) -> Mark{
        let placed = self.cells.iter().filter(|cell| cell.is_some()).count();
        if placed % 2 == 0 { Mark::X } else { Mark::O }
    }

    pub fn winner(&self) -> Option<Mark>{
        LINES.iter().find_map(|&[a, b, c]| {
            match (self.cells[a], self.cells[b], self.cells[c]){
                (Some(x), Some(y), Some(z)) if x == y && y == z => Some(x),
                _ => None
            }
        })
    }

    /// Returns the board with `index` marked by the player to move.
    pub fn play(&self, index: usize) -> Self{
        let mut next = *self;
        next.cells[index] = Some(self.to_move());
        next
    }
}

/// Tic-tac-toe with X as the maximizer.
pub struct TicTacToe;

impl Game for TicTacToe{
    type State = Board;

    fn successors(&self, state: &Board) -> Vec<Board>{
        if state.winner().is_some(){
            return Vec::new();
        }

        (0..9)
            .filter(|&index| state.cells[index].is_none())
            .map(|index| state.play(index))
            .collect()
    }

    fn evaluate(&self, state: &Board) -> Score{
        match state.winner(){
            Some(Mark::X) => VICTORY,
            Some(Mark::O) => DEFEAT,
            None => DRAW
        }
    }
}

/// A hand-built tree node with an explicit score and children.
#[derive(Debug)]
pub struct Synthetic{
    pub value: Score,
    pub children: Vec<Arc<Synthetic>>
}

/// The lazy view of a `Synthetic` tree, scored by each node's `value`.
pub type SyntheticTree = Transform<
    Unfold<Arc<Synthetic>, fn(&Arc<Synthetic>) -> Vec<Arc<Synthetic>>>,
    fn(Arc<Synthetic>) -> Score
>;

impl Synthetic{
    pub fn leaf(value: Score) -> Arc<Synthetic>{
        synthetic(value, Vec::new())
    }

    fn expand(node: &Arc<Synthetic>) -> Vec<Arc<Synthetic>>{
        node.children.clone()
    }

    fn score(node: Arc<Synthetic>) -> Score{
        node.value
    }

    /// Wraps `root` as a lazy tree whose node values are the synthetic scores.
    pub fn tree(root: Arc<Synthetic>) -> SyntheticTree{
        let expand: fn(&Arc<Synthetic>) -> Vec<Arc<Synthetic>> = Synthetic::expand;
        let score: fn(Arc<Synthetic>) -> Score = Synthetic::score;
        build(root, expand).transform(score)
    }
}

/// Creates an interior node.
pub fn synthetic(value: Score, children: Vec<Arc<Synthetic>>) -> Arc<Synthetic>{
    Arc::new(Synthetic { value: value, children: children })
}

/// Generates a random tree of at most `depth` plies.
///
/// Every interior node has between 1 and `branching` children, and nodes
/// stop early with probability 1/4. Scores are drawn from `-5..=5` at every
/// node, so interior values exercise `Reorder`.
pub fn random_tree(rng: &mut StdRng, depth: usize, branching: usize) -> Arc<Synthetic>{
    let value = rng.random_range(-5..=5);

    if depth == 0 || rng.random_range(0..4) == 0{
        return Synthetic::leaf(value);
    }

    let count = rng.random_range(1..=branching);
    let children = (0..count).map(|_| random_tree(rng, depth - 1, branching)).collect();
    synthetic(value, children)
}

/// Counts the nodes of `tree` that are visible through `desc`.
pub fn count_nodes<Tr: Tree>(tree: &Tr) -> usize{
    1 + tree.desc().map(|child| count_nodes(&child)).sum::<usize>()
}

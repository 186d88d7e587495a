//! A Rust library providing lazily-evaluated game trees and a decomposed
//! minimax evaluator.
//!
//! Game trees are built on demand from a seed position and a successor
//! function, then reshaped by composable wrappers. The evaluator computes
//! the minimax value through two mutually recursive value sequences, and
//! prunes them by simply not asking for values that cannot change the
//! result. This is the lazy counterpart of alpha-beta pruning.
//!
//! # Modules
//! - `sequence`: Demand-driven sequences with an explicit end marker.
//! - `tree`: The `Tree` trait and its wrappers (`Unfold`, `Transform`, `Prune`,
//!           `Reorder`, `Limit`, `Skip`).
//! - `game`: The `Game` trait the rules of a game implement, and score conventions.
//! - `evaluator`: Decomposed minimax with omission, and a naive reference minimax.
//! - `search`: Configured searches composing the above for a `Game`.
//! - `test_utils`: Tic-tac-toe and synthetic trees for testing.
//!
//! # Examples
//! ```rust
//! use lazy_minimax::{build, maximize, Tree};
//!
//! // From n, move to n + 1 or n + 2; positions from 4 on are terminal.
//! let tree = build(0u32, |&n| if n >= 4 { vec![] } else { vec![n + 1, n + 2] })
//!     .prune(3)
//!     .transform(|n| n as i32)
//!     .reorder();
//!
//! assert_eq!(maximize(&tree), 4);
//! ```
//!
//! The evaluator must only see trees of finite depth: wrap unbounded
//! games in `prune` before evaluating them.

mod error;
mod sequence;
mod tree;
mod game;
mod evaluator;
mod search;

#[doc(hidden)]
pub mod test_utils;

pub use error::*;
pub use sequence::*;
pub use tree::*;
pub use game::*;
pub use evaluator::*;
pub use search::*;

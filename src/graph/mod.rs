//! Graph data structures and generators.
//!
//! A [`Graph`] stores one position per node and one flag per unordered node
//! pair in a condensed edge matrix, giving O(1) edge lookup and flat
//! O(N²) traversal without per-node allocation.

mod edge;
mod engine;
pub mod generate;

pub use edge::{EdgeMatrix, Pair, PairIter, checked_pair_count, condensed_index, pair_count};
pub use engine::Graph;

//! Condensed adjacency storage for undirected graphs.
//!
//! One flag per unordered node pair, stored as the lower triangle of the
//! adjacency matrix without its diagonal. The pair `(i, j)` with `i > j`
//! lives at `i * (i - 1) / 2 + j`, so walking `from in 1..n, to in 0..from`
//! visits the flags in storage order.

use crate::error::{LayoutError, LayoutResult};

/// Index of the unordered pair `{i, j}` in a condensed matrix.
///
/// Callers must ensure `i != j`.
#[inline]
pub fn condensed_index(i: usize, j: usize) -> usize {
    debug_assert_ne!(i, j, "the diagonal is not stored");
    let (hi, lo) = if i > j { (i, j) } else { (j, i) };
    hi * (hi - 1) / 2 + lo
}

/// Number of unordered pairs among `node_count` nodes.
///
/// Assumes the count fits in `usize`; use [`checked_pair_count`] for
/// untrusted sizes.
#[inline]
pub fn pair_count(node_count: usize) -> usize {
    node_count * node_count.saturating_sub(1) / 2
}

/// Like [`pair_count`], `None` if `n(n-1)` overflows `usize`.
#[inline]
pub fn checked_pair_count(node_count: usize) -> Option<usize> {
    node_count
        .checked_mul(node_count.saturating_sub(1))
        .map(|twice| twice / 2)
}

/// Symmetric boolean edge matrix in condensed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMatrix {
    node_count: usize,
    flags: Vec<bool>,
}

impl EdgeMatrix {
    /// Create a matrix with no edges.
    ///
    /// Fails with [`LayoutError::GraphTooLarge`] when the pair count does not
    /// fit in `usize`, which on wasm32 starts at 65 537 nodes.
    pub fn new(node_count: usize) -> LayoutResult<Self> {
        let pairs =
            checked_pair_count(node_count).ok_or(LayoutError::GraphTooLarge { node_count })?;
        Ok(Self {
            node_count,
            flags: vec![false; pairs],
        })
    }

    /// Number of nodes the matrix was sized for.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of stored pairs, `n(n-1)/2`.
    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Check if there are no pairs, i.e. fewer than two nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Whether `i` and `j` are connected. Always false for `i == j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> bool {
        self.check(i, j);
        i != j && self.flags[condensed_index(i, j)]
    }

    /// Connect or disconnect `i` and `j`. Ignored for `i == j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: bool) {
        self.check(i, j);
        if i != j {
            self.flags[condensed_index(i, j)] = value;
        }
    }

    /// Flag at a condensed index, as yielded by [`PairIter`].
    #[inline]
    pub fn get_condensed(&self, index: usize) -> bool {
        self.flags[index]
    }

    /// Number of connected pairs.
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&connected| connected).count()
    }

    /// All unordered pairs in storage order.
    pub fn pairs(&self) -> PairIter {
        PairIter::new(self.node_count)
    }

    fn check(&self, i: usize, j: usize) {
        assert!(
            i < self.node_count && j < self.node_count,
            "node pair ({i}, {j}) out of range for {} nodes",
            self.node_count
        );
    }
}

/// One unordered node pair with `from > to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    pub from: usize,
    pub to: usize,
    /// Position of this pair in the condensed matrix.
    pub index: usize,
}

/// Iterator over `from in 1..n, to in 0..from`.
#[derive(Debug, Clone)]
pub struct PairIter {
    node_count: usize,
    from: usize,
    to: usize,
    index: usize,
}

impl PairIter {
    /// Iterate the pairs of a `node_count`-node graph.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            from: 1,
            to: 0,
            index: 0,
        }
    }
}

impl Iterator for PairIter {
    type Item = Pair;

    fn next(&mut self) -> Option<Pair> {
        if self.from >= self.node_count {
            return None;
        }
        let pair = Pair {
            from: self.from,
            to: self.to,
            index: self.index,
        };
        self.index += 1;
        self.to += 1;
        if self.to == self.from {
            self.from += 1;
            self.to = 0;
        }
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = pair_count(self.node_count).saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PairIter {}

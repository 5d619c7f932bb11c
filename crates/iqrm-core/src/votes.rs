//! Directed vote graph.
//!
//! A large lagged difference at `i` relative to its neighbour `j` is read as
//! "`j` accuses `i` of being anomalously larger". Votes point from the
//! neighbour compared against to the candidate outlier. The graph is an
//! arena of ordered sets indexed by position, rebuilt on every run.

use std::collections::{BTreeMap, BTreeSet};

use iqrm_math::{lagged_neighbour, outlier_mask, shifted_diff};
use tracing::debug;

/// Snapshot of accusations: accuser → accused positions.
pub type VoteMap = BTreeMap<usize, BTreeSet<usize>>;

static NO_VOTES: BTreeSet<usize> = BTreeSet::new();

/// Votes cast and received by every position of a signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteGraph {
    cast: Vec<BTreeSet<usize>>,
    received: Vec<BTreeSet<usize>>,
}

impl VoteGraph {
    /// Empty graph over positions `0..n`.
    pub fn new(n: usize) -> Self {
        Self {
            cast: vec![BTreeSet::new(); n],
            received: vec![BTreeSet::new(); n],
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.cast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cast.is_empty()
    }

    /// Record that `accuser` votes against `accused`.
    ///
    /// Self-votes and out-of-range positions are not recorded. Returns true
    /// when a new edge was added.
    pub fn add_vote(&mut self, accuser: usize, accused: usize) -> bool {
        let n = self.len();
        if accuser == accused || accuser >= n || accused >= n {
            return false;
        }
        let added = self.cast[accuser].insert(accused);
        self.received[accused].insert(accuser);
        added
    }

    /// Record a batch of `(accuser, accused)` edges.
    pub fn extend_votes(&mut self, edges: &[(usize, usize)]) {
        for &(accuser, accused) in edges {
            self.add_vote(accuser, accused);
        }
    }

    /// Make `c` cast and receive a vote from every other position.
    ///
    /// Only `c`'s own sets are overwritten; the other positions' sets are
    /// left as they are, so `c`'s accusations never raise anyone's
    /// received count.
    pub fn connect_fully(&mut self, c: usize) {
        let n = self.len();
        if c >= n {
            return;
        }
        let others: BTreeSet<usize> = (0..n).filter(|&i| i != c).collect();
        self.received[c] = others.clone();
        self.cast[c] = others;
    }

    /// Positions accused by `j`.
    pub fn votes_cast(&self, j: usize) -> &BTreeSet<usize> {
        self.cast.get(j).unwrap_or(&NO_VOTES)
    }

    /// Positions accusing `i`.
    pub fn votes_received(&self, i: usize) -> &BTreeSet<usize> {
        self.received.get(i).unwrap_or(&NO_VOTES)
    }

    /// Positions that received at least one vote, with their accusers.
    pub fn accused(&self) -> impl Iterator<Item = (usize, &BTreeSet<usize>)> {
        self.received
            .iter()
            .enumerate()
            .filter(|(_, accusers)| !accusers.is_empty())
    }

    /// Total number of recorded accusations (outgoing edges).
    pub fn edge_count(&self) -> usize {
        self.cast.iter().map(BTreeSet::len).sum()
    }

    /// Copy of the outgoing votes, keyed by positions that cast any.
    pub fn cast_snapshot(&self) -> VoteMap {
        snapshot(&self.cast)
    }

    /// Copy of the incoming votes, keyed by positions that received any.
    pub fn received_snapshot(&self) -> VoteMap {
        snapshot(&self.received)
    }
}

fn snapshot(sets: &[BTreeSet<usize>]) -> VoteMap {
    sets.iter()
        .enumerate()
        .filter(|(_, s)| !s.is_empty())
        .map(|(i, s)| (i, s.clone()))
        .collect()
}

/// Accusations produced by a single lag, as `(accuser, accused)` pairs.
///
/// Edges whose clamped neighbour is the position itself are skipped.
pub fn lag_votes(x: &[f64], lag: isize, threshold: f64) -> Vec<(usize, usize)> {
    let n = x.len();
    let diff = shifted_diff(x, lag);
    let edges: Vec<(usize, usize)> = outlier_mask(&diff, threshold)
        .iter()
        .enumerate()
        .filter(|&(_, &flagged)| flagged)
        .map(|(i, _)| (lagged_neighbour(i, lag, n), i))
        .filter(|&(j, i)| j != i)
        .collect();
    debug!(lag, edges = edges.len(), "lag probed");
    edges
}

/// Probe every lag and accumulate the resulting votes.
pub fn build_votes(x: &[f64], lags: &[isize], threshold: f64) -> VoteGraph {
    let per_lag = collect_lag_votes(x, lags, threshold);
    let mut graph = VoteGraph::new(x.len());
    // Merged in schedule order; set union makes the order irrelevant anyway.
    for edges in &per_lag {
        graph.extend_votes(edges);
    }
    graph
}

#[cfg(not(feature = "parallel"))]
fn collect_lag_votes(x: &[f64], lags: &[isize], threshold: f64) -> Vec<Vec<(usize, usize)>> {
    lags.iter().map(|&lag| lag_votes(x, lag, threshold)).collect()
}

#[cfg(feature = "parallel")]
fn collect_lag_votes(x: &[f64], lags: &[isize], threshold: f64) -> Vec<Vec<(usize, usize)>> {
    use rayon::prelude::*;

    lags.par_iter()
        .map(|&lag| lag_votes(x, lag, threshold))
        .collect()
}

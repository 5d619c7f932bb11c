//! Mask arbitration over the vote graph.
//!
//! Position `i` is flagged when at least one of its accusers is credible: an
//! accuser `j` whose total outgoing vote count is strictly smaller than
//! `i`'s total incoming count. A position that accuses many others is likely
//! anomalous itself, so its individual accusations are discounted.

use crate::votes::VoteGraph;

/// Inject known-bad positions as maximally connected vertices.
///
/// Each ignored position casts and receives a vote from every other
/// position, so it is always flagged and its own accusations can never
/// outweigh a genuinely good neighbour. Out-of-range entries are skipped;
/// the engine validates them beforehand.
pub fn apply_ignore(graph: &mut VoteGraph, ignore: &[usize]) {
    for &c in ignore {
        graph.connect_fully(c);
    }
}

/// Resolve the vote graph into a mask (`true` = contaminated).
///
/// Positions that never received a vote stay unflagged. O(E).
pub fn resolve(graph: &VoteGraph) -> Vec<bool> {
    let mut mask = vec![false; graph.len()];
    for (i, accusers) in graph.accused() {
        let strength = accusers.len();
        mask[i] = accusers
            .iter()
            .any(|&j| graph.votes_cast(j).len() < strength);
    }
    mask
}

/// Inject `ignore`, arbitrate, and force ignored positions into the mask.
///
/// The comparative rule alone cannot flag an ignored position when it has
/// no credible accuser (a single-element signal, or every position
/// ignored); forcing keeps the known-bad guarantee unconditional.
pub fn arbitrate(graph: &mut VoteGraph, ignore: &[usize]) -> Vec<bool> {
    apply_ignore(graph, ignore);
    let mut mask = resolve(graph);
    for &c in ignore {
        if let Some(flag) = mask.get_mut(c) {
            *flag = true;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolated_accusation_is_not_enough() {
        // 0 → 1 only: cast(0) = 1, received(1) = 1, not strictly smaller.
        let mut g = VoteGraph::new(3);
        g.add_vote(0, 1);
        assert_eq!(resolve(&g), vec![false, false, false]);
    }

    #[test]
    fn two_quiet_accusers_flag_the_target() {
        let mut g = VoteGraph::new(3);
        g.add_vote(0, 1);
        g.add_vote(2, 1);
        assert_eq!(resolve(&g), vec![false, true, false]);
    }

    #[test]
    fn noisy_accuser_is_discounted() {
        // 0 accuses everyone; 1 receives only from 0 and from 4.
        let mut g = VoteGraph::new(5);
        for i in 1..5 {
            g.add_vote(0, i);
        }
        g.add_vote(4, 1);
        g.add_vote(4, 2);
        g.add_vote(4, 3);
        let mask = resolve(&g);
        // received(1) = {0, 4} = 2; cast(0) = 4, cast(4) = 3: nobody credible.
        assert!(!mask[1]);
        assert!(!mask[0]);
    }

    #[test]
    fn ignored_position_is_flagged_without_flagging_neighbours() {
        let mut g = VoteGraph::new(6);
        let mask = arbitrate(&mut g, &[2]);
        assert_eq!(mask, vec![false, false, true, false, false, false]);
        assert_eq!(g.votes_cast(2).len(), 5);
    }

    #[test]
    fn ignored_accuser_cannot_flag_a_good_neighbour() {
        let mut g = VoteGraph::new(6);
        g.add_vote(2, 3);
        g.add_vote(4, 3);
        // Before injection 3 has two quiet accusers.
        assert!(resolve(&g)[3]);
        let mask = arbitrate(&mut g, &[2, 4]);
        assert!(!mask[3]);
        assert!(mask[2] && mask[4]);
    }

    #[test]
    fn single_element_ignore_is_forced() {
        let mut g = VoteGraph::new(1);
        assert_eq!(arbitrate(&mut g, &[0]), vec![true]);
    }

    #[test]
    fn every_position_ignored() {
        let mut g = VoteGraph::new(3);
        assert_eq!(arbitrate(&mut g, &[0, 1, 2]), vec![true, true, true]);
    }

    #[test]
    fn out_of_range_ignore_is_skipped() {
        let mut g = VoteGraph::new(2);
        assert_eq!(arbitrate(&mut g, &[5]), vec![false, false]);
    }
}

//! Candidate enumeration and symmetry reduction of cell signatures.
//!
//! Reducers keep the first member of every equivalence class in input
//! order, so a census is reproducible from its candidate list alone. The
//! symmetry group is picked from the signature length; signatures of an
//! unknown length are only compared for equality.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::shape::CellShape;
use crate::signature::{Signature, Slot};

const LINKED: [Slot; 2] = [Slot::Horizontal, Slot::Vertical];

/// All 3^4 signatures of the 2x2 cell, counting up from `0000`.
pub fn all_2x2() -> Vec<Signature> {
    all_signatures(CellShape::TwoByTwo.slot_count())
}

/// 2x3 signatures with exactly `k` links, each link in either orientation.
pub fn with_links(k: usize) -> Vec<Signature> {
    links_on(CellShape::TwoByThree.slot_count(), k)
}

/// Census input for `shape`: every signature, or only those with `links` links.
pub fn candidates(shape: CellShape, links: Option<usize>) -> Vec<Signature> {
    match links {
        Some(k) => links_on(shape.slot_count(), k),
        None => all_signatures(shape.slot_count()),
    }
}

fn all_signatures(len: usize) -> Vec<Signature> {
    let mut out = vec![Signature::empty(len)];
    let mut slots = vec![Slot::Empty; len];
    // Odometer over 0, 1, 2 with the last slot turning fastest.
    loop {
        let Some(pos) = slots.iter().rposition(|&s| s != Slot::Vertical) else {
            return out;
        };
        slots[pos] = match slots[pos] {
            Slot::Empty => Slot::Horizontal,
            _ => Slot::Vertical,
        };
        for s in &mut slots[pos + 1..] {
            *s = Slot::Empty;
        }
        out.push(Signature::new(slots.clone()));
    }
}

/// Positions in lexicographic order, then orientations with horizontal first.
fn links_on(len: usize, k: usize) -> Vec<Signature> {
    let mut out = Vec::new();
    let mut positions = Vec::with_capacity(k);
    choose(len, k, 0, &mut positions, &mut out);
    out
}

fn choose(len: usize, k: usize, from: usize, chosen: &mut Vec<usize>, out: &mut Vec<Signature>) {
    if chosen.len() == k {
        for mask in 0..1usize << k {
            let mut slots = vec![Slot::Empty; len];
            for (bit, &pos) in chosen.iter().enumerate() {
                slots[pos] = LINKED[(mask >> (k - 1 - bit)) & 1];
            }
            out.push(Signature::new(slots));
        }
        return;
    }
    for pos in from..len {
        chosen.push(pos);
        choose(len, k, pos + 1, chosen, out);
        chosen.pop();
    }
}

fn rotations(sig: &Signature) -> Vec<Signature> {
    match CellShape::for_len(sig.len()) {
        Some(shape) => shape.rotations(sig),
        None => vec![sig.clone()],
    }
}

fn reflections(sig: &Signature) -> Vec<Signature> {
    match CellShape::for_len(sig.len()) {
        Some(shape) => shape.reflections(sig),
        None => Vec::new(),
    }
}

/// Ordered list with constant-time membership.
#[derive(Default)]
struct Kept {
    order: Vec<Signature>,
    seen: HashSet<Signature>,
}

impl Kept {
    fn contains(&self, sig: &Signature) -> bool {
        self.seen.contains(sig)
    }

    fn push(&mut self, sig: Signature) {
        if self.seen.insert(sig.clone()) {
            self.order.push(sig);
        }
    }
}

/// Drops repeated candidates. Each new candidate brings its whole rotation
/// orbit along, so later rotations of it are dropped as well.
pub fn reduce_duplicates(candidates: &[Signature]) -> Vec<Signature> {
    let mut kept = Kept::default();
    for sig in candidates {
        if kept.contains(sig) {
            continue;
        }
        for turned in rotations(sig) {
            kept.push(turned);
        }
    }
    kept.order
}

/// Keeps the first member of every rotation orbit.
pub fn reduce_rotations(candidates: &[Signature]) -> Vec<Signature> {
    let mut kept = Kept::default();
    for sig in candidates {
        if rotations(sig).iter().any(|r| kept.contains(r)) {
            continue;
        }
        kept.push(sig.clone());
    }
    kept.order
}

/// Keeps a candidate unless it or a rotated mirror image of it was kept.
pub fn reduce_reflections(candidates: &[Signature]) -> Vec<Signature> {
    let mut kept = Kept::default();
    for sig in candidates {
        if kept.contains(sig) || reflections(sig).iter().any(|r| kept.contains(r)) {
            continue;
        }
        kept.push(sig.clone());
    }
    kept.order
}

/// Stage sizes and survivors of one census run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub shape: CellShape,
    pub candidates: usize,
    pub after_duplicates: usize,
    pub after_rotations: usize,
    pub survivors: Vec<Signature>,
}

impl Census {
    /// Runs the three reducers in order.
    pub fn run(shape: CellShape, candidates: &[Signature]) -> Self {
        let unique = reduce_duplicates(candidates);
        let unturned = reduce_rotations(&unique);
        let survivors = reduce_reflections(&unturned);
        debug!(
            %shape,
            candidates = candidates.len(),
            unique = unique.len(),
            rotations = unturned.len(),
            reflections = survivors.len(),
            "census reduced"
        );
        Self {
            shape,
            candidates: candidates.len(),
            after_duplicates: unique.len(),
            after_rotations: unturned.len(),
            survivors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Census, all_2x2, candidates, reduce_duplicates, reduce_reflections, reduce_rotations,
        with_links,
    };
    use crate::{CellShape, Signature};

    fn labels(sigs: &[Signature]) -> Vec<String> {
        sigs.iter().map(Signature::label).collect()
    }

    fn sigs(labels: &[&str]) -> Vec<Signature> {
        labels.iter().map(|l| l.parse().expect("valid label")).collect()
    }

    #[test]
    fn two_by_two_enumeration_counts_up() {
        let all = all_2x2();
        assert_eq!(all.len(), 81);
        assert_eq!(all[0].label(), "0000");
        assert_eq!(all[1].label(), "0001");
        assert_eq!(all[3].label(), "0010");
        assert_eq!(all[80].label(), "2222");
    }

    #[test]
    fn two_by_two_census() {
        let census = Census::run(CellShape::TwoByTwo, &all_2x2());
        assert_eq!(census.candidates, 81);
        assert_eq!(census.after_duplicates, 81);
        assert_eq!(census.after_rotations, 24);
        assert_eq!(census.survivors.len(), 21);
        assert_eq!(
            labels(&census.survivors[..8]),
            vec!["0000", "0001", "0002", "0011", "0012", "0021", "0110", "0111"]
        );
        assert!(labels(&census.survivors).contains(&"1122".to_string()));
    }

    #[test]
    fn link_candidates_come_in_both_orientations() {
        assert_eq!(
            labels(&with_links(1)[..4]),
            vec!["1000000", "2000000", "0100000", "0200000"]
        );
        assert_eq!(
            labels(&with_links(2)[..4]),
            vec!["1100000", "1200000", "2100000", "2200000"]
        );
        assert_eq!(with_links(0).len(), 1);
        assert_eq!(candidates(CellShape::TwoByThree, None).len(), 2187);
        assert_eq!(candidates(CellShape::TwoByTwo, Some(4)).len(), 16);
    }

    #[test]
    fn two_by_three_census_stages() {
        for (k, stages) in [(1, (14, 14, 8, 6)), (2, (84, 84, 45, 28)), (3, (280, 280, 146, 84))] {
            let census = Census::run(CellShape::TwoByThree, &with_links(k));
            assert_eq!(
                (
                    census.candidates,
                    census.after_duplicates,
                    census.after_rotations,
                    census.survivors.len()
                ),
                stages,
                "k = {k}"
            );
        }
        let census = Census::run(CellShape::TwoByThree, &with_links(1));
        assert_eq!(
            labels(&census.survivors),
            vec!["1000000", "2000000", "0010000", "0020000", "0000001", "0000002"]
        );
    }

    #[test]
    fn duplicates_pull_in_their_rotations() {
        let input = sigs(&["1000", "1000", "0200"]);
        assert_eq!(
            labels(&reduce_duplicates(&input)),
            vec!["1000", "0020", "0001", "0200"]
        );
    }

    #[test]
    fn rotation_and_reflection_keep_the_first_member() {
        let input = sigs(&["0020", "1000", "0010"]);
        assert_eq!(labels(&reduce_rotations(&input)), vec!["0020", "0010"]);

        let input = sigs(&["0100000", "1000000", "0010000"]);
        assert_eq!(
            labels(&reduce_reflections(&input)),
            vec!["0100000", "0010000"]
        );
    }

    #[test]
    fn unknown_lengths_only_drop_exact_repeats() {
        let input = sigs(&["12", "21", "12"]);
        assert_eq!(labels(&reduce_duplicates(&input)), vec!["12", "21"]);
        assert_eq!(labels(&reduce_reflections(&input)), vec!["12", "21"]);
    }
}

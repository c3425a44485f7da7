//! Alternative-configuration enumeration.
//!
//! The move engine supports at most two single shepherds, two single sheep
//! and one herd of each size. Raw inputs may declare more; this module
//! expands such a puzzle into every combinatorially valid reduced piece set
//! and the solver runs the search once per candidate, keeping the best.

use itertools::Itertools;

use crate::pieces::{
    PieceId, PieceKind, Roster, MAX_HERDS_PER_SIZE, MAX_SINGLE_SHEEP, MAX_SINGLE_SHEPHERDS,
};
use crate::puzzle::Puzzle;
use crate::state::{self, Slot};

/// One reduced piece set, re-indexed from zero so the search engine sees an
/// ordinary configuration.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub roster: Roster,
    pub start: Vec<Slot>,
}

/// A declared piece as a selection unit: one id for singles, all segment
/// ids for a herd.
type Unit = Vec<PieceId>;

fn units_of_kind(roster: &Roster, kind: PieceKind) -> Vec<Unit> {
    roster
        .iter()
        .filter(|(_, info)| info.kind == kind)
        .filter_map(|(id, info)| match &info.herd {
            None => Some(vec![id]),
            // A herd is one unit, claimed by its first segment.
            Some(herd) => (herd[0] == id).then(|| herd.iter().copied().collect()),
        })
        .collect()
}

fn limit_of(kind: PieceKind) -> usize {
    match kind {
        PieceKind::Shepherd => MAX_SINGLE_SHEPHERDS,
        PieceKind::Sheep => MAX_SINGLE_SHEEP,
        PieceKind::Herd2 | PieceKind::Herd3 => MAX_HERDS_PER_SIZE,
    }
}

/// Kept pieces must not reference excluded ones: a broken stack link means
/// the candidate describes a configuration that never existed. A kept herd
/// sharing a cell with a kept piece it is not stacked with is equally
/// impossible.
fn is_consistent(roster: &Roster, start: &[Slot], kept: &[PieceId]) -> bool {
    let kept_ok = kept.iter().all(|&id| {
        let slot = &start[id.0];
        slot.covers.is_none_or(|below| kept.contains(&below))
            && slot.covered_by.is_none_or(|above| kept.contains(&above))
    });
    if !kept_ok {
        return false;
    }

    kept.iter()
        .filter(|&&id| roster.info(id).herd.is_some())
        .all(|&member| {
            kept.iter()
                .filter(|&&other| other != member && roster.info(other).herd.is_none())
                .all(|&other| {
                    start[other.0].pos != start[member.0].pos
                        || state::pieces_above(start, member).contains(&other)
                        || state::pieces_under(start, member).contains(&other)
                })
        })
}

fn remap(roster: &Roster, start: &[Slot], kept: &[PieceId]) -> Candidate {
    // Consistency was checked before, so every referenced id is kept.
    let new_id = |old: PieceId| kept.iter().position(|&k| k == old).map(PieceId);

    let mut out = Roster::default();
    let mut slots = Vec::with_capacity(kept.len());
    for &old in kept {
        let mut info = roster.info(old).clone();
        if let Some(herd) = &mut info.herd {
            *herd = herd.iter().filter_map(|&id| new_id(id)).collect();
        }
        out.push(info);

        let mut slot = start[old.0];
        slot.covers = slot.covers.and_then(new_id);
        slot.covered_by = slot.covered_by.and_then(new_id);
        slots.push(slot);
    }
    Candidate { roster: out, start: slots }
}

/// Every reduced configuration of `puzzle` worth solving. A puzzle within
/// all per-kind limits yields exactly its own configuration.
pub fn candidates(puzzle: &Puzzle) -> Vec<Candidate> {
    const KINDS: [PieceKind; 4] = [
        PieceKind::Shepherd,
        PieceKind::Sheep,
        PieceKind::Herd2,
        PieceKind::Herd3,
    ];

    let units: Vec<Vec<Unit>> = KINDS
        .iter()
        .map(|&kind| units_of_kind(&puzzle.roster, kind))
        .collect();

    // Within limits there is nothing to choose; the raw set is searched
    // as declared.
    if units
        .iter()
        .zip(KINDS)
        .all(|(u, kind)| u.len() <= limit_of(kind))
    {
        return vec![Candidate {
            roster: puzzle.roster.clone(),
            start: puzzle.start.clone(),
        }];
    }

    // Per kind: either the one way of keeping everything, or every choice
    // of `limit` units out of the oversupply.
    let per_kind: Vec<Vec<Vec<Unit>>> = units
        .into_iter()
        .zip(KINDS)
        .map(|(u, kind)| {
            if u.len() <= limit_of(kind) {
                vec![u]
            } else {
                u.into_iter().combinations(limit_of(kind)).collect()
            }
        })
        .collect();

    per_kind
        .into_iter()
        .multi_cartesian_product()
        .filter_map(|selection| {
            let mut kept: Vec<PieceId> = selection.into_iter().flatten().flatten().collect();
            kept.sort();
            is_consistent(&puzzle.roster, &puzzle.start, &kept)
                .then(|| remap(&puzzle.roster, &puzzle.start, &kept))
        })
        .collect()
}

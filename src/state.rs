//! Search states: the mutable half of a configuration.
//!
//! A [`State`] owns one slot per roster piece (position plus stacking links)
//! and is immutable once built; every move clones the slots. The parent
//! chain exists only so a solution can be replayed, it is never mutated.

use std::rc::Rc;

use smallvec::SmallVec;

use crate::coord::Pos;
use crate::pieces::{HerdIds, PieceId, Roster};

/// A vertical run of stacked pieces (above or below some piece).
pub type IdChain = SmallVec<[PieceId; 4]>;

/// Dynamic state of one piece.
///
/// `covers`/`covered_by` are mutual inverses across the whole slot vector:
/// stacks are simple chains with exactly one exposed piece on top.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Slot {
    pub pos: Pos,
    /// Piece directly beneath this one, if stacked.
    pub covers: Option<PieceId>,
    /// Piece directly on top of this one, if stacked.
    pub covered_by: Option<PieceId>,
}

impl Slot {
    pub fn at(pos: Pos) -> Slot {
        Slot {
            pos,
            covers: None,
            covered_by: None,
        }
    }
}

/// One node of the search tree.
#[derive(Clone, Debug)]
pub struct State {
    pub step: u32,
    pub slots: Vec<Slot>,
    /// Human-readable move descriptors accumulated along the path.
    pub actions: Vec<String>,
    pub parent: Option<Rc<State>>,
}

impl State {
    pub fn initial(slots: Vec<Slot>) -> State {
        State {
            step: 0,
            slots,
            actions: Vec::new(),
            parent: None,
        }
    }

    #[inline]
    pub fn slot(&self, id: PieceId) -> &Slot {
        &self.slots[id.0]
    }

    /// Canonical identity of this configuration for memoization.
    ///
    /// Pieces are sorted by kind token, then by position string, and joined
    /// as `kind:coverer:x,y`. Herd membership and stack structure deeper
    /// than the immediate coverer are intentionally not part of the key.
    pub fn canonical_key(&self, roster: &Roster) -> String {
        let mut ids: Vec<PieceId> = (0..self.slots.len()).map(PieceId).collect();
        ids.sort_by(|&a, &b| {
            let ka = roster.info(a).kind.token();
            let kb = roster.info(b).kind.token();
            ka.cmp(kb)
                .then_with(|| self.slot(a).pos.to_string().cmp(&self.slot(b).pos.to_string()))
        });

        let mut key = String::with_capacity(self.slots.len() * 12);
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                key.push(',');
            }
            let slot = self.slot(id);
            key.push_str(roster.info(id).kind.token());
            key.push(':');
            if let Some(coverer) = slot.covered_by {
                key.push_str(&roster.info(coverer).name);
            }
            key.push(':');
            key.push_str(&slot.pos.to_string());
        }
        key
    }
}

/// Topmost piece occupying `pos`, skipping `ignore` entirely. A covered
/// piece counts as topmost when its coverer is ignored; that is how a mover
/// sees through its own stack while probing a slide.
pub fn top_piece_at(slots: &[Slot], pos: Pos, ignore: &[PieceId]) -> Option<PieceId> {
    slots.iter().enumerate().find_map(|(i, slot)| {
        let id = PieceId(i);
        let exposed = match slot.covered_by {
            None => true,
            Some(coverer) => ignore.contains(&coverer),
        };
        (slot.pos == pos && exposed && !ignore.contains(&id)).then_some(id)
    })
}

/// Every piece beneath `id`, nearest first.
pub fn pieces_under(slots: &[Slot], id: PieceId) -> IdChain {
    let mut out = IdChain::new();
    let mut cur = slots[id.0].covers;
    while let Some(below) = cur {
        out.push(below);
        cur = slots[below.0].covers;
    }
    out
}

/// Every piece on top of `id`, nearest first.
pub fn pieces_above(slots: &[Slot], id: PieceId) -> IdChain {
    let mut out = IdChain::new();
    let mut cur = slots[id.0].covered_by;
    while let Some(above) = cur {
        out.push(above);
        cur = slots[above.0].covered_by;
    }
    out
}

/// Herd membership of the first herd segment found underneath `id`, if any.
/// This is the moving set a shepherd standing on a herd drags along.
pub fn herd_under(slots: &[Slot], roster: &Roster, id: PieceId) -> Option<HerdIds> {
    pieces_under(slots, id)
        .into_iter()
        .find_map(|below| roster.info(below).herd.clone())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pieces::{PieceInfo, PieceKind};

    fn single(roster: &mut Roster, name: &str, letter: char, kind: PieceKind) -> PieceId {
        roster.push(PieceInfo {
            name: name.to_string(),
            letter,
            kind,
            herd: None,
        })
    }

    #[test]
    fn canonical_key_sorts_by_kind_then_position() {
        let mut roster = Roster::default();
        single(&mut roster, "WhiteA", 'A', PieceKind::Sheep);
        single(&mut roster, "BlackA", 'A', PieceKind::Shepherd);

        let state = State::initial(vec![Slot::at(Pos::new(3, 1)), Slot::at(Pos::new(0, 0))]);
        assert_eq!(state.canonical_key(&roster), "B::0,0,W::3,1");
    }

    #[test]
    fn canonical_key_names_the_coverer() {
        let mut roster = Roster::default();
        let sheep = single(&mut roster, "WhiteA", 'A', PieceKind::Sheep);
        let shepherd = single(&mut roster, "BlackA", 'A', PieceKind::Shepherd);

        let mut slots = vec![Slot::at(Pos::new(2, 2)), Slot::at(Pos::new(2, 2))];
        slots[sheep.0].covered_by = Some(shepherd);
        slots[shepherd.0].covers = Some(sheep);
        let state = State::initial(slots);

        assert_eq!(state.canonical_key(&roster), "B::2,2,W:BlackA:2,2");
    }

    #[test]
    fn stack_chains_walk_both_ways() {
        let mut roster = Roster::default();
        let bottom = single(&mut roster, "WhiteA", 'A', PieceKind::Sheep);
        let middle = single(&mut roster, "WhiteB", 'B', PieceKind::Sheep);
        let top = single(&mut roster, "BlackA", 'A', PieceKind::Shepherd);

        let mut slots = vec![Slot::at(Pos::ZERO); 3];
        slots[bottom.0].covered_by = Some(middle);
        slots[middle.0].covers = Some(bottom);
        slots[middle.0].covered_by = Some(top);
        slots[top.0].covers = Some(middle);

        assert_eq!(pieces_under(&slots, top).as_slice(), &[middle, bottom]);
        assert_eq!(pieces_above(&slots, bottom).as_slice(), &[middle, top]);
        assert_eq!(top_piece_at(&slots, Pos::ZERO, &[]), Some(top));
        assert_eq!(top_piece_at(&slots, Pos::ZERO, &[top]), Some(middle));
    }
}

//! Move generation: slide and jump outcomes, move application and command
//! chain reactions.
//!
//! Every function here is pure over a slot vector; applying a move always
//! yields a fresh vector. [`successors`] enumerates all legal follow-up
//! states of a configuration (every shepherd, every direction, jump and
//! slide) for the search driver.

use std::rc::Rc;

use itertools::Itertools;
use smallvec::{smallvec, SmallVec};

use crate::board::{Board, Tile};
use crate::coord::{Dir, Pos};
use crate::pieces::{PieceId, Roster};
use crate::puzzle::Mechanic;
use crate::state::{self, Slot, State};

/// Scratch set of piece ids touched by one move.
pub type IdSet = SmallVec<[PieceId; 8]>;

type PosSet = SmallVec<[Pos; 3]>;

/// Result of probing a slide.
///
/// `vector` is the net displacement (unwrapped), `None` when nothing moved.
/// `aborted` marks slides that must not happen at all: resting on a death
/// tile or wrapping back onto the start cell.
#[derive(Copy, Clone, Debug, Default)]
pub struct SlideOutcome {
    pub vector: Option<Pos>,
    pub on_command: bool,
    pub aborted: bool,
}

/// What occupies a cell from a mover's point of view: the topmost piece not
/// being ignored, else the bare tile.
#[derive(Copy, Clone, Debug)]
enum Cell {
    Tile(Tile),
    Piece,
}

fn cell_at(board: &Board, slots: &[Slot], pos: Pos, ignore: &[PieceId]) -> Cell {
    match state::top_piece_at(slots, pos, ignore) {
        Some(_) => Cell::Piece,
        None => Cell::Tile(board.tile_at(pos)),
    }
}

/// Slides may end on holes, commands and even death tiles (the death abort
/// fires after the step); never on bumps, void or another piece.
fn slide_target_open(cell: Cell) -> bool {
    matches!(
        cell,
        Cell::Tile(
            Tile::Floor
                | Tile::ShepherdGoal
                | Tile::SheepGoal
                | Tile::Hole
                | Tile::Command
                | Tile::Death
        )
    )
}

fn jumpable_over(cell: Cell) -> bool {
    matches!(cell, Cell::Piece | Cell::Tile(Tile::Bump))
}

/// Jump landings are judged by tile alone; landing on an occupied cell is
/// legal and creates a stack.
fn jump_landing_ok(tile: Tile) -> bool {
    matches!(
        tile,
        Tile::Floor | Tile::ShepherdGoal | Tile::SheepGoal | Tile::Bump | Tile::Hole | Tile::Command
    )
}

/// One step of a slide for the whole moving set.
///
/// The set is blocked when any origin sits on a bump, pinned when every
/// origin sits on a hole, and stopped by walls or occupied destinations.
/// Multi-cell sets also fail when a wall would separate two members'
/// destinations; their destination checks do not wrap across the seam.
fn can_slide_step(
    board: &Board,
    slots: &[Slot],
    from: &[Pos],
    dir: Dir,
    ignore: &[PieceId],
    dont_wrap: bool,
) -> bool {
    let all_holes = from.iter().all(|&p| board.tile_at(p) == Tile::Hole);
    let any_bump = from.iter().any(|&p| board.tile_at(p) == Tile::Bump);
    if all_holes || any_bump {
        return false;
    }

    from.iter().all(|&p| {
        let to = board.step(p, dir, !dont_wrap);
        if from.len() > 1
            && from
                .iter()
                .any(|&q| board.wall_between(board.step(q, dir, !dont_wrap), to))
        {
            return false;
        }
        !board.wall_between(p, to) && slide_target_open(cell_at(board, slots, to, ignore))
    })
}

/// Probe a slide of the piece at `from` (or of the whole `herd` when the
/// mover stands on one). Does not modify anything.
pub fn slide_vector(
    board: &Board,
    slots: &[Slot],
    from: Pos,
    dir: Dir,
    herd: Option<&[PieceId]>,
) -> SlideOutcome {
    let mut herd_poses: Option<PosSet> =
        herd.map(|ids| ids.iter().map(|&id| slots[id.0].pos).collect());

    // The mover's own stack and herd must not read as obstacles, in
    // particular when a wrap brings the slide back over its own column.
    let mut ignore = IdSet::new();
    if let Some(ids) = herd {
        for &id in ids {
            ignore.push(id);
            ignore.extend(state::pieces_above(slots, id));
        }
    }
    if let Some(top) = state::top_piece_at(slots, from, &[]) {
        ignore.push(top);
        ignore.extend(state::pieces_under(slots, top));
    }

    let on_command_at = |poses: &[Pos]| poses.iter().any(|&p| board.tile_at(p) == Tile::Command);

    let mut pos = from;
    let mut on_command = match &herd_poses {
        Some(hp) => on_command_at(hp),
        None => on_command_at(&[pos]),
    };
    let dont_wrap = herd_poses.is_some();

    let mut moved = false;
    let mut vector = Pos::ZERO;
    loop {
        let set: PosSet = match &herd_poses {
            Some(hp) => hp.clone(),
            None => smallvec![pos],
        };
        if !can_slide_step(board, slots, &set, dir, &ignore, dont_wrap) {
            break;
        }

        moved = true;
        vector += dir.delta();
        pos = board.step(pos, dir, true);
        if let Some(hp) = &mut herd_poses {
            for p in hp.iter_mut() {
                *p = board.step(*p, dir, true);
            }
        }
        on_command = on_command
            || match &herd_poses {
                Some(hp) => on_command_at(hp),
                None => on_command_at(&[pos]),
            };

        if pos == from {
            // Wrapped all the way around: this would slide forever.
            return SlideOutcome {
                vector: None,
                on_command: false,
                aborted: true,
            };
        }
        if board.tile_at(pos) == Tile::Death {
            return SlideOutcome {
                vector: None,
                on_command: false,
                aborted: true,
            };
        }
    }

    SlideOutcome {
        vector: moved.then_some(vector),
        on_command: moved && on_command,
        aborted: false,
    }
}

/// Probe a two-cell jump. `id_under` is the piece the jumper currently
/// covers, if any; covering something exempts a jumper from hole pinning.
pub fn jump_vector(
    board: &Board,
    slots: &[Slot],
    from: Pos,
    dir: Dir,
    id_under: Option<PieceId>,
    mechanic: Option<Mechanic>,
) -> Option<Pos> {
    if id_under.is_none() && board.tile_at(from) == Tile::Hole {
        return None;
    }

    // Secret mechanic: a doubly stacked jumper (or one standing on a bump)
    // clears walls on both legs.
    let ignore_walls = mechanic == Some(Mechanic::Secret)
        && id_under
            .is_some_and(|under| slots[under.0].covers.is_some() || board.tile_at(from) == Tile::Bump);

    let over = board.step(from, dir, true);
    let to = board.step(over, dir, true);

    if !ignore_walls && board.wall_between(from, over) {
        return None;
    }
    if !jumpable_over(cell_at(board, slots, over, &[])) {
        return None;
    }
    if !ignore_walls && board.wall_between(over, to) {
        return None;
    }
    if !jump_landing_ok(board.tile_at(to)) {
        return None;
    }

    Some(dir.delta() + dir.delta())
}

/// Everything a sliding piece drags along: its full stack in both
/// directions, any herd inside that stack, and those members' stacks.
/// Computed with a work-list so pathological stack heights cannot recurse.
fn moved_set_for_slide(slots: &[Slot], roster: &Roster, mover: PieceId) -> IdSet {
    let mut set: IdSet = smallvec![mover];
    let mut i = 0;
    while i < set.len() {
        let id = set[i];
        i += 1;

        let mut linked = IdSet::new();
        if let Some(below) = slots[id.0].covers {
            linked.push(below);
        }
        if let Some(above) = slots[id.0].covered_by {
            linked.push(above);
        }
        if let Some(herd) = &roster.info(id).herd {
            linked.extend(herd.iter().copied());
        }
        for n in linked {
            if !set.contains(&n) {
                set.push(n);
            }
        }
    }
    set
}

/// Apply a slide of `mover` by `vector`. Returns the new slots and the set
/// of pieces that moved.
pub fn apply_slide(
    board: &Board,
    roster: &Roster,
    slots: &[Slot],
    mover: PieceId,
    vector: Pos,
) -> (Vec<Slot>, IdSet) {
    let moved = moved_set_for_slide(slots, roster, mover);
    let mut next = slots.to_vec();
    for &id in &moved {
        next[id.0].pos = board.wrap(next[id.0].pos + vector);
    }
    (next, moved)
}

/// Apply a jump of `mover` by `vector`: the mover and the pieces stacked on
/// it move; the piece it covered is exposed; the landing cell's top piece,
/// if any, is covered.
pub fn apply_jump(
    board: &Board,
    slots: &[Slot],
    mover: PieceId,
    vector: Pos,
) -> (Vec<Slot>, IdSet) {
    let mut moved: IdSet = smallvec![mover];
    moved.extend(state::pieces_above(slots, mover));

    let target = board.wrap(slots[mover.0].pos + vector);
    let landing = state::top_piece_at(slots, target, &[]);

    let mut next = slots.to_vec();
    for &id in &moved {
        next[id.0].pos = board.wrap(next[id.0].pos + vector);
    }
    if let Some(old_below) = slots[mover.0].covers {
        next[old_below.0].covered_by = None;
        next[mover.0].covers = None;
    }
    if let Some(below) = landing {
        next[mover.0].covers = Some(below);
        next[below.0].covered_by = Some(mover);
    }
    (next, moved)
}

/// Run the chain reaction after a slide crossed a command tile: every piece
/// the trigger did not move and that covers nothing (one representative per
/// herd) keeps sliding in `dir` until a fixed point. Returns `true` when any
/// forced slide aborted, which discards the whole compound move.
pub fn command_chain(
    board: &Board,
    roster: &Roster,
    slots: &mut Vec<Slot>,
    trigger_moved: &IdSet,
    dir: Dir,
) -> bool {
    let forced: Vec<PieceId> = (0..slots.len())
        .map(PieceId)
        .filter(|id| {
            !trigger_moved.contains(id)
                && slots[id.0].covers.is_none()
                && roster.info(*id).herd.as_ref().is_none_or(|h| h[0] == *id)
        })
        .collect();

    let mut aborted = false;
    loop {
        let mut any_moved = false;
        for &id in &forced {
            let herd = roster.info(id).herd.clone();
            let outcome = slide_vector(board, slots, slots[id.0].pos, dir, herd.as_deref());
            if outcome.aborted {
                aborted = true;
            }
            if let Some(vector) = outcome.vector {
                let (next, _) = apply_slide(board, roster, slots, id, vector);
                *slots = next;
                any_moved = true;
            }
        }
        if !any_moved {
            break;
        }
    }
    aborted
}

fn build_action(
    roster: &Roster,
    slots: &[Slot],
    mover: PieceId,
    did_jump: bool,
    on_command: bool,
    dir: Dir,
) -> String {
    let names = |ids: &[PieceId]| ids.iter().map(|&id| roster.info(id).name.as_str()).join(" & ");
    let under = state::pieces_under(slots, mover);
    let above = state::pieces_above(slots, mover);

    let mut supp = String::new();
    if did_jump {
        if !above.is_empty() {
            supp = format!("(& {})", names(&above));
        }
        if !under.is_empty() {
            supp = format!("(to {})", names(&under));
        }
    } else {
        let mut companions = under;
        companions.extend(above);
        if !companions.is_empty() {
            supp = format!("(& {})", names(&companions));
        }
        if on_command {
            supp.push_str("(cmd)");
        }
    }

    let glyph = if did_jump {
        dir.jump_glyph()
    } else {
        dir.slide_glyph()
    };
    format!("{}{glyph}{supp}", roster.info(mover).letter)
}

/// All legal successor configurations of `st`: every shepherd crossed with
/// every direction and both move types. Inapplicable combinations simply
/// contribute nothing; compound moves whose chain reaction aborts are
/// dropped. Memoization is the caller's concern.
pub fn successors(
    board: &Board,
    roster: &Roster,
    st: &Rc<State>,
    mechanic: Option<Mechanic>,
) -> Vec<State> {
    let mut out = Vec::new();

    for mover in roster.shepherds() {
        let start = st.slots[mover.0].pos;
        for dir in Dir::ALL {
            for is_jump in [true, false] {
                let (vector, on_command) = if is_jump {
                    let v = jump_vector(
                        board,
                        &st.slots,
                        start,
                        dir,
                        st.slots[mover.0].covers,
                        mechanic,
                    );
                    (v, false)
                } else {
                    let herd = state::herd_under(&st.slots, roster, mover);
                    let outcome = slide_vector(board, &st.slots, start, dir, herd.as_deref());
                    (outcome.vector, outcome.on_command)
                };
                let Some(vector) = vector else {
                    continue;
                };

                let (mut slots, moved) = if is_jump {
                    apply_jump(board, &st.slots, mover, vector)
                } else {
                    apply_slide(board, roster, &st.slots, mover, vector)
                };

                if on_command && command_chain(board, roster, &mut slots, &moved, dir) {
                    continue;
                }

                let action = build_action(roster, &slots, mover, is_jump, on_command, dir);
                let mut actions = st.actions.clone();
                actions.push(action);

                out.push(State {
                    step: st.step + 1,
                    slots,
                    actions,
                    parent: Some(Rc::clone(st)),
                });
            }
        }
    }

    out
}

//! Plain-text rendering of board states and solution replays.
//!
//! Cells are drawn as a box grid; walls show as doubled edges (`═`, `║`)
//! and edges crossed by a herd as joints (`╂`, `┿`, or `╪`/`╫` when a wall
//! runs through the herd). Purely a consumer of the core types.

use std::rc::Rc;

use crate::board::{Board, Tile};
use crate::coord::Pos;
use crate::pieces::{PieceId, Roster};
use crate::state::{Slot, State};

/// Neighborhood of one cell corner and its top/left edges.
struct Edges {
    has_center: bool,
    has_left_top: bool,
    has_left: bool,
    has_left_wall: bool,
    has_left_herd: bool,
    has_top: bool,
    has_top_wall: bool,
    has_top_herd: bool,
}

fn corner(e: &Edges) -> char {
    let n = e.has_top || e.has_left_top;
    let s = e.has_left || e.has_center;
    let w = e.has_left || e.has_left_top;
    let east = e.has_top || e.has_center;
    match (n, s, w, east) {
        (false, false, false, false) => ' ',
        (true, true, true, true) => '┼',
        (true, _, true, true) => '┴',
        (true, true, true, _) => '┤',
        (true, _, true, _) => '┘',
        (true, true, _, true) => '├',
        (true, _, _, true) => '└',
        (_, _, true, true) => '┬',
        (_, _, true, _) => '┐',
        _ => '┌',
    }
}

fn top_edge(e: &Edges) -> char {
    if !e.has_center && !e.has_top {
        ' '
    } else if e.has_top_wall {
        if e.has_top_herd { '╪' } else { '═' }
    } else if e.has_top_herd {
        '╂'
    } else {
        '─'
    }
}

fn left_edge(e: &Edges) -> char {
    if !e.has_center && !e.has_left {
        ' '
    } else if e.has_left_wall {
        if e.has_left_herd { '╫' } else { '║' }
    } else if e.has_left_herd {
        '┿'
    } else {
        '│'
    }
}

fn cell_content(roster: &Roster, slots: &[Slot], here: &[PieceId], tile: Tile) -> [char; 2] {
    let top = here
        .iter()
        .find(|&&id| slots[id.0].covered_by.is_none())
        .or(here.first());
    match top {
        Some(&id) => {
            let info = roster.info(id);
            let ch = if info.kind.is_shepherd() { info.letter } else { 'S' };
            // Stacks get a marker next to the exposed piece.
            let mark = if here.len() > 1 { '*' } else { ' ' };
            [mark, ch]
        }
        None => [' ', tile.glyph()],
    }
}

/// Does a herd piece at this cell continue into the neighbor at `delta`?
fn herd_toward(roster: &Roster, slots: &[Slot], here: &[PieceId], delta: Pos) -> bool {
    here.iter()
        .find_map(|&id| roster.info(id).herd.as_ref().map(|h| (id, h)))
        .is_some_and(|(id, herd)| {
            let target = slots[id.0].pos + delta;
            herd.iter().any(|&m| slots[m.0].pos == target)
        })
}

/// One board state as text lines, two per cell row plus a closing border.
pub fn render_state(board: &Board, roster: &Roster, slots: &[Slot]) -> Vec<String> {
    let rows = board.rows().len() as i16;
    let cols = board.width() as i16;
    let occupied = |pos: Pos| -> Vec<PieceId> {
        (0..slots.len())
            .map(PieceId)
            .filter(|id| slots[id.0].pos == pos)
            .collect()
    };

    let mut lines = Vec::new();
    for y in 0..=rows {
        let mut border = String::new();
        let mut content = String::new();
        for x in 0..=cols {
            let pos = Pos::new(x, y);
            let here = occupied(pos);
            let tile = board.tile_at(pos);
            let e = Edges {
                has_center: tile != Tile::Void,
                has_left_top: board.tile_at(Pos::new(x - 1, y - 1)) != Tile::Void,
                has_left: board.tile_at(Pos::new(x - 1, y)) != Tile::Void,
                has_left_wall: board.wall_between(pos, board.wrap(Pos::new(x - 1, y))),
                has_left_herd: herd_toward(roster, slots, &here, Pos::new(-1, 0)),
                has_top: board.tile_at(Pos::new(x, y - 1)) != Tile::Void,
                has_top_wall: board.wall_between(pos, board.wrap(Pos::new(x, y - 1))),
                has_top_herd: herd_toward(roster, slots, &here, Pos::new(0, -1)),
            };

            border.push(corner(&e));
            let t = top_edge(&e);
            border.push(t);
            border.push(t);
            border.push(t);

            if y < rows {
                content.push(left_edge(&e));
                let [mark, center] = cell_content(roster, slots, &here, tile);
                content.push(mark);
                content.push(center);
                content.push(' ');
            }
        }
        lines.push(border.trim_end().to_string());
        if y < rows {
            lines.push(content.trim_end().to_string());
        }
    }
    lines
}

/// Replay a solution: every state along the parent chain, oldest first,
/// each headed by its step number and the move that produced it.
pub fn render_solution(board: &Board, roster: &Roster, terminal: &Rc<State>) -> String {
    let mut chain: Vec<&State> = Vec::new();
    let mut cur: Option<&State> = Some(terminal.as_ref());
    while let Some(state) = cur {
        chain.push(state);
        cur = state.parent.as_deref();
    }
    chain.reverse();

    let mut out = String::new();
    for state in chain {
        let header = match state.actions.last() {
            None => "Start".to_string(),
            Some(action) => format!("{}. {action}", state.step),
        };
        out.push_str(&header);
        out.push('\n');
        for line in render_state(board, roster, &state.slots) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

use rustc_hash::FxHashSet;

use crate::coord::{Dir, Pos};

/// What a board cell is made of, independent of any pieces standing on it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Tile {
    /// Off-board. Impassable for every kind of movement.
    Void,
    Floor,
    /// Goal tile that wants an exposed shepherd.
    ShepherdGoal,
    /// Goal tile that wants an exposed sheep (single or herd segment).
    SheepGoal,
    /// Blocks sliding both as an origin and as a destination; can be jumped over.
    Bump,
    /// Pins a mover whose whole moving set rests on holes.
    Hole,
    /// Crossing it during a slide triggers a chain reaction.
    Command,
    /// A slide that comes to rest here is aborted outright.
    Death,
}

impl Tile {
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            ' ' => Some(Tile::Void),
            '.' => Some(Tile::Floor),
            'b' => Some(Tile::ShepherdGoal),
            'w' => Some(Tile::SheepGoal),
            'o' => Some(Tile::Bump),
            'u' => Some(Tile::Hole),
            '+' => Some(Tile::Command),
            'x' => Some(Tile::Death),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Tile::Void => ' ',
            Tile::Floor => '.',
            Tile::ShepherdGoal => 'b',
            Tile::SheepGoal => 'w',
            Tile::Bump => 'o',
            Tile::Hole => 'u',
            Tile::Command => '+',
            Tile::Death => 'x',
        }
    }

    #[inline]
    pub fn is_goal(self) -> bool {
        matches!(self, Tile::ShepherdGoal | Tile::SheepGoal)
    }
}

/// The static part of a puzzle: tile plan, wall set and the vertical wrap
/// height. Pieces live elsewhere; the board never changes during a solve.
#[derive(Clone, Debug)]
pub struct Board {
    plan: Vec<Vec<Tile>>,
    walls: FxHashSet<(Pos, Pos)>,
    page_height: i16,
}

impl Board {
    /// Walls are undirected; both orientations are inserted so lookups can
    /// test a single ordered pair.
    pub fn new(plan: Vec<Vec<Tile>>, walls: &[(Pos, Pos)], page_height: i16) -> Self {
        let mut wall_set = FxHashSet::default();
        for &(a, b) in walls {
            wall_set.insert((a, b));
            wall_set.insert((b, a));
        }
        Self {
            plan,
            walls: wall_set,
            page_height,
        }
    }

    /// Tile at `pos`, or [`Tile::Void`] anywhere outside the plan.
    pub fn tile_at(&self, pos: Pos) -> Tile {
        if pos.x < 0 || pos.y < 0 {
            return Tile::Void;
        }
        self.plan
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
            .unwrap_or(Tile::Void)
    }

    #[inline]
    pub fn wall_between(&self, a: Pos, b: Pos) -> bool {
        self.walls.contains(&(a, b))
    }

    /// Wrap `pos` across the vertical seam. Only one page step is folded
    /// back; `x` is never altered.
    #[inline]
    pub fn wrap(&self, pos: Pos) -> Pos {
        if pos.y < 0 {
            return Pos::new(pos.x, self.page_height + pos.y);
        }
        if pos.y > self.page_height - 1 {
            return Pos::new(pos.x, pos.y - self.page_height);
        }
        pos
    }

    /// Neighbor of `pos` in `dir`. Wrapping can be disabled for checks that
    /// must not cross the seam.
    #[inline]
    pub fn step(&self, pos: Pos, dir: Dir, wrap: bool) -> Pos {
        let next = pos + dir.delta();
        if wrap {
            self.wrap(next)
        } else {
            next
        }
    }

    /// All goal tiles with their positions, in plan order.
    pub fn goal_tiles(&self) -> Vec<(Tile, Pos)> {
        let mut out = Vec::new();
        for (y, row) in self.plan.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                if tile.is_goal() {
                    out.push((tile, Pos::new(x as i16, y as i16)));
                }
            }
        }
        out
    }

    #[inline]
    pub fn page_height(&self) -> i16 {
        self.page_height
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.plan
    }

    /// Width of the widest plan row (rows may be ragged).
    pub fn width(&self) -> usize {
        self.plan.iter().map(Vec::len).max().unwrap_or(0)
    }
}

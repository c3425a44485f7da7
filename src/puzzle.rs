use crate::board::Board;
use crate::pieces::Roster;
use crate::state::Slot;

/// Optional named rule variants a puzzle can switch on.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mechanic {
    /// Doubly stacked jumpers (and jumpers standing on a bump) ignore walls
    /// on both legs of a jump.
    Secret,
}

/// A parsed puzzle: static board, the full raw piece set and the declared
/// step bound. The solver may split the raw piece set into alternative
/// candidate configurations when per-kind limits are exceeded.
#[derive(Clone, Debug)]
pub struct Puzzle {
    /// Header line of the puzzle, e.g. `# 12`.
    pub no: String,
    pub board: Board,
    pub roster: Roster,
    pub start: Vec<Slot>,
    /// Declared optimal step count; the search never explores beyond it.
    pub optimal: u32,
    /// The declared bound is known-exact; a shorter solution would be a bug.
    pub fixed: bool,
    pub mechanic: Option<Mechanic>,
}

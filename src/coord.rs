use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A board position. `x` grows rightwards, `y` grows downwards.
///
/// Displayed as `x,y`, the form used by the puzzle text format, by piece
/// ids inside move descriptors and by the canonical configuration key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: i16,
    pub y: i16,
}

impl Pos {
    #[inline]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub const ZERO: Pos = Pos::new(0, 0);
}

impl Add for Pos {
    type Output = Pos;

    #[inline]
    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Pos {
    #[inline]
    fn add_assign(&mut self, rhs: Pos) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Pos {
    type Output = Pos;

    #[inline]
    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// One of the four cardinal directions, in the order moves are enumerated.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Dir {
    Right,
    Down,
    Left,
    Up,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Right, Dir::Down, Dir::Left, Dir::Up];

    #[inline]
    pub fn delta(self) -> Pos {
        match self {
            Dir::Right => Pos::new(1, 0),
            Dir::Down => Pos::new(0, 1),
            Dir::Left => Pos::new(-1, 0),
            Dir::Up => Pos::new(0, -1),
        }
    }

    /// Glyph used in move descriptors for a slide in this direction.
    #[inline]
    pub fn slide_glyph(self) -> char {
        match self {
            Dir::Right => '▶',
            Dir::Down => '▼',
            Dir::Left => '◀',
            Dir::Up => '▲',
        }
    }

    /// Glyph used in move descriptors for a jump in this direction.
    #[inline]
    pub fn jump_glyph(self) -> char {
        match self {
            Dir::Right => '↠',
            Dir::Down => '↡',
            Dir::Left => '↞',
            Dir::Up => '↟',
        }
    }
}

use smallvec::SmallVec;

use crate::board::Tile;

/// Stable index of a piece within one roster. Slot vectors and rosters are
/// always indexed by the same ids, so links between pieces are plain indices.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

/// Per-kind limits the move engine supports. Raw inputs exceeding a limit go
/// through the alternative-configuration enumerator instead of failing.
pub const MAX_SINGLE_SHEPHERDS: usize = 2;
pub const MAX_SINGLE_SHEEP: usize = 2;
pub const MAX_HERDS_PER_SIZE: usize = 1;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PieceKind {
    Shepherd,
    Sheep,
    Herd2,
    Herd3,
}

impl PieceKind {
    pub fn from_token(s: &str) -> Option<PieceKind> {
        match s {
            "B" => Some(PieceKind::Shepherd),
            "W" => Some(PieceKind::Sheep),
            "WW" => Some(PieceKind::Herd2),
            "WWW" => Some(PieceKind::Herd3),
            _ => None,
        }
    }

    /// Token used in the puzzle format and in the canonical configuration
    /// key. Token ordering doubles as the canonical sort order.
    pub fn token(self) -> &'static str {
        match self {
            PieceKind::Shepherd => "B",
            PieceKind::Sheep => "W",
            PieceKind::Herd2 => "WW",
            PieceKind::Herd3 => "WWW",
        }
    }

    #[inline]
    pub fn is_shepherd(self) -> bool {
        matches!(self, PieceKind::Shepherd)
    }

    #[inline]
    pub fn is_herd(self) -> bool {
        matches!(self, PieceKind::Herd2 | PieceKind::Herd3)
    }

    /// Number of board cells a declared piece of this kind occupies.
    pub fn segments(self) -> usize {
        match self {
            PieceKind::Shepherd | PieceKind::Sheep => 1,
            PieceKind::Herd2 => 2,
            PieceKind::Herd3 => 3,
        }
    }

    /// Whether an exposed piece of this kind satisfies `tile` as a goal.
    pub fn matches_goal(self, tile: Tile) -> bool {
        match tile {
            Tile::ShepherdGoal => self.is_shepherd(),
            Tile::SheepGoal => !self.is_shepherd(),
            _ => false,
        }
    }
}

/// Ordered herd membership; the first member is the herd's representative
/// for chain reactions.
pub type HerdIds = SmallVec<[PieceId; 3]>;

/// Immutable identity of a piece: everything that never changes during a
/// solve. Positions and stacking links live in per-state slots.
#[derive(Clone, Debug)]
pub struct PieceInfo {
    /// Parser-assigned id, e.g. `BlackA`, `WhiteB`, `WhiteA:2/3`.
    pub name: String,
    pub letter: char,
    pub kind: PieceKind,
    /// All segments of this piece's herd (including itself), or `None` for
    /// singles.
    pub herd: Option<HerdIds>,
}

/// Arena of piece identities for one candidate configuration.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    infos: Vec<PieceInfo>,
}

impl Roster {
    pub fn push(&mut self, info: PieceInfo) -> PieceId {
        let id = PieceId(self.infos.len());
        self.infos.push(info);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    #[inline]
    pub fn info(&self, id: PieceId) -> &PieceInfo {
        &self.infos[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &PieceInfo)> {
        self.infos
            .iter()
            .enumerate()
            .map(|(i, info)| (PieceId(i), info))
    }

    /// Ids of all move initiators, in id order.
    pub fn shepherds(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.iter()
            .filter(|(_, info)| info.kind.is_shepherd())
            .map(|(id, _)| id)
    }
}

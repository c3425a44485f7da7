//! Parser for the line-oriented puzzle text format.
//!
//! A puzzle is a `# id` header, plan rows over `[ .bwou+x]`, and directive
//! lines (`pieces:`, `walls:`, `optimal:`/`fixed:`, `flag:`), terminated by a
//! blank line or end of input:
//!
//! ```text
//! # 3
//! .o..b
//! ..+..
//! pieces: B@0,0 W@2,1 WW@3,0+3,1
//! walls: 1,0|2,0
//! optimal: 4
//! ```

use std::fmt;

use crate::board::{Board, Tile};
use crate::coord::Pos;
use crate::pieces::{HerdIds, PieceId, PieceInfo, PieceKind, Roster};
use crate::puzzle::{Mechanic, Puzzle};
use crate::state::{self, Slot};

#[derive(Debug)]
pub enum ParseError {
    BadPlanRow { line: usize, row: String },
    BadPiece { line: usize, token: String },
    BadPosition { line: usize, token: String },
    BadWall { line: usize, token: String },
    BadBound { line: usize, token: String },
    UnknownMechanic { line: usize, token: String },
    InvalidPuzzle { no: String, reason: &'static str },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BadPlanRow { line, row } => {
                write!(f, "line {line}: cannot parse plan row {row:?}")
            }
            ParseError::BadPiece { line, token } => {
                write!(f, "line {line}: invalid piece declaration {token:?}")
            }
            ParseError::BadPosition { line, token } => {
                write!(f, "line {line}: cannot parse position {token:?}")
            }
            ParseError::BadWall { line, token } => {
                write!(f, "line {line}: cannot parse wall {token:?}")
            }
            ParseError::BadBound { line, token } => {
                write!(f, "line {line}: cannot parse step bound {token:?}")
            }
            ParseError::UnknownMechanic { line, token } => {
                write!(f, "line {line}: unknown mechanic flag {token:?}")
            }
            ParseError::InvalidPuzzle { no, reason } => {
                write!(f, "puzzle {no}: {reason}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Result of parsing a puzzle file: every well-formed puzzle, plus one
/// error per puzzle that failed.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub puzzles: Vec<Puzzle>,
    pub errors: Vec<ParseError>,
}

impl ParseOutcome {
    fn finish_block(&mut self, builder: Builder) {
        if builder.no.is_empty() {
            return;
        }
        match builder.finish() {
            Ok(puzzle) => self.puzzles.push(puzzle),
            Err(err) => self.errors.push(err),
        }
    }
}

/// Parse every puzzle in `input`. A malformed puzzle is dropped and
/// reported in `errors`; the puzzles after it still parse. The core never
/// sees bad data.
pub fn parse_puzzles(input: &str) -> ParseOutcome {
    let mut out = ParseOutcome::default();
    let mut builder = Builder::default();
    let mut skipping = false;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            let block = std::mem::take(&mut builder);
            if !skipping {
                out.finish_block(block);
            }
            skipping = false;
        } else if skipping {
            // Remainder of a puzzle that already failed.
        } else if let Err(err) = builder.take_line(line_no, line) {
            out.errors.push(err);
            skipping = true;
        }
    }
    if !skipping {
        out.finish_block(builder);
    }

    out
}

#[derive(Default)]
struct Builder {
    no: String,
    plan: Vec<Vec<Tile>>,
    roster: Roster,
    start: Vec<Slot>,
    walls: Vec<(Pos, Pos)>,
    optimal: u32,
    fixed: bool,
    mechanic: Option<Mechanic>,
    shepherd_count: usize,
    sheep_count: usize,
}

impl Builder {
    fn take_line(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        if line.starts_with('#') {
            self.no = line.trim().to_string();
            Ok(())
        } else if let Some(rest) = line.strip_prefix("pieces:") {
            self.parse_pieces(line_no, rest)
        } else if let Some(rest) = line.strip_prefix("walls:") {
            self.parse_walls(line_no, rest)
        } else if let Some(rest) = line.strip_prefix("optimal:") {
            self.optimal = parse_bound(line_no, rest)?;
            Ok(())
        } else if let Some(rest) = line.strip_prefix("fixed:") {
            self.optimal = parse_bound(line_no, rest)?;
            self.fixed = true;
            Ok(())
        } else if let Some(rest) = line.strip_prefix("flag:") {
            self.mechanic = Some(parse_mechanic(line_no, rest)?);
            Ok(())
        } else {
            self.push_plan_row(line_no, line)
        }
    }

    fn push_plan_row(&mut self, line_no: usize, row: &str) -> Result<(), ParseError> {
        let tiles: Option<Vec<Tile>> = row.chars().map(Tile::from_char).collect();
        match tiles {
            Some(tiles) => {
                self.plan.push(tiles);
                Ok(())
            }
            None => Err(ParseError::BadPlanRow {
                line: line_no,
                row: row.to_string(),
            }),
        }
    }

    fn parse_pieces(&mut self, line_no: usize, rest: &str) -> Result<(), ParseError> {
        for token in rest.split_whitespace() {
            let bad = || ParseError::BadPiece {
                line: line_no,
                token: token.to_string(),
            };

            let (kind_str, pos_str) = token.split_once('@').ok_or_else(bad)?;
            let kind = PieceKind::from_token(kind_str).ok_or_else(bad)?;
            let positions: Vec<Pos> = pos_str
                .split('+')
                .map(|p| parse_pos(line_no, p))
                .collect::<Result<_, _>>()?;
            if positions.len() != kind.segments() {
                return Err(bad());
            }

            // Letters count per color; herd kinds share the sheep counter.
            let index = if kind.is_shepherd() {
                let i = self.shepherd_count;
                self.shepherd_count += 1;
                i
            } else {
                let i = self.sheep_count;
                self.sheep_count += 1;
                i
            };
            let letter = (b'A' + (index % 26) as u8) as char;
            let base = format!(
                "{}{letter}",
                if kind.is_shepherd() { "Black" } else { "White" }
            );

            let segments = positions.len();
            let first_id = self.roster.len();
            let part_ids: HerdIds = (0..segments).map(|i| PieceId(first_id + i)).collect();

            for (i, &pos) in positions.iter().enumerate() {
                let name = if segments > 1 {
                    format!("{base}:{}/{segments}", i + 1)
                } else {
                    base.clone()
                };
                self.roster.push(PieceInfo {
                    name,
                    letter,
                    kind,
                    herd: (segments > 1).then(|| part_ids.clone()),
                });

                let mut slot = Slot::at(pos);
                // A single piece declared on an occupied cell stacks on top
                // of whatever is already there. Herds never stack.
                if segments == 1 {
                    if let Some(top) = state::top_piece_at(&self.start, pos, &[]) {
                        slot.covers = Some(top);
                        self.start[top.0].covered_by = Some(PieceId(self.start.len()));
                    }
                }
                self.start.push(slot);
            }
        }
        Ok(())
    }

    fn parse_walls(&mut self, line_no: usize, rest: &str) -> Result<(), ParseError> {
        for token in rest.split_whitespace() {
            let (a, b) = token.split_once('|').ok_or_else(|| ParseError::BadWall {
                line: line_no,
                token: token.to_string(),
            })?;
            self.walls
                .push((parse_pos(line_no, a)?, parse_pos(line_no, b)?));
        }
        Ok(())
    }

    fn finish(self) -> Result<Puzzle, ParseError> {
        let invalid = |reason| ParseError::InvalidPuzzle {
            no: self.no.clone(),
            reason,
        };

        if self.plan.is_empty() {
            return Err(invalid("has no plan"));
        }
        if self.roster.is_empty() {
            return Err(invalid("has no pieces"));
        }
        if self.optimal < 1 {
            return Err(invalid("has no optimal moves count"));
        }
        if !self
            .plan
            .iter()
            .any(|row| row.iter().any(|tile| tile.is_goal()))
        {
            return Err(invalid("has no end tiles"));
        }

        let page_height = self.plan.len() as i16;
        Ok(Puzzle {
            no: self.no,
            board: Board::new(self.plan, &self.walls, page_height),
            roster: self.roster,
            start: self.start,
            optimal: self.optimal,
            fixed: self.fixed,
            mechanic: self.mechanic,
        })
    }
}

fn parse_pos(line_no: usize, token: &str) -> Result<Pos, ParseError> {
    let bad = || ParseError::BadPosition {
        line: line_no,
        token: token.to_string(),
    };
    let (x, y) = token.trim().split_once(',').ok_or_else(bad)?;
    Ok(Pos::new(
        x.parse().map_err(|_| bad())?,
        y.parse().map_err(|_| bad())?,
    ))
}

fn parse_bound(line_no: usize, token: &str) -> Result<u32, ParseError> {
    token.trim().parse().map_err(|_| ParseError::BadBound {
        line: line_no,
        token: token.to_string(),
    })
}

fn parse_mechanic(line_no: usize, token: &str) -> Result<Mechanic, ParseError> {
    match token.trim() {
        "secret" => Ok(Mechanic::Secret),
        _ => Err(ParseError::UnknownMechanic {
            line: line_no,
            token: token.to_string(),
        }),
    }
}

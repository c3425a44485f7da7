//! A solver for shepherd-and-sheep sliding puzzles.
//!
//! Shepherd pieces slide and jump across a grid with walls, bumps, holes,
//! command tiles and a vertical wrap-around seam, carrying stacked pieces and
//! rigid herds along. A bounded exhaustive search finds the shortest move
//! sequence that parks every goal tile under a matching, fully exposed piece.

pub mod board;
pub mod coord;
pub mod display;
pub mod enumerate;
pub mod movegen;
pub mod parser;
pub mod pieces;
pub mod puzzle;
pub mod search;
pub mod state;

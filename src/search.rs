//! Bounded exhaustive depth-first search over configurations.
//!
//! The driver tries every legal move at every depth up to the declared
//! optimal bound. It is pruned only by a canonical-hash memo (a position
//! reached again at an equal or higher step is dead) and by the tightening
//! best-known solution length. No move ordering heuristics; correctness
//! depends on exhaustiveness.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::board::Board;
use crate::enumerate;
use crate::movegen;
use crate::pieces::Roster;
use crate::puzzle::{Mechanic, Puzzle};
use crate::state::{Slot, State};

/// Search effort counters, accumulated across one candidate's solve.
#[derive(Copy, Clone, Debug, Default, Serialize)]
pub struct SolveStats {
    /// Successor states produced by the move generator.
    pub generated: u64,
    /// Successors that survived the memo and were recursed into.
    pub admitted: u64,
    /// Distinct canonical keys ever recorded.
    pub visited: u64,
}

/// A found solution: the terminal state plus the candidate configuration it
/// was found in (needed to render paths when alternatives were enumerated).
#[derive(Clone, Debug)]
pub struct Solution {
    pub steps: u32,
    pub actions: Vec<String>,
    pub terminal: Rc<State>,
    pub roster: Roster,
    pub start: Vec<Slot>,
    pub stats: SolveStats,
}

/// Flat, serializable report for one puzzle.
#[derive(Clone, Debug, Serialize)]
pub struct SolutionSummary {
    pub puzzle: String,
    pub solved: bool,
    pub steps: Option<u32>,
    pub optimal: u32,
    pub better_than_declared: bool,
    pub actions: Vec<String>,
    pub stats: Option<SolveStats>,
}

impl SolutionSummary {
    pub fn new(puzzle: &Puzzle, solution: Option<&Solution>) -> SolutionSummary {
        SolutionSummary {
            puzzle: puzzle.no.clone(),
            solved: solution.is_some(),
            steps: solution.map(|s| s.steps),
            optimal: puzzle.optimal,
            better_than_declared: solution.is_some_and(|s| s.steps < puzzle.optimal),
            actions: solution.map(|s| s.actions.clone()).unwrap_or_default(),
            stats: solution.map(|s| s.stats),
        }
    }
}

/// Goal test: every goal tile carries an exposed piece of the matching
/// kind, neither covering nor covered, and a matching herd segment counts
/// only when the whole herd is uncovered.
pub fn is_solved(board: &Board, roster: &Roster, slots: &[Slot]) -> bool {
    board.goal_tiles().iter().all(|&(tile, pos)| {
        roster.iter().any(|(id, info)| {
            let slot = &slots[id.0];
            info.kind.matches_goal(tile)
                && slot.pos == pos
                && slot.covered_by.is_none()
                && slot.covers.is_none()
                && info
                    .herd
                    .as_ref()
                    .is_none_or(|herd| herd.iter().all(|&m| slots[m.0].covered_by.is_none()))
        })
    })
}

/// Mutable search state for one candidate configuration. Never shared
/// between candidates or puzzles; stale memo entries would corrupt the
/// step-bound pruning of an unrelated search.
struct SolveContext<'a> {
    board: &'a Board,
    roster: &'a Roster,
    mechanic: Option<Mechanic>,
    optimal: u32,
    /// Best known solution length so far; only ever tightens.
    solved_steps: u32,
    /// Canonical key to the lowest step it was reached at.
    visited: FxHashMap<String, u32>,
    stats: SolveStats,
}

impl<'a> SolveContext<'a> {
    fn new(board: &'a Board, roster: &'a Roster, mechanic: Option<Mechanic>, optimal: u32) -> Self {
        SolveContext {
            board,
            roster,
            mechanic,
            optimal,
            solved_steps: u32::MAX,
            visited: FxHashMap::default(),
            stats: SolveStats::default(),
        }
    }

    /// A state past the bound or the best known length is pruned before the
    /// goal test can see it.
    fn evaluate_next(&mut self, state: &Rc<State>) -> Option<Rc<State>> {
        if state.step <= self.optimal
            && state.step < self.solved_steps
            && is_solved(self.board, self.roster, &state.slots)
        {
            self.solved_steps = state.step;
            return Some(Rc::clone(state));
        }
        if state.step >= self.optimal || state.step >= self.solved_steps {
            return None;
        }

        // Record every sibling in the memo before descending into any of
        // them, so a sibling cannot be re-derived deeper down the tree.
        let successors = movegen::successors(self.board, self.roster, state, self.mechanic);
        self.stats.generated += successors.len() as u64;

        let mut admitted = Vec::new();
        for next in successors {
            let key = next.canonical_key(self.roster);
            match self.visited.get(&key) {
                Some(&seen) if seen <= next.step => {}
                _ => {
                    self.visited.insert(key, next.step);
                    admitted.push(Rc::new(next));
                }
            }
        }
        self.stats.admitted += admitted.len() as u64;

        let mut best: Option<Rc<State>> = None;
        for next in &admitted {
            if let Some(found) = self.evaluate_next(next) {
                if best.as_ref().is_none_or(|b| found.step < b.step) {
                    best = Some(found);
                }
            }
        }
        best
    }

    fn run(mut self, start: &[Slot]) -> Option<(Rc<State>, SolveStats)> {
        let root = Rc::new(State::initial(start.to_vec()));
        self.visited.insert(root.canonical_key(self.roster), 0);
        let terminal = self.evaluate_next(&root)?;
        self.stats.visited = self.visited.len() as u64;
        Some((terminal, self.stats))
    }
}

/// Solve one puzzle: enumerate candidate configurations, search each with a
/// fresh context and return the shortest solution found within the bound.
pub fn solve_puzzle(puzzle: &Puzzle) -> Option<Solution> {
    let mut best: Option<Solution> = None;

    for candidate in enumerate::candidates(puzzle) {
        let ctx = SolveContext::new(
            &puzzle.board,
            &candidate.roster,
            puzzle.mechanic,
            puzzle.optimal,
        );
        let Some((terminal, stats)) = ctx.run(&candidate.start) else {
            continue;
        };
        if best.as_ref().is_none_or(|b| terminal.step < b.steps) {
            best = Some(Solution {
                steps: terminal.step,
                actions: terminal.actions.clone(),
                terminal,
                roster: candidate.roster,
                start: candidate.start,
                stats,
            });
        }
    }

    best
}

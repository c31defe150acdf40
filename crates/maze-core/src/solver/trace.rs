//! Step-trace engine: an exhaustive DFS that records every visit, decision
//! point, and backtrack as an independent grid snapshot.

use super::types::{Action, Step};
use crate::{Cell, Grid, Position};

/// Unit moves tried in fixed order: up, right, down, left. The order decides
/// which branch is explored first at a decision point and is observable in
/// the trace; it must not change.
pub(super) const NEIGHBOR_MOVES: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// One suspended DFS call: a cell plus the moves not yet attempted.
pub(super) struct Frame {
    pub(super) pos: Position,
    pub(super) next: usize,
}

impl Frame {
    pub(super) fn new(pos: Position) -> Self {
        Self { pos, next: 0 }
    }
}

/// Traversal state for one trace run. The working grid is only re-tagged for
/// snapshots; legality of moves is decided by the parallel `visited` grid.
pub(super) struct TraceEngine {
    grid: Grid,
    visited: Vec<bool>,
    stack: Vec<Position>,
    steps: Vec<Step>,
    found: bool,
}

impl TraceEngine {
    /// Run the traversal over a private copy of `grid` and return the full
    /// step log. Deterministic: no randomness, fixed neighbor order.
    pub(super) fn run(grid: &Grid) -> Vec<Step> {
        let mut engine = TraceEngine {
            grid: grid.clone(),
            visited: vec![false; grid.rows() * grid.cols()],
            stack: Vec::new(),
            steps: Vec::new(),
            found: false,
        };
        engine.traverse();
        engine.steps
    }

    /// Iterative DFS on an explicit frame stack. Step order is identical to
    /// the natural recursion: enter a cell, descend into each still-unvisited
    /// neighbor in fixed order, then emit one backtrack on the way out.
    /// Success unwinds immediately with no further steps.
    fn traverse(&mut self) {
        let start = self.grid.start();
        let mut frames = vec![Frame::new(start)];
        self.visit(start);
        while !self.found {
            let Some(top) = frames.len().checked_sub(1) else {
                break;
            };
            let pos = frames[top].pos;
            let mut descend = None;
            while frames[top].next < NEIGHBOR_MOVES.len() {
                let (drow, dcol) = NEIGHBOR_MOVES[frames[top].next];
                frames[top].next += 1;
                if let Some(neighbor) = self.grid.offset(pos, drow, dcol) {
                    // Re-checked here, not frozen at visit time: a sibling
                    // branch may have claimed this neighbor in the meantime.
                    if self.traversable(neighbor) {
                        descend = Some(neighbor);
                        break;
                    }
                }
            }
            match descend {
                Some(next) => {
                    frames.push(Frame::new(next));
                    self.visit(next);
                }
                None => {
                    frames.pop();
                    self.stack.pop();
                    self.push_step(pos, Action::Backtrack, Vec::new());
                }
            }
        }
    }

    /// Enter a cell: mark it visited, re-tag the working grid, and emit the
    /// explore/decision step (plus the solution step if this is the exit).
    fn visit(&mut self, pos: Position) {
        let idx = self.index(pos);
        self.visited[idx] = true;
        self.stack.push(pos);

        // The entrance and exit keep their generation-time tag in snapshots.
        let terminal = pos == self.grid.start() || pos == self.grid.end();
        if !terminal {
            self.grid.set(pos, Cell::Visited);
        }

        let available = self.available_paths(pos);
        let action = if available.len() > 1 {
            Action::Decision
        } else {
            Action::Explore
        };

        // The decision tag is momentary: only this step's snapshot shows it.
        let tag_decision = action == Action::Decision && !terminal;
        if tag_decision {
            self.grid.set(pos, Cell::Decision);
        }
        self.push_step(pos, action, available);
        if tag_decision {
            self.grid.set(pos, Cell::Visited);
        }

        if pos == self.grid.end() {
            self.push_step(pos, Action::Solution, Vec::new());
            self.found = true;
        }
    }

    /// In-bounds neighbors still open for traversal, in fixed move order.
    fn available_paths(&self, pos: Position) -> Vec<Position> {
        NEIGHBOR_MOVES
            .iter()
            .filter_map(|&(drow, dcol)| self.grid.offset(pos, drow, dcol))
            .filter(|&n| self.traversable(n))
            .collect()
    }

    fn traversable(&self, pos: Position) -> bool {
        self.grid.get(pos) == Cell::Path && !self.visited[self.index(pos)]
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.grid.cols() + pos.col
    }

    fn push_step(&mut self, position: Position, action: Action, available_paths: Vec<Position>) {
        self.steps.push(Step {
            position,
            stack: self.stack.clone(),
            action,
            available_paths,
            grid: self.grid.clone(),
        });
    }
}

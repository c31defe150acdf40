//! DFS maze solving.
//!
//! Two variants of the same traversal: [`Solver::trace`] records a full
//! replayable step log with per-step grid snapshots, and [`Solver::solve`]
//! returns only the terminal summary, optionally feeding incremental
//! grid/stats pairs to an observer for progressive rendering. Both visit
//! cells in the same order and agree on backtrack count and final path.

mod trace;
mod types;

pub use types::{Action, DfsResult, Stats, Step};

use crate::{Cell, Grid, Position};
use trace::{Frame, TraceEngine, NEIGHBOR_MOVES};

/// Unit-struct solver; all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Exhaustive DFS from the entrance to the exit, returning the ordered
    /// log of every visit, decision point, and backtrack. The caller's grid
    /// is not touched; each step carries its own snapshot. Deterministic:
    /// the same grid always produces an identical step sequence.
    ///
    /// # Panics
    ///
    /// Panics if the grid has a zero dimension (cannot happen for a `Grid`
    /// built through its constructors).
    pub fn trace(&self, grid: &Grid) -> Vec<Step> {
        assert!(grid.rows() > 0 && grid.cols() > 0, "cannot trace an empty grid");
        TraceEngine::run(grid)
    }

    /// Identical traversal to [`Solver::trace`] without the step log; returns
    /// only the terminal summary.
    pub fn solve(&self, grid: &Grid) -> DfsResult {
        self.solve_with_observer(grid, |_, _| {})
    }

    /// Like [`Solver::solve`], but invokes `observer` with the working grid
    /// and running stats after every visit and every backtrack, and a final
    /// time after the accepted path is re-tagged (`Solution` cells between a
    /// `Start` and an `End`). Pacing between callbacks is the caller's
    /// business; the core knows nothing about timers.
    ///
    /// # Panics
    ///
    /// Panics if the grid has a zero dimension.
    pub fn solve_with_observer<F>(&self, grid: &Grid, mut observer: F) -> DfsResult
    where
        F: FnMut(&Grid, &Stats),
    {
        assert!(grid.rows() > 0 && grid.cols() > 0, "cannot solve an empty grid");
        let mut walk = FastWalk::new(grid);
        walk.run(&mut observer);
        walk.into_result()
    }
}

/// Traversal state for the fast, log-free variant.
struct FastWalk {
    grid: Grid,
    visited: Vec<bool>,
    stack: Vec<Position>,
    visited_cells: Vec<Position>,
    backtrack_count: usize,
    found: bool,
}

impl FastWalk {
    fn new(grid: &Grid) -> Self {
        Self {
            grid: grid.clone(),
            visited: vec![false; grid.rows() * grid.cols()],
            stack: Vec::new(),
            visited_cells: Vec::new(),
            backtrack_count: 0,
            found: false,
        }
    }

    fn run<F: FnMut(&Grid, &Stats)>(&mut self, observer: &mut F) {
        let start = self.grid.start();
        let mut frames = vec![Frame::new(start)];
        self.visit(start, observer);
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
                    if self.traversable(neighbor) {
                        descend = Some(neighbor);
                        break;
                    }
                }
            }
            match descend {
                Some(next) => {
                    frames.push(Frame::new(next));
                    self.visit(next, observer);
                }
                None => {
                    frames.pop();
                    self.stack.pop();
                    self.backtrack_count += 1;
                    observer(&self.grid, &self.stats(false));
                }
            }
        }
        if self.found {
            self.mark_solution();
        }
        observer(&self.grid, &self.stats(self.found));
    }

    fn visit<F: FnMut(&Grid, &Stats)>(&mut self, pos: Position, observer: &mut F) {
        let idx = self.index(pos);
        self.visited[idx] = true;
        self.stack.push(pos);
        self.visited_cells.push(pos);
        if pos != self.grid.start() && pos != self.grid.end() {
            self.grid.set(pos, Cell::Visited);
        }
        observer(&self.grid, &self.stats(false));
        if pos == self.grid.end() {
            self.found = true;
        }
    }

    /// Re-tag the accepted path for display: interior path cells become
    /// `Solution`, the terminals `Start` and `End`.
    fn mark_solution(&mut self) {
        let start = self.grid.start();
        let end = self.grid.end();
        for &pos in &self.stack {
            if pos != start && pos != end {
                self.grid.set(pos, Cell::Solution);
            }
        }
        self.grid.set(start, Cell::Start);
        self.grid.set(end, Cell::End);
    }

    fn stats(&self, solution_found: bool) -> Stats {
        Stats {
            path_length: self.stack.len(),
            cells_visited: self.visited_cells.len(),
            backtrack_count: self.backtrack_count,
            solution_found,
        }
    }

    fn traversable(&self, pos: Position) -> bool {
        self.grid.get(pos) == Cell::Path && !self.visited[self.index(pos)]
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.grid.cols() + pos.col
    }

    fn into_result(self) -> DfsResult {
        // On failure the stack has fully unwound and is already empty.
        DfsResult {
            solution: self.stack,
            visited_cells: self.visited_cells,
            backtrack_count: self.backtrack_count,
            found: self.found,
        }
    }
}

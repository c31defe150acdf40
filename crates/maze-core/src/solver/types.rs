use crate::{Grid, Position};
use serde::{Deserialize, Serialize};

/// What a single trace step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Entered a cell with at most one open branch.
    Explore,
    /// Entered a cell with more than one open branch.
    Decision,
    /// Exhausted a cell's branches and popped it from the stack.
    Backtrack,
    /// Reached the exit cell.
    Solution,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Explore => write!(f, "explore"),
            Action::Decision => write!(f, "decision"),
            Action::Backtrack => write!(f, "backtrack"),
            Action::Solution => write!(f, "solution"),
        }
    }
}

/// One atomic event in the DFS traversal.
///
/// Steps are produced in strict chronological order and never mutated after
/// creation; the sequence is an append-only log that fully replays the
/// algorithm. Every step carries its own grid snapshot, so replaying to any
/// index needs no other state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Cell the event acted on.
    pub position: Position,
    /// DFS call stack at the instant of the event, root first. For a
    /// `Backtrack` this is the stack *after* the pop.
    pub stack: Vec<Position>,
    pub action: Action,
    /// Unvisited `Path` neighbors open from this cell at this instant.
    /// Empty for `Backtrack` and `Solution` steps.
    pub available_paths: Vec<Position>,
    /// Independent snapshot of the working grid.
    pub grid: Grid,
}

/// Terminal summary of a solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfsResult {
    /// Accepted path from entrance to exit; empty when no route exists.
    pub solution: Vec<Position>,
    /// Every visited cell, in visit order.
    pub visited_cells: Vec<Position>,
    /// Number of backtrack events over the whole traversal.
    pub backtrack_count: usize,
    /// Whether the exit was reached.
    pub found: bool,
}

/// Running view over a prefix of a step sequence; recomputable at any index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Current stack depth.
    pub path_length: usize,
    /// First visits so far. Backtrack and solution steps do not count,
    /// keeping this equal to [`DfsResult::visited_cells`] over a full trace.
    pub cells_visited: usize,
    /// Backtrack steps so far.
    pub backtrack_count: usize,
    /// Whether a solution step has occurred.
    pub solution_found: bool,
}

impl Stats {
    /// Recompute the stats visible after replaying `steps[..=up_to]`.
    ///
    /// # Panics
    ///
    /// Panics if `up_to` is out of range.
    pub fn derive(steps: &[Step], up_to: usize) -> Stats {
        assert!(up_to < steps.len(), "step index out of range");
        let mut cells_visited = 0;
        let mut backtrack_count = 0;
        let mut solution_found = false;
        for step in &steps[..=up_to] {
            match step.action {
                Action::Explore | Action::Decision => cells_visited += 1,
                Action::Backtrack => backtrack_count += 1,
                Action::Solution => solution_found = true,
            }
        }
        Stats {
            path_length: steps[up_to].stack.len(),
            cells_visited,
            backtrack_count,
            solution_found,
        }
    }
}

use crate::{Cell, Grid, Position};

/// Carve moves of magnitude 2: up, right, down, left. Rooms live on odd
/// coordinates; the midpoint of each move is the wall cell carved through.
const CARVE_MOVES: [(isize, isize); 4] = [(-2, 0), (0, 2), (2, 0), (0, -2)];

/// Configuration for maze generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Default number of rows for [`Generator::generate_default`].
    pub rows: usize,
    /// Default number of columns for [`Generator::generate_default`].
    pub cols: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { rows: 15, cols: 15 }
    }
}

/// Perfect-maze generator using randomized recursive backtracking.
///
/// The carved passages form a spanning tree over the odd-coordinate rooms,
/// so exactly one simple path exists between any two of them. Branch layout
/// is randomized; structure (perfectness) is not.
pub struct Generator {
    config: GeneratorConfig,
    rng: SimpleRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator with default configuration and an entropy seed.
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with custom configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Generate a maze with the configured default dimensions.
    pub fn generate_default(&mut self) -> Grid {
        let (rows, cols) = (self.config.rows, self.config.cols);
        self.generate(rows, cols)
    }

    /// Generate a `rows x cols` maze.
    ///
    /// Even dimensions are rounded up to the next odd value so rooms stay
    /// aligned to the odd-coordinate lattice. Dimensions of 2 or less in
    /// either axis have no interior to carve; the grid still comes back
    /// valid, with only the forced entrance/exit cells open.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn generate(&mut self, rows: usize, cols: usize) -> Grid {
        assert!(rows >= 1 && cols >= 1, "maze dimensions must be at least 1x1");
        let rows = round_up_to_odd(rows);
        let cols = round_up_to_odd(cols);
        let mut grid = Grid::new(rows, cols);
        if rows > 2 && cols > 2 {
            self.carve(&mut grid);
        }
        open_endpoints(&mut grid);
        grid
    }

    /// Recursive-backtracking carve from `(1, 1)`, run on an explicit frame
    /// stack so deep mazes cannot overflow the call stack. Each frame holds
    /// its own shuffled move order; the `Wall` check is repeated per attempt,
    /// matching the recursive formulation exactly.
    fn carve(&mut self, grid: &mut Grid) {
        let origin = Position::new(1, 1);
        grid.set(origin, Cell::Path);
        let mut frames = vec![CarveFrame::new(origin, self.shuffled_moves())];
        while let Some(top) = frames.len().checked_sub(1) {
            let mut carved = None;
            while frames[top].next < CARVE_MOVES.len() {
                let (drow, dcol) = frames[top].moves[frames[top].next];
                frames[top].next += 1;
                let pos = frames[top].pos;
                if let Some(target) = grid.offset(pos, drow, dcol) {
                    if grid.get(target) == Cell::Wall {
                        if let Some(mid) = grid.offset(pos, drow / 2, dcol / 2) {
                            grid.set(mid, Cell::Path);
                            grid.set(target, Cell::Path);
                            carved = Some(target);
                            break;
                        }
                    }
                }
            }
            match carved {
                Some(target) => frames.push(CarveFrame::new(target, self.shuffled_moves())),
                None => {
                    frames.pop();
                }
            }
        }
    }

    fn shuffled_moves(&mut self) -> [(isize, isize); 4] {
        let mut moves = CARVE_MOVES;
        self.shuffle(&mut moves);
        moves
    }

    /// Shuffle a slice using Fisher-Yates.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.rng.next_usize(i + 1);
            slice.swap(i, j);
        }
    }
}

/// One suspended carve call: a room plus the moves not yet attempted.
struct CarveFrame {
    pos: Position,
    moves: [(isize, isize); 4],
    next: usize,
}

impl CarveFrame {
    fn new(pos: Position, moves: [(isize, isize); 4]) -> Self {
        Self { pos, moves, next: 0 }
    }
}

/// Force the entrance/exit corners open, along with their lattice-adjacent
/// connector cells, so both are reachable from the carved interior. Guarded
/// for degenerate dimensions; never indexes out of bounds.
fn open_endpoints(grid: &mut Grid) {
    let rows = grid.rows();
    let cols = grid.cols();
    grid.set(grid.start(), Cell::Path);
    grid.set(grid.end(), Cell::Path);
    if cols >= 2 {
        grid.set(Position::new(0, 1), Cell::Path);
        grid.set(Position::new(rows - 1, cols - 2), Cell::Path);
    }
    if rows >= 2 {
        grid.set(Position::new(1, 0), Cell::Path);
        grid.set(Position::new(rows - 2, cols - 1), Cell::Path);
    }
}

fn round_up_to_odd(n: usize) -> usize {
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

/// Simple PRNG, PCG-like, seeded from the OS for WASM compatibility.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: a static counter if getrandom fails
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    /// All path-tagged neighbors of `pos` at unit distance.
    fn open_neighbors(grid: &Grid, pos: Position) -> Vec<Position> {
        [(-1isize, 0isize), (0, 1), (1, 0), (0, -1)]
            .iter()
            .filter_map(|&(dr, dc)| grid.offset(pos, dr, dc))
            .filter(|&n| grid.get(n) == Cell::Path)
            .collect()
    }

    /// Path cells reachable from `from`, restricted to `region`.
    fn flood(grid: &Grid, from: Position, region: impl Fn(Position) -> bool) -> HashSet<Position> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        if grid.get(from) == Cell::Path && region(from) {
            seen.insert(from);
            queue.push_back(from);
        }
        while let Some(pos) = queue.pop_front() {
            for n in open_neighbors(grid, pos) {
                if region(n) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen
    }

    #[test]
    fn test_generate_dimensions() {
        let grid = Generator::with_seed(42).generate(21, 31);
        assert_eq!(grid.rows(), 21);
        assert_eq!(grid.cols(), 31);
        assert_eq!(grid.get(grid.start()), Cell::Path);
        assert_eq!(grid.get(grid.end()), Cell::Path);
    }

    #[test]
    fn test_even_dimensions_round_up() {
        let grid = Generator::with_seed(42).generate(10, 14);
        assert_eq!(grid.rows(), 11);
        assert_eq!(grid.cols(), 15);
    }

    #[test]
    fn test_default_config_dimensions() {
        let grid = Generator::with_seed(1).generate_default();
        assert_eq!(grid.rows(), 15);
        assert_eq!(grid.cols(), 15);
    }

    #[test]
    fn test_custom_config_dimensions() {
        let config = GeneratorConfig { rows: 9, cols: 11 };
        let grid = Generator::with_config(config).generate_default();
        assert_eq!(grid.rows(), 9);
        assert_eq!(grid.cols(), 11);
    }

    #[test]
    fn test_degenerate_sizes() {
        let grid = Generator::with_seed(7).generate(1, 1);
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
        assert_eq!(grid.get(Position::new(0, 0)), Cell::Path);

        // A single row: no interior lattice, only the forced cells open.
        let grid = Generator::with_seed(7).generate(1, 5);
        assert_eq!((grid.rows(), grid.cols()), (1, 5));
        assert_eq!(grid.get(Position::new(0, 0)), Cell::Path);
        assert_eq!(grid.get(Position::new(0, 1)), Cell::Path);
        assert_eq!(grid.get(Position::new(0, 2)), Cell::Wall);
        assert_eq!(grid.get(Position::new(0, 3)), Cell::Path);
        assert_eq!(grid.get(Position::new(0, 4)), Cell::Path);

        // 2x2 rounds up to 3x3 and carves the single room.
        let grid = Generator::with_seed(7).generate(2, 2);
        assert_eq!((grid.rows(), grid.cols()), (3, 3));
        assert_eq!(grid.get(Position::new(1, 1)), Cell::Path);
    }

    #[test]
    fn test_seed_determinism() {
        let a = Generator::with_seed(123).generate(21, 21);
        let b = Generator::with_seed(123).generate(21, 21);
        assert_eq!(a, b);
    }

    #[test]
    fn test_start_and_end_reachable() {
        for seed in [1u64, 2, 3, 99] {
            let grid = Generator::with_seed(seed).generate(15, 15);
            let reachable = flood(&grid, grid.start(), |_| true);
            assert!(
                reachable.contains(&grid.end()),
                "end unreachable for seed {}",
                seed
            );
            // Every open cell is reachable from the start.
            assert_eq!(reachable.len(), grid.count(Cell::Path));
        }
    }

    #[test]
    fn test_interior_is_spanning_tree() {
        // The forced entrance/exit connectors open two cells per corner and
        // create a small loop there, so the tree property is checked over
        // the carved interior lattice only.
        let grid = Generator::with_seed(42).generate(21, 21);
        let interior =
            |p: Position| p.row >= 1 && p.row < grid.rows() - 1 && p.col >= 1 && p.col < grid.cols() - 1;

        let cells: Vec<Position> = grid
            .positions()
            .filter(|&p| interior(p) && grid.get(p) == Cell::Path)
            .collect();
        let vertices = cells.len();
        assert!(vertices > 0);

        // Connected: everything reachable from (1,1) without leaving the interior.
        let reachable = flood(&grid, Position::new(1, 1), interior);
        assert_eq!(reachable.len(), vertices);

        // Acyclic: a connected graph is a tree iff edges == vertices - 1.
        let edges: usize = cells
            .iter()
            .map(|&p| {
                open_neighbors(&grid, p)
                    .into_iter()
                    .filter(|&n| interior(n))
                    .count()
            })
            .sum::<usize>()
            / 2;
        assert_eq!(edges, vertices - 1);
    }

    #[test]
    #[should_panic(expected = "at least 1x1")]
    fn test_zero_dimension_panics() {
        Generator::with_seed(0).generate(0, 5);
    }
}

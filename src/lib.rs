//! Generate and solve perfect mazes.
//!
//! A maze is a rectangular grid of [`Cell`]s wrapped in a one-cell wall
//! fence, punctured by an entrance on the top row and an exit on the bottom
//! row. [`MazeGenerator`](maze_generator::MazeGenerator) carves the interior
//! with one of three classic algorithms; each of them produces a perfect
//! maze, where the open cells form a single spanning tree and any two open
//! cells are joined by exactly one simple path.
//!
//! # Examples
//! ```
//! use mazegen::maze_generator::{Algorithm, MazeGenerator};
//! use mazegen::renderer::TextRenderer;
//!
//! let mut generator = MazeGenerator::new(Some(7));
//! let maze = generator.generate(Algorithm::RecursiveBacktracking, 9, 9);
//!
//! let solution = maze.solve();
//! assert!(solution.path_found());
//! println!("{}", TextRenderer::default().render(&solution.maze));
//! ```
//!
//! Kruskal and Prim carving run through the same surface:
//! ```
//! use mazegen::maze_generator::{Algorithm, MazeGenerator};
//!
//! let maze = MazeGenerator::new(Some(1)).generate(Algorithm::Kruskal, 21, 15);
//! assert!(maze.solve().path_found());
//! ```

pub mod maze_generator;
pub mod renderer;

/// State of a single grid cell.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Cell {
    /// Solid cell; never entered.
    Wall,
    /// Open cell.
    Path,
    /// Open cell marked as part of a solved path.
    Step,
}

/// Location in the maze
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

/// Rectangular cell grid with fixed entrance and exit punctures.
///
/// The entrance sits at `(1, 0)` and the exit at `(width - 2, height - 1)`,
/// one column in from each side; both are computed at construction and never
/// move. The grid itself carries no algorithm state beyond the cells.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Maze {
    width: usize,
    height: usize,
    grid: Vec<Vec<Cell>>,
    entrance: Point,
    exit: Point,
}

/// Outcome of solving a maze.
#[derive(Debug)]
pub struct MazeSolution {
    /// Copy of the input grid with the found walk marked as [`Cell::Step`].
    pub maze: Maze,
    /// The walk from entrance to exit, or `None` when the exit is sealed off.
    pub path: Option<Vec<Point>>,
}

impl Maze {
    /// Orthogonal neighbour displacements in scan order: down, right, up,
    /// left. Solving and entrance/exit patching both rely on this order.
    pub(crate) const NEIGHBOURS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

    /// Create an all-open grid with the entrance and exit punctures computed
    /// from the dimensions.
    ///
    /// # Panics
    /// Panics unless `width` and `height` are both at least 3; anything
    /// smaller has no interior to carve.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width >= 3 && height >= 3,
            "maze dimensions must be at least 3x3"
        );
        Maze {
            width,
            height,
            grid: vec![vec![Cell::Path; width]; height],
            entrance: Point { x: 1, y: 0 },
            exit: Point {
                x: width - 2,
                y: height - 1,
            },
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Entrance puncture on the top fence row.
    pub fn entrance(&self) -> Point {
        self.entrance
    }

    /// Exit puncture on the bottom fence row.
    pub fn exit(&self) -> Point {
        self.exit
    }

    /// Cell state at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.grid.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Overwrite the cell state at `(x, y)`.
    ///
    /// # Panics
    /// Panics when `(x, y)` lies outside the grid.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) is outside the grid"
        );
        self.grid[y][x] = cell;
    }

    /// Find a walk from the entrance to the exit and mark it on a copy.
    ///
    /// The search is an exhaustive depth-first walk over 4-connected
    /// non-wall cells, so the returned path is valid but not necessarily the
    /// shortest; for a fixed grid the result is deterministic. The maze
    /// itself is left untouched; the marked copy is handed back in the
    /// solution.
    pub fn solve(&self) -> MazeSolution {
        let mut solved = self.clone();
        let path = self.find_path(self.entrance, self.exit);
        if let Some(steps) = &path {
            for point in steps {
                solved.set(point.x, point.y, Cell::Step);
            }
        }
        MazeSolution { maze: solved, path }
    }

    /// Depth-first search from `start` to `goal`.
    ///
    /// Each stack entry carries the whole walk so far; the first entry to
    /// reach the goal wins. Cells are marked visited when popped and
    /// filtered again before pushing, so every cell is expanded at most
    /// once.
    fn find_path(&self, start: Point, goal: Point) -> Option<Vec<Point>> {
        let mut visited = vec![vec![false; self.width]; self.height];
        let mut stack = vec![(start, vec![start])];

        while let Some((position, path)) = stack.pop() {
            if visited[position.y][position.x] {
                continue;
            }
            visited[position.y][position.x] = true;

            if position == goal {
                return Some(path);
            }

            for next in self.neighbours(position) {
                if !visited[next.y][next.x] && self.get(next.x, next.y) != Some(Cell::Wall) {
                    let mut extended = path.clone();
                    extended.push(next);
                    stack.push((next, extended));
                }
            }
        }
        None
    }

    /// In-bounds orthogonal neighbours of `point`, in scan order.
    fn neighbours(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        Self::NEIGHBOURS.into_iter().filter_map(move |(dx, dy)| {
            let x = point.x.checked_add_signed(dx)?;
            let y = point.y.checked_add_signed(dy)?;
            (x < self.width && y < self.height).then_some(Point { x, y })
        })
    }
}

impl MazeSolution {
    /// Whether a walk from entrance to exit exists.
    pub fn path_found(&self) -> bool {
        self.path.is_some()
    }

    /// Print a one-line summary of the search outcome.
    pub fn print_report(&self) {
        match &self.path {
            Some(path) => println!("Found a path of {} steps.", path.len() - 1),
            None => println!("The exit cannot be reached from the entrance."),
        }
    }
}

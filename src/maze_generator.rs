//! Maze generation
//!
//! All three carving strategies work on the same sub-rectangle model: rooms
//! sit on even offsets from the interior origin `(1, 1)`, walls occupy the
//! odd cells between them, and opening one in-between door joins exactly two
//! rooms. Each strategy builds a spanning tree over the rooms, which is what
//! makes every generated maze perfect.

use petgraph::unionfind::UnionFind;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{Cell, Maze, Point};

/// Carving strategy selector.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Algorithm {
    /// Depth-first carving, backtracking on exhaustion.
    RecursiveBacktracking,
    /// Randomized Kruskal: merge rooms through shuffled candidate walls.
    Kruskal,
    /// Randomized Prim: grow the carved region through a random frontier.
    Prim,
}

/// Maze generator with an injectable random source.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    /// Two-step displacements towards the neighbouring rooms: down, right,
    /// up, left.
    const DIRECTIONS: [(isize, isize); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a `width` by `height` maze with the requested algorithm.
    ///
    /// The outer ring is fenced off, the interior is carved into a perfect
    /// maze, and the entrance/exit punctures are hooked into the carving.
    ///
    /// # Panics
    /// Panics unless `width` and `height` are both at least 3, as per
    /// [`Maze::new`].
    pub fn generate(&mut self, algorithm: Algorithm, width: usize, height: usize) -> Maze {
        let mut maze = Maze::new(width, height);
        Self::add_fence(&mut maze);

        // Carvable interior, one cell in from the fence. Every strategy
        // starts from an all-wall interior and carves cells back open.
        let (min_x, min_y) = (1, 1);
        let (max_x, max_y) = (width - 2, height - 2);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                maze.set(x, y, Cell::Wall);
            }
        }

        match algorithm {
            Algorithm::RecursiveBacktracking => {
                self.carve_backtracking(&mut maze, min_x, min_y, max_x, max_y)
            }
            Algorithm::Kruskal => self.carve_kruskal(&mut maze, min_x, min_y, max_x, max_y),
            Algorithm::Prim => self.carve_prim(&mut maze, min_x, min_y, max_x, max_y),
        }

        Self::ensure_entrance_exit(&mut maze);
        maze
    }

    /// Depth-first carve with an explicit stack.
    ///
    /// The wall/path state doubles as the visited set: a room is unvisited
    /// exactly while it still stands as wall. Advancing opens the door
    /// towards the chosen room; exhausted rooms are popped to backtrack.
    fn carve_backtracking(
        &mut self,
        maze: &mut Maze,
        min_x: usize,
        min_y: usize,
        max_x: usize,
        max_y: usize,
    ) {
        let start = Point { x: min_x, y: min_y };
        maze.set(start.x, start.y, Cell::Path);

        let mut stack = vec![start];
        while let Some(&room) = stack.last() {
            let mut directions = Self::DIRECTIONS;
            directions.shuffle(&mut self.random);

            let mut advanced = false;
            for (dx, dy) in directions {
                let Some(next) = step_from(room, dx, dy, min_x, min_y, max_x, max_y) else {
                    continue;
                };
                if maze.get(next.x, next.y) == Some(Cell::Wall) {
                    let door = midpoint(room, next);
                    maze.set(door.x, door.y, Cell::Path);
                    maze.set(next.x, next.y, Cell::Path);
                    stack.push(next);
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                stack.pop();
            }
        }
    }

    /// Kruskal's algorithm over the room lattice.
    ///
    /// Every room stands open immediately; shuffled candidate walls between
    /// adjacent rooms are opened whenever the two sides are still in
    /// different sets, so no opened door ever closes a cycle.
    fn carve_kruskal(
        &mut self,
        maze: &mut Maze,
        min_x: usize,
        min_y: usize,
        max_x: usize,
        max_y: usize,
    ) {
        let columns = (max_x - min_x) / 2 + 1;
        let rows = (max_y - min_y) / 2 + 1;
        let room_index = |room: Point| (room.y - min_y) / 2 * columns + (room.x - min_x) / 2;

        let mut walls: Vec<(Point, Point)> = Vec::new();
        for y in (min_y..=max_y).step_by(2) {
            for x in (min_x..=max_x).step_by(2) {
                maze.set(x, y, Cell::Path);
                // Candidate walls rightward and downward only, so each
                // adjacent room pair is enumerated once.
                if x + 2 <= max_x {
                    walls.push((Point { x, y }, Point { x: x + 2, y }));
                }
                if y + 2 <= max_y {
                    walls.push((Point { x, y }, Point { x, y: y + 2 }));
                }
            }
        }
        walls.shuffle(&mut self.random);

        let mut sets = UnionFind::<usize>::new(columns * rows);
        for (a, b) in walls {
            if sets.union(room_index(a), room_index(b)) {
                let door = midpoint(a, b);
                maze.set(door.x, door.y, Cell::Path);
            }
        }
    }

    /// Prim's algorithm with a uniformly sampled frontier.
    ///
    /// The frontier may hold stale entries for rooms that were carved
    /// through another parent in the meantime; those are discarded when
    /// drawn, since only rooms still standing as wall get opened.
    fn carve_prim(
        &mut self,
        maze: &mut Maze,
        min_x: usize,
        min_y: usize,
        max_x: usize,
        max_y: usize,
    ) {
        let start = Point { x: min_x, y: min_y };
        maze.set(start.x, start.y, Cell::Path);

        let mut frontier: Vec<(Point, Point)> = Vec::new();
        for (dx, dy) in Self::DIRECTIONS {
            if let Some(next) = step_from(start, dx, dy, min_x, min_y, max_x, max_y) {
                frontier.push((next, start));
            }
        }

        while !frontier.is_empty() {
            let drawn = self.random.gen_range(0..frontier.len());
            let (room, from) = frontier.swap_remove(drawn);
            if maze.get(room.x, room.y) != Some(Cell::Wall) {
                continue;
            }

            maze.set(room.x, room.y, Cell::Path);
            let door = midpoint(room, from);
            maze.set(door.x, door.y, Cell::Path);

            for (dx, dy) in Self::DIRECTIONS {
                if let Some(next) = step_from(room, dx, dy, min_x, min_y, max_x, max_y) {
                    frontier.push((next, room));
                }
            }
        }
    }

    /// Force the outer ring to walls.
    fn add_fence(maze: &mut Maze) {
        for x in 0..maze.width() {
            maze.set(x, 0, Cell::Wall);
            maze.set(x, maze.height() - 1, Cell::Wall);
        }
        for y in 0..maze.height() {
            maze.set(0, y, Cell::Wall);
            maze.set(maze.width() - 1, y, Cell::Wall);
        }
    }

    /// Re-open the entrance and exit punctures and hook them into the maze.
    fn ensure_entrance_exit(maze: &mut Maze) {
        for puncture in [maze.entrance(), maze.exit()] {
            maze.set(puncture.x, puncture.y, Cell::Path);
            Self::connect_to_maze(maze, puncture);
        }
    }

    /// Make sure `puncture` touches an open cell.
    ///
    /// Carving stops at the interior bounds, so a puncture on the fence can
    /// end up with nothing but walls around it. When that happens the first
    /// neighbour lying strictly inside the fence is forced open, in the same
    /// down/right/up/left scan order the solver walks in.
    fn connect_to_maze(maze: &mut Maze, puncture: Point) {
        for (dx, dy) in Maze::NEIGHBOURS {
            let Some((x, y)) = offset(puncture, dx, dy) else {
                continue;
            };
            if maze.get(x, y) == Some(Cell::Path) {
                return;
            }
        }
        for (dx, dy) in Maze::NEIGHBOURS {
            let Some((x, y)) = offset(puncture, dx, dy) else {
                continue;
            };
            if (1..maze.width() - 1).contains(&x) && (1..maze.height() - 1).contains(&y) {
                maze.set(x, y, Cell::Path);
                break;
            }
        }
    }
}

/// Target of a two-step displacement from `room`, if it stays within the
/// interior bounds.
fn step_from(
    room: Point,
    dx: isize,
    dy: isize,
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
) -> Option<Point> {
    let x = room.x.checked_add_signed(dx)?;
    let y = room.y.checked_add_signed(dy)?;
    ((min_x..=max_x).contains(&x) && (min_y..=max_y).contains(&y)).then_some(Point { x, y })
}

/// Door cell between two rooms lying two cells apart.
fn midpoint(a: Point, b: Point) -> Point {
    Point {
        x: (a.x + b.x) / 2,
        y: (a.y + b.y) / 2,
    }
}

/// `puncture` displaced by one step, unless that underflows the grid origin.
fn offset(point: Point, dx: isize, dy: isize) -> Option<(usize, usize)> {
    Some((
        point.x.checked_add_signed(dx)?,
        point.y.checked_add_signed(dy)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALGORITHMS: [Algorithm; 3] = [
        Algorithm::RecursiveBacktracking,
        Algorithm::Kruskal,
        Algorithm::Prim,
    ];

    /// Rooms sit on odd coordinates; count them from the dimensions.
    fn room_count(width: usize, height: usize) -> usize {
        ((width - 3) / 2 + 1) * ((height - 3) / 2 + 1)
    }

    /// Open cells strictly inside the fence.
    fn interior_open_cells(maze: &Maze) -> Vec<Point> {
        (1..maze.height() - 1)
            .flat_map(|y| (1..maze.width() - 1).map(move |x| Point { x, y }))
            .filter(|p| maze.get(p.x, p.y) == Some(Cell::Path))
            .collect()
    }

    /// Flood fill over interior open cells from the carve origin.
    fn reachable_interior_cells(maze: &Maze) -> usize {
        let mut visited = vec![vec![false; maze.width()]; maze.height()];
        let mut stack = vec![Point { x: 1, y: 1 }];
        let mut count = 0;
        while let Some(point) = stack.pop() {
            if visited[point.y][point.x] {
                continue;
            }
            visited[point.y][point.x] = true;
            count += 1;
            for (dx, dy) in Maze::NEIGHBOURS {
                let Some((x, y)) = offset(point, dx, dy) else {
                    continue;
                };
                if (1..maze.width() - 1).contains(&x)
                    && (1..maze.height() - 1).contains(&y)
                    && !visited[y][x]
                    && maze.get(x, y) == Some(Cell::Path)
                {
                    stack.push(Point { x, y });
                }
            }
        }
        count
    }

    #[test]
    fn fence_is_solid_except_for_the_punctures() {
        for algorithm in ALGORITHMS {
            let maze = MazeGenerator::new(Some(2)).generate(algorithm, 10, 7);
            for x in 0..10 {
                for y in [0, 6] {
                    let point = Point { x, y };
                    if point == maze.entrance() || point == maze.exit() {
                        assert_eq!(maze.get(x, y), Some(Cell::Path));
                    } else {
                        assert_eq!(maze.get(x, y), Some(Cell::Wall));
                    }
                }
            }
            for y in 0..7 {
                for x in [0, 9] {
                    assert_eq!(maze.get(x, y), Some(Cell::Wall));
                }
            }
        }
    }

    #[test]
    fn carving_produces_a_spanning_tree() {
        for algorithm in ALGORITHMS {
            for (width, height) in [(5, 5), (7, 7), (13, 9)] {
                let maze = MazeGenerator::new(Some(4)).generate(algorithm, width, height);
                let open = interior_open_cells(&maze);
                let rooms = room_count(width, height);
                // A tree over `rooms` nodes has `rooms - 1` edges, and every
                // opened door is one interior cell.
                assert_eq!(
                    open.len(),
                    2 * rooms - 1,
                    "{algorithm:?} {width}x{height}: carved cell count is off"
                );
                assert_eq!(
                    reachable_interior_cells(&maze),
                    open.len(),
                    "{algorithm:?} {width}x{height}: interior is not connected"
                );
            }
        }
    }

    #[test]
    fn punctures_touch_open_cells() {
        for algorithm in ALGORITHMS {
            for (width, height) in [(7, 7), (8, 7), (7, 8), (8, 8)] {
                let maze = MazeGenerator::new(Some(6)).generate(algorithm, width, height);
                for puncture in [maze.entrance(), maze.exit()] {
                    let touches_open = Maze::NEIGHBOURS.iter().any(|&(dx, dy)| {
                        offset(puncture, dx, dy)
                            .is_some_and(|(x, y)| maze.get(x, y) == Some(Cell::Path))
                    });
                    assert!(
                        touches_open,
                        "{algorithm:?} {width}x{height}: puncture {puncture:?} is sealed off"
                    );
                }
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        for algorithm in ALGORITHMS {
            let first = MazeGenerator::new(Some(99)).generate(algorithm, 15, 11);
            let second = MazeGenerator::new(Some(99)).generate(algorithm, 15, 11);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn degenerate_interior_is_a_single_room() {
        for algorithm in ALGORITHMS {
            let maze = MazeGenerator::new(Some(0)).generate(algorithm, 3, 3);
            assert_eq!(maze.get(1, 1), Some(Cell::Path));
            assert_eq!(interior_open_cells(&maze).len(), 1);
        }
    }

    #[test]
    fn minimum_kruskal_maze_is_solvable() {
        let maze = MazeGenerator::new(Some(8)).generate(Algorithm::Kruskal, 5, 5);
        assert!(maze.solve().path_found());
    }
}

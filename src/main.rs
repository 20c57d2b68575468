//! CLI for maze generation and solving

use anyhow::ensure;
use clap::{Parser, ValueEnum};
use mazegen::maze_generator::{Algorithm, MazeGenerator};
use mazegen::renderer::TextRenderer;

/// Generate a maze and optionally mark a way through it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze generation algorithm
    #[arg(short, long, value_enum, default_value = "rbt")]
    generator: GeneratorKind,

    /// Mark a path from the entrance to the exit
    #[arg(short, long)]
    solve: bool,

    /// Maze width (min: 3)
    #[arg(long, default_value_t = 20)]
    width: usize,

    /// Maze height (min: 3)
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Algorithm tokens accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum GeneratorKind {
    /// Recursive backtracking
    Rbt,
    /// Randomized Kruskal
    Kruskal,
    /// Randomized Prim
    Prim,
}

impl From<GeneratorKind> for Algorithm {
    fn from(kind: GeneratorKind) -> Self {
        match kind {
            GeneratorKind::Rbt => Algorithm::RecursiveBacktracking,
            GeneratorKind::Kruskal => Algorithm::Kruskal,
            GeneratorKind::Prim => Algorithm::Prim,
        }
    }
}

/// Generate the maze, print the rendering
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    ensure!(args.width >= 3, "width must be at least 3");
    ensure!(args.height >= 3, "height must be at least 3");

    let mut generator = MazeGenerator::new(args.seed);
    let maze = generator.generate(args.generator.into(), args.width, args.height);

    let renderer = TextRenderer::new('█', ' ', '●');
    if args.solve {
        let solution = maze.solve();
        println!("{}", renderer.render(&solution.maze));
        if !solution.path_found() {
            solution.print_report();
        }
    } else {
        println!("{}", renderer.render(&maze));
    }
    Ok(())
}

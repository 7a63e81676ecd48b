//! CLI for maze generation

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use perfect_maze::{MazeGenerator, DEFAULT_COLS, DEFAULT_ROWS};
use simple_logger::SimpleLogger;

/// Print a randomly generated perfect maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze height in cells
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Maze width in cells
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Log generation details on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    SimpleLogger::new()
        .without_timestamps()
        .with_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .env()
        .init()
        .context("While initializing logging")?;

    let mut gen = MazeGenerator::new(args.seed);
    let grid = gen
        .generate_maze(args.rows, args.cols)
        .context("While generating maze")?;
    print!("{grid}");
    Ok(())
}

//! CLI for walking a maze in the terminal

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use perfect_maze::game::{EndingCondition, Game};
use perfect_maze::render::Layout;
use perfect_maze::terminal::{fit_layout, KeyboardInput, Terminal};
use perfect_maze::{MazeGenerator, Walker, DEFAULT_COLS, DEFAULT_ROWS};
use simple_logger::SimpleLogger;

/// Find your way from the top left corner of a maze to the bottom right one
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

    /// Frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Cell width in characters [default: fit to terminal]
    #[arg(long)]
    cell_width: Option<i32>,

    /// Cell height in characters [default: fit to terminal]
    #[arg(long)]
    cell_height: Option<i32>,

    /// More logging on stderr, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Generate maze, play it, print result
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    SimpleLogger::new()
        .without_timestamps()
        .with_level(match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .env()
        .init()
        .context("While initializing logging")?;

    let mut gen = MazeGenerator::new(args.seed);
    let grid = gen
        .generate_maze(args.rows, args.cols)
        .context("While generating maze")?;

    let layout = match (args.cell_width, args.cell_height) {
        (None, None) => fit_layout(grid.dimensions()).context("While fitting maze to terminal")?,
        (width, height) => Layout::new(
            width.unwrap_or(Layout::TEXT.cell_width),
            height.unwrap_or(Layout::TEXT.cell_height),
        ),
    }
    .at_least(Layout::MIN);
    let (width, height) = layout.canvas_size(grid.dimensions());

    let ending = {
        let mut terminal = Terminal::open(width, height).context("While opening terminal")?;
        let mut game = Game::new(Walker::new(&grid)?, layout, args.fps);
        game.run(&mut terminal, &mut KeyboardInput)?
    };

    match ending {
        EndingCondition::Goal { moves } => {
            println!("Congratulations, you finished the maze in {moves} moves.")
        }
        EndingCondition::Quit { moves } => println!("Gave up after {moves} moves."),
    }
    Ok(())
}

//! Interactive play loop

use std::time::Duration;

use anyhow::Context;

use crate::render::{self, Canvas, Layout};
use crate::{Direction, MoveOutcome, Walker};

/// Player request
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Quit,
}

/// Source of player commands
pub trait Input {
    /// Wait at most `timeout` for the next command
    fn poll(&mut self, timeout: Duration) -> anyhow::Result<Option<Command>>;
}

/// How the game ended
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndingCondition {
    /// Player reached goal
    Goal { moves: usize },
    /// Player gave up
    Quit { moves: usize },
}

/// Frame loop tying the walker to a canvas and an input
pub struct Game<'a> {
    walker: Walker<'a>,
    layout: Layout,
    /// Time budget of one frame
    frame_length: Duration,
}

impl<'a> Game<'a> {
    /// - `fps`: target frame rate, also bounds how long input is awaited.
    pub fn new(walker: Walker<'a>, layout: Layout, fps: u32) -> Self {
        Self {
            walker,
            layout,
            frame_length: Duration::from_secs(1) / fps.max(1),
        }
    }

    pub fn walker(&self) -> &Walker<'a> {
        &self.walker
    }

    pub fn frame_length(&self) -> Duration {
        self.frame_length
    }

    /// Play until the goal is reached or the player quits
    ///
    /// Each frame handles at most one command, redraws the whole maze and
    /// then checks for the goal, so the winning move is shown.
    pub fn run<C, I>(&mut self, canvas: &mut C, input: &mut I) -> anyhow::Result<EndingCondition>
    where
        C: Canvas + ?Sized,
        I: Input + ?Sized,
    {
        loop {
            match input.poll(self.frame_length).context("While reading input")? {
                Some(Command::Quit) => {
                    log::info!("Player quit after {} moves", self.walker.moves());
                    return Ok(EndingCondition::Quit {
                        moves: self.walker.moves(),
                    });
                }
                Some(Command::Move(direction)) => match self.walker.try_move(direction)? {
                    MoveOutcome::Blocked => log::trace!("{direction:?} blocked"),
                    outcome => log::debug!("{direction:?}: {outcome:?}"),
                },
                None => (),
            }

            render::draw_frame(canvas, &self.walker, self.layout).context("While drawing frame")?;

            if self.walker.is_finished() {
                log::info!("Goal reached in {} moves", self.walker.moves());
                return Ok(EndingCondition::Goal {
                    moves: self.walker.moves(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use crate::game::{Command, EndingCondition, Game, Input};
    use crate::render::{Canvas, Color, Layout, Pixel, TextCanvas};
    use crate::{Direction, FirstChooser, Grid, MazeGenerator, Walker};

    /// Replays commands, then quits
    struct Script(VecDeque<Option<Command>>);

    impl Script {
        fn new(commands: impl IntoIterator<Item = Option<Command>>) -> Self {
            Self(commands.into_iter().collect())
        }
    }

    impl Input for Script {
        fn poll(&mut self, _timeout: Duration) -> anyhow::Result<Option<Command>> {
            Ok(self.0.pop_front().unwrap_or(Some(Command::Quit)))
        }
    }

    /// Text canvas counting presented frames
    struct Recorder {
        canvas: TextCanvas,
        frames: usize,
    }

    impl Canvas for Recorder {
        fn clear(&mut self, color: Color) {
            self.canvas.clear(color)
        }

        fn draw_line(&mut self, from: Pixel, to: Pixel, color: Color) {
            self.canvas.draw_line(from, to, color)
        }

        fn fill_circle(&mut self, center: Pixel, radius: i32, color: Color) {
            self.canvas.fill_circle(center, radius, color)
        }

        fn present(&mut self) -> anyhow::Result<()> {
            self.frames += 1;
            Ok(())
        }
    }

    fn serpentine(rows: usize, cols: usize) -> Grid {
        MazeGenerator::with_chooser(FirstChooser)
            .generate_maze(rows, cols)
            .unwrap()
    }

    fn recorder(grid: &Grid) -> Recorder {
        Recorder {
            canvas: TextCanvas::for_grid(grid, Layout::TEXT),
            frames: 0,
        }
    }

    #[test]
    fn reaching_goal_wins() {
        let grid = serpentine(2, 3);
        let mut game = Game::new(Walker::new(&grid).unwrap(), Layout::TEXT, 60);
        let mut canvas = recorder(&grid);

        use Direction::*;
        let mut input = Script::new([Down, Right, Up, Right, Down].map(|d| Some(Command::Move(d))));

        let ending = game.run(&mut canvas, &mut input).unwrap();

        assert_eq!(ending, EndingCondition::Goal { moves: 5 });
        // The winning move gets its own frame
        assert_eq!(canvas.frames, 5);
    }

    #[test]
    fn blocked_moves_and_idle_frames_keep_playing() {
        let grid = serpentine(2, 2);
        let mut game = Game::new(Walker::new(&grid).unwrap(), Layout::TEXT, 30);
        let mut canvas = recorder(&grid);
        let mut input = Script::new([
            Some(Command::Move(Direction::Right)),
            None,
            Some(Command::Move(Direction::Up)),
            None,
        ]);

        let ending = game.run(&mut canvas, &mut input).unwrap();

        assert_eq!(ending, EndingCondition::Quit { moves: 0 });
        assert_eq!(canvas.frames, 4);
        assert_eq!(game.walker().moves(), 0);
    }

    #[test]
    fn quitting_stops_immediately() {
        let grid = serpentine(3, 3);
        let mut game = Game::new(Walker::new(&grid).unwrap(), Layout::TEXT, 60);
        let mut canvas = recorder(&grid);
        let mut input = Script::new([
            Some(Command::Move(Direction::Down)),
            Some(Command::Quit),
            Some(Command::Move(Direction::Down)),
        ]);

        let ending = game.run(&mut canvas, &mut input).unwrap();

        assert_eq!(ending, EndingCondition::Quit { moves: 1 });
        assert_eq!(canvas.frames, 1);
    }

    #[test]
    fn single_cell_maze_wins_without_input() {
        let grid = serpentine(1, 1);
        let mut game = Game::new(Walker::new(&grid).unwrap(), Layout::TEXT, 60);
        let mut canvas = recorder(&grid);

        let ending = game.run(&mut canvas, &mut Script::new([None])).unwrap();

        assert_eq!(ending, EndingCondition::Goal { moves: 0 });
        assert_eq!(canvas.frames, 1);
    }

    #[test]
    fn frame_length_follows_fps() {
        let grid = serpentine(1, 1);

        let game = Game::new(Walker::new(&grid).unwrap(), Layout::TEXT, 50);
        assert_eq!(game.frame_length(), Duration::from_millis(20));

        let game = Game::new(Walker::new(&grid).unwrap(), Layout::TEXT, 0);
        assert_eq!(game.frame_length(), Duration::from_secs(1));
    }
}

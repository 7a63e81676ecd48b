//! Terminal front end built on crossterm

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::Context;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{self, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};

use crate::game::{Command, Input};
use crate::render::{Canvas, Color, Layout, Pixel, TextCanvas};
use crate::Direction;

/// Full screen canvas on the alternate screen
///
/// The terminal is switched back to normal when dropped.
pub struct Terminal {
    canvas: TextCanvas,
    out: Stdout,
}

impl Terminal {
    /// Enter raw mode on the alternate screen, with a canvas of
    /// `width` x `height` characters.
    pub fn open(width: i32, height: i32) -> anyhow::Result<Self> {
        let (columns, rows) = terminal::size().context("Cannot read terminal size")?;
        if width > i32::from(columns) || height > i32::from(rows) {
            log::warn!(
                "Maze needs {width}x{height} characters, terminal has {columns}x{rows}; \
                 parts will be cut off"
            );
        }

        terminal::enable_raw_mode().context("Cannot enable raw mode")?;
        // Restored on drop, also if the setup below fails
        let mut terminal = Self {
            canvas: TextCanvas::new(width.max(0) as usize, height.max(0) as usize),
            out: io::stdout(),
        };
        terminal
            .out
            .execute(EnterAlternateScreen)?
            .execute(Hide)?
            .execute(Clear(ClearType::All))?;

        Ok(terminal)
    }

    fn restore(&mut self) -> io::Result<()> {
        self.out
            .execute(ResetColor)?
            .execute(Show)?
            .execute(LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::error!("Failed to restore terminal: {err}");
        }
    }
}

impl Canvas for Terminal {
    fn clear(&mut self, color: Color) {
        self.canvas.clear(color);
    }

    fn draw_line(&mut self, from: Pixel, to: Pixel, color: Color) {
        self.canvas.draw_line(from, to, color);
    }

    fn fill_circle(&mut self, center: Pixel, radius: i32, color: Color) {
        self.canvas.fill_circle(center, radius, color);
    }

    fn present(&mut self) -> anyhow::Result<()> {
        for (y, row) in self.canvas.rows().enumerate() {
            self.out.queue(MoveTo(0, y as u16))?;
            let mut current = None;
            for &(glyph, color) in row {
                if current != Some(color) {
                    self.out.queue(SetForegroundColor(terminal_color(color)))?;
                    current = Some(color);
                }
                self.out.queue(Print(glyph))?;
            }
        }
        self.out.queue(ResetColor)?;
        self.out.flush().context("Cannot write to terminal")
    }
}

/// Largest cells that show a maze of `dimensions` on the current terminal
pub fn fit_layout(dimensions: (usize, usize)) -> anyhow::Result<Layout> {
    let (columns, rows) = terminal::size().context("Cannot read terminal size")?;
    Ok(fit_screen((columns, rows), dimensions))
}

/// The canvas is one character wider and taller than the cells, for the
/// closing walls.
fn fit_screen((columns, rows): (u16, u16), dimensions: (usize, usize)) -> Layout {
    Layout::fit(i32::from(columns) - 1, i32::from(rows) - 1, dimensions)
}

fn terminal_color(Color { r, g, b }: Color) -> style::Color {
    style::Color::Rgb { r, g, b }
}

/// Arrow keys move, `q`, `Esc` and `Ctrl-C` quit
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyboardInput;

impl Input for KeyboardInput {
    fn poll(&mut self, timeout: Duration) -> anyhow::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                key_command(key.code, key.modifiers)
            }
            _ => None,
        })
    }
}

/// Command bound to a key, if any
pub fn key_command(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Up => Some(Command::Move(Direction::Up)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        _ => None,
    }
}

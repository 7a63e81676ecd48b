//! Drawing mazes
//!
//! Drawing goes through a [Canvas], which only needs to know how to stroke
//! a line and fill a circle. [TextCanvas] implements it on a grid of
//! characters, for printing mazes and for the terminal front end.

use std::fmt;

use itertools::Itertools;

use crate::{Grid, Point, Walker};

/// RGB color
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Canvas position `(x, y)`, growing right and down
pub type Pixel = (i32, i32);

/// Drawing surface
pub trait Canvas {
    /// Wipe the whole canvas with `color`
    fn clear(&mut self, color: Color);

    /// Stroke a line, both ends included
    fn draw_line(&mut self, from: Pixel, to: Pixel, color: Color);

    fn fill_circle(&mut self, center: Pixel, radius: i32, color: Color);

    /// Show everything drawn since the last call
    fn present(&mut self) -> anyhow::Result<()>;
}

/// Size of a single cell on the canvas
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Layout {
    pub cell_width: i32,
    pub cell_height: i32,
}

impl Layout {
    /// Default layout for printing mazes as text
    pub const TEXT: Layout = Layout::new(4, 2);

    /// Smallest layout where walls of neighboring cells do not touch
    pub const MIN: Layout = Layout::new(2, 2);

    pub const fn new(cell_width: i32, cell_height: i32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    /// Split a `width` x `height` window evenly between the cells of a maze
    pub fn fit(width: i32, height: i32, (rows, cols): (usize, usize)) -> Self {
        let cols = i32::try_from(cols).unwrap_or(i32::MAX).max(1);
        let rows = i32::try_from(rows).unwrap_or(i32::MAX).max(1);
        Self::new((width / cols).max(1), (height / rows).max(1))
    }

    /// Grow cells to be at least as large as `other`
    pub fn at_least(self, other: Layout) -> Self {
        Self::new(
            self.cell_width.max(other.cell_width),
            self.cell_height.max(other.cell_height),
        )
    }

    /// Top left corner of a cell
    pub fn origin(&self, point: Point) -> Pixel {
        (
            point.col as i32 * self.cell_width,
            point.row as i32 * self.cell_height,
        )
    }

    pub fn center(&self, point: Point) -> Pixel {
        let (x, y) = self.origin(point);
        (x + self.cell_width / 2, y + self.cell_height / 2)
    }

    /// Radius of the player and goal markers
    pub fn marker_radius(&self) -> i32 {
        self.cell_width.min(self.cell_height) / 4
    }

    /// Canvas size needed for a maze of `(rows, cols)`, outer walls included
    pub fn canvas_size(&self, (rows, cols): (usize, usize)) -> (i32, i32) {
        (
            cols as i32 * self.cell_width + 1,
            rows as i32 * self.cell_height + 1,
        )
    }
}

/// Stroke every standing wall of the maze
pub fn draw_maze<C: Canvas + ?Sized>(canvas: &mut C, grid: &Grid, layout: Layout, color: Color) {
    let (w, h) = (layout.cell_width, layout.cell_height);
    for cell in grid.cells() {
        let (x, y) = layout.origin(cell.point());
        if cell.walls.top {
            canvas.draw_line((x, y), (x + w, y), color);
        }
        if cell.walls.right {
            canvas.draw_line((x + w, y), (x + w, y + h), color);
        }
        if cell.walls.bottom {
            canvas.draw_line((x, y + h), (x + w, y + h), color);
        }
        if cell.walls.left {
            canvas.draw_line((x, y), (x, y + h), color);
        }
    }
}

/// Round marker in the middle of a cell
pub fn draw_marker<C: Canvas + ?Sized>(canvas: &mut C, layout: Layout, point: Point, color: Color) {
    canvas.fill_circle(layout.center(point), layout.marker_radius(), color);
}

/// Draw and present a full frame: maze, player and goal
pub fn draw_frame<C: Canvas + ?Sized>(
    canvas: &mut C,
    walker: &Walker,
    layout: Layout,
) -> anyhow::Result<()> {
    canvas.clear(Color::BLACK);
    draw_maze(canvas, walker.grid(), layout, Color::WHITE);
    draw_marker(canvas, layout, walker.position(), Color::RED);
    draw_marker(canvas, layout, walker.goal(), Color::WHITE);
    canvas.present()
}

const BLANK: char = ' ';
const CORNER: char = '+';
const HORIZONTAL: char = '-';
const VERTICAL: char = '|';
const DIAGONAL: char = '*';
const MARKER: char = 'o';

/// Canvas of colored characters, one character per pixel
#[derive(PartialEq, Clone, Debug)]
pub struct TextCanvas {
    width: usize,
    height: usize,
    glyphs: Vec<(char, Color)>,
}

impl TextCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            glyphs: vec![(BLANK, Color::BLACK); width * height],
        }
    }

    /// Canvas just large enough for `grid`
    pub fn for_grid(grid: &Grid, layout: Layout) -> Self {
        let (width, height) = layout.canvas_size(grid.dimensions());
        Self::new(width.max(0) as usize, height.max(0) as usize)
    }

    /// `(width, height)`
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn glyph(&self, (x, y): Pixel) -> Option<(char, Color)> {
        self.offset((x, y)).map(|offset| self.glyphs[offset])
    }

    /// Glyph rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[(char, Color)]> {
        self.glyphs.chunks(self.width)
    }

    fn offset(&self, (x, y): Pixel) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    /// Set a single glyph; pixels outside the canvas are ignored
    fn plot(&mut self, pixel: Pixel, glyph: char, color: Color) {
        if let Some(offset) = self.offset(pixel) {
            self.glyphs[offset] = (glyph, color);
        }
    }
}

impl Canvas for TextCanvas {
    fn clear(&mut self, color: Color) {
        self.glyphs.fill((BLANK, color));
    }

    fn draw_line(&mut self, from: Pixel, to: Pixel, color: Color) {
        let stroke = if from.1 == to.1 {
            HORIZONTAL
        } else if from.0 == to.0 {
            VERTICAL
        } else {
            DIAGONAL
        };

        for pixel in line_pixels(from, to) {
            let glyph = if pixel == from || pixel == to {
                CORNER
            } else {
                match self.glyph(pixel) {
                    Some((existing, _)) if existing != BLANK && existing != stroke => CORNER,
                    _ => stroke,
                }
            };
            self.plot(pixel, glyph, color);
        }
    }

    fn fill_circle(&mut self, (cx, cy): Pixel, radius: i32, color: Color) {
        let radius = radius.max(0);
        for (dy, dx) in (-radius..=radius).cartesian_product(-radius..=radius) {
            if dx * dx + dy * dy <= radius * radius {
                self.plot((cx + dx, cy + dy), MARKER, color);
            }
        }
    }

    fn present(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .rows()
            .map(|row| row.iter().map(|(glyph, _)| glyph).collect::<String>())
            .join("\n");
        write!(f, "{text}")
    }
}

/// Pixels on the line between `from` and `to` (Bresenham)
fn line_pixels(from: Pixel, to: Pixel) -> Vec<Pixel> {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let step_x = if x < to.0 { 1 } else { -1 };
    let step_y = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut pixels = Vec::with_capacity((dx - dy + 1) as usize);
    loop {
        pixels.push((x, y));
        if (x, y) == to {
            break;
        }
        let err2 = 2 * err;
        if err2 >= dy {
            err += dy;
            x += step_x;
        }
        if err2 <= dx {
            err += dx;
            y += step_y;
        }
    }
    pixels
}

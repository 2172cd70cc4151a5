//! Plays one burst of each style as colored ASCII in the terminal.
//!
//! Run with: cargo run --example terminal_burst

use std::io::{self, BufWriter, Write};
use std::thread;
use std::time::Duration;

use popfx::prelude::*;

const COLS: usize = 80;
const ROWS: usize = 24;

#[derive(Clone, Copy)]
struct Cell {
    glyph: char,
    color: Vec3,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: Vec3::ZERO,
};

/// A character-grid surface. Terminal cells are about twice as tall as they
/// are wide, so vertical coordinates are halved when plotting.
struct TermSurface {
    cells: Vec<Cell>,
}

impl TermSurface {
    fn new() -> Self {
        Self {
            cells: vec![BLANK; COLS * ROWS],
        }
    }

    fn plot(&mut self, x: f32, y: f32, glyph: char, color: Vec3) {
        let col = x.round() as isize;
        let row = (y / 2.0).round() as isize;
        if (0..COLS as isize).contains(&col) && (0..ROWS as isize).contains(&row) {
            self.cells[row as usize * COLS + col as usize] = Cell { glyph, color };
        }
    }

    fn present(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "\x1b[H")?;
        for row in self.cells.chunks(COLS) {
            for cell in row {
                if cell.glyph == ' ' {
                    out.write_all(b" ")?;
                } else {
                    let r = (cell.color.x * 255.0) as u8;
                    let g = (cell.color.y * 255.0) as u8;
                    let b = (cell.color.z * 255.0) as u8;
                    write!(out, "\x1b[38;2;{r};{g};{b}m{}", cell.glyph)?;
                }
            }
            out.write_all(b"\x1b[0m\r\n")?;
        }
        out.flush()
    }
}

fn shade(opacity: f32) -> char {
    match opacity {
        o if o > 0.66 => '#',
        o if o > 0.33 => '+',
        _ => '.',
    }
}

impl Surface for TermSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(COLS as f32, (ROWS * 2) as f32)
    }

    fn clear(&mut self, _origin: Vec2, _size: Vec2) {
        self.cells.fill(BLANK);
    }

    fn fill_rect(&mut self, center: Vec2, _size: Vec2, _rotation: f32, color: Vec3, opacity: f32) {
        self.plot(center.x, center.y, shade(opacity), color * (0.4 + 0.6 * opacity));
    }

    fn fill_circle(&mut self, center: Vec2, _radius: f32, color: Vec3, opacity: f32) {
        let glyph = if opacity > 0.5 { '@' } else { 'o' };
        self.plot(center.x, center.y, glyph, color * (0.4 + 0.6 * opacity));
    }

    fn stroke_circle(&mut self, center: Vec2, _radius: f32, color: Vec3, opacity: f32, _width: f32) {
        self.plot(center.x, center.y, 'o', color * (0.4 + 0.6 * opacity));
    }
}

/// One-slot scheduler; the demo loop drains it once per sleep.
#[derive(Default)]
struct DemoScheduler {
    pending: Option<FrameToken>,
}

impl FrameScheduler for DemoScheduler {
    fn request_frame(&mut self, token: FrameToken) {
        self.pending = Some(token);
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }
}

fn play(
    fx: &mut BurstLoop,
    style: Style,
    surface: &mut TermSurface,
    sched: &mut DemoScheduler,
    out: &mut impl Write,
) -> io::Result<()> {
    let origin = Vec2::new(COLS as f32 / 2.0, ROWS as f32 * 2.0 * 0.7);
    fx.activate(style, origin, sched);

    while let Some(token) = sched.pending.take() {
        fx.on_frame(token, Some(&mut *surface), &mut *sched);
        surface.present(out)?;
        thread::sleep(Duration::from_millis(33));
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write!(out, "\x1b[2J\x1b[?25l")?;
    out.flush()?;

    let mut fx = BurstLoop::new();
    let mut surface = TermSurface::new();
    let mut sched = DemoScheduler::default();

    for style in [Style::Game, Style::Media] {
        play(&mut fx, style, &mut surface, &mut sched, &mut out)?;
        thread::sleep(Duration::from_millis(400));
    }

    write!(out, "\x1b[?25h")?;
    out.flush()
}

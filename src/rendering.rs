use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::entities::Mood;
use crate::presentation::{Background, RenderSink, Sprite};
use crate::types::{Arena, Rect};

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer
            .get(y as usize)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row(y).contains(needle))
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

// --- GameGrid: one character per terminal cell ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn write_str(&mut self, x: u16, y: u16, s: &str) {
        for (i, c) in s.chars().enumerate() {
            self.set_char(x.saturating_add(i as u16), y, c);
        }
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![' '; self.width as usize]; self.height as usize];
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

/// Inclusive cell span covered by `rect`, or `None` when it is off-grid.
fn cell_span(rect: &Rect, arena: &Arena, width: u16, height: u16) -> Option<(u16, u16, u16, u16)> {
    let sx = width as f64 / arena.width;
    let sy = height as f64 / arena.height;
    let x0 = (rect.left() * sx).floor().max(0.0);
    let y0 = (rect.top() * sy).floor().max(0.0);
    let x1 = ((rect.right() * sx).ceil() - 1.0).min(width as f64 - 1.0);
    let y1 = ((rect.bottom() * sy).ceil() - 1.0).min(height as f64 - 1.0);
    if x1 < x0 || y1 < y0 {
        return None;
    }
    Some((x0 as u16, y0 as u16, x1.max(x0) as u16, y1.max(y0) as u16))
}

fn beam_char(degrees: f64) -> char {
    match ((degrees + 22.5).rem_euclid(180.0) / 45.0) as u32 {
        0 => '-',
        1 => '/',
        2 => '|',
        _ => '\\',
    }
}

/// Renders world rectangles as characters on a terminal-sized grid.
pub struct TerminalCanvas {
    pub grid: GameGrid,
    pub target: OutputTarget,
    arena: Arena,
}

impl TerminalCanvas {
    pub fn new(width: u16, height: u16, target: OutputTarget, arena: Arena) -> Self {
        TerminalCanvas { grid: GameGrid::new(width, height), target, arena }
    }

    fn fill(&mut self, span: (u16, u16, u16, u16), c: char) {
        let (x0, y0, x1, y1) = span;
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.grid.set_char(x, y, c);
            }
        }
    }

    fn outline(&mut self, span: (u16, u16, u16, u16), c: char) {
        let (x0, y0, x1, y1) = span;
        for x in x0..=x1 {
            self.grid.set_char(x, y0, c);
            self.grid.set_char(x, y1, c);
        }
        for y in y0..=y1 {
            self.grid.set_char(x0, y, c);
            self.grid.set_char(x1, y, c);
        }
    }

    fn to_cell(&self, x: f64, y: f64) -> (u16, u16) {
        let cx = (x * self.grid.width as f64 / self.arena.width).clamp(0.0, u16::MAX as f64);
        let cy = (y * self.grid.height as f64 / self.arena.height).clamp(0.0, u16::MAX as f64);
        (cx as u16, cy as u16)
    }

    /// Blank screen with a few centered lines, used outside the game loop.
    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        self.grid.clear();
        let top = (self.grid.height / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let x = (self.grid.width / 2).saturating_sub(line.chars().count() as u16 / 2);
            self.grid.write_str(x, top + i as u16, line);
        }
        self.present()
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        self.grid.clear_screen_manual(&mut self.target)?;
        self.target.flush()
    }
}

impl RenderSink for TerminalCanvas {
    fn begin_frame(&mut self, background: Background) {
        self.grid.clear();
        let star = match background {
            Background::Morning => return,
            Background::Evening => '·',
            Background::Night => '.',
        };
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                if (x as u32 * 31 + y as u32 * 17) % 23 == 0 {
                    self.grid.set_char(x, y, star);
                }
            }
        }
    }

    fn draw(&mut self, sprite: Sprite, rect: &Rect) {
        let Some(span) = cell_span(rect, &self.arena, self.grid.width, self.grid.height) else {
            return;
        };
        let (x0, y0, x1, y1) = span;
        let (cx, cy) = ((x0 + x1) / 2, (y0 + y1) / 2);
        match sprite {
            Sprite::Avatar { pose, mood, hyper } => {
                if hyper {
                    self.outline(span, '#');
                }
                self.grid.set_char(cx, cy, pose.glyph);
                let face = match mood {
                    Mood::Neutral => None,
                    Mood::Joy => Some('♪'),
                    Mood::Sad => Some('×'),
                };
                if let Some(face) = face {
                    self.grid.set_char(cx, cy.saturating_sub(1), face);
                }
            }
            Sprite::Enemy { variant } => {
                let c = ['W', 'M', 'V'][variant as usize % 3];
                self.fill(span, c);
            }
            Sprite::Boss => {
                self.outline(span, '#');
                self.grid.write_str(cx.saturating_sub(2), cy, "BOSS");
            }
            Sprite::Beam { degrees } => self.fill(span, beam_char(degrees)),
            Sprite::Bomb { .. } => self.fill(span, 'o'),
            Sprite::BossBomb => self.fill(span, '@'),
            Sprite::Gravity => self.outline(span, ':'),
            Sprite::Explosion { frame } => self.fill(span, if frame == 0 { '*' } else { '+' }),
        }
    }

    fn text(&mut self, text: &str, x: f64, y: f64) {
        let (cx, cy) = self.to_cell(x, y);
        self.grid.write_str(cx, cy, text);
    }

    fn present(&mut self) -> io::Result<()> {
        self.grid.render(&mut self.target)?;
        self.target.flush()?;
        if let OutputTarget::ScreenBuffer(sb) = &self.target {
            sb.print_to_log();
        }
        Ok(())
    }
}

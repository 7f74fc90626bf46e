/// ASCII line canvas for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::LineSurface;

const EMPTY: char = ' ';
const EDGE: char = '*';
const ENDPOINT: char = 'o';

/// Character grid that wireframe lines are rasterized into
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![EMPTY; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(EMPTY);
    }

    /// Change the canvas size, discarding its contents
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.char_buffer = vec![EMPTY; width * height];
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.char_buffer[y * self.width + x])
        } else {
            None
        }
    }

    /// Pixel position to cell; positions on the right/bottom border map to the last cell
    fn cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let cx = (x.floor() as usize).min(self.width.checked_sub(1)?);
        let cy = (y.floor() as usize).min(self.height.checked_sub(1)?);
        if x > self.width as f64 || y > self.height as f64 {
            return None;
        }
        Some((cx, cy))
    }

    fn plot(&mut self, x: f64, y: f64, c: char) {
        if let Some((cx, cy)) = self.cell(x, y) {
            let idx = cy * self.width + cx;
            // Endpoints win over edges
            if self.char_buffer[idx] != ENDPOINT {
                self.char_buffer[idx] = c;
            }
        }
    }

    /// Plain text rendering of the canvas, one line per row
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.char_buffer.chunks(self.width.max(1)) {
            text.extend(row.iter());
            text.push('\n');
        }
        text
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    ENDPOINT => Color::Red,
                    EDGE => Color::White,
                    _ => Color::DarkGrey,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl LineSurface for AsciiRenderer {
    fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    /// DDA stepping, one cell per step along the major axis
    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot(x0 + dx * t, y0 + dy * t, EDGE);
        }

        self.plot(x0, y0, ENDPOINT);
        self.plot(x1, y1, ENDPOINT);
    }
}

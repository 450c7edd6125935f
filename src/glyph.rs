// Retrotape - BASIC tokenizers and cassette audio encoders for 1980s home computers
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Monochrome character glyphs exported as hex bytes.

/// Characters of ASCII art that mark a set pixel.
const ON_PIXELS: [char; 4] = ['#', 'X', '*', '1'];

/// A pixel grid whose width is a whole number of bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    columns: usize,
    rows: usize,
    pixels: Vec<bool>,
}

impl GlyphGrid {
    /// Create a blank grid. `columns` is rounded up to a multiple of 8.
    pub fn new(columns: usize, rows: usize) -> Self {
        let columns = columns.div_ceil(8).max(1) * 8;
        Self {
            columns,
            rows,
            pixels: vec![false; columns * rows],
        }
    }

    /// Build a grid from ASCII art, one text line per row.
    pub fn from_art(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

        let mut grid = Self::new(width, lines.len());
        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                if ON_PIXELS.contains(&c) {
                    grid.set(x, y, true);
                }
            }
        }
        grid
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.columns && y < self.rows).then(|| y * self.columns + x)
    }

    /// Pixel state; out of range pixels are off.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.index(x, y).is_some_and(|i| self.pixels[i])
    }

    /// Set a pixel. Out of range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = on;
        }
    }

    /// Flip a pixel.
    pub fn toggle(&mut self, x: usize, y: usize) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = !self.pixels[i];
        }
    }

    /// Flip every pixel.
    pub fn invert(&mut self) {
        for pixel in &mut self.pixels {
            *pixel = !*pixel;
        }
    }

    /// Clear every pixel.
    pub fn reset(&mut self) {
        self.pixels.fill(false);
    }

    /// Bytes of one row, leftmost pixel in the most significant bit.
    pub fn row_bytes(&self, y: usize) -> Vec<u8> {
        let start = y * self.columns;
        self.pixels
            .get(start..start + self.columns)
            .unwrap_or_default()
            .chunks(8)
            .map(|block| {
                block
                    .iter()
                    .enumerate()
                    .filter(|(_, on)| **on)
                    .fold(0u8, |byte, (i, _)| byte | (1 << (7 - i)))
            })
            .collect()
    }

    /// One line per row of uppercase hex bytes separated by spaces.
    pub fn hex_rows(&self) -> String {
        (0..self.rows)
            .map(|y| {
                self.row_bytes(y)
                    .iter()
                    .map(|b| format!("{:02X}", b))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

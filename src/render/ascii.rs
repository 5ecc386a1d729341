// src/render/ascii.rs
use crate::render::{TileRenderer, lookup};
use crate::tile::TileType;
use std::fmt;

/// Глифы по умолчанию в порядке индексов таблицы отрисовки
pub const DEFAULT_GLYPHS: [char; 7] = ['@', 'E', '#', '+', 'k', '/', '>'];

/// Текстовый рендерер: один символ на клетку, пустые клетки — пробел
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    pub width: u32,
    pub height: u32,
    glyphs: Vec<char>,
    cells: Vec<char>,
    skipped: usize,
}

impl AsciiRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_glyphs(width, height, DEFAULT_GLYPHS.to_vec())
    }

    pub fn with_glyphs(width: u32, height: u32, glyphs: Vec<char>) -> Self {
        Self {
            width,
            height,
            glyphs,
            cells: vec![' '; (width * height) as usize],
            skipped: 0,
        }
    }

    #[must_use]
    pub fn glyph_at(&self, x: u32, y: u32) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[(y * self.width + x) as usize])
    }

    /// Сколько клеток не удалось нарисовать из-за отсутствующего глифа
    #[must_use]
    pub fn skipped_tiles(&self) -> usize {
        self.skipped
    }
}

impl TileRenderer for AsciiRenderer {
    fn reset(&mut self) {
        self.cells.fill(' ');
        self.skipped = 0;
    }

    fn place(&mut self, x: u32, y: u32, tile: TileType) {
        if x >= self.width || y >= self.height {
            return;
        }
        match lookup(&self.glyphs, tile, x, y) {
            Some(glyph) => self.cells[(y * self.width + x) as usize] = glyph,
            None => self.skipped += 1,
        }
    }
}

impl fmt::Display for AsciiRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1) as usize) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

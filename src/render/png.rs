// src/render/png.rs
//! Визуализация уровня в PNG
//!
//! Каждая клетка сетки становится квадратом `tile_size × tile_size` пикселей.
//! Цвет берётся из палитры по индексу таблицы отрисовки (`ordinal − 1`);
//! клетки без тайла закрашиваются фоном. Сборка растра распараллеливается
//! через rayon при включённой фиче `parallel`.

use crate::error::DungeonError;
use crate::render::{TileRenderer, lookup};
use crate::tile::TileType;
use image::error::{ParameterError, ParameterErrorKind};
use image::{ImageBuffer, ImageError, Rgba};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect as PixelRect;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::path::Path;

pub type Color = [u8; 4];

/// Палитра по умолчанию: игрок, враг, стена, дверь, ключ, кинжал, выход
pub const DEFAULT_PALETTE: [Color; 7] = [
    [66, 135, 245, 255],
    [214, 48, 49, 255],
    [70, 64, 60, 255],
    [181, 120, 46, 255],
    [246, 206, 62, 255],
    [190, 190, 200, 255],
    [46, 204, 113, 255],
];

const BACKGROUND: Color = [24, 22, 28, 255];
const GRID_LINE: Color = [12, 12, 16, 255];

pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
    /// Рисовать контуры клеток
    pub grid_lines: bool,
    palette: Vec<Color>,
    cells: Vec<Option<Color>>,
    skipped: usize,
}

impl PngRenderer {
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        Self::with_palette(width, height, tile_size, DEFAULT_PALETTE.to_vec())
    }

    pub fn with_palette(width: u32, height: u32, tile_size: u32, palette: Vec<Color>) -> Self {
        Self {
            width,
            height,
            tile_size: tile_size.max(1),
            grid_lines: false,
            palette,
            cells: vec![None; (width * height) as usize],
            skipped: 0,
        }
    }

    #[must_use]
    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[(y * self.width + x) as usize]
    }

    #[must_use]
    pub fn skipped_tiles(&self) -> usize {
        self.skipped
    }

    /// Растр RGBA, строка пикселей за строкой
    pub fn to_rgba_image(&self) -> Vec<u8> {
        let row_bytes = (self.width * self.tile_size * 4) as usize;
        let mut data = vec![0u8; row_bytes * (self.height * self.tile_size) as usize];
        if row_bytes == 0 {
            return data;
        }

        #[cfg(feature = "parallel")]
        data.par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(py, row)| self.fill_pixel_row(py as u32, row));

        #[cfg(not(feature = "parallel"))]
        data.chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(py, row)| self.fill_pixel_row(py as u32, row));

        data
    }

    fn fill_pixel_row(&self, py: u32, row: &mut [u8]) {
        let ty = py / self.tile_size;
        for (px, pixel) in row.chunks_exact_mut(4).enumerate() {
            let tx = px as u32 / self.tile_size;
            let color = self.cells[(ty * self.width + tx) as usize].unwrap_or(BACKGROUND);
            pixel.copy_from_slice(&color);
        }
    }

    pub fn save_as_png(&self, path: impl AsRef<Path>) -> Result<(), DungeonError> {
        let (w, h) = (self.width * self.tile_size, self.height * self.tile_size);
        let mut img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_raw(w, h, self.to_rgba_image()).ok_or_else(|| {
                ImageError::Parameter(ParameterError::from_kind(
                    ParameterErrorKind::DimensionMismatch,
                ))
            })?;

        if self.grid_lines && self.tile_size >= 3 {
            for ty in 0..self.height {
                for tx in 0..self.width {
                    let rect = PixelRect::at((tx * self.tile_size) as i32, (ty * self.tile_size) as i32)
                        .of_size(self.tile_size, self.tile_size);
                    draw_hollow_rect_mut(&mut img, rect, Rgba(GRID_LINE));
                }
            }
        }

        img.save(path)?;
        Ok(())
    }
}

impl TileRenderer for PngRenderer {
    fn reset(&mut self) {
        self.cells.fill(None);
        self.skipped = 0;
    }

    fn place(&mut self, x: u32, y: u32, tile: TileType) {
        if x >= self.width || y >= self.height {
            return;
        }
        match lookup(&self.palette, tile, x, y) {
            Some(color) => self.cells[(y * self.width + x) as usize] = Some(color),
            None => self.skipped += 1,
        }
    }
}

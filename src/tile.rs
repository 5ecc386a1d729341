// src/tile.rs
//! Тайлы и сетка тайлов
//!
//! Порядковые номера `TileType` — часть контракта с рендерерами: значение − 1
//! используется как индекс в таблице отрисовки (палитре, таблице глифов).
//! Поэтому порядок вариантов менять нельзя.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileType {
    /// Ничего не рисуется
    #[default]
    Empty = 0,
    Player,
    Enemy,
    Wall,
    Door,
    Key,
    Dagger,
    End,
}

impl TileType {
    /// Все отрисовываемые типы в порядке индексов таблицы отрисовки
    pub const RENDERABLE: [TileType; 7] = [
        TileType::Player,
        TileType::Enemy,
        TileType::Wall,
        TileType::Door,
        TileType::Key,
        TileType::Dagger,
        TileType::End,
    ];

    #[must_use]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Индекс в таблице отрисовки; `None` для `Empty`
    #[must_use]
    pub fn render_index(self) -> Option<usize> {
        (self.ordinal() as usize).checked_sub(1)
    }
}

/// Сетка `height × width`, адресация `[y][x]`, хранение построчное
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    pub width: u32,
    pub height: u32,
    pub data: Vec<TileType>,
}

impl TileGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![TileType::Empty; (width * height) as usize],
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    #[must_use]
    pub fn in_bounds(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Тайл в клетке; `None` за пределами сетки
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        if !self.in_bounds(Point::new(x, y)) {
            return None;
        }
        Some(self.data[(y as u32 * self.width + x as u32) as usize])
    }

    /// Запись одной клетки. Координаты вне сетки молча отбрасываются.
    pub fn set(&mut self, x: i32, y: i32, tile: TileType) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.data[(y as u32 * self.width + x as u32) as usize] = tile;
    }

    /// Заливает прямоугольник `pos .. pos + size`, отсекая всё, что вне сетки
    pub fn set_block(&mut self, pos: Point, size: Point, tile: TileType) {
        for i in 0..size.y {
            for j in 0..size.x {
                self.set(pos.x + j, pos.y + i, tile);
            }
        }
    }

    /// Заливает прямоугольник между двумя углами (оба включительно), углы в любом порядке
    pub fn set_block_with_corners(&mut self, a: Point, b: Point, tile: TileType) {
        let min = Point::new(a.x.min(b.x), a.y.min(b.y));
        let max = Point::new(a.x.max(b.x), a.y.max(b.y));
        self.set_block(min, max - min + Point::ONE, tile);
    }

    pub fn fill(&mut self, tile: TileType) {
        self.data.fill(tile);
    }

    pub fn count(&self, tile: TileType) -> usize {
        self.data.iter().filter(|&&t| t == tile).count()
    }

    /// Клетки с данным типом в построчном порядке
    pub fn positions(&self, tile: TileType) -> Vec<Point> {
        let width = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t == tile)
            .map(|(i, _)| Point::new((i % width) as i32, (i / width) as i32))
            .collect()
    }
}

// src/room.rs
//! Комнаты внутри листовых областей BSP-дерева
//!
//! Комнаты живут в плоской арене (`Vec<Room>`), а все перекрёстные ссылки
//! (дерево → комната, граф коридоров) идут через `RoomId` — индекс в арене.
//! Индекс также служит порядковым номером комнаты в диагностических подписях.

use crate::config::RoomSizeSettings;
use crate::corridor::CorridorGraph;
use crate::geometry::{Point, Rect, lenient_clamp, round_to_int, uniform};
use crate::tile::{TileGrid, TileType};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Стабильный индекс комнаты в арене
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub pos: Point,
    pub size: Point,
    /// Область разбиения, внутри которой размещена комната
    pub bounds: Rect,
}

impl Room {
    /// Создаёт комнату случайного размера внутри `bounds` и кладёт её в арену.
    pub fn create_in<R: Rng + ?Sized>(
        arena: &mut Vec<Room>,
        bounds: Rect,
        settings: &RoomSizeSettings,
        rng: &mut R,
    ) -> RoomId {
        let id = RoomId(arena.len());
        let (x, width) = size_axis(bounds.pos.x, bounds.size.x, settings, rng);
        let (y, height) = size_axis(bounds.pos.y, bounds.size.y, settings, rng);
        arena.push(Room {
            id,
            pos: Point::new(x, y),
            size: Point::new(width, height),
            bounds,
        });
        id
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.pos.x + self.size.x / 2, self.pos.y + self.size.y / 2)
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Вырезает внутренность комнаты и рисует коридоры, владельцем которых она является
    pub fn draw(&self, rooms: &[Room], corridors: &CorridorGraph, grid: &mut TileGrid) {
        grid.set_block(self.pos, self.size, TileType::Empty);
        for other in corridors.owned_by(self.id) {
            self.draw_corridor(&rooms[other.0], grid);
        }
    }

    /// L-образный коридор: сначала вертикаль по x этой комнаты, затем горизонталь по y другой
    pub fn draw_corridor(&self, other: &Room, grid: &mut TileGrid) {
        let from = self.center();
        let to = other.center();
        let bend = Point::new(from.x, to.y);
        grid.set_block_with_corners(from, bend, TileType::Empty);
        grid.set_block_with_corners(bend, to, TileType::Empty);
    }

    /// Подпись вида `Room 3 (1, 4)`: номер комнаты и номера соседей
    #[must_use]
    pub fn label(&self, corridors: &CorridorGraph) -> String {
        let neighbours: Vec<String> = corridors
            .neighbours(self.id)
            .iter()
            .map(ToString::to_string)
            .collect();
        format!("Room {} ({})", self.id, neighbours.join(", "))
    }

    /// Точка привязки подписи: середина нижней стены
    #[must_use]
    pub fn label_anchor(&self) -> Point {
        Point::new(self.pos.x + self.size.x / 2, self.pos.y)
    }
}

/// Размер и позиция по одной оси.
///
/// Порядок важен: сначала относительные границы, потом абсолютные, потом случайный размер.
fn size_axis<R: Rng + ?Sized>(
    pos: i32,
    size: i32,
    settings: &RoomSizeSettings,
    rng: &mut R,
) -> (i32, i32) {
    let size_f = size as f32;
    let min_size = lenient_clamp(
        settings.min_percentage * size_f,
        settings.min_flat as f32,
        size_f - 2.0,
    );
    let max_size = lenient_clamp(
        settings.max_percentage * size_f,
        min_size,
        (settings.max_flat as f32).min(size_f - 2.0),
    );

    let room_size = round_to_int(uniform(rng, min_size, max_size));
    let offset = round_to_int(uniform(rng, 1.0, (size - room_size - 1) as f32));
    (pos + offset, room_size)
}

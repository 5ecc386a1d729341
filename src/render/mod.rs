// src/render/mod.rs
//! Вывод готовой сетки во внешнее представление
//!
//! Генератор не знает, как рисуются тайлы: он вызывает `TileRenderer::reset`
//! перед новой генерацией и `TileRenderer::place` для каждой непустой клетки.
//! Рендерер должен выдерживать повторный проход по тем же клеткам — так
//! двери второго прохода перекрывают результат первого.

pub mod ascii;
pub mod png;

pub use ascii::AsciiRenderer;
pub use png::PngRenderer;

use crate::tile::{TileGrid, TileType};

pub trait TileRenderer {
    /// Уничтожает всё, что было создано предыдущей генерацией
    fn reset(&mut self);

    /// Размещает (или заменяет) тайл в клетке; `Empty` сюда не передаётся
    fn place(&mut self, x: u32, y: u32, tile: TileType);
}

/// Передаёт рендереру все непустые клетки в построчном порядке
pub fn render_grid<R: TileRenderer + ?Sized>(grid: &TileGrid, renderer: &mut R) {
    let width = grid.width as usize;
    for (i, &tile) in grid.data.iter().enumerate() {
        if tile != TileType::Empty {
            renderer.place((i % width) as u32, (i / width) as u32, tile);
        }
    }
}

/// Ищет запись таблицы отрисовки для тайла.
///
/// Отсутствующая запись не прерывает генерацию: клетка просто не рисуется.
pub(crate) fn lookup<T: Copy>(table: &[T], tile: TileType, x: u32, y: u32) -> Option<T> {
    let entry = tile.render_index().and_then(|i| table.get(i).copied());
    if entry.is_none() {
        log::error!(
            "invalid tile type {tile:?} (ordinal {}) at ({x}, {y}): no render entry",
            tile.ordinal()
        );
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[derive(Default)]
    struct Recorder {
        placed: Vec<(u32, u32, TileType)>,
    }

    impl TileRenderer for Recorder {
        fn reset(&mut self) {
            self.placed.clear();
        }

        fn place(&mut self, x: u32, y: u32, tile: TileType) {
            self.placed.push((x, y, tile));
        }
    }

    #[test]
    fn empty_cells_are_not_rendered() {
        let mut grid = TileGrid::new(3, 2);
        grid.set(2, 1, TileType::Key);
        grid.set_block(Point::new(0, 0), Point::new(2, 1), TileType::Wall);

        let mut recorder = Recorder::default();
        render_grid(&grid, &mut recorder);
        assert_eq!(
            recorder.placed,
            vec![
                (0, 0, TileType::Wall),
                (1, 0, TileType::Wall),
                (2, 1, TileType::Key),
            ]
        );
    }

    #[test]
    fn lookup_skips_missing_entries() {
        let table = ['a', 'b'];
        assert_eq!(lookup(&table, TileType::Enemy, 0, 0), Some('b'));
        assert_eq!(lookup(&table, TileType::Wall, 0, 0), None);
        assert_eq!(lookup(&table, TileType::Empty, 0, 0), None);
    }
}

// src/generator.rs
//! Генерация уровня целиком
//!
//! Один вызов `DungeonGenerator::generate_level` проходит весь конвейер:
//! конфигурация → BSP-дерево → комнаты → граф коридоров → выбор особых комнат →
//! растеризация → первый проход рендера → двери вокруг выхода → второй проход рендера.
//!
//! ## Порядок растеризации
//!
//! 1. Вся сетка заливается стенами
//! 2. Комнаты и коридоры вырезаются пустыми клетками
//! 3. В центры особых комнат ставятся одиночные тайлы
//! 4. После первого рендера по периметру выхода (с отступом в одну клетку)
//!    ставятся двери и сетка рендерится повторно, чтобы двери перекрыли стены

use crate::config::DungeonConfig;
use crate::corridor::CorridorGraph;
use crate::error::{CandidatePool, DungeonError, SpecialRole};
use crate::geometry::{Point, Rect};
use crate::partition::PartitionNode;
use crate::render::{TileRenderer, render_grid};
use crate::room::{Room, RoomId};
use crate::tile::{TileGrid, TileType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Комнаты с особыми тайлами
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialRooms {
    pub start: RoomId,
    pub end: RoomId,
    pub dagger: RoomId,
    pub key: RoomId,
    pub enemy: RoomId,
}

impl SpecialRooms {
    #[must_use]
    pub fn all(&self) -> [(SpecialRole, RoomId); 5] {
        [
            (SpecialRole::Start, self.start),
            (SpecialRole::End, self.end),
            (SpecialRole::Dagger, self.dagger),
            (SpecialRole::Key, self.key),
            (SpecialRole::Enemy, self.enemy),
        ]
    }
}

impl SpecialRole {
    #[must_use]
    pub fn tile(self) -> TileType {
        match self {
            SpecialRole::Start => TileType::Player,
            SpecialRole::End => TileType::End,
            SpecialRole::Dagger => TileType::Dagger,
            SpecialRole::Key => TileType::Key,
            SpecialRole::Enemy => TileType::Enemy,
        }
    }
}

/// Результат одной генерации
#[derive(Debug, Clone)]
pub struct Level {
    pub grid: TileGrid,
    /// Арена комнат, `rooms[i].id == RoomId(i)`
    pub rooms: Vec<Room>,
    pub corridors: CorridorGraph,
    pub root: PartitionNode,
    pub special: SpecialRooms,
    pub doors: Vec<Point>,
}

impl Level {
    #[must_use]
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    /// Комнаты-тупики (ровно один коридор)
    #[must_use]
    pub fn leaf_rooms(&self) -> Vec<RoomId> {
        leaf_rooms(&self.root.rooms(), &self.corridors)
    }

    /// Диагностические подписи комнат с точками привязки
    #[must_use]
    pub fn labels(&self) -> Vec<(Point, String)> {
        self.rooms
            .iter()
            .map(|room| (room.label_anchor(), room.label(&self.corridors)))
            .collect()
    }
}

pub struct DungeonGenerator {
    config: DungeonConfig,
    rng: ChaCha8Rng,
    level: Option<Level>,
}

impl DungeonGenerator {
    /// Создаёт генератор; конфигурация приводится к допустимым диапазонам
    pub fn new(config: DungeonConfig) -> Self {
        let config = config.sanitized();
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            config,
            rng,
            level: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Последний успешно сгенерированный уровень
    #[must_use]
    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    #[must_use]
    pub fn grid(&self) -> Option<&TileGrid> {
        self.level.as_ref().map(|level| &level.grid)
    }

    /// Генерирует новый уровень, полностью заменяя предыдущий.
    ///
    /// Рендерер сбрасывается до начала генерации. При ошибке предыдущий
    /// уровень уже отброшен и `level()` возвращает `None`.
    pub fn generate_level<R: TileRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
    ) -> Result<&Level, DungeonError> {
        renderer.reset();
        self.level = None;

        let config = &self.config;
        let rng = &mut self.rng;

        let mut grid = TileGrid::new(config.width, config.height);
        grid.fill(TileType::Wall);

        let mut rooms = Vec::new();
        let mut root = PartitionNode::new(0, 0, config.width as i32, config.height as i32);
        root.split(
            config.split_count,
            config.min_split_percentage,
            &config.rooms,
            &mut rooms,
            rng,
        );
        let mut corridors = CorridorGraph::new(rooms.len());
        root.connect_children(&rooms, &mut corridors, rng);
        log::debug!(
            "partitioned {}x{} into {} rooms with {} corridors",
            config.width,
            config.height,
            rooms.len(),
            corridors.edge_count()
        );

        let special = select_special_rooms(&root.rooms(), &corridors, rng)?;

        grid.fill(TileType::Wall);
        root.draw(&rooms, &corridors, &mut grid);
        for (role, id) in special.all() {
            grid.set_block(rooms[id.0].center(), Point::ONE, role.tile());
        }
        render_grid(&grid, renderer);

        let doors = door_cells(&rooms[special.end.0], grid.bounds());
        for door in &doors {
            grid.set(door.x, door.y, TileType::Door);
        }
        render_grid(&grid, renderer);

        log::info!(
            "generated level: {} rooms, start room {}, exit room {} with {} door tiles",
            rooms.len(),
            special.start,
            special.end,
            doors.len()
        );

        Ok(&*self.level.insert(Level {
            grid,
            rooms,
            corridors,
            root,
            special,
            doors,
        }))
    }
}

/// Комнаты со степенью 1 в графе коридоров, в порядке `rooms`
#[must_use]
pub fn leaf_rooms(rooms: &[RoomId], corridors: &CorridorGraph) -> Vec<RoomId> {
    rooms
        .iter()
        .copied()
        .filter(|&id| corridors.degree(id) == 1)
        .collect()
}

/// Выбор без возвращения: старт и выход из тупиков, остальные из всех оставшихся комнат
pub fn select_special_rooms<R: Rng + ?Sized>(
    rooms: &[RoomId],
    corridors: &CorridorGraph,
    rng: &mut R,
) -> Result<SpecialRooms, DungeonError> {
    let mut leaves = leaf_rooms(rooms, corridors);
    let mut all = rooms.to_vec();

    let mut pick = |pool: CandidatePool, role: SpecialRole| {
        let candidates = match pool {
            CandidatePool::LeafRooms => &leaves,
            CandidatePool::Rooms => &all,
        };
        if candidates.is_empty() {
            return Err(DungeonError::EmptyPool { pool, role });
        }
        let chosen = candidates[rng.gen_range(0..candidates.len())];
        leaves.retain(|&id| id != chosen);
        all.retain(|&id| id != chosen);
        Ok(chosen)
    };

    Ok(SpecialRooms {
        start: pick(CandidatePool::LeafRooms, SpecialRole::Start)?,
        end: pick(CandidatePool::LeafRooms, SpecialRole::End)?,
        dagger: pick(CandidatePool::Rooms, SpecialRole::Dagger)?,
        key: pick(CandidatePool::Rooms, SpecialRole::Key)?,
        enemy: pick(CandidatePool::Rooms, SpecialRole::Enemy)?,
    })
}

/// Периметр комнаты, расширенной на одну клетку, обрезанный по `bounds`
#[must_use]
pub fn door_cells(room: &Room, bounds: Rect) -> Vec<Point> {
    let (left, right) = (room.pos.x - 1, room.pos.x + room.size.x);
    let (bottom, top) = (room.pos.y - 1, room.pos.y + room.size.y);

    let mut cells = Vec::new();
    for x in left..=right {
        for y in bottom..=top {
            let p = Point::new(x, y);
            if !bounds.contains(p) {
                continue;
            }
            if x == left || x == right || y == bottom || y == top {
                cells.push(p);
            }
        }
    }
    cells
}

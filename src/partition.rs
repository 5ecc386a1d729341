// src/partition.rs
//! Двоичное разбиение пространства (BSP)
//!
//! Узел либо разрезан на двух потомков, покрывающих его прямоугольник без
//! зазоров и наложений, либо является листом с одной комнатой. Сами комнаты
//! лежат в арене, узел хранит только `RoomId`.

use crate::config::RoomSizeSettings;
use crate::corridor::CorridorGraph;
use crate::geometry::{Point, Rect, round_to_int, uniform};
use crate::room::{Room, RoomId};
use crate::tile::TileGrid;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
enum NodeKind {
    /// Состояние только между `new` и `split`: ни комнаты, ни потомков
    Pending,
    Leaf(RoomId),
    Split(Box<[PartitionNode; 2]>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionNode {
    pub rect: Rect,
    kind: NodeKind,
}

impl PartitionNode {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind: NodeKind::Pending,
        }
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        matches!(self.kind, NodeKind::Split(_))
    }

    #[must_use]
    pub fn children(&self) -> Option<&[PartitionNode; 2]> {
        match &self.kind {
            NodeKind::Split(children) => Some(&**children),
            _ => None,
        }
    }

    /// Комната листа
    #[must_use]
    pub fn room(&self) -> Option<RoomId> {
        match self.kind {
            NodeKind::Leaf(id) => Some(id),
            _ => None,
        }
    }

    /// Рекурсивно разбивает узел на `remaining_depth` уровней.
    ///
    /// Доля разреза берётся из `[min_split, 1 - min_split]`. Граница округляется,
    /// второй потомок получает остаток, чтобы сумма точно совпала с родителем.
    /// На нулевой глубине узел становится листом и создаёт комнату в арене.
    pub fn split<R: Rng + ?Sized>(
        &mut self,
        remaining_depth: u32,
        min_split: f32,
        settings: &RoomSizeSettings,
        arena: &mut Vec<Room>,
        rng: &mut R,
    ) {
        if remaining_depth == 0 {
            let id = Room::create_in(arena, self.rect, settings, rng);
            self.kind = NodeKind::Leaf(id);
            return;
        }
        let remaining_depth = remaining_depth - 1;

        let Rect { pos, size } = self.rect;
        let split_through_x = if size.x == size.y {
            rng.gen_bool(0.5)
        } else {
            size.x > size.y
        };
        let fraction = uniform(rng, min_split, 1.0 - min_split);

        let mut children = if split_through_x {
            let first = round_to_int(size.x as f32 * fraction);
            [
                PartitionNode::new(pos.x, pos.y, first, size.y),
                PartitionNode::new(pos.x + first, pos.y, size.x - first, size.y),
            ]
        } else {
            let first = round_to_int(size.y as f32 * fraction);
            [
                PartitionNode::new(pos.x, pos.y, size.x, first),
                PartitionNode::new(pos.x, pos.y + first, size.x, size.y - first),
            ]
        };

        for child in &mut children {
            child.split(remaining_depth, min_split, settings, arena, rng);
        }
        self.kind = NodeKind::Split(Box::new(children));
    }

    /// Комнаты всех листов поддерева, обход в глубину, сначала первый потомок
    #[must_use]
    pub fn rooms(&self) -> Vec<RoomId> {
        let mut out = Vec::new();
        self.collect_rooms(&mut out);
        out
    }

    fn collect_rooms(&self, out: &mut Vec<RoomId>) {
        match &self.kind {
            NodeKind::Leaf(id) => out.push(*id),
            NodeKind::Split(children) => {
                children[0].collect_rooms(out);
                children[1].collect_rooms(out);
            }
            NodeKind::Pending => {}
        }
    }

    /// Прямоугольники всех листов; у неразбитого узла листьев нет, как и комнат
    #[must_use]
    pub fn leaf_rects(&self) -> Vec<Rect> {
        match &self.kind {
            NodeKind::Split(children) => {
                let mut rects = children[0].leaf_rects();
                rects.extend(children[1].leaf_rects());
                rects
            }
            NodeKind::Leaf(_) => vec![self.rect],
            NodeKind::Pending => Vec::new(),
        }
    }

    /// Соединяет поддеревья коридорами сверху вниз, по одному ребру на внутренний узел.
    ///
    /// Эвристика в два шага: случайная комната `r` второго поддерева, ближайшая
    /// к ней комната первого поддерева, затем ближайшая к той комната второго.
    /// Владельцем коридора становится комната первого поддерева.
    pub fn connect_children<R: Rng + ?Sized>(
        &self,
        rooms: &[Room],
        corridors: &mut CorridorGraph,
        rng: &mut R,
    ) {
        let NodeKind::Split(children) = &self.kind else {
            return;
        };

        let rooms1 = children[0].rooms();
        let rooms2 = children[1].rooms();
        if rooms1.is_empty() || rooms2.is_empty() {
            return;
        }

        let random_room = rooms2[rng.gen_range(0..rooms2.len())];
        let Some(closest1) = closest_to(&rooms1, rooms, rooms[random_room.0].center()) else {
            return;
        };
        let Some(closest2) = closest_to(&rooms2, rooms, rooms[closest1.0].center()) else {
            return;
        };
        corridors.connect(closest1, closest2);

        if children[0].has_children() {
            children[0].connect_children(rooms, corridors, rng);
            children[1].connect_children(rooms, corridors, rng);
        }
    }

    pub fn draw(&self, rooms: &[Room], corridors: &CorridorGraph, grid: &mut TileGrid) {
        match &self.kind {
            NodeKind::Leaf(id) => rooms[id.0].draw(rooms, corridors, grid),
            NodeKind::Split(children) => {
                children[0].draw(rooms, corridors, grid);
                children[1].draw(rooms, corridors, grid);
            }
            NodeKind::Pending => {}
        }
    }
}

/// Первая комната с минимальным расстоянием от центра до `target`; `None` для пустого списка
fn closest_to(candidates: &[RoomId], rooms: &[Room], target: Point) -> Option<RoomId> {
    candidates.iter().copied().min_by(|a, b| {
        let da = rooms[a.0].center().distance(target);
        let db = rooms[b.0].center().distance(target);
        da.total_cmp(&db)
    })
}

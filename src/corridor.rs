// src/corridor.rs
//! Граф коридоров между комнатами
//!
//! Неориентированный граф: вершина `i` соответствует комнате `RoomId(i)`,
//! ребро хранит комнату-владельца, которая рисует коридор. Параллельных рёбер нет.

use crate::room::RoomId;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Данные ребра: кто рисует коридор
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corridor {
    pub owner: RoomId,
}

#[derive(Debug, Clone, Default)]
pub struct CorridorGraph {
    graph: UnGraph<RoomId, Corridor>,
}

impl CorridorGraph {
    /// Граф без рёбер на `room_count` комнат
    pub fn new(room_count: usize) -> Self {
        let mut graph = UnGraph::with_capacity(room_count, room_count.saturating_sub(1));
        for i in 0..room_count {
            graph.add_node(RoomId(i));
        }
        Self { graph }
    }

    /// Соединяет `from` с `to`, `from` становится владельцем.
    ///
    /// Повторное соединение той же пары (в любом порядке) ничего не меняет; возвращает `false`.
    pub fn connect(&mut self, from: RoomId, to: RoomId) -> bool {
        let (a, b) = (node(from), node(to));
        if self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, Corridor { owner: from });
        true
    }

    #[must_use]
    pub fn is_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.graph.find_edge(node(a), node(b)).is_some()
    }

    /// Владелец коридора между `a` и `b`, если он есть
    #[must_use]
    pub fn owner(&self, a: RoomId, b: RoomId) -> Option<RoomId> {
        self.graph
            .find_edge(node(a), node(b))
            .map(|e| self.graph[e].owner)
    }

    /// Число коридоров у комнаты
    #[must_use]
    pub fn degree(&self, room: RoomId) -> usize {
        self.graph.edges(node(room)).count()
    }

    /// Соседи комнаты по возрастанию номера
    #[must_use]
    pub fn neighbours(&self, room: RoomId) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self
            .graph
            .neighbors(node(room))
            .map(|n| self.graph[n])
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Комнаты, коридоры к которым рисует `room`
    #[must_use]
    pub fn owned_by(&self, room: RoomId) -> Vec<RoomId> {
        let n = node(room);
        let mut ids: Vec<RoomId> = self
            .graph
            .edges(n)
            .filter(|e| e.weight().owner == room)
            .map(|e| {
                let other = if e.source() == n { e.target() } else { e.source() };
                self.graph[other]
            })
            .collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Пары комнат `(владелец, другая)` для каждого коридора
    #[must_use]
    pub fn edges(&self) -> Vec<(RoomId, RoomId)> {
        self.graph
            .edge_references()
            .map(|e| {
                let owner = e.weight().owner;
                let (s, t) = (self.graph[e.source()], self.graph[e.target()]);
                (owner, if s == owner { t } else { s })
            })
            .collect()
    }

    /// Все комнаты достижимы друг из друга
    #[must_use]
    pub fn is_fully_connected(&self) -> bool {
        self.graph.node_count() <= 1 || connected_components(&self.graph) == 1
    }
}

fn node(room: RoomId) -> NodeIndex {
    NodeIndex::new(room.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_is_idempotent_in_both_directions() {
        let mut graph = CorridorGraph::new(3);
        assert!(graph.connect(RoomId(0), RoomId(1)));
        assert!(!graph.connect(RoomId(0), RoomId(1)));
        assert!(!graph.connect(RoomId(1), RoomId(0)));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.owner(RoomId(1), RoomId(0)), Some(RoomId(0)));
    }

    #[test]
    fn exactly_one_side_owns_each_corridor() {
        let mut graph = CorridorGraph::new(4);
        graph.connect(RoomId(0), RoomId(1));
        graph.connect(RoomId(2), RoomId(1));
        graph.connect(RoomId(3), RoomId(0));

        assert_eq!(graph.owned_by(RoomId(0)), vec![RoomId(1)]);
        assert!(graph.owned_by(RoomId(1)).is_empty());
        assert_eq!(graph.owned_by(RoomId(2)), vec![RoomId(1)]);

        for (owner, other) in graph.edges() {
            assert!(graph.owned_by(owner).contains(&other));
            assert!(!graph.owned_by(other).contains(&owner));
        }
    }

    #[test]
    fn degree_and_connectivity() {
        let mut graph = CorridorGraph::new(4);
        graph.connect(RoomId(0), RoomId(1));
        graph.connect(RoomId(2), RoomId(3));
        assert!(!graph.is_fully_connected());
        graph.connect(RoomId(1), RoomId(2));
        assert!(graph.is_fully_connected());
        assert_eq!(graph.degree(RoomId(1)), 2);
        assert_eq!(graph.degree(RoomId(3)), 1);
        assert_eq!(graph.neighbours(RoomId(2)), vec![RoomId(1), RoomId(3)]);
        assert!(graph.is_connected(RoomId(3), RoomId(2)));
    }

    #[test]
    fn single_room_counts_as_connected() {
        assert!(CorridorGraph::new(1).is_fully_connected());
        assert_eq!(CorridorGraph::new(1).degree(RoomId(0)), 0);
    }
}

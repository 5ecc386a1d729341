use dungeongen::generator::door_cells;
use dungeongen::{
    AsciiRenderer, CandidatePool, DungeonConfig, DungeonError, DungeonGenerator, Level,
    PartitionNode, Point, RoomSizeSettings, SpecialRole, TileRenderer, TileType, render_grid,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

fn config(seed: u64, width: u32, height: u32, split_count: u32, min_split: f32) -> DungeonConfig {
    DungeonConfig {
        seed: Some(seed),
        width,
        height,
        split_count,
        min_split_percentage: min_split,
        rooms: RoomSizeSettings::default(),
    }
}

fn generate(cfg: DungeonConfig) -> (Level, AsciiRenderer) {
    let mut ascii = AsciiRenderer::new(cfg.width, cfg.height);
    let mut generator = DungeonGenerator::new(cfg);
    let level = generator.generate_level(&mut ascii).unwrap().clone();
    (level, ascii)
}

/// Рендерер, запоминающий все вызовы
#[derive(Default)]
struct CallLog {
    resets: usize,
    placed: Vec<(u32, u32, TileType)>,
}

impl TileRenderer for CallLog {
    fn reset(&mut self) {
        self.resets += 1;
        self.placed.clear();
    }

    fn place(&mut self, x: u32, y: u32, tile: TileType) {
        self.placed.push((x, y, tile));
    }
}

#[test]
fn scenario_forty_grid_three_splits() {
    let (level, _) = generate(config(2024, 40, 40, 3, 0.3));
    assert_eq!(level.rooms.len(), 8);
    assert_eq!(level.corridors.edge_count(), 7);
    assert!(level.corridors.is_fully_connected());
    assert!(level.leaf_rooms().len() >= 2);
}

#[test]
fn scenario_zero_splits_single_room_fails_selection() {
    let cfg = config(3, 40, 40, 0, 0.3);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut arena = Vec::new();
    let mut root = PartitionNode::new(0, 0, 40, 40);
    root.split(0, 0.3, &cfg.rooms, &mut arena, &mut rng);
    assert_eq!(root.leaf_rects(), vec![root.rect]);
    assert_eq!(arena.len(), 1);

    let mut ascii = AsciiRenderer::new(40, 40);
    let mut generator = DungeonGenerator::new(cfg);
    let err = generator.generate_level(&mut ascii).unwrap_err();
    assert!(matches!(
        err,
        DungeonError::EmptyPool {
            pool: CandidatePool::LeafRooms,
            role: SpecialRole::Start
        }
    ));
    assert!(err.to_string().contains("start"));
}

#[test]
fn second_pass_renders_doors_over_first() {
    let cfg = config(77, 48, 40, 3, 0.3);
    let mut log = CallLog::default();
    let mut generator = DungeonGenerator::new(cfg);
    let level = generator.generate_level(&mut log).unwrap();

    assert_eq!(log.resets, 1);
    let non_empty = level.grid.data.iter().filter(|&&t| t != TileType::Empty).count();
    let doors: HashSet<(u32, u32)> = level
        .doors
        .iter()
        .map(|p| (p.x as u32, p.y as u32))
        .collect();

    // Первый проход без дверей, второй — вся сетка вместе с дверями
    let (first, second) = log.placed.split_at(log.placed.len() - non_empty);
    assert!(first.iter().all(|&(_, _, t)| t != TileType::Door));
    let second_doors: HashSet<(u32, u32)> = second
        .iter()
        .filter(|&&(_, _, t)| t == TileType::Door)
        .map(|&(x, y, _)| (x, y))
        .collect();
    assert_eq!(second_doors, doors);
    assert!(!level.doors.is_empty());
}

#[test]
fn regeneration_leaves_no_residue() {
    let cfg = config(5, 50, 40, 3, 0.3);
    let mut ascii = AsciiRenderer::new(50, 40);
    let mut generator = DungeonGenerator::new(cfg);
    generator.generate_level(&mut ascii).unwrap();
    let first = ascii.to_string();

    let level = generator.generate_level(&mut ascii).unwrap();
    let mut fresh = AsciiRenderer::new(50, 40);
    render_grid(&level.grid, &mut fresh);
    assert_eq!(ascii.to_string(), fresh.to_string());
    assert_ne!(first, fresh.to_string());
}

#[test]
fn same_seed_same_level() {
    let (a, _) = generate(config(99, 64, 48, 4, 0.35));
    let (b, _) = generate(config(99, 64, 48, 4, 0.35));
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.special, b.special);
    assert_eq!(a.corridors.edges(), b.corridors.edges());
}

#[test]
fn failed_generation_resets_renderer() {
    let mut ascii = AsciiRenderer::new(40, 40);
    let mut generator = DungeonGenerator::new(config(8, 40, 40, 3, 0.3));
    generator.generate_level(&mut ascii).unwrap();
    assert_ne!(ascii.to_string().trim(), "");

    let mut broken = DungeonGenerator::new(config(8, 40, 40, 1, 0.3));
    assert!(broken.generate_level(&mut ascii).is_err());
    assert!(broken.level().is_none());
    assert!(broken.grid().is_none());
    assert_eq!(ascii.to_string().trim(), "");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn leaves_tile_the_root(
        seed in any::<u64>(),
        width in 10i32..120,
        height in 10i32..120,
        depth in 0u32..6,
        min_split in 0.0f32..=0.5,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut arena = Vec::new();
        let mut root = PartitionNode::new(0, 0, width, height);
        root.split(depth, min_split, &RoomSizeSettings::default(), &mut arena, &mut rng);

        let rects = root.leaf_rects();
        prop_assert_eq!(rects.len(), 1 << depth);
        prop_assert_eq!(arena.len(), rects.len());

        let mut covered = vec![0u8; (width * height) as usize];
        for r in &rects {
            for y in r.pos.y..r.pos.y + r.size.y {
                for x in r.pos.x..r.pos.x + r.size.x {
                    prop_assert!(x >= 0 && y >= 0 && x < width && y < height);
                    covered[(y * width + x) as usize] += 1;
                }
            }
        }
        prop_assert!(covered.iter().all(|&c| c == 1));
    }

    #[test]
    fn rooms_keep_a_wall_margin(
        seed in any::<u64>(),
        width in 40u32..80,
        height in 40u32..80,
        min_split in 0.3f32..=0.5,
    ) {
        let (level, _) = generate(config(seed, width, height, 3, min_split));
        let min_flat = RoomSizeSettings::default().min_flat;
        for room in &level.rooms {
            let b = room.bounds;
            // Условие размещаемости: в области помещается комната минимального размера со стенами
            if b.size.x < min_flat + 2 || b.size.y < min_flat + 2 {
                continue;
            }
            prop_assert!(room.pos.x >= b.pos.x + 1);
            prop_assert!(room.pos.y >= b.pos.y + 1);
            prop_assert!(room.pos.x + room.size.x <= b.pos.x + b.size.x - 1);
            prop_assert!(room.pos.y + room.size.y <= b.pos.y + b.size.y - 1);
        }
    }

    #[test]
    fn corridor_graph_is_a_spanning_tree(
        seed in any::<u64>(),
        size in 40u32..100,
        depth in 1u32..5,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut arena = Vec::new();
        let mut root = PartitionNode::new(0, 0, size as i32, size as i32);
        root.split(depth, 0.3, &RoomSizeSettings::default(), &mut arena, &mut rng);
        let mut corridors = dungeongen::CorridorGraph::new(arena.len());
        root.connect_children(&arena, &mut corridors, &mut rng);

        prop_assert_eq!(corridors.edge_count(), arena.len() - 1);
        prop_assert!(corridors.is_fully_connected());
        for (owner, other) in corridors.edges() {
            prop_assert_eq!(corridors.owner(owner, other), Some(owner));
            prop_assert!(!corridors.owned_by(other).contains(&owner));
            prop_assert!(!corridors.connect(other, owner));
        }
        prop_assert_eq!(corridors.edge_count(), arena.len() - 1);
    }

    #[test]
    fn doors_ring_the_exit_room(
        seed in any::<u64>(),
        width in 40u32..90,
        height in 40u32..90,
    ) {
        let (level, ascii) = generate(config(seed, width, height, 3, 0.3));
        let end = level.room(level.special.end);
        let expected: HashSet<Point> = door_cells(end, level.grid.bounds()).into_iter().collect();
        let in_grid: HashSet<Point> = level.grid.positions(TileType::Door).into_iter().collect();
        prop_assert_eq!(&in_grid, &expected);

        let (left, right) = (end.pos.x - 1, end.pos.x + end.size.x);
        let (bottom, top) = (end.pos.y - 1, end.pos.y + end.size.y);
        for p in &expected {
            prop_assert!(p.x == left || p.x == right || p.y == bottom || p.y == top);
            prop_assert!(p.x >= left && p.x <= right && p.y >= bottom && p.y <= top);
            prop_assert_eq!(ascii.glyph_at(p.x as u32, p.y as u32), Some('+'));
        }
        let c = end.center();
        prop_assert_eq!(level.grid.get(c.x, c.y), Some(TileType::End));
    }
}

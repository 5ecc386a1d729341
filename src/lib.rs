pub mod config;
pub mod corridor;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod partition;
pub mod render;
pub mod room;
pub mod tile;

pub use config::{DungeonConfig, RoomSizeSettings};
pub use corridor::CorridorGraph;
pub use error::{CandidatePool, DungeonError, SpecialRole};
pub use generator::{DungeonGenerator, Level, SpecialRooms};
pub use geometry::{Point, Rect};
pub use partition::PartitionNode;
pub use render::{AsciiRenderer, PngRenderer, TileRenderer, render_grid};
pub use room::{Room, RoomId};
pub use tile::{TileGrid, TileType};

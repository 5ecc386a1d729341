// src/error.rs
//! Ошибки генерации подземелья
//!
//! Генерация — одноразовое чистое вычисление: при ошибке вызывающая сторона
//! должна поправить конфигурацию и запустить генерацию заново.
//! Запись за пределы сетки ошибкой не считается — такие клетки просто отбрасываются.

use std::fmt;
use thiserror::Error;

/// Пул кандидатов, из которого выбираются особые комнаты
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidatePool {
    /// Комнаты со степенью 1 в графе коридоров (тупики)
    LeafRooms,
    /// Все оставшиеся комнаты
    Rooms,
}

impl fmt::Display for CandidatePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidatePool::LeafRooms => f.write_str("leaf rooms"),
            CandidatePool::Rooms => f.write_str("rooms"),
        }
    }
}

/// Роль особой комнаты
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialRole {
    Start,
    End,
    Dagger,
    Key,
    Enemy,
}

impl fmt::Display for SpecialRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpecialRole::Start => "start",
            SpecialRole::End => "end",
            SpecialRole::Dagger => "dagger",
            SpecialRole::Key => "key",
            SpecialRole::Enemy => "enemy",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum DungeonError {
    #[error(
        "cannot pick the {role} room: the {pool} pool is empty (split_count is too small for five special rooms)"
    )]
    EmptyPool {
        pool: CandidatePool,
        role: SpecialRole,
    },

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

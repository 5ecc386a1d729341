// src/config.rs
//! Конфигурация генерации подземелья
//!
//! Этот модуль определяет параметры, управляющие процедурной генерацией уровня:
//! - Размер сетки и глубину BSP-разбиения
//! - Минимальную долю разреза при разбиении
//! - Ограничения размеров комнат (абсолютные и относительные)
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.
//!
//! Согласованность `min_split_percentage` с размерами комнат не проверяется:
//! при слишком мелком разбиении комнаты могут перестать помещаться в свои области.
//! Подбор совместимых значений — ответственность вызывающей стороны.

use crate::error::DungeonError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Максимальная глубина разбиения
pub const MAX_SPLIT_COUNT: u32 = 20;

/// Ограничения размеров комнат
///
/// Для каждой оси сначала считаются относительные границы, затем их обрезают абсолютные.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomSizeSettings {
    /// Минимальный размер комнаты в тайлах (не меньше 1)
    #[serde(default = "default_min_flat")]
    pub min_flat: i32,

    /// Максимальный размер комнаты в тайлах (не меньше `min_flat`)
    #[serde(default = "default_max_flat")]
    pub max_flat: i32,

    /// Минимальная доля размера области, занимаемая комнатой
    #[serde(default = "default_min_percentage")]
    pub min_percentage: f32,

    /// Максимальная доля размера области (не меньше `min_percentage`)
    #[serde(default = "default_max_percentage")]
    pub max_percentage: f32,
}

fn default_min_flat() -> i32 {
    2
}
fn default_max_flat() -> i32 {
    14
}
fn default_min_percentage() -> f32 {
    0.45
}
fn default_max_percentage() -> f32 {
    0.85
}

impl Default for RoomSizeSettings {
    fn default() -> Self {
        Self {
            min_flat: 2,
            max_flat: 14,
            min_percentage: 0.45,
            max_percentage: 0.85,
        }
    }
}

/// Основные параметры генерации подземелья
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DungeonConfig {
    /// Сид генератора случайных чисел; без него используется энтропия ОС
    #[serde(default)]
    pub seed: Option<u64>,

    /// Ширина сетки в тайлах (по умолчанию 64)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Высота сетки в тайлах (по умолчанию 48)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Глубина BSP-разбиения: листьев будет `2^split_count`
    #[serde(default = "default_split_count")]
    pub split_count: u32,

    /// Минимальная доля разреза, `[0, 0.5]`
    #[serde(default = "default_min_split_percentage")]
    pub min_split_percentage: f32,

    /// Ограничения размеров комнат
    #[serde(default)]
    pub rooms: RoomSizeSettings,
}

fn default_width() -> u32 {
    64
}
fn default_height() -> u32 {
    48
}
fn default_split_count() -> u32 {
    4
}
fn default_min_split_percentage() -> f32 {
    0.35
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            seed: None,
            width: 64,
            height: 48,
            split_count: 4,
            min_split_percentage: 0.35,
            rooms: RoomSizeSettings::default(),
        }
    }
}

impl DungeonConfig {
    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # dungeon.toml
    /// seed = 42
    /// width = 40
    /// height = 40
    /// split_count = 3
    ///
    /// [rooms]
    /// min_flat = 3
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DungeonError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DungeonError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Формат выбирается по расширению: `.json` — JSON, всё остальное — TOML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DungeonError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Приводит значения к допустимым диапазонам.
    ///
    /// Каждое исправление пишется в лог предупреждением.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.split_count > MAX_SPLIT_COUNT {
            log::warn!(
                "split_count {} exceeds {MAX_SPLIT_COUNT}, capping",
                self.split_count
            );
            self.split_count = MAX_SPLIT_COUNT;
        }

        let split = self.min_split_percentage.clamp(0.0, 0.5);
        if split != self.min_split_percentage {
            log::warn!(
                "min_split_percentage {} outside [0, 0.5], using {split}",
                self.min_split_percentage
            );
            self.min_split_percentage = split;
        }

        let rooms = &mut self.rooms;
        if rooms.min_flat < 1 {
            log::warn!("rooms.min_flat {} raised to 1", rooms.min_flat);
            rooms.min_flat = 1;
        }
        if rooms.max_flat < rooms.min_flat {
            log::warn!(
                "rooms.max_flat {} raised to min_flat {}",
                rooms.max_flat,
                rooms.min_flat
            );
            rooms.max_flat = rooms.min_flat;
        }

        for (name, value) in [
            ("min_percentage", &mut rooms.min_percentage),
            ("max_percentage", &mut rooms.max_percentage),
        ] {
            let clamped = value.clamp(0.0, 1.0);
            if clamped != *value {
                log::warn!("rooms.{name} {value} outside [0, 1], using {clamped}");
                *value = clamped;
            }
        }
        if rooms.max_percentage < rooms.min_percentage {
            log::warn!(
                "rooms.max_percentage {} raised to min_percentage {}",
                rooms.max_percentage,
                rooms.min_percentage
            );
            rooms.max_percentage = rooms.min_percentage;
        }

        self
    }
}

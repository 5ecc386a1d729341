// src/geometry.rs
//! Целочисленная геометрия сетки: точки, прямоугольники и числовые помощники.
//!
//! Помощники `lenient_clamp`, `uniform` и `round_to_int` повторяют поведение
//! движка, под который изначально настраивались параметры генерации: они не
//! паникуют на перевёрнутых границах.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ONE: Point = Point { x: 1, y: 1 };

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Евклидово расстояние между точками
    #[must_use]
    pub fn distance(self, other: Point) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Осевой прямоугольник `pos .. pos + size` (правая и верхняя границы не включаются)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Point,
    pub size: Point,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: Point::new(x, y),
            size: Point::new(width, height),
        }
    }

    #[must_use]
    pub fn area(&self) -> i64 {
        i64::from(self.size.x) * i64::from(self.size.y)
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.pos.x
            && p.y >= self.pos.y
            && p.x < self.pos.x + self.size.x
            && p.y < self.pos.y + self.size.y
    }
}

/// Clamp, который не паникует при `min > max`: `value < min` → `min`, иначе `value > max` → `max`.
#[must_use]
pub fn lenient_clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Равномерное значение из `[a, b]`; границы можно передавать в любом порядке.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo == hi {
        return lo;
    }
    rng.gen_range(lo..=hi)
}

/// Округление к ближайшему целому, половины — к чётному
#[must_use]
pub fn round_to_int(value: f32) -> i32 {
    value.round_ties_even() as i32
}

//! Converts pointer positions and raw angles into sector indices.
//!
//! Raw indices are plain `usize` values that may fall outside `[0, count)`;
//! `count` itself means "no selection". Callers map raw indices through
//! [`is_valid_index`] (or the interaction controller's `map_index`) before
//! treating them as a child.

use super::geometry::{Point, normalize_angle};
use super::radial::RadialConfig;
use super::scene::ActorId;

pub fn is_valid_index(index: usize, count: usize) -> bool {
    index < count
}

/// Sector under `angle` (degrees). Can land on `count` at the exact end of the
/// sweep and past it when the sweep is partial.
pub fn find_index_from_angle(angle: f64, count: usize, config: &RadialConfig) -> usize {
    index_within_sweep(
        angle,
        count,
        config.start_offset_degrees(),
        config.total_degrees_drawn(),
    )
}

/// Sector under `point`, or `count` when the point misses the ring.
pub fn find_index_at_point(
    point: Point,
    count: usize,
    config: &RadialConfig,
    infinite_range: bool,
) -> usize {
    HitTester::new(config, count).index_at_point(point, infinite_range)
}

fn index_within_sweep(angle: f64, count: usize, start_offset: f64, sweep: f64) -> usize {
    if count == 0 || !(sweep > 0.0) {
        return count;
    }
    let offset = normalize_angle(angle - start_offset);
    let raw = (offset / sweep * count as f64).floor();
    if raw.is_nan() { count } else { raw as usize }
}

/// Outcome of a composite hit test, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A descendant claimed the point before the ring was considered.
    Descendant(ActorId),
    Sector(usize),
    /// Infinite range is on and nothing else claimed the point.
    Ring,
}

/// Hit testing against one ring snapshot. Borrowing the configuration keeps
/// every query consistent with the layout of the same frame.
#[derive(Debug, Clone, Copy)]
pub struct HitTester<'a> {
    config: &'a RadialConfig,
    count: usize,
    sweep: f64,
    rotation: f64,
}

impl<'a> HitTester<'a> {
    pub fn new(config: &'a RadialConfig, count: usize) -> Self {
        Self {
            config,
            count,
            sweep: config.total_degrees_drawn(),
            rotation: 0.0,
        }
    }

    /// Accumulated rotation of the widget in degrees, removed from every
    /// pointer angle.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Test against the currently revealed sweep instead of the configured one.
    pub fn with_sweep(mut self, sweep: f64) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn index_from_angle(&self, angle: f64) -> usize {
        index_within_sweep(
            angle,
            self.count,
            self.config.start_offset_degrees(),
            self.sweep,
        )
    }

    pub fn index_at_point(&self, point: Point, infinite_range: bool) -> usize {
        let angle = normalize_angle(point.angle_degrees() - self.rotation);
        let index = self.index_from_angle(angle);
        if infinite_range || self.is_within_radii(point) {
            index
        } else {
            self.count
        }
    }

    pub fn is_within_radii(&self, point: Point) -> bool {
        let distance = point.distance_squared();
        let inner = self.config.inner_radius_length();
        let outer = self.config.radius();
        inner * inner <= distance && distance <= outer * outer
    }

    /// True inside the hole. Always false for a full disk.
    pub fn is_within_inner_radius(&self, point: Point) -> bool {
        let inner = self.config.inner_radius_length();
        point.distance_squared() < inner * inner
    }

    /// Resolves a hit against the ring and its children. `descendant` is the
    /// deepest child under the point as reported by the scene graph; it wins
    /// over any sector.
    pub fn resolve(
        &self,
        point: Point,
        infinite_range: bool,
        descendant: Option<ActorId>,
    ) -> Option<Hit> {
        if let Some(actor) = descendant {
            return Some(Hit::Descendant(actor));
        }
        let index = self.index_at_point(point, infinite_range);
        if is_valid_index(index, self.count) {
            Some(Hit::Sector(index))
        } else if infinite_range {
            Some(Hit::Ring)
        } else {
            None
        }
    }
}

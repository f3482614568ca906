use super::FULL_CIRCLE;
use super::radial::RadialConfig;
use std::ops::Range;

/// A position in the widget's local frame. The origin is the ring's center and
/// the y axis points up, so angles grow counter-clockwise from +x.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Angle of the point around the origin, in degrees within `[0, 360)`.
    pub fn angle_degrees(&self) -> f64 {
        normalize_angle(self.y.atan2(self.x).to_degrees())
    }
}

/// Maps any angle in degrees into `[0, 360)`.
pub fn normalize_angle(degrees: f64) -> f64 {
    let angle = degrees.rem_euclid(FULL_CIRCLE);
    // tiny negative inputs round up to exactly 360
    if angle >= FULL_CIRCLE { 0.0 } else { angle }
}

pub fn sector_span(count: usize, total_degrees: f64) -> f64 {
    total_degrees / count as f64
}

/// Start and end angle (degrees, not normalized) of sector `index` when the
/// ring shows `sweep` degrees.
pub fn sector_bounds(index: usize, count: usize, start_offset: f64, sweep: f64) -> (f64, f64) {
    let span = sector_span(count, sweep);
    let start = start_offset + index as f64 * span;
    (start, start + span)
}

pub fn point_at_angle(center: Point, radius: f64, angle_radians: f64) -> Point {
    Point::new(
        center.x + radius * angle_radians.cos(),
        center.y + radius * angle_radians.sin(),
    )
}

/// Largest circle a child can occupy at `distance` from the center without
/// reaching into a neighboring sector, past the rim or into the hole.
pub fn estimated_child_radius(
    degrees_per_child: f64,
    distance: f64,
    outer_radius: f64,
    inner_radius_length: f64,
) -> f64 {
    // past half a turn the neighbors no longer constrain the child
    let half_span = (degrees_per_child / 2.0).min(90.0).to_radians();
    (distance * half_span.sin())
        .min(outer_radius - distance)
        .min(distance - inner_radius_length)
        .max(0.0)
}

/// Overrides the distance from the center at which a child sits. Receives the
/// child index and the default distance.
pub type DistanceFn = dyn Fn(usize, f64) -> f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorPosition {
    pub index: usize,
    /// Center angle of the sector, in degrees.
    pub angle: f64,
    pub distance: f64,
}

pub fn layout_positions(count: usize, config: &RadialConfig) -> LayoutPositions<'static> {
    LayoutPositions::new(count, config)
}

/// Lazily yields one [`SectorPosition`] per child. Cloning restarts nothing and
/// shares nothing: every clone walks the same finite range on its own.
#[derive(Clone)]
pub struct LayoutPositions<'a> {
    indices: Range<usize>,
    start_offset: f64,
    span: f64,
    default_distance: f64,
    distance: Option<&'a DistanceFn>,
}

impl<'a> LayoutPositions<'a> {
    pub fn new(count: usize, config: &RadialConfig) -> Self {
        Self {
            indices: 0..count,
            start_offset: config.start_offset_degrees(),
            span: if count == 0 {
                0.0
            } else {
                sector_span(count, config.total_degrees_drawn())
            },
            default_distance: (config.radius() + config.inner_radius_length()) / 2.0,
            distance: None,
        }
    }

    /// Spreads the children over `sweep` degrees instead of the configured total.
    pub fn with_sweep(mut self, sweep: f64) -> Self {
        let count = self.indices.end;
        if count > 0 {
            self.span = sector_span(count, sweep);
        }
        self
    }

    pub fn with_distance<'b>(self, distance: &'b DistanceFn) -> LayoutPositions<'b>
    where
        'a: 'b,
    {
        LayoutPositions {
            indices: self.indices,
            start_offset: self.start_offset,
            span: self.span,
            default_distance: self.default_distance,
            distance: Some(distance),
        }
    }

    pub fn span(&self) -> f64 {
        self.span
    }
}

impl Iterator for LayoutPositions<'_> {
    type Item = SectorPosition;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        let distance = self
            .distance
            .map_or(self.default_distance, |f| f(index, self.default_distance));
        Some(SectorPosition {
            index,
            angle: self.start_offset + (index as f64 + 0.5) * self.span,
            distance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl ExactSizeIterator for LayoutPositions<'_> {}

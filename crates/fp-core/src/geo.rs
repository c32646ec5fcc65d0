//! Planar geometry: points, rectangular fields, and obstacle sampling.
//!
//! Coordinates are `f64` metres in a local planar frame.  Fields are
//! axis-aligned rectangles whose **interior** is impassable for road travel;
//! their boundary (edges and corners) is not.

use crate::{CoreError, CoreResult, FieldId};

/// A point in the planar frame.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Squared Euclidean distance, for comparisons.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Linear interpolation: `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    /// Round both coordinates to the nearest integer (half away from zero).
    #[inline]
    pub fn snapped(self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Field ─────────────────────────────────────────────────────────────────────

/// A rectangular work area.  `(x, y)` is the minimum corner.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub id:     FieldId,
    pub x:      f64,
    pub y:      f64,
    pub width:  f64,
    pub height: f64,
}

impl Field {
    pub fn new(id: FieldId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { id, x, y, width, height }
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// `true` if `p` lies strictly inside the rectangle.  Points on the
    /// boundary are outside.
    #[inline]
    pub fn contains_strict(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.max_x() && p.y > self.y && p.y < self.max_y()
    }

    /// The four corners, counter-clockwise from the minimum corner.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.max_x(), self.y),
            Point::new(self.max_x(), self.max_y()),
            Point::new(self.x, self.max_y()),
        ]
    }

    /// The corner nearest to `target`.  Ties keep the first minimum in
    /// [`corners`](Self::corners) order.
    pub fn nearest_corner(&self, target: Point) -> Point {
        let corners = self.corners();
        let mut best = corners[0];
        let mut best_d = best.distance_sq(target);
        for &c in &corners[1..] {
            let d = c.distance_sq(target);
            if d < best_d {
                best = c;
                best_d = d;
            }
        }
        best
    }

    /// Reject non-finite coordinates and non-positive dimensions.
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |reason: &str| CoreError::InvalidField { id: self.id, reason: reason.into() };
        if !(self.x.is_finite() && self.y.is_finite()) {
            return Err(invalid("origin is not finite"));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(invalid("width must be positive"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(invalid("height must be positive"));
        }
        Ok(())
    }

    /// `true` if the two rectangles overlap, with `gap` of required clearance.
    pub fn overlaps(&self, other: &Field, gap: f64) -> bool {
        self.x < other.max_x() + gap
            && other.x < self.max_x() + gap
            && self.y < other.max_y() + gap
            && other.y < self.max_y() + gap
    }
}

// ── Obstacle tests ────────────────────────────────────────────────────────────

/// `true` if `p` is strictly inside any field.
pub fn inside_any(p: Point, fields: &[Field]) -> bool {
    fields.iter().any(|f| f.contains_strict(p))
}

/// `true` if the segment `a → b` stays out of every field interior, judged by
/// `samples + 1` evenly spaced interpolation points (both endpoints included).
///
/// Sampling can miss a field corner clipped between two samples; callers
/// keep segments short relative to field size so this does not arise in
/// practice.
pub fn segment_clear(a: Point, b: Point, fields: &[Field], samples: u32) -> bool {
    let samples = samples.max(1);
    (0..=samples).all(|i| {
        let t = i as f64 / samples as f64;
        !inside_any(a.lerp(b, t), fields)
    })
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// An axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Bounding box of all fields plus `extra`, or `None` when `fields` is
    /// empty.
    pub fn around(fields: &[Field], extra: Point) -> Option<Self> {
        if fields.is_empty() {
            return None;
        }
        let mut min = extra;
        let mut max = extra;
        for f in fields {
            min.x = min.x.min(f.x);
            min.y = min.y.min(f.y);
            max.x = max.x.max(f.max_x());
            max.y = max.y.max(f.max_y());
        }
        Some(Self { min, max })
    }

    /// Grow every side by `margin`.
    pub fn padded(self, margin: f64) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }
}

//! Flattened playable regions (fairway, green)
//!
//! Membership uses the crossing-number rule, which gives even-odd fill
//! semantics. An edge is counted when exactly one endpoint has a y strictly
//! greater than the query point, so a point on a horizontal edge or a shared
//! vertex always resolves the same way.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::path::Contour;

/// A closed polygon with a cached bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Polygon vertices, closing edge implied
    pub points: Vec<Vec2>,
    min: Vec2,
    max: Vec2,
}

impl Region {
    pub fn from_points(points: Vec<Vec2>) -> Self {
        let (min, max) = points.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        );
        Self { points, min, max }
    }

    /// Flatten a curve contour into a region
    pub fn from_contour(contour: &Contour) -> Self {
        Self::from_points(contour.flatten_default())
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.min, self.max)
    }

    /// Even-odd point membership
    pub fn contains(&self, p: Vec2) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        if p.x < self.min.x || p.x > self.max.x || p.y < self.min.y || p.y > self.max.y {
            return false;
        }

        let mut inside = false;
        let mut j = self.points.len() - 1;
        for i in 0..self.points.len() {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > p.y) != (b.y > p.y) {
                let cross_x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < cross_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

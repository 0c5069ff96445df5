//! Curve contours for course regions
//!
//! A contour is authored like a canvas path: a start point followed by line,
//! quadratic and cubic segments, closed back to the start. Membership testing
//! needs a polygon, so curves are flattened by recursive de Casteljau
//! subdivision until every control point sits within tolerance of its chord.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FLATTEN_MAX_DEPTH, FLATTEN_TOLERANCE};

/// One segment of a contour, ending at its last point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Line(Vec2),
    Quad { ctrl: Vec2, to: Vec2 },
    Cubic { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
}

impl Segment {
    /// End point of the segment
    pub fn end(&self) -> Vec2 {
        match *self {
            Segment::Line(to) => to,
            Segment::Quad { to, .. } => to,
            Segment::Cubic { to, .. } => to,
        }
    }
}

/// A closed contour built from line/quadratic/cubic segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub start: Vec2,
    pub segments: Vec<Segment>,
}

impl Contour {
    /// Begin a contour at `start`
    pub fn move_to(x: f32, y: f32) -> Self {
        Self {
            start: Vec2::new(x, y),
            segments: Vec::new(),
        }
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.segments.push(Segment::Line(Vec2::new(x, y)));
        self
    }

    pub fn quad_to(mut self, cx: f32, cy: f32, x: f32, y: f32) -> Self {
        self.segments.push(Segment::Quad {
            ctrl: Vec2::new(cx, cy),
            to: Vec2::new(x, y),
        });
        self
    }

    pub fn cubic_to(mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> Self {
        self.segments.push(Segment::Cubic {
            ctrl1: Vec2::new(c1x, c1y),
            ctrl2: Vec2::new(c2x, c2y),
            to: Vec2::new(x, y),
        });
        self
    }

    /// Flatten into polygon vertices (closing edge implied)
    pub fn flatten(&self, tolerance: f32) -> Vec<Vec2> {
        let mut points = vec![self.start];
        let mut current = self.start;

        for segment in &self.segments {
            match *segment {
                Segment::Line(to) => points.push(to),
                Segment::Quad { ctrl, to } => {
                    flatten_quad(current, ctrl, to, tolerance, 0, &mut points);
                }
                Segment::Cubic { ctrl1, ctrl2, to } => {
                    flatten_cubic(current, ctrl1, ctrl2, to, tolerance, 0, &mut points);
                }
            }
            current = segment.end();
        }

        // Drop an explicit return to the start; the polygon closes implicitly
        if points.len() > 1 && points.last() == Some(&self.start) {
            points.pop();
        }
        points
    }

    /// Flatten with the default course tolerance
    pub fn flatten_default(&self) -> Vec<Vec2> {
        self.flatten(FLATTEN_TOLERANCE)
    }
}

#[inline]
fn mid(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

/// Distance from `p` to the infinite line through `a` and `b`
fn distance_to_chord(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let chord = b - a;
    let len = chord.length();
    if len < 1e-6 {
        return p.distance(a);
    }
    (p - a).perp_dot(chord).abs() / len
}

fn flatten_quad(p0: Vec2, p1: Vec2, p2: Vec2, tolerance: f32, depth: u32, out: &mut Vec<Vec2>) {
    if depth >= FLATTEN_MAX_DEPTH || distance_to_chord(p1, p0, p2) <= tolerance {
        out.push(p2);
        return;
    }
    let a = mid(p0, p1);
    let b = mid(p1, p2);
    let m = mid(a, b);
    flatten_quad(p0, a, m, tolerance, depth + 1, out);
    flatten_quad(m, b, p2, tolerance, depth + 1, out);
}

fn flatten_cubic(
    p0: Vec2,
    p1: Vec2,
    p2: Vec2,
    p3: Vec2,
    tolerance: f32,
    depth: u32,
    out: &mut Vec<Vec2>,
) {
    let flat = distance_to_chord(p1, p0, p3) <= tolerance && distance_to_chord(p2, p0, p3) <= tolerance;
    if depth >= FLATTEN_MAX_DEPTH || flat {
        out.push(p3);
        return;
    }
    let a = mid(p0, p1);
    let b = mid(p1, p2);
    let c = mid(p2, p3);
    let ab = mid(a, b);
    let bc = mid(b, c);
    let m = mid(ab, bc);
    flatten_cubic(p0, a, ab, m, tolerance, depth + 1, out);
    flatten_cubic(m, bc, c, p3, tolerance, depth + 1, out);
}

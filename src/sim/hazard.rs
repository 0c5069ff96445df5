//! Course hazards: trees (circles) and bunkers (rotated ellipses)
//!
//! Both kinds block motion. Trees are inflated by the ball radius; bunkers use
//! the bare ellipse so a ball only stops once its centre is in the sand.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Hazard categories reported to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Tree,
    Bunker,
}

impl HazardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Tree => "tree",
            HazardKind::Bunker => "bunker",
        }
    }
}

/// A single obstacle shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Hazard {
    Circular {
        center: Vec2,
        radius: f32,
    },
    Elliptical {
        center: Vec2,
        rx: f32,
        ry: f32,
        /// Radians, applied about the centre
        rotation: f32,
    },
}

impl Hazard {
    pub fn tree(x: f32, y: f32, radius: f32) -> Self {
        Hazard::Circular {
            center: Vec2::new(x, y),
            radius,
        }
    }

    pub fn bunker(x: f32, y: f32, rx: f32, ry: f32, rotation: f32) -> Self {
        Hazard::Elliptical {
            center: Vec2::new(x, y),
            rx,
            ry,
            rotation,
        }
    }

    pub fn kind(&self) -> HazardKind {
        match self {
            Hazard::Circular { .. } => HazardKind::Tree,
            Hazard::Elliptical { .. } => HazardKind::Bunker,
        }
    }

    pub fn center(&self) -> Vec2 {
        match *self {
            Hazard::Circular { center, .. } => center,
            Hazard::Elliptical { center, .. } => center,
        }
    }

    /// Whether a ball centred at `p` is inside this hazard
    pub fn contains(&self, p: Vec2, ball_radius: f32) -> bool {
        match *self {
            Hazard::Circular { center, radius } => {
                let reach = radius + ball_radius;
                p.distance_squared(center) < reach * reach
            }
            Hazard::Elliptical {
                center,
                rx,
                ry,
                rotation,
            } => {
                let (sin, cos) = rotation.sin_cos();
                let d = p - center;
                let local_x = cos * d.x + sin * d.y;
                let local_y = sin * d.x - cos * d.y;
                (local_x * local_x) / (rx * rx) + (local_y * local_y) / (ry * ry) <= 1.0
            }
        }
    }

    /// Centre plus the four axis extremes of a bunker (centre only for trees)
    pub fn probe_points(&self) -> Vec<Vec2> {
        match *self {
            Hazard::Circular { center, .. } => vec![center],
            Hazard::Elliptical {
                center,
                rx,
                ry,
                rotation,
            } => {
                let (sin, cos) = rotation.sin_cos();
                let rotate = |dx: f32, dy: f32| {
                    center + Vec2::new(dx * cos - dy * sin, dx * sin + dy * cos)
                };
                vec![
                    center,
                    rotate(rx, 0.0),
                    rotate(-rx, 0.0),
                    rotate(0.0, ry),
                    rotate(0.0, -ry),
                ]
            }
        }
    }
}

/// A hazard found at a point, with its index in the set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardHit {
    pub index: usize,
    pub kind: HazardKind,
}

/// The active hole's hazards, trees ordered ahead of bunkers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HazardSet {
    hazards: Vec<Hazard>,
    ball_radius: f32,
}

impl HazardSet {
    /// Build a set; trees always take precedence over bunkers
    pub fn new(trees: &[Hazard], bunkers: &[Hazard], ball_radius: f32) -> Self {
        let mut hazards = Vec::with_capacity(trees.len() + bunkers.len());
        hazards.extend(trees.iter().copied());
        hazards.extend(bunkers.iter().copied());
        hazards.sort_by_key(|h| match h.kind() {
            HazardKind::Tree => 0,
            HazardKind::Bunker => 1,
        });
        Self {
            hazards,
            ball_radius,
        }
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    /// First hazard containing `p`
    pub fn classify(&self, p: Vec2) -> Option<HazardHit> {
        self.first_blocking(p, None)
    }

    /// First hazard containing `p`, ignoring the `exempt` index
    pub fn first_blocking(&self, p: Vec2, exempt: Option<usize>) -> Option<HazardHit> {
        self.hazards
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != exempt)
            .find(|(_, hazard)| hazard.contains(p, self.ball_radius))
            .map(|(index, hazard)| HazardHit {
                index,
                kind: hazard.kind(),
            })
    }
}

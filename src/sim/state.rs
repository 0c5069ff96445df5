//! Players, balls and on-screen messages
//!
//! Everything a renderer needs to draw the roster lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{BALL_RADIUS, TEE_SCATTER};

/// A golf ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            radius: BALL_RADIUS,
        }
    }
}

/// Ball colours, assigned by seat
pub const PLAYER_COLORS: [&str; 4] = ["#ffffff", "#e74c3c", "#3498db", "#f1c40f"];

/// One participant in the round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub label: String,
    pub color: String,
    pub ball: Ball,
    pub strokes_this_hole: u32,
    /// Strokes per hole in round order; `None` until the hole is played
    pub hole_scores: Vec<Option<u32>>,
    /// Sunk on the current hole
    pub finished: bool,
}

impl Player {
    pub fn new(seat: usize, hole_count: usize) -> Self {
        Self {
            id: seat as u32 + 1,
            label: format!("Player {}", seat + 1),
            color: PLAYER_COLORS[seat % PLAYER_COLORS.len()].to_string(),
            ball: Ball::at(Vec2::ZERO),
            strokes_this_hole: 0,
            hole_scores: vec![None; hole_count],
            finished: false,
        }
    }

    /// Reset per-hole state for round slot `hole_index` and place the ball
    pub fn reset_for_hole(&mut self, hole_index: usize, pos: Vec2) {
        self.ball.pos = pos;
        self.strokes_this_hole = 0;
        self.finished = false;
        if let Some(slot) = self.hole_scores.get_mut(hole_index) {
            *slot = None;
        }
    }

    /// Sum of recorded hole scores
    pub fn total_strokes(&self) -> u32 {
        self.hole_scores.iter().flatten().sum()
    }
}

/// Message colour classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MessageTone {
    #[default]
    Info,
    Success,
    Warning,
    Alert,
}

impl MessageTone {
    pub fn color(&self) -> &'static str {
        match self {
            MessageTone::Info => "#ffffff",
            MessageTone::Success => "#2ecc71",
            MessageTone::Warning => "#e67e22",
            MessageTone::Alert => "#e74c3c",
        }
    }
}

/// The status line shown under the course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub tone: MessageTone,
}

impl Message {
    pub fn new(text: impl Into<String>, tone: MessageTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn clear() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Seeded RNG with a draw counter
#[derive(Debug, Clone)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
    rng: Pcg32,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            draws: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform value in [-extent, extent]
    pub fn symmetric(&mut self, extent: f32) -> f32 {
        self.draws += 1;
        if extent <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(-extent..=extent)
    }

    /// Small random offset for a ball placed at the tee
    pub fn tee_offset(&mut self) -> Vec2 {
        Vec2::new(self.symmetric(TEE_SCATTER), self.symmetric(TEE_SCATTER))
    }
}

//! Single-stroke simulation
//!
//! A stroke is pure constant-velocity translation for a fixed number of
//! steps. Each step checks, in order: the cup, hazards, then the step budget.
//! Any stop short of the cup that leaves the ball off fairway-or-green puts it
//! back on the last playable point seen during the same stroke.
//!
//! `ShotState::step` advances one step so a host can animate a frame at a
//! time; `simulate` runs the same machine to completion.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::course::Course;
use super::hazard::HazardKind;
use super::state::{Message, MessageTone};
use crate::consts::*;
use crate::{aim_direction, clamp_angle, clamp_power};

/// How a stroke ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// Ball dropped into the cup
    Sunk,
    /// Ball reached the cup too fast and skipped out
    Stopped,
    /// Ball entered a hazard and stopped there
    HazardStop { kind: HazardKind },
    /// Ball ran out of travel
    Exhausted,
}

/// Terminal result of a stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotReport {
    pub outcome: ShotOutcome,
    /// Final resting position (after any out-of-bounds reset)
    pub position: Vec2,
    pub went_out_of_bounds: bool,
    /// Every position the ball passed through, for replay
    pub trace: Vec<Vec2>,
}

impl ShotReport {
    /// Status line for this stroke; sinks are announced by the session
    pub fn notice(&self) -> Option<Message> {
        if self.went_out_of_bounds {
            return Some(Message::new(
                "Ball went out of bounds. Reset to edge of fairway.",
                MessageTone::Warning,
            ));
        }
        match self.outcome {
            ShotOutcome::Sunk | ShotOutcome::Exhausted => None,
            ShotOutcome::Stopped => Some(Message::new(
                "Too much power! The ball skipped over the hole.",
                MessageTone::Warning,
            )),
            ShotOutcome::HazardStop { kind } => Some(Message::new(
                format!("HIT A {}! Ball stopped.", kind.as_str().to_uppercase()),
                MessageTone::Alert,
            )),
        }
    }
}

/// In-flight stroke. Discard once `step` returns a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotState {
    pub position: Vec2,
    /// Displacement per step
    pub velocity: Vec2,
    pub remaining_steps: u32,
    /// Hazard the ball started in; ignored until the ball is seen clear of all hazards
    pub exempt_hazard: Option<usize>,
    /// Last point seen on fairway or green this stroke
    pub last_valid_position: Vec2,
    trace: Vec<Vec2>,
}

impl ShotState {
    /// Set up a stroke from `start` with an aim angle (degrees) and power
    pub fn begin(start: Vec2, angle_deg: f32, power: f32, course: &Course) -> Self {
        let angle = clamp_angle(angle_deg);
        let power = clamp_power(power);

        let distance = power * DISTANCE_SCALE;
        let remaining_steps = (distance / STEP_LENGTH).floor() as u32;

        let exempt_hazard = course.hazard_at(start).map(|hit| hit.index);
        let last_valid_position = if course.in_bounds(start) {
            start
        } else {
            course.tee
        };

        Self {
            position: start,
            velocity: aim_direction(angle) * STEP_LENGTH,
            remaining_steps,
            exempt_hazard,
            last_valid_position,
            trace: Vec::with_capacity(remaining_steps as usize),
        }
    }

    /// Travel left, in power units
    pub fn remaining_power(&self) -> f32 {
        self.remaining_steps as f32 * STEP_LENGTH / DISTANCE_SCALE
    }

    /// Advance one step. Returns the report once the stroke has ended.
    pub fn step(&mut self, course: &Course) -> Option<ShotReport> {
        if self.remaining_steps == 0 {
            return Some(self.finish(ShotOutcome::Exhausted, course));
        }

        self.position += self.velocity;
        self.remaining_steps -= 1;
        self.trace.push(self.position);

        if course.in_bounds(self.position) {
            self.last_valid_position = self.position;
        }

        let to_cup = self.position.distance(course.hole);
        if to_cup < HOLE_RADIUS {
            let outcome = if self.remaining_power() <= SINK_POWER_THRESHOLD {
                ShotOutcome::Sunk
            } else {
                ShotOutcome::Stopped
            };
            return Some(self.finish(outcome, course));
        }

        if let Some(hit) = course.hazards.first_blocking(self.position, self.exempt_hazard) {
            return Some(self.finish(ShotOutcome::HazardStop { kind: hit.kind }, course));
        }
        if self.exempt_hazard.is_some() && course.hazard_at(self.position).is_none() {
            self.exempt_hazard = None;
        }

        if self.remaining_steps == 0 {
            // Dying on the lip drops in
            let outcome = if to_cup < HOLE_RADIUS + LIP_TOLERANCE {
                ShotOutcome::Sunk
            } else {
                ShotOutcome::Exhausted
            };
            return Some(self.finish(outcome, course));
        }

        None
    }

    fn finish(&mut self, outcome: ShotOutcome, course: &Course) -> ShotReport {
        let mut went_out_of_bounds = false;
        if outcome != ShotOutcome::Sunk && !course.in_bounds(self.position) {
            self.position = self.last_valid_position;
            went_out_of_bounds = true;
        }

        ShotReport {
            outcome,
            position: self.position,
            went_out_of_bounds,
            trace: std::mem::take(&mut self.trace),
        }
    }
}

/// Run a stroke to completion
pub fn simulate(start: Vec2, angle_deg: f32, power: f32, course: &Course) -> ShotReport {
    let mut shot = ShotState::begin(start, angle_deg, power, course);
    loop {
        if let Some(report) = shot.step(course) {
            return report;
        }
    }
}

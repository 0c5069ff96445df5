//! Computer player
//!
//! Tries a fan of aims and powers against the pure stroke simulator and
//! keeps the best result. Deterministic for a given course and ball.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::course::Course;
use super::shot::{ShotOutcome, simulate};
use crate::consts::*;
use crate::{aim_angle_between, clamp_angle, clamp_power};

/// Angular spread either side of the direct line, degrees
const FAN_HALF_WIDTH: f32 = 90.0;
const FAN_STEP: f32 = 5.0;
/// Fractions of full power tried on every line
const POWER_FRACTIONS: [f32; 4] = [0.25, 0.5, 0.75, 1.0];

/// An aim and power pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotPlan {
    pub angle: f32,
    pub power: f32,
}

/// Power that reaches `distance` with a gentle roll left for the cup
pub fn arrival_power(distance: f32) -> f32 {
    clamp_power(distance / DISTANCE_SCALE + SINK_POWER_THRESHOLD / 2.0)
}

/// Pick a stroke for a ball at `ball`
pub fn suggest_shot(course: &Course, ball: Vec2) -> ShotPlan {
    let direct = aim_angle_between(ball, course.hole);
    let putt = arrival_power(ball.distance(course.hole));

    let mut best = ShotPlan {
        angle: direct,
        power: putt,
    };
    let mut best_score = f32::INFINITY;

    let fan = (FAN_HALF_WIDTH / FAN_STEP) as i32;
    // Direct line first so it wins ties
    let offsets = std::iter::once(0).chain((1..=fan).flat_map(|i| [i, -i]));

    for offset in offsets {
        let angle = (direct + offset as f32 * FAN_STEP).rem_euclid(360.0);
        let powers = std::iter::once(putt).chain(POWER_FRACTIONS.iter().map(|f| f * MAX_POWER));

        for power in powers {
            let report = simulate(ball, angle, power, course);
            if report.outcome == ShotOutcome::Sunk {
                return ShotPlan {
                    angle: clamp_angle(angle),
                    power,
                };
            }

            let mut score = report.position.distance(course.hole);
            // Not moving at all is never progress
            if report.position.distance(ball) < STEP_LENGTH {
                score += CANVAS_WIDTH;
            }
            if score < best_score {
                best_score = score;
                best = ShotPlan {
                    angle: clamp_angle(angle),
                    power,
                };
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hazard::{Hazard, HazardSet};
    use crate::sim::path::Contour;
    use crate::sim::region::Region;

    fn open_course(hazards: HazardSet) -> Course {
        Course::from_parts(
            1,
            3,
            Vec2::new(100.0, 300.0),
            Vec2::new(700.0, 300.0),
            Region::from_contour(
                &Contour::move_to(0.0, 0.0)
                    .line_to(800.0, 0.0)
                    .line_to(800.0, 600.0)
                    .line_to(0.0, 600.0),
            ),
            hazards,
        )
    }

    #[test]
    fn test_arrival_power_bounds() {
        assert_eq!(arrival_power(0.0), SINK_POWER_THRESHOLD / 2.0);
        assert_eq!(arrival_power(3000.0), MAX_POWER);
    }

    #[test]
    fn test_direct_putt_sinks() {
        let course = open_course(HazardSet::default());
        let ball = Vec2::new(550.0, 300.0);
        let plan = suggest_shot(&course, ball);
        assert!((plan.angle - 90.0).abs() < 1e-3);
        let report = simulate(ball, plan.angle, plan.power, &course);
        assert_eq!(report.outcome, ShotOutcome::Sunk);
    }

    #[test]
    fn test_long_shot_makes_progress() {
        let course = open_course(HazardSet::default());
        let ball = Vec2::new(50.0, 300.0);
        let plan = suggest_shot(&course, ball);
        let report = simulate(ball, plan.angle, plan.power, &course);
        assert!(report.position.distance(course.hole) < ball.distance(course.hole));
    }

    #[test]
    fn test_routes_around_tree() {
        let tree = Hazard::tree(625.0, 300.0, 20.0);
        let course = open_course(HazardSet::new(&[tree], &[], BALL_RADIUS));
        let ball = Vec2::new(550.0, 300.0);
        let plan = suggest_shot(&course, ball);
        assert!((plan.angle - 90.0).abs() > 1.0);
        let report = simulate(ball, plan.angle, plan.power, &course);
        assert!(!matches!(report.outcome, ShotOutcome::HazardStop { .. }));
    }

    #[test]
    fn test_every_authored_hole_progresses_from_tee() {
        for n in 1..=COURSE_COUNT {
            let course = Course::load(n);
            let plan = suggest_shot(&course, course.tee);
            let report = simulate(course.tee, plan.angle, plan.power, &course);
            let before = course.tee.distance(course.hole);
            assert!(
                report.position.distance(course.hole) < before,
                "hole {n} made no progress"
            );
        }
    }
}

//! Course layouts and the active hole's geometry
//!
//! The nine authored layouts are fixed data. Loading a hole flattens its
//! fairway and green into regions and copies its hazards, dropping any bunker
//! that never touches playable ground.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hazard::{Hazard, HazardHit, HazardSet};
use super::path::Contour;
use super::region::Region;
use crate::consts::{BALL_RADIUS, COURSE_COUNT};

/// Authored fairway outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FairwayShape {
    Straight,
    DoglegRight,
    DoglegLeft,
    SCurve,
    StraightShort,
    Narrow,
    Diagonal,
    StandardCurved,
    VerticalStraight,
}

impl FairwayShape {
    pub const ALL: [FairwayShape; 9] = [
        FairwayShape::Straight,
        FairwayShape::DoglegRight,
        FairwayShape::DoglegLeft,
        FairwayShape::SCurve,
        FairwayShape::StraightShort,
        FairwayShape::Narrow,
        FairwayShape::Diagonal,
        FairwayShape::StandardCurved,
        FairwayShape::VerticalStraight,
    ];

    /// Control points of the fairway outline
    pub fn contour(&self) -> Contour {
        match self {
            FairwayShape::Straight => Contour::move_to(40.0, 230.0)
                .cubic_to(250.0, 200.0, 550.0, 200.0, 780.0, 230.0)
                .line_to(780.0, 370.0)
                .cubic_to(550.0, 400.0, 250.0, 400.0, 40.0, 370.0),
            FairwayShape::DoglegRight => Contour::move_to(40.0, 560.0)
                .line_to(40.0, 180.0)
                .quad_to(40.0, 60.0, 160.0, 60.0)
                .line_to(760.0, 60.0)
                .line_to(760.0, 220.0)
                .line_to(260.0, 220.0)
                .quad_to(180.0, 220.0, 180.0, 300.0)
                .line_to(180.0, 560.0),
            FairwayShape::DoglegLeft => Contour::move_to(760.0, 560.0)
                .line_to(760.0, 180.0)
                .quad_to(760.0, 60.0, 640.0, 60.0)
                .line_to(40.0, 60.0)
                .line_to(40.0, 220.0)
                .line_to(540.0, 220.0)
                .quad_to(620.0, 220.0, 620.0, 300.0)
                .line_to(620.0, 560.0),
            FairwayShape::SCurve => Contour::move_to(0.0, 250.0)
                .cubic_to(200.0, 50.0, 400.0, 450.0, 600.0, 250.0)
                .line_to(800.0, 250.0)
                .line_to(800.0, 450.0)
                .cubic_to(500.0, 650.0, 300.0, 150.0, 0.0, 450.0),
            FairwayShape::StraightShort => Contour::move_to(140.0, 230.0)
                .line_to(660.0, 230.0)
                .quad_to(720.0, 230.0, 720.0, 300.0)
                .quad_to(720.0, 370.0, 660.0, 370.0)
                .line_to(140.0, 370.0)
                .quad_to(80.0, 370.0, 80.0, 300.0)
                .quad_to(80.0, 230.0, 140.0, 230.0),
            FairwayShape::Narrow => Contour::move_to(20.0, 265.0)
                .cubic_to(250.0, 245.0, 550.0, 285.0, 780.0, 265.0)
                .line_to(780.0, 335.0)
                .cubic_to(550.0, 355.0, 250.0, 315.0, 20.0, 335.0),
            FairwayShape::Diagonal => Contour::move_to(40.0, 470.0)
                .line_to(650.0, 40.0)
                .quad_to(780.0, 40.0, 780.0, 140.0)
                .line_to(170.0, 570.0)
                .quad_to(40.0, 570.0, 40.0, 470.0),
            FairwayShape::StandardCurved => Contour::move_to(20.0, 400.0)
                .cubic_to(200.0, 380.0, 400.0, 120.0, 780.0, 140.0)
                .line_to(780.0, 260.0)
                .cubic_to(450.0, 240.0, 250.0, 500.0, 20.0, 520.0),
            FairwayShape::VerticalStraight => Contour::move_to(330.0, 580.0)
                .line_to(330.0, 60.0)
                .quad_to(330.0, 20.0, 400.0, 20.0)
                .quad_to(470.0, 20.0, 470.0, 60.0)
                .line_to(470.0, 580.0),
        }
    }
}

/// Flatten a fairway outline
pub fn build_fairway(shape: FairwayShape) -> Region {
    Region::from_contour(&shape.contour())
}

/// Lobed green outline around the cup
pub fn green_contour(hole: Vec2) -> Contour {
    let (x, y) = (hole.x, hole.y);
    Contour::move_to(x, y - 45.0)
        .cubic_to(x + 35.0, y - 45.0, x + 60.0, y - 5.0, x + 40.0, y + 35.0)
        .cubic_to(x + 20.0, y + 55.0, x - 25.0, y + 55.0, x - 40.0, y + 35.0)
        .cubic_to(x - 60.0, y + 5.0, x - 40.0, y - 40.0, x, y - 45.0)
}

pub fn build_green(hole: Vec2) -> Region {
    Region::from_contour(&green_contour(hole))
}

/// Static description of one hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseLayout {
    pub par: u32,
    pub tee: Vec2,
    pub hole: Vec2,
    pub fairway: FairwayShape,
    pub bunkers: Vec<Hazard>,
    pub trees: Vec<Hazard>,
}

/// Layout for a 1-based hole number, wrapping around the authored table
pub fn layout_for_hole(hole_number: usize) -> CourseLayout {
    let index = hole_number.saturating_sub(1) % COURSE_COUNT;
    authored_layout(index)
}

fn authored_layout(index: usize) -> CourseLayout {
    let layout = |par, tee: (f32, f32), hole: (f32, f32), fairway, bunkers, trees| CourseLayout {
        par,
        tee: Vec2::new(tee.0, tee.1),
        hole: Vec2::new(hole.0, hole.1),
        fairway,
        bunkers,
        trees,
    };

    match index {
        0 => layout(
            3,
            (80.0, 300.0),
            (700.0, 300.0),
            FairwayShape::Straight,
            vec![Hazard::bunker(520.0, 345.0, 40.0, 20.0, 0.0)],
            vec![Hazard::tree(350.0, 250.0, 18.0)],
        ),
        1 => layout(
            4,
            (110.0, 500.0),
            (680.0, 140.0),
            FairwayShape::DoglegRight,
            vec![
                Hazard::bunker(420.0, 180.0, 45.0, 22.0, 0.3),
                Hazard::bunker(110.0, 300.0, 30.0, 18.0, PI / 2.0),
            ],
            vec![Hazard::tree(260.0, 300.0, 30.0), Hazard::tree(560.0, 95.0, 20.0)],
        ),
        2 => layout(
            4,
            (50.0, 300.0),
            (700.0, 300.0),
            FairwayShape::SCurve,
            vec![
                Hazard::bunker(300.0, 150.0, 40.0, 25.0, PI / 4.0),
                Hazard::bunker(500.0, 450.0, 50.0, 30.0, -PI / 6.0),
            ],
            vec![
                Hazard::tree(300.0, 250.0, 20.0),
                Hazard::tree(450.0, 200.0, 25.0),
                Hazard::tree(400.0, 400.0, 20.0),
                Hazard::tree(600.0, 350.0, 30.0),
            ],
        ),
        3 => layout(
            2,
            (200.0, 300.0),
            (600.0, 300.0),
            FairwayShape::StraightShort,
            vec![Hazard::bunker(400.0, 250.0, 35.0, 18.0, 0.0)],
            vec![Hazard::tree(400.0, 350.0, 15.0)],
        ),
        4 => layout(
            4,
            (690.0, 500.0),
            (120.0, 140.0),
            FairwayShape::DoglegLeft,
            vec![
                Hazard::bunker(380.0, 100.0, 45.0, 22.0, -0.3),
                Hazard::bunker(690.0, 300.0, 30.0, 18.0, PI / 2.0),
            ],
            vec![Hazard::tree(540.0, 300.0, 30.0), Hazard::tree(240.0, 95.0, 20.0)],
        ),
        5 => layout(
            3,
            (80.0, 300.0),
            (720.0, 300.0),
            FairwayShape::Narrow,
            vec![Hazard::bunker(420.0, 300.0, 30.0, 12.0, 0.0)],
            vec![Hazard::tree(300.0, 230.0, 20.0), Hazard::tree(520.0, 370.0, 20.0)],
        ),
        6 => layout(
            4,
            (100.0, 520.0),
            (700.0, 90.0),
            FairwayShape::Diagonal,
            vec![Hazard::bunker(520.0, 260.0, 40.0, 20.0, -0.6)],
            vec![Hazard::tree(300.0, 300.0, 22.0), Hazard::tree(620.0, 220.0, 18.0)],
        ),
        7 => layout(
            4,
            (80.0, 450.0),
            (700.0, 200.0),
            FairwayShape::StandardCurved,
            vec![Hazard::bunker(600.0, 250.0, 40.0, 20.0, 0.2)],
            vec![Hazard::tree(420.0, 380.0, 25.0), Hazard::tree(250.0, 330.0, 18.0)],
        ),
        _ => layout(
            3,
            (400.0, 540.0),
            (400.0, 80.0),
            FairwayShape::VerticalStraight,
            vec![Hazard::bunker(430.0, 200.0, 25.0, 40.0, 0.0)],
            vec![Hazard::tree(360.0, 320.0, 15.0), Hazard::tree(445.0, 430.0, 12.0)],
        ),
    }
}

/// The hole currently in play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// 1-based hole number as played (before wraparound)
    pub number: usize,
    pub par: u32,
    pub tee: Vec2,
    pub hole: Vec2,
    pub fairway: Region,
    pub green: Region,
    pub hazards: HazardSet,
}

impl Course {
    /// Build the playable course for a 1-based hole number
    pub fn load(hole_number: usize) -> Self {
        let layout = layout_for_hole(hole_number);
        Self::from_layout(hole_number, &layout)
    }

    /// Build regions and hazard copies from a layout
    pub fn from_layout(number: usize, layout: &CourseLayout) -> Self {
        let fairway = build_fairway(layout.fairway);
        let green = build_green(layout.hole);

        let in_play = |p: Vec2| fairway.contains(p) || green.contains(p);
        let bunkers: Vec<Hazard> = layout
            .bunkers
            .iter()
            .filter(|bunker| {
                let touches = bunker.probe_points().into_iter().any(in_play);
                if !touches {
                    log::trace!("hole {}: dropping bunker at {}", number, bunker.center());
                }
                touches
            })
            .copied()
            .collect();

        let hazards = HazardSet::new(&layout.trees, &bunkers, BALL_RADIUS);

        Self {
            number,
            par: layout.par,
            tee: layout.tee,
            hole: layout.hole,
            fairway,
            green,
            hazards,
        }
    }

    /// Assemble a course from prebuilt parts, without bunker pruning
    pub fn from_parts(
        number: usize,
        par: u32,
        tee: Vec2,
        hole: Vec2,
        fairway: Region,
        hazards: HazardSet,
    ) -> Self {
        Self {
            number,
            par,
            tee,
            hole,
            fairway,
            green: build_green(hole),
            hazards,
        }
    }

    /// Fairway or green
    pub fn in_bounds(&self, p: Vec2) -> bool {
        self.fairway.contains(p) || self.green.contains(p)
    }

    pub fn hazard_at(&self, p: Vec2) -> Option<HazardHit> {
        self.hazards.classify(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, TEE_SCATTER};
    use crate::sim::hazard::HazardKind;
    use proptest::prelude::*;

    #[test]
    fn test_table_wraps_around() {
        assert_eq!(layout_for_hole(1), layout_for_hole(10));
        assert_eq!(layout_for_hole(9).fairway, FairwayShape::VerticalStraight);
        assert_eq!(layout_for_hole(12).fairway, FairwayShape::SCurve);
    }

    #[test]
    fn test_every_layout_is_playable() {
        for n in 1..=COURSE_COUNT {
            let course = Course::load(n);
            assert!(course.fairway.contains(course.tee), "hole {n}: tee off fairway");
            assert!(course.green.contains(course.hole), "hole {n}: cup off green");
            assert!(course.hazard_at(course.tee).is_none(), "hole {n}: tee in hazard");
            assert!(course.hazard_at(course.hole).is_none(), "hole {n}: cup in hazard");
        }
    }

    #[test]
    fn test_tee_scatter_stays_playable() {
        for n in 1..=COURSE_COUNT {
            let course = Course::load(n);
            for dx in [-TEE_SCATTER, TEE_SCATTER] {
                for dy in [-TEE_SCATTER, TEE_SCATTER] {
                    let p = course.tee + Vec2::new(dx, dy);
                    assert!(course.fairway.contains(p), "hole {n}: {p} off fairway");
                    assert!(course.hazard_at(p).is_none(), "hole {n}: {p} in hazard");
                }
            }
        }
    }

    #[test]
    fn test_hazard_centers_classify_as_their_kind() {
        for n in 1..=COURSE_COUNT {
            let course = Course::load(n);
            for (index, hazard) in course.hazards.hazards().iter().enumerate() {
                let hit = course.hazard_at(hazard.center()).unwrap();
                assert_eq!(hit.kind, hazard.kind(), "hole {n}");
                assert_eq!(hit.index, index, "hole {n}");
            }
        }
    }

    #[test]
    fn test_bunker_off_fairway_is_pruned() {
        // Hole 3's upper bunker sits entirely above the S-curve
        let course = Course::load(3);
        let bunkers: Vec<_> = course
            .hazards
            .hazards()
            .iter()
            .filter(|h| h.kind() == HazardKind::Bunker)
            .collect();
        assert_eq!(bunkers.len(), 1);
        assert_eq!(bunkers[0].center(), Vec2::new(500.0, 450.0));
        assert_eq!(course.hazards.len(), 5);
    }

    #[test]
    fn test_layout_hazards_untouched_by_load() {
        let layout = layout_for_hole(3);
        let _ = Course::from_layout(3, &layout);
        assert_eq!(layout.bunkers.len(), 2);
    }

    #[test]
    fn test_green_shape() {
        let green = build_green(Vec2::new(700.0, 300.0));
        assert!(green.contains(Vec2::new(700.0, 260.0)));
        assert!(green.contains(Vec2::new(700.0, 345.0)));
        assert!(green.contains(Vec2::new(740.0, 300.0)));
        assert!(!green.contains(Vec2::new(700.0, 250.0)));
        assert!(!green.contains(Vec2::new(760.0, 300.0)));
    }

    #[test]
    fn test_s_curve_membership() {
        let fairway = build_fairway(FairwayShape::SCurve);
        assert!(fairway.contains(Vec2::new(50.0, 300.0)));
        assert!(fairway.contains(Vec2::new(700.0, 350.0)));
        // Top edge dips to y=250 at x=300
        assert!(!fairway.contains(Vec2::new(300.0, 240.0)));
        assert!(!fairway.contains(Vec2::new(700.0, 240.0)));
    }

    proptest! {
        #[test]
        fn prop_far_outside_canvas_is_out(
            shape_index in 0usize..9,
            x in 1000.0f32..5000.0,
            y in -5000.0f32..5000.0,
            flip in any::<bool>(),
        ) {
            let fairway = build_fairway(FairwayShape::ALL[shape_index]);
            let x = if flip { -x } else { x };
            prop_assert!(!fairway.contains(Vec2::new(x, y)));
            prop_assert!(!fairway.contains(Vec2::new(y, x + CANVAS_HEIGHT)));
        }

        #[test]
        fn prop_tee_to_cup_midline_inside_straight_fairways(t in 0.0f32..=1.0) {
            // Straight, short and vertical holes run a fairway-wide line from tee to cup
            for n in [1usize, 4, 9] {
                let course = Course::load(n);
                let p = course.tee.lerp(course.hole, t);
                prop_assert!(course.in_bounds(p));
                prop_assert!(p.x >= 0.0 && p.x <= CANVAS_WIDTH);
            }
        }
    }
}

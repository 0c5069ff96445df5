//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step length only
//! - Seeded RNG only
//! - Stable hazard order (trees before bunkers)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod course;
pub mod hazard;
pub mod path;
pub mod region;
pub mod scorecard;
pub mod session;
pub mod shot;
pub mod state;

pub use autoplay::{ShotPlan, suggest_shot};
pub use course::{Course, CourseLayout, FairwayShape, build_fairway, build_green, layout_for_hole};
pub use hazard::{Hazard, HazardHit, HazardKind, HazardSet};
pub use path::{Contour, Segment};
pub use region::Region;
pub use scorecard::{HoleColumn, ScoreCell, ScoreClass, ScoreRow, Scorecard};
pub use session::{BallView, RoundConfig, SessionSnapshot, TurnPhase, TurnSession};
pub use shot::{ShotOutcome, ShotReport, ShotState, simulate};
pub use state::{Ball, Message, MessageTone, PLAYER_COLORS, Player, RngState};

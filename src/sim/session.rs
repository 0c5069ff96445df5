//! Turn and scoring state machine
//!
//! `TurnSession` owns the roster, the hole sequence and the active course.
//! Commands issued in the wrong phase are logged and ignored; nothing here
//! returns an error.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::course::{Course, layout_for_hole};
use super::hazard::Hazard;
use super::scorecard::{HoleColumn, Scorecard};
use super::shot::{ShotOutcome, ShotReport, ShotState};
use super::state::{Message, MessageTone, Player, RngState};
use crate::consts::*;
use crate::settings::Settings;
use crate::{clamp_angle, clamp_power};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No round started yet
    Idle,
    /// Waiting for the given player to shoot
    AwaitingShot { player: usize },
    /// A stroke is being stepped
    ShotInFlight { player: usize },
    /// Everyone has sunk; waiting for `advance_hole`
    HoleComplete,
    RoundComplete,
}

/// Parameters of the current round, kept for `restart`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub hole_count: usize,
    pub player_count: usize,
    pub starting_hole: usize,
}

impl RoundConfig {
    pub fn new(hole_count: usize, player_count: usize, starting_hole: usize) -> Self {
        Self {
            hole_count: hole_count.clamp(1, MAX_HOLES),
            player_count: player_count.clamp(1, MAX_PLAYERS),
            starting_hole: starting_hole.clamp(1, COURSE_COUNT),
        }
    }

    /// Hole numbers in play order, cycling through the authored table
    pub fn hole_sequence(&self) -> Vec<usize> {
        (0..self.hole_count)
            .map(|i| (self.starting_hole - 1 + i) % COURSE_COUNT + 1)
            .collect()
    }
}

/// A ball as the renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub label: String,
    pub color: String,
    pub position: Vec2,
    pub radius: f32,
    pub finished: bool,
}

/// Everything a rendering layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: TurnPhase,
    pub hole_number: Option<usize>,
    pub par: Option<u32>,
    pub tee: Option<Vec2>,
    pub cup: Option<Vec2>,
    pub fairway: Vec<Vec2>,
    pub green: Vec<Vec2>,
    /// Fairway extent as (min, max), for framing the view
    pub fairway_bounds: Option<(Vec2, Vec2)>,
    pub hazards: Vec<Hazard>,
    pub balls: Vec<BallView>,
    pub current_player: Option<usize>,
    pub current_strokes: u32,
    pub aim: f32,
    pub power: f32,
    pub message: String,
    pub message_color: &'static str,
    pub scorecard: Scorecard,
}

/// A multi-player, multi-hole round
#[derive(Debug, Clone)]
pub struct TurnSession {
    seed: u64,
    rng: RngState,
    config: Option<RoundConfig>,
    phase: TurnPhase,
    hole_sequence: Vec<usize>,
    hole_pars: Vec<u32>,
    current_hole_index: usize,
    current_player: usize,
    players: Vec<Player>,
    course: Option<Course>,
    aim: f32,
    power: f32,
    message: Message,
    shot: Option<ShotState>,
    last_report: Option<ShotReport>,
}

impl TurnSession {
    pub fn new(settings: &Settings) -> Self {
        Self {
            seed: settings.seed,
            rng: RngState::new(settings.seed),
            config: None,
            phase: TurnPhase::Idle,
            hole_sequence: Vec::new(),
            hole_pars: Vec::new(),
            current_hole_index: 0,
            current_player: 0,
            players: Vec::new(),
            course: None,
            aim: 90.0,
            power: 50.0,
            message: Message::clear(),
            shot: None,
            last_report: None,
        }
    }

    /// New session with a round already started from `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        let settings = settings.clamped();
        let mut session = Self::new(&settings);
        session.start_round(
            settings.hole_count,
            settings.player_count,
            settings.starting_hole,
        );
        session
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn hole_sequence(&self) -> &[usize] {
        &self.hole_sequence
    }

    pub fn current_hole_index(&self) -> usize {
        self.current_hole_index
    }

    pub fn current_hole_number(&self) -> Option<usize> {
        self.course.as_ref().map(|c| c.number)
    }

    /// Player whose turn it is, if any
    pub fn current_player(&self) -> Option<&Player> {
        match self.phase {
            TurnPhase::AwaitingShot { player } | TurnPhase::ShotInFlight { player } => {
                self.players.get(player)
            }
            _ => None,
        }
    }

    pub fn aim(&self) -> f32 {
        self.aim
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    pub fn shot(&self) -> Option<&ShotState> {
        self.shot.as_ref()
    }

    /// Report of the most recent finished stroke
    pub fn last_report(&self) -> Option<&ShotReport> {
        self.last_report.as_ref()
    }

    pub fn config(&self) -> Option<RoundConfig> {
        self.config
    }

    /// Start a fresh round; valid from any phase
    pub fn start_round(&mut self, hole_count: usize, player_count: usize, starting_hole: usize) {
        let config = RoundConfig::new(hole_count, player_count, starting_hole);
        let hole_sequence = config.hole_sequence();

        log::info!(
            "Starting round: {} players, holes {:?}",
            config.player_count,
            hole_sequence
        );

        self.rng = RngState::new(self.seed);
        self.hole_pars = hole_sequence
            .iter()
            .map(|&n| layout_for_hole(n).par)
            .collect();
        self.players = (0..config.player_count)
            .map(|seat| Player::new(seat, config.hole_count))
            .collect();
        self.hole_sequence = hole_sequence;
        self.current_hole_index = 0;
        self.config = Some(config);
        self.shot = None;
        self.last_report = None;

        let first = self.hole_sequence[0];
        self.enter_hole(first);
    }

    /// Replay the last round configuration, abandoning any stroke in flight
    pub fn restart(&mut self) {
        match self.config {
            Some(config) => {
                self.start_round(config.hole_count, config.player_count, config.starting_hole)
            }
            None => log::debug!("Ignoring restart: no round to replay"),
        }
    }

    /// Reload the current slot of the round with the given hole layout
    pub fn load_hole(&mut self, hole_number: usize) {
        match self.phase {
            TurnPhase::Idle | TurnPhase::ShotInFlight { .. } | TurnPhase::RoundComplete => {
                log::debug!("Ignoring load_hole({}) in {:?}", hole_number, self.phase);
            }
            _ => self.enter_hole(hole_number),
        }
    }

    fn enter_hole(&mut self, hole_number: usize) {
        let course = Course::load(hole_number);
        log::info!(
            "Loading hole {} (par {}, {} hazards)",
            course.number,
            course.par,
            course.hazards.len()
        );

        if let Some(slot) = self.hole_sequence.get_mut(self.current_hole_index) {
            *slot = course.number;
        }
        if let Some(par) = self.hole_pars.get_mut(self.current_hole_index) {
            *par = course.par;
        }

        let hole_index = self.current_hole_index;
        for player in &mut self.players {
            let pos = course.tee + self.rng.tee_offset();
            player.reset_for_hole(hole_index, pos);
        }
        log::debug!("Tee scatter: seed {:#x}, {} draws", self.rng.seed, self.rng.draws);

        self.course = Some(course);
        self.current_player = 0;
        self.shot = None;
        self.message = Message::clear();
        self.phase = TurnPhase::AwaitingShot { player: 0 };
    }

    pub fn set_aim(&mut self, degrees: f32) {
        self.aim = clamp_angle(degrees);
    }

    pub fn set_power(&mut self, power: f32) {
        self.power = clamp_power(power);
    }

    /// Launch the current player's stroke. Returns false if ignored.
    pub fn begin_shot(&mut self) -> bool {
        let TurnPhase::AwaitingShot { player } = self.phase else {
            log::debug!("Ignoring shot in {:?}", self.phase);
            return false;
        };
        let Some(course) = &self.course else {
            return false;
        };

        let start = self.players[player].ball.pos;
        self.shot = Some(ShotState::begin(start, self.aim, self.power, course));
        self.message = Message::clear();
        self.phase = TurnPhase::ShotInFlight { player };
        true
    }

    /// Advance the stroke in flight by one step.
    ///
    /// Returns the outcome once the stroke ends. The ball's position follows
    /// the stroke so a renderer can draw every step.
    pub fn step_shot(&mut self) -> Option<ShotOutcome> {
        let TurnPhase::ShotInFlight { player } = self.phase else {
            return None;
        };
        let (Some(course), Some(shot)) = (&self.course, &mut self.shot) else {
            return None;
        };

        match shot.step(course) {
            None => {
                self.players[player].ball.pos = shot.position;
                None
            }
            Some(report) => {
                self.shot = None;
                let outcome = report.outcome;
                self.apply_report(player, report);
                Some(outcome)
            }
        }
    }

    /// Run the current player's stroke to completion
    pub fn take_shot(&mut self) -> Option<ShotOutcome> {
        if !self.begin_shot() {
            return None;
        }
        loop {
            if let Some(outcome) = self.step_shot() {
                return Some(outcome);
            }
        }
    }

    /// Set aim and power, then take the stroke
    pub fn shoot(&mut self, angle_deg: f32, power: f32) -> Option<ShotOutcome> {
        self.set_aim(angle_deg);
        self.set_power(power);
        self.take_shot()
    }

    fn apply_report(&mut self, index: usize, report: ShotReport) {
        let hole_index = self.current_hole_index;
        let player = &mut self.players[index];

        player.strokes_this_hole += 1;
        if let Some(slot) = player.hole_scores.get_mut(hole_index) {
            *slot = Some(player.strokes_this_hole);
        }
        player.ball.pos = report.position;

        log::debug!(
            "{} stroke {}: {:?} at ({:.1}, {:.1}){}",
            player.label,
            player.strokes_this_hole,
            report.outcome,
            report.position.x,
            report.position.y,
            if report.went_out_of_bounds { " [reset]" } else { "" }
        );

        self.message = if report.outcome == ShotOutcome::Sunk {
            player.finished = true;
            Message::new(
                format!(
                    "{}: HOLE COMPLETE! ({} strokes)",
                    player.label, player.strokes_this_hole
                ),
                MessageTone::Success,
            )
        } else {
            report.notice().unwrap_or_else(Message::clear)
        };

        self.last_report = Some(report);
        self.phase = TurnPhase::AwaitingShot { player: index };
        self.advance_turn();
    }

    /// Hand the turn to the next unfinished player, or close out the hole
    pub fn advance_turn(&mut self) {
        let TurnPhase::AwaitingShot { player: current } = self.phase else {
            log::debug!("Ignoring advance_turn in {:?}", self.phase);
            return;
        };

        if self.players.iter().all(|p| p.finished) {
            if self.current_hole_index + 1 >= self.hole_sequence.len() {
                log::info!("Round complete");
                self.phase = TurnPhase::RoundComplete;
            } else {
                self.phase = TurnPhase::HoleComplete;
            }
            return;
        }

        let count = self.players.len();
        let next = (1..=count)
            .map(|offset| (current + offset) % count)
            .find(|&i| !self.players[i].finished)
            .unwrap_or(current);

        self.current_player = next;
        self.phase = TurnPhase::AwaitingShot { player: next };
    }

    /// Move on to the next hole in the sequence; valid only once a hole is complete
    pub fn advance_hole(&mut self) {
        if self.phase != TurnPhase::HoleComplete {
            log::debug!("Ignoring advance_hole in {:?}", self.phase);
            return;
        }

        self.current_hole_index += 1;
        match self.hole_sequence.get(self.current_hole_index) {
            Some(&next) => self.enter_hole(next),
            None => {
                log::info!("Round complete");
                self.phase = TurnPhase::RoundComplete;
            }
        }
    }

    /// Scorecard over the holes reached so far
    pub fn scorecard(&self) -> Scorecard {
        let reached = if self.phase == TurnPhase::Idle {
            0
        } else {
            (self.current_hole_index + 1).min(self.hole_sequence.len())
        };
        let columns: Vec<HoleColumn> = self.hole_sequence[..reached]
            .iter()
            .zip(&self.hole_pars)
            .map(|(&number, &par)| HoleColumn { number, par })
            .collect();
        Scorecard::build(&columns, &self.players)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let course = self.course.as_ref();
        let current_player = self.current_player().map(|_| self.current_player);

        SessionSnapshot {
            phase: self.phase,
            hole_number: course.map(|c| c.number),
            par: course.map(|c| c.par),
            tee: course.map(|c| c.tee),
            cup: course.map(|c| c.hole),
            fairway: course.map(|c| c.fairway.points.clone()).unwrap_or_default(),
            green: course.map(|c| c.green.points.clone()).unwrap_or_default(),
            fairway_bounds: course.map(|c| c.fairway.bounds()),
            hazards: course
                .map(|c| c.hazards.hazards().to_vec())
                .unwrap_or_default(),
            balls: self
                .players
                .iter()
                .map(|p| BallView {
                    label: p.label.clone(),
                    color: p.color.clone(),
                    position: p.ball.pos,
                    radius: p.ball.radius,
                    finished: p.finished,
                })
                .collect(),
            current_player,
            current_strokes: self
                .current_player()
                .map(|p| p.strokes_this_hole)
                .unwrap_or(0),
            aim: self.aim,
            power: self.power,
            message: self.message.text.clone(),
            message_color: self.message.tone.color(),
            scorecard: self.scorecard(),
        }
    }

    /// Place a player's ball directly (scenario setup and replays)
    pub fn place_ball(&mut self, player: usize, pos: Vec2) {
        if matches!(self.phase, TurnPhase::ShotInFlight { .. }) {
            log::debug!("Ignoring place_ball during a stroke");
            return;
        }
        if let Some(p) = self.players.get_mut(player) {
            p.ball.pos = pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(holes: usize, players: usize, start: usize) -> TurnSession {
        let mut s = TurnSession::new(&Settings::default());
        s.start_round(holes, players, start);
        s
    }

    /// Put the current player just below the cup so a gentle putt sinks
    fn line_up_putt(s: &mut TurnSession) {
        let TurnPhase::AwaitingShot { player } = s.phase() else {
            panic!("not awaiting a shot: {:?}", s.phase());
        };
        let cup = s.course().unwrap().hole;
        s.place_ball(player, cup + Vec2::new(0.0, 30.0));
    }

    fn sink_current(s: &mut TurnSession) {
        line_up_putt(s);
        assert_eq!(s.shoot(0.0, 15.0), Some(ShotOutcome::Sunk));
    }

    #[test]
    fn test_idle_until_started() {
        let mut s = TurnSession::new(&Settings::default());
        assert_eq!(s.phase(), TurnPhase::Idle);
        assert_eq!(s.take_shot(), None);
        s.advance_hole();
        s.restart();
        assert_eq!(s.phase(), TurnPhase::Idle);
        assert!(s.scorecard().holes.is_empty());
    }

    #[test]
    fn test_start_round_places_balls_near_tee() {
        let s = session(3, 4, 2);
        assert_eq!(s.hole_sequence(), &[2, 3, 4]);
        assert_eq!(s.phase(), TurnPhase::AwaitingShot { player: 0 });
        let tee = s.course().unwrap().tee;
        for p in s.players() {
            assert!((p.ball.pos - tee).abs().max_element() <= TEE_SCATTER + 1e-3);
            assert_eq!(p.hole_scores.len(), 3);
        }
    }

    #[test]
    fn test_round_config_clamps() {
        let s = session(0, 9, 42);
        let config = s.config().unwrap();
        assert_eq!(config.hole_count, 1);
        assert_eq!(config.player_count, MAX_PLAYERS);
        assert_eq!(config.starting_hole, COURSE_COUNT);
        assert_eq!(s.hole_sequence(), &[9]);
    }

    #[test]
    fn test_sequence_wraps() {
        let config = RoundConfig::new(12, 1, 7);
        assert_eq!(
            config.hole_sequence(),
            vec![7, 8, 9, 1, 2, 3, 4, 5, 6, 7, 8, 9]
        );
    }

    #[test]
    fn test_min_power_stroke_counts_once() {
        let mut s = session(1, 1, 1);
        let outcome = s.shoot(45.0, 0.0);
        assert!(outcome.is_some());
        let p = &s.players()[0];
        assert_eq!(p.strokes_this_hole, 1);
        assert_eq!(p.hole_scores[0], Some(1));
    }

    #[test]
    fn test_sink_marks_finished_and_announces() {
        let mut s = session(2, 2, 1);
        sink_current(&mut s);
        assert!(s.players()[0].finished);
        assert_eq!(s.message().tone, MessageTone::Success);
        assert_eq!(s.message().text, "Player 1: HOLE COMPLETE! (1 strokes)");
        assert_eq!(s.phase(), TurnPhase::AwaitingShot { player: 1 });
    }

    #[test]
    fn test_skip_out_does_not_finish() {
        let mut s = session(1, 1, 1);
        line_up_putt(&mut s);
        // 65 power leaves well over the threshold at the cup
        assert_eq!(s.shoot(0.0, 65.0), Some(ShotOutcome::Stopped));
        let p = &s.players()[0];
        assert!(!p.finished);
        assert_eq!(p.strokes_this_hole, 1);
        assert_eq!(s.message().tone, MessageTone::Warning);
        assert_eq!(s.phase(), TurnPhase::AwaitingShot { player: 0 });
    }

    #[test]
    fn test_three_player_rotation() {
        let mut s = session(2, 3, 1);

        // Player 1 misses
        assert!(s.shoot(45.0, 1.0).is_some());
        assert_eq!(s.phase(), TurnPhase::AwaitingShot { player: 1 });

        // Player 2 sinks first
        sink_current(&mut s);
        assert_eq!(s.phase(), TurnPhase::AwaitingShot { player: 2 });

        // Player 3 misses, wraps to player 1
        assert!(s.shoot(45.0, 1.0).is_some());
        assert_eq!(s.phase(), TurnPhase::AwaitingShot { player: 0 });

        // Player 1 sinks; player 2 is skipped
        sink_current(&mut s);
        assert_eq!(s.phase(), TurnPhase::AwaitingShot { player: 2 });

        sink_current(&mut s);
        assert_eq!(s.phase(), TurnPhase::HoleComplete);

        let strokes: Vec<u32> = s.players().iter().map(|p| p.strokes_this_hole).collect();
        assert_eq!(strokes, vec![2, 1, 2]);
    }

    #[test]
    fn test_round_from_nine_wraps_to_one() {
        let mut s = session(2, 2, 9);
        assert_eq!(s.hole_sequence(), &[9, 1]);
        assert_eq!(s.current_hole_number(), Some(9));

        sink_current(&mut s);
        assert!(s.shoot(45.0, 1.0).is_some());
        sink_current(&mut s);
        assert_eq!(s.phase(), TurnPhase::HoleComplete);

        s.advance_hole();
        assert_eq!(s.current_hole_number(), Some(1));
        assert_eq!(s.phase(), TurnPhase::AwaitingShot { player: 0 });
        assert!(s.players().iter().all(|p| !p.finished));

        sink_current(&mut s);
        sink_current(&mut s);
        assert_eq!(s.phase(), TurnPhase::RoundComplete);

        let card = s.scorecard();
        assert_eq!(card.holes.len(), 2);
        assert_eq!(card.holes[0].number, 9);
        assert_eq!(card.holes[1].number, 1);
        for (row, player) in card.rows.iter().zip(s.players()) {
            let sum: u32 = player.hole_scores.iter().flatten().sum();
            assert_eq!(row.total, sum);
        }
        assert_eq!(card.rows[0].total, 2);
        assert_eq!(card.rows[1].total, 3);
    }

    #[test]
    fn test_invalid_commands_are_noops() {
        let mut s = session(2, 1, 1);

        // Hole not complete yet
        s.advance_hole();
        assert_eq!(s.current_hole_index(), 0);

        assert!(s.begin_shot());
        let before = s.players()[0].strokes_this_hole;
        assert!(!s.begin_shot());
        assert_eq!(s.take_shot(), None);
        s.advance_turn();
        s.load_hole(5);
        assert_eq!(s.current_hole_number(), Some(1));
        assert!(matches!(s.phase(), TurnPhase::ShotInFlight { player: 0 }));
        assert_eq!(s.players()[0].strokes_this_hole, before);
    }

    #[test]
    fn test_stepwise_matches_take_shot() {
        let mut a = session(1, 1, 4);
        let mut b = session(1, 1, 4);
        a.set_aim(100.0);
        a.set_power(40.0);
        b.set_aim(100.0);
        b.set_power(40.0);

        let outcome_a = a.take_shot();

        assert!(b.begin_shot());
        let mut steps = 0;
        let outcome_b = loop {
            if let Some(o) = b.step_shot() {
                break o;
            }
            steps += 1;
            assert!(matches!(b.phase(), TurnPhase::ShotInFlight { .. }));
        };

        assert_eq!(outcome_a, Some(outcome_b));
        assert!(steps > 0);
        assert_eq!(a.players()[0].ball.pos, b.players()[0].ball.pos);
        assert_eq!(a.players()[0].strokes_this_hole, 1);
    }

    #[test]
    fn test_restart_abandons_stroke_and_replays() {
        let mut s = session(3, 2, 5);
        let opening: Vec<Vec2> = s.players().iter().map(|p| p.ball.pos).collect();
        s.shoot(45.0, 30.0);
        assert!(s.begin_shot());

        s.restart();
        assert!(s.shot().is_none());
        assert_eq!(s.phase(), TurnPhase::AwaitingShot { player: 0 });
        assert_eq!(s.hole_sequence(), &[5, 6, 7]);
        assert!(s.players().iter().all(|p| p.total_strokes() == 0));
        let replayed: Vec<Vec2> = s.players().iter().map(|p| p.ball.pos).collect();
        assert_eq!(opening, replayed);
    }

    #[test]
    fn test_load_hole_resets_players() {
        let mut s = session(1, 2, 1);
        s.shoot(45.0, 1.0);
        s.load_hole(6);
        assert_eq!(s.current_hole_number(), Some(6));
        assert_eq!(s.phase(), TurnPhase::AwaitingShot { player: 0 });
        assert!(s.players().iter().all(|p| p.strokes_this_hole == 0));
        assert!(s.players().iter().all(|p| p.hole_scores[0].is_none()));

        let card = s.scorecard();
        assert_eq!(card.holes[0].number, 6);
        assert_eq!(card.rows[0].total, 0);
        assert_eq!(card.column_totals, vec![0]);
    }

    #[test]
    fn test_load_hole_keeps_earlier_holes() {
        let mut s = session(2, 1, 1);
        sink_current(&mut s);
        assert_eq!(s.phase(), TurnPhase::HoleComplete);
        s.advance_hole();
        s.shoot(45.0, 1.0);
        s.load_hole(4);
        assert_eq!(s.players()[0].hole_scores, vec![Some(1), None]);
        assert_eq!(s.scorecard().rows[0].total, 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut s = session(1, 2, 1);
        s.set_aim(400.0);
        s.set_power(-3.0);
        let snap = s.snapshot();
        assert_eq!(snap.hole_number, Some(1));
        assert_eq!(snap.balls.len(), 2);
        assert_eq!(snap.aim, 360.0);
        assert_eq!(snap.power, MIN_POWER);
        assert!(!snap.fairway.is_empty());
        assert!(!snap.green.is_empty());
        let (min, max) = snap.fairway_bounds.unwrap();
        assert!(snap.fairway.iter().all(|p| p.cmpge(min).all() && p.cmple(max).all()));
        assert_eq!(snap.current_player, Some(0));
        assert_eq!(snap.message_color, "#ffffff");
        assert_eq!(snap.scorecard.holes.len(), 1);

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("AwaitingShot"));
    }
}

//! Mini Golf entry point
//!
//! Plays a full round with computer players and prints the scorecard as JSON.
//! A renderer would drive `TurnSession` the same way, one step per frame.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
use mini_golf::Settings;
#[cfg(not(target_arch = "wasm32"))]
use mini_golf::sim::{TurnPhase, TurnSession, suggest_shot};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser)]
#[command(author, version, about = "Turn-based top-down mini golf", long_about = None)]
struct Args {
    /// JSON settings file; flags below override it
    #[arg(short = 'c', long, value_name = "FILE")]
    settings: Option<std::path::PathBuf>,

    /// Number of holes (1-18)
    #[arg(long)]
    holes: Option<usize>,

    /// Number of players (1-4)
    #[arg(short, long)]
    players: Option<usize>,

    /// Starting hole (1-9)
    #[arg(short, long)]
    start: Option<usize>,

    /// Seed for tee placement
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final session snapshot instead of just the scorecard
    #[arg(long)]
    snapshot: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl Args {
    fn settings(&self) -> Settings {
        let mut settings = match &self.settings {
            Some(path) => Settings::load_from(path).unwrap_or_else(|e| {
                log::warn!("Could not load {}: {e}; using defaults", path.display());
                Settings::default()
            }),
            None => Settings::default(),
        };

        if let Some(holes) = self.holes {
            settings.hole_count = holes;
        }
        if let Some(players) = self.players {
            settings.player_count = players;
        }
        if let Some(start) = self.start {
            settings.starting_hole = start;
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        settings.clamped()
    }
}

/// Drive the session with autoplay until the round ends or a player stalls
#[cfg(not(target_arch = "wasm32"))]
fn play_round(session: &mut TurnSession, max_strokes: u32) {
    loop {
        match session.phase() {
            TurnPhase::AwaitingShot { player } => {
                let (Some(course), Some(current)) = (session.course(), session.players().get(player))
                else {
                    return;
                };
                if current.strokes_this_hole >= max_strokes {
                    log::warn!(
                        "{} hit the {} stroke limit on hole {}; ending round",
                        current.label,
                        max_strokes,
                        course.number
                    );
                    return;
                }

                let plan = suggest_shot(course, current.ball.pos);
                session.set_aim(plan.angle);
                session.set_power(plan.power);
                if session.take_shot().is_some() && !session.message().is_empty() {
                    log::info!("{}", session.message().text);
                }
            }
            TurnPhase::HoleComplete => session.advance_hole(),
            TurnPhase::RoundComplete | TurnPhase::Idle => return,
            TurnPhase::ShotInFlight { .. } => {
                session.step_shot();
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args = Args::parse();
    let settings = args.settings();
    log::info!("Mini Golf (native) starting with {:?}", settings);

    let mut session = TurnSession::from_settings(&settings);
    play_round(&mut session, settings.max_strokes_per_hole);

    let card = session.scorecard();
    for row in &card.rows {
        log::info!("{}: {} strokes ({:+} to par)", row.label, row.total, row.to_par());
    }
    if let Some(leader) = card.leader() {
        log::info!("Leader: {} with {}", leader.label, leader.total);
    }

    let json = if args.snapshot {
        serde_json::to_string_pretty(&session.snapshot())
    } else {
        serde_json::to_string_pretty(&card)
    };
    match json {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize result: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM hosts drive TurnSession directly; nothing to do here
}

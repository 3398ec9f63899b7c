//! Putt Sim entry point
//!
//! Replays a seeded session on the course and the free-fall arena, driving
//! the simulation with a fixed-step clock the way a render loop would.
//!
//! Usage: `putt-sim [settings.json] [seed]`

use std::path::Path;
use std::process::ExitCode;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use putt_sim::consts::FRAME_DT;
use putt_sim::sim::{self, Arena, GameEvent, GamePhase, GameState, Point, Release, TickInput, tick};
use putt_sim::Settings;

/// Shots attempted before giving up on the hole
const MAX_SHOTS: u32 = 12;
/// Longest a shot is watched before the next push (seconds)
const SHOT_TIMEOUT: f64 = 30.0;
/// Longest the arena is watched (seconds)
const ARENA_TIMEOUT: f64 = 120.0;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Putt Sim (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(Path::new(&path)) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Failed to load settings from {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let result = play_course(&settings, seed).and_then(|()| run_arena(&settings));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Simulation aborted: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Take random shots until the ball drops or the shots run out
fn play_course(settings: &Settings, seed: u64) -> sim::Result<()> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut state = GameState::new(settings.course.clone());
    let hole = settings.course.hole.map(|h| h.center);

    let mut now = 0.0;
    let mut shots = 0;
    let mut bounces = 0;

    while !state.is_finished() && shots < MAX_SHOTS {
        shots += 1;
        let ball = state.ball_at(now);
        let release = aim(&mut rng, ball, hole);
        println!(
            "shot {shots}: ball at ({:.0}, {:.0}), release at ({:.0}, {:.0})",
            ball.x(),
            ball.y(),
            release.x(),
            release.y()
        );

        let mut input = TickInput {
            release: Some(Release { time: now, point: release }),
            reset: false,
        };
        let deadline = now + SHOT_TIMEOUT;
        loop {
            now += FRAME_DT;
            let events = tick(&mut state, &input, now)?;
            input = TickInput::default();

            bounces += events
                .iter()
                .filter(|e| matches!(e, GameEvent::Bounced { .. }))
                .count();
            if events.contains(&GameEvent::PhaseChanged(GamePhase::Stopped)) || now > deadline {
                break;
            }
        }
    }

    let rest = state.ball_at(now);
    if state.is_finished() {
        println!("holed in {shots} shots ({bounces} wall bounces) at t={now:.2}s");
    } else {
        println!(
            "gave up after {shots} shots ({bounces} wall bounces), ball at ({:.0}, {:.0})",
            rest.x(),
            rest.y()
        );
    }
    Ok(())
}

/// Release point for the next shot: mostly toward the hole, with some scatter
fn aim(rng: &mut Pcg32, ball: Point, hole: Option<Point>) -> Point {
    let toward = hole
        .map(|h| {
            let v = h - ball;
            v.y().atan2(v.x())
        })
        .unwrap_or(0.0);
    let angle = toward + rng.random_range(-0.4..0.4);
    let drag = rng.random_range(60.0..200.0);
    // Drag backwards from the direction of travel
    Point::new(ball.x() - drag * angle.cos(), ball.y() - drag * angle.sin())
}

/// Let the arena ball bounce until it drops out
fn run_arena(settings: &Settings) -> sim::Result<()> {
    let mut arena = Arena::new(settings.arena, 0.0)?;
    let mut now = 0.0;
    let mut bounces = 0;

    while now < ARENA_TIMEOUT {
        now += FRAME_DT;
        for event in arena.advance(now)? {
            match event {
                GameEvent::Bounced { .. } => bounces += 1,
                GameEvent::PhaseChanged(GamePhase::Stopped) => {
                    println!("arena ball dropped out at t={now:.2}s after {bounces} bounces");
                    return Ok(());
                }
                _ => {}
            }
        }
    }

    let pos = arena.position_at(now);
    println!(
        "arena ball still in play at t={now:.2}s ({:.0}, {:.0}) after {bounces} bounces",
        pos.x(),
        pos.y()
    );
    Ok(())
}

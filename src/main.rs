//! Headless demo: builds a level of crates and drives one grab session,
//! either scripted or replayed from a JSON-lines recording.
//!
//! Usage: `handgrab [recording.jsonl]`

use std::f32::consts::{FRAC_PI_2, TAU};
use std::path::Path;

use glam::{Mat4, Vec3};
use handgrab::engine::{FrameOutput, InteractionEngine};
use handgrab::error::GrabError;
use handgrab::grab::ObjectId;
use handgrab::hand::{
    HandModel, HandPose, Handedness, JointPose, Skeleton, TrackingMode,
};
use handgrab::input::replay::{self, ReplayCursor};
use handgrab::input::InputEvent;
use handgrab::options::Options;
use rand::Rng;
use web_time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);
const CRATE_SCALE: f32 = 0.1;
/// Half-size of the unscaled crate mesh.
const CRATE_HALF_SIZE: f32 = 0.5;
const OPTIONS_FILE: &str = "handgrab.toml";

fn load_options() -> Options {
    let path = Path::new(OPTIONS_FILE);
    if !path.exists() {
        return Options::default();
    }
    match Options::load(path) {
        Ok(options) => {
            log::info!("loaded options from {OPTIONS_FILE}");
            options
        }
        Err(e) => {
            log::warn!("ignoring {OPTIONS_FILE}: {e}");
            Options::default()
        }
    }
}

fn crate_at(position: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(CRATE_SCALE),
        glam::Quat::IDENTITY,
        position,
    )
}

/// Two crates either side of the user plus five scattered at random.
fn build_level(engine: &mut InteractionEngine) -> Vec<ObjectId> {
    let mut rng = rand::rng();
    let half = Vec3::splat(CRATE_HALF_SIZE);
    let mut ids = Vec::new();
    for angle in [0.5 + FRAC_PI_2, -0.5 + FRAC_PI_2] {
        let position = Vec3::new(angle.cos() * 0.5, 1.5, angle.sin() * 0.5);
        ids.push(engine.add_object(crate_at(position), half));
    }
    for _ in 0..5 {
        let angle = rng.random::<f32>() * TAU;
        let position = Vec3::new(
            angle.cos() * 0.5,
            rng.random::<f32>() + 1.0,
            angle.sin() * 0.5,
        );
        ids.push(engine.add_object(crate_at(position), half));
    }
    ids
}

fn report(frame: u32, output: &FrameOutput) {
    for event in &output.events {
        log::info!("frame {frame}: {event:?}");
    }
    for update in &output.updates {
        log::debug!(
            "frame {frame}: object {} at {}",
            update.id,
            update.transform.w_axis.truncate()
        );
    }
}

fn apply(engine: &mut InteractionEngine, event: InputEvent) {
    if let Err(e) = engine.handle_event(event) {
        if e.is_expected() {
            log::debug!("{e}");
        } else {
            log::warn!("{e}");
        }
    }
}

/// Tick with the session clock held at `now` until `hand` has a loaded
/// model.
fn wait_for_rig(
    engine: &mut InteractionEngine,
    hand: Handedness,
    now: Instant,
) -> bool {
    for _ in 0..1000 {
        let _ = engine.tick(now);
        if engine
            .coordinator()
            .model(hand)
            .is_some_and(HandModel::is_ready)
        {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    false
}

fn run_replay(
    engine: &mut InteractionEngine,
    path: &Path,
) -> Result<(), GrabError> {
    let mut cursor = ReplayCursor::new(replay::load(path)?);
    let start = Instant::now();
    let mut frame = 0;
    while !cursor.is_finished() {
        let elapsed = FRAME * frame;
        for event in cursor.advance(elapsed) {
            let connect = matches!(event, InputEvent::SourceConnected { .. });
            let hand = event.handedness();
            apply(engine, event);
            if connect && !wait_for_rig(engine, hand, start + elapsed) {
                return Err(GrabError::NotReady);
            }
        }
        report(frame, &engine.tick(start + elapsed));
        frame += 1;
    }
    Ok(())
}

/// Controller session: reach for the first crate, lift it 30 cm, let go.
fn run_scripted(
    engine: &mut InteractionEngine,
    target: Vec3,
) -> Result<(), GrabError> {
    let hand = Handedness::Right;
    let start = Instant::now();
    apply(
        engine,
        InputEvent::SourceConnected {
            handedness: hand,
            mode: TrackingMode::Controller,
        },
    );
    if !wait_for_rig(engine, hand, start) {
        return Err(GrabError::NotReady);
    }

    // where the pinching fingertips sit relative to the grip
    let mut probe = HandModel::with_skeleton(
        hand,
        TrackingMode::Controller,
        Skeleton::from_poses(HandPose::Default.table(hand)),
    );
    probe.set_pose(HandPose::Pinch);
    let grip_offset = probe.hand_position()?;

    let lift = Vec3::new(0.0, 0.3, 0.0);
    for frame in 0..40_u32 {
        let t = (frame.saturating_sub(5) as f32 / 30.0).min(1.0);
        apply(
            engine,
            InputEvent::ControllerPose {
                handedness: hand,
                pose: JointPose::at(target - grip_offset + lift * t),
            },
        );
        match frame {
            5 => apply(engine, InputEvent::SelectStart { handedness: hand }),
            35 => apply(engine, InputEvent::SelectEnd { handedness: hand }),
            _ => {}
        }
        report(frame, &engine.tick(start + FRAME * frame));
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let mut engine = InteractionEngine::new(load_options());
    let ids = build_level(&mut engine);

    let result = match std::env::args().nth(1) {
        Some(path) => run_replay(&mut engine, Path::new(&path)),
        None => {
            let target = engine
                .object(ids[0])
                .map_or(Vec3::ZERO, |o| o.transform().w_axis.truncate());
            run_scripted(&mut engine, target)
        }
    };
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }

    for object in engine.objects() {
        log::info!(
            "object {} rests at {}",
            object.id(),
            object.transform().w_axis.truncate()
        );
    }
}

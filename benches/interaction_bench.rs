//! Benchmarks for hand frame derivation, pinch detection and engine ticks.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Mat4, Quat, Vec3};
use handgrab::engine::InteractionEngine;
use handgrab::gesture::PinchDetector;
use handgrab::hand::{
    HandFrame, HandModel, HandPose, Handedness, JointPose, Landmarks,
    Skeleton, TrackingMode,
};
use handgrab::input::InputEvent;
use handgrab::options::{GestureOptions, Options};
use std::time::Duration;
use web_time::Instant;

fn frame_benchmark(c: &mut Criterion) {
    let landmarks = Landmarks {
        index_tip: Vec3::new(0.02, 1.01, -0.16),
        thumb_tip: Vec3::new(0.09, 0.99, -0.09),
        index_knuckle: Vec3::new(0.02, 1.0, -0.01),
        pinky_knuckle: Vec3::new(-0.035, 0.995, -0.005),
    };
    let _ = c.bench_function("hand_frame_from_landmarks", |b| {
        b.iter(|| black_box(HandFrame::from_landmarks(black_box(&landmarks))))
    });

    let mut model = HandModel::with_skeleton(
        Handedness::Right,
        TrackingMode::Controller,
        Skeleton::from_poses(HandPose::Default.table(Handedness::Right)),
    );
    model.set_placement(Mat4::from_rotation_translation(
        Quat::from_rotation_y(0.3),
        Vec3::new(0.2, 1.2, -0.3),
    ));
    let _ = c.bench_function("hand_model_transform", |b| {
        b.iter(|| black_box(model.hand_transform()))
    });
}

fn detector_benchmark(c: &mut Criterion) {
    let mut detector =
        PinchDetector::new(Handedness::Left, GestureOptions::default());
    let start = Instant::now();
    let mut frame = 0_u32;
    let _ = c.bench_function("pinch_detector_update", |b| {
        b.iter(|| {
            frame = frame.wrapping_add(1);
            let distance = if frame % 2 == 0 { 0.049 } else { 0.051 };
            black_box(detector.update(
                start + Duration::from_millis(u64::from(frame) * 16),
                black_box(distance),
            ))
        })
    });
}

fn engine_tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_tick");

    for count in [1, 10, 100].iter() {
        let mut engine = InteractionEngine::new(Options::default());
        for i in 0..*count {
            let _ = engine.add_object(
                Mat4::from_translation(Vec3::new(i as f32 * 0.3, 1.0, -0.5)),
                Vec3::splat(0.05),
            );
        }
        let _ = engine.handle_event(InputEvent::SourceConnected {
            handedness: Handedness::Right,
            mode: TrackingMode::Controller,
        });
        while !engine
            .coordinator()
            .model(Handedness::Right)
            .is_some_and(HandModel::is_ready)
        {
            let _ = engine.tick(Instant::now());
            std::thread::sleep(Duration::from_millis(1));
        }

        let _ = group.bench_function(format!("{}_objects", count), |b| {
            b.iter(|| {
                let _ = engine.handle_event(InputEvent::ControllerPose {
                    handedness: Handedness::Right,
                    pose: JointPose::at(Vec3::new(0.0, 1.0, -0.4)),
                });
                let _ = engine.handle_event(InputEvent::SelectStart {
                    handedness: Handedness::Right,
                });
                let grabbed = engine.tick(Instant::now());
                let _ = engine.handle_event(InputEvent::SelectEnd {
                    handedness: Handedness::Right,
                });
                black_box((grabbed, engine.tick(Instant::now())))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, frame_benchmark, detector_benchmark, engine_tick_benchmark);
criterion_main!(benches);

//! End-to-end behavior through the public API, using the headless host.

use qcanvas::config::{BurstConfig, Span, WaveConfig};
use qcanvas::headless::{DrawCommand, HeadlessSurfaces, ManualScheduler, RecordingSurface};
use qcanvas::{
    Animator, CanvasError, CircuitConfig, CircuitDiagram, FieldConfig, ParticleField, Point, Size,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

type FieldAnimator = Animator<ParticleField, RecordingSurface, ManualScheduler>;

fn mount(config: FieldConfig, size: Size) -> (FieldAnimator, ManualScheduler, RecordingSurface) {
    let surfaces = HeadlessSurfaces::new().with_surface("canvas", size);
    let scheduler = ManualScheduler::new();
    let animator = Animator::create(&surfaces, "canvas", scheduler.clone(), |size| {
        ParticleField::new(config, size, SmallRng::seed_from_u64(2024))
    })
    .unwrap();
    let recorder = surfaces.recorder("canvas").unwrap();
    (animator, scheduler, recorder)
}

#[test]
fn initial_population_fills_the_surface() {
    let (animator, _, _) = mount(FieldConfig::quantum(), Size::new(400.0, 300.0));

    let field = animator.scene();
    assert_eq!(field.particles().len(), 100);
    for p in field.particles() {
        assert!((0.0..=400.0).contains(&p.x), "x = {}", p.x);
        assert!((0.0..=300.0).contains(&p.y), "y = {}", p.y);
        assert!(p.radius > 0.0);
        assert!((0.0..=1.0).contains(&p.opacity));
    }
}

#[test]
fn click_spawns_burst_and_single_wave() {
    let (animator, _, _) = mount(FieldConfig::quantum(), Size::new(400.0, 300.0));
    let burst = animator.scene().config().burst.count;

    animator.click(Point::new(50.0, 50.0));

    let field = animator.scene();
    assert_eq!(field.particles().len(), 100 + burst);
    assert_eq!(field.waves().len(), 1);
    assert_eq!(field.waves()[0].radius, 0.0);
    assert_eq!(field.waves()[0].origin, Point::new(50.0, 50.0));
}

#[test]
fn wave_expires_on_the_frame_it_reaches_max_radius() {
    let config = FieldConfig {
        burst: BurstConfig {
            count: 0,
            ..BurstConfig::default()
        },
        waves: WaveConfig {
            max_radius: Span::new(100.0, 100.0),
            speed: Span::new(5.0, 5.0),
            fade: 0.0,
            ..WaveConfig::default()
        },
        ..FieldConfig::quantum()
    };
    let (animator, scheduler, _) = mount(config, Size::new(400.0, 300.0));
    animator.click(Point::new(200.0, 150.0));

    scheduler.run_frames(19);
    assert_eq!(animator.scene().waves().len(), 1);
    assert_eq!(animator.scene().waves()[0].radius, 95.0);

    scheduler.run_frames(1);
    assert!(animator.scene().waves().is_empty());
}

#[test]
fn population_returns_to_target_after_bursts() {
    let (animator, scheduler, _) = mount(FieldConfig::hero(), Size::new(800.0, 600.0));
    for x in [100.0, 300.0, 500.0] {
        animator.click(Point::new(x, 300.0));
    }
    assert_eq!(animator.scene().particles().len(), 150 + 3 * 30);

    // Hero bursts fade by 0.008 from at most 1.0
    scheduler.run_frames(130);
    assert_eq!(animator.scene().particles().len(), 150);
}

#[test]
fn trails_never_exceed_their_cap() {
    let (animator, scheduler, _) = mount(FieldConfig::quantum(), Size::new(400.0, 300.0));
    animator.pointer_move(Point::new(200.0, 150.0));
    scheduler.run_frames(40);

    let field = animator.scene();
    let cap = field.config().trail.cap;
    assert!(field.particles().iter().all(|p| p.trail.len() == cap));
}

#[test]
fn destroy_then_tick_draws_nothing() {
    let (animator, scheduler, recorder) = mount(FieldConfig::quantum(), Size::new(400.0, 300.0));
    scheduler.run_frames(2);
    recorder.take_commands();

    animator.destroy();
    scheduler.run_frames(3);

    assert_eq!(recorder.command_count(), 0);
    assert!(animator.scene().particles().is_empty());
    assert!(animator.scene().waves().is_empty());
}

#[test]
fn each_frame_starts_with_the_backdrop() {
    let (_animator, scheduler, recorder) = mount(FieldConfig::ambient(), Size::new(300.0, 200.0));
    for _ in 0..3 {
        scheduler.run_frames(1);
        let commands = recorder.take_commands();
        assert_eq!(commands.first(), Some(&DrawCommand::Clear));
    }
}

#[test]
fn resize_regenerates_for_the_new_surface() {
    let surfaces = HeadlessSurfaces::new().with_surface("canvas", Size::new(400.0, 300.0));
    let animator = Animator::create(&surfaces, "canvas", ManualScheduler::new(), |size| {
        ParticleField::new(FieldConfig::quantum(), size, SmallRng::seed_from_u64(1))
    })
    .unwrap();

    surfaces.recorder("canvas").unwrap().set_layout_size(Size::new(100.0, 50.0));
    animator.resize();

    let field = animator.scene();
    assert_eq!(field.size(), Size::new(100.0, 50.0));
    assert!(field.particles().iter().all(|p| p.x <= 100.0 && p.y <= 50.0));
}

#[test]
fn missing_canvas_reports_its_id() {
    let surfaces = HeadlessSurfaces::new().with_blank("not-a-canvas");

    let missing = Animator::create(&surfaces, "hero", ManualScheduler::new(), |size| {
        ParticleField::new(FieldConfig::hero(), size, SmallRng::seed_from_u64(1))
    });
    let err = missing.err().unwrap();
    assert_eq!(err.to_string(), r#"canvas element with id "hero" not found"#);

    let blank = Animator::create(&surfaces, "not-a-canvas", ManualScheduler::new(), |size| {
        ParticleField::new(FieldConfig::hero(), size, SmallRng::seed_from_u64(1))
    });
    assert!(matches!(blank.err(), Some(CanvasError::NoDrawingContext(_))));
}

#[test]
fn circuit_replays_with_a_moving_progress_line() {
    let surfaces = HeadlessSurfaces::new().with_surface("circuit", Size::new(600.0, 300.0));
    let scheduler = ManualScheduler::new();
    let animator = Animator::create(&surfaces, "circuit", scheduler.clone(), |size| {
        CircuitDiagram::new(CircuitConfig::default(), size, SmallRng::seed_from_u64(5))
    })
    .unwrap();
    let recorder = surfaces.recorder("circuit").unwrap();

    let progress_x = |commands: &[DrawCommand]| match commands.last() {
        Some(DrawCommand::Line { from, width, .. }) if *width == 3.0 => from.x,
        other => panic!("expected progress line, got {other:?}"),
    };

    scheduler.run_frames(1);
    let first = progress_x(&recorder.take_commands());
    scheduler.run_frames(10);
    let later = progress_x(&recorder.take_commands());
    assert!(later > first);

    let events = animator.scene().events().to_vec();
    assert_eq!(events.len(), 30);
    assert!(events.windows(2).all(|w| w[0].time <= w[1].time));
}

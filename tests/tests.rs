use cgmath::{InnerSpace, vec2};
use constellation::{
    FrameRecorder, InputEvent, Particle, PointerState, Simulation, SimulationConfig,
    SteppedScheduler, Viewport,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// 800x600 simulation with the default config and a fixed seed
pub fn default_sim(seed: u64) -> Simulation {
    let vp = Viewport::new(800.0, 600.0).expect("valid viewport");
    Simulation::with_seed(SimulationConfig::default(), vp, seed).expect("valid config")
}

/// Run `frames` ticks spaced ~16 ms apart starting at `start_ms`
pub fn run_frames(sim: &mut Simulation, start_ms: f64, frames: usize) -> FrameRecorder {
    let mut rec = FrameRecorder::new();
    let mut sched = SteppedScheduler::new();
    for i in 0..frames {
        sim.tick(start_ms + 16.0 * i as f64, &mut rec, &mut sched);
    }
    rec
}

pub fn assert_invariants(sim: &Simulation) {
    let config = sim.config();
    for p in sim.field().iter() {
        assert_eq!(p.radius(), p.mass() * config.radius_scale);
        assert!(p.mass() >= config.mass_min && p.mass() <= config.mass_max);
    }
}

// ==================================================================================
// Initialization
// ==================================================================================

#[test]
fn initialize_800x600_yields_80_in_bounds() {
    let sim = default_sim(42);
    let vp = sim.viewport();

    assert_eq!(sim.field().len(), 80);
    for p in sim.field().iter() {
        assert!(vp.contains(p.position), "particle out of bounds: {:?}", p.position);
        assert_eq!(p.velocity, vec2(0.0, 0.0));
    }
    assert_invariants(&sim);
}

#[test]
fn zero_sized_viewport_is_fatal_at_startup() {
    let err = Viewport::new(0.0, 0.0).unwrap_err();
    assert!(err.to_string().contains("invalid viewport"));
}

#[test]
fn same_seed_same_run() {
    let mut a = default_sim(7);
    let mut b = default_sim(7);
    a.handle(InputEvent::PointerMoved { x: 400.0, y: 300.0 }, 0.0).unwrap();
    b.handle(InputEvent::PointerMoved { x: 400.0, y: 300.0 }, 0.0).unwrap();
    run_frames(&mut a, 0.0, 50);
    run_frames(&mut b, 0.0, 50);

    assert_eq!(a.field().particles(), b.field().particles());
}

// ==================================================================================
// Long-running invariants
// ==================================================================================

#[test]
fn invariants_hold_over_many_frames_with_input() {
    let mut sim = default_sim(3);
    let mut now = 0.0;
    let mut rec = FrameRecorder::new();
    let mut sched = SteppedScheduler::new();

    for frame in 0..600 {
        if frame % 5 == 0 {
            let x = (frame as f32 * 7.0) % 800.0;
            let y = (frame as f32 * 3.0) % 600.0;
            sim.handle(InputEvent::PointerMoved { x, y }, now).unwrap();
        }
        if frame % 97 == 0 {
            sim.handle(InputEvent::Click, now).unwrap();
        }
        sim.tick(now, &mut rec, &mut sched);
        now += 16.0;
    }

    assert_eq!(sim.field().len(), 80);
    assert_eq!(sim.frame(), 600);
    assert_eq!(sched.requested, 600);
    assert_invariants(&sim);
    // every particle lies within the respawn margin after each frame
    let vp = sim.viewport();
    for p in sim.field().iter() {
        assert!(!vp.escaped(p.position, sim.config().respawn_margin));
    }
}

// ==================================================================================
// Pointer
// ==================================================================================

#[test]
fn repulsion_pushes_away_from_pointer() {
    let config = SimulationConfig::default();
    let vp = Viewport::new(800.0, 600.0).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let mut pointer = PointerState::default();
    pointer.record_move(400.0, 300.0, 0.0);

    let mut p = Particle::at(vec2(420.0, 300.0), &mut rng, &config);
    let outcome = p.update(&pointer, &vp, &config, &mut rng);

    assert!(outcome.repelled);
    assert!(p.velocity.x > 0.0);
    assert!(p.velocity.magnitude() <= config.max_repulsion / p.mass());
}

#[test]
fn pointer_goes_idle_after_timeout() {
    let mut sim = default_sim(5);
    sim.handle(InputEvent::PointerMoved { x: 10.0, y: 10.0 }, 1000.0).unwrap();

    let mut rec = FrameRecorder::new();
    let mut sched = SteppedScheduler::new();

    let stats = sim.tick(1050.0, &mut rec, &mut sched);
    assert!(!stats.pointer_expired);
    assert!(sim.pointer().is_moving);

    let stats = sim.tick(1101.0, &mut rec, &mut sched);
    assert!(stats.pointer_expired);
    assert!(!sim.pointer().is_moving);
    assert_eq!(sim.pointer().position, None);
}

#[test]
fn moving_pointer_refreshes_timeout() {
    let mut sim = default_sim(5);
    let mut rec = FrameRecorder::new();
    let mut sched = SteppedScheduler::new();

    sim.handle(InputEvent::PointerMoved { x: 10.0, y: 10.0 }, 0.0).unwrap();
    sim.tick(80.0, &mut rec, &mut sched);
    sim.handle(InputEvent::PointerMoved { x: 12.0, y: 10.0 }, 90.0).unwrap();
    sim.tick(180.0, &mut rec, &mut sched);

    assert!(sim.pointer().is_moving);
    assert_eq!(sim.pointer().position, Some(vec2(12.0, 10.0)));
}

// ==================================================================================
// Click
// ==================================================================================

#[test]
fn click_keeps_field_size_and_spawns_near_pointer() {
    let mut sim = default_sim(8);
    sim.handle(InputEvent::PointerMoved { x: 100.0, y: 200.0 }, 0.0).unwrap();
    sim.handle(InputEvent::Click, 1.0).unwrap();

    assert_eq!(sim.field().len(), 80);
    let near = sim
        .field()
        .iter()
        .filter(|p| (p.position.x - 100.0).abs() <= 15.0 && (p.position.y - 200.0).abs() <= 15.0)
        .count();
    assert!(near >= 1);
    assert_invariants(&sim);
}

#[test]
fn click_without_pointer_spawns_at_center() {
    let mut sim = default_sim(9);
    let before: Vec<Particle> = sim.field().particles().to_vec();
    sim.handle(InputEvent::Click, 0.0).unwrap();

    let added: Vec<&Particle> = sim
        .field()
        .iter()
        .filter(|p| !before.contains(p))
        .collect();
    assert_eq!(added.len(), 1);
    assert!((added[0].position.x - 400.0).abs() <= 15.0);
    assert!((added[0].position.y - 300.0).abs() <= 15.0);
}

#[test]
fn click_on_empty_field_adds_one() {
    let config = SimulationConfig {
        particle_count: 0,
        ..Default::default()
    };
    let vp = Viewport::new(800.0, 600.0).unwrap();
    let mut sim = Simulation::with_seed(config, vp, 1).unwrap();
    assert!(sim.field().is_empty());

    sim.handle(InputEvent::Click, 0.0).unwrap();
    assert_eq!(sim.field().len(), 1);
}

// ==================================================================================
// Resize
// ==================================================================================

#[test]
fn resize_reinitializes_into_new_bounds() {
    let mut sim = default_sim(12);
    sim.handle(InputEvent::Click, 0.0).unwrap();
    sim.handle(InputEvent::Resized { width: 300.0, height: 200.0 }, 0.0)
        .unwrap();

    let vp = sim.viewport();
    assert_eq!((vp.width(), vp.height()), (300.0, 200.0));
    assert_eq!(sim.field().len(), 80);
    assert!(sim.field().iter().all(|p| vp.contains(p.position)));
}

#[test]
fn degenerate_resize_keeps_previous_state() {
    let mut sim = default_sim(13);
    let before: Vec<Particle> = sim.field().particles().to_vec();

    let res = sim.handle(InputEvent::Resized { width: 0.0, height: 600.0 }, 0.0);
    assert!(res.is_err());
    assert_eq!(sim.viewport(), Viewport::new(800.0, 600.0).unwrap());
    assert_eq!(sim.field().particles(), before.as_slice());
}

// ==================================================================================
// Respawn and connections
// ==================================================================================

#[test]
fn escaped_particle_is_back_inside_after_next_tick() {
    let mut sim = default_sim(14);
    sim.field_mut().particles_mut()[0].position = vec2(-500.0, 300.0);
    run_frames(&mut sim, 0.0, 1);

    let p = sim.field().particles()[0];
    assert!(sim.viewport().contains(p.position));
    assert_eq!(p.velocity, vec2(0.0, 0.0));
}

#[test]
fn drawn_segments_match_pairs_under_threshold() {
    let mut sim = default_sim(15);
    let rec = run_frames(&mut sim, 0.0, 3);

    let particles = sim.field().particles();
    let mut expected = 0;
    for a in 0..particles.len() {
        for b in (a + 1)..particles.len() {
            if (particles[a].position - particles[b].position).magnitude() < 100.0 {
                expected += 1;
            }
        }
    }
    assert_eq!(rec.segments().len(), expected);
    assert_eq!(rec.circles().count(), particles.len());
}

//! End-to-end properties of the fluid step
//!
//! Run with logging: `RUST_LOG=fluid_sim_core=trace cargo test --test stepper_properties`

use fluid_sim_core::{FluidParams, FluidSolver, Vec2, Vec3};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn scenario_params(n: usize) -> FluidParams {
    FluidParams {
        dt: 0.1,
        viscosity: 0.0,
        fade_speed: 0.0,
        ..FluidParams::with_size(n, n)
    }
}

fn stir(solver: &mut FluidSolver, steps: usize) {
    for k in 0..steps {
        let t = k as f32 * 0.3;
        solver.add_force_at_pos(Vec2::new(0.3, 0.6), Vec2::new(t.cos(), t.sin()));
        solver.add_force_at_pos(Vec2::new(0.7, 0.4), Vec2::new(-0.5, 0.8));
        solver.add_color_at_pos(Vec2::new(0.3, 0.6), Vec3::new(0.8, 0.2, 0.5));
        solver.update();
    }
}

#[test]
fn test_impulse_moves_fluid_and_dye_at_centre() {
    let mut solver = FluidSolver::new(scenario_params(10)).unwrap();
    solver.add_force_at_pos(Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.0));
    solver.add_color_at_pos(Vec2::new(0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
    solver.update();

    let centre = solver.info_at_pos(0.5, 0.5);
    assert!(centre.velocity.x > 0.0, "centre velocity {:?}", centre.velocity);
    assert!(centre.velocity.x > centre.velocity.y.abs());
    assert!(centre.color.x > 0.0);

    let corner = solver.info_at_pos(0.05, 0.05);
    assert_eq!(corner.color.x, 0.0);
    assert!(corner.velocity.norm() < 0.25 * centre.velocity.norm());
}

#[test]
fn test_reflective_walls_mirror_normal_velocity() {
    let mut solver = FluidSolver::new(scenario_params(16)).unwrap();
    stir(&mut solver, 6);

    let store = solver.store();
    let dims = solver.dims();
    for j in 1..=dims.ny() {
        assert_eq!(store.u()[dims.index(0, j)], -store.u()[dims.index(1, j)]);
        assert_eq!(
            store.u()[dims.index(dims.nx() + 1, j)],
            -store.u()[dims.index(dims.nx(), j)]
        );
    }
    for i in 1..=dims.nx() {
        assert_eq!(store.v()[dims.index(i, 0)], -store.v()[dims.index(i, 1)]);
    }
}

#[test]
fn test_wrapped_walls_copy_opposite_side() {
    let mut solver = FluidSolver::new(scenario_params(16)).unwrap();
    solver.set_wrap(true, true);
    stir(&mut solver, 6);

    let store = solver.store();
    let dims = solver.dims();
    for j in 1..=dims.ny() {
        assert_eq!(store.u()[dims.index(0, j)], store.u()[dims.index(dims.nx(), j)]);
        assert_eq!(store.u()[dims.index(dims.nx() + 1, j)], store.u()[dims.index(1, j)]);
    }
    for i in 1..=dims.nx() {
        assert_eq!(store.v()[dims.index(i, 0)], store.v()[dims.index(i, dims.ny())]);
    }
}

#[test]
fn test_color_stays_within_faded_unit_range() {
    let params = FluidParams {
        fade_speed: 0.1,
        ..FluidParams::with_size(12, 12)
    };
    let mut solver = FluidSolver::new(params).unwrap();
    for _ in 0..4 {
        solver.add_color_at_pos(Vec2::new(0.5, 0.5), Vec3::new(500.0, -500.0, 3.0));
        solver.add_force_at_pos(Vec2::new(0.5, 0.5), Vec2::new(2.0, 1.0));
        solver.update();
    }

    for channel in solver.store().channels() {
        for &value in channel.values() {
            assert!((0.0..=0.9).contains(&value), "color {value} out of range");
        }
    }
}

#[test]
fn test_still_grid_stays_exactly_zero() {
    let mut solver = FluidSolver::setup(9, 13).unwrap();
    solver
        .enable_vorticity_confinement(true)
        .set_color_diffusion(0.01)
        .unwrap();
    for _ in 0..5 {
        solver.update();
    }

    let store = solver.store();
    assert!(store.u().iter().all(|&x| x == 0.0));
    assert!(store.v().iter().all(|&x| x == 0.0));
    assert!(store.u_old().iter().all(|&x| x == 0.0));
    assert!(store.curl().iter().all(|&x| x == 0.0));
    for channel in store.channels() {
        assert!(channel.values().iter().all(|&x| x == 0.0));
        assert!(channel.staging().iter().all(|&x| x == 0.0));
    }
    assert_eq!(solver.avg_density(), 0.0);
    assert_eq!(solver.uniformity(), 1.0);
}

#[test]
fn test_huge_step_and_force_stay_finite() {
    let params = FluidParams {
        dt: 10.0,
        ..FluidParams::with_size(20, 20)
    };
    let mut solver = FluidSolver::new(params).unwrap();
    for _ in 0..3 {
        solver.add_force_at_pos(Vec2::new(0.5, 0.5), Vec2::new(1000.0, 1000.0));
        solver.add_color_at_pos(Vec2::new(0.5, 0.5), Vec3::new(1.0, 1.0, 1.0));
        solver.update();
    }

    let store = solver.store();
    assert!(store.u().iter().chain(store.v()).all(|x| x.is_finite()));
    for channel in store.channels() {
        assert!(channel.values().iter().all(|x| x.is_finite()));
    }
    assert!(solver.avg_speed().is_finite());
}

#[test]
fn test_randomized_color_has_partial_density() {
    let params = FluidParams {
        seed: Some(7),
        ..FluidParams::with_size(32, 32)
    };
    let mut solver = FluidSolver::new(params).unwrap();
    solver.randomize_color();

    let density = solver.avg_density();
    assert!(density > 0.0 && density < 1.0, "avg density {density}");
    assert!(solver.uniformity() > 0.0 && solver.uniformity() <= 1.0);
}

#[test]
fn test_seeded_runs_are_deterministic() {
    let params = FluidParams {
        seed: Some(42),
        vorticity_confinement: true,
        ..FluidParams::with_size(24, 24)
    };
    let mut a = FluidSolver::new(params.clone()).unwrap();
    let mut b = FluidSolver::new(params).unwrap();
    for solver in [&mut a, &mut b] {
        solver.randomize_color();
        stir(solver, 5);
    }

    assert_eq!(a.stats(), b.stats());
    assert_eq!(a.store().u(), b.store().u());
    assert_eq!(
        a.store().channels()[2].values(),
        b.store().channels()[2].values()
    );

    // reset re-seeds, so a replay matches the first run
    a.reset();
    a.randomize_color();
    let mut c = FluidSolver::new(FluidParams {
        seed: Some(42),
        ..FluidParams::with_size(24, 24)
    })
    .unwrap();
    c.randomize_color();
    assert_eq!(a.store().channels()[0].values(), c.store().channels()[0].values());
}

#[test]
fn test_fade_drains_density() {
    let params = FluidParams {
        fade_speed: 0.2,
        seed: Some(3),
        ..FluidParams::with_size(16, 16)
    };
    let mut solver = FluidSolver::new(params).unwrap();
    solver.randomize_color();

    let mut previous = f32::MAX;
    for _ in 0..10 {
        solver.update();
        assert!(solver.avg_density() <= previous);
        previous = solver.avg_density();
    }
    assert!(previous < 0.25);
}

fn stirred_divergence(iterations: usize) -> f32 {
    let params = FluidParams {
        solver_iterations: iterations,
        ..scenario_params(24)
    };
    let mut solver = FluidSolver::new(params).unwrap();
    stir(&mut solver, 4);

    assert!(solver.kinetic_energy() > 0.0);
    assert_eq!(solver.step_count(), 4);
    solver.max_divergence()
}

#[test]
fn test_projection_keeps_stirred_flow_nearly_incompressible() {
    // a single sweep barely relaxes the pressure, so it serves as the baseline
    let barely_projected = stirred_divergence(1);
    let projected = stirred_divergence(60);

    assert!(barely_projected.is_finite() && projected.is_finite());
    assert!(
        projected < 0.3 * barely_projected,
        "max divergence {projected} with 60 sweeps vs {barely_projected} with 1"
    );
}

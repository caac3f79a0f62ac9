use clap::Parser;
use fluid_sim_core::simulation::export;
use fluid_sim_core::{ColorMode, FluidError, FluidParams, FluidSolver, Vec2, Vec3};
use nalgebra::Rotation2;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Headless stable-fluids demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "fluid-sim-demo")]
#[command(about = "Headless 2D stable fluids demo", long_about = None)]
struct Args {
    /// Interior cells per axis (square grid)
    #[arg(short = 'n', long, default_value_t = 100)]
    size: usize,

    /// Number of steps to run
    #[arg(short, long, default_value_t = 200)]
    steps: usize,

    /// Time step
    #[arg(long, default_value_t = 0.04)]
    dt: f32,

    /// Velocity diffusion coefficient
    #[arg(long, default_value_t = 0.0001)]
    viscosity: f32,

    /// Color diffusion coefficient
    #[arg(long, default_value_t = 0.0)]
    color_diffusion: f32,

    /// Fraction of color removed per step
    #[arg(short, long, default_value_t = 0.03)]
    fade: f32,

    /// Gauss-Seidel sweeps per linear solve
    #[arg(short, long, default_value_t = 10)]
    iterations: usize,

    /// Single grey channel instead of RGB
    #[arg(long)]
    mono: bool,

    /// Enable vorticity confinement
    #[arg(short, long)]
    vorticity: bool,

    /// Wrap the left/right walls
    #[arg(long)]
    wrap_x: bool,

    /// Wrap the top/bottom walls
    #[arg(long)]
    wrap_y: bool,

    /// Seed for color randomization
    #[arg(long)]
    seed: Option<u64>,

    /// Load a `FluidParams` JSON document instead of the flags above
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from randomized color instead of an empty grid
    #[arg(long)]
    randomize: bool,

    /// Report interval in steps
    #[arg(short, long, default_value_t = 20)]
    report_interval: usize,

    /// Print an ASCII preview of the density field at the end
    #[arg(long)]
    ascii: bool,

    /// Run the scenario once per iteration count, in parallel
    #[arg(long)]
    sweep: bool,

    /// Iteration counts used by --sweep
    #[arg(long, value_delimiter = ',', default_value = "1,2,5,10,20,40")]
    sweep_iterations: Vec<usize>,

    /// Print final statistics as JSON
    #[arg(long)]
    stats_json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let params = load_params(args)?;

    if args.sweep {
        run_sweep(&params, args.steps, &args.sweep_iterations)?;
        return Ok(());
    }

    println!("=== Stable Fluids Demo ===\n");
    let mut solver = FluidSolver::new(params)?;
    println!(
        "Grid: {}x{} ({} padded cells), {:?} color",
        solver.nx(),
        solver.ny(),
        solver.num_cells(),
        solver.params().color_mode
    );
    println!(
        "dt: {}, viscosity: {}, fade: {}, iterations: {}, vorticity: {}, wrap: {:?}\n",
        solver.delta_t(),
        solver.viscosity(),
        solver.fade_speed(),
        solver.solver_iterations(),
        solver.vorticity_confinement_enabled(),
        solver.wrap()
    );

    if args.randomize {
        solver.randomize_color();
        println!("Randomized color, avg density {:.3}\n", solver.avg_density());
    }

    println!("  Step | Density | Speed    | Uniformity | Energy   | MaxDiv   | ms");
    println!("-------|---------|----------|------------|----------|----------|-------");
    let interval = args.report_interval.max(1);
    for step in 0..args.steps {
        stir(&mut solver, step);
        solver.update();

        if (step + 1) % interval == 0 || step + 1 == args.steps {
            println!(
                "{:6} | {:7.4} | {:8.5} | {:10.4} | {:8.5} | {:8.4} | {:5.2}",
                solver.step_count(),
                solver.avg_density(),
                solver.avg_speed(),
                solver.uniformity(),
                solver.kinetic_energy(),
                solver.max_divergence(),
                solver.last_step_ms()
            );
        }
    }

    println!("\n=== Simulation Complete ===");
    println!("Steps: {}", solver.step_count());
    println!("Centre sample: {:?}", solver.info_at_pos(0.5, 0.5));

    if args.ascii {
        println!();
        print_ascii(&solver, 64);
    }

    if args.stats_json {
        println!("{}", serde_json::to_string_pretty(&solver.stats())?);
    }

    Ok(())
}

fn load_params(args: &Args) -> Result<FluidParams, Box<dyn std::error::Error>> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)?;
        let params: FluidParams = serde_json::from_str(&text)?;
        info!("Loaded parameters from {}", path.display());
        if args.seed.is_some() {
            warn!("--seed ignored when --config is given");
        }
        return Ok(params);
    }

    Ok(FluidParams {
        nx: args.size,
        ny: args.size,
        dt: args.dt,
        viscosity: args.viscosity,
        color_diffusion: args.color_diffusion,
        fade_speed: args.fade,
        solver_iterations: args.iterations,
        color_mode: if args.mono {
            ColorMode::Mono
        } else {
            ColorMode::Rgb
        },
        vorticity_confinement: args.vorticity,
        wrap_x: args.wrap_x,
        wrap_y: args.wrap_y,
        seed: args.seed,
    })
}

/// Orbiting emitter pushing tangentially and dropping a hue-cycling dye.
fn stir(solver: &mut FluidSolver, step: usize) {
    let angle = step as f32 * 0.05;
    let rotation = Rotation2::new(angle);
    let offset = rotation * Vec2::new(0.25, 0.0);
    let pos = Vec2::new(0.5, 0.5) + offset;
    let force = rotation * Vec2::new(0.0, 1.5);

    solver.add_force_at_pos(pos, force);
    solver.add_color_at_pos(pos, hue(angle));
}

fn hue(angle: f32) -> Vec3 {
    let third = std::f32::consts::TAU / 3.0;
    Vec3::new(
        0.5 + 0.5 * angle.cos(),
        0.5 + 0.5 * (angle - third).cos(),
        0.5 + 0.5 * (angle + third).cos(),
    ) * 5.0
}

fn print_ascii(solver: &FluidSolver, columns: usize) {
    const RAMP: &[u8] = b" .:-=+*#%@";

    let mut pixels = vec![0u8; export::rgba8_len(solver.nx(), solver.ny())];
    if let Err(err) = export::write_rgba8(solver, &mut pixels) {
        warn!("ASCII preview skipped: {err}");
        return;
    }

    let columns = columns.min(solver.nx()).max(1);
    let rows = (columns * solver.ny() / solver.nx() / 2).max(1);
    for row in (0..rows).rev() {
        let j = row * solver.ny() / rows;
        let line: String = (0..columns)
            .map(|col| {
                let i = col * solver.nx() / columns;
                let px = &pixels[(j * solver.nx() + i) * 4..][..3];
                let density = px.iter().copied().max().unwrap_or(0);
                RAMP[usize::from(density) * (RAMP.len() - 1) / 255] as char
            })
            .collect();
        println!("{line}");
    }
}

fn run_sweep(
    base: &FluidParams,
    steps: usize,
    iteration_counts: &[usize],
) -> Result<(), FluidError> {
    println!("=== Solver Iteration Sweep ({} steps each) ===\n", steps);

    let rows = iteration_counts
        .par_iter()
        .map(|&iterations| -> Result<_, FluidError> {
            let mut solver = FluidSolver::new(FluidParams {
                solver_iterations: iterations,
                ..base.clone()
            })?;
            for step in 0..steps {
                stir(&mut solver, step);
                solver.update();
            }
            Ok((
                iterations,
                solver.max_divergence(),
                solver.kinetic_energy(),
                solver.avg_density(),
                solver.last_step_ms(),
            ))
        })
        .collect::<Result<Vec<_>, FluidError>>()?;

    println!("Iterations | MaxDiv   | Energy   | Density | ms/step");
    println!("-----------|----------|----------|---------|--------");
    for (iterations, divergence, energy, density, ms) in rows {
        println!(
            "{:10} | {:8.4} | {:8.5} | {:7.4} | {:6.2}",
            iterations, divergence, energy, density, ms
        );
    }
    Ok(())
}

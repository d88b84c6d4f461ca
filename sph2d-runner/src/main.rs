//! sph2d Simulation Runner
//!
//! Loads a simulation config from JSON and runs it headless, printing the
//! particle table every few steps.
//!
//! Usage: `sph2d-runner [config.json] [--steps N] [--every K] [--dump-config]`
//!
//! Set `RUST_LOG=sph2d=debug` for per-step summaries, `trace` for
//! per-particle state.

use log::{error, info};
use sph2d::prelude::*;
use sph2d::Particle;
use std::env;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;

struct Options {
    config_path: Option<PathBuf>,
    steps: u64,
    every: u64,
    dump_config: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config_path: None,
            steps: 1_000,
            every: 3,
            dump_config: false,
        }
    }
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--steps" => options.steps = parse_count(&arg, args.next())?,
            "--every" => options.every = parse_count(&arg, args.next())?.max(1),
            "--dump-config" => options.dump_config = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag {}", flag)),
            path => options.config_path = Some(PathBuf::from(path)),
        }
    }
    Ok(options)
}

fn parse_count(flag: &str, value: Option<String>) -> Result<u64, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("{} expects a whole number, got {:?}", flag, value))
}

fn load_config(path: Option<&PathBuf>) -> SimConfig {
    let Some(path) = path else {
        eprintln!("No config file specified, using defaults.");
        return SimConfig::default();
    };

    match SimConfig::load(path) {
        Ok(config) => {
            info!("loaded config from {:?}", path);
            config
        }
        Err(e) => {
            eprintln!("Failed to load config from {:?}: {}", path, e);
            eprintln!("Using default configuration.");
            SimConfig::default()
        }
    }
}

/// One table line: id, position, velocity, density, pressure and force.
fn particle_row(p: &Particle) -> String {
    format!(
        "  {:<5} pos = ({:>8.2}, {:>8.2})  vel = ({:>8.2}, {:>8.2})  rho = {:.4e}  p = {:>10.4e}  f = ({:>10.4e}, {:>10.4e})",
        p.id(),
        p.position.x,
        p.position.y,
        p.velocity.x,
        p.velocity.y,
        p.density,
        p.pressure,
        p.force.x,
        p.force.y
    )
}

fn print_table(frame: &Frame<'_>) {
    let report = frame.report;
    println!(
        "step {:>6}  t = {:>8.2}s  particles = {:>4}  rho = [{:.3e}, {:.3e}]  ke = {:.4}",
        report.step,
        report.elapsed.as_secs_f32(),
        report.particle_count,
        report.min_density,
        report.max_density,
        report.kinetic_energy
    );
    for particle in frame.particles {
        println!("{}", particle_row(particle));
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: sph2d-runner [config.json] [--steps N] [--every K] [--dump-config]");
            return ExitCode::FAILURE;
        }
    };

    let config = load_config(options.config_path.as_ref());

    if options.dump_config {
        return match serde_json::to_string_pretty(&config) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("failed to serialize config: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "kernel = {:?}, density = {:?}, dt = {:?}, h = {}, poly6 = {:e}",
        sim.kernels().profile(),
        sim.config().physics.density_convention,
        sim.clock().dt(),
        sim.kernels().smoothing_radius(),
        sim.kernels().density_coefficient()
    );

    if options.steps == 0 {
        return ExitCode::SUCCESS;
    }

    let (steps, every) = (options.steps, options.every);
    let ran = sim.run(|frame: &Frame<'_>| {
        if frame.report.step % every == 0 {
            print_table(frame);
        }
        if frame.report.step >= steps {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    info!(
        "finished {} steps, {} particles, t = {:?}",
        ran,
        sim.particles().len(),
        sim.clock().elapsed()
    );
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use sph2d::ParticleStore;

    #[test]
    fn test_particle_row_has_solver_state() {
        let mut store = ParticleStore::with_capacity(1);
        store.spawn(Vec2::new(12.5, 40.0), Vec2::new(-3.0, 1.5), 1.0);
        let mut p = store.as_slice()[0];
        p.density = 2.5e-4;
        p.pressure = -7.0;
        p.force = Vec2::new(0.25, 9.0);

        let row = particle_row(&p);
        assert!(row.contains("#0"));
        assert!(row.contains("pos = (   12.50,    40.00)"));
        assert!(row.contains("vel = (   -3.00,     1.50)"));
        assert!(row.contains("rho = 2.5000e-4"));
        assert!(row.contains("p = "));
        assert!(row.contains("f = ("));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("--steps", Some("25".into())), Ok(25));
        assert!(parse_count("--steps", None).is_err());
        assert!(parse_count("--every", Some("x".into())).is_err());
    }
}

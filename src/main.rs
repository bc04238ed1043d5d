use clap::Parser;
use std::path::PathBuf;

use dead_reckoning::{
    errors::SimResult,
    simulator::{Simulator, SimulatorConfig},
};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Simulation configuration (YAML)
    config_path: PathBuf,
    /// Number of steps to run, overrides `max_steps`
    #[arg(long)]
    steps: Option<usize>,
    /// Random seed, overrides `random_seed`
    #[arg(long)]
    seed: Option<f32>,
    /// Perfect odometer: the estimate follows the true motion
    #[arg(long, default_value_t = false)]
    no_noise: bool,
    /// Save the records to this JSON file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn doit(args: Cli) -> SimResult<()> {
    let mut config = SimulatorConfig::load_from_path(&args.config_path)?;
    if let Some(steps) = args.steps {
        config.max_steps = steps;
    }
    if args.seed.is_some() {
        config.random_seed = args.seed;
    }

    Simulator::init_environment(&config.log);
    let mut simulator = Simulator::from_config(&config)?;
    if args.no_noise {
        simulator.robot_mut().set_odometer_noise_enabled(false);
    }
    simulator.run();

    let robot = simulator.robot();
    println!(
        "Odometer noise: {}",
        if robot.odometer_noise_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("True pose: {}", robot.true_pose());
    match robot.odometer_values() {
        Some(estimate) => println!("Odometer:  {estimate}"),
        None => println!("Odometer disabled"),
    }
    if let Some(drift) = simulator.drift() {
        println!(
            "Drift: {:.3} (position), {:.4} rad (orientation)",
            drift.distance, drift.orientation
        );
    }
    println!("Random seed: {}", simulator.random_seed());

    if let Some(output) = &args.output {
        simulator.save_records(output)?;
    }
    Ok(())
}

fn main() {
    let args = Cli::parse();

    let res = doit(args);
    if let Err(e) = res {
        println!("{}", e.detailed_error());
        std::process::exit(1);
    }
}

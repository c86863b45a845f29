use std::{env, process};

use anyhow::Context;
use log::{info, warn};
use orchestrator::{RoundOutcome, SimulationState, configs::SimulationConfig, presets};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [config.json]", args[0]);
        process::exit(1);
    }

    let config = match args.get(1) {
        Some(path) => SimulationConfig::from_path(path)
            .with_context(|| format!("failed to load config from '{path}'"))?,
        None => {
            info!("no config file given, using demo defaults");
            SimulationConfig::demo()
        }
    };

    let mut sim = SimulationState::from_config(&config)?;
    sim.load_preset(presets::example_one())?;

    println!("initial global model: {}", sim.global_model());
    print_stats(&sim);

    for round in 1..=config.rounds {
        for outcome in sim.run_round() {
            match outcome {
                RoundOutcome::Pushed {
                    client_id,
                    local,
                    global,
                } => println!("round {round}, client {client_id}: local {local}, global {global}"),
                RoundOutcome::Skipped { client_id, local } => {
                    println!("round {round}, client {client_id}: local {local} diverged, not pushed")
                }
                RoundOutcome::Failed { client_id, error } => {
                    warn!(round = round, client_id = client_id; "skipping push: {error}")
                }
            }
        }

        print_stats(&sim);
    }

    Ok(())
}

fn print_stats(sim: &SimulationState) {
    match sim.global_stats() {
        Ok(stats) => println!(
            "  R-squared: {:.2}, sum of squared residuals: {:.2}",
            stats.r_squared(),
            stats.ss_residual()
        ),
        Err(e) => println!("  stats unavailable: {e}"),
    }
}

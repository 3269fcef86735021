//! Trains a Double DQN agent on the 4x4 gridworld.
//!
//! Usage: `gridworld [config.json]`. The optional JSON file overrides the
//! default agent hyperparameters; set `RUST_LOG=info` to see per-episode
//! progress.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use minerva::agent::{AgentConfig, DoubleDqnAgent};
use minerva::environment::{Environment, GridWorld};
use minerva::trainer::{Trainer, TrainerConfig};

fn main() -> ExitCode {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("failed to read config {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => AgentConfig::default(),
    };

    let mut env = GridWorld::new();
    let mut agent = match DoubleDqnAgent::with_default_network(
        env.state_size(),
        env.action_size(),
        config,
    ) {
        Ok(agent) => agent,
        Err(err) => {
            eprintln!("failed to build agent: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let trainer = Trainer::new(TrainerConfig {
        checkpoint_path: Some(PathBuf::from("gridworld_ddqn.bin")),
        ..TrainerConfig::default()
    });

    match trainer.run(&mut agent, &mut env) {
        Ok(report) => {
            let last = report.scores.last().copied().unwrap_or(0.0);
            println!(
                "finished after {} episodes (solved: {}, last score: {:.2})",
                report.episodes, report.solved, last
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("training failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &str) -> Result<AgentConfig, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    let config = serde_json::from_str(&raw)?;
    Ok(config)
}

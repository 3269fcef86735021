//! # Minerva - Double Q-Learning for Discrete Gridworlds
//!
//! Minerva trains a control agent on discrete-state, discrete-action grid
//! environments using Double Q-Learning with a small neural function
//! approximator. The crate provides the full learning loop: a ring-buffer
//! experience replay, an epsilon-greedy policy with per-transition decay,
//! double-Q target construction, and an online/target network pair
//! synchronized at episode boundaries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minerva::agent::{AgentConfig, DoubleDqnAgent};
//! use minerva::environment::GridWorld;
//! use minerva::trainer::{Trainer, TrainerConfig};
//!
//! let mut env = GridWorld::new();
//! let mut agent = DoubleDqnAgent::with_default_network(2, 4, AgentConfig::default()).unwrap();
//! let trainer = Trainer::new(TrainerConfig::default());
//! let report = trainer.run(&mut agent, &mut env).unwrap();
//! println!("solved: {} after {} episodes", report.solved, report.episodes);
//! ```
//!
//! ## Module Organization
//!
//! - [`agent`] - The Double DQN agent: policy, learner, target sync
//! - [`approximator`] - The narrow trait the agent trains against
//! - [`environment`] - Grid environments and the reset/step trait
//! - [`error`] - Error types and result handling
//! - [`network`] - A small fully connected Q-network
//! - [`optimizer`] - SGD and Adam update rules
//! - [`replay_buffer`] - Fixed-capacity experience replay
//! - [`trainer`] - The episode driver

pub mod agent;
pub mod approximator;
pub mod environment;
pub mod error;
pub mod network;
pub mod optimizer;
pub mod replay_buffer;
pub mod trainer;

#[cfg(test)]
mod tests;

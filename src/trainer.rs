use std::path::PathBuf;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::agent::DoubleDqnAgent;
use crate::approximator::Approximator;
use crate::environment::Environment;
use crate::error::Result;
use crate::replay_buffer::Transition;

/// Episode-driver settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Hard cap on episodes when the stopping criterion never fires.
    pub max_episodes: usize,
    /// Training stops once the rolling mean score reaches this.
    pub target_score: f32,
    /// Number of recent episodes the rolling mean is taken over.
    pub score_window: usize,
    /// Checkpoint the online network every this many episodes.
    pub checkpoint_every: usize,
    /// Where checkpoints go; no checkpoints are written when unset.
    pub checkpoint_path: Option<PathBuf>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            max_episodes: 10_000,
            target_score: 100.0,
            score_window: 10,
            checkpoint_every: 10,
            checkpoint_path: None,
        }
    }
}

/// Outcome of a training run.
#[derive(Clone, Debug)]
pub struct TrainingReport {
    /// Per-episode scores, in order.
    pub scores: Vec<f32>,
    /// Episodes actually run.
    pub episodes: usize,
    /// Whether the stopping criterion was met before `max_episodes`.
    pub solved: bool,
}

/// Runs episodes against an environment, driving the agent's
/// act / step / store / train cycle.
///
/// Every environment step stores the resulting transition and attempts one
/// training step; every episode boundary syncs the target network. In
/// evaluation mode the store/train half is skipped and the agent just acts
/// greedily.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    pub fn run<F, E>(&self, agent: &mut DoubleDqnAgent<F>, env: &mut E) -> Result<TrainingReport>
    where
        F: Approximator,
        E: Environment,
    {
        let evaluation = agent.config().evaluation;
        let mut scores = Vec::new();
        let mut solved = false;
        let mut episodes = 0;

        for episode in 0..self.config.max_episodes {
            let mut state = env.reset();
            let mut score = 0.0;

            loop {
                let action = agent.act(state.view());
                let step = env.step(action);
                score += step.reward;

                if !evaluation {
                    agent.remember(Transition {
                        state,
                        action,
                        reward: step.reward,
                        next_state: step.next_state.clone(),
                        done: step.done,
                    });
                    if let Some(loss) = agent.train_step()? {
                        debug!("episode {} loss {:.6}", episode, loss);
                    }
                }

                state = step.next_state;
                if step.done {
                    break;
                }
            }

            agent.sync_target()?;
            scores.push(score);
            episodes = episode + 1;
            info!(
                "episode: {:4}  score: {:8.2}  buffer: {:4}  epsilon: {:.3}",
                episode,
                score,
                agent.buffer().len(),
                agent.epsilon()
            );

            let window = scores.len().min(self.config.score_window);
            let mean: f32 = scores[scores.len() - window..].iter().sum::<f32>() / window as f32;
            if mean >= self.config.target_score {
                info!("solved after {} episodes (mean score {:.2})", episodes, mean);
                solved = true;
                if let Some(path) = &self.config.checkpoint_path {
                    agent.save(path)?;
                }
                break;
            }

            if let Some(path) = &self.config.checkpoint_path {
                if (episode + 1) % self.config.checkpoint_every == 0 {
                    agent.save(path)?;
                }
            }
        }

        Ok(TrainingReport {
            scores,
            episodes,
            solved,
        })
    }
}

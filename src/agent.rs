use std::path::Path;

use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::approximator::{argmax, Approximator};
use crate::error::{MinervaError, Result};
use crate::network::QNetwork;
use crate::optimizer::{Adam, OptimizerWrapper};
use crate::replay_buffer::{ReplayBuffer, Transition};

/// Hidden layer width used by the default network architecture.
const HIDDEN_UNITS: usize = 24;

/// Hyperparameters of a [`DoubleDqnAgent`].
///
/// Defaults are tuned for the 4x4 gridworld. With `evaluation` set the
/// agent acts greedily: epsilon is pinned to zero and never decays.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub discount_factor: f32,
    pub learning_rate: f32,
    pub epsilon: f32,
    pub epsilon_min: f32,
    pub epsilon_decay: f32,
    pub batch_size: usize,
    pub train_start: usize,
    pub buffer_capacity: usize,
    pub evaluation: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            discount_factor: 0.9,
            learning_rate: 0.01,
            epsilon: 1.0,
            epsilon_min: 0.01,
            epsilon_decay: 0.9998,
            batch_size: 16,
            train_start: 150,
            buffer_capacity: 750,
            evaluation: false,
        }
    }
}

/// Double Q-Learning agent over a pair of structurally identical
/// approximators.
///
/// The online approximator is updated by gradient descent on every
/// training step; the target approximator only ever changes through
/// [`DoubleDqnAgent::sync_target`], which copies the online parameters
/// wholesale. Targets are built the double-Q way: the online network
/// selects the best next action, the target network evaluates it.
#[derive(Debug)]
pub struct DoubleDqnAgent<F: Approximator> {
    online: F,
    target: F,
    buffer: ReplayBuffer,
    config: AgentConfig,
    epsilon: f32,
    action_size: usize,
    rng: ThreadRng,
}

impl<F: Approximator> DoubleDqnAgent<F> {
    /// Build an agent from an online/target pair.
    ///
    /// The target is immediately overwritten with the online parameters,
    /// which doubles as a structural-identity check: mismatched
    /// architectures are rejected here rather than mid-training. Degenerate
    /// configs (zero batch size or buffer capacity) are rejected the same
    /// way, since both come straight off the config file surface.
    pub fn new(online: F, mut target: F, action_size: usize, config: AgentConfig) -> Result<Self> {
        if config.batch_size == 0 {
            return Err(MinervaError::invalid_parameter(
                "batch_size",
                "must be greater than 0",
            ));
        }
        if config.buffer_capacity == 0 {
            return Err(MinervaError::invalid_parameter(
                "buffer_capacity",
                "must be greater than 0",
            ));
        }
        target.set_parameters(&online.parameters())?;
        let epsilon = if config.evaluation { 0.0 } else { config.epsilon };
        let buffer = ReplayBuffer::new(config.buffer_capacity);
        Ok(DoubleDqnAgent {
            online,
            target,
            buffer,
            config,
            epsilon,
            action_size,
            rng: rand::thread_rng(),
        })
    }

    /// Select an action for `state` with the epsilon-greedy policy:
    /// explore uniformly with probability epsilon, otherwise take the
    /// action with the highest online Q-value (ties to the lowest index).
    pub fn act(&mut self, state: ArrayView1<f32>) -> usize {
        if self.epsilon > 0.0 && self.rng.gen::<f32>() <= self.epsilon {
            self.rng.gen_range(0..self.action_size)
        } else {
            argmax(self.online.predict(state).view())
        }
    }

    /// Store a transition in the replay buffer and decay epsilon.
    ///
    /// Decay is tied to experience collected, not to actions taken: one
    /// multiplicative step per stored transition, floored at
    /// `epsilon_min`. Evaluation agents skip the decay entirely; their
    /// epsilon stays pinned at zero.
    pub fn remember(&mut self, transition: Transition) {
        self.buffer.push(transition);
        if !self.config.evaluation && self.epsilon > self.config.epsilon_min {
            self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);
        }
    }

    /// Double-Q regression target for one transition.
    ///
    /// Starts from the online prediction for the transition's state so
    /// that untaken actions keep their current estimates (zero gradient),
    /// then overwrites the taken action's entry: the bare reward for
    /// terminal transitions, otherwise reward plus the discounted target
    /// value of the action the online network would pick next.
    pub fn q_target(&self, transition: &Transition) -> Array1<f32> {
        let mut target = self.online.predict(transition.state.view());
        if transition.done {
            target[transition.action] = transition.reward;
        } else {
            let next_online = self.online.predict(transition.next_state.view());
            let best_next = argmax(next_online.view());
            let bootstrap = self.target.predict(transition.next_state.view())[best_next];
            target[transition.action] =
                transition.reward + self.config.discount_factor * bootstrap;
        }
        target
    }

    /// Run one training step: sample a minibatch, build double-Q targets,
    /// and fit the online approximator once.
    ///
    /// Returns `None` without touching anything while the buffer holds
    /// fewer than `train_start` transitions (or nothing at all, when the
    /// threshold is zero), otherwise the fit loss. The warmup gate makes
    /// the buffer's insufficient-data error unreachable from here.
    pub fn train_step(&mut self) -> Result<Option<f32>> {
        if self.buffer.is_empty() || self.buffer.len() < self.config.train_start {
            return Ok(None);
        }
        let batch_size = self.config.batch_size.min(self.buffer.len());
        let batch = self.buffer.sample(&mut self.rng, batch_size)?;

        let state_size = batch[0].state.len();
        let mut states = Array2::zeros((batch_size, state_size));
        let mut targets = Array2::zeros((batch_size, self.action_size));
        for (i, &transition) in batch.iter().enumerate() {
            states.row_mut(i).assign(&transition.state);
            targets.row_mut(i).assign(&self.q_target(transition));
        }

        let loss = self.online.fit(states.view(), targets.view());
        Ok(Some(loss))
    }

    /// Copy the online parameters onto the target approximator. Called at
    /// construction and at every episode boundary.
    pub fn sync_target(&mut self) -> Result<()> {
        self.target.set_parameters(&self.online.parameters())
    }

    /// Persist the online approximator.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.online.save(path)
    }

    /// Replace the online approximator with a previously saved one and
    /// re-sync the target from it.
    pub fn load_online(&mut self, path: &Path) -> Result<()> {
        self.online = F::load(path)?;
        self.sync_target()
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn action_size(&self) -> usize {
        self.action_size
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn buffer(&self) -> &ReplayBuffer {
        &self.buffer
    }

    pub fn online(&self) -> &F {
        &self.online
    }

    pub fn target(&self) -> &F {
        &self.target
    }
}

impl DoubleDqnAgent<QNetwork> {
    /// Build an agent with the default network architecture: one hidden
    /// ReLU layer of 24 units, linear output head, Adam.
    pub fn with_default_network(
        state_size: usize,
        action_size: usize,
        config: AgentConfig,
    ) -> Result<Self> {
        let sizes = [state_size, HIDDEN_UNITS, action_size];
        let online = QNetwork::new(
            &sizes,
            OptimizerWrapper::Adam(Adam::default()),
            config.learning_rate,
        );
        let target = QNetwork::new(
            &sizes,
            OptimizerWrapper::Adam(Adam::default()),
            config.learning_rate,
        );
        Self::new(online, target, action_size, config)
    }
}

//! Discrete grid environments the agent trains against, behind a small
//! reset/step trait so the trainer does not care which board it runs on.

use ndarray::{array, Array1};

/// Outcome of one environment step.
#[derive(Clone, Debug)]
pub struct Step {
    pub next_state: Array1<f32>,
    pub reward: f32,
    pub done: bool,
}

/// A discrete-action environment with vector-encoded states.
pub trait Environment {
    /// Reset to the initial state and return its encoding.
    fn reset(&mut self) -> Array1<f32>;

    /// Apply `action` and advance one step.
    fn step(&mut self, action: usize) -> Step;

    /// Length of the state encoding vector.
    fn state_size(&self) -> usize;

    /// Number of discrete actions.
    fn action_size(&self) -> usize;
}

const GRID_SIDE: usize = 4;
const START_CELL: usize = 0;
const GOAL_CELL: usize = 15;
const HOLES: [usize; 4] = [5, 7, 11, 12];
const GOAL_REWARD: f32 = 100.0;
const MAX_STEPS: usize = 100;

/// Deterministic 4x4 frozen-lake board.
///
/// The agent starts in the top-left corner and must reach the bottom-right
/// goal without falling into a hole. Falling in or reaching the goal ends
/// the episode, as does exceeding the step limit. States are encoded as
/// `[x, y]` coordinates so the value function sees board geometry instead
/// of an opaque cell index.
pub struct GridWorld {
    cell: usize,
    steps: usize,
}

impl GridWorld {
    pub fn new() -> Self {
        GridWorld {
            cell: START_CELL,
            steps: 0,
        }
    }

    fn encode(cell: usize) -> Array1<f32> {
        let x = (cell % GRID_SIDE) as f32;
        let y = (cell / GRID_SIDE) as f32;
        array![x, y]
    }

    /// Current cell index, row-major from the top-left.
    pub fn cell(&self) -> usize {
        self.cell
    }
}

impl Default for GridWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for GridWorld {
    fn reset(&mut self) -> Array1<f32> {
        self.cell = START_CELL;
        self.steps = 0;
        Self::encode(self.cell)
    }

    fn step(&mut self, action: usize) -> Step {
        let x = self.cell % GRID_SIDE;
        let y = self.cell / GRID_SIDE;

        // Action order matches the classic frozen-lake encoding:
        // 0 = left, 1 = down, 2 = right, 3 = up. Moves off the board
        // leave the position unchanged.
        let (nx, ny) = match action {
            0 => (x.saturating_sub(1), y),
            1 => (x, (y + 1).min(GRID_SIDE - 1)),
            2 => ((x + 1).min(GRID_SIDE - 1), y),
            3 => (x, y.saturating_sub(1)),
            _ => (x, y),
        };
        self.cell = ny * GRID_SIDE + nx;
        self.steps += 1;

        let reached_goal = self.cell == GOAL_CELL;
        let fell = HOLES.contains(&self.cell);
        let done = reached_goal || fell || self.steps >= MAX_STEPS;
        let reward = if reached_goal { GOAL_REWARD } else { 0.0 };

        Step {
            next_state: Self::encode(self.cell),
            reward,
            done,
        }
    }

    fn state_size(&self) -> usize {
        2
    }

    fn action_size(&self) -> usize {
        4
    }
}

use std::path::Path;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::Result;

/// Parameter set of one dense layer: `(weights, biases)`.
pub type LayerParams = (Array2<f32>, Array1<f32>);

/// Narrow contract for a trainable action-value function.
///
/// The learning algorithm only ever sees this surface: it predicts
/// action-value vectors, fits on supervised (state, target) batches, and
/// copies parameter sets between structurally identical instances. The
/// online and target networks are two instances of one implementing type —
/// there is no behavioral difference between the roles, only usage.
/// Keeping the seam this small is what allows the agent to be exercised
/// against hand-built stub approximators in tests.
pub trait Approximator {
    /// Action-value vector for a single state.
    fn predict(&self, state: ArrayView1<f32>) -> Array1<f32>;

    /// Action-value vectors for a batch of states, one row per state.
    fn predict_batch(&self, states: ArrayView2<f32>) -> Array2<f32>;

    /// One gradient epoch of supervised regression on the batch.
    /// Returns the mean squared error over the batch before the update.
    fn fit(&mut self, states: ArrayView2<f32>, targets: ArrayView2<f32>) -> f32;

    /// Snapshot of all trainable parameters, one entry per layer.
    fn parameters(&self) -> Vec<LayerParams>;

    /// Replace all parameters with `params`. Fails on shape mismatch and
    /// leaves the receiver untouched in that case.
    fn set_parameters(&mut self, params: &[LayerParams]) -> Result<()>;

    /// Persist the approximator to `path`.
    fn save(&self, path: &Path) -> Result<()>;

    /// Restore an approximator previously written by [`Approximator::save`].
    fn load(path: &Path) -> Result<Self>
    where
        Self: Sized;
}

/// Index of the maximum element, ties broken by lowest index.
pub fn argmax(values: ArrayView1<f32>) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

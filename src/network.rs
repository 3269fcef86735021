use std::fs;
use std::path::Path;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};

use crate::approximator::{Approximator, LayerParams};
use crate::error::{MinervaError, Result};
use crate::optimizer::{Optimizer, OptimizerWrapper};

/// Activation functions available to [`QNetwork`] layers.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Activation {
    Relu,
    Linear,
}

impl Activation {
    fn apply(&self, z: &mut Array2<f32>) {
        match self {
            Activation::Relu => z.mapv_inplace(|v| v.max(0.0)),
            Activation::Linear => {}
        }
    }

    fn derivative(&self, z: &Array2<f32>) -> Array2<f32> {
        match self {
            Activation::Relu => z.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 }),
            Activation::Linear => Array2::ones(z.dim()),
        }
    }
}

/// A fully connected layer: weights, biases, and an activation.
/// Weights are initialized uniformly in [-0.1, 0.1], biases at zero.
#[derive(Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Array2<f32>,
    pub biases: Array1<f32>,
    pub activation: Activation,
}

impl DenseLayer {
    pub fn new(input_size: usize, output_size: usize, activation: Activation) -> Self {
        DenseLayer {
            weights: Array2::random((input_size, output_size), Uniform::new(-0.1, 0.1)),
            biases: Array1::zeros(output_size),
            activation,
        }
    }

    /// Forward pass over a batch. Returns the pre-activation output
    /// alongside the activated output; the pre-activation is what the
    /// backward pass needs to evaluate the activation derivative.
    fn forward(&self, inputs: ArrayView2<f32>) -> (Array2<f32>, Array2<f32>) {
        let pre = inputs.dot(&self.weights) + &self.biases;
        let mut post = pre.clone();
        self.activation.apply(&mut post);
        (pre, post)
    }
}

/// Per-layer record kept during a training forward pass.
struct LayerTrace {
    inputs: Array2<f32>,
    pre_activation: Array2<f32>,
}

/// A small fully connected action-value network trained by backpropagation
/// on mean-squared error.
///
/// Unlike a general-purpose network, the output layer is always linear and
/// hidden layers are always ReLU: Q-values are unbounded regression
/// targets. The online and target networks of an agent are two instances
/// of this type built from the same layer sizes.
#[derive(Clone, Serialize, Deserialize)]
pub struct QNetwork {
    pub layers: Vec<DenseLayer>,
    optimizer: OptimizerWrapper,
    learning_rate: f32,
}

impl QNetwork {
    /// Build a network from `layer_sizes`, e.g. `[2, 24, 4]` for a
    /// 2-dimensional state and 4 actions.
    pub fn new(layer_sizes: &[usize], optimizer: OptimizerWrapper, learning_rate: f32) -> Self {
        assert!(
            layer_sizes.len() >= 2,
            "network needs at least input and output sizes"
        );
        let last = layer_sizes.len() - 2;
        let layers = layer_sizes
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let activation = if i == last {
                    Activation::Linear
                } else {
                    Activation::Relu
                };
                DenseLayer::new(w[0], w[1], activation)
            })
            .collect();
        QNetwork {
            layers,
            optimizer,
            learning_rate,
        }
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    /// Forward pass keeping the per-layer traces needed for backprop.
    fn forward_traced(&self, inputs: ArrayView2<f32>) -> (Vec<LayerTrace>, Array2<f32>) {
        let mut traces = Vec::with_capacity(self.layers.len());
        let mut current = inputs.to_owned();
        for layer in &self.layers {
            let (pre, post) = layer.forward(current.view());
            traces.push(LayerTrace {
                inputs: current,
                pre_activation: pre,
            });
            current = post;
        }
        (traces, current)
    }
}

impl Approximator for QNetwork {
    fn predict(&self, state: ArrayView1<f32>) -> Array1<f32> {
        let batch = state.insert_axis(Axis(0));
        let output = self.predict_batch(batch);
        output.index_axis(Axis(0), 0).to_owned()
    }

    fn predict_batch(&self, states: ArrayView2<f32>) -> Array2<f32> {
        let mut current = states.to_owned();
        for layer in &self.layers {
            let (_, post) = layer.forward(current.view());
            current = post;
        }
        current
    }

    fn fit(&mut self, states: ArrayView2<f32>, targets: ArrayView2<f32>) -> f32 {
        let (traces, outputs) = self.forward_traced(states);
        let errors = &outputs - &targets;
        let loss = errors.mapv(|e| e * e).mean().unwrap_or(0.0);

        // Backpropagate, collecting gradients from the output layer down.
        let mut gradients = Vec::with_capacity(self.layers.len());
        let mut error = errors;
        for (layer, trace) in self.layers.iter().zip(&traces).rev() {
            let delta = error * layer.activation.derivative(&trace.pre_activation);
            let weight_grads = trace.inputs.t().dot(&delta);
            let bias_grads = delta.sum_axis(Axis(0));
            error = delta.dot(&layer.weights.t());
            gradients.push((weight_grads, bias_grads));
        }
        gradients.reverse();

        for (i, (layer, (wg, bg))) in self.layers.iter_mut().zip(gradients).enumerate() {
            self.optimizer
                .apply(i, &mut layer.weights, &mut layer.biases, &wg, &bg, self.learning_rate);
        }
        loss
    }

    fn parameters(&self) -> Vec<LayerParams> {
        self.layers
            .iter()
            .map(|l| (l.weights.clone(), l.biases.clone()))
            .collect()
    }

    fn set_parameters(&mut self, params: &[LayerParams]) -> Result<()> {
        if params.len() != self.layers.len() {
            return Err(MinervaError::dimension_mismatch(
                format!("{} layers", self.layers.len()),
                format!("{} layers", params.len()),
            ));
        }
        for (layer, (weights, biases)) in self.layers.iter().zip(params) {
            if layer.weights.dim() != weights.dim() || layer.biases.dim() != biases.dim() {
                return Err(MinervaError::dimension_mismatch(
                    format!("{:?}/{:?}", layer.weights.dim(), layer.biases.dim()),
                    format!("{:?}/{:?}", weights.dim(), biases.dim()),
                ));
            }
        }
        for (layer, (weights, biases)) in self.layers.iter_mut().zip(params) {
            layer.weights.assign(weights);
            layer.biases.assign(biases);
        }
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        let serialized = bincode::serialize(self)?;
        fs::write(path, serialized)?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let network = bincode::deserialize(&data)?;
        Ok(network)
    }
}

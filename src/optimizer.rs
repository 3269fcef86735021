use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Gradient-descent update rule applied per layer.
///
/// `layer` identifies which layer's parameters are being updated so that
/// stateful optimizers keep separate moment estimates per layer. Layers are
/// always visited in order starting from 0 within one training step.
pub trait Optimizer {
    fn apply(
        &mut self,
        layer: usize,
        weights: &mut Array2<f32>,
        biases: &mut Array1<f32>,
        weight_grads: &Array2<f32>,
        bias_grads: &Array1<f32>,
        learning_rate: f32,
    );
}

/// Enum dispatch over the supported optimizers, so networks stay a plain
/// serializable struct without trait objects.
#[derive(Serialize, Deserialize, Clone)]
pub enum OptimizerWrapper {
    Sgd(Sgd),
    Adam(Adam),
}

impl Optimizer for OptimizerWrapper {
    fn apply(
        &mut self,
        layer: usize,
        weights: &mut Array2<f32>,
        biases: &mut Array1<f32>,
        weight_grads: &Array2<f32>,
        bias_grads: &Array1<f32>,
        learning_rate: f32,
    ) {
        match self {
            OptimizerWrapper::Sgd(opt) => {
                opt.apply(layer, weights, biases, weight_grads, bias_grads, learning_rate)
            }
            OptimizerWrapper::Adam(opt) => {
                opt.apply(layer, weights, biases, weight_grads, bias_grads, learning_rate)
            }
        }
    }
}

/// Plain stochastic gradient descent.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct Sgd;

impl Sgd {
    pub fn new() -> Sgd {
        Sgd
    }
}

impl Optimizer for Sgd {
    fn apply(
        &mut self,
        _layer: usize,
        weights: &mut Array2<f32>,
        biases: &mut Array1<f32>,
        weight_grads: &Array2<f32>,
        bias_grads: &Array1<f32>,
        learning_rate: f32,
    ) {
        weights.zip_mut_with(weight_grads, |w, &g| *w -= learning_rate * g);
        biases.zip_mut_with(bias_grads, |b, &g| *b -= learning_rate * g);
    }
}

#[derive(Serialize, Deserialize, Clone)]
struct AdamMoments {
    m_weights: Array2<f32>,
    v_weights: Array2<f32>,
    m_biases: Array1<f32>,
    v_biases: Array1<f32>,
}

/// Adam optimizer with per-layer first/second moment estimates.
///
/// Moment buffers are allocated lazily on the first update of each layer,
/// so the optimizer does not need to know layer shapes up front. The bias
/// correction step counter advances when layer 0 comes around again.
#[derive(Serialize, Deserialize, Clone)]
pub struct Adam {
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
    moments: Vec<AdamMoments>,
    t: i32,
}

impl Adam {
    pub fn new(beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Adam {
            beta1,
            beta2,
            epsilon,
            moments: Vec::new(),
            t: 0,
        }
    }
}

impl Default for Adam {
    fn default() -> Self {
        Self::new(0.9, 0.999, 1e-8)
    }
}

impl Optimizer for Adam {
    fn apply(
        &mut self,
        layer: usize,
        weights: &mut Array2<f32>,
        biases: &mut Array1<f32>,
        weight_grads: &Array2<f32>,
        bias_grads: &Array1<f32>,
        learning_rate: f32,
    ) {
        if layer == 0 {
            self.t += 1;
        }
        if self.moments.len() <= layer {
            self.moments.push(AdamMoments {
                m_weights: Array2::zeros(weights.dim()),
                v_weights: Array2::zeros(weights.dim()),
                m_biases: Array1::zeros(biases.dim()),
                v_biases: Array1::zeros(biases.dim()),
            });
        }

        let state = &mut self.moments[layer];
        let (b1, b2) = (self.beta1, self.beta2);
        let bias1 = 1.0 - b1.powi(self.t);
        let bias2 = 1.0 - b2.powi(self.t);

        state
            .m_weights
            .zip_mut_with(weight_grads, |m, &g| *m = b1 * *m + (1.0 - b1) * g);
        state
            .v_weights
            .zip_mut_with(weight_grads, |v, &g| *v = b2 * *v + (1.0 - b2) * g * g);
        state
            .m_biases
            .zip_mut_with(bias_grads, |m, &g| *m = b1 * *m + (1.0 - b1) * g);
        state
            .v_biases
            .zip_mut_with(bias_grads, |v, &g| *v = b2 * *v + (1.0 - b2) * g * g);

        let m_hat = state.m_weights.mapv(|m| m / bias1);
        let v_hat = state.v_weights.mapv(|v| v / bias2);
        *weights -= &(m_hat / (v_hat.mapv(f32::sqrt) + self.epsilon) * learning_rate);

        let m_hat = state.m_biases.mapv(|m| m / bias1);
        let v_hat = state.v_biases.mapv(|v| v / bias2);
        *biases -= &(m_hat / (v_hat.mapv(f32::sqrt) + self.epsilon) * learning_rate);
    }
}

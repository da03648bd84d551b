use serde::{Serialize, Deserialize};
use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Fully connected layer: `a = σ(x·W + b)`.
///
/// `weights` is `input_size × size`, `biases` is `1 × size`. Layers are
/// read-only after loading so one network can serve many threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    pub fn new(weights: Matrix, biases: Matrix, activation: ActivationFunction) -> Layer {
        Layer {
            size: weights.cols,
            weights,
            biases,
            activator: activation
        }
    }

    /// A layer whose weights and biases are all zero.
    pub fn zeros(size: usize, input_size: usize, activation: ActivationFunction) -> Layer {
        Layer::new(Matrix::zeros(input_size, size), Matrix::zeros(1, size), activation)
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Describes the first shape inconsistency found, if any.
    pub fn shape_error(&self) -> Option<String> {
        if !self.weights.is_consistent() {
            return Some("weight matrix rows/cols do not match its data".into());
        }
        if !self.biases.is_consistent() {
            return Some("bias matrix rows/cols do not match its data".into());
        }
        if self.weights.cols != self.size {
            return Some(format!("weights have {} columns but size is {}", self.weights.cols, self.size));
        }
        if self.biases.rows != 1 || self.biases.cols != self.size {
            return Some(format!(
                "biases are {}x{} but expected 1x{}", self.biases.rows, self.biases.cols, self.size
            ));
        }
        None
    }

    pub fn feed_from(&self, input: Vec<f64>) -> Vec<f64> {
        let z = &(&Matrix::row(input) * &self.weights) + &self.biases;
        self.activator.apply(&z.into_row())
    }
}

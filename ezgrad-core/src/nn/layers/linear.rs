use crate::array::Array;
use crate::autograd::Var;
use crate::error::EzgradError;
use crate::nn::module::{Forward, Module};
use rand::Rng;

/// Applies an affine transformation to the incoming data: `y = x @ W + b`.
///
/// `weights` has shape `[in_features, out_features]`, `biases` has shape
/// `[out_features]` and is broadcast over the rows of `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    weights: Array<f64>,
    biases: Array<f64>,
}

impl Linear {
    /// Creates a layer with weights drawn from `N(0, 1) * 0.01` and zero biases.
    pub fn new<R: Rng + ?Sized>(in_features: usize, out_features: usize, rng: &mut R) -> Self {
        Linear {
            weights: Array::randn(&[in_features, out_features], 0.01, rng),
            biases: Array::zeros(&[out_features]),
        }
    }

    /// Builds a layer from explicit parameters.
    ///
    /// # Errors
    /// `RankMismatch` unless `weights` is rank 2 and `biases` rank 1,
    /// `MatmulShapeMismatch` if `biases` does not match the output width.
    pub fn from_parameters(weights: Array<f64>, biases: Array<f64>) -> Result<Self, EzgradError> {
        if weights.rank() != 2 {
            return Err(EzgradError::RankMismatch {
                operation: "Linear::from_parameters".to_string(),
                expected: 2,
                actual: weights.rank(),
            });
        }
        if biases.rank() != 1 {
            return Err(EzgradError::RankMismatch {
                operation: "Linear::from_parameters".to_string(),
                expected: 1,
                actual: biases.rank(),
            });
        }
        if weights.shape()[1] != biases.shape()[0] {
            return Err(EzgradError::MatmulShapeMismatch {
                shape1: weights.shape().to_vec(),
                shape2: biases.shape().to_vec(),
            });
        }
        Ok(Linear { weights, biases })
    }

    pub fn in_features(&self) -> usize {
        self.weights.shape()[0]
    }

    pub fn out_features(&self) -> usize {
        self.weights.shape()[1]
    }

    pub fn weights(&self) -> &Array<f64> {
        &self.weights
    }

    pub fn biases(&self) -> &Array<f64> {
        &self.biases
    }
}

impl Module for Linear {
    fn forward<'g>(&self, input: Var<'g, Array<f64>>) -> Result<Forward<'g>, EzgradError> {
        let graph = input.graph();
        let weights = graph.leaf(self.weights.clone());
        let biases = graph.leaf(self.biases.clone());
        let output = (input.matmul(weights)? + biases)?;
        Ok(Forward {
            output,
            parameters: vec![weights, biases],
        })
    }

    fn parameters(&self) -> Vec<&Array<f64>> {
        vec![&self.weights, &self.biases]
    }

    fn parameters_mut(&mut self) -> Vec<&mut Array<f64>> {
        vec![&mut self.weights, &mut self.biases]
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;

use crate::array::Array;
use crate::autograd::Var;
use crate::error::EzgradError;
use crate::payload::Payload;

/// Plain stochastic gradient descent: `p <- p - learning_rate * grad`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Self {
        Sgd { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Updates each parameter array from the gradient of the leaf it was
    /// bound to for the last forward pass.
    ///
    /// `params` and `bound` must line up one to one, as returned by
    /// [`Module::parameters_mut`](crate::nn::Module::parameters_mut) and
    /// [`Forward::parameters`](crate::nn::Forward).
    ///
    /// # Errors
    /// `GradientCountMismatch` if the two lists differ in length,
    /// `MissingGradient` if a bound leaf received no gradient.
    pub fn step(&self, params: Vec<&mut Array<f64>>, bound: &[Var<'_, Array<f64>>]) -> Result<(), EzgradError> {
        if params.len() != bound.len() {
            return Err(EzgradError::GradientCountMismatch {
                operation: "sgd_step".to_string(),
                expected: params.len(),
                actual: bound.len(),
            });
        }
        for (param, leaf) in params.into_iter().zip(bound) {
            let grad = leaf.grad().ok_or(EzgradError::MissingGradient {
                node: leaf.id().index(),
            })?;
            let update = param.sub_elems(&grad.scale(self.learning_rate))?;
            if update.shape() != param.shape() {
                return Err(EzgradError::GradientShapeMismatch {
                    node: leaf.id().index(),
                    expected: param.shape().to_vec(),
                    actual: grad.shape().to_vec(),
                });
            }
            *param = update;
        }
        log::trace!("SGD step over {} parameters", bound.len());
        Ok(())
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;

use crate::array::Array;
use crate::autograd::Var;
use crate::error::EzgradError;

/// How the squared errors are combined into a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    /// Sum divided by the number of samples (the leading dimension).
    #[default]
    Mean,
    Sum,
}

/// Mean squared error, `sum((pred - target)^2) / len(target)`, where
/// `len(target)` is the size of the leading (sample) dimension.
///
/// # Errors
/// `BroadcastError` if the shapes of `pred` and `target` are incompatible.
pub fn mse_loss<'g>(
    pred: Var<'g, Array<f64>>,
    target: Var<'g, Array<f64>>,
) -> Result<Var<'g, Array<f64>>, EzgradError> {
    mse_loss_with(pred, target, Reduction::Mean)
}

/// Squared error with an explicit [`Reduction`].
pub fn mse_loss_with<'g>(
    pred: Var<'g, Array<f64>>,
    target: Var<'g, Array<f64>>,
    reduction: Reduction,
) -> Result<Var<'g, Array<f64>>, EzgradError> {
    let diff = (pred - target)?;
    let total = (diff * diff)?.sum();
    match reduction {
        Reduction::Sum => Ok(total),
        Reduction::Mean => {
            let samples = target.shape().first().copied().unwrap_or(1);
            total / samples as f64
        }
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;

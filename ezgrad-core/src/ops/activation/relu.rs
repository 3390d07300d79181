use crate::autograd::{Operation, Var};
use crate::error::EzgradError;
use crate::ops::apply_unary_op;
use crate::payload::Payload;

// --- Forward Operation ---

/// Rectified Linear Unit, element-wise: `ReLU(x) = max(0, x)`.
pub fn relu_op<P: Payload>(a: Var<'_, P>) -> Var<'_, P> {
    apply_unary_op(a, |x| x.relu(), Operation::Relu { input: a.id() })
}

// --- Backward Operation ---

/// grad(a) = grad_output where a > 0, 0 elsewhere (subgradient 0 at a == 0).
pub(crate) fn relu_backward<P: Payload>(a: &P, grad_output: &P) -> Result<Vec<P>, EzgradError> {
    Ok(vec![a.relu_mask().mul_elems(grad_output)?])
}

impl<'g, P: Payload> Var<'g, P> {
    /// Applies ReLU element-wise. See [`relu_op`].
    pub fn relu(&self) -> Var<'g, P> {
        relu_op(*self)
    }
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;

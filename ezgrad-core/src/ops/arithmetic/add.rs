// ezgrad-core/src/ops/arithmetic/add.rs

use crate::autograd::{Operation, Var};
use crate::error::EzgradError;
use crate::ops::apply_binary_op;
use crate::payload::Payload;
use std::ops::Add;

// --- Forward Operation ---

/// Element-wise addition `a + b`, broadcasting array operands.
///
/// # Errors
/// `BroadcastError` if the shapes cannot be broadcast together,
/// `ForeignNode` if `a` and `b` belong to different graphs.
pub fn add_op<'g, P: Payload>(a: Var<'g, P>, b: Var<'g, P>) -> Result<Var<'g, P>, EzgradError> {
    apply_binary_op(
        a,
        b,
        "add_op",
        |x, y| x.add_elems(y),
        |lhs, rhs| Operation::Add { lhs, rhs },
    )
}

// --- Backward Operation ---

/// d(a + b)/da = d(a + b)/db = 1; broadcast dimensions are summed back.
pub(crate) fn add_backward<P: Payload>(a: &P, b: &P, grad_output: &P) -> Result<Vec<P>, EzgradError> {
    let grad_a = grad_output.reduce_to_shape(&a.shape())?;
    let grad_b = grad_output.reduce_to_shape(&b.shape())?;
    Ok(vec![grad_a, grad_b])
}

impl<'g, P: Payload> Add for Var<'g, P> {
    type Output = Result<Var<'g, P>, EzgradError>;

    fn add(self, rhs: Self) -> Self::Output {
        add_op(self, rhs)
    }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;

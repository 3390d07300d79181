use crate::autograd::{Operation, Var};
use crate::error::EzgradError;
use crate::ops::apply_binary_op;
use crate::payload::Payload;
use std::ops::Sub;

/// Element-wise subtraction `a - b`, broadcasting array operands.
pub fn sub_op<'g, P: Payload>(a: Var<'g, P>, b: Var<'g, P>) -> Result<Var<'g, P>, EzgradError> {
    apply_binary_op(
        a,
        b,
        "sub_op",
        |x, y| x.sub_elems(y),
        |lhs, rhs| Operation::Sub { lhs, rhs },
    )
}

/// grad(a) = grad_output, grad(b) = -grad_output.
pub(crate) fn sub_backward<P: Payload>(a: &P, b: &P, grad_output: &P) -> Result<Vec<P>, EzgradError> {
    let grad_a = grad_output.reduce_to_shape(&a.shape())?;
    let grad_b = grad_output.negate().reduce_to_shape(&b.shape())?;
    Ok(vec![grad_a, grad_b])
}

impl<'g, P: Payload> Sub for Var<'g, P> {
    type Output = Result<Var<'g, P>, EzgradError>;

    fn sub(self, rhs: Self) -> Self::Output {
        sub_op(self, rhs)
    }
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;

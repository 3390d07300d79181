use crate::autograd::{Operation, Var};
use crate::error::EzgradError;
use crate::ops::apply_binary_op;
use crate::payload::Payload;
use std::ops::Mul;

/// Element-wise (Hadamard) product `a * b`, broadcasting array operands.
pub fn mul_op<'g, P: Payload>(a: Var<'g, P>, b: Var<'g, P>) -> Result<Var<'g, P>, EzgradError> {
    apply_binary_op(
        a,
        b,
        "mul_op",
        |x, y| x.mul_elems(y),
        |lhs, rhs| Operation::Mul { lhs, rhs },
    )
}

/// For z = a * b:
/// grad(a) = grad_output * b
/// grad(b) = grad_output * a
pub(crate) fn mul_backward<P: Payload>(a: &P, b: &P, grad_output: &P) -> Result<Vec<P>, EzgradError> {
    let grad_a = b.mul_elems(grad_output)?.reduce_to_shape(&a.shape())?;
    let grad_b = a.mul_elems(grad_output)?.reduce_to_shape(&b.shape())?;
    Ok(vec![grad_a, grad_b])
}

impl<'g, P: Payload> Mul for Var<'g, P> {
    type Output = Result<Var<'g, P>, EzgradError>;

    fn mul(self, rhs: Self) -> Self::Output {
        mul_op(self, rhs)
    }
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;

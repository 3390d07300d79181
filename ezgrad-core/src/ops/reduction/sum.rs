use crate::autograd::{Operation, Var};
use crate::error::EzgradError;
use crate::ops::apply_unary_op;
use crate::payload::Payload;

/// Sums every element of `a` into a scalar-shaped node.
///
/// On a scalar payload this is the identity.
pub fn sum_op<P: Payload>(a: Var<'_, P>) -> Var<'_, P> {
    apply_unary_op(a, |x| x.sum_all(), Operation::Sum { input: a.id() })
}

/// grad(a) = grad_output broadcast back to a's shape.
pub(crate) fn sum_backward<P: Payload>(a: &P, grad_output: &P) -> Result<Vec<P>, EzgradError> {
    Ok(vec![grad_output.broadcast_to(&a.shape())?])
}

impl<'g, P: Payload> Var<'g, P> {
    /// Sum of all elements. See [`sum_op`].
    pub fn sum(&self) -> Var<'g, P> {
        sum_op(*self)
    }
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;

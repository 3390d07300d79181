use crate::autograd::{Operation, Var};
use crate::error::EzgradError;
use crate::ops::apply_binary_op;
use crate::payload::Payload;
use std::ops::Div;

// --- Forward Operation ---

/// Element-wise division `a / b`, broadcasting array operands.
///
/// # Errors
/// `DivisionByZero` if `b`'s value is, or contains, zero. The check happens
/// before evaluation, so no node is created in that case.
pub fn div_op<'g, P: Payload>(a: Var<'g, P>, b: Var<'g, P>) -> Result<Var<'g, P>, EzgradError> {
    apply_binary_op(
        a,
        b,
        "div_op",
        |x, y| {
            if y.contains_zero() {
                return Err(EzgradError::DivisionByZero {
                    operation: "div_op".to_string(),
                });
            }
            x.div_elems(y)
        },
        |lhs, rhs| Operation::Div { lhs, rhs },
    )
}

// --- Backward Operation ---

/// For z = a / b:
/// grad(a) = grad_output / b
/// grad(b) = -grad_output * a / b^2
pub(crate) fn div_backward<P: Payload>(a: &P, b: &P, grad_output: &P) -> Result<Vec<P>, EzgradError> {
    let grad_a = grad_output.div_elems(b)?.reduce_to_shape(&a.shape())?;

    let b_squared = b.mul_elems(b)?;
    let grad_b = a
        .mul_elems(grad_output)?
        .div_elems(&b_squared)?
        .negate()
        .reduce_to_shape(&b.shape())?;

    Ok(vec![grad_a, grad_b])
}

impl<'g, P: Payload> Div for Var<'g, P> {
    type Output = Result<Var<'g, P>, EzgradError>;

    fn div(self, rhs: Self) -> Self::Output {
        div_op(self, rhs)
    }
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;

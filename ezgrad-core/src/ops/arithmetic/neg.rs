use crate::autograd::{Operation, Var};
use crate::error::EzgradError;
use crate::ops::apply_unary_op;
use crate::payload::Payload;
use std::ops::Neg;

/// Element-wise negation `-a`.
pub fn neg_op<P: Payload>(a: Var<'_, P>) -> Var<'_, P> {
    apply_unary_op(a, |x| x.negate(), Operation::Neg { input: a.id() })
}

/// grad(a) = -grad_output
pub(crate) fn neg_backward<P: Payload>(_a: &P, grad_output: &P) -> Result<Vec<P>, EzgradError> {
    Ok(vec![grad_output.negate()])
}

impl<'g, P: Payload> Neg for Var<'g, P> {
    type Output = Var<'g, P>;

    fn neg(self) -> Self::Output {
        neg_op(self)
    }
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;

use crate::autograd::{Operation, Var};
use crate::error::EzgradError;
use crate::ops::apply_unary_op;
use crate::payload::Payload;
use num_traits::{One, Zero};

/// Raises every element of `base` to a constant `exponent`.
///
/// The exponent is a plain number, not a node, and receives no gradient.
pub fn pow_op<P: Payload>(base: Var<'_, P>, exponent: P::Elem) -> Var<'_, P> {
    apply_unary_op(
        base,
        |x| x.pow_elems(exponent),
        Operation::Pow {
            base: base.id(),
            exponent,
        },
    )
}

/// grad(base) = exponent * base^(exponent - 1) * grad_output
///
/// `base^0` is constant, so its gradient is zero even where `base == 0`.
pub(crate) fn pow_backward<P: Payload>(
    base: &P,
    exponent: P::Elem,
    grad_output: &P,
) -> Result<Vec<P>, EzgradError> {
    if exponent.is_zero() {
        return Ok(vec![base.zeros_like()]);
    }
    let local = base.pow_elems(exponent - P::Elem::one()).scale(exponent);
    Ok(vec![local.mul_elems(grad_output)?])
}

impl<'g, P: Payload> Var<'g, P> {
    /// `self ^ exponent` with a constant exponent. See [`pow_op`].
    pub fn pow(&self, exponent: P::Elem) -> Var<'g, P> {
        pow_op(*self, exponent)
    }
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;

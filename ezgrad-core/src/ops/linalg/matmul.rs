use crate::autograd::{Operation, Var};
use crate::error::EzgradError;
use crate::ops::apply_binary_op;
use crate::payload::Payload;

// --- Forward Operation ---

/// 2-D matrix product `a @ b`.
///
/// # Errors
/// `MatmulShapeMismatch` unless both operands are rank 2 with
/// `a.shape()[1] == b.shape()[0]`. Scalar payloads have no matrix product
/// and fail with `RankMismatch`.
pub fn matmul_op<'g, P: Payload>(a: Var<'g, P>, b: Var<'g, P>) -> Result<Var<'g, P>, EzgradError> {
    apply_binary_op(
        a,
        b,
        "matmul_op",
        |x, y| x.matmul(y),
        |lhs, rhs| Operation::MatMul { lhs, rhs },
    )
}

// --- Backward Operation ---

/// For C = A @ B:
/// grad(A) = grad_output @ B^T
/// grad(B) = A^T @ grad_output
pub(crate) fn matmul_backward<P: Payload>(a: &P, b: &P, grad_output: &P) -> Result<Vec<P>, EzgradError> {
    let grad_a = grad_output.matmul(&b.transpose()?)?;
    let grad_b = a.transpose()?.matmul(grad_output)?;
    Ok(vec![grad_a, grad_b])
}

impl<'g, P: Payload> Var<'g, P> {
    /// Matrix product `self @ rhs`. See [`matmul_op`].
    pub fn matmul(&self, rhs: Var<'g, P>) -> Result<Var<'g, P>, EzgradError> {
        matmul_op(*self, rhs)
    }
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;

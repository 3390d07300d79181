//! # Operations Module (`ops`)
//!
//! Every differentiable primitive of the engine lives here, grouped by
//! category.
//!
//! ## Structure:
//!
//! - **`_op` functions:** each primitive has a forward function (`add_op`,
//!   `matmul_op`, ...) that computes the output value from its operands'
//!   values and pushes exactly one new node into the operands' graph.
//!   Precondition failures (shape, division by zero) are reported before any
//!   node is created.
//! - **`_backward` functions:** the local derivative rule. Given the operand
//!   values and the gradient of the output, they return one gradient per
//!   operand, each shaped like its operand. They are dispatched from
//!   [`Operation::backward`](crate::autograd::Operation).
//! - **Operators:** `std::ops` impls on [`Var`] (and, in `literal`, on bare
//!   values mixed with `Var`s) forward to the `_op` functions.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: add, sub, mul, div, neg, pow.
//! - [`activation`]: relu.
//! - [`linalg`]: matmul.
//! - [`reduction`]: sum.

use crate::autograd::{NodeId, Operation, Var};
use crate::error::EzgradError;
use crate::payload::Payload;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
mod literal;
pub mod reduction;

/// Evaluates a binary operation and records its node.
///
/// Checks that both operands live in the same graph, runs `forward` on their
/// values and, only if it succeeds, pushes the output node.
pub(crate) fn apply_binary_op<'g, P, F, B>(
    a: Var<'g, P>,
    b: Var<'g, P>,
    op_name: &str,
    forward: F,
    build_op: B,
) -> Result<Var<'g, P>, EzgradError>
where
    P: Payload,
    F: FnOnce(&P, &P) -> Result<P, EzgradError>,
    B: FnOnce(NodeId, NodeId) -> Operation<P::Elem>,
{
    let graph = a.same_graph(&b, op_name)?;
    let value = graph.with_values(a.id(), b.id(), forward)?;
    Ok(graph.push_node(value, Some(build_op(a.id(), b.id()))))
}

/// Evaluates an infallible unary operation and records its node.
pub(crate) fn apply_unary_op<'g, P, F>(
    a: Var<'g, P>,
    forward: F,
    op: Operation<P::Elem>,
) -> Var<'g, P>
where
    P: Payload,
    F: FnOnce(&P) -> P,
{
    let graph = a.graph();
    let value = graph.with_value(a.id(), forward);
    graph.push_node(value, Some(op))
}

use crate::autograd::graph::{NodeData, NodeId};
use crate::error::EzgradError;
use crate::ops::activation::relu::relu_backward;
use crate::ops::arithmetic::add::add_backward;
use crate::ops::arithmetic::div::div_backward;
use crate::ops::arithmetic::mul::mul_backward;
use crate::ops::arithmetic::neg::neg_backward;
use crate::ops::arithmetic::pow::pow_backward;
use crate::ops::arithmetic::sub::sub_backward;
use crate::ops::linalg::matmul::matmul_backward;
use crate::ops::reduction::sum::sum_backward;
use crate::payload::Payload;
use std::fmt;

/// The primitive that produced a non-leaf node, together with its operands.
///
/// This is a closed set: every differentiable operation of the engine is one
/// variant here. A node exclusively owns its producer; the operand ids inside
/// it are shared, non-owning references into the same [`Graph`](crate::Graph).
///
/// `E` is the element type of the payload and only appears as the constant
/// exponent of [`Operation::Pow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation<E> {
    Add { lhs: NodeId, rhs: NodeId },
    Sub { lhs: NodeId, rhs: NodeId },
    Mul { lhs: NodeId, rhs: NodeId },
    Div { lhs: NodeId, rhs: NodeId },
    Neg { input: NodeId },
    /// `base ^ exponent`; the exponent is a plain constant and is not differentiated.
    Pow { base: NodeId, exponent: E },
    Relu { input: NodeId },
    MatMul { lhs: NodeId, rhs: NodeId },
    Sum { input: NodeId },
}

impl<E: Copy> Operation<E> {
    /// Operand ids in the order their gradients are returned by `backward`.
    pub fn operands(&self) -> Vec<NodeId> {
        match *self {
            Operation::Add { lhs, rhs }
            | Operation::Sub { lhs, rhs }
            | Operation::Mul { lhs, rhs }
            | Operation::Div { lhs, rhs }
            | Operation::MatMul { lhs, rhs } => vec![lhs, rhs],
            Operation::Neg { input }
            | Operation::Relu { input }
            | Operation::Sum { input }
            | Operation::Pow { base: input, .. } => vec![input],
        }
    }

    /// Display symbol, as drawn by the DOT renderer.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add { .. } => "+",
            Operation::Sub { .. } => "-",
            Operation::Mul { .. } => "*",
            Operation::Div { .. } => "/",
            Operation::Neg { .. } => "neg",
            Operation::Pow { .. } => "^",
            Operation::Relu { .. } => "ReLU",
            Operation::MatMul { .. } => "@",
            Operation::Sum { .. } => "sum",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add { .. } => "add",
            Operation::Sub { .. } => "sub",
            Operation::Mul { .. } => "mul",
            Operation::Div { .. } => "div",
            Operation::Neg { .. } => "neg",
            Operation::Pow { .. } => "pow",
            Operation::Relu { .. } => "relu",
            Operation::MatMul { .. } => "matmul",
            Operation::Sum { .. } => "sum",
        }
    }

    /// Computes the contribution of `grad_output` to each operand's gradient.
    ///
    /// `grad_output` is the fully accumulated gradient of the node this
    /// operation produced. The returned gradients follow the order of
    /// [`Operation::operands`] and each has the shape of its operand.
    /// `node` is the id of that produced node, used in error reports.
    pub(crate) fn backward<P>(
        &self,
        node: NodeId,
        nodes: &[NodeData<P>],
        grad_output: &P,
    ) -> Result<Vec<P>, EzgradError>
    where
        P: Payload<Elem = E>,
    {
        let value_of = |id: NodeId| operand_value(nodes, node, id);
        match *self {
            Operation::Add { lhs, rhs } => {
                add_backward(value_of(lhs)?, value_of(rhs)?, grad_output)
            }
            Operation::Sub { lhs, rhs } => {
                sub_backward(value_of(lhs)?, value_of(rhs)?, grad_output)
            }
            Operation::Mul { lhs, rhs } => {
                mul_backward(value_of(lhs)?, value_of(rhs)?, grad_output)
            }
            Operation::Div { lhs, rhs } => {
                div_backward(value_of(lhs)?, value_of(rhs)?, grad_output)
            }
            Operation::Neg { input } => neg_backward(value_of(input)?, grad_output),
            Operation::Pow { base, exponent } => {
                pow_backward(value_of(base)?, exponent, grad_output)
            }
            Operation::Relu { input } => relu_backward(value_of(input)?, grad_output),
            Operation::MatMul { lhs, rhs } => {
                matmul_backward(value_of(lhs)?, value_of(rhs)?, grad_output)
            }
            Operation::Sum { input } => sum_backward(value_of(input)?, grad_output),
        }
    }
}

impl<E: Copy> fmt::Display for Operation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands: Vec<String> = self.operands().iter().map(|id| id.to_string()).collect();
        write!(f, "{}({})", self.name(), operands.join(", "))
    }
}

fn operand_value<P: Payload>(nodes: &[NodeData<P>], node: NodeId, id: NodeId) -> Result<&P, EzgradError> {
    nodes
        .get(id.index())
        .map(|n| &n.value)
        .ok_or(EzgradError::DanglingOperand {
            node: node.index(),
            operand: id.index(),
        })
}

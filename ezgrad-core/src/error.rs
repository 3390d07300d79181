use thiserror::Error;

/// Broad category of an [`EzgradError`].
///
/// Callers that only care whether a failure came from bad input values, bad
/// shapes or a broken graph can match on this instead of every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Numerically undefined forward computation (division by zero).
    Arithmetic,
    /// Operand shapes are incompatible for the requested operation.
    Shape,
    /// Internal invariant of the computation graph was violated.
    GraphConsistency,
}

/// Custom error type for the ezgrad engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum EzgradError {
    #[error("Division by zero during operation {operation}")]
    DivisionByZero { operation: String },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Incompatible shapes for matmul: {shape1:?} @ {shape2:?}")]
    MatmulShapeMismatch {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Operation {operation} expects rank {expected}, got {actual}")]
    RankMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Array creation error: data length {data_len} does not match shape {shape:?}")]
    ArrayCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Cannot reduce gradient of shape {from:?} to shape {to:?}")]
    ReduceShapeError { from: Vec<usize>, to: Vec<usize> },

    #[error("Cycle detected in the computation graph at node {node}")]
    CycleDetected { node: usize },

    #[error("Node {node} references operand {operand} which does not exist in the graph")]
    DanglingOperand { node: usize, operand: usize },

    #[error("Operands of {operation} belong to different graphs")]
    ForeignNode { operation: String },

    #[error("Node {node} is reachable from the backward root but received no gradient")]
    MissingGradient { node: usize },

    #[error("Gradient for node {node} has shape {actual:?}, expected {expected:?}")]
    GradientShapeMismatch {
        node: usize,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Backward of {operation} produced {actual} gradients, expected {expected}")]
    GradientCountMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },
}

impl EzgradError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EzgradError::DivisionByZero { .. } => ErrorKind::Arithmetic,
            EzgradError::BroadcastError { .. }
            | EzgradError::MatmulShapeMismatch { .. }
            | EzgradError::RankMismatch { .. }
            | EzgradError::ArrayCreationError { .. }
            | EzgradError::ReduceShapeError { .. } => ErrorKind::Shape,
            EzgradError::CycleDetected { .. }
            | EzgradError::DanglingOperand { .. }
            | EzgradError::ForeignNode { .. }
            | EzgradError::MissingGradient { .. }
            | EzgradError::GradientShapeMismatch { .. }
            | EzgradError::GradientCountMismatch { .. } => ErrorKind::GraphConsistency,
        }
    }
}

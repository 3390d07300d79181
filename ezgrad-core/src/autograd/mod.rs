//! # Automatic differentiation
//!
//! - [`graph`]: the [`Graph`] arena that owns nodes, and the backward pass.
//! - [`var`]: [`Var`], the copyable handle users compose.
//! - [`backward_op`]: the closed [`Operation`] set and its gradient dispatch.
//! - [`grad_check`]: finite-difference verification of analytical gradients.
//! - [`dot`]: Graphviz rendering of a computed graph.

pub mod backward_op;
pub mod dot;
pub mod grad_check;
pub mod graph;
pub mod var;

pub use backward_op::Operation;
pub use grad_check::{check_grad, GradCheckConfig, GradCheckError};
pub use graph::{Graph, NodeId};
pub use var::Var;

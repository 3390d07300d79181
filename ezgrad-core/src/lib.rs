//! # ezgrad-core
//!
//! A small reverse-mode automatic differentiation engine.
//!
//! Values are recorded in a [`Graph`] as they are computed; every node is
//! either a leaf or the output of one primitive [`Operation`] applied to
//! earlier nodes. Calling [`Var::backward`] on any node walks the graph in
//! reverse topological order and accumulates the gradient of that node with
//! respect to everything it depends on.
//!
//! Nodes carry a [`Payload`]: a plain float (`f32`/`f64`) or an [`Array`]
//! with NumPy-style broadcasting.
//!
//! ```
//! use ezgrad_core::{EzgradError, Graph};
//!
//! fn main() -> Result<(), EzgradError> {
//!     let graph = Graph::<f64>::new();
//!     let x = graph.leaf(2.0);
//!     let y = graph.leaf(3.0);
//!     let z = graph.leaf(4.0);
//!     let f = ((x * y)? + z.relu())? / (x - y)?.pow(2.0);
//!     let f = f?;
//!     f.backward()?;
//!     assert_eq!(f.value(), 10.0);
//!     assert_eq!(x.grad(), Some(23.0));
//!     assert_eq!(y.grad(), Some(-18.0));
//!     assert_eq!(z.grad(), Some(1.0));
//!     Ok(())
//! }
//! ```

pub mod array;
pub mod autograd;
pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod payload;
pub mod train;
pub mod utils;

pub use array::Array;
pub use autograd::dot::render_dot;
pub use autograd::{check_grad, GradCheckConfig, GradCheckError, Graph, NodeId, Operation, Var};
pub use error::{ErrorKind, EzgradError};
pub use payload::Payload;
pub use train::{train, TrainConfig};

// Re-export traits required by public functions/structs
pub use num_traits;

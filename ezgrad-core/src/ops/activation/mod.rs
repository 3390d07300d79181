//! # Activation Functions
//!
//! Non-linear activations. Only ReLU is needed by the engine so far.

pub mod relu;

pub use relu::relu_op;

// src/nn/layers/mod.rs

pub mod linear;
pub mod mlp;

pub use linear::Linear;
pub use mlp::Mlp;

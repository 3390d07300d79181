//! Parameter update rules.

pub mod sgd;

pub use sgd::Sgd;

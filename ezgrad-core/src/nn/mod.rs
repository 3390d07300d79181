//! Small neural-network toolkit on `f64` array payloads: enough to train a
//! multi-layer perceptron with plain gradient descent.

pub mod layers;
pub mod losses;
pub mod module;

pub use layers::{Linear, Mlp};
pub use losses::mse_loss;
pub use module::{Forward, Module};

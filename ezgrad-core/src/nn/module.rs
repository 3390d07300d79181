use crate::array::Array;
use crate::autograd::Var;
use crate::error::EzgradError;
use std::fmt::Debug;

/// Output of [`Module::forward`]: the result node plus the leaves that the
/// module's parameters were bound to, in [`Module::parameters`] order.
#[derive(Debug)]
pub struct Forward<'g> {
    pub output: Var<'g, Array<f64>>,
    pub parameters: Vec<Var<'g, Array<f64>>>,
}

/// The base trait for layers and models.
///
/// Node values are immutable, so a module does not own graph nodes. It owns
/// plain arrays and binds them as fresh leaves of the input's graph on every
/// forward pass. After `backward`, the gradients of those leaves are what an
/// optimizer applies back onto [`Module::parameters_mut`].
pub trait Module: Debug {
    fn forward<'g>(&self, input: Var<'g, Array<f64>>) -> Result<Forward<'g>, EzgradError>;

    fn parameters(&self) -> Vec<&Array<f64>>;

    fn parameters_mut(&mut self) -> Vec<&mut Array<f64>>;
}

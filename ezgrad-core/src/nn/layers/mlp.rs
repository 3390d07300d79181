use crate::array::Array;
use crate::autograd::Var;
use crate::error::EzgradError;
use crate::nn::layers::Linear;
use crate::nn::module::{Forward, Module};
use rand::Rng;

/// Multi-layer perceptron: a chain of [`Linear`] layers with ReLU between
/// them and no activation on the output.
#[derive(Debug, Clone, PartialEq)]
pub struct Mlp {
    layers: Vec<Linear>,
}

impl Mlp {
    /// Builds `input -> hidden[0] -> ... -> output`. An empty `hidden` gives a
    /// single affine layer.
    pub fn new<R: Rng + ?Sized>(input: usize, hidden: &[usize], output: usize, rng: &mut R) -> Self {
        let sizes: Vec<usize> = std::iter::once(input)
            .chain(hidden.iter().copied())
            .chain(std::iter::once(output))
            .collect();
        let layers = sizes
            .windows(2)
            .map(|pair| Linear::new(pair[0], pair[1], rng))
            .collect();
        Mlp { layers }
    }

    pub fn from_layers(layers: Vec<Linear>) -> Self {
        Mlp { layers }
    }

    pub fn layers(&self) -> &[Linear] {
        &self.layers
    }
}

impl Module for Mlp {
    fn forward<'g>(&self, input: Var<'g, Array<f64>>) -> Result<Forward<'g>, EzgradError> {
        let mut x = input;
        let mut parameters = Vec::with_capacity(self.layers.len() * 2);
        let last = self.layers.len().saturating_sub(1);
        for (i, layer) in self.layers.iter().enumerate() {
            let fwd = layer.forward(x)?;
            parameters.extend(fwd.parameters);
            x = if i < last { fwd.output.relu() } else { fwd.output };
        }
        Ok(Forward {
            output: x,
            parameters,
        })
    }

    fn parameters(&self) -> Vec<&Array<f64>> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Array<f64>> {
        self.layers.iter_mut().flat_map(|l| l.parameters_mut()).collect()
    }
}

use crate::autograd::graph::Graph;
use crate::autograd::var::Var;
use crate::error::EzgradError;
use crate::payload::Payload;
use num_traits::{NumCast, ToPrimitive};
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical grad {analytical:?} != numerical grad {numerical:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
    },
    #[error("Input {input_index} received no gradient from the backward pass")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Epsilon {0:?} cannot be represented in the payload element type")]
    InvalidEpsilon(f64),
    #[error("Engine error during gradient check: {0}")]
    Engine(#[from] EzgradError),
}

/// Step size and acceptance threshold of [`check_grad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckConfig {
    pub epsilon: f64,
    pub tolerance: f64,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        GradCheckConfig {
            epsilon: 1e-6,
            tolerance: 1e-4,
        }
    }
}

impl GradCheckConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Checks analytical gradients against central finite differences.
///
/// `func` receives a fresh graph and one leaf per entry of `inputs`, and
/// returns the output node. The scalar being differentiated is the sum of
/// the output's elements, which is what a backward pass seeded with ones
/// computes. Every element of every input is perturbed by `±epsilon`; the
/// check fails on the first element where
/// `|analytical - numerical| > tolerance * (1 + |numerical|)`.
///
/// Use `f64` payloads: single precision cannot resolve the default epsilon.
pub fn check_grad<P, F>(func: F, inputs: &[P], config: &GradCheckConfig) -> Result<(), GradCheckError>
where
    P: Payload,
    F: for<'g> Fn(&'g Graph<P>, &[Var<'g, P>]) -> Result<Var<'g, P>, EzgradError>,
{
    let epsilon: P::Elem =
        <P::Elem as NumCast>::from(config.epsilon).ok_or(GradCheckError::InvalidEpsilon(config.epsilon))?;
    let two_eps = 2.0 * config.epsilon;

    // --- Analytical pass ---
    let analytical_grads: Vec<Vec<f64>> = {
        let graph = Graph::new();
        let leaves: Vec<Var<'_, P>> = inputs.iter().map(|x| graph.leaf(x.clone())).collect();
        let output = func(&graph, &leaves)?;
        output.backward()?;
        let grads = leaves
            .iter()
            .enumerate()
            .map(|(i, leaf)| {
                leaf.grad()
                    .map(|g| to_f64_vec(&g))
                    .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })
            })
            .collect::<Result<Vec<_>, _>>()?;
        grads
    };

    // --- Numerical pass ---
    for (i, input) in inputs.iter().enumerate() {
        let shape = input.shape();
        let original = input.to_elems();
        for elem_idx in 0..original.len() {
            let mut perturbed = inputs.to_vec();

            let mut plus = original.clone();
            plus[elem_idx] = plus[elem_idx] + epsilon;
            perturbed[i] = P::from_elems(plus, &shape)?;
            let loss_plus = evaluate_sum(&func, &perturbed)?;

            let mut minus = original.clone();
            minus[elem_idx] = minus[elem_idx] - epsilon;
            perturbed[i] = P::from_elems(minus, &shape)?;
            let loss_minus = evaluate_sum(&func, &perturbed)?;

            let numerical = (loss_plus - loss_minus) / two_eps;
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }

            let analytical = analytical_grads[i][elem_idx];
            log::trace!(
                "grad check input {} element {}: analytical {} numerical {}",
                i,
                elem_idx,
                analytical,
                numerical
            );
            let difference = (analytical - numerical).abs();
            if difference.is_nan() || difference > config.tolerance * (1.0 + numerical.abs()) {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical,
                    numerical,
                });
            }
        }
    }
    Ok(())
}

/// Sum of the output elements of `func` evaluated on `inputs` in a throwaway graph.
fn evaluate_sum<P, F>(func: &F, inputs: &[P]) -> Result<f64, EzgradError>
where
    P: Payload,
    F: for<'g> Fn(&'g Graph<P>, &[Var<'g, P>]) -> Result<Var<'g, P>, EzgradError>,
{
    let graph = Graph::new();
    let leaves: Vec<Var<'_, P>> = inputs.iter().map(|x| graph.leaf(x.clone())).collect();
    let output = func(&graph, &leaves)?;
    Ok(to_f64_vec(&output.value()).into_iter().sum())
}

fn to_f64_vec<P: Payload>(payload: &P) -> Vec<f64> {
    payload
        .to_elems()
        .into_iter()
        .map(|x| x.to_f64().unwrap_or(f64::NAN))
        .collect()
}

//! Full-batch training loop for [`Mlp`] models.

use crate::array::Array;
use crate::autograd::Graph;
use crate::error::EzgradError;
use crate::nn::{mse_loss, Mlp, Module};
use crate::optim::Sgd;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Hyper-parameters of [`train`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub hidden_sizes: Vec<usize>,
    /// Log the loss every `log_every` epochs; 0 disables it.
    pub log_every: usize,
    /// Seed of the RNG used by [`build_mlp`].
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            learning_rate: 0.01,
            epochs: 1000,
            hidden_sizes: vec![8, 8],
            log_every: 100,
            seed: 42,
        }
    }
}

impl TrainConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_hidden_sizes(mut self, hidden_sizes: Vec<usize>) -> Self {
        self.hidden_sizes = hidden_sizes;
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Creates an [`Mlp`] with `config.hidden_sizes`, initialised from `config.seed`.
pub fn build_mlp(input: usize, output: usize, config: &TrainConfig) -> Mlp {
    let mut rng = StdRng::seed_from_u64(config.seed);
    Mlp::new(input, &config.hidden_sizes, output, &mut rng)
}

/// Trains `model` on `(x, y)` with full-batch gradient descent on the mean
/// squared error. Returns the loss of every epoch, measured before that
/// epoch's update.
///
/// Each epoch builds its own [`Graph`]: the current parameters are bound as
/// fresh leaves, the graph is differentiated, and the optimizer writes the
/// updated arrays back into `model`.
pub fn train(model: &mut Mlp, x: &Array<f64>, y: &Array<f64>, config: &TrainConfig) -> Result<Vec<f64>, EzgradError> {
    let optimizer = Sgd::new(config.learning_rate);
    let mut losses = Vec::with_capacity(config.epochs);
    log::info!(
        "Training for {} epochs, learning rate {}, {} samples",
        config.epochs,
        config.learning_rate,
        x.shape().first().copied().unwrap_or(0)
    );

    for epoch in 0..config.epochs {
        let graph = Graph::new();
        let input = graph.leaf(x.clone());
        let target = graph.leaf(y.clone());

        let fwd = model.forward(input)?;
        let loss = mse_loss(fwd.output, target)?;
        loss.backward()?;

        let loss_value: f64 = loss.value().data().iter().sum();
        optimizer.step(model.parameters_mut(), &fwd.parameters)?;

        if config.log_every > 0 && epoch % config.log_every == 0 {
            log::info!("Epoch {}, Loss: {}", epoch, loss_value);
        }
        log::trace!("Epoch {} used {} nodes", epoch, graph.len());
        losses.push(loss_value);
    }
    Ok(losses)
}

/// Runs `model` on `x` in a throwaway graph.
pub fn predict(model: &Mlp, x: &Array<f64>) -> Result<Array<f64>, EzgradError> {
    let graph = Graph::new();
    let fwd = model.forward(graph.leaf(x.clone()))?;
    Ok(fwd.output.value())
}

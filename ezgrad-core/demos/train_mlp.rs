//! Trains a 2-8-8-1 perceptron on a four-point toy problem.
//!
//! Run with `RUST_LOG=info` to see the loss every 100 epochs.

use ezgrad_core::train::{build_mlp, predict};
use ezgrad_core::{train, Array, EzgradError, TrainConfig};

fn main() -> Result<(), EzgradError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let x = Array::from_rows(&[
        vec![2.0, 3.0],
        vec![-1.0, -2.0],
        vec![5.0, -1.0],
        vec![-3.0, 4.0],
    ])?;
    let y = Array::from_rows(&[vec![1.0], vec![-1.0], vec![1.0], vec![-1.0]])?;

    let config = TrainConfig::default();
    let mut model = build_mlp(2, 1, &config);
    let losses = train(&mut model, &x, &y, &config)?;

    if let Some(last) = losses.last() {
        log::info!("Final loss: {}", last);
    }
    let pred = predict(&model, &x)?;
    println!("Final predictions: {}", pred);
    Ok(())
}

//! Prints the DOT graph of `(x*y + relu(z)) / (x - y)^2` after backward.
//!
//! `cargo run --example visualize | dot -Tsvg > graph.svg`

use ezgrad_core::{render_dot, EzgradError, Graph};

fn main() -> Result<(), EzgradError> {
    env_logger::init();

    let graph = Graph::<f64>::new();
    let x = graph.leaf(2.0);
    let y = graph.leaf(3.0);
    let z = graph.leaf(4.0);
    let numerator = ((x * y)? + z.relu())?;
    let f = (numerator / (x - y)?.pow(2.0))?;
    f.backward()?;

    log::info!("f = {}, df/dx = {:?}, df/dy = {:?}, df/dz = {:?}", f.value(), x.grad(), y.grad(), z.grad());
    print!("{}", render_dot(f)?);
    Ok(())
}

use ezgrad_core::Array;
use rand::rngs::StdRng;
use rand::Rng;

// Shared by several test crates; not every crate uses every helper.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Array of `shape` with elements drawn uniformly from `[-2, 2)`.
#[allow(dead_code)]
pub fn random_array(rng: &mut StdRng, shape: &[usize]) -> Array<f64> {
    let numel = shape.iter().product();
    let data: Vec<f64> = (0..numel).map(|_| rng.gen_range(-2.0..2.0)).collect();
    Array::new(data, shape.to_vec()).expect("Test array creation failed")
}

/// The four-sample toy problem used by the training demo.
#[allow(dead_code)]
pub fn toy_dataset() -> (Array<f64>, Array<f64>) {
    let x = Array::from_rows(&[
        vec![2.0, 3.0],
        vec![-1.0, -2.0],
        vec![5.0, -1.0],
        vec![-3.0, 4.0],
    ])
    .expect("Test dataset creation failed");
    let y = Array::from_rows(&[vec![1.0], vec![-1.0], vec![1.0], vec![-1.0]])
        .expect("Test dataset creation failed");
    (x, y)
}

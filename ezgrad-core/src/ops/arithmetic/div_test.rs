use crate::array::Array;
use crate::autograd::Graph;
use crate::error::{ErrorKind, EzgradError};
use crate::ops::arithmetic::div_op;
use crate::utils::testing::check_array_near;
use approx::assert_relative_eq;

#[test]
fn test_div_scalars_quotient_rule() -> Result<(), EzgradError> {
    let graph = Graph::<f64>::new();
    let a = graph.leaf(6.0);
    let b = graph.leaf(2.0);
    let c = (a / b)?;
    c.backward()?;
    assert_eq!(c.value(), 3.0);
    assert_eq!(a.grad(), Some(0.5));
    assert_eq!(b.grad(), Some(-1.5));
    Ok(())
}

#[test]
fn test_div_by_zero_creates_no_node() {
    let graph = Graph::<f64>::new();
    let x = graph.leaf(1.0);
    let y = graph.leaf(0.0);
    let before = graph.len();
    let err = div_op(x, y).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arithmetic);
    assert!(matches!(err, EzgradError::DivisionByZero { .. }));
    assert_eq!(graph.len(), before);
}

#[test]
fn test_div_array_containing_zero() {
    let graph = Graph::new();
    let x = graph.leaf(Array::<f64>::ones(&[3]));
    let y = graph.leaf(Array::new(vec![1.0f64, 0.0, 2.0], vec![3]).unwrap());
    assert!(matches!(
        div_op(x, y),
        Err(EzgradError::DivisionByZero { .. })
    ));
}

#[test]
fn test_div_array_by_broadcast_scalar() -> Result<(), EzgradError> {
    let graph = Graph::new();
    let a = graph.leaf(Array::new(vec![2.0f64, 4.0, 6.0], vec![3])?);
    let b = graph.leaf(Array::scalar(2.0f64));
    let c = div_op(a, b)?;
    check_array_near(&c.value(), &[3], &[1.0, 2.0, 3.0], 1e-12);
    c.backward()?;
    check_array_near(&a.grad().expect("grad a"), &[3], &[0.5, 0.5, 0.5], 1e-12);
    // -(2 + 4 + 6) / 4
    let grad_b = b.grad().expect("grad b");
    assert_relative_eq!(grad_b.item().unwrap_or(f64::NAN), -3.0, epsilon = 1e-12);
    Ok(())
}

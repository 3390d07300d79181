use crate::array::Array;
use crate::autograd::Graph;
use crate::error::EzgradError;
use crate::ops::arithmetic::{add_op, mul_op};
use crate::utils::testing::check_array_near;

#[test]
fn test_mul_scalars() -> Result<(), EzgradError> {
    let graph = Graph::<f64>::new();
    let a = graph.leaf(2.0);
    let b = graph.leaf(3.0);
    let c = mul_op(a, b)?;
    c.backward()?;
    assert_eq!(c.value(), 6.0);
    assert_eq!(a.grad(), Some(3.0));
    assert_eq!(b.grad(), Some(2.0));
    Ok(())
}

#[test]
fn test_mul_square_accumulates_both_paths() -> Result<(), EzgradError> {
    let graph = Graph::<f64>::new();
    let x = graph.leaf(2.0);
    let y = (x * x)?;
    y.backward()?;
    assert_eq!(x.grad(), Some(4.0));
    Ok(())
}

#[test]
fn test_mul_diamond() -> Result<(), EzgradError> {
    // y = (3x) * (x + 1), dy/dx = 3(x + 1) + 3x = 15 at x = 2
    let graph = Graph::<f64>::new();
    let x = graph.leaf(2.0);
    let a = mul_op(x, graph.leaf(3.0))?;
    let b = add_op(x, graph.leaf(1.0))?;
    let y = mul_op(a, b)?;
    y.backward()?;
    assert_eq!(y.value(), 18.0);
    assert_eq!(x.grad(), Some(15.0));
    assert_eq!(a.grad(), Some(3.0));
    assert_eq!(b.grad(), Some(6.0));
    Ok(())
}

#[test]
fn test_mul_arrays_elementwise() -> Result<(), EzgradError> {
    let graph = Graph::new();
    let a = graph.leaf(Array::new(vec![1.0f64, 2.0, 3.0], vec![3])?);
    let b = graph.leaf(Array::new(vec![4.0f64, 5.0, 6.0], vec![3])?);
    let c = mul_op(a, b)?;
    check_array_near(&c.value(), &[3], &[4.0, 10.0, 18.0], 1e-12);
    c.backward()?;
    check_array_near(&a.grad().expect("grad a"), &[3], &[4.0, 5.0, 6.0], 1e-12);
    check_array_near(&b.grad().expect("grad b"), &[3], &[1.0, 2.0, 3.0], 1e-12);
    Ok(())
}

#[test]
fn test_mul_broadcast_scalar_array() -> Result<(), EzgradError> {
    let graph = Graph::new();
    let a = graph.leaf(Array::new(vec![1.0f64, 2.0, 3.0, 4.0], vec![2, 2])?);
    let s = graph.leaf(Array::scalar(2.0f64));
    let c = mul_op(a, s)?;
    c.backward()?;
    check_array_near(&a.grad().expect("grad a"), &[2, 2], &[2.0; 4], 1e-12);
    check_array_near(&s.grad().expect("grad s"), &[], &[10.0], 1e-12);
    Ok(())
}

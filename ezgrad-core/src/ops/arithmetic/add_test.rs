use crate::array::Array;
use crate::autograd::Graph;
use crate::error::EzgradError;
use crate::ops::arithmetic::add_op;
use crate::utils::testing::check_array_near;

#[test]
fn test_add_scalars() -> Result<(), EzgradError> {
    let graph = Graph::<f64>::new();
    let a = graph.leaf(2.0);
    let b = graph.leaf(3.0);
    let c = (a + b)?;
    c.backward()?;
    assert_eq!(c.value(), 5.0);
    assert_eq!(a.grad(), Some(1.0));
    assert_eq!(b.grad(), Some(1.0));
    Ok(())
}

#[test]
fn test_add_same_node_three_times() -> Result<(), EzgradError> {
    let graph = Graph::<f64>::new();
    let x = graph.leaf(2.0);
    let y = ((x + x)? + x)?;
    y.backward()?;
    assert_eq!(y.value(), 6.0);
    assert_eq!(x.grad(), Some(3.0));
    Ok(())
}

#[test]
fn test_add_records_operands() -> Result<(), EzgradError> {
    let graph = Graph::<f64>::new();
    let a = graph.leaf(1.0);
    let b = graph.leaf(4.0);
    let c = add_op(a, b)?;
    assert!(!c.is_leaf());
    let operands: Vec<_> = c.operands().iter().map(|v| v.id()).collect();
    assert_eq!(operands, vec![a.id(), b.id()]);
    assert_eq!(c.producer().map(|op| op.symbol()), Some("+"));
    Ok(())
}

#[test]
fn test_add_arrays_broadcast_backward() -> Result<(), EzgradError> {
    let graph = Graph::new();
    let a = graph.leaf(Array::new(vec![1.0f64, 2.0, 3.0, 4.0], vec![2, 2])?);
    let b = graph.leaf(Array::new(vec![10.0f64, 20.0], vec![1, 2])?);
    let c = (a + b)?;
    check_array_near(&c.value(), &[2, 2], &[11.0, 22.0, 13.0, 24.0], 1e-12);

    c.backward()?;
    check_array_near(&a.grad().expect("grad a"), &[2, 2], &[1.0, 1.0, 1.0, 1.0], 1e-12);
    // Row vector was broadcast over two rows.
    check_array_near(&b.grad().expect("grad b"), &[1, 2], &[2.0, 2.0], 1e-12);
    Ok(())
}

#[test]
fn test_add_shape_mismatch_creates_no_node() {
    let graph = Graph::new();
    let a = graph.leaf(Array::<f64>::ones(&[2]));
    let b = graph.leaf(Array::<f64>::ones(&[3]));
    let before = graph.len();
    let result = add_op(a, b);
    assert!(matches!(result, Err(EzgradError::BroadcastError { .. })));
    assert_eq!(graph.len(), before);
}

#[test]
fn test_add_foreign_graphs() {
    let g1 = Graph::<f64>::new();
    let g2 = Graph::<f64>::new();
    let a = g1.leaf(1.0);
    let b = g2.leaf(1.0);
    assert!(matches!(add_op(a, b), Err(EzgradError::ForeignNode { .. })));
}

use crate::array::Array;
use crate::autograd::{Graph, NodeId, Operation};
use crate::error::{ErrorKind, EzgradError};
use std::collections::HashSet;

#[test]
fn test_cycle_is_detected_and_grads_untouched() {
    let graph = Graph::<f64>::new();
    let leaf = graph.leaf(1.0);
    // %1 = %0 + %2 and %2 = -%1: only reachable by pushing raw nodes.
    graph.push_node(
        2.0,
        Some(Operation::Add {
            lhs: NodeId(0),
            rhs: NodeId(2),
        }),
    );
    let root = graph.push_node(-2.0, Some(Operation::Neg { input: NodeId(1) }));

    let err = root.backward().unwrap_err();
    assert!(matches!(err, EzgradError::CycleDetected { .. }));
    assert_eq!(err.kind(), ErrorKind::GraphConsistency);
    for id in 0..graph.len() {
        assert_eq!(graph.grad(NodeId(id)), None);
    }
    assert_eq!(leaf.grad(), None);
}

#[test]
fn test_out_of_range_operand_is_dangling() {
    let graph = Graph::<f64>::new();
    let leaf = graph.leaf(1.0);
    let root = graph.push_node(3.0, Some(Operation::Neg { input: NodeId(7) }));

    let err = root.backward().unwrap_err();
    assert_eq!(err, EzgradError::DanglingOperand { node: 1, operand: 7 });
    assert_eq!(err.kind(), ErrorKind::GraphConsistency);
    assert_eq!(leaf.grad(), None);
    assert_eq!(root.grad(), None);
}

#[test]
fn test_failed_pass_keeps_earlier_gradients() -> Result<(), EzgradError> {
    let graph = Graph::new();
    let a = graph.leaf(Array::<f64>::ones(&[2]));
    let b = graph.leaf(Array::<f64>::ones(&[2]));
    (a + b)?.backward()?;
    let before = (a.grad(), b.grad());

    // A node whose value does not have the shape its producer implies: the
    // add rule fails halfway through, after %3 and %4 got pass-local gradients.
    let bad = graph.push_node(
        Array::<f64>::ones(&[3]),
        Some(Operation::Add {
            lhs: a.id(),
            rhs: b.id(),
        }),
    );
    let root = -bad;
    let err = root.backward().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);

    assert_eq!((a.grad(), b.grad()), before);
    assert_eq!(bad.grad(), None);
    assert_eq!(root.grad(), None);
    Ok(())
}

#[test]
fn test_topological_sort_of_diamond() -> Result<(), EzgradError> {
    let graph = Graph::<f64>::new();
    let x = graph.leaf(2.0);
    let a = (x * 3.0)?;
    let b = (x + 1.0)?;
    let y = (a * b)?;

    let order = graph.topological_sort(y.id())?;
    assert_eq!(order.len(), graph.len());
    let unique: HashSet<NodeId> = order.iter().copied().collect();
    assert_eq!(unique.len(), order.len());
    assert_eq!(order.last(), Some(&y.id()));

    let position = |id: NodeId| order.iter().position(|&n| n == id);
    for &id in &order {
        if let Some(op) = graph.producer(id) {
            for operand in op.operands() {
                assert!(position(operand) < position(id), "{} sorted before its operand {}", id, operand);
            }
        }
    }
    Ok(())
}

#[test]
fn test_topological_sort_skips_unreachable_nodes() -> Result<(), EzgradError> {
    let graph = Graph::<f64>::new();
    let x = graph.leaf(1.0);
    let _other = graph.leaf(5.0);
    let y = x.relu();
    assert_eq!(graph.topological_sort(y.id())?, vec![x.id(), y.id()]);
    Ok(())
}

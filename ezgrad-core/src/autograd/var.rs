use crate::autograd::backward_op::Operation;
use crate::autograd::graph::{Graph, NodeId};
use crate::error::EzgradError;
use crate::payload::Payload;
use std::fmt;

/// Handle to a node of a [`Graph`].
///
/// `Var` is `Copy`: it is just the graph reference plus the node id, so the
/// same node can be fed into any number of operations. Composing `Var`s with
/// the operators of `std::ops` or the methods in [`crate::ops`] records new
/// nodes in the graph; [`Var::backward`] then fills in the gradients.
///
/// ```
/// use ezgrad_core::Graph;
///
/// let graph = Graph::<f64>::new();
/// let a = graph.leaf(2.0);
/// let b = graph.leaf(3.0);
/// let c = (a * b).unwrap();
/// c.backward().unwrap();
/// assert_eq!(c.value(), 6.0);
/// assert_eq!(a.grad(), Some(3.0));
/// assert_eq!(b.grad(), Some(2.0));
/// ```
pub struct Var<'g, P: Payload> {
    graph: &'g Graph<P>,
    id: NodeId,
}

impl<'g, P: Payload> Clone for Var<'g, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'g, P: Payload> Copy for Var<'g, P> {}

impl<'g, P: Payload> Var<'g, P> {
    pub(crate) fn new(graph: &'g Graph<P>, id: NodeId) -> Self {
        Var { graph, id }
    }

    /// Creates a leaf node in `graph`. Same as [`Graph::leaf`].
    pub fn leaf(graph: &'g Graph<P>, value: P) -> Self {
        graph.leaf(value)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn graph(&self) -> &'g Graph<P> {
        self.graph
    }

    /// Forward value of the node.
    pub fn value(&self) -> P {
        self.graph.value(self.id)
    }

    /// Accumulated gradient, `None` if no backward pass has reached this node yet.
    pub fn grad(&self) -> Option<P> {
        self.graph.grad(self.id)
    }

    pub fn shape(&self) -> Vec<usize> {
        self.graph.with_value(self.id, |v| v.shape())
    }

    /// The operation that produced this node, `None` for leaves.
    pub fn producer(&self) -> Option<Operation<P::Elem>> {
        self.graph.producer(self.id)
    }

    /// Handles to the operands of the producer, in operand order.
    pub fn operands(&self) -> Vec<Var<'g, P>> {
        self.producer()
            .map(|op| {
                op.operands()
                    .into_iter()
                    .map(|id| Var::new(self.graph, id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_leaf(&self) -> bool {
        self.producer().is_none()
    }

    /// Computes the gradient of this node with respect to every node it depends on.
    ///
    /// The seed is the multiplicative identity shaped like the value (an
    /// array of ones for array payloads, which differentiates the sum of the
    /// elements). Gradients are added onto whatever the nodes already hold;
    /// call [`Var::zero_grad_all`] or [`Graph::zero_grad`] to start afresh.
    ///
    /// # Errors
    /// Returns a graph consistency error if the graph is malformed, or a
    /// shape error raised by a backward rule.
    pub fn backward(&self) -> Result<(), EzgradError> {
        if self.is_leaf() {
            log::debug!("backward() called on leaf {}. Only the seed is accumulated.", self.id);
        }
        self.graph.backward(self.id)
    }

    /// Resets this node's gradient to the additive identity.
    pub fn zero_grad(&self) {
        self.graph.set_zero_grad(self.id);
    }

    /// Resets the gradient of this node and of every node it depends on.
    pub fn zero_grad_all(&self) -> Result<(), EzgradError> {
        let reachable = self.graph.topological_sort(self.id)?;
        log::debug!("Reset gradients of {} nodes from {}", reachable.len(), self.id);
        for id in reachable {
            self.graph.set_zero_grad(id);
        }
        Ok(())
    }

    /// Returns the shared graph of `self` and `other`, or `ForeignNode` if
    /// they were created in different graphs.
    pub(crate) fn same_graph(&self, other: &Var<'g, P>, operation: &str) -> Result<&'g Graph<P>, EzgradError> {
        if std::ptr::eq(self.graph, other.graph) {
            Ok(self.graph)
        } else {
            Err(EzgradError::ForeignNode {
                operation: operation.to_string(),
            })
        }
    }
}

impl<P: Payload> fmt::Debug for Var<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.graph.node(self.id);
        f.debug_struct("Var")
            .field("id", &self.id)
            .field("value", &node.value)
            .field("grad", &node.grad)
            .field("op", &node.producer)
            .finish()
    }
}

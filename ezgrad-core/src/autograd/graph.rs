use crate::autograd::backward_op::Operation;
use crate::autograd::var::Var;
use crate::error::EzgradError;
use crate::payload::Payload;
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;

/// Stable identifier of a node inside its [`Graph`].
///
/// Ids are handed out by a counter owned by the graph, so they increase
/// monotonically in creation order and restart at zero after
/// [`Graph::clear`]. They are used for diagnostics and as arena indices,
/// never to decide evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Arena record of one node.
#[derive(Debug)]
pub(crate) struct NodeData<P: Payload> {
    /// Forward value. Never modified after the node is pushed.
    pub(crate) value: P,
    /// Accumulated gradient; `None` until a backward pass or a reset touches it.
    pub(crate) grad: Option<P>,
    /// `None` for leaves.
    pub(crate) producer: Option<Operation<P::Elem>>,
}

/// A computation graph session.
///
/// Owns every node created through it. Handles ([`Var`]) borrow the graph, so
/// no handle can outlive the nodes it points to. The graph is built
/// dynamically: each operation on `Var`s pushes exactly one new node whose
/// operands already exist, which keeps the graph acyclic by construction.
///
/// Single-threaded by design (`RefCell`, not `Sync`).
pub struct Graph<P: Payload> {
    nodes: RefCell<Vec<NodeData<P>>>,
}

impl<P: Payload> Default for Graph<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload> Graph<P> {
    pub fn new() -> Self {
        Graph {
            nodes: RefCell::new(Vec::new()),
        }
    }

    /// Creates a leaf node holding a user supplied value.
    pub fn leaf(&self, value: P) -> Var<'_, P> {
        self.push_node(value, None)
    }

    /// Number of nodes created since the graph was built or last cleared.
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Drops every node and restarts the id counter at zero.
    ///
    /// Requires exclusive access, so no `Var` of this graph can still be alive.
    pub fn clear(&mut self) {
        let nodes = self.nodes.get_mut();
        log::debug!("Clearing graph with {} nodes", nodes.len());
        nodes.clear();
    }

    /// Resets the gradient of every node to the additive identity.
    pub fn zero_grad(&self) {
        let mut nodes = self.nodes.borrow_mut();
        for node in nodes.iter_mut() {
            node.grad = Some(node.value.zeros_like());
        }
        log::debug!("Reset gradients of {} nodes", nodes.len());
    }

    // --- Crate internal accessors used by Var and the ops ---

    pub(crate) fn push_node(&self, value: P, producer: Option<Operation<P::Elem>>) -> Var<'_, P> {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(NodeData {
            value,
            grad: None,
            producer,
        });
        Var::new(self, id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Ref<'_, NodeData<P>> {
        Ref::map(self.nodes.borrow(), |nodes| &nodes[id.0])
    }

    pub(crate) fn value(&self, id: NodeId) -> P {
        self.node(id).value.clone()
    }

    pub(crate) fn grad(&self, id: NodeId) -> Option<P> {
        self.node(id).grad.clone()
    }

    pub(crate) fn producer(&self, id: NodeId) -> Option<Operation<P::Elem>> {
        self.node(id).producer
    }

    pub(crate) fn set_zero_grad(&self, id: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[id.0];
        node.grad = Some(node.value.zeros_like());
    }

    /// Runs `f` on the value of one node without cloning it.
    pub(crate) fn with_value<R>(&self, id: NodeId, f: impl FnOnce(&P) -> R) -> R {
        f(&self.node(id).value)
    }

    /// Runs `f` on the values of two nodes without cloning them.
    pub(crate) fn with_values<R>(&self, a: NodeId, b: NodeId, f: impl FnOnce(&P, &P) -> R) -> R {
        let nodes = self.nodes.borrow();
        f(&nodes[a.0].value, &nodes[b.0].value)
    }

    /// Post-order of every node reachable from `root` through operand edges.
    ///
    /// Operands always come before the nodes that consume them and each node
    /// appears exactly once, however many consumers reference it. The walk
    /// uses an explicit stack so deep chains cannot overflow the call stack.
    pub(crate) fn topological_sort(&self, root: NodeId) -> Result<Vec<NodeId>, EzgradError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            InProgress,
            Done,
        }

        let nodes = self.nodes.borrow();
        if root.0 >= nodes.len() {
            return Err(EzgradError::DanglingOperand {
                node: root.0,
                operand: root.0,
            });
        }

        let mut marks: HashMap<NodeId, Mark> = HashMap::new();
        let mut sorted = Vec::new();
        // (node, operands already pushed)
        let mut stack = vec![(root, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                marks.insert(id, Mark::Done);
                sorted.push(id);
                continue;
            }
            match marks.get(&id) {
                Some(Mark::Done) => continue,
                // Still open below us on the stack: we came back to it through its own operands.
                Some(Mark::InProgress) => return Err(EzgradError::CycleDetected { node: id.0 }),
                None => {}
            }
            marks.insert(id, Mark::InProgress);
            stack.push((id, true));

            if let Some(op) = nodes[id.0].producer {
                // Reversed so the first operand is visited first.
                for operand in op.operands().into_iter().rev() {
                    if operand.0 >= nodes.len() {
                        return Err(EzgradError::DanglingOperand {
                            node: id.0,
                            operand: operand.0,
                        });
                    }
                    if marks.get(&operand) != Some(&Mark::Done) {
                        stack.push((operand, false));
                    }
                }
            }
        }
        Ok(sorted)
    }

    /// Backpropagates from `root` and accumulates into every reachable node's `grad`.
    ///
    /// Gradients of this pass are summed in a pass-local map, in reverse
    /// topological order, so each node's producer only runs once its gradient
    /// has received every contribution. The map is added onto the stored
    /// gradients at the end; a failing pass leaves them untouched.
    pub(crate) fn backward(&self, root: NodeId) -> Result<(), EzgradError> {
        let sorted = self.topological_sort(root)?;
        log::debug!(
            "Backward from node {} over {} reachable nodes",
            root,
            sorted.len()
        );

        let mut grad_map: HashMap<NodeId, P> = HashMap::with_capacity(sorted.len());
        {
            let nodes = self.nodes.borrow();
            grad_map.insert(root, nodes[root.0].value.ones_like());

            for &id in sorted.iter().rev() {
                let op = match nodes[id.0].producer {
                    Some(op) => op,
                    None => continue,
                };
                let grad_output = grad_map
                    .get(&id)
                    .ok_or(EzgradError::MissingGradient { node: id.0 })?;
                log::trace!("Propagating through {} at node {}", op, id);

                let input_grads = op.backward(id, &nodes, grad_output)?;
                let input_ids = op.operands();
                if input_grads.len() != input_ids.len() {
                    return Err(EzgradError::GradientCountMismatch {
                        operation: op.name().to_string(),
                        expected: input_ids.len(),
                        actual: input_grads.len(),
                    });
                }

                for (input_id, grad) in input_ids.into_iter().zip(input_grads) {
                    let expected = nodes[input_id.0].value.shape();
                    if grad.shape() != expected {
                        return Err(EzgradError::GradientShapeMismatch {
                            node: input_id.0,
                            expected,
                            actual: grad.shape(),
                        });
                    }
                    let summed = match grad_map.remove(&input_id) {
                        Some(existing) => existing.add_elems(&grad)?,
                        None => grad,
                    };
                    grad_map.insert(input_id, summed);
                }
            }
        }

        let mut nodes = self.nodes.borrow_mut();
        for (id, grad) in grad_map {
            let node = &mut nodes[id.0];
            node.grad = Some(match node.grad.take() {
                Some(existing) => existing.add_elems(&grad)?,
                None => grad,
            });
        }
        Ok(())
    }
}

impl<P: Payload> fmt::Debug for Graph<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph").field("nodes", &self.len()).finish()
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;

//! Graphviz export of a computed graph.

use crate::autograd::var::Var;
use crate::error::EzgradError;
use crate::payload::Payload;
use std::fmt::Write;

/// Renders every node reachable from `root` as a DOT digraph, top to bottom.
///
/// Value nodes are boxes labelled with their value and gradient; each
/// produced node also gets an ellipse holding its operation symbol, with
/// edges operand -> operation -> result. Read-only: the graph is not touched.
pub fn render_dot<P: Payload>(root: Var<'_, P>) -> Result<String, EzgradError> {
    let graph = root.graph();
    let order = graph.topological_sort(root.id())?;

    let mut out = String::from("digraph {\n    rankdir=TB;\n");
    for id in &order {
        let node = graph.node(*id);
        let grad = node
            .grad
            .as_ref()
            .map_or_else(|| "none".to_string(), format_payload);
        // `fmt::Write` on a String cannot fail.
        let _ = writeln!(
            out,
            "    n{} [shape=box, label=\"val: {}\\ngrad: {}\"];",
            id.index(),
            format_payload(&node.value),
            grad
        );
        if let Some(op) = node.producer {
            let _ = writeln!(out, "    n{}_op [label=\"{}\"];", id.index(), op.symbol());
            let _ = writeln!(out, "    n{}_op -> n{};", id.index(), id.index());
            for operand in op.operands() {
                let _ = writeln!(out, "    n{} -> n{}_op;", operand.index(), id.index());
            }
        }
    }
    out.push_str("}\n");
    log::debug!("Rendered {} nodes to DOT", order.len());
    Ok(out)
}

fn format_payload<P: Payload>(payload: &P) -> String {
    let elems = payload.to_elems();
    if payload.shape().is_empty() {
        if let Some(x) = elems.first() {
            return format!("{:.4}", x);
        }
    }
    let body: Vec<String> = elems.iter().map(|x| format!("{:.4}", x)).collect();
    format!("[{}] {:?}", body.join(", "), payload.shape())
}

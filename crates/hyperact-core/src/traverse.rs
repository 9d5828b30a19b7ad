//! Drive one action over every element of a graph.

use std::sync::Arc;

use crate::action::ActionRef;
use crate::element::{Element, HyperGraph};
use crate::param::Parameters;

fn selected(element: &dyn Element, type_filter: Option<&str>) -> bool {
    match type_filter {
        None | Some("") => true,
        Some(tag) => element.type_tag() == tag,
    }
}

/// Invoke `action` on every vertex, then every edge, in graph order.
///
/// With a non-empty `type_filter` only elements carrying that type tag are
/// visited. Results are discarded and the walk never stops early.
pub fn apply_action(
    graph: &mut dyn HyperGraph,
    action: &ActionRef,
    params: Option<&dyn Parameters>,
    type_filter: Option<&str>,
) {
    for vertex in graph.vertices_mut() {
        if selected(vertex, type_filter) {
            Arc::clone(action).call_mut(vertex, params);
        }
    }
    for edge in graph.edges_mut() {
        if selected(edge, type_filter) {
            Arc::clone(action).call_mut(edge, params);
        }
    }
}

/// Read-only variant of [`apply_action`].
pub fn apply_action_ref(
    graph: &dyn HyperGraph,
    action: &ActionRef,
    params: Option<&dyn Parameters>,
    type_filter: Option<&str>,
) {
    for element in graph.vertices().chain(graph.edges()) {
        if selected(element, type_filter) {
            Arc::clone(action).call(element, params);
        }
    }
}

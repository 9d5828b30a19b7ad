use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use hyperact_core::{
    ActionLibrary, ActionRef, Element, ElementAction, ElementGraph, HyperGraph, Parameters,
    apply_action, apply_action_ref,
};

struct Node {
    tag: &'static str,
    id: &'static str,
    visits: usize,
}

fn node(tag: &'static str, id: &'static str) -> Box<dyn Element> {
    Box::new(Node { tag, id, visits: 0 })
}

impl Element for Node {
    fn type_tag(&self) -> &str {
        self.tag
    }
}

/// Records the id of every node it is called on and bumps its visit count.
struct Recorder {
    name: &'static str,
    type_tag: &'static str,
    seen: Arc<Mutex<Vec<&'static str>>>,
}

impl ElementAction for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn type_tag(&self) -> &str {
        self.type_tag
    }

    fn call(
        self: Arc<Self>,
        element: &dyn Element,
        _params: Option<&dyn Parameters>,
    ) -> Option<ActionRef> {
        let node = element.as_any().downcast_ref::<Node>()?;
        self.seen.lock().push(node.id);
        Some(self as ActionRef)
    }

    fn call_mut(
        self: Arc<Self>,
        element: &mut dyn Element,
        _params: Option<&dyn Parameters>,
    ) -> Option<ActionRef> {
        let node = element.as_any_mut().downcast_mut::<Node>()?;
        node.visits += 1;
        self.seen.lock().push(node.id);
        Some(self as ActionRef)
    }
}

fn recorder(type_tag: &'static str) -> (ActionRef, Arc<Mutex<Vec<&'static str>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let action = Arc::new(Recorder {
        name: "record",
        type_tag,
        seen: seen.clone(),
    });
    (action, seen)
}

fn sample_graph() -> ElementGraph {
    let mut graph = ElementGraph::new();
    graph.add_vertex(node("A", "a1"));
    graph.add_vertex(node("B", "b1"));
    graph.add_vertex(node("A", "a2"));
    graph.add_vertex(node("B", "b2"));
    graph.add_vertex(node("A", "a3"));
    graph.add_edge(node("E", "e1"));
    graph.add_edge(node("A", "e2"));
    graph
}

#[test]
fn unfiltered_walk_visits_vertices_then_edges_once() {
    let mut graph = sample_graph();
    let (action, seen) = recorder("");

    apply_action(&mut graph, &action, None, None);

    assert_eq!(
        *seen.lock(),
        vec!["a1", "b1", "a2", "b2", "a3", "e1", "e2"]
    );
    assert!(
        graph
            .vertices()
            .chain(graph.edges())
            .all(|e| e.as_any().downcast_ref::<Node>().unwrap().visits == 1)
    );
}

#[test]
fn empty_filter_means_no_filter() {
    let mut graph = sample_graph();
    let (action, seen) = recorder("");

    apply_action(&mut graph, &action, None, Some(""));
    assert_eq!(seen.lock().len(), 7);
}

#[test]
fn filter_selects_matching_type_tag_only() {
    let mut graph = ElementGraph::new();
    for id in ["a1", "a2", "a3"] {
        graph.add_vertex(node("A", id));
    }
    for id in ["b1", "b2"] {
        graph.add_vertex(node("B", id));
    }
    let (action, seen) = recorder("");

    apply_action(&mut graph, &action, None, Some("A"));
    assert_eq!(*seen.lock(), vec!["a1", "a2", "a3"]);
}

#[test]
fn filter_applies_to_edges_too() {
    let graph = sample_graph();
    let (action, seen) = recorder("");

    apply_action_ref(&graph, &action, None, Some("E"));
    assert_eq!(*seen.lock(), vec!["e1"]);
}

#[test]
fn collection_routes_each_element_to_its_type() {
    let library = ActionLibrary::new();
    let (on_a, seen_a) = recorder("A");
    let (on_e, seen_e) = recorder("E");
    library.register_action(on_a);
    library.register_action(on_e);
    let record = library.action_by_name("record").unwrap();

    let mut graph = sample_graph();
    apply_action(&mut graph, &record, None, None);

    assert_eq!(*seen_a.lock(), vec!["a1", "a2", "a3", "e2"]);
    assert_eq!(*seen_e.lock(), vec!["e1"]);
}

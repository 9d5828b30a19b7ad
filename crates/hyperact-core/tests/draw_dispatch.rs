use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serial_test::serial;

use hyperact_core::{
    ActionLibrary, ActionRef, CacheContainer, DRAW_ACTION_NAME, DrawAction, DrawParameters,
    Element, ElementAction, ElementGraph, Parameters, PropertyMap, UserData, apply_action,
    same_action,
};

type Log = Arc<Mutex<Vec<String>>>;

struct Vertex {
    id: u32,
    caches: CacheContainer,
    data: Option<UserData>,
}

impl Element for Vertex {
    fn type_tag(&self) -> &str {
        "vertex"
    }

    fn caches(&self) -> Option<&CacheContainer> {
        Some(&self.caches)
    }

    fn user_data(&self) -> Option<&UserData> {
        self.data.as_ref()
    }
}

struct Cache(&'static str);

impl Element for Cache {
    fn type_tag(&self) -> &str {
        "cache"
    }
}

struct Note(&'static str);

impl Element for Note {
    fn type_tag(&self) -> &str {
        "note"
    }
}

/// Draws vertices and recurses into their caches and user data.
struct VertexDraw {
    base: DrawAction,
    log: Log,
}

impl ElementAction for VertexDraw {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn type_tag(&self) -> &str {
        self.base.type_tag()
    }

    fn call(
        self: Arc<Self>,
        element: &dyn Element,
        params: Option<&dyn Parameters>,
    ) -> Option<ActionRef> {
        let vertex = element.as_any().downcast_ref::<Vertex>()?;
        self.base.refresh_property_ptrs(params);
        if !self.base.is_shown() {
            return Some(self as ActionRef);
        }
        self.log.lock().push(format!("vertex:{}", vertex.id));
        self.base.ensure_draw_dispatcher();
        self.base.dispatch_caches(element.caches(), params);
        self.base.dispatch_user_data(element.user_data(), params);
        Some(self as ActionRef)
    }

    fn call_mut(
        self: Arc<Self>,
        element: &mut dyn Element,
        params: Option<&dyn Parameters>,
    ) -> Option<ActionRef> {
        self.call(element, params)
    }
}

/// Draws leaf elements by logging `<type_tag>:<label>`.
struct LeafDraw {
    base: DrawAction,
    log: Log,
}

impl ElementAction for LeafDraw {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn type_tag(&self) -> &str {
        self.base.type_tag()
    }

    fn call(
        self: Arc<Self>,
        element: &dyn Element,
        _params: Option<&dyn Parameters>,
    ) -> Option<ActionRef> {
        let label = if let Some(cache) = element.as_any().downcast_ref::<Cache>() {
            cache.0
        } else {
            element.as_any().downcast_ref::<Note>()?.0
        };
        self.log
            .lock()
            .push(format!("{}:{}", element.type_tag(), label));
        Some(self as ActionRef)
    }
}

fn vertex(id: u32) -> Vertex {
    let mut caches = CacheContainer::new();
    caches.insert("b", Box::new(Cache("c2")));
    caches.insert("a", Box::new(Cache("c1")));
    let mut data = UserData::new(Box::new(Note("n1")));
    data.append(UserData::new(Box::new(Note("n2"))));
    Vertex {
        id,
        caches,
        data: Some(data),
    }
}

struct Registered {
    vertex: ActionRef,
    cache: ActionRef,
    note: ActionRef,
    log: Log,
}

fn register_draw_actions() -> Registered {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let vertex: ActionRef = Arc::new(VertexDraw {
        base: DrawAction::new("vertex"),
        log: log.clone(),
    });
    let cache: ActionRef = Arc::new(LeafDraw {
        base: DrawAction::new("cache"),
        log: log.clone(),
    });
    let note: ActionRef = Arc::new(LeafDraw {
        base: DrawAction::new("note"),
        log: log.clone(),
    });
    let library = ActionLibrary::instance();
    assert!(library.register_action(vertex.clone()));
    assert!(library.register_action(cache.clone()));
    assert!(library.register_action(note.clone()));
    Registered {
        vertex,
        cache,
        note,
        log,
    }
}

#[test]
#[serial]
fn draw_recurses_into_caches_and_user_data() {
    ActionLibrary::destroy();
    let registered = register_draw_actions();
    let draw = ActionLibrary::instance()
        .action_by_name(DRAW_ACTION_NAME)
        .unwrap();

    let mut graph = ElementGraph::new();
    graph.add_vertex(Box::new(vertex(1)));
    graph.add_vertex(Box::new(vertex(2)));
    let params = DrawParameters::new();
    apply_action(&mut graph, &draw, Some(&params), None);

    assert_eq!(
        *registered.log.lock(),
        vec![
            "vertex:1", "cache:c1", "cache:c2", "note:n1", "note:n2", "vertex:2", "cache:c1",
            "cache:c2", "note:n1", "note:n2",
        ]
    );
    ActionLibrary::destroy();
}

#[test]
#[serial]
fn hidden_type_is_skipped() {
    ActionLibrary::destroy();
    let registered = register_draw_actions();
    let draw = ActionLibrary::instance()
        .action_by_name(DRAW_ACTION_NAME)
        .unwrap();

    let mut graph = ElementGraph::new();
    graph.add_vertex(Box::new(vertex(1)));
    let params = DrawParameters::new();
    params
        .property_map()
        .make_property("vertex::SHOW", true)
        .unwrap();
    params.property_map().update_from_str("vertex::SHOW=false").unwrap();
    apply_action(&mut graph, &draw, Some(&params), None);

    assert!(registered.log.lock().is_empty());
    ActionLibrary::destroy();
}

#[derive(Default)]
struct CountingParameters {
    properties: PropertyMap,
    fetches: AtomicUsize,
}

impl Parameters for CountingParameters {
    fn properties(&self) -> Option<&PropertyMap> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Some(&self.properties)
    }
}

#[test]
#[serial]
fn one_refresh_per_parameters_object_across_a_pass() {
    ActionLibrary::destroy();
    let registered = register_draw_actions();
    let draw = ActionLibrary::instance()
        .action_by_name(DRAW_ACTION_NAME)
        .unwrap();

    let mut graph = ElementGraph::new();
    for id in 0..4 {
        graph.add_vertex(Box::new(vertex(id)));
    }

    let first = CountingParameters::default();
    apply_action(&mut graph, &draw, Some(&first), None);
    apply_action(&mut graph, &draw, Some(&first), None);
    assert_eq!(first.fetches.load(Ordering::SeqCst), 1);

    let second = CountingParameters::default();
    apply_action(&mut graph, &draw, Some(&second), None);
    assert_eq!(second.fetches.load(Ordering::SeqCst), 1);
    assert!(first.properties.contains("vertex::SHOW"));
    assert!(second.properties.contains("vertex::SHOW"));

    drop(registered);
    ActionLibrary::destroy();
}

#[test]
#[serial]
fn unregistering_every_member_drops_the_collection() {
    ActionLibrary::destroy();
    let registered = register_draw_actions();
    let library = ActionLibrary::instance();

    library.unregister_action(&registered.cache);
    library.unregister_action(&registered.note);
    let tags = library
        .action_by_name(DRAW_ACTION_NAME)
        .and_then(|entry| entry.as_collection().map(|c| c.type_tags()))
        .unwrap();
    assert_eq!(tags, vec!["vertex"]);

    library.unregister_action(&registered.vertex);
    assert!(library.action_by_name(DRAW_ACTION_NAME).is_none());
    ActionLibrary::destroy();
}

#[test]
#[serial]
fn held_dispatcher_keeps_working_after_library_teardown() {
    ActionLibrary::destroy();
    let registered = register_draw_actions();
    let draw = ActionLibrary::instance()
        .action_by_name(DRAW_ACTION_NAME)
        .unwrap();
    let mut graph = ElementGraph::new();
    graph.add_vertex(Box::new(vertex(7)));
    let params = DrawParameters::new();
    apply_action(&mut graph, &draw, Some(&params), None);

    // `draw` still owns the collection, so the cached handle stays live.
    ActionLibrary::destroy();
    assert!(ActionLibrary::instance().is_empty());
    registered.log.lock().clear();
    apply_action(&mut graph, &draw, Some(&params), None);

    assert_eq!(registered.log.lock().len(), 5);
    ActionLibrary::destroy();
}

#[test]
#[serial]
fn destroy_releases_draw_actions_after_dispatch() {
    ActionLibrary::destroy();
    let registered = register_draw_actions();
    let vertex_action = Arc::downgrade(&registered.vertex);
    let leaf_action = Arc::downgrade(&registered.cache);
    let log = registered.log.clone();
    drop(registered);

    let draw = ActionLibrary::instance()
        .action_by_name(DRAW_ACTION_NAME)
        .unwrap();
    let collection = Arc::downgrade(&draw);
    let mut graph = ElementGraph::new();
    graph.add_vertex(Box::new(vertex(3)));
    let params = DrawParameters::new();
    apply_action(&mut graph, &draw, Some(&params), None);
    assert_eq!(log.lock().len(), 5);
    drop(draw);

    ActionLibrary::destroy();
    assert!(collection.upgrade().is_none());
    assert!(vertex_action.upgrade().is_none());
    assert!(leaf_action.upgrade().is_none());
}

#[test]
#[serial]
fn dispatcher_is_resolved_again_after_teardown() {
    ActionLibrary::destroy();
    let action = DrawAction::new("vertex");
    let first = register_draw_actions();
    assert!(action.ensure_draw_dispatcher().is_some());
    drop(first);
    ActionLibrary::destroy();

    // The released collection no longer resolves.
    assert!(ActionLibrary::instance().is_empty());
    assert!(action.ensure_draw_dispatcher().is_none());

    let second = register_draw_actions();
    let current = ActionLibrary::instance()
        .action_by_name(DRAW_ACTION_NAME)
        .unwrap();
    let resolved = action.ensure_draw_dispatcher().unwrap();
    assert!(same_action(&resolved, &current));
    drop(second);
    ActionLibrary::destroy();
}

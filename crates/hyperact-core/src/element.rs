//! Capability interfaces for the graph that actions run over.
//!
//! The dispatch core never sees concrete vertex or edge types. Everything it
//! needs is reachable through [`Element`]: the runtime type tag used as the
//! dispatch key, the caches attached to the element, and its user data chain.

use std::any::Any;
use std::collections::BTreeMap;

/// Gives trait objects access to `Any` so actions can recover the concrete type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A vertex, an edge, a cache or a user data payload.
pub trait Element: AsAny {
    /// Stable identifier of the element's runtime type.
    fn type_tag(&self) -> &str;

    fn caches(&self) -> Option<&CacheContainer> {
        None
    }

    /// Head of the user data chain attached to this element.
    fn user_data(&self) -> Option<&UserData> {
        None
    }
}

/// Named auxiliary objects attached to an element.
#[derive(Default)]
pub struct CacheContainer {
    caches: BTreeMap<String, Box<dyn Element>>,
}

impl CacheContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cache under `key`, returning the one it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        cache: Box<dyn Element>,
    ) -> Option<Box<dyn Element>> {
        self.caches.insert(key.into(), cache)
    }

    pub fn get(&self, key: &str) -> Option<&dyn Element> {
        self.caches.get(key).map(|cache| cache.as_ref())
    }

    pub fn remove(&mut self, key: &str) -> Option<Box<dyn Element>> {
        self.caches.remove(key)
    }

    /// Caches in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Element)> {
        self.caches
            .iter()
            .map(|(key, cache)| (key.as_str(), cache.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.caches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }
}

/// One record of a singly linked user data chain.
///
/// The payload is what gets dispatched on; the chain owns its tail, so it
/// can never loop back on itself.
pub struct UserData {
    payload: Box<dyn Element>,
    next: Option<Box<UserData>>,
}

impl UserData {
    pub fn new(payload: Box<dyn Element>) -> Self {
        Self {
            payload,
            next: None,
        }
    }

    pub fn payload(&self) -> &dyn Element {
        self.payload.as_ref()
    }

    pub fn next(&self) -> Option<&UserData> {
        self.next.as_deref()
    }

    /// Append a record at the end of the chain.
    pub fn append(&mut self, record: UserData) {
        match self.next.as_deref_mut() {
            Some(next) => next.append(record),
            None => self.next = Some(Box::new(record)),
        }
    }

    /// Walk the chain starting at this record.
    pub fn iter(&self) -> impl Iterator<Item = &UserData> {
        std::iter::successors(Some(self), |record| record.next())
    }
}

/// A graph exposing its vertices and edges in a deterministic order.
pub trait HyperGraph {
    fn vertices(&self) -> Box<dyn Iterator<Item = &dyn Element> + '_>;

    fn edges(&self) -> Box<dyn Iterator<Item = &dyn Element> + '_>;

    fn vertices_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn Element> + '_>;

    fn edges_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn Element> + '_>;
}

/// Vector-backed graph; iteration follows insertion order.
#[derive(Default)]
pub struct ElementGraph {
    vertices: Vec<Box<dyn Element>>,
    edges: Vec<Box<dyn Element>>,
}

impl ElementGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: Box<dyn Element>) {
        self.vertices.push(vertex);
    }

    pub fn add_edge(&mut self, edge: Box<dyn Element>) {
        self.edges.push(edge);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl HyperGraph for ElementGraph {
    fn vertices(&self) -> Box<dyn Iterator<Item = &dyn Element> + '_> {
        Box::new(self.vertices.iter().map(|v| &**v as &dyn Element))
    }

    fn edges(&self) -> Box<dyn Iterator<Item = &dyn Element> + '_> {
        Box::new(self.edges.iter().map(|e| &**e as &dyn Element))
    }

    fn vertices_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn Element> + '_> {
        Box::new(self.vertices.iter_mut().map(|v| &mut **v as &mut dyn Element))
    }

    fn edges_mut(&mut self) -> Box<dyn Iterator<Item = &mut dyn Element> + '_> {
        Box::new(self.edges.iter_mut().map(|e| &mut **e as &mut dyn Element))
    }
}

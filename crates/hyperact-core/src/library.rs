//! Process-wide registry of action collections.
//!
//! The registry is reached through [`ActionLibrary::instance`] and torn down
//! with [`ActionLibrary::destroy`]. Every top-level entry is expected to be an
//! [`ActionCollection`]; registering never creates anything else.
//!
//! Each call locks only for the map access it performs. Sequences of calls
//! are not atomic, and callers sharing the library across threads must
//! serialize them externally.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock, const_mutex};

use crate::Error;
use crate::action::{ActionRef, ElementAction};
use crate::collection::ActionCollection;

static INSTANCE: Mutex<Option<Arc<ActionLibrary>>> = const_mutex(None);

#[derive(Default)]
pub struct ActionLibrary {
    actions: RwLock<HashMap<String, ActionRef>>,
}

impl ActionLibrary {
    /// An empty, standalone library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide library, created on first use.
    pub fn instance() -> Arc<ActionLibrary> {
        let mut slot = INSTANCE.lock();
        Arc::clone(slot.get_or_insert_with(|| Arc::new(ActionLibrary::new())))
    }

    /// Drop the process-wide library. The next `instance()` starts empty.
    ///
    /// Handles obtained earlier stay usable but no longer reach the registry.
    pub fn destroy() {
        let released = INSTANCE.lock().take();
        drop(released);
    }

    /// The top-level entry registered under `name`.
    pub fn action_by_name(&self, name: &str) -> Option<ActionRef> {
        self.actions.read().get(name).cloned()
    }

    /// Register `action` into the collection named after it.
    ///
    /// The collection is created on demand. Fails without touching the
    /// registry when the name is taken by something that is not a collection.
    pub fn register_action(&self, action: ActionRef) -> bool {
        let mut actions = self.actions.write();
        if let Some(existing) = actions.get(action.name()) {
            let Some(collection) = existing.as_collection() else {
                let err = Error::invariant_violation(
                    "fatal error, a collection is not at the first level in the library",
                )
                .with_operation("action_library::register_action")
                .with_context("name", action.name());
                tracing::error!(
                    error = %err,
                    fatal = err.kind().is_fatal(),
                    "rejected action registration"
                );
                return false;
            };
            return collection.register_action(action);
        }

        #[cfg(feature = "debug-actionlib")]
        tracing::debug!(name = action.name(), "creating collection");
        let collection = Arc::new(ActionCollection::new(action.name()));
        actions.insert(action.name().to_string(), collection.clone());
        collection.register_action(action)
    }

    /// Remove `action` from every collection holding it.
    ///
    /// Collections left empty are dropped. Always returns `true`, whether or
    /// not the action was found.
    pub fn unregister_action(&self, action: &ActionRef) -> bool {
        let mut actions = self.actions.write();
        let mut emptied = Vec::new();
        for (name, entry) in actions.iter() {
            if let Some(collection) = entry.as_collection() {
                collection.unregister_action(action);
                if collection.is_empty() {
                    emptied.push(name.clone());
                }
            }
        }
        for name in emptied {
            actions.remove(&name);
        }
        true
    }

    /// Place `entry` at the top level verbatim, replacing what was there.
    ///
    /// Unlike [`register_action`](Self::register_action) this performs no
    /// grouping; a plain action inserted here blocks later registrations
    /// under its name.
    pub fn insert_entry(&self, entry: ActionRef) -> Option<ActionRef> {
        self.actions
            .write()
            .insert(entry.name().to_string(), entry)
    }

    /// Names of all top-level entries, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.actions.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.actions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.read().is_empty()
    }
}

impl std::fmt::Debug for ActionLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionLibrary")
            .field("names", &self.names())
            .finish()
    }
}

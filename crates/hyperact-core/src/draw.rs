//! Shared machinery for the `draw` action family.
//!
//! A concrete draw action embeds a [`DrawAction`] and, on each call:
//! refreshes its cached SHOW toggle from the parameters, checks
//! [`DrawAction::is_shown`], then forwards the same parameters to the
//! element's caches and user data through the library's `draw` collection.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::action::{ActionRef, ElementAction};
use crate::element::{CacheContainer, UserData};
use crate::library::ActionLibrary;
use crate::param::{BoolProperty, Parameters, parameters_id};

pub const DRAW_ACTION_NAME: &str = "draw";

#[derive(Default)]
struct DrawState {
    /// Identity of the parameters the properties below were read from.
    previous_params: Option<usize>,
    show: Option<Arc<BoolProperty>>,
    /// Non-owning; the library owns the collection, which owns this action.
    dispatcher: Option<Weak<dyn ElementAction>>,
}

pub struct DrawAction {
    type_tag: String,
    state: Mutex<DrawState>,
}

impl DrawAction {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            state: Mutex::new(DrawState::default()),
        }
    }

    /// Name of the SHOW toggle this action reads, `"<type_tag>::SHOW"`.
    pub fn show_property_name(&self) -> String {
        format!("{}::SHOW", self.type_tag)
    }

    /// Re-read property handles if `params` is a different object than last time.
    ///
    /// Returns `false` when nothing changed. Parameters without a property
    /// sheet clear the cached handles.
    pub fn refresh_property_ptrs(&self, params: Option<&dyn Parameters>) -> bool {
        let mut state = self.state.lock();
        if state.previous_params == parameters_id(params) {
            return false;
        }
        match params.and_then(|p| p.properties()) {
            Some(properties) => {
                state.previous_params = parameters_id(params);
                state.show = properties.make_property(&self.show_property_name(), true);
            }
            None => {
                state.previous_params = None;
                state.show = None;
            }
        }
        true
    }

    /// Current value of the cached SHOW toggle; `false` when unresolved.
    pub fn is_shown(&self) -> bool {
        self.state
            .lock()
            .show
            .as_ref()
            .is_some_and(|show| show.value())
    }

    /// Resolve the library's `draw` entry on first need and keep a weak handle to it.
    ///
    /// A handle whose collection has been released counts as unresolved.
    pub fn ensure_draw_dispatcher(&self) -> Option<ActionRef> {
        let mut state = self.state.lock();
        if let Some(dispatcher) = state.dispatcher.as_ref().and_then(Weak::upgrade) {
            return Some(dispatcher);
        }
        let dispatcher = ActionLibrary::instance().action_by_name(DRAW_ACTION_NAME);
        state.dispatcher = dispatcher.as_ref().map(Arc::downgrade);
        dispatcher
    }

    fn dispatcher(&self) -> Option<ActionRef> {
        self.state.lock().dispatcher.as_ref().and_then(Weak::upgrade)
    }

    /// Draw every cache attached to an element.
    pub fn dispatch_caches(
        &self,
        caches: Option<&CacheContainer>,
        params: Option<&dyn Parameters>,
    ) {
        let (Some(caches), Some(dispatcher)) = (caches, self.dispatcher()) else {
            return;
        };
        for (_, cache) in caches.iter() {
            Arc::clone(&dispatcher).call(cache, params);
        }
    }

    /// Draw each record of a user data chain, head first.
    pub fn dispatch_user_data(
        &self,
        first: Option<&UserData>,
        params: Option<&dyn Parameters>,
    ) {
        let (Some(first), Some(dispatcher)) = (first, self.dispatcher()) else {
            return;
        };
        for record in first.iter() {
            Arc::clone(&dispatcher).call(record.payload(), params);
        }
    }
}

impl ElementAction for DrawAction {
    fn name(&self) -> &str {
        DRAW_ACTION_NAME
    }

    fn type_tag(&self) -> &str {
        &self.type_tag
    }
}

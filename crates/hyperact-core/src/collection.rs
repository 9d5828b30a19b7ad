use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::Error;
use crate::action::{ActionRef, ElementAction, same_action};
use crate::element::Element;
use crate::param::Parameters;

/// All actions sharing one name, sharded by the element type they handle.
///
/// A collection is itself an action: calling it forwards to the member
/// registered for the element's type tag.
pub struct ActionCollection {
    name: String,
    actions: RwLock<HashMap<String, ActionRef>>,
}

impl ActionCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: RwLock::new(HashMap::new()),
        }
    }

    /// Insert `action` under its type tag, replacing any previous member.
    ///
    /// A name mismatch is logged but does not stop the insertion.
    pub fn register_action(&self, action: ActionRef) -> bool {
        #[cfg(feature = "debug-actionlib")]
        tracing::debug!(
            name = action.name(),
            type_tag = action.type_tag(),
            "registering action"
        );
        if action.name() != self.name {
            let err = Error::name_mismatch(self.name.as_str(), action.name())
                .with_operation("action_collection::register_action");
            tracing::error!(
                error = %err,
                fatal = err.kind().is_fatal(),
                "action registered into a foreign collection"
            );
        }
        self.actions
            .write()
            .insert(action.type_tag().to_string(), action);
        true
    }

    /// Remove `action` if this exact instance is a member.
    pub fn unregister_action(&self, action: &ActionRef) -> bool {
        let mut actions = self.actions.write();
        let key = actions
            .iter()
            .find(|(_, member)| same_action(member, action))
            .map(|(type_tag, _)| type_tag.clone());
        match key {
            Some(type_tag) => actions.remove(&type_tag).is_some(),
            None => false,
        }
    }

    /// The member handling `type_tag`, if any.
    pub fn action_for(&self, type_tag: &str) -> Option<ActionRef> {
        self.actions.read().get(type_tag).cloned()
    }

    pub fn type_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.actions.read().keys().cloned().collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.actions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.read().is_empty()
    }

    /// Run the member matching `element`'s type tag.
    pub fn dispatch(
        &self,
        element: &dyn Element,
        params: Option<&dyn Parameters>,
    ) -> Option<ActionRef> {
        // The member is cloned out so no lock is held while it runs.
        let action = self.action_for(element.type_tag())?;
        action.call(element, params)
    }

    pub fn dispatch_mut(
        &self,
        element: &mut dyn Element,
        params: Option<&dyn Parameters>,
    ) -> Option<ActionRef> {
        let action = self.action_for(element.type_tag())?;
        action.call_mut(element, params)
    }
}

impl ElementAction for ActionCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_tag(&self) -> &str {
        ""
    }

    fn call(
        self: Arc<Self>,
        element: &dyn Element,
        params: Option<&dyn Parameters>,
    ) -> Option<ActionRef> {
        self.dispatch(element, params)
    }

    fn call_mut(
        self: Arc<Self>,
        element: &mut dyn Element,
        params: Option<&dyn Parameters>,
    ) -> Option<ActionRef> {
        self.dispatch_mut(element, params)
    }

    fn as_collection(&self) -> Option<&ActionCollection> {
        Some(self)
    }
}

impl std::fmt::Debug for ActionCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionCollection")
            .field("name", &self.name)
            .field("type_tags", &self.type_tags())
            .finish()
    }
}

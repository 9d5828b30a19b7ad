//! Per-element behaviors and their shared handle type.

use std::sync::Arc;

use crate::collection::ActionCollection;
use crate::element::{Element, HyperGraph};
use crate::param::Parameters;

/// Shared handle to a registered action.
pub type ActionRef = Arc<dyn ElementAction>;

/// A named behavior bound to one element type.
///
/// Calls return the action that actually handled the element, or `None`
/// when nothing did. Having no handler for a type is a normal outcome.
pub trait ElementAction: Send + Sync {
    /// Group name shared by all actions of one family, e.g. `"draw"`.
    fn name(&self) -> &str;

    /// Type tag of the elements this action handles.
    fn type_tag(&self) -> &str;

    fn call(
        self: Arc<Self>,
        _element: &dyn Element,
        _params: Option<&dyn Parameters>,
    ) -> Option<ActionRef> {
        None
    }

    fn call_mut(
        self: Arc<Self>,
        _element: &mut dyn Element,
        _params: Option<&dyn Parameters>,
    ) -> Option<ActionRef> {
        None
    }

    /// Typed view used by the library to tell collections from plain actions.
    fn as_collection(&self) -> Option<&ActionCollection> {
        None
    }
}

/// Whether two handles point at the same action instance.
pub fn same_action(a: &ActionRef, b: &ActionRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// A behavior applied to a whole graph, e.g. after each optimizer iteration.
pub trait GraphAction: Send + Sync {
    /// Returns whether the action did anything.
    fn call(&self, _graph: &dyn HyperGraph, _params: Option<&dyn Parameters>) -> bool {
        false
    }
}

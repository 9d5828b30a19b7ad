//! Runtime-extensible actions over heterogeneous graphs.
//!
//! Behaviors are registered into the process-wide [`ActionLibrary`], grouped
//! by name into [`ActionCollection`]s and selected per element through the
//! element's runtime type tag. [`apply_action`] drives one of them across a
//! whole graph.

pub mod action;
pub mod collection;
pub mod draw;
pub mod element;
pub mod gnuplot;
pub mod library;
pub mod param;
pub mod traverse;

pub use action::{ActionRef, ElementAction, GraphAction, same_action};
pub use collection::ActionCollection;
pub use draw::{DRAW_ACTION_NAME, DrawAction};
pub use element::{AsAny, CacheContainer, Element, ElementGraph, HyperGraph, UserData};
pub use gnuplot::{WRITE_GNUPLOT_ACTION_NAME, WriteGnuplotAction};
pub use hyperact_error::{Error, ErrorKind, Result};
pub use library::ActionLibrary;
pub use param::{
    BoolProperty, DrawParameters, IterationParameters, Parameters, Property, PropertyMap,
    WriteGnuplotParameters, parameters_id,
};
pub use traverse::{apply_action, apply_action_ref};

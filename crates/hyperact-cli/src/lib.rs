//! hyperact command-line interface.
//!
pub mod actions;
pub mod graph_file;

use hyperact_core::{
    ActionLibrary, DRAW_ACTION_NAME, Error, HyperGraph, Result, WriteGnuplotParameters,
    apply_action,
};

pub use actions::{BuiltinActions, SvgParameters};
pub use graph_file::{load_graph, parse_graph};

/// Options for running hyperact.
#[derive(Debug, Clone)]
pub struct HyperactOptions {
    pub graph: String,
    pub action: String,
    pub type_filter: Option<String>,
    /// Property overrides for the draw action, `name=value,...`.
    pub set: Option<String>,
}

/// Load the graph, run the named action over it and return what it produced.
///
/// The built-in actions are registered into the process-wide library for the
/// duration of the run.
pub fn run_main(opts: &HyperactOptions) -> Result<String> {
    let mut graph = load_graph(&opts.graph)?;
    let library = ActionLibrary::instance();
    let builtins = BuiltinActions::register(&library);
    let result = run_action(&mut graph, &library, opts);
    builtins.unregister(&library);
    result
}

fn run_action(
    graph: &mut dyn HyperGraph,
    library: &ActionLibrary,
    opts: &HyperactOptions,
) -> Result<String> {
    let action = library
        .action_by_name(&opts.action)
        .ok_or_else(|| Error::action_not_found(opts.action.as_str()).with_operation("run_main"))?;
    let filter = opts.type_filter.as_deref();
    tracing::info!(action = %opts.action, filter = ?filter, "applying action");

    if opts.action == DRAW_ACTION_NAME {
        let params = SvgParameters::new();
        for name in actions::show_properties() {
            params.property_map().make_property(&name, true);
        }
        if let Some(set) = &opts.set {
            params
                .property_map()
                .update_from_str(set)
                .map_err(|err| err.with_operation("run_main"))?;
        }
        apply_action(graph, &action, Some(&params), filter);
        return Ok(params.render());
    }

    if opts.set.is_some() {
        return Err(
            Error::invalid_argument("--set only applies to the draw action")
                .with_operation("run_main")
                .with_context("action", opts.action.as_str()),
        );
    }
    let params = WriteGnuplotParameters::new();
    apply_action(graph, &action, Some(&params), filter);
    Ok(params.into_contents())
}

//! Built-in actions for the pose graph element types.

use std::sync::Arc;

use parking_lot::Mutex;

use hyperact_core::{
    ActionLibrary, ActionRef, DrawAction, Element, ElementAction, Parameters, PropertyMap,
    WriteGnuplotAction,
};

use crate::graph_file::{EDGE_XY, EdgeXY, VERTEX_XY, VertexXY};

/// Draw parameters collecting SVG elements.
#[derive(Default)]
pub struct SvgParameters {
    properties: PropertyMap,
    body: Mutex<Vec<String>>,
}

impl SvgParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property_map(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn push(&self, element: String) {
        self.body.lock().push(element);
    }

    /// Wrap the collected elements into a complete document.
    pub fn render(&self) -> String {
        let mut out = String::from("<svg xmlns=\"http://www.w3.org/2000/svg\">\n");
        for element in self.body.lock().iter() {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

impl Parameters for SvgParameters {
    fn properties(&self) -> Option<&PropertyMap> {
        Some(&self.properties)
    }
}

fn svg_sink(params: Option<&dyn Parameters>) -> Option<&SvgParameters> {
    params?.as_any().downcast_ref::<SvgParameters>()
}

pub struct VertexXYWriteGnuplot {
    base: WriteGnuplotAction,
}

impl ElementAction for VertexXYWriteGnuplot {
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
        let vertex = element.as_any().downcast_ref::<VertexXY>()?;
        let sink = WriteGnuplotAction::sink(params)?;
        sink.write_line(&format!("{} {}", vertex.x, vertex.y));
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

pub struct EdgeXYWriteGnuplot {
    base: WriteGnuplotAction,
}

impl ElementAction for EdgeXYWriteGnuplot {
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
        let edge = element.as_any().downcast_ref::<EdgeXY>()?;
        let sink = WriteGnuplotAction::sink(params)?;
        sink.write_line(&format!("{} {}", edge.from_xy.0, edge.from_xy.1));
        sink.write_line(&format!("{} {}", edge.to_xy.0, edge.to_xy.1));
        sink.write_line("");
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

pub struct VertexXYDraw {
    base: DrawAction,
}

impl ElementAction for VertexXYDraw {
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
        let vertex = element.as_any().downcast_ref::<VertexXY>()?;
        self.base.refresh_property_ptrs(params);
        let sink = svg_sink(params)?;
        if !self.base.is_shown() {
            return Some(self as ActionRef);
        }
        sink.push(format!(
            "<circle id=\"v{}\" cx=\"{}\" cy=\"{}\" r=\"0.1\"/>",
            vertex.id, vertex.x, vertex.y
        ));
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

pub struct EdgeXYDraw {
    base: DrawAction,
}

impl ElementAction for EdgeXYDraw {
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
        let edge = element.as_any().downcast_ref::<EdgeXY>()?;
        self.base.refresh_property_ptrs(params);
        let sink = svg_sink(params)?;
        if !self.base.is_shown() {
            return Some(self as ActionRef);
        }
        sink.push(format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\"/>",
            edge.from_xy.0, edge.from_xy.1, edge.to_xy.0, edge.to_xy.1
        ));
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

/// Handles to the built-in actions, kept so they can be unregistered again.
pub struct BuiltinActions {
    actions: Vec<ActionRef>,
}

impl BuiltinActions {
    /// Register gnuplot and draw actions for both element types.
    pub fn register(library: &ActionLibrary) -> Self {
        let actions: Vec<ActionRef> = vec![
            Arc::new(VertexXYWriteGnuplot {
                base: WriteGnuplotAction::new(VERTEX_XY),
            }) as ActionRef,
            Arc::new(EdgeXYWriteGnuplot {
                base: WriteGnuplotAction::new(EDGE_XY),
            }) as ActionRef,
            Arc::new(VertexXYDraw {
                base: DrawAction::new(VERTEX_XY),
            }) as ActionRef,
            Arc::new(EdgeXYDraw {
                base: DrawAction::new(EDGE_XY),
            }) as ActionRef,
        ];
        for action in &actions {
            if !library.register_action(action.clone()) {
                tracing::warn!(
                    name = action.name(),
                    type_tag = action.type_tag(),
                    "builtin action not registered"
                );
            }
        }
        Self { actions }
    }

    pub fn unregister(self, library: &ActionLibrary) {
        for action in &self.actions {
            library.unregister_action(action);
        }
    }
}

/// Names of the SHOW toggles read by the built-in draw actions.
pub fn show_properties() -> [String; 2] {
    [format!("{VERTEX_XY}::SHOW"), format!("{EDGE_XY}::SHOW")]
}

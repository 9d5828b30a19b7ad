use crate::action::ElementAction;
use crate::param::{Parameters, WriteGnuplotParameters};

pub const WRITE_GNUPLOT_ACTION_NAME: &str = "writeGnuplot";

/// Base of the plain-text gnuplot export family.
///
/// Concrete exporters embed it for the name and type tag, and write through
/// [`WriteGnuplotAction::sink`].
pub struct WriteGnuplotAction {
    type_tag: String,
}

impl WriteGnuplotAction {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
        }
    }

    /// The gnuplot output carried by `params`, if it is gnuplot parameters.
    pub fn sink(params: Option<&dyn Parameters>) -> Option<&WriteGnuplotParameters> {
        params?.as_any().downcast_ref::<WriteGnuplotParameters>()
    }
}

impl ElementAction for WriteGnuplotAction {
    fn name(&self) -> &str {
        WRITE_GNUPLOT_ACTION_NAME
    }

    fn type_tag(&self) -> &str {
        &self.type_tag
    }
}

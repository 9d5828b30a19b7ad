//! Configuration objects handed to actions, and the property sheet they carry.
//!
//! Actions only ever see `&dyn Parameters`. A family that needs typed
//! settings asks for them through a capability method instead of assuming a
//! concrete type.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::element::AsAny;
use crate::{Error, Result};

/// A named value that can be shared between the sheet and the actions reading it.
#[derive(Debug)]
pub struct Property<T> {
    name: String,
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value: RwLock::new(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> T {
        self.value.read().clone()
    }

    pub fn set_value(&self, value: T) {
        *self.value.write() = value;
    }
}

pub type BoolProperty = Property<bool>;

/// Typed properties indexed by name.
#[derive(Default)]
pub struct PropertyMap {
    properties: RwLock<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the property called `name`, creating it with `default` if absent.
    ///
    /// The first creation wins: later calls ignore `default`. Returns `None`
    /// when a property of that name exists with a different value type.
    pub fn make_property<T>(&self, name: &str, default: T) -> Option<Arc<Property<T>>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let mut properties = self.properties.write();
        let entry = properties
            .entry(name.to_string())
            .or_insert_with(|| {
                Arc::new(Property::new(name, default)) as Arc<dyn Any + Send + Sync>
            });
        Arc::clone(entry).downcast::<Property<T>>().ok()
    }

    pub fn get_property<T>(&self, name: &str) -> Option<Arc<Property<T>>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let properties = self.properties.read();
        let entry = properties.get(name)?;
        Arc::clone(entry).downcast::<Property<T>>().ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.properties.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.read().is_empty()
    }

    /// Assign values from a `name=value,name=value` list.
    ///
    /// Only existing properties can be updated. Supported value types are
    /// `bool`, `i64`, `f64` and `String`.
    pub fn update_from_str(&self, assignments: &str) -> Result<()> {
        for assignment in assignments.split(',').map(str::trim) {
            if assignment.is_empty() {
                continue;
            }
            let Some((name, value)) = assignment.split_once('=') else {
                return Err(Error::invalid_argument(format!(
                    "expected name=value, got '{}'",
                    assignment
                ))
                .with_operation("property_map::update_from_str"));
            };
            self.assign(name.trim(), value.trim())
                .map_err(|err| err.with_operation("property_map::update_from_str"))?;
        }
        Ok(())
    }

    fn assign(&self, name: &str, value: &str) -> Result<()> {
        let entry = self
            .properties
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| {
                Error::invalid_argument(format!("unknown property '{}'", name))
                    .with_context("property", name)
            })?;

        let invalid = || {
            Error::invalid_argument(format!("cannot assign '{}' to property '{}'", value, name))
                .with_context("property", name)
        };

        if let Some(p) = entry.downcast_ref::<Property<bool>>() {
            p.set_value(value.parse().map_err(|_| invalid())?);
        } else if let Some(p) = entry.downcast_ref::<Property<i64>>() {
            p.set_value(value.parse().map_err(|_| invalid())?);
        } else if let Some(p) = entry.downcast_ref::<Property<f64>>() {
            p.set_value(value.parse().map_err(|_| invalid())?);
        } else if let Some(p) = entry.downcast_ref::<Property<String>>() {
            p.set_value(value.to_string());
        } else {
            return Err(invalid());
        }
        Ok(())
    }
}

/// The configuration object passed to every action call.
///
/// Actions that cache per-object state tell parameters apart by address
/// (see [`parameters_id`]). Implementors meant for such actions should not be
/// zero-sized: distinct values of a zero-sized type may share an address.
pub trait Parameters: AsAny {
    /// The property sheet, for families configured through named properties.
    fn properties(&self) -> Option<&PropertyMap> {
        None
    }
}

/// Identity of a configuration object; `None` for an absent one.
///
/// Only the data address is compared, never the contents or the type. An
/// object dropped and replaced at the same address, or two values of a
/// zero-sized type, produce the same id.
pub fn parameters_id(params: Option<&dyn Parameters>) -> Option<usize> {
    params.map(|p| std::ptr::from_ref(p).cast::<()>() as usize)
}

/// Parameters of the draw family: a property sheet of display toggles.
#[derive(Default)]
pub struct DrawParameters {
    properties: PropertyMap,
}

impl DrawParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property_map(&self) -> &PropertyMap {
        &self.properties
    }
}

impl Parameters for DrawParameters {
    fn properties(&self) -> Option<&PropertyMap> {
        Some(&self.properties)
    }
}

/// Parameters of the gnuplot export family: the text being produced.
#[derive(Default)]
pub struct WriteGnuplotParameters {
    output: Mutex<String>,
}

impl WriteGnuplotParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_line(&self, line: &str) {
        let mut output = self.output.lock();
        output.push_str(line);
        output.push('\n');
    }

    pub fn contents(&self) -> String {
        self.output.lock().clone()
    }

    pub fn into_contents(self) -> String {
        self.output.into_inner()
    }
}

impl Parameters for WriteGnuplotParameters {}

/// Passed to graph-level actions run between optimizer iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationParameters {
    pub iteration: usize,
}

impl IterationParameters {
    pub fn new(iteration: usize) -> Self {
        Self { iteration }
    }
}

impl Parameters for IterationParameters {}

use crate::{Entity, Result, TypeShape, Value, error::require_not_empty};
use std::any::TypeId;

/// A partial update: the identifier of a row and the columns to change.
///
/// ```ignore
/// let mut delta = ObjectDelta::new::<Customer>(12);
/// delta.add_change("Name", "Fred Flintstone")?;
/// session.update_delta(&delta)?;
/// ```
#[derive(Debug, Clone)]
pub struct ObjectDelta {
    type_id: TypeId,
    shape: fn() -> &'static TypeShape,
    identifier: Value,
    changes: Vec<(String, Value)>,
}

impl ObjectDelta {
    pub fn new<T: Entity + 'static>(identifier: impl Into<Value>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            shape: T::type_shape,
            identifier: identifier.into(),
            changes: Vec::new(),
        }
    }

    /// Records a change, by column or property name. Checked against the mapping when the
    /// statement is built.
    pub fn add_change(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        require_not_empty("name", name)?;
        self.changes.push((name.trim().to_string(), value.into()));
        Ok(self)
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_shape(&self) -> &'static TypeShape {
        (self.shape)()
    }

    pub fn identifier(&self) -> &Value {
        &self.identifier
    }

    pub fn changes(&self) -> &[(String, Value)] {
        &self.changes
    }

    pub fn change_count(&self) -> usize {
        self.changes.len()
    }
}

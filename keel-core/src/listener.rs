use crate::{Entity, Result, TableInfo, Value};
use std::sync::Arc;

/// Hooks around the writes of a session.
///
/// Every method defaults to doing nothing, implement the ones needed. An error aborts the
/// operation and is returned to the caller of the session.
pub trait Listener: Send + Sync {
    /// After the identifier checks, before the insert statement is built.
    fn before_insert(&self, _table: &TableInfo, _entity: &mut dyn Entity) -> Result<()> {
        Ok(())
    }

    /// After the insert, `identifier` is the value the database returned (null if none).
    fn after_insert(
        &self,
        _table: &TableInfo,
        _entity: &mut dyn Entity,
        _identifier: &Value,
    ) -> Result<()> {
        Ok(())
    }

    fn before_update(&self, _table: &TableInfo, _entity: &dyn Entity) -> Result<()> {
        Ok(())
    }

    /// `rows` is the number of rows the update affected.
    fn after_update(&self, _table: &TableInfo, _entity: &dyn Entity, _rows: u64) -> Result<()> {
        Ok(())
    }

    fn before_delete(&self, _table: &TableInfo, _entity: &dyn Entity) -> Result<()> {
        Ok(())
    }

    fn after_delete(&self, _table: &TableInfo, _entity: &dyn Entity, _rows: u64) -> Result<()> {
        Ok(())
    }
}

/// Listeners in registration order.
#[derive(Clone, Default)]
pub struct Listeners {
    listeners: Vec<Arc<dyn Listener>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: impl Listener + 'static) -> &mut Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    pub fn add_shared(&mut self, listener: Arc<dyn Listener>) -> &mut Self {
        self.listeners.push(listener);
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Listener> {
        self.listeners.iter().map(|v| v.as_ref())
    }

    pub fn before_insert(&self, table: &TableInfo, entity: &mut dyn Entity) -> Result<()> {
        self.iter().try_for_each(|v| v.before_insert(table, entity))
    }

    pub fn after_insert(
        &self,
        table: &TableInfo,
        entity: &mut dyn Entity,
        identifier: &Value,
    ) -> Result<()> {
        self.iter()
            .try_for_each(|v| v.after_insert(table, entity, identifier))
    }

    pub fn before_update(&self, table: &TableInfo, entity: &dyn Entity) -> Result<()> {
        self.iter().try_for_each(|v| v.before_update(table, entity))
    }

    pub fn after_update(&self, table: &TableInfo, entity: &dyn Entity, rows: u64) -> Result<()> {
        self.iter()
            .try_for_each(|v| v.after_update(table, entity, rows))
    }

    pub fn before_delete(&self, table: &TableInfo, entity: &dyn Entity) -> Result<()> {
        self.iter().try_for_each(|v| v.before_delete(table, entity))
    }

    pub fn after_delete(&self, table: &TableInfo, entity: &dyn Entity, rows: u64) -> Result<()> {
        self.iter()
            .try_for_each(|v| v.after_delete(table, entity, rows))
    }
}

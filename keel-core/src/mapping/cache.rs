use crate::{Entity, MappingConvention, ObjectDelta, Result, TableInfo, TypeShape};
use log::trace;
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Table metadata derived once per type and shared for the lifetime of the cache.
pub struct ObjectInfoCache {
    convention: Arc<dyn MappingConvention>,
    entries: RwLock<HashMap<TypeId, Arc<TableInfo>>>,
}

impl ObjectInfoCache {
    pub fn new(convention: Arc<dyn MappingConvention>) -> Self {
        Self {
            convention,
            entries: Default::default(),
        }
    }

    pub fn convention(&self) -> &dyn MappingConvention {
        self.convention.as_ref()
    }

    /// Metadata of `T`, derived on first access.
    ///
    /// Concurrent first accesses derive it exactly once: the write lock is taken only on a miss
    /// and the entry is checked again under it. Failed derivations are not cached.
    pub fn table_info<T: Entity + 'static>(&self) -> Result<Arc<TableInfo>> {
        self.get_or_derive(TypeId::of::<T>(), T::type_shape)
    }

    /// Metadata of the type a delta was created for.
    pub fn table_info_of(&self, delta: &ObjectDelta) -> Result<Arc<TableInfo>> {
        self.get_or_derive(delta.type_id(), || delta.type_shape())
    }

    fn get_or_derive(
        &self,
        key: TypeId,
        shape: impl FnOnce() -> &'static TypeShape,
    ) -> Result<Arc<TableInfo>> {
        if let Some(info) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(info.clone());
        }
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(info) = entries.get(&key) {
            return Ok(info.clone());
        }
        let info = Arc::new(self.convention.derive_table_info(shape())?);
        trace!(
            "Derived table info of `{}`: {} columns",
            info.type_name(),
            info.columns().len()
        );
        entries.insert(key, info.clone());
        Ok(info)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

use crate::{
    AsValue, Command, Entity, Executor, KeelError, Listeners, MappingConvention, ObjectDelta,
    ObjectInfoCache, PagingOptions, Result, RowLabeled, SqlDialect, SqlQuery, TableInfo,
    TypeConverters, TypeMappings, Value, assign_inserted_identifier, prepare_insert_identifier,
    require_identifier_set,
};
use log::{debug, trace};
use std::sync::Arc;

/// Everything a session needs, configured once and shared by all the sessions.
#[derive(Clone)]
pub struct SessionFactory {
    dialect: Arc<dyn SqlDialect>,
    cache: Arc<ObjectInfoCache>,
    converters: Arc<TypeConverters>,
    mappings: Arc<TypeMappings>,
    listeners: Listeners,
    timeout: Option<u32>,
}

impl SessionFactory {
    /// Factory with the default converters and no listeners.
    pub fn new(dialect: Arc<dyn SqlDialect>, convention: Arc<dyn MappingConvention>) -> Self {
        let mut mappings = TypeMappings::new();
        let converters = TypeConverters::with_defaults(&mut mappings);
        Self {
            dialect,
            cache: Arc::new(ObjectInfoCache::new(convention)),
            converters: Arc::new(converters),
            mappings: Arc::new(mappings),
            listeners: Listeners::new(),
            timeout: None,
        }
    }

    /// Replaces the converters together with the mappings they registered into.
    pub fn with_converters(mut self, converters: TypeConverters, mappings: TypeMappings) -> Self {
        self.converters = Arc::new(converters);
        self.mappings = Arc::new(mappings);
        self
    }

    pub fn with_listeners(mut self, listeners: Listeners) -> Self {
        self.listeners = listeners;
        self
    }

    /// Timeout of the commands whose query does not set one, in seconds.
    pub fn with_timeout(mut self, timeout: Option<u32>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn dialect(&self) -> &dyn SqlDialect {
        self.dialect.as_ref()
    }

    pub fn object_info(&self) -> &ObjectInfoCache {
        &self.cache
    }

    pub fn converters(&self) -> &TypeConverters {
        &self.converters
    }

    pub fn mappings(&self) -> &TypeMappings {
        &self.mappings
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn timeout(&self) -> Option<u32> {
        self.timeout
    }

    pub fn open_session<E: Executor>(&self, executor: E) -> Session<E> {
        Session {
            factory: self.clone(),
            executor,
        }
    }

    /// Binds the query into the command the executor receives.
    pub fn command(&self, query: &SqlQuery) -> Result<Command> {
        let mut command = Command::build(
            query,
            self.dialect.characters(),
            &self.converters,
            &self.mappings,
        )?;
        if command.timeout.is_none() {
            command.timeout = self.timeout;
        }
        Ok(command)
    }
}

/// A page of results and the size of the whole result set.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<T> {
    /// One based.
    pub page: u64,
    pub results_per_page: u64,
    pub total_results: u64,
    pub results: Vec<T>,
}

impl<T> PagedResult<T> {
    pub fn total_pages(&self) -> u64 {
        if self.results_per_page == 0 {
            return 0;
        }
        self.total_results.div_ceil(self.results_per_page)
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Unit of work over an executor.
///
/// Writes run the identifier checks first, then the listeners in registration order.
pub struct Session<E: Executor> {
    factory: SessionFactory,
    executor: E,
}

impl<E: Executor> Session<E> {
    pub fn factory(&self) -> &SessionFactory {
        &self.factory
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    pub fn begin(&mut self) -> Result<()> {
        self.executor.begin()
    }

    pub fn commit(&mut self) -> Result<()> {
        self.executor.commit()
    }

    pub fn rollback(&mut self) -> Result<()> {
        self.executor.rollback()
    }

    /// Inserts the entity, assigning the identifier generated by the database.
    pub fn insert<T: Entity + 'static>(&mut self, entity: &mut T) -> Result<()> {
        let table = self.factory.cache.table_info::<T>()?;
        prepare_insert_identifier(&table, entity)?;
        self.factory.listeners.before_insert(&table, entity)?;
        let dialect = self.factory.dialect.clone();
        let insert = dialect.build_insert_sql_query(&table, &*entity)?;
        let identifier = if table.identifier_strategy().is_generated_by_database() {
            let identifier = match dialect.build_select_insert_id_sql_query(&table)? {
                Some(select) if dialect.supports_batched_queries() => {
                    let combined = dialect.combine(&[insert, select])?;
                    self.execute_scalar_value(&combined)?
                }
                Some(select) => {
                    self.execute(&insert)?;
                    self.execute_scalar_value(&select)?
                }
                None => self.execute_scalar_value(&insert)?,
            };
            assign_inserted_identifier(&table, entity, identifier.clone(), &self.factory.converters)?;
            identifier
        } else {
            self.execute(&insert)?;
            entity.get_value(table.require_identifier()?.property_name)?
        };
        self.factory
            .listeners
            .after_insert(&table, entity, &identifier)
    }

    /// Updates every updatable column, `false` if no row matched (a stale version included).
    pub fn update<T: Entity + 'static>(&mut self, entity: &T) -> Result<bool> {
        let table = self.factory.cache.table_info::<T>()?;
        require_identifier_set(&table, entity)?;
        self.factory.listeners.before_update(&table, entity)?;
        let query = self.factory.dialect.build_update_sql_query(&table, entity)?;
        let rows = self.execute(&query)?;
        self.factory.listeners.after_update(&table, entity, rows)?;
        Ok(rows > 0)
    }

    /// Updates only the changed columns, listeners are not involved.
    pub fn update_delta(&mut self, delta: &ObjectDelta) -> Result<bool> {
        let table = self.factory.cache.table_info_of(delta)?;
        let query = self
            .factory
            .dialect
            .build_update_delta_sql_query(&table, delta)?;
        Ok(self.execute(&query)? > 0)
    }

    pub fn delete<T: Entity + 'static>(&mut self, entity: &T) -> Result<bool> {
        let table = self.factory.cache.table_info::<T>()?;
        let identifier = require_identifier_set(&table, entity)?;
        self.factory.listeners.before_delete(&table, entity)?;
        let query = self
            .factory
            .dialect
            .build_delete_sql_query(&table, identifier)?;
        let rows = self.execute(&query)?;
        self.factory.listeners.after_delete(&table, entity, rows)?;
        Ok(rows > 0)
    }

    /// Deletes the row of `T` with the identifier, without loading it.
    pub fn delete_by_id<T: Entity + 'static>(&mut self, identifier: impl Into<Value>) -> Result<bool> {
        let table = self.factory.cache.table_info::<T>()?;
        let identifier = identifier.into();
        if identifier.is_default() {
            let column = table.require_identifier()?;
            return Err(KeelError::IdentifierNotSet {
                type_name: table.type_name().to_string(),
                property: column.property_name.to_string(),
            }
            .into());
        }
        let query = self
            .factory
            .dialect
            .build_delete_sql_query(&table, identifier)?;
        Ok(self.execute(&query)? > 0)
    }

    /// The row of `T` with the identifier.
    pub fn single<T: Entity + Default + 'static>(
        &mut self,
        identifier: impl Into<Value>,
    ) -> Result<Option<T>> {
        let table = self.factory.cache.table_info::<T>()?;
        let query = self
            .factory
            .dialect
            .build_select_sql_query(&table, identifier.into())?;
        self.first(&query)
    }

    pub fn first<T: Entity + Default + 'static>(&mut self, query: &SqlQuery) -> Result<Option<T>> {
        let table = self.factory.cache.table_info::<T>()?;
        let command = self.factory.command(query)?;
        let rows = self.executor.fetch(&command)?;
        rows.first()
            .map(|row| read_entity(&table, row, &self.factory.converters))
            .transpose()
    }

    pub fn fetch<T: Entity + Default + 'static>(&mut self, query: &SqlQuery) -> Result<Vec<T>> {
        let table = self.factory.cache.table_info::<T>()?;
        let command = self.factory.command(query)?;
        let rows = self.executor.fetch(&command)?;
        trace!("Fetched {} rows of `{}`", rows.len(), table.type_name());
        rows.iter()
            .map(|row| read_entity(&table, row, &self.factory.converters))
            .collect()
    }

    /// One page of the results of a select, with the count of the whole result set.
    pub fn paged<T: Entity + Default + 'static>(
        &mut self,
        query: &SqlQuery,
        paging: PagingOptions,
    ) -> Result<PagedResult<T>> {
        let dialect = self.factory.dialect.clone();
        let total_results = self.execute_scalar::<u64>(&dialect.count_query(query)?)?;
        let results = self.fetch(&dialect.page_query(query, paging)?)?;
        Ok(PagedResult {
            page: paging.offset / paging.count.max(1) + 1,
            results_per_page: paging.count,
            total_results,
            results,
        })
    }

    /// Runs the query, returns the number of rows affected.
    pub fn execute(&mut self, query: &SqlQuery) -> Result<u64> {
        let command = self.factory.command(query)?;
        let rows = self.executor.execute(&command)?;
        debug!("{} rows affected", rows);
        Ok(rows)
    }

    /// Runs the query and converts the first column of the first row.
    pub fn execute_scalar<V: AsValue>(&mut self, query: &SqlQuery) -> Result<V> {
        let value = self.execute_scalar_value(query)?;
        let value = self
            .factory
            .converters
            .from_wire(value, &V::as_empty_value())?;
        V::try_from_value(value)
    }

    fn execute_scalar_value(&mut self, query: &SqlQuery) -> Result<Value> {
        let command = self.factory.command(query)?;
        self.executor.execute_scalar(&command)
    }
}

/// Entity from a row, columns are matched by name ignoring case, unmapped columns are skipped.
pub fn read_entity<T: Entity + Default>(
    table: &TableInfo,
    row: &RowLabeled,
    converters: &TypeConverters,
) -> Result<T> {
    let mut entity = T::default();
    for (label, value) in row.iter() {
        let Some(column) = table.column(label) else {
            trace!("Skipping unmapped column `{}` of `{}`", label, table.type_name());
            continue;
        };
        let value = converters.from_wire(value.clone(), &column.value)?;
        entity.set_value(column.property_name, value)?;
    }
    Ok(entity)
}

use crate::{
    AttributeMappingConvention, DbType, EncryptedStringTypeConverter, FirebirdDialect, KeelError,
    Listener, Listeners, MappingConvention, MsSql2005Dialect, MsSql2012Dialect, MySqlDialect,
    PostgreSqlDialect, Result, SQLiteDialect, SessionFactory, SqlDialect, TypeConverter,
    TypeConverters, TypeMappings, Value,
};
use log::{debug, error};
use std::sync::Arc;
use url::Url;

/// The dialect registered under the name, compared ignoring case.
pub fn dialect_by_name(name: &str) -> Result<Arc<dyn SqlDialect>> {
    let dialect: Arc<dyn SqlDialect> = match name.trim().to_ascii_lowercase().as_str() {
        "mssql2005" => Arc::new(MsSql2005Dialect),
        "mssql2012" => Arc::new(MsSql2012Dialect),
        "mysql" => Arc::new(MySqlDialect),
        "postgresql" => Arc::new(PostgreSqlDialect),
        "sqlite" => Arc::new(SQLiteDialect),
        "firebird" => Arc::new(FirebirdDialect),
        _ => {
            let error = KeelError::UnsupportedDialect(name.to_string());
            error!("{}", error);
            return Err(error.into());
        }
    };
    Ok(dialect)
}

/// The dialect of a connection url, chosen by scheme. `mssql` selects SQL Server 2012.
pub fn dialect_by_url(url: &str) -> Result<Arc<dyn SqlDialect>> {
    let parsed = Url::parse(url).map_err(|e| {
        KeelError::invalid_argument("url", format!("`{}` is not a valid url: {}", url, e))
    })?;
    let name = match parsed.scheme() {
        "mssql" | "sqlserver" => "MsSql2012",
        "mysql" | "mariadb" => "MySql",
        "postgres" | "postgresql" => "PostgreSql",
        "sqlite" => "SQLite",
        "firebird" => "Firebird",
        scheme => scheme,
    };
    dialect_by_name(name)
}

/// Composition root: everything the sessions share, assembled once.
///
/// ```rust
/// # fn main() -> keel::Result<()> {
/// let factory = keel::Configuration::new()
///     .for_connection_url("postgres://localhost:5432/shop")?
///     .with_timeout(30)
///     .build()?;
/// assert_eq!(factory.dialect().name(), "PostgreSql");
/// # Ok(())
/// # }
/// ```
pub struct Configuration {
    dialect: Option<Arc<dyn SqlDialect>>,
    convention: Arc<dyn MappingConvention>,
    converters: TypeConverters,
    mappings: TypeMappings,
    listeners: Listeners,
    timeout: Option<u32>,
}

impl Default for Configuration {
    fn default() -> Self {
        let mut mappings = TypeMappings::new();
        let converters = TypeConverters::with_defaults(&mut mappings);
        Self {
            dialect: None,
            convention: Arc::new(AttributeMappingConvention),
            converters,
            mappings,
            listeners: Listeners::new(),
            timeout: None,
        }
    }
}

impl Configuration {
    /// Attribute mapping and the default converters, no dialect yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_dialect(mut self, name: &str) -> Result<Self> {
        self.dialect = Some(dialect_by_name(name)?);
        Ok(self)
    }

    pub fn for_connection_url(mut self, url: &str) -> Result<Self> {
        self.dialect = Some(dialect_by_url(url)?);
        Ok(self)
    }

    pub fn with_dialect(mut self, dialect: impl SqlDialect + 'static) -> Self {
        self.dialect = Some(Arc::new(dialect));
        self
    }

    pub fn with_mapping_convention(mut self, convention: impl MappingConvention + 'static) -> Self {
        self.convention = Arc::new(convention);
        self
    }

    /// Listeners run in the order they are added.
    pub fn with_listener(mut self, listener: impl Listener + 'static) -> Self {
        self.listeners.add(listener);
        self
    }

    /// Registered after the ones already present, the first accepting a type wins.
    pub fn with_converter(mut self, converter: impl TypeConverter + 'static) -> Self {
        self.converters.add(converter);
        self
    }

    /// Wire type of the values shaped like `prototype`.
    pub fn with_type_mapping(mut self, prototype: &Value, db_type: DbType) -> Self {
        self.mappings.register(prototype, db_type);
        self
    }

    /// Enables `EncryptedString` properties, the key is 32 bytes.
    pub fn with_encryption_key(self, key: &[u8]) -> Result<Self> {
        Ok(self.with_converter(EncryptedStringTypeConverter::new(key)?))
    }

    /// Same as [`Configuration::with_encryption_key`], the key encoded in base64.
    pub fn with_encryption_key_base64(self, key: &str) -> Result<Self> {
        Ok(self.with_converter(EncryptedStringTypeConverter::from_base64(key)?))
    }

    /// Default command timeout in seconds.
    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn build(self) -> Result<SessionFactory> {
        let Some(dialect) = self.dialect else {
            return Err(KeelError::invalid_argument("dialect", "no dialect was configured").into());
        };
        debug!(
            "Configured {} with {} converters and {} listeners",
            dialect.name(),
            self.converters.len(),
            self.listeners.len()
        );
        Ok(SessionFactory::new(dialect, self.convention)
            .with_converters(self.converters, self.mappings)
            .with_listeners(self.listeners)
            .with_timeout(self.timeout))
    }
}

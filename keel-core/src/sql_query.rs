use crate::{DbType, Value, truncate_long};
use std::fmt::{self, Display};

/// An argument of a [`SqlQuery`] together with its optional wire type override.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlArgument {
    pub value: Value,
    pub db_type: Option<DbType>,
}

impl SqlArgument {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            db_type: None,
        }
    }
    pub fn with_db_type(value: impl Into<Value>, db_type: DbType) -> Self {
        Self {
            value: value.into(),
            db_type: Some(db_type),
        }
    }
}

/// Command text plus its ordered arguments, the output of builders and dialects.
///
/// Text and arguments are fixed once built, only the timeout can change until the query is
/// executed. Placeholders and arguments are not checked against each other here, that happens
/// when the [`crate::Command`] is built.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SqlQuery {
    command_text: String,
    arguments: Vec<SqlArgument>,
    timeout: Option<u32>,
}

impl SqlQuery {
    pub fn new<I, V>(command_text: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::with_arguments(
            command_text,
            arguments.into_iter().map(SqlArgument::new).collect(),
        )
    }

    pub fn with_arguments(command_text: impl Into<String>, arguments: Vec<SqlArgument>) -> Self {
        Self {
            command_text: command_text.into(),
            arguments,
            timeout: None,
        }
    }

    /// A query without arguments.
    pub fn text(command_text: impl Into<String>) -> Self {
        Self::with_arguments(command_text, Vec::new())
    }

    pub fn command_text(&self) -> &str {
        &self.command_text
    }

    pub fn arguments(&self) -> &[SqlArgument] {
        &self.arguments
    }

    /// Seconds, `None` leaves the decision to the executor.
    pub fn timeout(&self) -> Option<u32> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Option<u32>) -> &mut Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout(mut self, timeout: u32) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Copies the timeout of `other`.
    pub fn with_timeout_of(mut self, other: &SqlQuery) -> Self {
        self.timeout = other.timeout;
        self
    }

    pub fn into_parts(self) -> (String, Vec<SqlArgument>, Option<u32>) {
        (self.command_text, self.arguments, self.timeout)
    }
}

impl Display for SqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.command_text))
    }
}

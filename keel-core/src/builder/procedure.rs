use super::SqlBuilderBase;
use crate::{Result, SqlArgument, SqlQuery, Value, error::require_not_empty};

/// Stored procedure invocation collecting named parameters.
///
/// Parameters are bound by name, their placeholders are never renumbered.
#[derive(Debug)]
pub struct ExecuteProcedure<'c>(pub(super) SqlBuilderBase<'c>);

impl<'c> ExecuteProcedure<'c> {
    /// Adds `@name`, the parameter prefix is prepended when missing.
    pub fn with_parameter(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        require_not_empty("parameter", name)?;
        let base = &mut self.0;
        let name = name.trim();
        if base.list_started {
            base.buffer.push(',');
        } else if base.chars.parenthesized_procedure_parameters {
            base.buffer.push('(');
        } else {
            base.buffer.push(' ');
        }
        base.list_started = true;
        if !name.starts_with(base.chars.sql_parameter) {
            base.buffer.push_str(base.chars.sql_parameter);
        }
        base.buffer.push_str(name);
        base.arguments.push(SqlArgument::new(value));
        Ok(self)
    }

    pub fn to_sql_query(mut self) -> SqlQuery {
        let base = &mut self.0;
        if base.chars.parenthesized_procedure_parameters {
            if !base.list_started {
                base.buffer.push('(');
            }
            base.buffer.push(')');
        }
        self.0.into_query()
    }
}

use super::{BuilderStage, SqlBuilderBase};
use crate::{KeelError, Result, SqlQuery, Value};
use std::marker::PhantomData;

/// A column waiting for its comparison, created by `where_column`, `and` and `or`.
///
/// Every comparison completes the predicate and continues in the stage `N`.
#[derive(Debug)]
pub struct WhereColumn<'c, N> {
    base: SqlBuilderBase<'c>,
    next: PhantomData<N>,
}

impl<'c, N: BuilderStage<'c>> WhereColumn<'c, N> {
    pub(crate) fn new(base: SqlBuilderBase<'c>) -> Self {
        Self {
            base,
            next: PhantomData,
        }
    }

    fn compare(mut self, operator: &str, value: Value) -> N {
        self.base.start_comparison();
        self.base.buffer.push(' ');
        self.base.buffer.push_str(operator);
        self.base.buffer.push(' ');
        self.base.push_argument(value);
        self.base.buffer.push(')');
        N::from_base(self.base)
    }

    fn unary(mut self, suffix: &str) -> N {
        self.base.start_comparison();
        self.base.buffer.push_str(suffix);
        self.base.buffer.push(')');
        N::from_base(self.base)
    }

    fn range(mut self, operator: &str, lower: Value, upper: Value) -> N {
        self.base.start_comparison();
        self.base.buffer.push(' ');
        self.base.buffer.push_str(operator);
        self.base.buffer.push(' ');
        self.base.push_argument(lower);
        self.base.buffer.push_str(" AND ");
        self.base.push_argument(upper);
        self.base.buffer.push(')');
        N::from_base(self.base)
    }

    fn list(mut self, operator: &str, values: Vec<Value>) -> Result<N> {
        if values.is_empty() {
            return Err(KeelError::invalid_argument(
                "values",
                format!("{} requires at least one value", operator),
            )
            .into());
        }
        self.base.start_comparison();
        self.base.buffer.push(' ');
        self.base.buffer.push_str(operator);
        self.base.buffer.push_str(" (");
        self.base.push_arguments(values);
        self.base.buffer.push_str("))");
        Ok(N::from_base(self.base))
    }

    fn sub_query(mut self, operator: &str, query: SqlQuery) -> Result<N> {
        self.base.start_comparison();
        self.base.buffer.push(' ');
        self.base.buffer.push_str(operator);
        self.base.buffer.push_str(" (");
        self.base.push_sub_query(query)?;
        self.base.buffer.push_str("))");
        Ok(N::from_base(self.base))
    }

    /// `= value`, or `IS NULL` when the value is null.
    pub fn is_equal_to(self, value: impl Into<Value>) -> N {
        let value = value.into();
        if value.is_null() {
            return self.is_null();
        }
        self.compare("=", value)
    }

    /// `<> value`, or `IS NOT NULL` when the value is null.
    pub fn is_not_equal_to(self, value: impl Into<Value>) -> N {
        let value = value.into();
        if value.is_null() {
            return self.is_not_null();
        }
        self.compare("<>", value)
    }

    pub fn is_greater_than(self, value: impl Into<Value>) -> N {
        self.compare(">", value.into())
    }

    pub fn is_greater_than_or_equal_to(self, value: impl Into<Value>) -> N {
        self.compare(">=", value.into())
    }

    pub fn is_less_than(self, value: impl Into<Value>) -> N {
        self.compare("<", value.into())
    }

    pub fn is_less_than_or_equal_to(self, value: impl Into<Value>) -> N {
        self.compare("<=", value.into())
    }

    /// The pattern is passed as is, wildcards included.
    pub fn is_like(self, pattern: impl Into<Value>) -> N {
        self.compare("LIKE", pattern.into())
    }

    pub fn is_not_like(self, pattern: impl Into<Value>) -> N {
        self.compare("NOT LIKE", pattern.into())
    }

    pub fn is_null(self) -> N {
        self.unary(" IS NULL")
    }

    pub fn is_not_null(self) -> N {
        self.unary(" IS NOT NULL")
    }

    pub fn between(self, lower: impl Into<Value>, upper: impl Into<Value>) -> N {
        self.range("BETWEEN", lower.into(), upper.into())
    }

    pub fn not_between(self, lower: impl Into<Value>, upper: impl Into<Value>) -> N {
        self.range("NOT BETWEEN", lower.into(), upper.into())
    }

    pub fn in_<I, V>(self, values: I) -> Result<N>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.list("IN", values.into_iter().map(Into::into).collect())
    }

    pub fn not_in<I, V>(self, values: I) -> Result<N>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.list("NOT IN", values.into_iter().map(Into::into).collect())
    }

    pub fn in_query(self, query: SqlQuery) -> Result<N> {
        self.sub_query("IN", query)
    }

    pub fn not_in_query(self, query: SqlQuery) -> Result<N> {
        self.sub_query("NOT IN", query)
    }

    pub fn is_equal_to_query(self, query: SqlQuery) -> Result<N> {
        self.sub_query("=", query)
    }

    pub fn is_not_equal_to_query(self, query: SqlQuery) -> Result<N> {
        self.sub_query("<>", query)
    }
}

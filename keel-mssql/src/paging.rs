use keel_core::{
    Clause, KeelError, PagingOptions, Result, SqlCharacters, SqlQuery, StatementWriter,
    paging_value, require_select, statement_text,
};

/// Characters of `text` outside parentheses, literals and delimited identifiers, with their byte
/// position. Opening parentheses and quotes at that level are kept.
fn top_level(text: &str) -> Vec<(usize, char)> {
    let mut result = Vec::with_capacity(text.len());
    let mut depth = 0usize;
    let mut closing: Option<char> = None;
    for (i, c) in text.char_indices() {
        match (closing, c) {
            (Some(end), c) if c == end => closing = None,
            (Some(_), _) => {}
            (None, '\'' | '[' | '"') => {
                if depth == 0 {
                    result.push((i, c));
                }
                closing = Some(if c == '[' { ']' } else { c });
            }
            (None, '(') => {
                if depth == 0 {
                    result.push((i, c));
                }
                depth += 1;
            }
            (None, ')') => depth = depth.saturating_sub(1),
            (None, c) if depth == 0 => result.push((i, c)),
            _ => {}
        }
    }
    result
}

/// Splits a select list on the commas outside parentheses, literals and brackets.
fn split_columns(select: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    for (i, _) in top_level(select).into_iter().filter(|(_, c)| *c == ',') {
        result.push(select[start..i].trim());
        start = i + 1;
    }
    result.push(select[start..].trim());
    result
}

/// The name after the last top level `AS`, if the column has one.
fn column_alias(column: &str) -> Option<&str> {
    let level = top_level(column);
    level
        .iter()
        .filter(|(_, c)| c.is_whitespace())
        .filter_map(|(i, _)| {
            let keyword = column.get(i + 1..i + 3)?;
            let after = column.get(i + 3..)?;
            (keyword.eq_ignore_ascii_case("AS") && after.starts_with(char::is_whitespace))
                .then(|| after.trim())
        })
        .filter(|v| !v.is_empty())
        .last()
}

/// A column reference, possibly qualified: its last name is visible to the outer query.
fn column_name(column: &str) -> Option<&str> {
    let level = top_level(column);
    let plain = level
        .iter()
        .all(|(_, c)| c.is_alphanumeric() || matches!(c, '_' | '.' | '*' | '[' | '"' | '@' | '$' | '#'));
    if !plain {
        return None;
    }
    let name = match level.iter().rev().find(|(_, c)| *c == '.') {
        Some((i, _)) => &column[i + 1..],
        None => column,
    };
    Some(name.trim())
}

/// Select list of the inner query and the matching one of the outer query.
///
/// Expressions without an alias are given one, the outer query could not name them otherwise.
fn page_columns(chars: &SqlCharacters, select: &str) -> (Vec<String>, Vec<String>) {
    let columns = split_columns(select);
    let mut inner = Vec::with_capacity(columns.len());
    let mut outer = Vec::with_capacity(columns.len());
    for (i, column) in columns.into_iter().enumerate() {
        if let Some(name) = column_alias(column).or_else(|| column_name(column)) {
            inner.push(column.to_string());
            outer.push(name.to_string());
        } else {
            let alias = chars.escape_sql(&format!("Column{}", i + 1));
            inner.push(format!("{} AS {}", column, alias));
            outer.push(alias);
        }
    }
    (inner, outer)
}

/// `ROW_NUMBER()` window paging, the only option before SQL Server 2012.
pub(crate) fn row_number_page_query(
    chars: &SqlCharacters,
    query: &SqlQuery,
    paging: PagingOptions,
) -> Result<SqlQuery> {
    let sql = require_select(query, chars, "paged")?;
    let (Some(select), Some(from)) = (sql.clause(Clause::Select), sql.keyword_position(Clause::From))
    else {
        return Err(KeelError::invalid_argument("query", "a select without FROM cannot be paged").into());
    };
    let body = &sql.before(Clause::OrderBy)[from..];
    let mut out = StatementWriter::with_arguments_of(chars, query);
    let (inner, outer) = page_columns(chars, select);
    out.push_str("SELECT ")
        .push_str(&outer.join(","))
        .push_str(" FROM (SELECT ")
        .push_str(&inner.join(","))
        .push_str(",ROW_NUMBER() OVER(ORDER BY ")
        .push_str(sql.clause(Clause::OrderBy).unwrap_or("(SELECT NULL)"))
        .push_str(") AS RowNumber ")
        .push_str(body)
        .push_str(") AS PagedResults WHERE (RowNumber >= ")
        .push_argument(paging_value(paging.first_row()?)?, None)
        .push_str(" AND RowNumber <= ")
        .push_argument(paging_value(paging.last_row()?)?, None)
        .push_str(")");
    Ok(out.into_query().with_timeout_of(query))
}

/// `OFFSET .. ROWS FETCH NEXT .. ROWS ONLY`, which requires an `ORDER BY`.
pub(crate) fn offset_fetch_page_query(
    chars: &SqlCharacters,
    query: &SqlQuery,
    paging: PagingOptions,
) -> Result<SqlQuery> {
    let sql = require_select(query, chars, "paged")?;
    let mut out = StatementWriter::with_arguments_of(chars, query);
    out.push_str(statement_text(&sql));
    if !sql.has(Clause::OrderBy) {
        out.push_str(" ORDER BY (SELECT NULL)");
    }
    out.push_str(" OFFSET ")
        .push_argument(paging_value(paging.offset)?, None)
        .push_str(" ROWS FETCH NEXT ")
        .push_argument(paging_value(paging.count)?, None)
        .push_str(" ROWS ONLY");
    Ok(out.into_query().with_timeout_of(query))
}

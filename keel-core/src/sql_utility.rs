use crate::{
    Clause, KeelError, Result, SqlCharacters, SqlString,
    sql_string::{is_word_char, quoted_len},
};
use std::{collections::HashSet, ops::Range};

#[derive(Debug)]
struct ParameterToken<'s> {
    range: Range<usize>,
    name: &'s str,
    declared: bool,
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Every parameter reference in the text, string literals and delimited identifiers excluded.
fn parameter_tokens<'s>(text: &'s str, chars: &SqlCharacters) -> Vec<ParameterToken<'s>> {
    let prefix = chars.sql_parameter;
    let mut result = Vec::new();
    let mut last_word = "";
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];
        if let Some(len) = quoted_len(rest, chars) {
            last_word = "";
            i += len;
            continue;
        }
        if rest.starts_with("::") {
            i += 2;
            continue;
        }
        if !prefix.is_empty() && rest.starts_with(prefix) {
            if !chars.supports_named_parameters {
                result.push(ParameterToken {
                    range: i..i + prefix.len(),
                    name: prefix,
                    declared: false,
                });
                i += prefix.len();
                continue;
            }
            let after = &rest[prefix.len()..];
            if after.starts_with(prefix) {
                // System variables like @@IDENTITY
                let after = &after[prefix.len()..];
                i += 2 * prefix.len() + after.find(|c| !is_name_char(c)).unwrap_or(after.len());
                continue;
            }
            let preceded = text[..i].chars().next_back().is_some_and(is_name_char);
            let name_len = if after.starts_with(|c: char| c.is_alphabetic() || c == '_') {
                after.find(|c| !is_name_char(c)).unwrap_or(after.len())
            } else {
                0
            };
            if !preceded && name_len > 0 {
                let end = i + prefix.len() + name_len;
                result.push(ParameterToken {
                    range: i..end,
                    name: &text[i..end],
                    declared: last_word.eq_ignore_ascii_case("DECLARE"),
                });
                last_word = "";
                i = end;
                continue;
            }
        }
        let Some(c) = rest.chars().next() else {
            break;
        };
        if is_word_char(c) {
            let len = rest.find(|c| !is_word_char(c)).unwrap_or(rest.len());
            last_word = &rest[..len];
            i += len;
            continue;
        }
        if !c.is_whitespace() {
            last_word = "";
        }
        i += c.len_utf8();
    }
    result
}

/// Index of a generated placeholder (`@p12` -> 12).
pub(crate) fn placeholder_index(name: &str, chars: &SqlCharacters) -> Option<usize> {
    let digits = name.strip_prefix(chars.sql_parameter)?.strip_prefix('p')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    atoi::atoi(digits.as_bytes())
}

/// Shifts every generated placeholder `<prefix>pN` to `<prefix>p(N + offset)`.
///
/// All the references to the same index move together, text inside string literals and delimited
/// identifiers is left alone. Positional placeholders have no index and are returned unchanged.
pub fn renumber_parameters(command_text: &str, offset: usize, chars: &SqlCharacters) -> String {
    if offset == 0 || !chars.supports_named_parameters {
        return command_text.to_string();
    }
    let mut out = String::with_capacity(command_text.len() + 8);
    let mut position = 0;
    for token in parameter_tokens(command_text, chars) {
        let Some(index) = placeholder_index(token.name, chars) else {
            continue;
        };
        out.push_str(&command_text[position..token.range.start]);
        chars.write_parameter_name(&mut out, index + offset);
        position = token.range.end;
    }
    out.push_str(&command_text[position..]);
    out
}

/// Distinct parameters referenced by the text, in order of first appearance.
///
/// Variables declared in the text itself (`DECLARE @id`) are not parameters. Positional
/// placeholders are all distinct, one entry per occurrence.
pub fn parameter_names(command_text: &str, chars: &SqlCharacters) -> Vec<String> {
    let tokens = parameter_tokens(command_text, chars);
    if !chars.supports_named_parameters {
        return tokens.iter().map(|v| v.name.to_string()).collect();
    }
    let declared: HashSet<_> = tokens
        .iter()
        .filter(|v| v.declared)
        .map(|v| v.name.to_ascii_lowercase())
        .collect();
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|v| !declared.contains(&v.name.to_ascii_lowercase()))
        .filter(|v| seen.insert(v.name.to_ascii_lowercase()))
        .map(|v| v.name.to_string())
        .collect()
}

/// Whether the text references the generated placeholder at `position`.
pub fn references_parameter(command_text: &str, position: usize, chars: &SqlCharacters) -> bool {
    parameter_tokens(command_text, chars)
        .iter()
        .any(|v| placeholder_index(v.name, chars) == Some(position))
}

fn not_a_select(command_text: &str) -> crate::Error {
    KeelError::invalid_argument(
        "command_text",
        format!(
            "`{}` is not a select statement",
            crate::truncate_long!(command_text)
        ),
    )
    .into()
}

/// The select list of a select statement.
pub fn read_select_clause<'s>(command_text: &'s str, chars: &SqlCharacters) -> Result<&'s str> {
    let sql = SqlString::parse(command_text, chars);
    match (sql.clause(Clause::Select), sql.has(Clause::From)) {
        (Some(select), true) => Ok(select),
        _ => Err(not_a_select(command_text)),
    }
}

/// The first table of the `FROM` clause, as written.
pub fn read_table_name<'s>(command_text: &'s str, chars: &SqlCharacters) -> Result<&'s str> {
    let from = SqlString::parse(command_text, chars)
        .clause(Clause::From)
        .ok_or_else(|| not_a_select(command_text))?;
    let mut i = 0;
    while i < from.len() {
        let rest = &from[i..];
        if let Some(len) = quoted_len(rest, chars) {
            i += len;
            continue;
        }
        match rest.chars().next() {
            Some(c) if c.is_whitespace() || c == ',' || c == '(' || c == ';' => break,
            Some(c) => i += c.len_utf8(),
            None => break,
        }
    }
    Ok(&from[..i])
}

pub fn read_where_clause<'s>(command_text: &'s str, chars: &SqlCharacters) -> Option<&'s str> {
    SqlString::parse(command_text, chars).clause(Clause::Where)
}

pub fn read_group_by_clause<'s>(command_text: &'s str, chars: &SqlCharacters) -> Option<&'s str> {
    SqlString::parse(command_text, chars).clause(Clause::GroupBy)
}

pub fn read_having_clause<'s>(command_text: &'s str, chars: &SqlCharacters) -> Option<&'s str> {
    SqlString::parse(command_text, chars).clause(Clause::Having)
}

pub fn read_order_by_clause<'s>(command_text: &'s str, chars: &SqlCharacters) -> Option<&'s str> {
    SqlString::parse(command_text, chars).clause(Clause::OrderBy)
}

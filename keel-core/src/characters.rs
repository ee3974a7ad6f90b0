use crate::util::starts_with_keyword;

/// Per product SQL syntax: identifier delimiters, parameter style and statement punctuation.
///
/// Values are plain constants owned by the dialect crates, [`SqlCharacters::EMPTY`] is the
/// neutral set (no delimiters, positional `?` parameters). The set is always passed explicitly to
/// builders and generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlCharacters {
    pub left_delimiter: &'static str,
    pub right_delimiter: &'static str,
    /// Placeholder prefix (`@`, `:`) or the positional placeholder itself (`?`).
    pub sql_parameter: &'static str,
    pub supports_named_parameters: bool,
    pub select_wildcard: &'static str,
    pub like_wildcard: &'static str,
    pub statement_separator: &'static str,
    /// Keyword invoking a stored procedure, `None` when the product has none.
    pub stored_procedure_invocation_command: Option<&'static str>,
    /// Whether procedure arguments are enclosed in parentheses (`CALL proc(@a, @b)`).
    pub parenthesized_procedure_parameters: bool,
}

impl SqlCharacters {
    pub const EMPTY: SqlCharacters = SqlCharacters {
        left_delimiter: "",
        right_delimiter: "",
        sql_parameter: "?",
        supports_named_parameters: false,
        select_wildcard: "*",
        like_wildcard: "%",
        statement_separator: ";",
        stored_procedure_invocation_command: None,
        parenthesized_procedure_parameters: false,
    };

    /// Wraps the identifier in the delimiters.
    ///
    /// Already escaped identifiers are returned unchanged, dotted names are escaped one segment
    /// at a time and the select wildcard is never escaped.
    pub fn escape_sql(&self, sql: &str) -> String {
        let mut out = String::with_capacity(sql.len() + 4);
        self.write_escaped(&mut out, sql);
        out
    }

    pub fn write_escaped(&self, out: &mut String, sql: &str) {
        if self.left_delimiter.is_empty() || sql == self.select_wildcard {
            out.push_str(sql);
            return;
        }
        let mut rest = sql;
        loop {
            let segment_len = if rest.starts_with(self.left_delimiter) {
                rest[self.left_delimiter.len()..]
                    .find(self.right_delimiter)
                    .map(|i| i + self.left_delimiter.len() + self.right_delimiter.len())
                    .unwrap_or(rest.len())
            } else {
                rest.find('.').unwrap_or(rest.len())
            };
            let segment = &rest[..segment_len];
            if segment.is_empty() || segment == self.select_wildcard || self.is_escaped(segment) {
                out.push_str(segment);
            } else {
                out.push_str(self.left_delimiter);
                out.push_str(segment);
                out.push_str(self.right_delimiter);
            }
            rest = &rest[segment_len..];
            match rest.strip_prefix('.') {
                Some(next) => {
                    out.push('.');
                    rest = next;
                }
                None => {
                    out.push_str(rest);
                    break;
                }
            }
        }
    }

    pub fn is_escaped(&self, sql: &str) -> bool {
        !self.left_delimiter.is_empty()
            && sql.len() >= self.left_delimiter.len() + self.right_delimiter.len()
            && sql.starts_with(self.left_delimiter)
            && sql.ends_with(self.right_delimiter)
    }

    /// Placeholder for the argument at `position`: `@p3` for named parameters, `?` otherwise.
    pub fn get_parameter_name(&self, position: usize) -> String {
        let mut out = String::with_capacity(self.sql_parameter.len() + 4);
        self.write_parameter_name(&mut out, position);
        out
    }

    pub fn write_parameter_name(&self, out: &mut String, position: usize) {
        out.push_str(self.sql_parameter);
        if self.supports_named_parameters {
            out.push('p');
            let mut buffer = itoa::Buffer::new();
            out.push_str(buffer.format(position));
        }
    }

    /// True if the command text invokes a stored procedure.
    pub fn is_stored_procedure_call(&self, command_text: &str) -> bool {
        self.stored_procedure_invocation_command
            .is_some_and(|command| starts_with_keyword(command_text.trim_start(), command))
    }
}

impl Default for SqlCharacters {
    fn default() -> Self {
        Self::EMPTY
    }
}

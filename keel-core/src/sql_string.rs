use crate::{SqlCharacters, util::starts_with_keyword};

/// Top level clause of a select statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    Select,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
}

impl Clause {
    const ALL: [Clause; 6] = [
        Clause::Select,
        Clause::From,
        Clause::Where,
        Clause::GroupBy,
        Clause::Having,
        Clause::OrderBy,
    ];

    fn keyword(self) -> &'static str {
        match self {
            Clause::Select => "SELECT",
            Clause::From => "FROM",
            Clause::Where => "WHERE",
            Clause::GroupBy => "GROUP",
            Clause::Having => "HAVING",
            Clause::OrderBy => "ORDER",
        }
    }

    /// Length of the keyword (and its `BY`) at the start of `rest`, if it is there.
    fn matches(self, rest: &str) -> Option<usize> {
        let keyword = self.keyword();
        if !starts_with_keyword(rest, keyword) {
            return None;
        }
        match self {
            Clause::GroupBy | Clause::OrderBy => {
                let after = &rest[keyword.len()..];
                let trimmed = after.trim_start();
                starts_with_keyword(trimmed, "BY").then(|| rest.len() - trimmed.len() + 2)
            }
            _ => Some(keyword.len()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    keyword: usize,
    content: usize,
}

/// Clause boundaries of a single select statement.
///
/// The scanner skips string literals and delimited identifiers and ignores everything nested in
/// parentheses, so sub-queries and function calls never produce clause boundaries. Statements
/// nested without parentheses (`UNION`, unparenthesized derived tables) are not supported.
#[derive(Debug, Clone)]
pub struct SqlString<'s> {
    text: &'s str,
    clauses: [Option<Bounds>; 6],
}

impl<'s> SqlString<'s> {
    pub fn parse(text: &'s str, chars: &SqlCharacters) -> Self {
        let mut clauses = [None; 6];
        let mut depth = 0usize;
        let mut i = 0;
        while i < text.len() {
            let rest = &text[i..];
            if let Some(len) = quoted_len(rest, chars) {
                i += len;
                continue;
            }
            let Some(c) = rest.chars().next() else {
                break;
            };
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                c if is_word_char(c) => {
                    if depth == 0 {
                        for clause in Clause::ALL {
                            let slot = &mut clauses[clause as usize];
                            if slot.is_some() {
                                continue;
                            }
                            if let Some(len) = clause.matches(rest) {
                                *slot = Some(Bounds {
                                    keyword: i,
                                    content: i + len,
                                });
                                break;
                            }
                        }
                    }
                    i += rest.find(|c| !is_word_char(c)).unwrap_or(rest.len());
                    continue;
                }
                _ => {}
            }
            i += c.len_utf8();
        }
        Self { text, clauses }
    }

    pub fn text(&self) -> &'s str {
        self.text
    }

    /// The trimmed content of the clause, without its keyword.
    pub fn clause(&self, clause: Clause) -> Option<&'s str> {
        let bounds = self.clauses[clause as usize]?;
        let end = self
            .clauses
            .iter()
            .flatten()
            .map(|v| v.keyword)
            .filter(|v| *v >= bounds.content)
            .min()
            .unwrap_or(self.text.len());
        Some(self.text[bounds.content..end].trim().trim_end_matches(';').trim_end())
    }

    /// Byte position of the clause keyword.
    pub fn keyword_position(&self, clause: Clause) -> Option<usize> {
        self.clauses[clause as usize].map(|v| v.keyword)
    }

    pub fn has(&self, clause: Clause) -> bool {
        self.clauses[clause as usize].is_some()
    }

    /// The statement text up to the clause keyword, or the whole statement if the clause is absent.
    pub fn before(&self, clause: Clause) -> &'s str {
        match self.clauses[clause as usize] {
            Some(bounds) => self.text[..bounds.keyword].trim_end(),
            None => self.text.trim_end().trim_end_matches(';').trim_end(),
        }
    }

    /// The statement text from the clause keyword included, empty if the clause is absent.
    pub fn from(&self, clause: Clause) -> &'s str {
        match self.clauses[clause as usize] {
            Some(bounds) => self.text[bounds.keyword..].trim_end().trim_end_matches(';'),
            None => "",
        }
    }
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '@' || c == '$' || c == '#'
}

/// Length of the string literal or delimited identifier starting `rest`, if any.
///
/// An unterminated region extends to the end of the text.
pub(crate) fn quoted_len(rest: &str, chars: &SqlCharacters) -> Option<usize> {
    let (open, close) = if rest.starts_with('\'') {
        ("'", "'")
    } else if !chars.left_delimiter.is_empty() && rest.starts_with(chars.left_delimiter) {
        (chars.left_delimiter, chars.right_delimiter)
    } else {
        return None;
    };
    Some(
        rest[open.len()..]
            .find(close)
            .map(|i| open.len() + i + close.len())
            .unwrap_or(rest.len()),
    )
}

/// Writes every value through `f`, putting `separator` between consecutive writes.
///
/// A value that writes nothing does not produce a dangling separator.
pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Case insensitive `starts_with` for ASCII keywords.
pub fn starts_with_keyword(value: &str, keyword: &str) -> bool {
    value.len() >= keyword.len()
        && value.as_bytes()[..keyword.len()].eq_ignore_ascii_case(keyword.as_bytes())
        && value[keyword.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric() && c != '_')
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            &$query[..$query
                .char_indices()
                .map(|(i, _)| i)
                .nth(497)
                .unwrap_or($query.len())]
                .trim_end(),
            if $query.chars().nth(497).is_some() {
                "..."
            } else {
                ""
            },
        )
    };
}

use crate::domain::Clause;
use crate::expr::escape::unescape;
use crate::expr::CLAUSE_SEPARATOR;

/// Parses an expression string back into its clauses.
///
/// Accepts both `(a == 'x' AND b == 'y')` and the backend's native
/// `((a == 'x') AND (b == 'y'))`. Segments that are not `tag operator 'value'`
/// are dropped without error, which includes the unquoted numeric form.
pub fn parse(expression: &str) -> Vec<Clause> {
    segments(expression).into_iter().flatten().collect()
}

/// Splits an expression into its segments, `None` marking those that did not
/// parse.
pub(crate) fn segments(expression: &str) -> Vec<Option<Clause>> {
    let inner = expression.strip_prefix('(').unwrap_or(expression);
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    if inner.is_empty() {
        return Vec::new();
    }

    inner.split(CLAUSE_SEPARATOR).map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> Option<Clause> {
    let segment = segment
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(segment);

    let tag_end = segment
        .find(|ch: char| !is_word_char(ch))
        .unwrap_or(segment.len());
    if tag_end == 0 {
        return None;
    }
    let (tag, rest) = segment.split_at(tag_end);

    let rest = skip_whitespace(rest)?;
    let operator_end = rest.find(char::is_whitespace)?;
    let (operator, rest) = rest.split_at(operator_end);

    let rest = skip_whitespace(rest)?;
    let quoted = rest.strip_prefix('\'')?.strip_suffix('\'')?;

    Some(Clause::new(tag, operator, unescape(quoted)))
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Strips leading whitespace, requiring at least one whitespace character.
fn skip_whitespace(input: &str) -> Option<&str> {
    let trimmed = input.trim_start();
    (trimmed.len() < input.len()).then_some(trimmed)
}

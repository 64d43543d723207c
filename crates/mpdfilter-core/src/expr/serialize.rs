use crate::domain::Clause;
use crate::expr::render::{render_clause, RenderOptions};
use crate::expr::CLAUSE_SEPARATOR;

/// Builds the expression for `committed` followed by `pending`.
///
/// A pending clause with an empty value counts as absent. With nothing to
/// render the result is `""`, never `"()"`.
pub fn serialize(
    committed: &[Clause],
    pending: Option<&Clause>,
    options: &RenderOptions,
) -> String {
    let pending = pending.filter(|clause| !clause.value().is_empty());
    let rendered: Vec<String> = committed
        .iter()
        .chain(pending)
        .map(|clause| render_clause(clause, options))
        .collect();

    if rendered.is_empty() {
        return String::new();
    }
    format!("({})", rendered.join(CLAUSE_SEPARATOR))
}

use std::borrow::Cow;

use crate::domain::{Clause, Operator};
use crate::expr::escape::escape;

/// Capabilities reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub starts_with: bool,
    pub pcre: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            starts_with: true,
            pcre: true,
        }
    }
}

/// The view an expression is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Direct database listing; operators are sent exactly as chosen.
    DatabaseList,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub features: Features,
    pub view: View,
}

impl RenderOptions {
    pub fn new(features: Features, view: View) -> Self {
        Self { features, view }
    }
}

/// Operator and value that will actually be written for `clause`.
///
/// `starts_with` is rewritten outside the database listing when the backend
/// lacks it: to an anchored regex if regexes are available, else to
/// `contains`. The clause itself is never modified.
pub fn effective_operator<'a>(
    clause: &'a Clause,
    options: &RenderOptions,
) -> (Operator, Cow<'a, str>) {
    let operator = clause.operator();
    let downgrade = *operator == Operator::StartsWith
        && options.view != View::DatabaseList
        && !options.features.starts_with;

    if !downgrade {
        return (operator.clone(), Cow::Borrowed(clause.value()));
    }
    if options.features.pcre {
        (Operator::Regex, Cow::Owned(format!("^{}", clause.value())))
    } else {
        (Operator::Contains, Cow::Borrowed(clause.value()))
    }
}

/// Renders a single clause as `tag operator 'value'`.
///
/// The numeric operator writes its value bare and unescaped.
pub fn render_clause(clause: &Clause, options: &RenderOptions) -> String {
    let (operator, value) = effective_operator(clause, options);
    if operator.is_quoted() {
        format!("{} {} '{}'", clause.tag(), operator, escape(&value))
    } else {
        format!("{} {} {}", clause.tag(), operator, value)
    }
}

mod escape;
mod parser;
mod render;
mod serialize;

pub use escape::{escape, unescape};
pub use parser::parse;
pub(crate) use parser::segments;
pub use render::{effective_operator, render_clause, Features, RenderOptions, View};
pub use serialize::serialize;

pub(crate) const CLAUSE_SEPARATOR: &str = " AND ";

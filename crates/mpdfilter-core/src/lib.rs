pub mod domain;
pub mod error;
pub mod expr;
pub mod session;

pub use domain::*;
pub use error::CoreError;
pub use expr::{escape, parse, render_clause, serialize, unescape, Features, RenderOptions, View};
pub use session::{crumbs_for_display, Debounce, SearchSession};

pub mod clause;
pub mod operator;

pub use clause::Clause;
pub use operator::Operator;

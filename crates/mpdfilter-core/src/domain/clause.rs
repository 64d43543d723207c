use crate::domain::operator::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    tag: String,
    operator: Operator,
    value: String,
}

impl Clause {
    pub fn new(
        tag: impl Into<String>,
        operator: impl Into<Operator>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_parts(self) -> (String, Operator, String) {
        (self.tag, self.operator, self.value)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} '{}'", self.tag, self.operator, self.value)
    }
}

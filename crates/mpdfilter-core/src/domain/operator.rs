use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Operator {
    Equal,
    NotEqual,
    Contains,
    NotContains,
    StartsWith,
    Regex,
    NotRegex,
    GreaterOrEqual,
    Other(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Contains => "contains",
            Operator::NotContains => "!contains",
            Operator::StartsWith => "starts_with",
            Operator::Regex => "=~",
            Operator::NotRegex => "!~",
            Operator::GreaterOrEqual => ">=",
            Operator::Other(token) => token,
        }
    }

    /// Whether the value is written as a single-quoted literal.
    pub fn is_quoted(&self) -> bool {
        !matches!(self, Operator::GreaterOrEqual)
    }
}

impl FromStr for Operator {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(match raw {
            "==" => Operator::Equal,
            "!=" => Operator::NotEqual,
            "contains" => Operator::Contains,
            "!contains" => Operator::NotContains,
            "starts_with" => Operator::StartsWith,
            "=~" => Operator::Regex,
            "!~" => Operator::NotRegex,
            ">=" => Operator::GreaterOrEqual,
            other => Operator::Other(other.to_string()),
        })
    }
}

impl From<&str> for Operator {
    fn from(raw: &str) -> Self {
        match raw.parse() {
            Ok(op) => op,
            Err(never) => match never {},
        }
    }
}

impl From<String> for Operator {
    fn from(raw: String) -> Self {
        Operator::from(raw.as_str())
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Other(token) => token,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

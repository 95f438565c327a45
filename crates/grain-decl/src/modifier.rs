use std::fmt;

use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// One entry of a declaration's modifier list, in source order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierEntry {
    /// A modifier keyword as written, e.g. `public` or `static`.
    Keyword(String),
    Annotation(Annotation),
}

impl ModifierEntry {
    /// A modifier keyword such as `public`.
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self::Keyword(keyword.into())
    }

    /// A marker annotation `@name`.
    pub fn marker(name: impl Into<String>) -> Self {
        Self::Annotation(Annotation::Marker { name: name.into() })
    }
}

/// An annotation use site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// `@Name`
    Marker { name: String },
    /// `@Name(value)`
    Single { name: String, value: Expr },
    /// `@Name(k1 = v1, k2 = v2)`
    Normal { name: String, pairs: Vec<MemberValuePair> },
}

impl Annotation {
    /// The annotation type name, without `@`.
    pub fn name(&self) -> &str {
        match self {
            Self::Marker { name } | Self::Single { name, .. } | Self::Normal { name, .. } => name,
        }
    }
}

/// Source form, as used when an annotation appears nested in an expression.
impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marker { name } => write!(f, "@{name}"),
            Self::Single { name, value } => write!(f, "@{name}({value})"),
            Self::Normal { name, pairs } => {
                write!(f, "@{name}(")?;
                for (i, pair) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}={}", pair.name, pair.value)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// One `name = value` element of a normal annotation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberValuePair {
    pub name: String,
    pub value: Expr,
}

impl MemberValuePair {
    /// `name = value`.
    pub fn new(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::modifier::Annotation;

/// Expression tree for annotation arguments and field initializers.
///
/// Leaves keep their source tokens verbatim; composite nodes render with the
/// same spacing a Java pretty-printer uses (`1 + 1`, `(int)x`, `{a,b}`).
/// Anything the front-end does not break down further arrives as
/// [`Expr::Raw`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// A literal token as written: `42`, `0x1F`, `10L`, `1.5f`, `'a'`,
    /// `"text"`, `true`, `null`.
    Literal(String),
    /// A simple or qualified name.
    Name(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Paren(Box<Expr>),
    Cast {
        ty: String,
        expr: Box<Expr>,
    },
    /// `Type.class`; holds the type text.
    ClassLiteral(String),
    /// `{a, b}` in annotation element values.
    ArrayInit(Vec<Expr>),
    Annotation(Box<Annotation>),
    /// Opaque source text.
    Raw(String),
}

impl Expr {
    /// A raw literal token, e.g. `0x1F` or `"text"`.
    pub fn literal(token: impl Into<String>) -> Self {
        Self::Literal(token.into())
    }

    /// A simple or qualified name.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// `op operand`.
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// `left op right`.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `(inner)`.
    pub fn paren(inner: Expr) -> Self {
        Self::Paren(Box::new(inner))
    }

    /// `(ty) expr`.
    pub fn cast(ty: impl Into<String>, expr: Expr) -> Self {
        Self::Cast {
            ty: ty.into(),
            expr: Box::new(expr),
        }
    }

    /// `condition ? then : otherwise`.
    pub fn conditional(condition: Expr, then: Expr, otherwise: Expr) -> Self {
        Self::Conditional {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }
}

/// Source form of the expression.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) | Self::Name(text) | Self::Raw(text) => f.write_str(text),
            Self::Unary { op, operand } => write!(f, "{op}{operand}"),
            Self::Binary { op, left, right } => write!(f, "{left} {op} {right}"),
            Self::Conditional {
                condition,
                then,
                otherwise,
            } => write!(f, "{condition} ? {then} : {otherwise}"),
            Self::Paren(inner) => write!(f, "({inner})"),
            Self::Cast { ty, expr } => write!(f, "({ty}){expr}"),
            Self::ClassLiteral(ty) => write!(f, "{ty}.class"),
            Self::ArrayInit(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Self::Annotation(annotation) => write!(f, "{annotation}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Plus,
    Minus,
    /// `!`
    Not,
    /// `~`
    Complement,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "!",
            Self::Complement => "~",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Shl,
    Shr,
    /// `>>>`
    UShr,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::And => "&&",
            Self::Or => "||",
        })
    }
}

//! Compile-time constant folding.
//!
//! Follows the Java rules for constant expressions: 32- and 64-bit two's
//! complement arithmetic that wraps on overflow, binary numeric promotion,
//! masked shift distances, IEEE float arithmetic, string concatenation and
//! primitive casts. Names are never resolved, so an expression referring to
//! another constant by name is not itself a constant here.

use std::fmt;
use std::ops::{Add, Div, Mul, Rem, Sub};

use crate::error::{malformed, DeclResult};
use crate::expr::{BinaryOp, Expr, UnaryOp};

/// The value of a constant expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

/// Renders the way Java's `String.valueOf` does: `2`, `2.0`, `1.0E10`,
/// `true`, the bare character, the bare string contents.
impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&java_floating(
                f64::from(*v),
                format!("{v}"),
                format!("{v:e}"),
            )),
            Self::Double(v) => f.write_str(&java_floating(*v, format!("{v}"), format!("{v:e}"))),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

/// Java's `Double.toString` layout given Rust's shortest round-trip digits.
fn java_floating(value: f64, plain: String, scientific: String) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        };
    }

    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}

impl Expr {
    /// Fold this expression if it is a compile-time constant.
    ///
    /// Returns `Ok(None)` for expressions that are well formed but not
    /// constant (names, class literals, division by zero, `null`, ...), and
    /// an error only for literal tokens that are not valid Java literals.
    pub fn constant(&self) -> DeclResult<Option<Constant>> {
        match self {
            Self::Literal(token) => parse_literal(token),
            Self::Paren(inner) => inner.constant(),
            Self::Unary { op, operand } => {
                if *op == UnaryOp::Minus {
                    if let Self::Literal(token) = operand.as_ref() {
                        if let Some(min) = negated_min_literal(token) {
                            return Ok(Some(min));
                        }
                    }
                }
                Ok(operand.constant()?.and_then(|value| unary(*op, value)))
            }
            Self::Binary { op, left, right } => {
                let (Some(left), Some(right)) = (left.constant()?, right.constant()?) else {
                    return Ok(None);
                };
                Ok(binary(*op, left, right))
            }
            Self::Conditional {
                condition,
                then,
                otherwise,
            } => {
                let (Some(Constant::Bool(condition)), Some(then), Some(otherwise)) =
                    (condition.constant()?, then.constant()?, otherwise.constant()?)
                else {
                    return Ok(None);
                };
                Ok(conditional(condition, then, otherwise))
            }
            Self::Cast { ty, expr } => Ok(expr.constant()?.and_then(|value| cast(ty, value))),
            Self::Name(_)
            | Self::ClassLiteral(_)
            | Self::ArrayInit(_)
            | Self::Annotation(_)
            | Self::Raw(_) => Ok(None),
        }
    }

    /// The folded constant's text when constant, otherwise the source form.
    pub fn rendered_value(&self) -> DeclResult<String> {
        Ok(match self.constant()? {
            Some(value) => value.to_string(),
            None => self.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

/// Parse one Java literal token.
pub fn parse_literal(token: &str) -> DeclResult<Option<Constant>> {
    match token {
        "true" => return Ok(Some(Constant::Bool(true))),
        "false" => return Ok(Some(Constant::Bool(false))),
        "null" => return Ok(None),
        _ => {}
    }

    if token.starts_with("\"\"\"") {
        // Text blocks need indentation stripping; keep their source form.
        return Ok(None);
    }
    if let Some(rest) = token.strip_prefix('"') {
        let inner = rest
            .strip_suffix('"')
            .ok_or_else(|| malformed(token, "unterminated string literal"))?;
        return Ok(unescape(token, inner)?.map(Constant::Str));
    }
    if let Some(rest) = token.strip_prefix('\'') {
        let inner = rest
            .strip_suffix('\'')
            .ok_or_else(|| malformed(token, "unterminated character literal"))?;
        let Some(text) = unescape(token, inner)? else {
            return Ok(None);
        };
        let mut chars = text.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Some(Constant::Char(c))),
            _ => Err(malformed(token, "character literal must hold one character")),
        };
    }

    parse_number(token)
}

/// `2147483648` and `9223372036854775808L` are only legal under unary minus.
fn negated_min_literal(token: &str) -> Option<Constant> {
    let cleaned: String = token.chars().filter(|c| *c != '_').collect();
    match cleaned.as_str() {
        "2147483648" => Some(Constant::Int(i32::MIN)),
        "9223372036854775808L" | "9223372036854775808l" => Some(Constant::Long(i64::MIN)),
        _ => None,
    }
}

fn parse_number(token: &str) -> DeclResult<Option<Constant>> {
    let lower: String = token
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if lower.is_empty() || !lower.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Err(malformed(token, "not a literal"));
    }

    let hex = lower.starts_with("0x");
    if hex && (lower.contains('.') || lower.contains('p')) {
        // Hexadecimal floating point; rare enough to keep as source.
        return Ok(None);
    }

    let floating = !hex
        && (lower.contains('.')
            || lower.contains('e')
            || lower.ends_with('f')
            || lower.ends_with('d'));
    if floating {
        if let Some(digits) = lower.strip_suffix('f') {
            let value: f32 = digits
                .parse()
                .map_err(|_| malformed(token, "invalid float literal"))?;
            if value.is_infinite() {
                return Err(malformed(token, "float literal out of range"));
            }
            return Ok(Some(Constant::Float(value)));
        }
        let digits = lower.strip_suffix('d').unwrap_or(&lower);
        let value: f64 = digits
            .parse()
            .map_err(|_| malformed(token, "invalid double literal"))?;
        if value.is_infinite() {
            return Err(malformed(token, "double literal out of range"));
        }
        return Ok(Some(Constant::Double(value)));
    }

    let (digits, long) = match lower.strip_suffix('l') {
        Some(digits) => (digits, true),
        None => (lower.as_str(), false),
    };
    let (radix, body) = if let Some(body) = digits.strip_prefix("0x") {
        (16, body)
    } else if let Some(body) = digits.strip_prefix("0b") {
        (2, body)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return Err(malformed(token, format!("invalid digits for radix {radix}")));
    }

    let value = u64::from_str_radix(body, radix)
        .map_err(|_| malformed(token, "integer literal out of range"))?;
    let limit = match (long, radix) {
        (true, 10) => i64::MAX as u64,
        (true, _) => u64::MAX,
        (false, 10) => i32::MAX as u64,
        (false, _) => u64::from(u32::MAX),
    };
    if value > limit {
        return Err(malformed(token, "integer literal out of range"));
    }

    Ok(Some(if long {
        Constant::Long(value as i64)
    } else {
        Constant::Int(value as u32 as i32)
    }))
}

/// Resolve Java escape sequences inside a string or character literal.
///
/// `None` when the UTF-16 units hold an unpaired surrogate: legal Java, but
/// not representable as a Rust `String`.
fn unescape(token: &str, inner: &str) -> DeclResult<Option<String>> {
    let mut units: Vec<u16> = Vec::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }

        let escaped = chars
            .next()
            .ok_or_else(|| malformed(token, "dangling escape"))?;
        let unit = match escaped {
            'n' => u16::from(b'\n'),
            't' => u16::from(b'\t'),
            'b' => 0x08,
            'r' => u16::from(b'\r'),
            'f' => 0x0c,
            's' => u16::from(b' '),
            '"' | '\'' | '\\' => escaped as u16,
            'u' => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return Err(malformed(token, "truncated unicode escape"));
                }
                u16::from_str_radix(&hex, 16)
                    .map_err(|_| malformed(token, "invalid unicode escape"))?
            }
            '0'..='7' => {
                let max_len = if escaped <= '3' { 3 } else { 2 };
                let mut value = escaped.to_digit(8).unwrap_or(0);
                for _ in 1..max_len {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                value as u16
            }
            other => return Err(malformed(token, format!("unknown escape \\{other}"))),
        };
        units.push(unit);
    }

    Ok(String::from_utf16(&units).ok())
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// A value after unary numeric promotion.
#[derive(Clone, Copy)]
enum Num {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Num {
    fn of(value: &Constant) -> Option<Self> {
        match value {
            Constant::Int(v) => Some(Self::Int(*v)),
            Constant::Long(v) => Some(Self::Long(*v)),
            Constant::Float(v) => Some(Self::Float(*v)),
            Constant::Double(v) => Some(Self::Double(*v)),
            Constant::Char(c) => Some(Self::Int(*c as u32 as i32)),
            Constant::Bool(_) | Constant::Str(_) => None,
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Int(_) => 0,
            Self::Long(_) => 1,
            Self::Float(_) => 2,
            Self::Double(_) => 3,
        }
    }

    fn to_i32(self) -> i32 {
        match self {
            Self::Int(v) => v,
            Self::Long(v) => v as i32,
            Self::Float(v) => v as i32,
            Self::Double(v) => v as i32,
        }
    }

    fn to_i64(self) -> i64 {
        match self {
            Self::Int(v) => i64::from(v),
            Self::Long(v) => v,
            Self::Float(v) => v as i64,
            Self::Double(v) => v as i64,
        }
    }

    fn to_f32(self) -> f32 {
        match self {
            Self::Int(v) => v as f32,
            Self::Long(v) => v as f32,
            Self::Float(v) => v,
            Self::Double(v) => v as f32,
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Self::Int(v) => f64::from(v),
            Self::Long(v) => v as f64,
            Self::Float(v) => f64::from(v),
            Self::Double(v) => v,
        }
    }

    fn into_constant(self) -> Constant {
        match self {
            Self::Int(v) => Constant::Int(v),
            Self::Long(v) => Constant::Long(v),
            Self::Float(v) => Constant::Float(v),
            Self::Double(v) => Constant::Double(v),
        }
    }
}

/// Binary numeric promotion: both operands widened to the larger rank.
fn promote(left: Num, right: Num) -> (Num, Num) {
    match left.rank().max(right.rank()) {
        0 => (left, right),
        1 => (Num::Long(left.to_i64()), Num::Long(right.to_i64())),
        2 => (Num::Float(left.to_f32()), Num::Float(right.to_f32())),
        _ => (Num::Double(left.to_f64()), Num::Double(right.to_f64())),
    }
}

fn unary(op: UnaryOp, value: Constant) -> Option<Constant> {
    if op == UnaryOp::Not {
        return match value {
            Constant::Bool(b) => Some(Constant::Bool(!b)),
            _ => None,
        };
    }

    let num = Num::of(&value)?;
    Some(match (op, num) {
        (UnaryOp::Plus, num) => num.into_constant(),
        (UnaryOp::Minus, Num::Int(v)) => Constant::Int(v.wrapping_neg()),
        (UnaryOp::Minus, Num::Long(v)) => Constant::Long(v.wrapping_neg()),
        (UnaryOp::Minus, Num::Float(v)) => Constant::Float(-v),
        (UnaryOp::Minus, Num::Double(v)) => Constant::Double(-v),
        (UnaryOp::Complement, Num::Int(v)) => Constant::Int(!v),
        (UnaryOp::Complement, Num::Long(v)) => Constant::Long(!v),
        _ => return None,
    })
}

fn binary(op: BinaryOp, left: Constant, right: Constant) -> Option<Constant> {
    if op == BinaryOp::Add
        && (matches!(left, Constant::Str(_)) || matches!(right, Constant::Str(_)))
    {
        return Some(Constant::Str(format!("{left}{right}")));
    }

    if let (Constant::Bool(a), Constant::Bool(b)) = (&left, &right) {
        let (a, b) = (*a, *b);
        return Some(Constant::Bool(match op {
            BinaryOp::And | BinaryOp::BitAnd => a && b,
            BinaryOp::Or | BinaryOp::BitOr => a || b,
            BinaryOp::BitXor | BinaryOp::Ne => a != b,
            BinaryOp::Eq => a == b,
            _ => return None,
        }));
    }

    let (left, right) = (Num::of(&left)?, Num::of(&right)?);
    if matches!(op, BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr) {
        return shift(op, left, right);
    }

    match promote(left, right) {
        (Num::Int(a), Num::Int(b)) => int_op(op, a, b),
        (Num::Long(a), Num::Long(b)) => long_op(op, a, b),
        (Num::Float(a), Num::Float(b)) => floating_op(op, a, b, Constant::Float),
        (Num::Double(a), Num::Double(b)) => floating_op(op, a, b, Constant::Double),
        _ => None,
    }
}

macro_rules! integral_op {
    ($name:ident, $ty:ty, $wrap:path) => {
        fn $name(op: BinaryOp, a: $ty, b: $ty) -> Option<Constant> {
            let value = match op {
                BinaryOp::Mul => a.wrapping_mul(b),
                BinaryOp::Div if b == 0 => return None,
                BinaryOp::Div => a.wrapping_div(b),
                BinaryOp::Rem if b == 0 => return None,
                BinaryOp::Rem => a.wrapping_rem(b),
                BinaryOp::Add => a.wrapping_add(b),
                BinaryOp::Sub => a.wrapping_sub(b),
                BinaryOp::BitAnd => a & b,
                BinaryOp::BitOr => a | b,
                BinaryOp::BitXor => a ^ b,
                BinaryOp::Lt => return Some(Constant::Bool(a < b)),
                BinaryOp::Gt => return Some(Constant::Bool(a > b)),
                BinaryOp::Le => return Some(Constant::Bool(a <= b)),
                BinaryOp::Ge => return Some(Constant::Bool(a >= b)),
                BinaryOp::Eq => return Some(Constant::Bool(a == b)),
                BinaryOp::Ne => return Some(Constant::Bool(a != b)),
                _ => return None,
            };
            Some($wrap(value))
        }
    };
}

integral_op!(int_op, i32, Constant::Int);
integral_op!(long_op, i64, Constant::Long);

fn floating_op<T>(op: BinaryOp, a: T, b: T, wrap: fn(T) -> Constant) -> Option<Constant>
where
    T: Copy
        + PartialOrd
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + Rem<Output = T>,
{
    let value = match op {
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Rem => a % b,
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Lt => return Some(Constant::Bool(a < b)),
        BinaryOp::Gt => return Some(Constant::Bool(a > b)),
        BinaryOp::Le => return Some(Constant::Bool(a <= b)),
        BinaryOp::Ge => return Some(Constant::Bool(a >= b)),
        BinaryOp::Eq => return Some(Constant::Bool(a == b)),
        BinaryOp::Ne => return Some(Constant::Bool(a != b)),
        _ => return None,
    };
    Some(wrap(value))
}

/// Shifts promote each operand separately; the distance is masked to the
/// width of the left operand.
fn shift(op: BinaryOp, left: Num, right: Num) -> Option<Constant> {
    let distance = match right {
        Num::Int(v) => i64::from(v),
        Num::Long(v) => v,
        Num::Float(_) | Num::Double(_) => return None,
    };

    match left {
        Num::Int(a) => {
            let d = (distance & 0x1f) as u32;
            Some(Constant::Int(match op {
                BinaryOp::Shl => a.wrapping_shl(d),
                BinaryOp::Shr => a >> d,
                _ => ((a as u32) >> d) as i32,
            }))
        }
        Num::Long(a) => {
            let d = (distance & 0x3f) as u32;
            Some(Constant::Long(match op {
                BinaryOp::Shl => a.wrapping_shl(d),
                BinaryOp::Shr => a >> d,
                _ => ((a as u64) >> d) as i64,
            }))
        }
        Num::Float(_) | Num::Double(_) => None,
    }
}

fn conditional(condition: bool, then: Constant, otherwise: Constant) -> Option<Constant> {
    match (Num::of(&then), Num::of(&otherwise)) {
        (Some(a), Some(b)) if a.rank() != b.rank() => {
            let (a, b) = promote(a, b);
            Some((if condition { a } else { b }).into_constant())
        }
        _ => Some(if condition { then } else { otherwise }),
    }
}

fn cast(ty: &str, value: Constant) -> Option<Constant> {
    match ty.trim() {
        "String" | "java.lang.String" => match value {
            Constant::Str(_) => Some(value),
            _ => None,
        },
        "boolean" => match value {
            Constant::Bool(_) => Some(value),
            _ => None,
        },
        numeric => {
            let num = Num::of(&value)?;
            Some(match numeric {
                "byte" => Constant::Int(i32::from(num.to_i32() as i8)),
                "short" => Constant::Int(i32::from(num.to_i32() as i16)),
                "char" => Constant::Char(char::from_u32(u32::from(num.to_i32() as u16))?),
                "int" => Constant::Int(num.to_i32()),
                "long" => Constant::Long(num.to_i64()),
                "float" => Constant::Float(num.to_f32()),
                "double" => Constant::Double(num.to_f64()),
                _ => return None,
            })
        }
    }
}

//! Validation of tree and blob names.
//!
//! Names become path segments when a tree is flattened, so a valid name:
//! - Must be non-empty (the empty name is reserved for the absolute root)
//! - Must not contain `/`, which separates path segments
//! - Must not contain a newline or NUL, which would break tree listings

use crate::error::{ObjectError, ObjectResult};

/// Characters that are forbidden anywhere in an object name.
const FORBIDDEN_CHARS: &[char] = &['/', '\n', '\r', '\0'];

/// Validate a tree or blob name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use grain_object::names::validate_name;
///
/// assert!(validate_name("modifiers").is_ok());
/// assert!(validate_name("foo(int[],String...)").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("a/b").is_err());
/// ```
pub fn validate_name(name: &str) -> ObjectResult<()> {
    if name.is_empty() {
        return Err(ObjectError::InvalidName {
            name: name.to_string(),
            reason: "name must not be empty".into(),
        });
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(ObjectError::InvalidName {
                name: name.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }

    Ok(())
}

/// Returns `true` if `name` passes [`validate_name`].
pub fn is_valid_name(name: &str) -> bool {
    validate_name(name).is_ok()
}

//! Field declarations: one blob per declared field name.

use grain_decl::FieldDeclaration;
use grain_object::{validate_name, Blob};

use crate::error::{MapError, MapResult};
use crate::modifiers::render_modifiers;

/// Map one field declaration to its blobs, in fragment order.
///
/// `int a, b[] = {1};` yields blobs `a` and `b`. Each body holds the modifier
/// lines, the field type with the fragment's extra dimensions, and the
/// initializer source when present:
///
/// ```text
/// private
/// static
/// int[]
/// {1}
/// ```
pub fn map_field(decl: &FieldDeclaration) -> MapResult<Vec<Blob>> {
    decl.fragments
        .iter()
        .map(|fragment| {
            validate_name(&fragment.name)
                .map_err(|source| MapError::InvalidName { kind: "field", source })?;

            let mut body = render_modifiers(&decl.modifiers, &fragment.name)?;
            body.push_str(&decl.ty);
            for _ in 0..fragment.extra_dimensions {
                body.push_str("[]");
            }
            body.push('\n');
            if let Some(initializer) = &fragment.initializer {
                body.push_str(&initializer.to_string());
                body.push('\n');
            }

            Ok(Blob::new(fragment.name.clone(), body))
        })
        .collect()
}

use grain_decl::{MethodDeclaration, Parameter};
use grain_object::{validate_name, Blob, Tree};

use crate::error::{MapError, MapResult};
use crate::modifiers::method_visibility;
use crate::tokens::{BODY_BLOB, CONFLICT_INFIX, MODIFIERS_BLOB, PARAMETERS_BLOB, RETURN_BLOB};

/// Type text of a parameter: the declared type, one `[]` per extra
/// dimension, then `...` when variadic.
pub fn render_parameter_type(parameter: &Parameter) -> String {
    let mut rendered = parameter.ty.clone();
    for _ in 0..parameter.extra_dimensions {
        rendered.push_str("[]");
    }
    if parameter.varargs {
        rendered.push_str("...");
    }
    rendered
}

/// Canonical signature: `name(T1,T2,...)`. Parameter names and modifiers
/// play no part.
pub fn canonical_signature(decl: &MethodDeclaration) -> String {
    let types: Vec<String> = decl.parameters.iter().map(render_parameter_type).collect();
    format!("{}({})", decl.name, types.join(","))
}

/// A method mapped to its tree, before conflict resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappedMethod {
    signature: String,
    constructor: bool,
    tree: Tree,
}

impl MappedMethod {
    /// Signature captured at construction. Never changes, even after the
    /// tree is renamed.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Returns `true` for constructors, which skip conflict resolution.
    pub fn is_constructor(&self) -> bool {
        self.constructor
    }

    /// The mapped tree, under its current name.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Unwrap the tree for attachment.
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Rename the tree to `<signature>.conflicted<number>`.
    pub fn mark_conflicted(&mut self, number: usize) {
        self.tree
            .set_name(format!("{}{CONFLICT_INFIX}{number}", self.signature));
    }
}

/// Map one method declaration to a tree named by its canonical signature.
///
/// The tree holds `body` (empty without a body), `parameters` (one
/// `<type> <name>` line each), `modifiers` (the single visibility line) and,
/// when a return type is declared, `return`.
pub fn map_method(decl: &MethodDeclaration) -> MapResult<MappedMethod> {
    validate_name(&decl.name).map_err(|source| MapError::InvalidName {
        kind: "method",
        source,
    })?;
    let signature = canonical_signature(decl);
    validate_name(&signature).map_err(|source| MapError::InvalidName {
        kind: "method signature",
        source,
    })?;

    let mut tree = Tree::new(signature.clone());
    tree.append_blob(Blob::new(BODY_BLOB, decl.body.clone().unwrap_or_default()));

    let mut parameters = String::new();
    for parameter in &decl.parameters {
        parameters.push_str(&render_parameter_type(parameter));
        parameters.push(' ');
        parameters.push_str(&parameter.name);
        parameters.push('\n');
    }
    tree.append_blob(Blob::new(PARAMETERS_BLOB, parameters));

    let visibility = method_visibility(&decl.modifiers, &signature)?;
    tree.append_blob(Blob::new(MODIFIERS_BLOB, format!("{visibility}\n")));

    if let Some(return_type) = &decl.return_type {
        tree.append_blob(Blob::new(RETURN_BLOB, format!("{return_type}\n")));
    }

    Ok(MappedMethod {
        signature,
        constructor: decl.constructor,
        tree,
    })
}

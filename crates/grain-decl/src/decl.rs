//! The declaration-tree input contract.
//!
//! A front-end parser produces one [`CompilationUnit`] per source file. Only
//! the shapes below are understood; member kinds are closed enums so every
//! consumer matches them exhaustively.

use serde::{Deserialize, Serialize};

use crate::expr::Expr;
use crate::modifier::ModifierEntry;

/// One parsed source file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Dotted package name, absent for the default package.
    #[serde(default)]
    pub package: Option<String>,
    /// Top-level type declarations in source order.
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// A top-level type declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDecl {
    /// Class or interface.
    Type(TypeDeclaration),
    Enum(EnumDeclaration),
}

impl TypeDecl {
    /// The declared simple name.
    pub fn name(&self) -> &str {
        match self {
            Self::Type(decl) => &decl.name,
            Self::Enum(decl) => &decl.name,
        }
    }
}

/// A class or interface declaration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<ModifierEntry>,
    /// `true` for `interface` declarations.
    #[serde(default)]
    pub interface: bool,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    /// Rendered superclass type, e.g. `AbstractList<E>`.
    #[serde(default)]
    pub superclass: Option<String>,
    /// Rendered superinterface types in declaration order.
    #[serde(default)]
    pub super_interfaces: Vec<String>,
    #[serde(default)]
    pub body: Vec<BodyMember>,
}

/// An enum declaration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDeclaration {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<ModifierEntry>,
    #[serde(default)]
    pub super_interfaces: Vec<String>,
    #[serde(default)]
    pub constants: Vec<EnumConstant>,
    #[serde(default)]
    pub body: Vec<BodyMember>,
}

/// One enum constant, optionally with an anonymous class body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumConstant {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<ModifierEntry>,
    #[serde(default)]
    pub body: Option<Vec<BodyMember>>,
}

/// A type parameter. Bounds are carried but not rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<String>,
}

impl TypeParameter {
    /// An unbounded type parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }
}

/// A member of a type body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyMember {
    Field(FieldDeclaration),
    Method(MethodDeclaration),
    /// Nested class or interface.
    Type(TypeDeclaration),
    /// Nested enum.
    Enum(EnumDeclaration),
}

/// A method or constructor declaration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<ModifierEntry>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Rendered return type; absent for constructors.
    #[serde(default)]
    pub return_type: Option<String>,
    /// Raw body text including braces; absent for abstract methods.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub constructor: bool,
}

/// A formal parameter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Rendered type, without the variadic marker.
    pub ty: String,
    pub name: String,
    /// `[]` pairs written after the parameter name (`int xs[]`).
    #[serde(default)]
    pub extra_dimensions: u32,
    #[serde(default)]
    pub varargs: bool,
    #[serde(default)]
    pub modifiers: Vec<ModifierEntry>,
}

impl Parameter {
    /// A plain parameter: no extra dimensions, not variadic, no modifiers.
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A field declaration; one declaration may introduce several fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    #[serde(default)]
    pub modifiers: Vec<ModifierEntry>,
    pub ty: String,
    pub fragments: Vec<VariableFragment>,
}

/// One declared name within a field declaration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableFragment {
    pub name: String,
    #[serde(default)]
    pub extra_dimensions: u32,
    #[serde(default)]
    pub initializer: Option<Expr>,
}

impl VariableFragment {
    /// A fragment with no extra dimensions and no initializer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

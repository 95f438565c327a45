//! Declaration-tree input model for grain.
//!
//! A front-end parser hands over one [`CompilationUnit`] per source file:
//! package name, top-level classes, interfaces and enums, and their members.
//! The model is a closed set of tagged enums, so the mapper dispatches on it
//! with exhaustive matches, and every node is `serde`-deserialisable so the
//! tree can arrive as JSON from a parser in another process.
//!
//! Annotation arguments and field initializers are small [`Expr`] trees;
//! [`Expr::constant`] folds compile-time constants the way a Java compiler
//! does, which is what annotation rendering needs.

pub mod constant;
pub mod decl;
pub mod error;
pub mod expr;
pub mod modifier;

pub use constant::{parse_literal, Constant};
pub use decl::{
    BodyMember, CompilationUnit, EnumConstant, EnumDeclaration, FieldDeclaration,
    MethodDeclaration, Parameter, TypeDecl, TypeDeclaration, TypeParameter, VariableFragment,
};
pub use error::{DeclError, DeclResult};
pub use expr::{BinaryOp, Expr, UnaryOp};
pub use modifier::{Annotation, MemberValuePair, ModifierEntry};

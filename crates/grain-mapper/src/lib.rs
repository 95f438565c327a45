//! Maps Java declaration trees onto grain tree/blob objects.
//!
//! One compilation unit becomes one rooted [`Tree`](grain_object::Tree):
//!
//! ```text
//! org/example/                package chain
//! [CN]/Main/modifiers         top-level classes
//! [CN]/Main/run(String[])/    methods, named by canonical signature
//! [CN]/Main/[FE]/count        fields, one blob per declared name
//! [CN]/Main/[CS]/Main()/      constructors
//! [CN]/Main/[CN]/Inner/       nested classes and interfaces
//! [IN]/Service/               top-level interfaces
//! [EN]/Color/[EC]/RED/        enums and their constants
//! ```
//!
//! # Key Types
//!
//! - [`CompilationMapper`] -- entry point, maps a whole unit
//! - [`DeclarationMapper`] -- classes, interfaces, enums, enum constants
//! - [`MapperConfig`] -- conflict naming and constructor-root policy
//! - [`MapError`] -- contract violations in the input
//!
//! Mapping is synchronous and pure: the same unit always yields the same
//! tree, and a failing unit leaves a shared root untouched.

pub mod compilation;
pub mod config;
pub mod conflict;
pub mod declaration;
pub mod error;
pub mod field;
pub mod method;
pub mod modifiers;
pub mod package;
pub mod tokens;

pub use compilation::{map_compilation_unit, CompilationMapper};
pub use config::{ConflictNumbering, MapperConfig};
pub use conflict::ConflictResolver;
pub use declaration::DeclarationMapper;
pub use error::{ConfigError, MapError, MapResult};
pub use field::map_field;
pub use method::{canonical_signature, map_method, render_parameter_type, MappedMethod};
pub use modifiers::{method_visibility, modifiers_blob, render_modifiers, PACKAGE_VISIBILITY};
pub use package::{attach_package, package_segments, PackageChain};

//! Fixed tree and blob names of the output layout.

/// Category root of classes, top-level and nested.
pub const CLASS_ROOT: &str = "[CN]";
/// Category root of interfaces.
pub const INTERFACE_ROOT: &str = "[IN]";
/// Category root of enums, top-level and nested.
pub const ENUM_ROOT: &str = "[EN]";
pub const FIELD_ROOT: &str = "[FE]";
pub const CONSTRUCTOR_ROOT: &str = "[CS]";
pub const ENUM_CONSTANT_ROOT: &str = "[EC]";

pub const MODIFIERS_BLOB: &str = "modifiers";
pub const PARAMETERS_BLOB: &str = "parameters";
pub const BODY_BLOB: &str = "body";
pub const RETURN_BLOB: &str = "return";
pub const EXTEND_BLOB: &str = "extend";
pub const IMPLEMENT_BLOB: &str = "implement";
pub const TYPE_PARAMETERS_BLOB: &str = "typeparameters";

/// Infix inserted between a method signature and its conflict number.
pub const CONFLICT_INFIX: &str = ".conflicted";

use grain_decl::DeclError;
use grain_object::ObjectError;

/// Errors from mapping a declaration tree.
///
/// Every variant is a contract violation by the front-end that produced the
/// declaration tree. Mapping of the current compilation unit stops at the
/// first one and no partial tree is returned.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// A modifier-list entry is neither a known keyword nor an annotation.
    #[error("unrecognized modifier {keyword:?} on {declaration}")]
    UnrecognizedModifier { keyword: String, declaration: String },

    /// A declared name cannot become a tree or blob name.
    #[error("invalid {kind} name: {source}")]
    InvalidName {
        kind: &'static str,
        #[source]
        source: ObjectError,
    },

    /// A package name has an empty segment (`a..b`, `.a`, `a.`).
    #[error("empty segment in package name {0:?}")]
    EmptyPackageSegment(String),

    /// An annotation argument holds a malformed literal.
    #[error("malformed annotation argument on {declaration}: {source}")]
    Constant {
        declaration: String,
        #[source]
        source: DeclError,
    },
}

/// Errors from loading a [`MapperConfig`](crate::config::MapperConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid mapper configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result alias for mapping operations.
pub type MapResult<T> = Result<T, MapError>;

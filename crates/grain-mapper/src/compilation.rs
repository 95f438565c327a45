use grain_decl::{CompilationUnit, TypeDecl};
use grain_object::Tree;
use tracing::debug;

use crate::config::MapperConfig;
use crate::declaration::DeclarationMapper;
use crate::error::MapResult;
use crate::package::PackageChain;
use crate::tokens::{CLASS_ROOT, ENUM_ROOT, INTERFACE_ROOT};

/// Maps whole compilation units.
///
/// Each call is independent; the mapper holds only its configuration.
#[derive(Clone, Debug, Default)]
pub struct CompilationMapper {
    config: MapperConfig,
}

impl CompilationMapper {
    /// A mapper applying `config` to every unit.
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Map `unit` into a fresh root tree.
    pub fn map(&self, unit: &CompilationUnit) -> MapResult<Tree> {
        let mut root = Tree::root();
        self.map_into(unit, &mut root)?;
        Ok(root)
    }

    /// Map `unit` into a caller-provided root.
    ///
    /// The package chain is merged with whatever `root` already holds, and
    /// the `[CN]`, `[IN]` and `[EN]` roots are reused when present. On error
    /// `root` is left untouched.
    pub fn map_into(&self, unit: &CompilationUnit, root: &mut Tree) -> MapResult<()> {
        let mapper = DeclarationMapper::new(&self.config);
        let chain = unit.package.as_deref().map(PackageChain::parse).transpose()?;

        let mut classes = Vec::new();
        let mut interfaces = Vec::new();
        let mut enums = Vec::new();
        for decl in &unit.types {
            match decl {
                TypeDecl::Type(ty) if ty.interface => interfaces.push(mapper.map_type(ty)?),
                TypeDecl::Type(ty) => classes.push(mapper.map_type(ty)?),
                TypeDecl::Enum(en) => enums.push(mapper.map_enum(en)?),
            }
        }

        debug!(
            package = unit.package.as_deref().unwrap_or(""),
            classes = classes.len(),
            interfaces = interfaces.len(),
            enums = enums.len(),
            "mapped compilation unit"
        );

        if let Some(chain) = chain {
            chain.merge_into(root);
        }
        for (category, trees) in [
            (ENUM_ROOT, enums),
            (INTERFACE_ROOT, interfaces),
            (CLASS_ROOT, classes),
        ] {
            if !trees.is_empty() {
                root.child_or_insert(category).extend_trees(trees);
            }
        }
        Ok(())
    }
}

/// Map one compilation unit with the default configuration.
pub fn map_compilation_unit(unit: &CompilationUnit) -> MapResult<Tree> {
    CompilationMapper::default().map(unit)
}

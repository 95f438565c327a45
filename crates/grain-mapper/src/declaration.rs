//! Types, enums and enum constants mapped to trees.
//!
//! Members are sorted into per-category buffers while walking a body; each
//! category tree is built and attached once, after method conflicts are
//! resolved. Attachment order under the type tree is fixed:
//!
//! `modifiers`, `typeparameters`, `extend`, `implement`, methods,
//! `[FE]`, `[CS]`, `[CN]`, `[EN]`, `[EC]`.

use grain_decl::{BodyMember, EnumConstant, EnumDeclaration, ModifierEntry, TypeDeclaration};
use grain_object::{validate_name, Blob, Tree};
use tracing::{debug, trace};

use crate::config::MapperConfig;
use crate::conflict::ConflictResolver;
use crate::error::{MapError, MapResult};
use crate::field::map_field;
use crate::method::{map_method, MappedMethod};
use crate::modifiers::modifiers_blob;
use crate::tokens::{
    CLASS_ROOT, CONSTRUCTOR_ROOT, ENUM_CONSTANT_ROOT, ENUM_ROOT, EXTEND_BLOB, FIELD_ROOT,
    IMPLEMENT_BLOB, TYPE_PARAMETERS_BLOB,
};

/// Maps type-like declarations under a fixed configuration.
#[derive(Clone, Copy, Debug)]
pub struct DeclarationMapper<'c> {
    config: &'c MapperConfig,
}

/// Members of one body, sorted by category, in declaration order.
#[derive(Default)]
struct MemberBuffers {
    fields: Vec<Blob>,
    constructors: Vec<Tree>,
    methods: Vec<MappedMethod>,
    classes: Vec<Tree>,
    enums: Vec<Tree>,
}

impl<'c> DeclarationMapper<'c> {
    /// A mapper borrowing `config` for the duration of one unit.
    pub fn new(config: &'c MapperConfig) -> Self {
        Self { config }
    }

    /// Map a class or interface.
    pub fn map_type(&self, decl: &TypeDeclaration) -> MapResult<Tree> {
        let mut tree = header(&decl.name, "type", &decl.modifiers)?;

        if !decl.type_parameters.is_empty() {
            let body: String = decl
                .type_parameters
                .iter()
                .map(|parameter| format!("{}\n", parameter.name))
                .collect();
            tree.append_blob(Blob::new(TYPE_PARAMETERS_BLOB, body));
        }
        if let Some(superclass) = &decl.superclass {
            tree.append_blob(Blob::new(EXTEND_BLOB, format!("{superclass}\n")));
        }
        append_implement(&mut tree, &decl.super_interfaces);

        self.append_members(&mut tree, &decl.body)?;

        debug!(
            name = %decl.name,
            interface = decl.interface,
            "mapped type"
        );
        Ok(tree)
    }

    /// Map an enum, its body and its constants.
    pub fn map_enum(&self, decl: &EnumDeclaration) -> MapResult<Tree> {
        let mut tree = header(&decl.name, "enum", &decl.modifiers)?;
        append_implement(&mut tree, &decl.super_interfaces);
        self.append_members(&mut tree, &decl.body)?;

        let mut constants = Tree::new(ENUM_CONSTANT_ROOT);
        for constant in &decl.constants {
            constants.append_tree(self.map_enum_constant(constant)?);
        }
        tree.append_tree(constants);

        debug!(
            name = %decl.name,
            constants = decl.constants.len(),
            "mapped enum"
        );
        Ok(tree)
    }

    /// Map one enum constant, using its anonymous body as the member list.
    pub fn map_enum_constant(&self, constant: &EnumConstant) -> MapResult<Tree> {
        let mut tree = header(&constant.name, "enum constant", &constant.modifiers)?;
        let body = constant.body.as_deref().unwrap_or_default();
        self.append_members(&mut tree, body)?;
        Ok(tree)
    }

    fn append_members(&self, tree: &mut Tree, members: &[BodyMember]) -> MapResult<()> {
        let mut buffers = MemberBuffers::default();

        for member in members {
            match member {
                BodyMember::Field(field) => buffers.fields.extend(map_field(field)?),
                BodyMember::Method(method) => {
                    let mapped = map_method(method)?;
                    if mapped.is_constructor() {
                        buffers.constructors.push(mapped.into_tree());
                    } else {
                        buffers.methods.push(mapped);
                    }
                }
                BodyMember::Type(nested) => buffers.classes.push(self.map_type(nested)?),
                BodyMember::Enum(nested) => buffers.enums.push(self.map_enum(nested)?),
            }
        }

        trace!(
            owner = tree.name(),
            fields = buffers.fields.len(),
            constructors = buffers.constructors.len(),
            methods = buffers.methods.len(),
            nested = buffers.classes.len() + buffers.enums.len(),
            "collected members"
        );

        ConflictResolver::new(self.config.conflict_numbering).resolve(&mut buffers.methods);
        tree.extend_trees(buffers.methods.into_iter().map(MappedMethod::into_tree));

        if !buffers.fields.is_empty() {
            let mut fields = Tree::new(FIELD_ROOT);
            fields.extend_blobs(buffers.fields);
            tree.append_tree(fields);
        }
        if self.config.always_emit_constructors || !buffers.constructors.is_empty() {
            tree.append_tree(category(CONSTRUCTOR_ROOT, buffers.constructors));
        }
        if !buffers.classes.is_empty() {
            tree.append_tree(category(CLASS_ROOT, buffers.classes));
        }
        if !buffers.enums.is_empty() {
            tree.append_tree(category(ENUM_ROOT, buffers.enums));
        }
        Ok(())
    }
}

/// A fresh tree named `name` holding only its `modifiers` blob.
fn header(name: &str, kind: &'static str, modifiers: &[ModifierEntry]) -> MapResult<Tree> {
    validate_name(name).map_err(|source| MapError::InvalidName { kind, source })?;
    let mut tree = Tree::new(name);
    tree.append_blob(modifiers_blob(modifiers, name)?);
    Ok(tree)
}

fn append_implement(tree: &mut Tree, interfaces: &[String]) {
    if interfaces.is_empty() {
        return;
    }
    let body: String = interfaces.iter().map(|ty| format!("{ty}\n")).collect();
    tree.append_blob(Blob::new(IMPLEMENT_BLOB, body));
}

fn category(name: &str, trees: Vec<Tree>) -> Tree {
    let mut root = Tree::new(name);
    root.extend_trees(trees);
    root
}

#[cfg(test)]
mod tests {
    use grain_decl::{FieldDeclaration, MethodDeclaration, Parameter, TypeParameter, VariableFragment};

    use super::*;
    use crate::config::ConflictNumbering;

    fn method(name: &str, parameter_types: &[&str]) -> BodyMember {
        BodyMember::Method(MethodDeclaration {
            name: name.into(),
            parameters: parameter_types
                .iter()
                .enumerate()
                .map(|(i, ty)| Parameter::new(*ty, format!("p{i}")))
                .collect(),
            return_type: Some("void".into()),
            body: Some("{}".into()),
            ..Default::default()
        })
    }

    fn constructor(name: &str) -> BodyMember {
        BodyMember::Method(MethodDeclaration {
            name: name.into(),
            constructor: true,
            body: Some("{}".into()),
            ..Default::default()
        })
    }

    fn field(ty: &str, names: &[&str]) -> BodyMember {
        BodyMember::Field(FieldDeclaration {
            modifiers: vec![ModifierEntry::keyword("private")],
            ty: ty.into(),
            fragments: names.iter().map(|n| VariableFragment::new(*n)).collect(),
        })
    }

    fn class(name: &str, body: Vec<BodyMember>) -> TypeDeclaration {
        TypeDeclaration {
            name: name.into(),
            modifiers: vec![ModifierEntry::keyword("public")],
            body,
            ..Default::default()
        }
    }

    fn entry_names(tree: &Tree) -> Vec<String> {
        let mut names: Vec<String> = tree.blobs().iter().map(|b| b.name().to_string()).collect();
        names.extend(tree.trees().iter().map(|t| t.name().to_string()));
        names
    }

    #[test]
    fn class_header_blobs() {
        let decl = TypeDeclaration {
            name: "Box".into(),
            modifiers: vec![ModifierEntry::keyword("public"), ModifierEntry::keyword("final")],
            type_parameters: vec![TypeParameter::new("K"), TypeParameter::new("V")],
            superclass: Some("AbstractBox<K>".into()),
            super_interfaces: vec!["Serializable".into(), "Comparable<Box<K,V>>".into()],
            ..Default::default()
        };
        let config = MapperConfig::default();
        let tree = DeclarationMapper::new(&config).map_type(&decl).unwrap();

        assert_eq!(tree.name(), "Box");
        assert_eq!(tree.blob("modifiers").unwrap().body(), "public\nfinal\n");
        assert_eq!(tree.blob("typeparameters").unwrap().body(), "K\nV\n");
        assert_eq!(tree.blob("extend").unwrap().body(), "AbstractBox<K>\n");
        assert_eq!(
            tree.blob("implement").unwrap().body(),
            "Serializable\nComparable<Box<K,V>>\n"
        );
    }

    #[test]
    fn optional_header_blobs_are_omitted() {
        let config = MapperConfig::default();
        let tree = DeclarationMapper::new(&config).map_type(&class("Plain", Vec::new())).unwrap();
        assert!(tree.has_blob("modifiers"));
        assert!(!tree.has_blob("typeparameters"));
        assert!(!tree.has_blob("extend"));
        assert!(!tree.has_blob("implement"));
    }

    #[test]
    fn categories_are_lazy_except_constructors() {
        let config = MapperConfig::default();
        let tree = DeclarationMapper::new(&config)
            .map_type(&class("Empty", vec![method("run", &[])]))
            .unwrap();
        assert!(!tree.has_tree("[FE]"));
        assert!(!tree.has_tree("[CN]"));
        assert!(!tree.has_tree("[EN]"));
        assert!(tree.child("[CS]").is_some_and(Tree::is_empty));
    }

    #[test]
    fn constructors_can_be_lazy() {
        let config = MapperConfig {
            always_emit_constructors: false,
            ..MapperConfig::default()
        };
        let mapper = DeclarationMapper::new(&config);
        assert!(!mapper.map_type(&class("A", Vec::new())).unwrap().has_tree("[CS]"));
        assert!(mapper
            .map_type(&class("A", vec![constructor("A")]))
            .unwrap()
            .has_tree("[CS]"));
    }

    #[test]
    fn members_land_in_their_categories() {
        let nested_enum = EnumDeclaration {
            name: "Mode".into(),
            ..Default::default()
        };
        let nested_interface = TypeDeclaration {
            name: "Listener".into(),
            interface: true,
            ..Default::default()
        };
        let decl = class(
            "Point",
            vec![
                field("int", &["x", "y"]),
                constructor("Point"),
                method("length", &[]),
                BodyMember::Type(class("Inner", Vec::new())),
                BodyMember::Type(nested_interface),
                BodyMember::Enum(nested_enum),
                method("scale", &["double"]),
            ],
        );
        let config = MapperConfig::default();
        let tree = DeclarationMapper::new(&config).map_type(&decl).unwrap();

        assert_eq!(
            entry_names(&tree),
            ["modifiers", "length()", "scale(double)", "[FE]", "[CS]", "[CN]", "[EN]"]
        );

        let fields = tree.child("[FE]").unwrap();
        let names: Vec<_> = fields.blobs().iter().map(Blob::name).collect();
        assert_eq!(names, ["x", "y"]);
        assert_eq!(fields.blob("x").unwrap().body(), "private\nint\n");

        assert!(tree.child("[CS]").unwrap().has_tree("Point()"));
        let nested: Vec<_> = tree.child("[CN]").unwrap().trees().iter().map(Tree::name).collect();
        assert_eq!(nested, ["Inner", "Listener"]);
        assert!(tree.child("[EN]").unwrap().has_tree("Mode"));
    }

    #[test]
    fn every_nested_type_is_kept() {
        let decl = class(
            "Outer",
            vec![
                BodyMember::Type(class("A", Vec::new())),
                BodyMember::Type(class("B", Vec::new())),
                BodyMember::Type(class("C", Vec::new())),
            ],
        );
        let config = MapperConfig::default();
        let tree = DeclarationMapper::new(&config).map_type(&decl).unwrap();
        assert_eq!(tree.child("[CN]").unwrap().trees().len(), 3);
    }

    #[test]
    fn method_conflicts_are_resolved_before_attachment() {
        let decl = class("Dup", vec![method("bar", &[]), method("bar", &[])]);
        let config = MapperConfig::default();
        let tree = DeclarationMapper::new(&config).map_type(&decl).unwrap();
        assert!(tree.has_tree("bar().conflicted0"));
        assert!(tree.has_tree("bar().conflicted1"));
        assert!(!tree.has_tree("bar()"));
    }

    #[test]
    fn stable_numbering_from_config() {
        let decl = class("Dup", vec![method("bar", &[]), method("bar", &[])]);
        let config = MapperConfig {
            conflict_numbering: ConflictNumbering::Stable,
            ..MapperConfig::default()
        };
        let tree = DeclarationMapper::new(&config).map_type(&decl).unwrap();
        assert!(tree.has_tree("bar()"));
        assert!(tree.has_tree("bar().conflicted1"));
    }

    #[test]
    fn constructors_do_not_conflict_with_methods() {
        let decl = class("Node", vec![constructor("Node"), constructor("Node")]);
        let config = MapperConfig::default();
        let tree = DeclarationMapper::new(&config).map_type(&decl).unwrap();
        let constructors = tree.child("[CS]").unwrap();
        assert_eq!(constructors.trees().len(), 2);
        assert!(constructors.trees().iter().all(|t| t.name() == "Node()"));
    }

    #[test]
    fn enum_with_constants() {
        let decl = EnumDeclaration {
            name: "Op".into(),
            modifiers: vec![ModifierEntry::keyword("public")],
            super_interfaces: vec!["IntBinaryOperator".into()],
            constants: vec![
                EnumConstant {
                    name: "PLUS".into(),
                    modifiers: Vec::new(),
                    body: Some(vec![method("applyAsInt", &["int", "int"])]),
                },
                EnumConstant {
                    name: "TIMES".into(),
                    modifiers: vec![ModifierEntry::marker("Deprecated")],
                    body: None,
                },
            ],
            body: vec![field("String", &["symbol"])],
        };
        let config = MapperConfig::default();
        let tree = DeclarationMapper::new(&config).map_enum(&decl).unwrap();

        assert_eq!(
            entry_names(&tree),
            ["modifiers", "implement", "[FE]", "[CS]", "[EC]"]
        );
        assert_eq!(tree.blob("implement").unwrap().body(), "IntBinaryOperator\n");

        let constants = tree.child("[EC]").unwrap();
        let plus = constants.child("PLUS").unwrap();
        assert_eq!(plus.blob("modifiers").unwrap().body(), "");
        assert!(plus.has_tree("applyAsInt(int,int)"));

        let times = constants.child("TIMES").unwrap();
        assert_eq!(times.blob("modifiers").unwrap().body(), "@Deprecated\n");
        assert!(!times.trees().iter().any(|t| t.name().contains('(')));
        assert!(times.child("[CS]").is_some_and(Tree::is_empty));
    }

    #[test]
    fn empty_enum_still_has_constant_root() {
        let decl = EnumDeclaration {
            name: "Never".into(),
            ..Default::default()
        };
        let config = MapperConfig::default();
        let tree = DeclarationMapper::new(&config).map_enum(&decl).unwrap();
        assert!(tree.child("[EC]").is_some_and(Tree::is_empty));
    }

    #[test]
    fn bad_modifier_in_nested_member_fails_whole_type() {
        let mut bad = MethodDeclaration {
            name: "m".into(),
            ..Default::default()
        };
        bad.modifiers = vec![ModifierEntry::keyword("virtual")];
        let decl = class(
            "Outer",
            vec![BodyMember::Type(class("Inner", vec![BodyMember::Method(bad)]))],
        );
        let config = MapperConfig::default();
        let err = DeclarationMapper::new(&config).map_type(&decl).unwrap_err();
        assert!(matches!(err, MapError::UnrecognizedModifier { keyword, .. } if keyword == "virtual"));
    }

    #[test]
    fn invalid_type_name_is_rejected() {
        let config = MapperConfig::default();
        let err = DeclarationMapper::new(&config)
            .map_type(&class("a/b", Vec::new()))
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidName { kind: "type", .. }));
    }
}

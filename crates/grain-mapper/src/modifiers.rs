//! Rendering of modifier lists into `modifiers` blob bodies.

use grain_decl::{Annotation, Expr, ModifierEntry};
use grain_object::Blob;

use crate::error::{MapError, MapResult};
use crate::tokens::MODIFIERS_BLOB;

/// Modifier keywords accepted in a modifier list.
const KEYWORDS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "abstract",
    "final",
    "native",
    "synchronized",
    "transient",
    "volatile",
    "strictfp",
    "default",
    "sealed",
    "non-sealed",
];

const VISIBILITIES: &[&str] = &["private", "protected", "public"];

/// Visibility line used for methods with no visibility keyword.
pub const PACKAGE_VISIBILITY: &str = "internal";

/// Render every entry on its own line, in source order.
///
/// Keywords are emitted verbatim, annotations as `@Name`, `@Name(value)` or
/// `@Name(k1=v1,k2=v2)` with constant arguments folded.
pub fn render_modifiers(entries: &[ModifierEntry], declaration: &str) -> MapResult<String> {
    let mut body = String::new();
    for entry in entries {
        match entry {
            ModifierEntry::Keyword(keyword) => {
                check_keyword(keyword, declaration)?;
                body.push_str(keyword);
            }
            ModifierEntry::Annotation(annotation) => {
                body.push_str(&render_annotation(annotation, declaration)?);
            }
        }
        body.push('\n');
    }
    Ok(body)
}

/// The `modifiers` blob of a type, enum constant or field.
pub fn modifiers_blob(entries: &[ModifierEntry], declaration: &str) -> MapResult<Blob> {
    Ok(Blob::new(MODIFIERS_BLOB, render_modifiers(entries, declaration)?))
}

/// The single visibility keyword recorded for a method.
///
/// The first visibility keyword in the list wins; without one the method is
/// package-private, rendered as [`PACKAGE_VISIBILITY`]. Annotations are
/// skipped, but unknown keywords are still rejected.
pub fn method_visibility(entries: &[ModifierEntry], declaration: &str) -> MapResult<&'static str> {
    let mut visibility = None;
    for entry in entries {
        let ModifierEntry::Keyword(keyword) = entry else {
            continue;
        };
        check_keyword(keyword, declaration)?;
        if visibility.is_none() {
            visibility = VISIBILITIES.iter().copied().find(|v| *v == keyword.as_str());
        }
    }
    Ok(visibility.unwrap_or(PACKAGE_VISIBILITY))
}

fn check_keyword(keyword: &str, declaration: &str) -> MapResult<()> {
    if KEYWORDS.contains(&keyword) {
        Ok(())
    } else {
        Err(MapError::UnrecognizedModifier {
            keyword: keyword.to_string(),
            declaration: declaration.to_string(),
        })
    }
}

fn render_annotation(annotation: &Annotation, declaration: &str) -> MapResult<String> {
    Ok(match annotation {
        Annotation::Marker { name } => format!("@{name}"),
        Annotation::Single { name, value } => {
            format!("@{name}({})", render_value(value, declaration)?)
        }
        Annotation::Normal { name, pairs } => {
            let rendered = pairs
                .iter()
                .map(|pair| Ok(format!("{}={}", pair.name, render_value(&pair.value, declaration)?)))
                .collect::<MapResult<Vec<_>>>()?;
            format!("@{name}({})", rendered.join(","))
        }
    })
}

fn render_value(value: &Expr, declaration: &str) -> MapResult<String> {
    value.rendered_value().map_err(|source| MapError::Constant {
        declaration: declaration.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use grain_decl::{BinaryOp, MemberValuePair};

    use super::*;

    fn keywords(words: &[&str]) -> Vec<ModifierEntry> {
        words.iter().map(|w| ModifierEntry::keyword(*w)).collect()
    }

    #[test]
    fn keywords_in_source_order() {
        let body = render_modifiers(&keywords(&["public", "static", "final"]), "Foo").unwrap();
        assert_eq!(body, "public\nstatic\nfinal\n");
    }

    #[test]
    fn empty_list_renders_empty_body() {
        assert_eq!(render_modifiers(&[], "Foo").unwrap(), "");
    }

    #[test]
    fn marker_annotation() {
        let entries = vec![ModifierEntry::marker("Override"), ModifierEntry::keyword("public")];
        assert_eq!(render_modifiers(&entries, "run").unwrap(), "@Override\npublic\n");
    }

    #[test]
    fn single_member_annotation_folds_constants() {
        let entries = vec![ModifierEntry::Annotation(Annotation::Single {
            name: "Foo".into(),
            value: Expr::binary(BinaryOp::Add, Expr::literal("1"), Expr::literal("1")),
        })];
        assert_eq!(render_modifiers(&entries, "Bar").unwrap(), "@Foo(2)\n");
    }

    #[test]
    fn single_member_annotation_keeps_raw_source() {
        let entries = vec![ModifierEntry::Annotation(Annotation::Single {
            name: "Target".into(),
            value: Expr::name("ElementType.TYPE"),
        })];
        assert_eq!(
            render_modifiers(&entries, "Bar").unwrap(),
            "@Target(ElementType.TYPE)\n"
        );
    }

    #[test]
    fn normal_annotation_pairs_in_order() {
        let entries = vec![ModifierEntry::Annotation(Annotation::Normal {
            name: "Retry".into(),
            pairs: vec![
                MemberValuePair::new(
                    "delay",
                    Expr::binary(BinaryOp::Mul, Expr::literal("60"), Expr::literal("1000")),
                ),
                MemberValuePair::new("on", Expr::ClassLiteral("IOException".into())),
                MemberValuePair::new("label", Expr::literal("\"net\"")),
            ],
        })];
        assert_eq!(
            render_modifiers(&entries, "fetch").unwrap(),
            "@Retry(delay=60000,on=IOException.class,label=net)\n"
        );
    }

    #[test]
    fn unknown_keyword_is_a_contract_violation() {
        let err = render_modifiers(&keywords(&["public", "inline"]), "Foo").unwrap_err();
        match err {
            MapError::UnrecognizedModifier { keyword, declaration } => {
                assert_eq!(keyword, "inline");
                assert_eq!(declaration, "Foo");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_argument_is_reported() {
        let entries = vec![ModifierEntry::Annotation(Annotation::Single {
            name: "Size".into(),
            value: Expr::literal("0xZZ"),
        })];
        assert!(matches!(
            render_modifiers(&entries, "Foo"),
            Err(MapError::Constant { .. })
        ));
    }

    #[test]
    fn lone_surrogate_argument_keeps_source() {
        let entries = vec![ModifierEntry::Annotation(Annotation::Single {
            name: "Sep".into(),
            value: Expr::literal(r"'\uD800'"),
        })];
        assert_eq!(render_modifiers(&entries, "Foo").unwrap(), "@Sep('\\uD800')\n");
    }

    #[test]
    fn method_visibility_rules() {
        assert_eq!(method_visibility(&keywords(&["public", "static"]), "m").unwrap(), "public");
        assert_eq!(method_visibility(&keywords(&["static", "private"]), "m").unwrap(), "private");
        assert_eq!(method_visibility(&keywords(&["protected"]), "m").unwrap(), "protected");
        assert_eq!(method_visibility(&keywords(&["final"]), "m").unwrap(), "internal");
        assert_eq!(method_visibility(&[ModifierEntry::marker("Override")], "m").unwrap(), "internal");
        assert!(method_visibility(&keywords(&["friend"]), "m").is_err());
    }

    #[test]
    fn modifiers_blob_name() {
        let blob = modifiers_blob(&keywords(&["abstract"]), "Shape").unwrap();
        assert_eq!(blob.name(), "modifiers");
        assert_eq!(blob.body(), "abstract\n");
    }
}

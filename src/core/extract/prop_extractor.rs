//! Prop list of a component or hook.
//!
//! Sources, first non-empty wins:
//! 1. `FC<P>` / `FunctionComponent<P>` on the bound identifier;
//! 2. the first parameter's inline type annotation;
//! 3. the first parameter's destructured names, typed `any`.

use swc_ecma_ast::{BindingIdent, ObjectPatProp, Pat, TsType, TsTypeAnn};

use super::helpers::prop_name;
use super::type_extractor::{TypeExtractor, entity_name};
use crate::core::model::{Prop, TypeData};

const COMPONENT_TYPES: &[&str] = &["FC", "FunctionComponent"];

pub fn extract_props(
    extractor: &TypeExtractor<'_>,
    first_param: Option<&Pat>,
    binding: Option<&BindingIdent>,
) -> Vec<Prop> {
    let from_binding = binding
        .and_then(|b| b.type_ann.as_deref())
        .and_then(component_type_argument)
        .map(|ty| typed_props(extractor, ty))
        .unwrap_or_default();
    if !from_binding.is_empty() {
        return from_binding;
    }

    let Some(param) = first_param else {
        return Vec::new();
    };
    let annotated = param_annotation(param)
        .map(|ann| typed_props(extractor, &ann.type_ann))
        .unwrap_or_default();
    if !annotated.is_empty() {
        return annotated;
    }

    destructured_props(param)
}

/// `P` in `FC<P>`, `React.FC<P>`, `FunctionComponent<P>`.
fn component_type_argument(ann: &TsTypeAnn) -> Option<&TsType> {
    let TsType::TsTypeRef(reference) = &*ann.type_ann else {
        return None;
    };
    let name = entity_name(&reference.type_name);
    let last = name.rsplit('.').next().unwrap_or(&name);
    if !COMPONENT_TYPES.contains(&last) {
        return None;
    }
    reference
        .type_params
        .as_ref()
        .and_then(|params| params.params.first())
        .map(|ty| &**ty)
}

fn param_annotation(param: &Pat) -> Option<&TsTypeAnn> {
    match param {
        Pat::Ident(ident) => ident.type_ann.as_deref(),
        Pat::Object(object) => object.type_ann.as_deref(),
        Pat::Assign(assign) => param_annotation(&assign.left),
        _ => None,
    }
}

fn typed_props(extractor: &TypeExtractor<'_>, ty: &TsType) -> Vec<Prop> {
    extractor
        .properties(ty)
        .into_iter()
        .map(|(name, ty)| Prop { name, ty })
        .collect()
}

fn destructured_props(param: &Pat) -> Vec<Prop> {
    let pat = match param {
        Pat::Assign(assign) => &*assign.left,
        other => other,
    };
    let Pat::Object(object) = pat else {
        return Vec::new();
    };
    object
        .props
        .iter()
        .filter_map(|prop| match prop {
            ObjectPatProp::KeyValue(kv) => prop_name(&kv.key),
            ObjectPatProp::Assign(assign) => Some(assign.key.sym.to_string()),
            ObjectPatProp::Rest(_) => None,
        })
        .map(|name| Prop {
            name,
            ty: TypeData::Any,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use swc_ecma_ast::{Decl, ModuleItem, Stmt};

    use super::*;
    use crate::core::extract::classify::unwrap_function;
    use crate::core::extract::type_extractor::DEFAULT_TYPE_DEPTH;
    use crate::core::extract::type_scope::TypeScope;
    use crate::core::parsers::jsx::parse_jsx_source;

    /// Props of the last `const` declarator in `code`.
    fn props(code: &str) -> Vec<(String, TypeData)> {
        let parsed = parse_jsx_source(code.to_string(), "p.tsx").unwrap();
        let scope = TypeScope::collect(&parsed.module);
        let extractor = TypeExtractor::new(&scope, DEFAULT_TYPE_DEPTH);
        let decl = parsed
            .module
            .body
            .iter()
            .filter_map(|item| match item {
                ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => Some(&var.decls[0]),
                _ => None,
            })
            .last()
            .unwrap();
        let function = unwrap_function(decl.init.as_ref().unwrap()).unwrap().function;
        extract_props(&extractor, function.first_param(), decl.name.as_ident())
            .into_iter()
            .map(|p| (p.name, p.ty))
            .collect()
    }

    #[test]
    fn test_fc_annotation_wins() {
        let found = props(
            "type P = { title: string };\nconst A: React.FC<P> = ({ other }: { other: number }) => <h1 />;",
        );
        assert_eq!(found, vec![("title".to_string(), TypeData::keyword("string"))]);
    }

    #[test]
    fn test_inline_parameter_annotation() {
        let found = props("const A = ({ a }: { a: string; b?: boolean }) => <div />;");
        assert_eq!(
            found,
            vec![
                ("a".to_string(), TypeData::keyword("string")),
                ("b".to_string(), TypeData::keyword("boolean")),
            ]
        );
    }

    #[test]
    fn test_annotation_through_interface() {
        let found = props("interface Props { id: number }\nconst A = (props: Props) => <div />;");
        assert_eq!(found, vec![("id".to_string(), TypeData::keyword("number"))]);
    }

    #[test]
    fn test_destructured_names_fall_back_to_any() {
        let found = props("const A = ({ a, b: renamed, c = 1, ...rest }) => <div />;");
        assert_eq!(
            found,
            vec![
                ("a".to_string(), TypeData::Any),
                ("b".to_string(), TypeData::Any),
                ("c".to_string(), TypeData::Any),
            ]
        );
    }

    #[test]
    fn test_no_params_no_props() {
        assert!(props("const A = () => <div />;").is_empty());
    }
}

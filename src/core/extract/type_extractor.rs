//! Conversion of TypeScript type annotations into [`TypeData`].
//!
//! Named references to same-file aliases and interfaces are expanded in
//! place through [`TypeScope`]; an expanded interface carries the members
//! of its same-file bases. Expansion stops at the depth bound, and a
//! declaration already being expanded further up the chain is never entered
//! again, so mutually recursive aliases terminate.

use swc_common::BytePos;
use swc_ecma_ast::{
    Expr, Lit, TsEntityName, TsFnParam, TsInterfaceDecl, TsKeywordTypeKind, TsLit,
    TsTypeAliasDecl, TsTypeElement, TsTypeParamDecl, TsUnionOrIntersectionType,
};
use swc_ecma_ast::TsType;

use super::type_scope::{ScopedDecl, TypeScope};
use crate::core::model::{GenericParam, Locator, TypeData, TypeDeclaration, TypeMember};
use crate::error::AnalysisResult;

pub const DEFAULT_TYPE_DEPTH: usize = 5;

pub struct TypeExtractor<'a> {
    scope: &'a TypeScope,
    max_depth: usize,
}

impl<'a> TypeExtractor<'a> {
    pub fn new(scope: &'a TypeScope, max_depth: usize) -> Self {
        Self { scope, max_depth }
    }

    pub fn extract(&self, ty: &TsType) -> TypeData {
        self.extract_at(ty, 0, &mut Vec::new())
    }

    /// Flattened property list of an object-like type: object literals,
    /// references resolving to them, and intersections of those.
    pub fn properties(&self, ty: &TsType) -> Vec<(String, TypeData)> {
        let mut out = Vec::new();
        collect_properties(&self.extract(ty), &mut out);
        out
    }

    pub fn interface(
        &self,
        decl: &TsInterfaceDecl,
        locator: &Locator<'_>,
    ) -> AnalysisResult<TypeDeclaration> {
        let loc = locator.locate(decl.span, "interface declaration")?;
        let mut seen = vec![decl.span.lo];
        let members = self.members(&decl.body.body, 0, &mut seen);
        let extends = (!decl.extends.is_empty()).then(|| {
            decl.extends
                .iter()
                .filter_map(|heritage| expr_name(&heritage.expr))
                .collect()
        });
        Ok(TypeDeclaration::Interface {
            name: decl.id.sym.to_string(),
            loc,
            members,
            extends,
            generics: self.generics(decl.type_params.as_deref()),
        })
    }

    pub fn alias(
        &self,
        decl: &TsTypeAliasDecl,
        locator: &Locator<'_>,
    ) -> AnalysisResult<TypeDeclaration> {
        let loc = locator.locate(decl.span, "type alias declaration")?;
        let mut seen = vec![decl.span.lo];
        Ok(TypeDeclaration::Alias {
            name: decl.id.sym.to_string(),
            loc,
            value: self.extract_at(&decl.type_ann, 0, &mut seen),
            generics: self.generics(decl.type_params.as_deref()),
        })
    }

    fn generics(&self, params: Option<&TsTypeParamDecl>) -> Option<Vec<GenericParam>> {
        let params = params?;
        Some(
            params
                .params
                .iter()
                .map(|param| GenericParam {
                    name: param.name.sym.to_string(),
                    constraint: param.constraint.as_deref().map(|t| self.extract(t)),
                    default: param.default.as_deref().map(|t| self.extract(t)),
                })
                .collect(),
        )
    }

    fn extract_at(&self, ty: &TsType, depth: usize, seen: &mut Vec<BytePos>) -> TypeData {
        match ty {
            TsType::TsKeywordType(keyword) => TypeData::keyword(keyword_name(keyword.kind)),
            TsType::TsLitType(lit) => match &lit.lit {
                TsLit::Str(s) => TypeData::StringLiteral {
                    value: s.value.to_string_lossy().to_string(),
                },
                TsLit::Bool(b) => TypeData::BooleanLiteral { value: b.value },
                TsLit::Number(n) => {
                    let negative = n.value < 0.0
                        || n.raw.as_ref().is_some_and(|raw| raw.starts_with('-'));
                    if negative {
                        negated(TypeData::NumberLiteral { value: n.value.abs() })
                    } else {
                        TypeData::NumberLiteral { value: n.value }
                    }
                }
                TsLit::BigInt(b) => {
                    let value = b.value.to_string();
                    match value.strip_prefix('-') {
                        Some(magnitude) => negated(TypeData::BigIntLiteral {
                            value: magnitude.to_string(),
                        }),
                        None => TypeData::BigIntLiteral { value },
                    }
                }
                TsLit::Tpl(tpl) => TypeData::TemplateLiteral {
                    quasis: tpl.quasis.iter().map(|q| q.raw.to_string()).collect(),
                    expressions: tpl
                        .types
                        .iter()
                        .map(|t| self.extract_at(t, depth, seen))
                        .collect(),
                },
            },
            TsType::TsTypeRef(reference) => {
                let arguments = reference
                    .type_params
                    .as_ref()
                    .map(|params| {
                        params
                            .params
                            .iter()
                            .map(|t| self.extract_at(t, depth, seen))
                            .collect()
                    })
                    .unwrap_or_default();
                let resolved = match &reference.type_name {
                    TsEntityName::Ident(ident) => {
                        self.expand(ident.sym.as_str(), reference.span.lo, depth, seen)
                    }
                    TsEntityName::TsQualifiedName(_) => None,
                };
                TypeData::Reference {
                    name: entity_name(&reference.type_name),
                    arguments,
                    resolved: resolved.map(Box::new),
                }
            }
            TsType::TsArrayType(array) => TypeData::Array {
                element: Box::new(self.extract_at(&array.elem_type, depth, seen)),
            },
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union)) => {
                TypeData::Union {
                    types: union
                        .types
                        .iter()
                        .map(|t| self.extract_at(t, depth, seen))
                        .collect(),
                }
            }
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsIntersectionType(
                intersection,
            )) => TypeData::Intersection {
                types: intersection
                    .types
                    .iter()
                    .map(|t| self.extract_at(t, depth, seen))
                    .collect(),
            },
            TsType::TsTypeLit(lit) => TypeData::Object {
                members: self.members(&lit.members, depth, seen),
            },
            TsType::TsParenthesizedType(paren) => TypeData::Parenthesized {
                inner: Box::new(self.extract_at(&paren.type_ann, depth, seen)),
            },
            _ => TypeData::Any,
        }
    }

    /// Expand a same-file declaration visible at `at`.
    fn expand(
        &self,
        name: &str,
        at: BytePos,
        depth: usize,
        seen: &mut Vec<BytePos>,
    ) -> Option<TypeData> {
        if depth >= self.max_depth {
            return None;
        }
        let decl = self.scope.lookup(name, at)?;
        let identity = decl.position();
        if seen.contains(&identity) {
            return None;
        }
        seen.push(identity);
        let expanded = match decl {
            ScopedDecl::Alias(alias) => self.extract_at(&alias.type_ann, depth + 1, seen),
            ScopedDecl::Interface(interface) => TypeData::Object {
                members: self.interface_members(interface, depth + 1, seen),
            },
        };
        seen.pop();
        Some(expanded)
    }

    /// Members of `interface` with those of same-file base interfaces
    /// ahead of its own. An own member replaces an inherited one of the
    /// same name.
    fn interface_members(
        &self,
        interface: &TsInterfaceDecl,
        depth: usize,
        seen: &mut Vec<BytePos>,
    ) -> Vec<TypeMember> {
        let own = self.members(&interface.body.body, depth, seen);
        let mut merged: Vec<TypeMember> = Vec::new();
        for heritage in &interface.extends {
            let Expr::Ident(base) = &*heritage.expr else {
                continue;
            };
            let Some(TypeData::Object { members }) =
                self.expand(base.sym.as_str(), heritage.span.lo, depth, seen)
            else {
                continue;
            };
            for member in members {
                let name = member_name(&member);
                let shadowed = name.is_some()
                    && own
                        .iter()
                        .chain(merged.iter())
                        .any(|other| member_name(other) == name);
                if !shadowed {
                    merged.push(member);
                }
            }
        }
        merged.extend(own);
        merged
    }

    fn members(
        &self,
        elements: &[TsTypeElement],
        depth: usize,
        seen: &mut Vec<BytePos>,
    ) -> Vec<TypeMember> {
        elements
            .iter()
            .filter_map(|element| match element {
                TsTypeElement::TsPropertySignature(prop) => Some(TypeMember::Property {
                    name: property_key(&prop.key)?,
                    ty: prop
                        .type_ann
                        .as_ref()
                        .map(|ann| self.extract_at(&ann.type_ann, depth, seen))
                        .unwrap_or(TypeData::Any),
                    optional: prop.optional,
                    computed: prop.computed,
                }),
                TsTypeElement::TsIndexSignature(index) => {
                    let TsFnParam::Ident(param) = index.params.first()? else {
                        return None;
                    };
                    Some(TypeMember::Index {
                        parameter: param.id.sym.to_string(),
                        parameter_type: param
                            .type_ann
                            .as_ref()
                            .map(|ann| self.extract_at(&ann.type_ann, depth, seen))
                            .unwrap_or(TypeData::Any),
                        ty: index
                            .type_ann
                            .as_ref()
                            .map(|ann| self.extract_at(&ann.type_ann, depth, seen))
                            .unwrap_or(TypeData::Any),
                    })
                }
                _ => None,
            })
            .collect()
    }
}

fn member_name(member: &TypeMember) -> Option<&str> {
    match member {
        TypeMember::Property { name, .. } => Some(name),
        TypeMember::Index { .. } => None,
    }
}

fn negated(argument: TypeData) -> TypeData {
    TypeData::UnaryLiteral {
        operator: "-".to_string(),
        prefix: true,
        argument: Box::new(argument),
    }
}

fn collect_properties(ty: &TypeData, out: &mut Vec<(String, TypeData)>) {
    match ty {
        TypeData::Object { members } => {
            for member in members {
                if let TypeMember::Property { name, ty, .. } = member {
                    out.push((name.clone(), ty.clone()));
                }
            }
        }
        TypeData::Reference {
            resolved: Some(inner),
            ..
        } => collect_properties(inner, out),
        TypeData::Intersection { types } => {
            for ty in types {
                collect_properties(ty, out);
            }
        }
        TypeData::Parenthesized { inner } => collect_properties(inner, out),
        _ => {}
    }
}

fn keyword_name(kind: TsKeywordTypeKind) -> &'static str {
    match kind {
        TsKeywordTypeKind::TsAnyKeyword => "any",
        TsKeywordTypeKind::TsUnknownKeyword => "unknown",
        TsKeywordTypeKind::TsNumberKeyword => "number",
        TsKeywordTypeKind::TsObjectKeyword => "object",
        TsKeywordTypeKind::TsBooleanKeyword => "boolean",
        TsKeywordTypeKind::TsBigIntKeyword => "bigint",
        TsKeywordTypeKind::TsStringKeyword => "string",
        TsKeywordTypeKind::TsSymbolKeyword => "symbol",
        TsKeywordTypeKind::TsVoidKeyword => "void",
        TsKeywordTypeKind::TsUndefinedKeyword => "undefined",
        TsKeywordTypeKind::TsNullKeyword => "null",
        TsKeywordTypeKind::TsNeverKeyword => "never",
        TsKeywordTypeKind::TsIntrinsicKeyword => "intrinsic",
    }
}

/// `A`, `A.B.C`
pub fn entity_name(name: &TsEntityName) -> String {
    match name {
        TsEntityName::Ident(ident) => ident.sym.to_string(),
        TsEntityName::TsQualifiedName(qualified) => {
            format!("{}.{}", entity_name(&qualified.left), qualified.right.sym)
        }
    }
}

fn expr_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => {
            let object = expr_name(&member.obj)?;
            let property = member.prop.as_ident()?;
            Some(format!("{}.{}", object, property.sym))
        }
        _ => None,
    }
}

fn property_key(key: &Expr) -> Option<String> {
    match key {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => Some(s.value.to_string_lossy().to_string()),
        Expr::Lit(Lit::Num(n)) => Some(n.value.to_string()),
        Expr::Member(_) => expr_name(key),
        _ => None,
    }
}

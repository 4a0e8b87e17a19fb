//! Helper functions for AST node extraction.
//!
//! Pure functions with no state dependencies.

use swc_ecma_ast::{
    ArrayLit, CallExpr, Callee, Expr, Ident, MemberProp, ModuleExportName, ObjectPatProp, Pat,
    PropName,
};
use swc_ecma_visit::{Visit, VisitWith};

/// Collect every identifier bound by a pattern, in source order.
pub fn extract_binding_names(pat: &Pat) -> Vec<String> {
    match pat {
        Pat::Ident(ident) => vec![ident.id.sym.to_string()],
        Pat::Object(obj) => obj
            .props
            .iter()
            .flat_map(|prop| match prop {
                ObjectPatProp::KeyValue(kv) => extract_binding_names(&kv.value),
                ObjectPatProp::Assign(assign) => vec![assign.key.sym.to_string()],
                ObjectPatProp::Rest(rest) => extract_binding_names(&rest.arg),
            })
            .collect(),
        Pat::Array(arr) => arr
            .elems
            .iter()
            .flatten()
            .flat_map(extract_binding_names)
            .collect(),
        Pat::Assign(assign) => extract_binding_names(&assign.left),
        Pat::Rest(rest) => extract_binding_names(&rest.arg),
        _ => vec![],
    }
}

/// Unwrap TypeScript-specific expression wrappers to get the inner expression.
pub fn unwrap_ts_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsAs(ts_as) => unwrap_ts_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_ts_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_ts_expr(&ts_sat.expr),
        Expr::TsNonNull(non_null) => unwrap_ts_expr(&non_null.expr),
        Expr::TsTypeAssertion(assertion) => unwrap_ts_expr(&assertion.expr),
        Expr::Paren(paren) => unwrap_ts_expr(&paren.expr),
        _ => expr,
    }
}

/// Dotted name of an identifier or static member chain (`a`, `React.memo`).
pub fn expr_name(expr: &Expr) -> Option<String> {
    match unwrap_ts_expr(expr) {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => {
            let object = expr_name(&member.obj)?;
            match &member.prop {
                MemberProp::Ident(prop) => Some(format!("{}.{}", object, prop.sym)),
                _ => None,
            }
        }
        _ => None,
    }
}

pub fn callee_name(call: &CallExpr) -> Option<String> {
    match &call.callee {
        Callee::Expr(expr) => expr_name(expr),
        _ => None,
    }
}

/// `useState` and `React.useState` both match `useState`.
pub fn callee_is(call: &CallExpr, names: &[&str]) -> bool {
    callee_name(call).is_some_and(|name| {
        let bare = name.strip_prefix("React.").unwrap_or(&name);
        names.contains(&bare)
    })
}

/// Identifier names listed in an array literal (`[a, props.b]`).
pub fn array_identifiers(array: &ArrayLit) -> Vec<String> {
    array
        .elems
        .iter()
        .flatten()
        .filter(|elem| elem.spread.is_none())
        .filter_map(|elem| expr_name(&elem.expr))
        .collect()
}

pub fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
    }
}

pub fn prop_name(name: &PropName) -> Option<String> {
    match name {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string_lossy().to_string()),
        PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}

/// Identifiers referenced under a node, deduplicated in first-use order.
#[derive(Default)]
pub struct IdentCollector {
    pub names: Vec<String>,
}

impl IdentCollector {
    pub fn collect<N: VisitWith<Self>>(node: &N) -> Vec<String> {
        let mut collector = Self::default();
        node.visit_with(&mut collector);
        collector.names
    }
}

impl Visit for IdentCollector {
    fn visit_ident(&mut self, node: &Ident) {
        let name = node.sym.as_str();
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }
}

use swc_ecma_ast::{
    CallExpr, ExportAll, ExportDecl, ExportDefaultDecl, ExportDefaultExpr, FnDecl, ImportDecl,
    JSXElement, NamedExport, TsInterfaceDecl, TsTypeAliasDecl, VarDeclarator,
};

/// The syntax node kinds the collector acts on.
#[derive(Clone, Copy)]
pub enum NodeEvent<'a> {
    Import(&'a ImportDecl),
    ExportNamed(&'a NamedExport),
    ExportAll(&'a ExportAll),
    ExportDecl(&'a ExportDecl),
    ExportDefaultDecl(&'a ExportDefaultDecl),
    ExportDefaultExpr(&'a ExportDefaultExpr),
    FnDecl(&'a FnDecl),
    VarDeclarator(&'a VarDeclarator),
    JsxElement(&'a JSXElement),
    Call(&'a CallExpr),
    TypeAlias(&'a TsTypeAliasDecl),
    Interface(&'a TsInterfaceDecl),
}

impl NodeEvent<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeEvent::Import(_) => "import",
            NodeEvent::ExportNamed(_) => "named export",
            NodeEvent::ExportAll(_) => "export all",
            NodeEvent::ExportDecl(_) => "export declaration",
            NodeEvent::ExportDefaultDecl(_) => "default export declaration",
            NodeEvent::ExportDefaultExpr(_) => "default export expression",
            NodeEvent::FnDecl(_) => "function declaration",
            NodeEvent::VarDeclarator(_) => "variable declarator",
            NodeEvent::JsxElement(_) => "JSX element",
            NodeEvent::Call(_) => "call expression",
            NodeEvent::TypeAlias(_) => "type alias",
            NodeEvent::Interface(_) => "interface",
        }
    }
}

//! Component / hook classification of function-valued declarations.

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    ArrowExpr, BinaryOp, BlockStmt, BlockStmtOrExpr, Class, Expr, Function, Pat, Prop,
    PropOrSpread, ReturnStmt,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::helpers::{callee_name, unwrap_ts_expr};

/// Built-in hooks; calls to these are never recorded as custom hook usage.
pub const BUILTIN_HOOKS: &[&str] = &[
    "use",
    "useActionState",
    "useCallback",
    "useContext",
    "useDebugValue",
    "useDeferredValue",
    "useEffect",
    "useFormStatus",
    "useId",
    "useImperativeHandle",
    "useInsertionEffect",
    "useLayoutEffect",
    "useMemo",
    "useOptimistic",
    "useReducer",
    "useRef",
    "useState",
    "useSyncExternalStore",
    "useTransition",
];

pub const STATE_HOOKS: &[&str] = &["useState", "useReducer"];
pub const EFFECT_HOOKS: &[&str] = &["useEffect", "useLayoutEffect", "useInsertionEffect"];

/// A function-like node.
#[derive(Clone, Copy)]
pub enum FnRef<'a> {
    Arrow(&'a ArrowExpr),
    Function(&'a Function),
}

impl<'a> FnRef<'a> {
    pub fn span(&self) -> Span {
        match self {
            FnRef::Arrow(arrow) => arrow.span,
            FnRef::Function(function) => function.span,
        }
    }

    pub fn first_param(&self) -> Option<&'a Pat> {
        match self {
            FnRef::Arrow(arrow) => arrow.params.first(),
            FnRef::Function(function) => function.params.first().map(|p| &p.pat),
        }
    }

    pub fn has_body(&self) -> bool {
        match self {
            FnRef::Arrow(_) => true,
            FnRef::Function(function) => function.body.is_some(),
        }
    }

    pub fn returns_markup(&self) -> bool {
        match self {
            FnRef::Arrow(arrow) => match &*arrow.body {
                BlockStmtOrExpr::Expr(expr) => is_markup(expr),
                BlockStmtOrExpr::BlockStmt(block) => block_returns_markup(block),
            },
            FnRef::Function(function) => function
                .body
                .as_ref()
                .is_some_and(block_returns_markup),
        }
    }
}

/// A function found in a declarator's initializer, possibly wrapped.
pub struct UnwrappedFn<'a> {
    pub function: FnRef<'a>,
    /// Wrapping call names, outermost first.
    pub wrappers: Vec<String>,
}

/// Peel wrapper calls (`memo(..)`, `React.forwardRef(..)`) to reach the
/// function passed as their first argument.
pub fn unwrap_function(expr: &Expr) -> Option<UnwrappedFn<'_>> {
    match unwrap_ts_expr(expr) {
        Expr::Arrow(arrow) => Some(UnwrappedFn {
            function: FnRef::Arrow(arrow),
            wrappers: Vec::new(),
        }),
        Expr::Fn(fn_expr) => Some(UnwrappedFn {
            function: FnRef::Function(&fn_expr.function),
            wrappers: Vec::new(),
        }),
        Expr::Call(call) => {
            let name = callee_name(call).filter(|name| is_wrapper_name(name))?;
            let first = call.args.first().filter(|arg| arg.spread.is_none())?;
            let mut inner = unwrap_function(&first.expr)?;
            inner.wrappers.insert(0, name);
            Some(inner)
        }
        _ => None,
    }
}

/// `memo`, `observer`, `React.forwardRef`; method calls on values such as
/// `items.map` are not wrappers.
fn is_wrapper_name(name: &str) -> bool {
    match name.split_once('.') {
        Some((root, _)) => root.chars().next().is_some_and(|c| c.is_ascii_uppercase()),
        None => true,
    }
}

/// `useFoo` with prefix `use`: the prefix followed by an uppercase letter.
pub fn is_hook_name(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

pub fn is_builtin_hook(name: &str) -> bool {
    let bare = name.strip_prefix("React.").unwrap_or(name);
    BUILTIN_HOOKS.contains(&bare)
}

/// Component references start with an uppercase letter.
pub fn is_component_tag(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

pub fn is_markup(expr: &Expr) -> bool {
    match unwrap_ts_expr(expr) {
        Expr::JSXElement(_) | Expr::JSXFragment(_) => true,
        Expr::Cond(cond) => is_markup(&cond.cons) || is_markup(&cond.alt),
        Expr::Bin(bin) => {
            matches!(
                bin.op,
                BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::NullishCoalescing
            ) && (is_markup(&bin.left) || is_markup(&bin.right))
        }
        Expr::Array(array) => array.elems.iter().flatten().any(|elem| is_markup(&elem.expr)),
        Expr::Object(object) => object.props.iter().any(|prop| match prop {
            PropOrSpread::Prop(prop) => match &**prop {
                Prop::KeyValue(kv) => is_markup(&kv.value),
                _ => false,
            },
            PropOrSpread::Spread(_) => false,
        }),
        Expr::Call(call) => callee_name(call)
            .is_some_and(|name| name == "createElement" || name == "React.createElement"),
        _ => false,
    }
}

fn block_returns_markup(block: &BlockStmt) -> bool {
    let mut finder = ReturnFinder { found: false };
    block.visit_children_with(&mut finder);
    finder.found
}

/// Looks at `return` statements of one function body, skipping nested functions.
struct ReturnFinder {
    found: bool,
}

impl Visit for ReturnFinder {
    fn visit_return_stmt(&mut self, node: &ReturnStmt) {
        if node.arg.as_deref().is_some_and(is_markup) {
            self.found = true;
        }
    }

    fn visit_function(&mut self, _: &Function) {}

    fn visit_arrow_expr(&mut self, _: &ArrowExpr) {}

    fn visit_class(&mut self, _: &Class) {}
}

/// Span of the lexical body of a function.
pub fn body_span(function: FnRef<'_>) -> Option<Span> {
    match function {
        FnRef::Arrow(arrow) => Some(arrow.body.span()),
        FnRef::Function(function) => function.body.as_ref().map(|b| b.span),
    }
}

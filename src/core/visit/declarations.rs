//! Function declarations and variable declarators.
//!
//! A function-valued declaration becomes a component when its body yields
//! markup, a hook when it carries the hook prefix and is exported at module
//! level, and a data variable otherwise. Unexported hook-named functions
//! are walked but never registered. A binding initialized by a hook call
//! other than a state hook is a data variable owning its callbacks.

use swc_ecma_ast::{BindingIdent, CallExpr, Expr, FnDecl, Pat, VarDeclarator};

use super::collector::{FileCollector, Frame, Owner};
use crate::core::extract::classify::STATE_HOOKS;
use crate::core::extract::helpers::{IdentCollector, callee_is, callee_name, unwrap_ts_expr};
use crate::core::extract::{FnRef, extract_props, is_hook_name, unwrap_function};
use crate::core::model::{
    ComponentCategory, DeclarationKind, ExportBinding, ExportForm, ExportKind, Location, State,
    Variable, VariableDetails, VariableKind,
};
use crate::core::registry::DEFAULT_EXPORT;
use crate::error::AnalysisResult;

pub(super) struct FunctionSite<'n> {
    pub(super) name: String,
    pub(super) function: FnRef<'n>,
    pub(super) category: ComponentCategory,
    pub(super) wrappers: Vec<String>,
    pub(super) binding: Option<&'n BindingIdent>,
    pub(super) loc: Location,
    pub(super) default_export: bool,
    pub(super) dependencies: Vec<String>,
}

impl FileCollector<'_> {
    pub(super) fn on_fn_decl(&mut self, node: &FnDecl) -> AnalysisResult<()> {
        let function = FnRef::Function(&node.function);
        // Overload signatures and `declare function`.
        if !function.has_body() {
            return Ok(());
        }
        let name = node.ident.sym.to_string();
        let loc = self.locate(node.function.span, "function declaration")?;
        let dependencies = self.dependencies(IdentCollector::collect(&*node.function), &name);
        self.register_function(FunctionSite {
            name,
            function,
            category: ComponentCategory::Function,
            wrappers: Vec::new(),
            binding: None,
            loc,
            default_export: false,
            dependencies,
        })
    }

    pub(super) fn on_var_declarator(&mut self, node: &VarDeclarator) -> AnalysisResult<()> {
        let mut hook_init = false;
        if let Some(Expr::Call(call)) = node.init.as_deref().map(unwrap_ts_expr) {
            if callee_is(call, STATE_HOOKS) {
                return self.record_state(node);
            }
            hook_init = self.is_hook_call(call);
        }

        let Pat::Ident(binding) = &node.name else {
            return Ok(());
        };
        let name = binding.id.sym.to_string();
        let loc = self.locate(node.span, "variable declarator")?;
        let dependencies = match node.init.as_deref() {
            Some(init) => self.dependencies(IdentCollector::collect(init), &name),
            None => Vec::new(),
        };

        // `useMemo(() => <Row/>)` yields a value, not a component.
        let function = if hook_init {
            None
        } else {
            node.init.as_deref().and_then(unwrap_function)
        };
        match function {
            Some(unwrapped) => {
                let category = if unwrapped.wrappers.is_empty() {
                    ComponentCategory::Expression
                } else {
                    ComponentCategory::Wrapped
                };
                self.register_function(FunctionSite {
                    name,
                    function: unwrapped.function,
                    category,
                    wrappers: unwrapped.wrappers,
                    binding: Some(binding),
                    loc,
                    default_export: false,
                    dependencies,
                })
            }
            None => self.register_value(name, loc, dependencies),
        }
    }

    pub(super) fn register_function(&mut self, site: FunctionSite<'_>) -> AnalysisResult<()> {
        self.named_fns.insert(site.function.span().lo);

        let exported = site.default_export
            || (!self.in_function() && self.facts.exported.contains(&site.name));
        let kind = if site.function.returns_markup() {
            VariableKind::Component
        } else if is_hook_name(&site.name, self.hook_prefix) {
            if !exported {
                tracing::debug!("skipping unexported hook '{}' in {}", site.name, self.file);
                self.frames.push(Frame {
                    name: site.name,
                    owner: None,
                    function: true,
                });
                return Ok(());
            }
            VariableKind::Hook
        } else {
            VariableKind::Data
        };

        let key = self.key(&site.name);
        let id = match kind {
            VariableKind::Data if !site.default_export => {
                self.registry.declare_binding(key, site.loc)?
            }
            _ => self.registry.declare(key, site.default_export)?,
        };

        let details = match kind {
            VariableKind::Component => {
                VariableDetails::component(&self.file, site.category, site.wrappers)
            }
            VariableKind::Hook => VariableDetails::hook(&self.file),
            VariableKind::Data => VariableDetails::data(),
        };
        let mut variable = Variable {
            id,
            name: site.name.clone(),
            declaration: DeclarationKind::Function,
            loc: site.loc,
            dependencies: site.dependencies,
            children: Vec::new(),
            details,
        };
        variable.set_props(extract_props(
            &self.types,
            site.function.first_param(),
            site.binding,
        ));

        let parent = self.nearest_owner().map(|owner| owner.id);
        self.registry.insert_variable(&self.file, parent, variable);
        if site.default_export {
            self.insert_export(
                DEFAULT_EXPORT.to_string(),
                ExportBinding {
                    id,
                    name: DEFAULT_EXPORT.to_string(),
                    kind: ExportKind::Value,
                    form: ExportForm::Default,
                    source: None,
                },
            );
        }
        self.frames.push(Frame {
            name: site.name,
            owner: Some(Owner {
                id,
                kind,
                loc: site.loc,
            }),
            function: true,
        });
        Ok(())
    }

    fn register_value(
        &mut self,
        name: String,
        loc: Location,
        dependencies: Vec<String>,
    ) -> AnalysisResult<()> {
        let key = self.key(&name);
        let id = self.registry.declare_binding(key, loc)?;
        let parent = self.nearest_owner().map(|owner| owner.id);
        self.registry.insert_variable(
            &self.file,
            parent,
            Variable {
                id,
                name: name.clone(),
                declaration: DeclarationKind::Data,
                loc,
                dependencies,
                children: Vec::new(),
                details: VariableDetails::data(),
            },
        );
        self.frames.push(Frame {
            name,
            owner: Some(Owner {
                id,
                kind: VariableKind::Data,
                loc,
            }),
            function: false,
        });
        Ok(())
    }

    /// `const [value, setValue] = useState(..)` or `const state = useReducer(..)`.
    fn record_state(&mut self, node: &VarDeclarator) -> AnalysisResult<()> {
        let Some(owner) = self.logic_owner() else {
            return Ok(());
        };
        let (value, setter) = match &node.name {
            Pat::Array(array) => {
                let mut names = array.elems.iter().map(|elem| {
                    elem.as_ref()
                        .and_then(Pat::as_ident)
                        .map(|ident| ident.id.sym.to_string())
                });
                (names.next().flatten(), names.next().flatten())
            }
            Pat::Ident(ident) => (Some(ident.id.sym.to_string()), None),
            _ => (None, None),
        };
        let Some(value) = value else {
            return Ok(());
        };
        let loc = self.locate(node.span, "state declaration")?;
        if let Some(states) = self
            .registry
            .variable_mut(owner.id)
            .and_then(Variable::states_mut)
        {
            states.push(State { value, setter, loc });
        }
        Ok(())
    }

    pub(super) fn is_hook_call(&self, call: &CallExpr) -> bool {
        callee_name(call).is_some_and(|name| {
            let last = name.rsplit('.').next().unwrap_or(&name);
            is_hook_name(last, self.hook_prefix)
        })
    }
}

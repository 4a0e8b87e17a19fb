//! Call expressions: effects, context reads and custom hook usage.
//!
//! State hooks are handled with their declarator, since the bound names
//! live there.

use swc_ecma_ast::{CallExpr, Expr};

use super::collector::FileCollector;
use crate::core::deferred::HookUsage;
use crate::core::extract::classify::{EFFECT_HOOKS, body_span, is_builtin_hook};
use crate::core::extract::helpers::{
    array_identifiers, callee_is, callee_name, expr_name, unwrap_ts_expr,
};
use crate::core::extract::unwrap_function;
use crate::core::model::{EffectInfo, IdentityKey, ImportKind, Variable, VariableDetails, VariableKind};
use crate::error::AnalysisResult;

impl FileCollector<'_> {
    pub(super) fn on_call(&mut self, node: &CallExpr) -> AnalysisResult<()> {
        if callee_is(node, EFFECT_HOOKS) {
            return self.record_effect(node);
        }
        if callee_is(node, &["useContext"]) {
            return self.record_context(node);
        }
        let Some(name) = callee_name(node) else {
            return Ok(());
        };
        if is_builtin_hook(&name) || !self.is_hook_call(node) {
            return Ok(());
        }
        let Some(owner) = self.logic_owner() else {
            return Ok(());
        };
        let Some(candidates) = self.hook_candidates(&name) else {
            return Ok(());
        };
        let loc = self.locate(node.span, "hook call")?;
        self.registry.attach_hook(HookUsage {
            owner: owner.id,
            name,
            candidates,
            file: self.file.clone(),
            loc,
        })
    }

    /// `None` when the hook comes from an external package or cannot be
    /// traced to a binding (`obj.useThing()` on a local object).
    fn hook_candidates(&self, name: &str) -> Option<Vec<IdentityKey>> {
        match name.split_once('.') {
            Some((root, member)) => {
                let binding = self.import_binding(root)?;
                (binding.kind == ImportKind::Namespace && !binding.is_dependency)
                    .then(|| vec![IdentityKey::new(member, binding.source.as_str())])
            }
            None => match self.import_binding(name) {
                Some(binding) if binding.is_dependency => None,
                Some(binding) => Some(vec![IdentityKey::new(
                    binding.target_name(),
                    binding.source.as_str(),
                )]),
                None => Some(self.scoped_candidates(name)),
            },
        }
    }

    fn record_effect(&mut self, node: &CallExpr) -> AnalysisResult<()> {
        let Some(owner) = self.logic_owner() else {
            return Ok(());
        };
        let loc = self.locate(node.span, "effect call")?;
        let body = node
            .args
            .first()
            .and_then(|arg| unwrap_function(&arg.expr))
            .and_then(|callback| body_span(callback.function))
            .map(|span| self.locator.locate_span(span, "effect body"))
            .transpose()?;
        let dependencies = node.args.get(1).and_then(|arg| match unwrap_ts_expr(&arg.expr) {
            Expr::Array(array) => Some(array_identifiers(array)),
            _ => None,
        });
        if let Some(effects) = self
            .registry
            .variable_mut(owner.id)
            .and_then(Variable::effects_mut)
        {
            effects.push(EffectInfo {
                loc,
                body,
                dependencies,
            });
        }
        Ok(())
    }

    fn record_context(&mut self, node: &CallExpr) -> AnalysisResult<()> {
        let Some(owner) = self
            .logic_owner()
            .filter(|owner| owner.kind == VariableKind::Component)
        else {
            return Ok(());
        };
        let Some(context) = node.args.first().and_then(|arg| expr_name(&arg.expr)) else {
            return Ok(());
        };
        if let Some(VariableDetails::Component(component)) = self
            .registry
            .variable_mut(owner.id)
            .map(|variable| &mut variable.details)
            && !component.contexts.contains(&context)
        {
            component.contexts.push(context);
        }
        Ok(())
    }
}

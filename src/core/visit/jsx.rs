//! Render-edge detection for markup elements.
//!
//! Only tags whose last segment is capitalized denote components. The tag
//! is resolved against the owner's enclosing scopes first (a nested local
//! `Row` shadows a module-level one), then through the file's imports.

use swc_ecma_ast::{
    Expr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXElement, JSXElementName, JSXExpr,
    JSXObject,
};

use super::collector::FileCollector;
use crate::core::deferred::PendingRender;
use crate::core::extract::helpers::unwrap_ts_expr;
use crate::core::extract::is_component_tag;
use crate::core::model::{IdentityKey, ImportKind, PropBinding, VariableKind};
use crate::error::AnalysisResult;

enum RenderTarget {
    /// A component of an external package.
    Dependency(IdentityKey),
    /// Keys to try in order, resolved now or on replay.
    Local(Vec<IdentityKey>),
}

fn element_name(name: &JSXElementName) -> Option<String> {
    fn object_name(object: &JSXObject) -> String {
        match object {
            JSXObject::Ident(ident) => ident.sym.to_string(),
            JSXObject::JSXMemberExpr(member) => {
                format!("{}.{}", object_name(&member.obj), member.prop.sym)
            }
        }
    }
    match name {
        JSXElementName::Ident(ident) => Some(ident.sym.to_string()),
        JSXElementName::JSXMemberExpr(member) => {
            Some(format!("{}.{}", object_name(&member.obj), member.prop.sym))
        }
        JSXElementName::JSXNamespacedName(_) => None,
    }
}

/// Attributes whose value is a bare identifier: `label={title}`.
fn prop_bindings(attrs: &[JSXAttrOrSpread]) -> Vec<PropBinding> {
    attrs
        .iter()
        .filter_map(|attr| {
            let JSXAttrOrSpread::JSXAttr(attr) = attr else {
                return None;
            };
            let JSXAttrName::Ident(name) = &attr.name else {
                return None;
            };
            let Some(JSXAttrValue::JSXExprContainer(container)) = &attr.value else {
                return None;
            };
            let JSXExpr::Expr(expr) = &container.expr else {
                return None;
            };
            match unwrap_ts_expr(expr) {
                Expr::Ident(ident) => Some(PropBinding {
                    prop: name.sym.to_string(),
                    identifier: ident.sym.to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}

impl FileCollector<'_> {
    pub(super) fn on_jsx_element(&mut self, node: &JSXElement) -> AnalysisResult<()> {
        let Some(tag) = element_name(&node.opening.name) else {
            return Ok(());
        };
        if !tag.rsplit('.').next().is_some_and(is_component_tag) {
            return Ok(());
        }
        let loc = self.locate(node.span, "JSX element")?;
        let Some(owner) = self.nearest_owner() else {
            tracing::debug!("<{}> at {}:{} has no owning variable", tag, self.file, loc);
            return Ok(());
        };
        if owner.kind == VariableKind::Hook {
            tracing::debug!("ignoring <{}> rendered inside a hook at {}:{}", tag, self.file, loc);
            return Ok(());
        }

        let target = self.render_target(&tag);
        let render = PendingRender {
            owner: owner.id,
            tag,
            candidates: Vec::new(),
            file: self.file.clone(),
            loc,
            owner_loc: owner.loc,
            props: prop_bindings(&node.opening.attrs),
        };
        match target {
            RenderTarget::Dependency(key) => {
                self.registry.attach_dependency_render(render, key);
                Ok(())
            }
            RenderTarget::Local(candidates) => {
                let render = PendingRender {
                    candidates,
                    ..render
                };
                if self.may_be_shadowed(&render) {
                    self.registry.defer_render(render)
                } else {
                    self.registry.attach_render(render)
                }
            }
        }
    }

    /// A hoisted function declared later in an enclosing body can still
    /// shadow the tag, so the innermost candidate must exist before
    /// resolving now.
    fn may_be_shadowed(&self, render: &PendingRender) -> bool {
        let root = render.tag.split('.').next().unwrap_or_default();
        render.candidates.len() > 1
            && self.facts.nested_names.contains(root)
            && render
                .candidates
                .first()
                .is_some_and(|key| self.registry.identity().resolve(key).is_none())
    }

    fn render_target(&self, tag: &str) -> RenderTarget {
        let (root, member) = match tag.split_once('.') {
            Some((root, member)) => (root, Some(member)),
            None => (tag, None),
        };
        let Some(binding) = self.import_binding(root) else {
            return RenderTarget::Local(self.scoped_candidates(tag));
        };

        match member {
            Some(member) if binding.kind == ImportKind::Namespace => {
                let key = IdentityKey::new(member, binding.source.as_str());
                if binding.is_dependency {
                    RenderTarget::Dependency(key)
                } else {
                    RenderTarget::Local(vec![key])
                }
            }
            Some(member) if binding.is_dependency => RenderTarget::Dependency(IdentityKey::new(
                format!("{}.{}", binding.target_name(), member),
                binding.source.as_str(),
            )),
            Some(_) => RenderTarget::Local(self.scoped_candidates(tag)),
            None if binding.is_dependency => RenderTarget::Dependency(IdentityKey::new(
                binding.target_name(),
                binding.source.as_str(),
            )),
            None => {
                let mut candidates = self.scoped_candidates(tag);
                candidates.pop();
                candidates.push(IdentityKey::new(binding.target_name(), binding.source.as_str()));
                RenderTarget::Local(candidates)
            }
        }
    }
}

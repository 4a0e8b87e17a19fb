//! Extraction of types, props and function shapes from AST nodes.

pub mod classify;
pub mod helpers;
pub mod prop_extractor;
pub mod type_extractor;
pub mod type_scope;

pub use classify::{FnRef, UnwrappedFn, is_component_tag, is_hook_name, unwrap_function};
pub use prop_extractor::extract_props;
pub use type_extractor::{DEFAULT_TYPE_DEPTH, TypeExtractor};
pub use type_scope::{ScopedDecl, TypeScope};

//! Module specifier resolution and its collaborators.

pub mod manifest;
pub mod module_resolver;

pub use manifest::{build_alias_table, tsconfig_aliases};
pub use module_resolver::{AliasTable, DependencySet, ModuleResolver, PROBE_EXTENSIONS};

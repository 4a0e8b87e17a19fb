//! In-memory model of the analyzed corpus.

pub mod file;
pub mod ids;
pub mod location;
pub mod types;
pub mod variable;

pub use file::{ExportBinding, ExportForm, ExportKind, ImportBinding, ImportKind, SourceFile};
pub use ids::{EntityId, IdGenerator, IdentityKey, IdentityMap};
pub use location::{Location, Locator, SourceSpan};
pub use types::{GenericParam, TypeData, TypeDeclaration, TypeMember};
pub use variable::{
    ComponentCategory, ComponentInfo, DataInfo, DeclarationKind, EffectInfo, HookInfo, Prop,
    PropBinding, RenderEdge, State, Variable, VariableArena, VariableDetails, VariableKind,
};

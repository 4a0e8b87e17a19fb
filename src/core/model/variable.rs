//! Variables (components, hooks, plain bindings) and the arena that owns them.
//!
//! Every [`Variable`] lives in the [`VariableArena`], addressed by its
//! [`EntityId`]. Nesting is encoded as child id lists only: a variable knows
//! its children, never its parent.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::ids::EntityId;
use super::location::{Location, SourceSpan};
use super::types::TypeData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationKind {
    Function,
    Data,
}

/// `const [value, setter] = useState(..)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setter: Option<String>,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectInfo {
    pub loc: Location,
    /// Span of the effect callback body, when the callback is inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<SourceSpan>,
    /// Identifiers in the dependency array; `None` when no array was passed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeData,
}

/// `<Child label={title} />` records `prop = "label"`, `identifier = "title"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropBinding {
    pub prop: String,
    pub identifier: String,
}

/// One render site of a component inside another variable's body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderEdge {
    pub target: EntityId,
    pub tag: String,
    pub loc: Location,
    /// Declaration position of the owning variable.
    pub owner_loc: Location,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<PropBinding>,
    pub is_dependency: bool,
}

/// How a component function was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentCategory {
    /// `function App() {}`
    Function,
    /// `const App = () => ..` / `const App = function () {}`
    Expression,
    /// `const App = memo(() => ..)`
    Wrapped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub file: String,
    pub category: ComponentCategory,
    /// Wrapping calls, outermost first (`["memo", "forwardRef"]`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wrappers: Vec<String>,
    pub states: Vec<State>,
    pub hooks: Vec<EntityId>,
    pub props: Vec<Prop>,
    pub contexts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<EffectInfo>,
    /// Render sites keyed by call-site location.
    pub renders: BTreeMap<String, RenderEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookInfo {
    pub file: String,
    pub states: Vec<State>,
    pub props: Vec<Prop>,
    pub effects: Vec<EffectInfo>,
    pub hooks: Vec<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataInfo {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub renders: BTreeMap<String, RenderEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VariableDetails {
    Component(ComponentInfo),
    Hook(HookInfo),
    Data(DataInfo),
}

impl VariableDetails {
    pub fn component(file: &str, category: ComponentCategory, wrappers: Vec<String>) -> Self {
        VariableDetails::Component(ComponentInfo {
            file: file.to_string(),
            category,
            wrappers,
            states: Vec::new(),
            hooks: Vec::new(),
            props: Vec::new(),
            contexts: Vec::new(),
            effects: Vec::new(),
            renders: BTreeMap::new(),
        })
    }

    pub fn hook(file: &str) -> Self {
        VariableDetails::Hook(HookInfo {
            file: file.to_string(),
            states: Vec::new(),
            props: Vec::new(),
            effects: Vec::new(),
            hooks: Vec::new(),
        })
    }

    pub fn data() -> Self {
        VariableDetails::Data(DataInfo::default())
    }

    pub fn kind(&self) -> VariableKind {
        match self {
            VariableDetails::Component(_) => VariableKind::Component,
            VariableDetails::Hook(_) => VariableKind::Hook,
            VariableDetails::Data(_) => VariableKind::Data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Component,
    Hook,
    Data,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub id: EntityId,
    pub name: String,
    pub declaration: DeclarationKind,
    pub loc: Location,
    pub dependencies: Vec<String>,
    pub children: Vec<EntityId>,
    pub details: VariableDetails,
}

impl Variable {
    pub fn kind(&self) -> VariableKind {
        self.details.kind()
    }

    pub fn states_mut(&mut self) -> Option<&mut Vec<State>> {
        match &mut self.details {
            VariableDetails::Component(c) => Some(&mut c.states),
            VariableDetails::Hook(h) => Some(&mut h.states),
            VariableDetails::Data(_) => None,
        }
    }

    pub fn effects_mut(&mut self) -> Option<&mut Vec<EffectInfo>> {
        match &mut self.details {
            VariableDetails::Component(c) => Some(&mut c.effects),
            VariableDetails::Hook(h) => Some(&mut h.effects),
            VariableDetails::Data(_) => None,
        }
    }

    pub fn hooks_mut(&mut self) -> Option<&mut Vec<EntityId>> {
        match &mut self.details {
            VariableDetails::Component(c) => Some(&mut c.hooks),
            VariableDetails::Hook(h) => Some(&mut h.hooks),
            VariableDetails::Data(_) => None,
        }
    }

    pub fn renders_mut(&mut self) -> Option<&mut BTreeMap<String, RenderEdge>> {
        match &mut self.details {
            VariableDetails::Component(c) => Some(&mut c.renders),
            VariableDetails::Data(d) => Some(&mut d.renders),
            VariableDetails::Hook(_) => None,
        }
    }

    pub fn renders(&self) -> Option<&BTreeMap<String, RenderEdge>> {
        match &self.details {
            VariableDetails::Component(c) => Some(&c.renders),
            VariableDetails::Data(d) => Some(&d.renders),
            VariableDetails::Hook(_) => None,
        }
    }

    pub fn set_props(&mut self, props: Vec<Prop>) {
        match &mut self.details {
            VariableDetails::Component(c) => c.props = props,
            VariableDetails::Hook(h) => h.props = props,
            VariableDetails::Data(_) => {}
        }
    }
}

/// Owner of every variable in the run.
#[derive(Debug, Default)]
pub struct VariableArena {
    variables: HashMap<EntityId, Variable>,
}

impl VariableArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variable: Variable) {
        self.variables.insert(variable.id, variable);
    }

    pub fn get(&self, id: EntityId) -> Option<&Variable> {
        self.variables.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Variable> {
        self.variables.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.variables.contains_key(&id)
    }

    pub fn values(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

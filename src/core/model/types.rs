//! Structured representation of TypeScript type expressions and declarations.

use serde::{Deserialize, Serialize};

use super::location::Location;

/// A static type expression.
///
/// Forms outside the supported set degrade to [`TypeData::Any`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeData {
    Any,
    /// `string`, `number`, `boolean`, `null`, `undefined`, `void`, ...
    Keyword { name: String },
    StringLiteral { value: String },
    NumberLiteral { value: f64 },
    BooleanLiteral { value: bool },
    BigIntLiteral { value: String },
    /// `` `prefix-${T}` ``: `quasis` has one more entry than `expressions`.
    TemplateLiteral {
        quasis: Vec<String>,
        expressions: Vec<TypeData>,
    },
    /// `-1`, `-10n`
    UnaryLiteral {
        operator: String,
        prefix: bool,
        argument: Box<TypeData>,
    },
    /// Named or dotted reference. `resolved` holds the expansion of a
    /// same-file alias/interface, when one was found within the depth bound.
    Reference {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<TypeData>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resolved: Option<Box<TypeData>>,
    },
    Array { element: Box<TypeData> },
    Union { types: Vec<TypeData> },
    Intersection { types: Vec<TypeData> },
    Object { members: Vec<TypeMember> },
    Parenthesized { inner: Box<TypeData> },
}

impl TypeData {
    pub fn keyword(name: impl Into<String>) -> Self {
        TypeData::Keyword { name: name.into() }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeData::Reference {
            name: name.into(),
            arguments: Vec::new(),
            resolved: None,
        }
    }
}

/// Member of an object type literal or interface body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeMember {
    Property {
        name: String,
        #[serde(rename = "type")]
        ty: TypeData,
        optional: bool,
        computed: bool,
    },
    /// `[key: string]: T`
    Index {
        parameter: String,
        #[serde(rename = "parameterType")]
        parameter_type: TypeData,
        #[serde(rename = "type")]
        ty: TypeData,
    },
}

/// Generic parameter of an interface or alias (`<T extends X = Y>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericParam {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<TypeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<TypeData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeDeclaration {
    Interface {
        name: String,
        loc: Location,
        members: Vec<TypeMember>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extends: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        generics: Option<Vec<GenericParam>>,
    },
    Alias {
        name: String,
        loc: Location,
        value: TypeData,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        generics: Option<Vec<GenericParam>>,
    },
}

impl TypeDeclaration {
    pub fn name(&self) -> &str {
        match self {
            TypeDeclaration::Interface { name, .. } | TypeDeclaration::Alias { name, .. } => name,
        }
    }
}

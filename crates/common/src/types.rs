//! Resolved type IR
//!
//! The closed set of type kinds the extractor resolves documentation type
//! text into. Class references are handles into the registry arena, so the
//! IR can describe recursive shapes without owning them.

use crate::model::{ClassId, Registry};
use serde::{Deserialize, Serialize};

/// Scalar kinds, used on their own for map key overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
}

impl ScalarKind {
    /// Map a documentation keyword to its scalar kind
    ///
    /// "int" is 32-bit and "long" is 64-bit. Getting this wrong corrupts
    /// decoding of large ids.
    ///
    /// # Examples
    /// ```
    /// use lolgen_common::ScalarKind;
    ///
    /// assert_eq!(ScalarKind::from_keyword("long"), Some(ScalarKind::Int64));
    /// assert_eq!(ScalarKind::from_keyword("int"), Some(ScalarKind::Int32));
    /// assert_eq!(ScalarKind::from_keyword("List[int]"), None);
    /// ```
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "boolean" => Some(ScalarKind::Bool),
            "int" => Some(ScalarKind::Int32),
            "long" => Some(ScalarKind::Int64),
            "string" => Some(ScalarKind::String),
            "float" => Some(ScalarKind::Float32),
            "double" => Some(ScalarKind::Float64),
            _ => None,
        }
    }

    pub fn to_type(self) -> TypeIr {
        match self {
            ScalarKind::Bool => TypeIr::Bool,
            ScalarKind::Int32 => TypeIr::Int32,
            ScalarKind::Int64 => TypeIr::Int64,
            ScalarKind::Float32 => TypeIr::Float32,
            ScalarKind::Float64 => TypeIr::Float64,
            ScalarKind::String => TypeIr::String,
        }
    }
}

/// Resolved type of a field, parameter or return value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeIr {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    /// Untyped key/value object
    DynamicMap,
    Sequence(Box<TypeIr>),
    Mapping(Box<TypeIr>, Box<TypeIr>),
    Reference(ClassId),
    /// Optional-via-pointer wrapper
    Pointer(Box<TypeIr>),
    /// Hand-written auxiliary type provided by the runtime crate
    External(String),
}

impl TypeIr {
    pub fn sequence(elem: TypeIr) -> Self {
        TypeIr::Sequence(Box::new(elem))
    }

    pub fn mapping(key: TypeIr, elem: TypeIr) -> Self {
        TypeIr::Mapping(Box::new(key), Box::new(elem))
    }

    pub fn pointer(elem: TypeIr) -> Self {
        TypeIr::Pointer(Box::new(elem))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, TypeIr::Mapping(..))
    }

    /// Replace the key of a mapping, `None` if this is not a mapping
    pub fn with_map_key(&self, key: ScalarKind) -> Option<TypeIr> {
        match self {
            TypeIr::Mapping(_, elem) => Some(TypeIr::Mapping(Box::new(key.to_type()), elem.clone())),
            _ => None,
        }
    }

    /// Class referenced by this type, looking through pointers only
    pub fn class(&self) -> Option<ClassId> {
        match self {
            TypeIr::Reference(id) => Some(*id),
            TypeIr::Pointer(inner) => inner.class(),
            _ => None,
        }
    }

    /// Human readable form in the documentation grammar, used for summaries
    pub fn describe(&self, registry: &Registry) -> String {
        match self {
            TypeIr::Bool => "boolean".to_string(),
            TypeIr::Int32 => "int".to_string(),
            TypeIr::Int64 => "long".to_string(),
            TypeIr::Float32 => "float".to_string(),
            TypeIr::Float64 => "double".to_string(),
            TypeIr::String => "string".to_string(),
            TypeIr::DynamicMap => "object".to_string(),
            TypeIr::Sequence(elem) => format!("List[{}]", elem.describe(registry)),
            TypeIr::Mapping(key, elem) => format!(
                "Map[{}, {}]",
                key.describe(registry),
                elem.describe(registry)
            ),
            TypeIr::Reference(id) => registry.class(*id).name.clone(),
            TypeIr::Pointer(inner) => format!("*{}", inner.describe(registry)),
            TypeIr::External(name) => name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(ScalarKind::from_keyword("boolean"), Some(ScalarKind::Bool));
        assert_eq!(ScalarKind::from_keyword("string"), Some(ScalarKind::String));
        assert_eq!(ScalarKind::from_keyword("float"), Some(ScalarKind::Float32));
        assert_eq!(ScalarKind::from_keyword("double"), Some(ScalarKind::Float64));
        assert_eq!(ScalarKind::from_keyword("Long"), None);
    }

    #[test]
    fn test_with_map_key() {
        let declared = TypeIr::mapping(TypeIr::String, TypeIr::pointer(TypeIr::Reference(ClassId(3))));
        let rekeyed = declared.with_map_key(ScalarKind::Int64).unwrap();

        assert_eq!(
            rekeyed,
            TypeIr::mapping(TypeIr::Int64, TypeIr::pointer(TypeIr::Reference(ClassId(3))))
        );
        assert!(TypeIr::sequence(TypeIr::Int64)
            .with_map_key(ScalarKind::Int64)
            .is_none());
    }

    #[test]
    fn test_class_through_pointer() {
        assert_eq!(
            TypeIr::pointer(TypeIr::Reference(ClassId(7))).class(),
            Some(ClassId(7))
        );
        assert_eq!(TypeIr::sequence(TypeIr::Reference(ClassId(7))).class(), None);
    }
}

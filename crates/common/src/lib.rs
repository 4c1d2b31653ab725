//! Common types and utilities for the lolgen client generator
//!
//! This crate contains the resolved registry model produced by the parser and
//! consumed by the generator, the fixed region table, the generator
//! configuration and the shared error type.

mod config;
mod model;
mod region;
mod types;

pub use config::{ClassNameRule, FieldNameRule, GeneratorConfig, OperationRule, SKIP};
pub use model::{
    ClassId, ClassMethod, ClassRegistration, Endpoint, EndpointId, Field, Operation, OperationId,
    Parameter, Path, Registry, RegistryBuilder, Resource, ResourceId, ResponseClass,
    ResponseError,
};
pub use region::{
    all_regions, all_valid_regions, number_regions, region_by_name, Region, FIRST_REGULAR_NUMBER,
};
pub use types::{ScalarKind, TypeIr};

use std::fmt;
use thiserror::Error;

/// Identity of a response class as declared in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassIdentity {
    pub resource: String,
    pub raw_name: String,
}

impl fmt::Display for ClassIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' (resource '{}')", self.raw_name, self.resource)
    }
}

/// Errors that can occur while extracting the registry or generating code
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Structural error in {context}: {message}")]
    Structural { context: String, message: String },

    #[error("Unknown type \"{text}\" in resource \"{resource}\"")]
    UnknownType { resource: String, text: String },

    #[error("Unknown operation {path} in resource \"{resource}\"")]
    UnknownOperation { resource: String, path: String },

    #[error("Ambiguous operation {path} in resource \"{resource}\": suffixes {candidates:?} all match")]
    AmbiguousOperation {
        resource: String,
        path: String,
        candidates: Vec<String>,
    },

    #[error("Class name collision on {name}: {first} and {second}")]
    ClassNameCollision {
        name: String,
        first: ClassIdentity,
        second: ClassIdentity,
    },

    #[error("Duplicate operation name {name}: {first} and {second}")]
    DuplicateOperation {
        name: String,
        first: String,
        second: String,
    },

    #[error("Invalid map key override on operation {operation}: {reason}")]
    InvalidMapKeyOverride { operation: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GeneratorError {
    /// Shorthand for a structural error
    pub fn structural(context: impl Into<String>, message: impl Into<String>) -> Self {
        GeneratorError::Structural {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

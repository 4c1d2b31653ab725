//! Generator configuration loading from YAML files
//!
//! Every key is optional. A missing file means [`GeneratorConfig::default`].

use crate::types::ScalarKind;
use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Field name override that excludes the field from its class
pub const SKIP: &str = "-";

/// Root structure of the configuration file
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Path the generated code imports the runtime crate from
    pub runtime_crate: String,
    /// Keep the documented 64-bit type on ids that are really 32-bit
    pub dont_fix_id_type: bool,
    /// Resource emitted before all others
    pub first_resource: Option<String>,
    /// Resources left out entirely
    pub skip_resources: Vec<String>,
    pub class_names: Vec<ClassNameRule>,
    pub field_names: Vec<FieldNameRule>,
    /// Extra operation metadata, keyed by resource id then path suffix
    pub operations: BTreeMap<String, BTreeMap<String, OperationRule>>,
}

/// Replacement name for a response class
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClassNameRule {
    pub resource: String,
    pub raw: String,
    pub name: String,
}

/// Replacement name for a field; [`SKIP`] excludes the field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldNameRule {
    pub resource: String,
    /// Raw class name, as documented
    pub class: String,
    /// Raw field name, as documented
    pub field: String,
    pub name: String,
}

/// Name and optional map key type of an operation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OperationRule {
    pub name: String,
    #[serde(default)]
    pub map_key: Option<ScalarKind>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            runtime_crate: "lolgen_runtime".to_string(),
            dont_fix_id_type: false,
            first_resource: Some("lol-static-data".to_string()),
            skip_resources: vec!["tournament-provider".to_string()],
            class_names: Vec::new(),
            field_names: Vec::new(),
            operations: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            GeneratorError::Parse(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to null, which serde rejects for a struct
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Configured name for a class, if any
    pub fn class_name(&self, resource: &str, raw: &str) -> Option<&str> {
        self.class_names
            .iter()
            .find(|r| r.resource == resource && r.raw == raw)
            .map(|r| r.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Configured name for a field, if any. May be [`SKIP`].
    pub fn field_name(&self, resource: &str, class: &str, field: &str) -> Option<&str> {
        self.field_names
            .iter()
            .find(|r| r.resource == resource && r.class == class && r.field == field)
            .map(|r| r.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn is_skipped(&self, resource: &str) -> bool {
        self.skip_resources.iter().any(|r| r == resource)
    }

    /// Configured operations of one resource
    pub fn operations_for(&self, resource: &str) -> impl Iterator<Item = (&str, &OperationRule)> {
        self.operations
            .get(resource)
            .into_iter()
            .flat_map(|ops| ops.iter().map(|(suffix, rule)| (suffix.as_str(), rule)))
    }
}

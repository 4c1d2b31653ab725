//! Reference document parsing for the League of Legends API
//!
//! This crate turns the API reference document into a resolved
//! [`Registry`](lolgen_common::Registry).
//!
//! ## Extraction Strategy
//!
//! The reference is a tree of resources, endpoints and operations. Response
//! classes may reference each other across resources, so classes are
//! registered first and their field types are resolved afterwards:
//! - `resource` nodes give id, version and supported regions
//! - `response_body` nodes declare response classes and their fields
//! - `operation` nodes give method, path, parameters and return type
//!
//! Documented names are normalized, known inconsistencies of the reference
//! are corrected, and operations are named from a curated suffix table.

mod document;
mod extractor;
mod naming;
mod operation_mapper;
mod overrides;
mod type_mapper;

pub use document::{Consumed, DocumentFormat, DocumentTree, NodeId, RawNode};
pub use extractor::{extract, parse_legal_values};
pub use naming::{class_name, field_name, lint_name, parameter_name};
pub use operation_mapper::{OperationInfo, OperationMapper};
pub use type_mapper::{split_map_args, TypeMapper};

use lolgen_common::{GeneratorConfig, Registry, Result};
use std::path::Path;

/// Load a reference document and extract its registry
///
/// # Arguments
/// * `path` - Reference document, JSON or YAML
/// * `format` - Document format, detected from the extension when `None`
/// * `config` - Generator configuration
pub fn parse_document(
    path: &Path,
    format: Option<DocumentFormat>,
    config: &GeneratorConfig,
) -> Result<Registry> {
    let tree = DocumentTree::load(path, format)?;
    extract(&tree, config)
}

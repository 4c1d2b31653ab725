//! Rust client generation for the League of Legends API
//!
//! This crate renders a resolved [`Registry`] into a single Rust module: a
//! client, the region table, one struct per response class and a request
//! builder per operation. The output is validated by parsing it with `syn`
//! and formatted with `prettyplease`, so repeated runs are byte-identical.

mod render;
mod templates;

pub use render::{escape_ident, member_ident, rust_type, snake_case};

use lolgen_common::{GeneratorConfig, GeneratorError, Registry, Result};
use render::{ClassView, OperationView, RegionView};
use std::fs;
use std::path::Path;
use tera::Tera;
use tracing::debug;

/// Client generator
///
/// Transforms a Registry into the source of a client module:
/// - Client and Region types
/// - Response class structs
/// - Request builders
pub struct ClientGenerator<'a> {
    registry: &'a Registry,
    config: &'a GeneratorConfig,
    tera: Tera,
}

impl<'a> ClientGenerator<'a> {
    /// Create a new client generator for a Registry
    pub fn new(registry: &'a Registry, config: &'a GeneratorConfig) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self {
            registry,
            config,
            tera,
        })
    }

    /// Generate the formatted client source
    pub fn generate(&self) -> Result<String> {
        let context = self.create_context()?;
        let rendered = self
            .tera
            .render("api.rs", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {}", error_chain(&e))))?;

        let file = syn::parse_file(&rendered)
            .map_err(|e| GeneratorError::Generation(format!("Generated code is invalid: {}", e)))?;

        Ok(prettyplease::unparse(&file))
    }

    /// Generate the client source into `output`
    ///
    /// Nothing is written when generation fails.
    pub fn generate_to_file(&self, output: &Path) -> Result<()> {
        let code = self.generate()?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                GeneratorError::Generation(format!("Failed to create output directory: {}", e))
            })?;
        }
        fs::write(output, code).map_err(|e| {
            GeneratorError::Generation(format!("Failed to write {}: {}", output.display(), e))
        })?;

        Ok(())
    }

    /// Create template context from the Registry
    fn create_context(&self) -> Result<tera::Context> {
        render::check_builder_names(self.registry)?;

        let regions: Vec<RegionView> =
            self.registry.regions().iter().map(RegionView::from).collect();
        let classes = self
            .registry
            .classes()
            .iter()
            .map(|class| ClassView::new(self.registry, class))
            .collect::<Result<Vec<_>>>()?;
        let operations = self
            .registry
            .operations()
            .map(|op| OperationView::new(self.registry, op))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            classes = classes.len(),
            operations = operations.len(),
            "Rendering client"
        );

        let mut context = tera::Context::new();
        context.insert("runtime_crate", &self.config.runtime_crate);
        context.insert("regions", &regions);
        context.insert("classes", &classes);
        context.insert("operations", &operations);
        Ok(context)
    }
}

/// Tera reports the cause of a render failure in the error source chain
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Generate a client source file (convenience function)
pub fn generate_client(registry: &Registry, config: &GeneratorConfig, output: &Path) -> Result<()> {
    let generator = ClientGenerator::new(registry, config)?;
    generator.generate_to_file(output)
}

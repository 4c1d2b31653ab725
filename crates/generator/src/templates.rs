//! Template loading and filters

use lolgen_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Load the client template
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("doc", doc_filter);
    tera.register_filter("rust_str", rust_str_filter);

    tera.add_raw_template("api.rs", include_str!("../templates/api.rs.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load api.rs template: {}", e))
        })?;

    Ok(tera)
}

/// Filter to turn text into `///` doc comment lines
fn doc_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("doc filter expects a string"))?;

    let lines: Vec<String> = text
        .trim()
        .lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                "///".to_string()
            } else {
                format!("/// {}", line)
            }
        })
        .collect();

    if lines.is_empty() {
        return Ok(Value::String(String::new()));
    }
    Ok(Value::String(lines.join("\n")))
}

/// Filter to quote text as a Rust string literal
fn rust_str_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("rust_str filter expects a string"))?;

    Ok(Value::String(format!("{:?}", text)))
}

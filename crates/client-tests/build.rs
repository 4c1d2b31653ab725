//! Generates the client for the parser's reference fixture

use lolgen_common::GeneratorConfig;
use lolgen_generator::ClientGenerator;
use lolgen_parser::parse_document;
use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let reference = manifest_dir.join("../parser/tests/fixtures/reference.json");
    println!("cargo:rerun-if-changed={}", reference.display());

    let config = GeneratorConfig::default();
    let registry = parse_document(&reference, None, &config)?;
    let code = ClientGenerator::new(&registry, &config)?.generate()?;

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let api = out_dir.join("api_gen.rs");
    fs::write(&api, code)?;

    // The generated file carries inner attributes, so it is mounted as a
    // module by path rather than include!d directly.
    let module = format!("#[path = {:?}]\npub mod api;\n", api.display().to_string());
    fs::write(out_dir.join("client.rs"), module)?;

    Ok(())
}

//! Rust rendering of registry entities
//!
//! Turns the resolved registry into flat view models, so the template only
//! prints strings and never decides on types or names.

use lolgen_common::{
    ClassMethod, GeneratorError, Operation, Parameter, Region, Registry, ResponseClass, Result,
    TypeIr,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that can't be raw identifiers
const NOT_RAW: &[&str] = &["crate", "self", "Self", "super"];

/// Names the generated module defines or imports itself
const RESERVED_TYPES: &[&str] = &[
    "Box", "Client", "HashMap", "Option", "Region", "RegionInfo", "Result", "String", "SystemTime",
    "Vec",
];

/// Builder fields and methods that parameters must not shadow
const BUILDER_MEMBERS: &[&str] = &["client", "region", "send", "url"];

/// Client methods that operations must not shadow
const CLIENT_MEMBERS: &[&str] = &["new", "transport"];

/// Convert a camel case name to snake case
///
/// Acronyms stay together, including their plural: `summonerIDs` becomes
/// `summoner_ids`.
///
/// # Examples
/// ```
/// use lolgen_generator::snake_case;
///
/// assert_eq!(snake_case("LeaguesBySummonerID"), "leagues_by_summoner_id");
/// assert_eq!(snake_case("Spell1Id"), "spell1_id");
/// ```
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let after = chars.get(i + 2).copied();

            let plural_acronym =
                next == Some('s') && !after.is_some_and(|a| a.is_ascii_lowercase());
            let ends_acronym = prev.is_ascii_uppercase()
                && next.is_some_and(|n| n.is_ascii_lowercase())
                && !plural_acronym;

            if (prev.is_ascii_lowercase() || prev.is_ascii_digit() || ends_acronym)
                && !out.ends_with('_')
            {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Make `name` a valid identifier
pub fn escape_ident(name: &str) -> String {
    if NOT_RAW.contains(&name) {
        format!("{}_", name)
    } else if KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name.to_string()
    }
}

/// Snake case identifier for a member named `name`
pub fn member_ident(name: &str) -> String {
    escape_ident(&snake_case(name))
}

/// Pick an identifier not in `used`, recording it
fn unique_ident(used: &mut HashSet<String>, ident: String) -> String {
    let mut candidate = ident.clone();
    let mut n = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{}_{}", ident.trim_start_matches("r#"), n);
        n += 1;
    }
    candidate
}

fn avoid(ident: String, reserved: &[&str], suffix: &str) -> String {
    if reserved.contains(&ident.as_str()) {
        format!("{}_{}", ident, suffix)
    } else {
        ident
    }
}

/// Rust spelling of a type in value position
pub fn rust_type(registry: &Registry, ty: &TypeIr) -> Result<String> {
    Ok(match ty {
        TypeIr::Bool => "bool".to_string(),
        TypeIr::Int32 => "i32".to_string(),
        TypeIr::Int64 => "i64".to_string(),
        TypeIr::Float32 => "f32".to_string(),
        TypeIr::Float64 => "f64".to_string(),
        TypeIr::String => "String".to_string(),
        TypeIr::DynamicMap => "HashMap<String, rt::serde_json::Value>".to_string(),
        TypeIr::Sequence(elem) => format!("Vec<{}>", rust_type(registry, elem)?),
        TypeIr::Mapping(key, elem) => format!(
            "HashMap<{}, {}>",
            key_type(registry, key)?,
            rust_type(registry, elem)?
        ),
        TypeIr::Reference(id) => registry.class(*id).name.clone(),
        // Values are owned, the pointer only matters for struct fields
        TypeIr::Pointer(inner) => rust_type(registry, inner)?,
        TypeIr::External(name) => format!("rt::{}", name),
    })
}

fn key_type(registry: &Registry, ty: &TypeIr) -> Result<String> {
    match ty {
        TypeIr::Bool | TypeIr::Int32 | TypeIr::Int64 | TypeIr::String => rust_type(registry, ty),
        other => Err(GeneratorError::Generation(format!(
            "map key type {} can't be hashed",
            other.describe(registry)
        ))),
    }
}

/// Rust spelling of a struct field, always optional
///
/// A direct pointer to a class is boxed, so classes may contain themselves.
pub fn field_type(registry: &Registry, ty: &TypeIr) -> Result<String> {
    match ty {
        TypeIr::Pointer(inner) if matches!(**inner, TypeIr::Reference(_)) => {
            Ok(format!("Option<Box<{}>>", rust_type(registry, inner)?))
        }
        _ => Ok(format!("Option<{}>", rust_type(registry, ty)?)),
    }
}

/// Rust spelling of a parameter; only scalars and lists of scalars can be sent
pub fn param_type(registry: &Registry, param: &Parameter) -> Result<String> {
    let sendable = |ty: &TypeIr| {
        matches!(
            ty,
            TypeIr::Bool
                | TypeIr::Int32
                | TypeIr::Int64
                | TypeIr::Float32
                | TypeIr::Float64
                | TypeIr::String
        )
    };

    match &param.ty {
        TypeIr::Sequence(elem) if sendable(elem.as_ref()) => rust_type(registry, &param.ty),
        ty if sendable(ty) => rust_type(registry, ty),
        other => Err(GeneratorError::Generation(format!(
            "parameter {} has type {}, which can't be sent",
            param.raw_name,
            other.describe(registry)
        ))),
    }
}

fn join_docs(sections: &[String]) -> String {
    sections
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Debug, Serialize)]
pub struct RegionView {
    pub constant: String,
    pub name: String,
    pub platform_id: String,
    pub host: String,
    pub number: i32,
    pub global: bool,
}

pub fn region_constant(region: &Region) -> String {
    region.name.to_uppercase()
}

impl From<&Region> for RegionView {
    fn from(region: &Region) -> Self {
        RegionView {
            constant: region_constant(region),
            name: region.name.to_string(),
            platform_id: region.platform_id.to_string(),
            host: region.host(),
            number: region.number,
            global: region.is_global(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FieldView {
    pub ident: String,
    pub raw_name: String,
    pub ty: String,
    pub docs: String,
}

#[derive(Debug, Serialize)]
pub struct MethodView {
    pub ident: String,
    pub field: String,
    pub docs: String,
}

#[derive(Debug, Serialize)]
pub struct ClassView {
    pub name: String,
    pub docs: String,
    pub fields: Vec<FieldView>,
    pub methods: Vec<MethodView>,
}

impl ClassView {
    pub fn new(registry: &Registry, class: &ResponseClass) -> Result<Self> {
        if RESERVED_TYPES.contains(&class.name.as_str()) {
            return Err(GeneratorError::Generation(format!(
                "class {} (raw {}) clashes with a generated type; rename it in the config",
                class.name, class.raw_name
            )));
        }

        let mut used = HashSet::new();
        let mut idents: HashMap<&str, String> = HashMap::new();
        let mut fields = Vec::with_capacity(class.fields.len());

        for field in &class.fields {
            let ident = unique_ident(&mut used, member_ident(&field.name));
            idents.insert(field.name.as_str(), ident.clone());
            fields.push(FieldView {
                ident,
                raw_name: field.raw_name.clone(),
                ty: field_type(registry, &field.ty)?,
                docs: field.description.clone(),
            });
        }

        let mut methods = Vec::new();
        for method in &class.methods {
            match method {
                ClassMethod::EpochMillis { field, name } => {
                    let field_ident = idents.get(field.as_str()).ok_or_else(|| {
                        GeneratorError::Generation(format!(
                            "method {} of class {} refers to unknown field {}",
                            name, class.name, field
                        ))
                    })?;
                    methods.push(MethodView {
                        ident: member_ident(name),
                        field: field_ident.clone(),
                        docs: format!("`{}` as a point in time", field_ident),
                    });
                }
            }
        }

        let resource = &registry.resource(class.resource).id;
        Ok(ClassView {
            name: class.name.clone(),
            docs: join_docs(&[
                class.description.clone(),
                format!("Declared as `{}` by the {} api.", class.raw_name, resource),
            ]),
            fields,
            methods,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ParamView {
    pub ident: String,
    pub raw_name: String,
    pub ty: String,
    pub docs: String,
}

/// A parameter filled in from the selected region
#[derive(Debug, Serialize)]
pub struct RegionParamView {
    pub raw_name: String,
    /// Expression producing the value
    pub value: String,
}

fn param_docs(param: &Parameter) -> String {
    let mut docs = param.description.clone();
    if !param.legal_values.is_empty() {
        docs.push_str(&format!("\n\nLegal values: {}", param.legal_values.join(", ")));
    }
    docs
}

fn param_ident(used: &mut HashSet<String>, param: &Parameter) -> String {
    let ident = avoid(member_ident(&param.name), BUILDER_MEMBERS, "param");
    unique_ident(used, ident)
}

fn region_param(param: &Parameter) -> RegionParamView {
    let value = if param.name == "platformID" {
        "self.region.platform_id().to_string()"
    } else {
        "self.region.code()"
    };
    RegionParamView {
        raw_name: param.raw_name.clone(),
        value: value.to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct OperationView {
    pub name: String,
    pub builder: String,
    pub ident: String,
    pub docs: String,
    pub method: String,
    pub path_template: String,
    pub needs_region: bool,
    /// Constants of the regions the resource serves
    pub regions: Vec<String>,
    pub base_url: Option<String>,
    pub api_key: bool,
    pub path_params: Vec<ParamView>,
    pub region_params: Vec<RegionParamView>,
    pub query_params: Vec<ParamView>,
    pub query_region_params: Vec<RegionParamView>,
    pub has_query: bool,
    pub result_type: String,
    /// String keyed type decoded before re-keying
    pub raw_type: Option<String>,
}

impl OperationView {
    pub fn new(registry: &Registry, op: &Operation) -> Result<Self> {
        let resource = registry.resource_of(op);
        let needs_region =
            registry.needs_region(op) || op.query_params.iter().any(Parameter::is_region);

        let mut used: HashSet<String> = BUILDER_MEMBERS.iter().map(|m| m.to_string()).collect();
        let mut path_params = Vec::new();
        let mut region_params = Vec::new();
        for param in &op.path.params {
            if param.is_region() {
                region_params.push(region_param(param));
                continue;
            }
            path_params.push(ParamView {
                ident: param_ident(&mut used, param),
                raw_name: param.raw_name.clone(),
                ty: param_type(registry, param)?,
                docs: param_docs(param),
            });
        }

        let mut query_params = Vec::new();
        let mut query_region_params = Vec::new();
        for param in &op.query_params {
            if param.is_region() {
                query_region_params.push(region_param(param));
                continue;
            }
            query_params.push(ParamView {
                ident: param_ident(&mut used, param),
                raw_name: param.raw_name.clone(),
                ty: param_type(registry, param)?,
                docs: param_docs(param),
            });
        }

        let result = op.result_type();
        let raw_type = match (&op.map_key, &result) {
            (Some(_), TypeIr::Mapping(_, elem)) => {
                Some(format!("HashMap<String, {}>", rust_type(registry, elem)?))
            }
            _ => None,
        };

        let url_template = format!(
            "{}{}",
            resource
                .base_url
                .as_deref()
                .unwrap_or("https://{region}.api.pvp.net"),
            op.path.template
        );

        let arguments: Vec<String> = path_params
            .iter()
            .map(|p| format!("* `{}` - {}", p.ident, p.docs.replace("\n\n", " ")))
            .collect();
        let errors: Vec<String> = op.errors.iter().map(|e| e.to_string()).collect();

        let docs = join_docs(&[
            op.description.clone(),
            format!("`{} {}`", op.method, url_template),
            if arguments.is_empty() {
                String::new()
            } else {
                format!("# Arguments\n{}", arguments.join("\n"))
            },
            if op.implementation_notes.is_empty() {
                String::new()
            } else {
                format!("Implementation notes: {}", op.implementation_notes)
            },
            if op.rate_limit_notes.is_empty() {
                String::new()
            } else {
                format!("Rate limit notes: {}", op.rate_limit_notes)
            },
            if errors.is_empty() {
                String::new()
            } else {
                format!("Errors: {}", errors.join(", "))
            },
            format!("Reference: <{}>", registry.doc_url(op)),
        ]);

        let api_key = resource.api_key_required;
        Ok(OperationView {
            name: op.name.clone(),
            builder: op.builder_name(),
            ident: avoid(member_ident(&op.name), CLIENT_MEMBERS, "call"),
            docs,
            method: op.method.clone(),
            path_template: op.path.template.clone(),
            needs_region,
            regions: resource.regions.iter().map(region_constant).collect(),
            base_url: resource.base_url.clone(),
            api_key,
            has_query: api_key || !query_params.is_empty() || !query_region_params.is_empty(),
            path_params,
            region_params,
            query_params,
            query_region_params,
            result_type: rust_type(registry, &result)?,
            raw_type,
        })
    }
}

/// Check that no builder type clashes with a class
pub fn check_builder_names(registry: &Registry) -> Result<()> {
    for op in registry.operations() {
        let builder = op.builder_name();
        if registry.class_by_name(&builder).is_some() || RESERVED_TYPES.contains(&builder.as_str())
        {
            return Err(GeneratorError::Generation(format!(
                "builder {} of operation {} clashes with a class",
                builder, op.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lolgen_common::{all_valid_regions, ClassId, Field, RegistryBuilder, Resource};

    fn registry_with_class() -> Registry {
        let mut builder = RegistryBuilder::new(all_valid_regions());
        let resource = builder.add_resource(Resource {
            id: "summoner".to_string(),
            version: "v1.4".to_string(),
            num: 4,
            regions: all_valid_regions(),
            base_url: None,
            api_key_required: true,
            endpoints: Vec::new(),
        });
        builder
            .register_class(ResponseClass {
                resource,
                raw_name: "SummonerDto".to_string(),
                name: "Summoner".to_string(),
                description: "Summoner information".to_string(),
                fields: vec![
                    Field {
                        class: ClassId(0),
                        raw_name: "type".to_string(),
                        name: "Type".to_string(),
                        ty: TypeIr::String,
                        description: String::new(),
                    },
                    Field {
                        class: ClassId(0),
                        raw_name: "revisionDate".to_string(),
                        name: "RevisionDate".to_string(),
                        ty: TypeIr::Int64,
                        description: "Date summoner was last modified specified as epoch milliseconds".to_string(),
                    },
                    Field {
                        class: ClassId(0),
                        raw_name: "next".to_string(),
                        name: "Next".to_string(),
                        ty: TypeIr::pointer(TypeIr::Reference(ClassId(0))),
                        description: String::new(),
                    },
                ],
                methods: vec![ClassMethod::EpochMillis {
                    field: "RevisionDate".to_string(),
                    name: "RevisionDateTime".to_string(),
                }],
            })
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("SummonersByName"), "summoners_by_name");
        assert_eq!(snake_case("summonerIDs"), "summoner_ids");
        assert_eq!(snake_case("ProfileIconID"), "profile_icon_id");
        assert_eq!(snake_case("IDOfThing"), "id_of_thing");
        assert_eq!(snake_case("Version1_2"), "version1_2");
        assert_eq!(snake_case("ShardsInRegion"), "shards_in_region");
        assert_eq!(snake_case("champData"), "champ_data");
        assert_eq!(snake_case("locale"), "locale");
    }

    #[test]
    fn test_escape_ident() {
        assert_eq!(escape_ident("type"), "r#type");
        assert_eq!(escape_ident("match"), "r#match");
        assert_eq!(escape_ident("self"), "self_");
        assert_eq!(escape_ident("2v2"), "_2v2");
        assert_eq!(escape_ident("name"), "name");
    }

    #[test]
    fn test_unique_ident() {
        let mut used = HashSet::new();
        assert_eq!(unique_ident(&mut used, "id".to_string()), "id");
        assert_eq!(unique_ident(&mut used, "id".to_string()), "id_2");
        assert_eq!(unique_ident(&mut used, "r#type".to_string()), "r#type");
        assert_eq!(unique_ident(&mut used, "r#type".to_string()), "type_2");
    }

    #[test]
    fn test_rust_types() {
        let registry = registry_with_class();
        let summoner = TypeIr::pointer(TypeIr::Reference(ClassId(0)));

        assert_eq!(
            rust_type(&registry, &TypeIr::mapping(TypeIr::Int64, summoner.clone())).unwrap(),
            "HashMap<i64, Summoner>"
        );
        assert_eq!(
            rust_type(&registry, &TypeIr::sequence(TypeIr::sequence(TypeIr::Float64))).unwrap(),
            "Vec<Vec<f64>>"
        );
        assert_eq!(
            rust_type(&registry, &TypeIr::DynamicMap).unwrap(),
            "HashMap<String, rt::serde_json::Value>"
        );
        assert_eq!(
            field_type(&registry, &summoner).unwrap(),
            "Option<Box<Summoner>>"
        );
        assert_eq!(
            field_type(&registry, &TypeIr::pointer(TypeIr::External("SpellRange".to_string())))
                .unwrap(),
            "Option<rt::SpellRange>"
        );
        assert!(rust_type(&registry, &TypeIr::mapping(TypeIr::Float64, TypeIr::Int32)).is_err());
    }

    #[test]
    fn test_param_types() {
        let registry = registry_with_class();
        let mut param = Parameter {
            raw_name: "summonerIds".to_string(),
            name: "summonerIDs".to_string(),
            description: String::new(),
            ty: TypeIr::sequence(TypeIr::Int64),
            required: true,
            legal_values: Vec::new(),
        };
        assert_eq!(param_type(&registry, &param).unwrap(), "Vec<i64>");

        param.ty = TypeIr::DynamicMap;
        assert!(matches!(
            param_type(&registry, &param),
            Err(GeneratorError::Generation(_))
        ));
    }

    #[test]
    fn test_class_view() {
        let registry = registry_with_class();
        let view = ClassView::new(&registry, &registry.classes()[0]).unwrap();

        assert_eq!(view.fields[0].ident, "r#type");
        assert_eq!(view.fields[0].raw_name, "type");
        assert_eq!(view.fields[1].ty, "Option<i64>");
        assert_eq!(view.fields[2].ty, "Option<Box<Summoner>>");
        assert_eq!(view.methods[0].ident, "revision_date_time");
        assert_eq!(view.methods[0].field, "revision_date");
        assert!(view.docs.starts_with("Summoner information"));
    }

    #[test]
    fn test_reserved_class_name() {
        let registry = registry_with_class();
        let mut class = registry.classes()[0].clone();
        class.name = "Region".to_string();

        let err = ClassView::new(&registry, &class).unwrap_err();
        assert!(err.to_string().contains("clashes with a generated type"));
    }
}

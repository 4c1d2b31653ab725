//! Registry model
//!
//! Resources, endpoints, operations and response classes live in arenas owned
//! by the [`Registry`]. Parents are referenced through integer handles, so
//! the back-references never own anything. The registry is assembled by a
//! [`RegistryBuilder`] during extraction and is read-only afterwards.

use crate::region::Region;
use crate::types::{ScalarKind, TypeIr};
use crate::{ClassIdentity, GeneratorError, Result};
use std::collections::HashMap;
use std::fmt;

/// Handle of a resource in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub usize);

/// Handle of an endpoint in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointId(pub usize);

/// Handle of an operation in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(pub usize);

/// Handle of a response class in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub usize);

/// Top-level group of operations sharing version and region policy
#[derive(Debug, Clone)]
pub struct Resource {
    pub id: String,
    pub version: String,
    /// Numeric id used by the reference page
    pub num: u32,
    pub regions: Vec<Region>,
    /// Fixed base url. `None` means the base url is derived from the region.
    pub base_url: Option<String>,
    pub api_key_required: bool,
    pub endpoints: Vec<EndpointId>,
}

#[derive(Debug, Clone)]
pub struct Endpoint {
    pub resource: ResourceId,
    pub operations: Vec<OperationId>,
}

/// A documented HTTP error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseError {
    pub code: u16,
    pub description: String,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.code, self.description)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub raw_name: String,
    pub name: String,
    pub description: String,
    pub ty: TypeIr,
    pub required: bool,
    /// Values listed after "Legal values:" in the description
    pub legal_values: Vec<String>,
}

impl Parameter {
    /// True for parameters filled from the selected region
    pub fn is_region(&self) -> bool {
        matches!(self.name.as_str(), "region" | "platformID")
    }
}

/// Path template with its declared parameters
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub template: String,
    pub params: Vec<Parameter>,
}

impl Path {
    /// True if a path parameter with this raw name exists
    pub fn has(&self, raw_name: &str) -> bool {
        self.params.iter().any(|p| p.raw_name == raw_name)
    }

    pub fn has_region_param(&self) -> bool {
        self.params.iter().any(Parameter::is_region)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

#[derive(Debug, Clone)]
pub struct Operation {
    pub endpoint: EndpointId,
    pub name: String,
    pub description: String,
    pub method: String,
    /// Numeric id used by the reference page
    pub num: u32,
    pub path: Path,
    pub query_params: Vec<Parameter>,
    /// Return type as it appears on the wire
    pub return_type: TypeIr,
    pub map_key: Option<ScalarKind>,
    pub implementation_notes: String,
    pub rate_limit_notes: String,
    pub errors: Vec<ResponseError>,
}

impl Operation {
    /// Return type handed to callers, with the map key override applied
    pub fn result_type(&self) -> TypeIr {
        match self.map_key {
            Some(key) => self
                .return_type
                .with_map_key(key)
                .unwrap_or_else(|| self.return_type.clone()),
            None => self.return_type.clone(),
        }
    }

    /// Name of the generated builder type
    pub fn builder_name(&self) -> String {
        format!("{}Call", self.name)
    }
}

/// Generated helper attached to a response class
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMethod {
    /// Converts an epoch-milliseconds field to a point in time
    EpochMillis { field: String, name: String },
}

#[derive(Debug, Clone)]
pub struct Field {
    pub class: ClassId,
    pub raw_name: String,
    pub name: String,
    pub ty: TypeIr,
    pub description: String,
}

impl Field {
    /// Serialization tag, always the documented name
    pub fn tag(&self) -> &str {
        &self.raw_name
    }
}

#[derive(Debug, Clone)]
pub struct ResponseClass {
    pub resource: ResourceId,
    pub raw_name: String,
    pub name: String,
    pub description: String,
    pub fields: Vec<Field>,
    pub methods: Vec<ClassMethod>,
}

impl ResponseClass {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_raw_name(&self, raw_name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.raw_name == raw_name)
    }
}

/// Fully resolved model of the documented api
#[derive(Debug, Clone, Default)]
pub struct Registry {
    regions: Vec<Region>,
    resources: Vec<Resource>,
    endpoints: Vec<Endpoint>,
    operations: Vec<Operation>,
    classes: Vec<ResponseClass>,
    class_names: HashMap<String, ClassId>,
}

impl Registry {
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Resources in generation order
    pub fn resources(&self) -> impl Iterator<Item = (ResourceId, &Resource)> {
        self.resources
            .iter()
            .enumerate()
            .map(|(i, r)| (ResourceId(i), r))
    }

    pub fn resource(&self, id: ResourceId) -> &Resource {
        &self.resources[id.0]
    }

    pub fn endpoint(&self, id: EndpointId) -> &Endpoint {
        &self.endpoints[id.0]
    }

    pub fn operation(&self, id: OperationId) -> &Operation {
        &self.operations[id.0]
    }

    /// All operations, grouped by resource and endpoint
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.resources.iter().flat_map(move |res| {
            res.endpoints.iter().flat_map(move |e| {
                self.endpoint(*e)
                    .operations
                    .iter()
                    .map(move |op| self.operation(*op))
            })
        })
    }

    pub fn class(&self, id: ClassId) -> &ResponseClass {
        &self.classes[id.0]
    }

    /// Classes in registration order
    pub fn classes(&self) -> &[ResponseClass] {
        &self.classes
    }

    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    /// Resource an operation belongs to
    pub fn resource_of(&self, op: &Operation) -> &Resource {
        self.resource(self.endpoint(op.endpoint).resource)
    }

    /// True if the caller must pick a region for this operation
    ///
    /// That is the case when the resource has no fixed base url or when the
    /// path itself carries a region.
    pub fn needs_region(&self, op: &Operation) -> bool {
        self.resource_of(op).base_url.is_none() || op.path.has_region_param()
    }

    /// Link to the operation on the reference page
    pub fn doc_url(&self, op: &Operation) -> String {
        format!(
            "https://developer.riotgames.com/api/methods#!/{}/{}",
            self.resource_of(op).num,
            op.num
        )
    }

    /// Human readable outline of the registry
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for (_, res) in self.resources() {
            let regions: Vec<&str> = res.regions.iter().map(|r| r.name).collect();
            lines.push(format!(
                "|+ Resource {} {} [{}]",
                res.id,
                res.version,
                regions.join(",")
            ));

            for endpoint in &res.endpoints {
                lines.push("|+-- Endpoint".to_string());

                for op in &self.endpoint(*endpoint).operations {
                    let op = self.operation(*op);
                    lines.push(format!(
                        "|+---- Operation {} {}: {} -> {}",
                        op.name,
                        op.method,
                        op.path,
                        op.result_type().describe(self)
                    ));
                    if !op.description.is_empty() {
                        lines.push(format!("        Description: {}", op.description));
                    }
                    if !op.query_params.is_empty() {
                        let names: Vec<&str> =
                            op.query_params.iter().map(|p| p.name.as_str()).collect();
                        lines.push(format!("        Query parameters: {}", names.join(", ")));
                    }
                    if !op.rate_limit_notes.is_empty() {
                        lines.push(format!("        Rate limit notes: {}", op.rate_limit_notes));
                    }
                    if !op.implementation_notes.is_empty() {
                        lines.push(format!("        Notes: {}", op.implementation_notes));
                    }
                    if !op.errors.is_empty() {
                        let errors: Vec<String> = op.errors.iter().map(|e| e.to_string()).collect();
                        lines.push(format!("        Errors: {}", errors.join(" ")));
                    }
                }
            }
        }

        for class in &self.classes {
            lines.push(format!(
                "class {} (raw: {}, resource: {}, {} fields)",
                class.name,
                class.raw_name,
                self.resource(class.resource).id,
                class.fields.len()
            ));
        }

        lines
    }
}

/// Outcome of registering a response class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassRegistration {
    Registered(ClassId),
    /// Same resource and raw name seen before; nothing was added
    AlreadyDeclared(ClassId),
}

/// Assembles a [`Registry`] during extraction
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    pub fn new(regions: Vec<Region>) -> Self {
        RegistryBuilder {
            registry: Registry {
                regions,
                ..Registry::default()
            },
        }
    }

    /// Read access to what has been registered so far
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn add_resource(&mut self, resource: Resource) -> ResourceId {
        self.registry.resources.push(resource);
        ResourceId(self.registry.resources.len() - 1)
    }

    pub fn add_endpoint(&mut self, resource: ResourceId) -> EndpointId {
        self.registry.endpoints.push(Endpoint {
            resource,
            operations: Vec::new(),
        });
        let id = EndpointId(self.registry.endpoints.len() - 1);
        self.registry.resources[resource.0].endpoints.push(id);
        id
    }

    pub fn add_operation(&mut self, operation: Operation) -> OperationId {
        let endpoint = operation.endpoint;
        self.registry.operations.push(operation);
        let id = OperationId(self.registry.operations.len() - 1);
        self.registry.endpoints[endpoint.0].operations.push(id);
        id
    }

    /// Register a class under its normalized name
    ///
    /// Re-declaring the same raw class of the same resource is a no-op. Two
    /// different raw classes that normalize to the same name are an error.
    pub fn register_class(&mut self, class: ResponseClass) -> Result<ClassRegistration> {
        if let Some(existing) = self.registry.class_by_name(&class.name) {
            let conflict = self.registry.class(existing);
            if conflict.resource == class.resource && conflict.raw_name == class.raw_name {
                return Ok(ClassRegistration::AlreadyDeclared(existing));
            }

            return Err(GeneratorError::ClassNameCollision {
                name: class.name.clone(),
                first: ClassIdentity {
                    resource: self.registry.resource(conflict.resource).id.clone(),
                    raw_name: conflict.raw_name.clone(),
                },
                second: ClassIdentity {
                    resource: self.registry.resource(class.resource).id.clone(),
                    raw_name: class.raw_name.clone(),
                },
            });
        }

        let id = ClassId(self.registry.classes.len());
        self.registry.class_names.insert(class.name.clone(), id);
        self.registry.classes.push(class);
        Ok(ClassRegistration::Registered(id))
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut ResponseClass {
        &mut self.registry.classes[id.0]
    }

    /// Class lookup table by normalized name
    pub fn class_names(&self) -> &HashMap<String, ClassId> {
        &self.registry.class_names
    }

    pub fn build(self) -> Registry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::all_valid_regions;

    fn resource(id: &str) -> Resource {
        Resource {
            id: id.to_string(),
            version: "v1.4".to_string(),
            num: 1,
            regions: all_valid_regions(),
            base_url: None,
            api_key_required: true,
            endpoints: Vec::new(),
        }
    }

    fn class(resource: ResourceId, raw: &str, name: &str) -> ResponseClass {
        ResponseClass {
            resource,
            raw_name: raw.to_string(),
            name: name.to_string(),
            description: String::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    #[test]
    fn test_redeclaration_is_idempotent() {
        let mut builder = RegistryBuilder::new(Vec::new());
        let res = builder.add_resource(resource("summoner"));

        let first = builder
            .register_class(class(res, "SummonerDto", "Summoner"))
            .unwrap();
        let second = builder
            .register_class(class(res, "SummonerDto", "Summoner"))
            .unwrap();

        assert_eq!(first, ClassRegistration::Registered(ClassId(0)));
        assert_eq!(second, ClassRegistration::AlreadyDeclared(ClassId(0)));
        assert_eq!(builder.build().classes().len(), 1);
    }

    #[test]
    fn test_collision_between_raw_names() {
        let mut builder = RegistryBuilder::new(Vec::new());
        let res = builder.add_resource(resource("summoner"));

        builder
            .register_class(class(res, "SummonerDto", "Summoner"))
            .unwrap();
        let err = builder
            .register_class(class(res, "Summoner", "Summoner"))
            .unwrap_err();

        assert!(matches!(err, GeneratorError::ClassNameCollision { .. }));
    }

    #[test]
    fn test_collision_across_resources() {
        let mut builder = RegistryBuilder::new(Vec::new());
        let summoner = builder.add_resource(resource("summoner"));
        let game = builder.add_resource(resource("game"));

        builder
            .register_class(class(summoner, "MasteryDto", "Mastery"))
            .unwrap();
        let err = builder
            .register_class(class(game, "MasteryDto", "Mastery"))
            .unwrap_err();

        match err {
            GeneratorError::ClassNameCollision { first, second, .. } => {
                assert_eq!(first.resource, "summoner");
                assert_eq!(second.resource, "game");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_needs_region() {
        let mut builder = RegistryBuilder::new(Vec::new());
        let mut fixed = resource("lol-status");
        fixed.base_url = Some("http://status.leagueoflegends.com".to_string());
        let res = builder.add_resource(fixed);
        let endpoint = builder.add_endpoint(res);
        let op = builder.add_operation(Operation {
            endpoint,
            name: "Shards".to_string(),
            description: String::new(),
            method: "GET".to_string(),
            num: 7,
            path: Path {
                template: "/shards".to_string(),
                params: Vec::new(),
            },
            query_params: Vec::new(),
            return_type: TypeIr::DynamicMap,
            map_key: None,
            implementation_notes: String::new(),
            rate_limit_notes: String::new(),
            errors: Vec::new(),
        });

        let registry = builder.build();
        let op = registry.operation(op);
        assert!(!registry.needs_region(op));
        assert_eq!(
            registry.doc_url(op),
            "https://developer.riotgames.com/api/methods#!/1/7"
        );
        assert_eq!(registry.operations().count(), 1);
    }
}

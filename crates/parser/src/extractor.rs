//! Registry extraction from the reference document
//!
//! Extraction runs in three passes over the read-only tree:
//! 1. every response class of every resource is registered by name, so a
//!    field may refer to a class declared later or in another resource,
//! 2. field rows are resolved against the complete class table,
//! 3. operations are extracted and named.
//!
//! The first structural problem aborts extraction.

use crate::document::{Consumed, DocumentTree, NodeId};
use crate::naming::{class_name, field_name, parameter_name};
use crate::operation_mapper::OperationMapper;
use crate::overrides;
use crate::type_mapper::TypeMapper;
use lolgen_common::{
    all_regions, all_valid_regions, region_by_name, ClassId, ClassMethod, ClassRegistration,
    EndpointId, Field, GeneratorConfig, GeneratorError, Operation, Parameter, Path, Region,
    Registry, RegistryBuilder, Resource, ResourceId, ResponseClass, ResponseError, Result, ScalarKind, TypeIr,
};
use std::collections::HashMap;
use tracing::{debug, info};

const RETURN_VALUE: &str = "Return Value:";

/// Resource attributes read from its node
#[derive(Debug)]
struct ResourceInfo {
    node: NodeId,
    id: String,
    version: String,
    num: u32,
    regions: Vec<Region>,
}

/// A registered class whose fields are not resolved yet
struct PendingClass {
    id: ClassId,
    resource: String,
    body: NodeId,
}

/// Extract a resolved registry from a reference document
pub fn extract(tree: &DocumentTree, config: &GeneratorConfig) -> Result<Registry> {
    Extractor { tree, config }.run()
}

struct Extractor<'a> {
    tree: &'a DocumentTree,
    config: &'a GeneratorConfig,
}

impl<'a> Extractor<'a> {
    fn run(&self) -> Result<Registry> {
        let resources = self.ordered_resources()?;
        let ids: Vec<&str> = resources.iter().map(|r| r.id.as_str()).collect();
        info!(resources = ?ids, "Resource order");

        let mut builder = RegistryBuilder::new(all_regions().to_vec());
        let mut handles = Vec::with_capacity(resources.len());
        let mut pending = Vec::new();

        for res in &resources {
            let handle = builder.add_resource(Resource {
                id: res.id.clone(),
                version: res.version.clone(),
                num: res.num,
                regions: res.regions.clone(),
                base_url: overrides::base_url(&res.id).map(str::to_string),
                api_key_required: overrides::api_key_required(&res.id),
                endpoints: Vec::new(),
            });
            handles.push(handle);
            pending.extend(self.register_classes(&mut builder, handle, res)?);
        }

        let classes = builder.class_names().clone();
        let mapper = TypeMapper::new(self.config, &classes);

        for class in pending {
            let (fields, methods) = self.class_fields(&builder, &class, &mapper)?;
            let target = builder.class_mut(class.id);
            target.fields = fields;
            target.methods = methods;
        }

        let operations = OperationMapper::new(self.config);
        let mut names: HashMap<String, String> = HashMap::new();

        for (res, handle) in resources.iter().zip(handles) {
            for endpoint_node in self.tree.children_of_kind(res.node, "endpoint") {
                let endpoint = builder.add_endpoint(handle);

                for op_node in self.tree.children_of_kind(endpoint_node, "operation") {
                    let op = self.operation(res, endpoint, op_node, &mapper, &operations)?;

                    if let Some(first) = names.get(&op.name) {
                        return Err(GeneratorError::DuplicateOperation {
                            name: op.name.clone(),
                            first: first.clone(),
                            second: op.path.template.clone(),
                        });
                    }
                    names.insert(op.name.clone(), op.path.template.clone());

                    debug!(resource = %res.id, operation = %op.name, "Extracted operation");
                    builder.add_operation(op);
                }
            }
        }

        Ok(builder.build())
    }

    /// Resources in generation order, without skipped ones
    fn ordered_resources(&self) -> Result<Vec<ResourceInfo>> {
        let mut resources: Vec<ResourceInfo> = Vec::new();

        for node in self.tree.descendants_of_kind(self.tree.root(), "resource") {
            let res = self.resource_info(node)?;
            if self.config.is_skipped(&res.id) {
                debug!(resource = %res.id, "Skipping resource");
                continue;
            }
            if resources.iter().any(|r| r.id == res.id) {
                return Err(GeneratorError::structural(
                    format!("resource '{}'", res.id),
                    "declared more than once",
                ));
            }
            resources.push(res);
        }

        if let Some(first) = &self.config.first_resource {
            if let Some(pos) = resources.iter().position(|r| &r.id == first) {
                let res = resources.remove(pos);
                resources.insert(0, res);
            }
        }

        Ok(resources)
    }

    fn resource_info(&self, node: NodeId) -> Result<ResourceInfo> {
        let context = || format!("resource node #{}", node.0);
        let attr = |name: &str| {
            self.tree
                .attr(node, name)
                .map(str::trim)
                .ok_or_else(|| {
                    GeneratorError::structural(context(), format!("missing attribute {}", name))
                })
        };

        let (id, version) = split_version(attr("data-version")?)
            .ok_or_else(|| GeneratorError::structural(context(), "malformed data-version"))?;

        let num: u32 = attr("id")?
            .strip_prefix("resource_")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| GeneratorError::structural(context(), "malformed resource id"))?;

        let regions = parse_regions(attr("data-regions")?)
            .map_err(|name| GeneratorError::structural(context(), format!("unknown region '{}'", name)))?;

        Ok(ResourceInfo {
            node,
            id: id.to_string(),
            version: version.to_string(),
            num,
            regions,
        })
    }

    /// Register every response class declared in a resource
    fn register_classes(
        &self,
        builder: &mut RegistryBuilder,
        resource: ResourceId,
        res: &ResourceInfo,
    ) -> Result<Vec<PendingClass>> {
        let mut pending = Vec::new();

        for body in self.tree.descendants_of_kind(res.node, "response_body") {
            let title = self.tree.first_child_of_kind(body, "title").ok_or_else(|| {
                GeneratorError::structural(
                    format!("resource '{}'", res.id),
                    "response body without a title",
                )
            })?;
            let raw_name = self.tree.text(title);
            if raw_name == RETURN_VALUE {
                continue;
            }

            let mut consumed = Consumed::from([title]);
            consumed.extend(self.tree.first_child_of_kind(body, "table"));
            let description = self.tree.text_excluding(body, &consumed);
            let description = description
                .strip_prefix('-')
                .unwrap_or(&description)
                .trim()
                .to_string();

            let name = class_name(self.config, &res.id, &raw_name);
            let class = ResponseClass {
                resource,
                raw_name: raw_name.clone(),
                name: name.clone(),
                description,
                fields: Vec::new(),
                methods: Vec::new(),
            };

            match builder.register_class(class)? {
                ClassRegistration::Registered(id) => {
                    debug!(resource = %res.id, class = %name, raw = %raw_name, "Registered class");
                    pending.push(PendingClass {
                        id,
                        resource: res.id.clone(),
                        body,
                    });
                }
                ClassRegistration::AlreadyDeclared(_) => {
                    debug!(resource = %res.id, class = %name, raw = %raw_name, "Class is already declared");
                }
            }
        }

        Ok(pending)
    }

    fn class_fields(
        &self,
        builder: &RegistryBuilder,
        class: &PendingClass,
        mapper: &TypeMapper<'_>,
    ) -> Result<(Vec<Field>, Vec<ClassMethod>)> {
        let raw_class = builder.registry().class(class.id).raw_name.clone();
        let context = || format!("class '{}' of resource '{}'", raw_class, class.resource);

        let mut fields = Vec::new();
        let mut methods = Vec::new();

        let Some(table) = self.tree.first_child_of_kind(class.body, "table") else {
            return Ok((fields, methods));
        };

        for row in self.tree.children_of_kind(table, "row") {
            let cells = self.cells(row);
            if cells.len() < 2 {
                return Err(GeneratorError::structural(
                    context(),
                    format!("field row has {} cells, expected name, type and description", cells.len()),
                ));
            }
            let raw_name = &cells[0];
            let description = cells.get(2).cloned().unwrap_or_default();

            let Some(name) = field_name(self.config, &class.resource, &raw_class, raw_name) else {
                debug!(class = %raw_class, field = %raw_name, "Skipping field");
                continue;
            };

            let ty = match overrides::declared_field_type(&raw_class, raw_name) {
                Some(ty) => ty,
                None => {
                    let ty = mapper.map_type(&class.resource, &cells[1])?;
                    overrides::fix_id_type(self.config, &class.resource, &raw_class, raw_name, ty)
                }
            };

            if ty == TypeIr::Int64 && is_epoch_millis(&description) {
                methods.push(ClassMethod::EpochMillis {
                    field: name.clone(),
                    name: format!("{}Time", name),
                });
            }

            fields.push(Field {
                class: class.id,
                raw_name: raw_name.clone(),
                name,
                ty,
                description,
            });
        }

        Ok((fields, methods))
    }

    fn operation(
        &self,
        res: &ResourceInfo,
        endpoint: EndpointId,
        node: NodeId,
        mapper: &TypeMapper<'_>,
        operations: &OperationMapper<'_>,
    ) -> Result<Operation> {
        let tree = self.tree;
        let base_context = format!("operation node #{} of resource '{}'", node.0, res.id);
        let attr = |name: &str| {
            tree.attr(node, name).map(str::trim).ok_or_else(|| {
                GeneratorError::structural(base_context.clone(), format!("missing attribute {}", name))
            })
        };

        let num: u32 = attr("id")?
            .rsplit('_')
            .next()
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| GeneratorError::structural(base_context.clone(), "malformed operation id"))?;
        let method = attr("method")?.to_string();
        let template = attr("path")?.to_string();
        let context = format!("operation {} of resource '{}'", template, res.id);

        let description = tree
            .first_child_of_kind(node, "description")
            .map(|d| tree.text(d))
            .unwrap_or_default();
        let description = description
            .strip_suffix("(REST)")
            .unwrap_or(&description)
            .trim()
            .to_string();

        let info = operations.lookup(&res.id, &template)?;

        let mut path = Path {
            template,
            params: Vec::new(),
        };
        let mut query_params = Vec::new();
        let mut return_type = None;
        let mut implementation_notes = String::new();
        let mut rate_limit_notes = String::new();
        let mut errors = Vec::new();

        for block in tree.children_of_kind(node, "block") {
            if tree.is_blank(block) {
                continue;
            }
            let title = tree
                .attr(block, "title")
                .map(str::trim)
                .ok_or_else(|| GeneratorError::structural(context.clone(), "block without a title"))?;

            match title {
                "Implementation Notes" => implementation_notes = tree.text(block),
                "Rate Limit Notes" => rate_limit_notes = tree.text(block),
                "Response Classes" => {
                    return_type = Some(self.return_type(&res.id, block, mapper, &context)?);
                }
                "Response Errors" => errors = self.errors(block, &context)?,
                "Path Parameters" => {
                    let mut tables = tree.children_of_kind(block, "table");
                    let table = tables.next().ok_or_else(|| {
                        GeneratorError::structural(context.clone(), "path parameters without a table")
                    })?;
                    path.params = self.params(&res.id, table, mapper, &context)?;

                    if let Some(sub) = tree.first_child_of_kind(block, "title") {
                        match tree.text(sub).as_str() {
                            "Query Parameters" => {
                                let table = tables.next().ok_or_else(|| {
                                    GeneratorError::structural(
                                        context.clone(),
                                        "query parameters without a table",
                                    )
                                })?;
                                query_params = self.params(&res.id, table, mapper, &context)?;
                            }
                            "" => {}
                            other => {
                                return Err(GeneratorError::structural(
                                    context.clone(),
                                    format!("unknown parameter heading '{}'", other),
                                ))
                            }
                        }
                    }
                }
                "Query Parameters" => {
                    let table = tree.first_child_of_kind(block, "table").ok_or_else(|| {
                        GeneratorError::structural(context.clone(), "query parameters without a table")
                    })?;
                    query_params = self.params(&res.id, table, mapper, &context)?;
                }
                "Select Region to Execute Against" => {}
                other => {
                    return Err(GeneratorError::structural(
                        context.clone(),
                        format!("unknown block '{}'", other),
                    ))
                }
            }
        }

        let return_type = return_type
            .ok_or_else(|| GeneratorError::structural(context.clone(), "no response classes block"))?;

        if info.map_key.is_some() && !return_type.is_mapping() {
            return Err(GeneratorError::InvalidMapKeyOverride {
                operation: info.name,
                reason: "the return type is not a mapping".to_string(),
            });
        }
        if matches!(info.map_key, Some(ScalarKind::Float32 | ScalarKind::Float64)) {
            return Err(GeneratorError::InvalidMapKeyOverride {
                operation: info.name,
                reason: "floating point keys can't be hashed".to_string(),
            });
        }

        Ok(Operation {
            endpoint,
            name: info.name,
            description,
            method,
            num,
            path,
            query_params,
            return_type,
            map_key: info.map_key,
            implementation_notes,
            rate_limit_notes,
            errors,
        })
    }

    fn return_type(
        &self,
        resource: &str,
        block: NodeId,
        mapper: &TypeMapper<'_>,
        context: &str,
    ) -> Result<TypeIr> {
        let body = self
            .tree
            .descendants_of_kind(block, "response_body")
            .into_iter()
            .next()
            .ok_or_else(|| GeneratorError::structural(context, "response classes without a body"))?;

        let title = self.tree.first_child_of_kind(body, "title");
        let heading = title.map(|t| self.tree.text(t)).unwrap_or_default();
        if heading != RETURN_VALUE {
            return Err(GeneratorError::structural(
                context,
                format!("expected a return value, got '{}'", heading),
            ));
        }

        let consumed: Consumed = title.into_iter().collect();
        mapper.map_type(resource, &self.tree.text_excluding(body, &consumed))
    }

    fn params(
        &self,
        resource: &str,
        table: NodeId,
        mapper: &TypeMapper<'_>,
        context: &str,
    ) -> Result<Vec<Parameter>> {
        let mut params = Vec::new();

        for row in self.tree.children_of_kind(table, "row") {
            let cells = self.cells(row);
            if cells.len() < 3 {
                return Err(GeneratorError::structural(
                    context,
                    format!(
                        "parameter row has {} cells, expected name, required, type and description",
                        cells.len()
                    ),
                ));
            }

            let name = parameter_name(&cells[0]);
            let ty = overrides::parameter_type(&name, mapper.map_type(resource, &cells[2])?);
            let description = cells.get(3).cloned().unwrap_or_default();

            params.push(Parameter {
                raw_name: cells[0].clone(),
                name,
                legal_values: parse_legal_values(&description),
                description,
                ty,
                required: cells[1] == "true",
            });
        }

        Ok(params)
    }

    fn errors(&self, block: NodeId, context: &str) -> Result<Vec<ResponseError>> {
        let mut errors = Vec::new();

        for row in self.tree.descendants_of_kind(block, "row") {
            let cells = self.cells(row);
            let code: u16 = cells
                .first()
                .and_then(|c| c.parse().ok())
                .ok_or_else(|| {
                    GeneratorError::structural(context, "response error without a status code")
                })?;

            errors.push(ResponseError {
                code,
                description: cells[1..].join(" "),
            });
        }

        Ok(errors)
    }

    /// Flattened, trimmed text of every cell of a row
    fn cells(&self, row: NodeId) -> Vec<String> {
        self.tree
            .children_of_kind(row, "cell")
            .map(|cell| self.tree.text(cell))
            .collect()
    }
}

/// Split "summoner-v1.4" into resource id and version at the last dash
fn split_version(attr: &str) -> Option<(&str, &str)> {
    let (id, version) = attr.rsplit_once('-')?;
    let (id, version) = (id.trim(), version.trim());
    if id.is_empty() || version.is_empty() {
        return None;
    }
    Some((id, version))
}

/// Parse "[NA, EUW]", returning the offending name on failure
///
/// "[ALL]" stands for every region but Global.
fn parse_regions(attr: &str) -> std::result::Result<Vec<Region>, String> {
    let inner = attr.trim().trim_start_matches('[').trim_end_matches(']').trim();
    if inner == "ALL" {
        return Ok(all_valid_regions());
    }

    inner
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| region_by_name(name).cloned().ok_or_else(|| name.to_string()))
        .collect()
}

/// Values listed after "Legal values:" in a parameter description
///
/// # Examples
/// ```
/// use lolgen_parser::parse_legal_values;
///
/// assert_eq!(
///     parse_legal_values("Game mode (Legal values: CLASSIC, ODIN)"),
///     vec!["CLASSIC", "ODIN"]
/// );
/// assert!(parse_legal_values("Summoner id").is_empty());
/// ```
pub fn parse_legal_values(description: &str) -> Vec<String> {
    const PREFIX: &str = "Legal values:";

    let Some(start) = description.find(PREFIX) else {
        return Vec::new();
    };

    let values: Vec<&str> = description[start + PREFIX.len()..].trim().split(',').collect();
    let last = values.len() - 1;
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let v = v.trim();
            if i == last {
                v.trim_end_matches(')').trim()
            } else {
                v
            }
        })
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_epoch_millis(description: &str) -> bool {
    description.to_lowercase().contains("epoch milliseconds")
}

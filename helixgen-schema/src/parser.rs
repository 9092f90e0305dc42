//! Introspection payload parser.
//!
//! This module turns the JSON document served by HelixDB's `/introspect`
//! endpoint into a [`SchemaModel`]. Two layouts are accepted:
//!
//! - flat: `{ "nodes": [..], "edges": [..], "vectors": [..], "queries": [..] }`
//! - server: `{ "schema": { "nodes": [..], "vectors": [..], "edges": [..] }, "queries": [..] }`
//!
//! Field lists are either arrays of `{ "name", "type", "nullable" }` objects or
//! objects mapping names to type expressions. Object key order is preserved.
//!
//! Parsing is pure: no I/O, no reference resolution. Dangling references are
//! reported by [`crate::validation::validate_model`].

use crate::error::ParseError;
use crate::ir::SchemaModel;
use crate::types::{
    EdgeType, FieldType, NodeType, QueryDefinition, ReturnShape, SchemaField, VectorType,
};
use serde_json::{Map, Value};

/// Parses an introspection payload from a JSON string.
///
/// # Arguments
/// * `payload` - Raw introspection document
///
/// # Returns
/// Parsed schema model or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed, names an unknown category,
/// or contains an invalid declaration.
pub fn parse_introspection(payload: &str) -> Result<SchemaModel, ParseError> {
    let root: Value = serde_json::from_str(payload)?;
    parse_value(&root)
}

/// Parses an already-decoded introspection payload.
///
/// # Errors
/// Returns `ParseError` on any structural problem, see [`parse_introspection`].
pub fn parse_value(root: &Value) -> Result<SchemaModel, ParseError> {
    let sections = Sections::collect(root)?;
    let mut model = SchemaModel::new();

    if let Some((value, path)) = &sections.nodes {
        for (idx, entry) in entries(value, path)?.iter().enumerate() {
            let path = format!("{path}[{idx}]");
            let node = parse_node(entry, &path)?;
            let name = node.name.clone();
            model
                .add_node(node)
                .map_err(|_| ParseError::duplicate(&path, "node", name))?;
        }
    }

    if let Some((value, path)) = &sections.vectors {
        for (idx, entry) in entries(value, path)?.iter().enumerate() {
            let path = format!("{path}[{idx}]");
            let vector = parse_vector(entry, &path)?;
            let name = vector.name.clone();
            model
                .add_vector(vector)
                .map_err(|_| ParseError::duplicate(&path, "vector", name))?;
        }
    }

    if let Some((value, path)) = &sections.edges {
        for (idx, entry) in entries(value, path)?.iter().enumerate() {
            let path = format!("{path}[{idx}]");
            let edge = parse_edge(entry, &path)?;
            let name = edge.name.clone();
            model
                .add_edge(edge)
                .map_err(|_| ParseError::duplicate(&path, "edge", name))?;
        }
    }

    if let Some((value, path)) = &sections.queries {
        for (idx, entry) in entries(value, path)?.iter().enumerate() {
            let path = format!("{path}[{idx}]");
            let query = parse_query(entry, &path)?;
            let name = query.name.clone();
            if !model.add_query(query) {
                return Err(ParseError::duplicate(&path, "query", name));
            }
        }
    }

    tracing::debug!(
        nodes = model.nodes().len(),
        edges = model.edges().len(),
        vectors = model.vectors().len(),
        queries = model.queries().len(),
        "parsed introspection payload"
    );

    Ok(model)
}

/// Category arrays located in the payload, with their paths.
#[derive(Default)]
struct Sections<'a> {
    nodes: Option<(&'a Value, String)>,
    edges: Option<(&'a Value, String)>,
    vectors: Option<(&'a Value, String)>,
    queries: Option<(&'a Value, String)>,
}

impl<'a> Sections<'a> {
    fn collect(root: &'a Value) -> Result<Self, ParseError> {
        let mut sections = Self::default();

        for (key, value) in as_object(root, "$")? {
            let path = format!("$.{key}");
            if key == "schema" {
                for (inner_key, inner) in as_object(value, &path)? {
                    let inner_path = format!("{path}.{inner_key}");
                    sections.set(inner_key, inner, inner_path)?;
                }
            } else {
                sections.set(key, value, path)?;
            }
        }

        Ok(sections)
    }

    fn set(&mut self, key: &str, value: &'a Value, path: String) -> Result<(), ParseError> {
        let slot = match key {
            "nodes" => &mut self.nodes,
            "edges" => &mut self.edges,
            "vectors" => &mut self.vectors,
            "queries" => &mut self.queries,
            other => {
                return Err(ParseError::UnknownCategory {
                    path,
                    category: other.to_string(),
                });
            }
        };
        if slot.is_some() {
            return Err(ParseError::duplicate(path, "category", key));
        }
        *slot = Some((value, path));
        Ok(())
    }
}

fn parse_node(entry: &Value, path: &str) -> Result<NodeType, ParseError> {
    let obj = as_object(entry, path)?;
    let name = required_str(obj, "name", path)?.to_string();
    let label = optional_str(obj, "label", path)?.map_or_else(|| name.clone(), str::to_string);
    let fields = parse_field_list(
        obj,
        &["fields", "properties"],
        path,
        &NodeType::IMPLICIT_FIELDS,
        &[],
    )?;

    Ok(NodeType {
        name,
        label,
        fields,
    })
}

fn parse_edge(entry: &Value, path: &str) -> Result<EdgeType, ParseError> {
    let obj = as_object(entry, path)?;
    let name = required_str(obj, "name", path)?.to_string();
    let from = first_str(obj, &["from", "from_node"], path)?.to_string();
    let to = first_str(obj, &["to", "to_node"], path)?.to_string();
    let fields = parse_field_list(
        obj,
        &["fields", "properties"],
        path,
        &EdgeType::IMPLICIT_FIELDS,
        &EdgeType::ENDPOINT_FIELDS,
    )?;

    Ok(EdgeType {
        name,
        from,
        to,
        fields,
    })
}

fn parse_vector(entry: &Value, path: &str) -> Result<VectorType, ParseError> {
    let obj = as_object(entry, path)?;
    let name = required_str(obj, "name", path)?.to_string();
    let dimensions = match obj.get("dimensions") {
        None | Some(Value::Null) => None,
        Some(value) => {
            let dims = value.as_u64().ok_or_else(|| {
                ParseError::invalid_value(
                    format!("{path}.dimensions"),
                    "non-negative integer",
                    describe(value),
                )
            })?;
            Some(usize::try_from(dims).map_err(|_| {
                ParseError::invalid_value(
                    format!("{path}.dimensions"),
                    "dimension count",
                    dims.to_string(),
                )
            })?)
        }
    };
    let fields = parse_field_list(
        obj,
        &["fields", "properties"],
        path,
        &VectorType::IMPLICIT_FIELDS,
        &[],
    )?;

    Ok(VectorType {
        name,
        dimensions,
        fields,
    })
}

fn parse_query(entry: &Value, path: &str) -> Result<QueryDefinition, ParseError> {
    let obj = as_object(entry, path)?;
    let name = required_str(obj, "name", path)?.to_string();
    let parameters = parse_field_list(obj, &["parameters", "params"], path, &[], &[])?;
    let returns = parse_returns(obj.get("returns"), &format!("{path}.returns"))?;
    let description = optional_str(obj, "description", path)?.map(str::to_string);

    Ok(QueryDefinition {
        name,
        parameters,
        returns,
        description,
    })
}

fn parse_returns(value: Option<&Value>, path: &str) -> Result<ReturnShape, ParseError> {
    match value {
        None | Some(Value::Null) => Ok(ReturnShape::default()),
        Some(Value::String(expr)) if expr.trim().is_empty() => Ok(ReturnShape::default()),
        Some(Value::String(expr)) => FieldType::parse(expr)
            .map(ReturnShape::Type)
            .ok_or_else(|| ParseError::invalid_type(path, expr)),
        Some(Value::Array(items)) => {
            let mut bindings = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                let binding = item.as_str().ok_or_else(|| {
                    ParseError::invalid_value(format!("{path}[{idx}]"), "string", describe(item))
                })?;
                bindings.push(binding.to_string());
            }
            Ok(ReturnShape::Opaque { bindings })
        }
        Some(Value::Object(map)) => Ok(ReturnShape::Object(parse_field_map(map, path, &[], &[])?)),
        Some(other) => Err(ParseError::invalid_value(
            path,
            "type expression, binding list or object",
            describe(other),
        )),
    }
}

/// Parses the field list stored under the first present key of `keys`.
fn parse_field_list(
    obj: &Map<String, Value>,
    keys: &[&str],
    path: &str,
    implicit: &[&str],
    reserved: &[&str],
) -> Result<Vec<SchemaField>, ParseError> {
    let Some((key, value)) = keys
        .iter()
        .find_map(|key| obj.get(*key).map(|value| (*key, value)))
    else {
        return Ok(Vec::new());
    };
    let path = format!("{path}.{key}");

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => parse_field_map(map, &path, implicit, reserved),
        Value::Array(items) => {
            let mut fields = FieldCollector::new(implicit, reserved);
            for (idx, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{idx}]");
                let item_obj = as_object(item, &item_path)?;
                let name = required_str(item_obj, "name", &item_path)?;
                let type_expr = required_str(item_obj, "type", &item_path)?;
                let nullable = optional_bool(item_obj, "nullable", &item_path)?;
                fields.push(name, type_expr, nullable, &item_path)?;
            }
            Ok(fields.finish())
        }
        other => Err(ParseError::invalid_value(
            path,
            "array or object of fields",
            describe(other),
        )),
    }
}

/// Parses `{ name: "Type" }` or `{ name: { "type": .., "nullable": .. } }`.
fn parse_field_map(
    map: &Map<String, Value>,
    path: &str,
    implicit: &[&str],
    reserved: &[&str],
) -> Result<Vec<SchemaField>, ParseError> {
    let mut fields = FieldCollector::new(implicit, reserved);
    for (name, value) in map {
        let field_path = format!("{path}.{name}");
        match value {
            Value::String(type_expr) => fields.push(name, type_expr, false, &field_path)?,
            Value::Object(spec) => {
                let type_expr = required_str(spec, "type", &field_path)?;
                let nullable = optional_bool(spec, "nullable", &field_path)?;
                fields.push(name, type_expr, nullable, &field_path)?;
            }
            other => {
                return Err(ParseError::invalid_value(
                    field_path,
                    "type expression or field object",
                    describe(other),
                ));
            }
        }
    }
    Ok(fields.finish())
}

/// Accumulates fields of one shape, enforcing name uniqueness.
struct FieldCollector<'a> {
    implicit: &'a [&'a str],
    reserved: &'a [&'a str],
    fields: Vec<SchemaField>,
}

impl<'a> FieldCollector<'a> {
    fn new(implicit: &'a [&'a str], reserved: &'a [&'a str]) -> Self {
        Self {
            implicit,
            reserved,
            fields: Vec::new(),
        }
    }

    fn push(
        &mut self,
        name: &str,
        type_expr: &str,
        nullable: bool,
        path: &str,
    ) -> Result<(), ParseError> {
        if self.implicit.contains(&name) {
            tracing::debug!(field = name, path, "skipping implicit property");
            return Ok(());
        }
        if self.reserved.contains(&name) {
            return Err(ParseError::ReservedField {
                path: path.to_string(),
                field: name.to_string(),
            });
        }
        if self.fields.iter().any(|f| f.name == name) {
            return Err(ParseError::DuplicateField {
                path: path.to_string(),
                field: name.to_string(),
            });
        }
        let ty = FieldType::parse(type_expr)
            .ok_or_else(|| ParseError::invalid_type(format!("{path}.type"), type_expr))?;
        self.fields
            .push(SchemaField::new(name, ty).with_nullable(nullable));
        Ok(())
    }

    fn finish(self) -> Vec<SchemaField> {
        self.fields
    }
}

/// Returns the array of entries for a category; `null` counts as empty.
fn entries<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], ParseError> {
    match value {
        Value::Null => Ok(&[]),
        Value::Array(items) => Ok(items),
        other => Err(ParseError::invalid_value(path, "array", describe(other))),
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ParseError> {
    value
        .as_object()
        .ok_or_else(|| ParseError::invalid_value(path, "object", describe(value)))
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a str, ParseError> {
    optional_str(obj, key, path)?.ok_or_else(|| ParseError::missing(path, key))
}

fn optional_str<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a str>, ParseError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(ParseError::invalid_value(
            format!("{path}.{key}"),
            "string",
            describe(other),
        )),
    }
}

/// Returns the first present string among `keys`; the first key names the
/// field in the error when none is present.
fn first_str<'a>(
    obj: &'a Map<String, Value>,
    keys: &[&str],
    path: &str,
) -> Result<&'a str, ParseError> {
    for key in keys {
        if let Some(value) = optional_str(obj, key, path)? {
            return Ok(value);
        }
    }
    Err(ParseError::missing(path, keys.first().copied().unwrap_or_default()))
}

fn optional_bool(obj: &Map<String, Value>, key: &str, path: &str) -> Result<bool, ParseError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ParseError::invalid_value(
            format!("{path}.{key}"),
            "boolean",
            describe(other),
        )),
    }
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

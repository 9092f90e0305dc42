//! Schema validation utilities.
//!
//! Checks that every name referenced by the model resolves to a declaration
//! of the right category. Runs before any code is generated so a schema with
//! dangling references never produces partial output.

use crate::error::SchemaError;
use crate::ir::{SchemaModel, TypeCategory};
use crate::types::{ReturnShape, SchemaField};

/// Validates a parsed model for reference integrity.
///
/// # Arguments
/// * `model` - The model to validate
///
/// # Returns
/// Ok(()) if every reference resolves, or the first `SchemaError` found.
///
/// # Errors
/// Returns `SchemaError` if an edge endpoint is not a declared node, or a
/// field, parameter or return shape names an undeclared type.
pub fn validate_model(model: &SchemaModel) -> Result<(), SchemaError> {
    for node in model.nodes() {
        validate_fields(model, &node.name, &node.fields)?;
    }

    for edge in model.edges() {
        validate_endpoint(model, &edge.name, "from", &edge.from)?;
        validate_endpoint(model, &edge.name, "to", &edge.to)?;
        validate_fields(model, &edge.name, &edge.fields)?;
    }

    for vector in model.vectors() {
        validate_fields(model, &vector.name, &vector.fields)?;
    }

    for query in model.queries() {
        validate_fields(model, &query.name, &query.parameters)?;
        match &query.returns {
            ReturnShape::Opaque { .. } => {}
            ReturnShape::Type(ty) => {
                if let Some(name) = ty.reference() {
                    resolve(model, format!("{}.returns", query.name), name)?;
                }
            }
            ReturnShape::Object(fields) => {
                validate_fields(model, &format!("{}.returns", query.name), fields)?;
            }
        }
    }

    Ok(())
}

fn validate_endpoint(
    model: &SchemaModel,
    edge: &str,
    side: &str,
    name: &str,
) -> Result<(), SchemaError> {
    let owner = format!("{edge}.{side}");
    match resolve(model, owner.clone(), name)? {
        TypeCategory::Node => Ok(()),
        other => Err(SchemaError::EndpointNotNode {
            owner,
            name: name.to_string(),
            category: other.to_string(),
        }),
    }
}

fn validate_fields(
    model: &SchemaModel,
    owner: &str,
    fields: &[SchemaField],
) -> Result<(), SchemaError> {
    for field in fields {
        if let Some(name) = field.ty.reference() {
            resolve(model, format!("{owner}.{}", field.name), name)?;
        }
    }
    Ok(())
}

fn resolve(model: &SchemaModel, owner: String, name: &str) -> Result<TypeCategory, SchemaError> {
    model
        .category_of(name)
        .ok_or_else(|| SchemaError::UnresolvedReference {
            owner,
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_introspection;

    #[test]
    fn test_validate_valid_model() {
        let payload = r#"{
            "nodes": [ { "name": "User", "properties": { "best_friend": "User?" } } ],
            "edges": [ { "name": "Knows", "from": "User", "to": "User" } ],
            "queries": [ { "name": "AddFriend", "parameters": { "friend": "User" }, "returns": "[Knows]" } ]
        }"#;

        let model = parse_introspection(payload).expect("Failed to parse");
        assert!(validate_model(&model).is_ok());
    }

    #[test]
    fn test_edge_with_undeclared_endpoint() {
        let payload = r#"{
            "nodes": [ { "name": "User" } ],
            "edges": [ { "name": "Knows", "from": "User", "to": "Person" } ]
        }"#;

        let model = parse_introspection(payload).expect("Failed to parse");
        let err = validate_model(&model).expect_err("must fail");
        assert!(matches!(
            err,
            SchemaError::UnresolvedReference { ref owner, ref name } if owner == "Knows.to" && name == "Person"
        ));
    }

    #[test]
    fn test_edge_endpoint_must_be_node() {
        let payload = r#"{
            "nodes": [ { "name": "User" } ],
            "vectors": [ { "name": "Doc" } ],
            "edges": [ { "name": "Cites", "from": "User", "to": "Doc" } ]
        }"#;

        let model = parse_introspection(payload).expect("Failed to parse");
        let err = validate_model(&model).expect_err("must fail");
        assert!(matches!(err, SchemaError::EndpointNotNode { ref category, .. } if category == "vector"));
    }

    #[test]
    fn test_query_parameter_reference() {
        let payload = r#"{ "queries": [ { "name": "Q", "parameters": { "p": "[Ghost]" } } ] }"#;

        let model = parse_introspection(payload).expect("Failed to parse");
        let err = validate_model(&model).expect_err("must fail");
        assert!(matches!(err, SchemaError::UnresolvedReference { ref owner, .. } if owner == "Q.p"));
    }

    #[test]
    fn test_query_return_reference() {
        let payload = r#"{ "queries": [ { "name": "Q", "returns": { "items": "[Ghost]" } } ] }"#;

        let model = parse_introspection(payload).expect("Failed to parse");
        let err = validate_model(&model).expect_err("must fail");
        assert!(
            matches!(err, SchemaError::UnresolvedReference { ref owner, .. } if owner == "Q.returns.items")
        );
    }

    #[test]
    fn test_opaque_returns_not_checked() {
        let payload = r#"{ "queries": [ { "name": "Q", "returns": ["whatever"] } ] }"#;

        let model = parse_introspection(payload).expect("Failed to parse");
        assert!(validate_model(&model).is_ok());
    }
}

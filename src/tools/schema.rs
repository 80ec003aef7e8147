//! Tool input schema checks
//!
//! Covers the subset of JSON Schema the tool declarations use: an object
//! with typed top-level properties and a list of required keys. Nested
//! values (todo records) are left to the tool itself.

use std::collections::HashSet;

use serde_json::Value;

use crate::core::SchemaError;
use crate::llm::{ToolDefinition, ToolInputSchema};

/// Check `input` against a declared input schema
pub fn validate(schema: &ToolInputSchema, input: &Value) -> Result<(), SchemaError> {
    let object = input.as_object().ok_or(SchemaError::NotAnObject)?;

    for field in schema.required.iter().flatten() {
        match object.get(field) {
            None | Some(Value::Null) => return Err(SchemaError::MissingField(field.clone())),
            Some(_) => {}
        }
    }

    let Some(properties) = schema.properties.as_ref().and_then(Value::as_object) else {
        return Ok(());
    };

    for (field, value) in object {
        if value.is_null() {
            continue;
        }
        let Some(expected) = properties
            .get(field)
            .and_then(|p| p.get("type"))
            .and_then(Value::as_str)
        else {
            continue;
        };

        if !matches_type(expected, value) {
            return Err(SchemaError::WrongType {
                field: field.clone(),
                expected: expected.to_string(),
            });
        }
    }

    Ok(())
}

fn matches_type(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_u64() || value.is_i64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        _ => true,
    }
}

/// Check that every tool in `expected` is declared once with a usable schema
pub fn verify_definitions(definitions: &[ToolDefinition], expected: &[&str]) -> Result<(), String> {
    let mut seen = HashSet::new();

    for definition in definitions {
        if !seen.insert(definition.name.as_str()) {
            return Err(format!("tool '{}' is declared twice", definition.name));
        }

        let schema = &definition.input_schema;
        if schema.schema_type != "object" {
            return Err(format!(
                "tool '{}' input schema must have type object, got {}",
                definition.name, schema.schema_type
            ));
        }

        let properties = match &schema.properties {
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                return Err(format!(
                    "tool '{}' properties must be an object",
                    definition.name
                ))
            }
            None => None,
        };

        for field in schema.required.iter().flatten() {
            if !properties.is_some_and(|p| p.contains_key(field)) {
                return Err(format!(
                    "tool '{}' requires undeclared property '{}'",
                    definition.name, field
                ));
            }
        }
    }

    for name in expected {
        if !seen.contains(name) {
            return Err(format!("tool '{}' is not declared", name));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> ToolInputSchema {
        ToolInputSchema::new()
            .with_properties(json!({
                "path": {"type": "string"},
                "limit": {"type": "integer"}
            }))
            .with_required(&["path"])
    }

    #[test]
    fn test_valid_input() {
        assert!(validate(&schema(), &json!({"path": "a"})).is_ok());
        assert!(validate(&schema(), &json!({"path": "a", "limit": 3})).is_ok());
        assert!(validate(&schema(), &json!({"path": "a", "limit": null})).is_ok());
        assert!(validate(&schema(), &json!({"path": "a", "extra": true})).is_ok());
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(validate(&schema(), &json!([1])), Err(SchemaError::NotAnObject));
        assert_eq!(
            validate(&schema(), &json!({})),
            Err(SchemaError::MissingField("path".to_string()))
        );
        assert_eq!(
            validate(&schema(), &json!({"path": 7})),
            Err(SchemaError::WrongType {
                field: "path".to_string(),
                expected: "string".to_string()
            })
        );
        assert!(validate(&schema(), &json!({"path": "a", "limit": 1.5})).is_err());
    }

    #[test]
    fn test_verify_definitions() {
        let good = ToolDefinition {
            name: "read".to_string(),
            description: "Read".to_string(),
            input_schema: schema(),
        };
        assert!(verify_definitions(&[good.clone()], &["read"]).is_ok());
        assert!(verify_definitions(&[good.clone()], &["read", "bash"])
            .unwrap_err()
            .contains("bash"));
        assert!(verify_definitions(&[good.clone(), good.clone()], &[]).is_err());

        let mut broken = good;
        broken.input_schema = broken.input_schema.with_required(&["missing"]);
        assert!(verify_definitions(&[broken], &[]).unwrap_err().contains("missing"));
    }
}

use super::InputParser;
use crate::endpoint::{ApiEndpoint, EndpointRequest, EndpointResponse, Header, HttpMethod};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use openapiv3::{
    OpenAPI, Operation, ReferenceOr, Response, Schema, SchemaKind, StatusCode, StringFormat, Type,
    VariantOrUnknownOrEmpty,
};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Imports an OpenAPI 3.0 specification as mock endpoints, synthesizing an
/// example body for every operation from its response (and request) schemas.
pub struct OpenApiParser;

impl InputParser for OpenApiParser {
    fn format_name(&self) -> &str {
        "openapi"
    }

    fn supported_extensions(&self) -> Vec<&str> {
        vec!["yaml", "yml", "json"]
    }

    fn parse(&self, source: &Path) -> Result<Vec<ApiEndpoint>> {
        self.validate(source)?;

        let content = fs::read_to_string(source)
            .with_context(|| format!("Failed to read OpenAPI spec: {:?}", source))?;

        let openapi: OpenAPI = if source.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse OpenAPI spec: {:?}", source))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse OpenAPI spec: {:?}", source))?
        };

        let empty_schemas = IndexMap::new();
        let schemas = openapi
            .components
            .as_ref()
            .map(|components| &components.schemas)
            .unwrap_or(&empty_schemas);

        let mut endpoints = Vec::new();
        let mut counter = 0usize;

        for (path, path_item) in &openapi.paths.paths {
            let ReferenceOr::Item(item) = path_item else {
                continue;
            };

            let operations: [(HttpMethod, &Option<Operation>); 5] = [
                (HttpMethod::Get, &item.get),
                (HttpMethod::Post, &item.post),
                (HttpMethod::Put, &item.put),
                (HttpMethod::Delete, &item.delete),
                (HttpMethod::Patch, &item.patch),
            ];

            for (method, operation) in operations {
                let Some(operation) = operation else {
                    continue;
                };
                counter += 1;
                endpoints.push(convert_operation(
                    path, method, operation, schemas, counter,
                ));
            }
        }

        Ok(endpoints)
    }
}

fn convert_operation(
    path: &str,
    method: HttpMethod,
    operation: &Operation,
    schemas: &IndexMap<String, ReferenceOr<Schema>>,
    counter: usize,
) -> ApiEndpoint {
    let description = operation
        .summary
        .clone()
        .or_else(|| operation.description.clone())
        .or_else(|| operation.operation_id.clone())
        .unwrap_or_default();

    let (status, response) = pick_response(operation);
    let response_body = response
        .and_then(|response| response.content.get("application/json"))
        .and_then(|media_type| media_type.schema.as_ref())
        .map(|schema| example_from_ref(schema, schemas, 0, &mut HashSet::new()))
        .unwrap_or_else(|| json!({"message": "Success"}));

    let request = operation.request_body.as_ref().and_then(|body| match body {
        ReferenceOr::Item(body) => body
            .content
            .get("application/json")
            .and_then(|media_type| media_type.schema.as_ref())
            .map(|schema| EndpointRequest {
                body: pretty(&example_from_ref(schema, schemas, 0, &mut HashSet::new())),
            }),
        ReferenceOr::Reference { .. } => None,
    });

    ApiEndpoint {
        id: format!("openapi-{}", counter),
        path: convert_path(path),
        method,
        description,
        headers: vec![Header {
            key: "Content-Type".to_string(),
            value: "application/json".to_string(),
        }],
        response: EndpointResponse {
            status,
            body: pretty(&response_body),
            content_type: "application/json".to_string(),
        },
        request,
    }
}

/// Prefers a 200 or 201 response, then the first listed, then the default.
fn pick_response(operation: &Operation) -> (u16, Option<&Response>) {
    for code in [200u16, 201] {
        if let Some(ReferenceOr::Item(response)) =
            operation.responses.responses.get(&StatusCode::Code(code))
        {
            return (code, Some(response));
        }
    }
    if let Some((status_code, ReferenceOr::Item(response))) =
        operation.responses.responses.iter().next()
    {
        let status = match status_code {
            StatusCode::Code(code) => *code,
            StatusCode::Range(_) => 200,
        };
        return (status, Some(response));
    }
    if let Some(ReferenceOr::Item(response)) = &operation.responses.default {
        return (200, Some(response));
    }
    (200, None)
}

/// Rewrites `{param}` segments as `:param`.
fn convert_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        match rest[start..].find('}') {
            Some(end) => {
                out.push(':');
                out.push_str(&rest[start + 1..start + end]);
                rest = &rest[start + end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn example_from_ref(
    schema_ref: &ReferenceOr<Schema>,
    schemas: &IndexMap<String, ReferenceOr<Schema>>,
    depth: usize,
    seen: &mut HashSet<String>,
) -> Value {
    match schema_ref {
        ReferenceOr::Reference { reference } => {
            resolve_reference(reference, schemas, depth, seen)
        }
        ReferenceOr::Item(schema) => example_from_schema(schema, schemas, depth, seen),
    }
}

fn example_from_boxed_ref(
    schema_ref: &ReferenceOr<Box<Schema>>,
    schemas: &IndexMap<String, ReferenceOr<Schema>>,
    depth: usize,
    seen: &mut HashSet<String>,
) -> Value {
    match schema_ref {
        ReferenceOr::Reference { reference } => {
            resolve_reference(reference, schemas, depth, seen)
        }
        ReferenceOr::Item(schema) => example_from_schema(schema, schemas, depth, seen),
    }
}

fn resolve_reference(
    reference: &str,
    schemas: &IndexMap<String, ReferenceOr<Schema>>,
    depth: usize,
    seen: &mut HashSet<String>,
) -> Value {
    let Some(name) = reference.split('/').next_back() else {
        return Value::Null;
    };
    // A reference seen twice is treated as circular and cut off.
    if !seen.insert(name.to_string()) {
        return json!({});
    }
    match schemas.get(name) {
        Some(schema_ref) => example_from_ref(schema_ref, schemas, depth, seen),
        None => Value::Null,
    }
}

fn example_from_schema(
    schema: &Schema,
    schemas: &IndexMap<String, ReferenceOr<Schema>>,
    depth: usize,
    seen: &mut HashSet<String>,
) -> Value {
    if depth > 3 {
        return Value::Null;
    }

    let example = schema
        .schema_data
        .example
        .clone()
        .or_else(|| schema.schema_data.default.clone());

    match &schema.schema_kind {
        SchemaKind::Type(Type::Object(object_type)) => {
            let mut out = serde_json::Map::new();
            for (key, property) in &object_type.properties {
                out.insert(
                    key.clone(),
                    example_from_boxed_ref(property, schemas, depth + 1, seen),
                );
            }
            Value::Object(out)
        }
        SchemaKind::Type(Type::Array(array_type)) => {
            if depth > 2 {
                return json!([]);
            }
            match &array_type.items {
                Some(items) => json!([example_from_boxed_ref(items, schemas, depth + 1, seen)]),
                None => json!([]),
            }
        }
        SchemaKind::Type(Type::String(string_type)) => {
            match &string_type.format {
                VariantOrUnknownOrEmpty::Item(StringFormat::DateTime) => {
                    return json!("2024-01-01T00:00:00Z");
                }
                VariantOrUnknownOrEmpty::Item(StringFormat::Date) => {
                    return json!("2024-01-01");
                }
                VariantOrUnknownOrEmpty::Unknown(format) if format == "email" => {
                    return json!("user@example.com");
                }
                VariantOrUnknownOrEmpty::Unknown(format) if format == "uuid" => {
                    return json!("00000000-0000-0000-0000-000000000000");
                }
                _ => {}
            }
            if let Some(value) = string_type.enumeration.iter().flatten().next() {
                return json!(value);
            }
            example.unwrap_or_else(|| json!("string"))
        }
        SchemaKind::Type(Type::Number(_)) | SchemaKind::Type(Type::Integer(_)) => {
            example.unwrap_or_else(|| json!(0))
        }
        SchemaKind::Type(Type::Boolean(_)) => example.unwrap_or_else(|| json!(true)),
        _ => example.unwrap_or(Value::Null),
    }
}

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::endpoint::{ApiEndpoint, HttpMethod};
use crate::generators::to_pascal_case;
use crate::schema::Schema;

/// Which body of an endpoint an extracted object came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectRole {
    Request,
    Response,
}

impl ObjectRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectRole::Request => "request",
            ObjectRole::Response => "response",
        }
    }

    fn name_suffix(&self) -> &'static str {
        match self {
            ObjectRole::Request => "Request",
            ObjectRole::Response => "Response",
        }
    }
}

/// A named, independently generatable object extracted from an endpoint body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDefinition {
    /// Stable within one extraction run; embeds the structural fingerprint and
    /// a per-run disambiguation counter.
    pub id: String,
    pub name: String,
    /// Always object-kind; non-object roots are never hoisted.
    pub schema: Schema,
    pub source: ObjectSource,
    /// Ids of other definitions referenced by nested object or
    /// array-of-object properties. No duplicates.
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSource {
    pub endpoint_id: String,
    pub path: String,
    pub method: HttpMethod,
    pub role: ObjectRole,
}

/// Extracts object definitions from the requested bodies of each endpoint.
///
/// A body that fails to parse as JSON is skipped with a warning; the remaining
/// endpoints are still processed. Structurally identical schemas from the same
/// endpoint and role collapse into one definition; identical shapes from
/// different endpoints stay separate.
pub fn extract_objects(endpoints: &[ApiEndpoint], roles: &[ObjectRole]) -> Vec<ObjectDefinition> {
    let mut ctx = ExtractionContext::default();

    for endpoint in endpoints {
        if roles.contains(&ObjectRole::Response) {
            ctx.extract_body(endpoint, ObjectRole::Response, &endpoint.response.body);
        }
        if roles.contains(&ObjectRole::Request) {
            if let Some(request) = &endpoint.request {
                ctx.extract_body(endpoint, ObjectRole::Request, &request.body);
            }
        }
    }

    ctx.objects.into_values().collect()
}

/// Dedup table and id counter for one extraction run. Created fresh per call,
/// never shared, so repeated or concurrent extractions cannot leak ids.
#[derive(Default)]
struct ExtractionContext {
    seen: HashMap<(String, ObjectRole, u64), String>,
    objects: IndexMap<String, ObjectDefinition>,
    counter: u64,
}

impl ExtractionContext {
    fn extract_body(&mut self, endpoint: &ApiEndpoint, role: ObjectRole, body: &str) {
        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    path = %endpoint.path,
                    role = role.as_str(),
                    %err,
                    "skipping body that is not valid JSON"
                );
                return;
            }
        };

        let schema = Schema::infer(&value);
        if !schema.is_object() {
            // Bare primitive or array roots do not become definitions.
            return;
        }

        let name = root_name(&endpoint.path, role);
        self.process(schema, name, endpoint, role);
    }

    fn process(
        &mut self,
        schema: Schema,
        name: String,
        endpoint: &ApiEndpoint,
        role: ObjectRole,
    ) -> String {
        let fingerprint = schema.fingerprint();
        let key = (endpoint.id.clone(), role, fingerprint);
        if let Some(id) = self.seen.get(&key) {
            return id.clone();
        }

        let id = format!(
            "{}_{}_{:016x}_{}",
            endpoint.id,
            role.as_str(),
            fingerprint,
            self.counter
        );
        self.counter += 1;
        self.seen.insert(key, id.clone());

        let mut dependencies: Vec<String> = Vec::new();
        if let Schema::Object { properties, .. } = &schema {
            for (property, prop_schema) in properties {
                let nested = match prop_schema {
                    Schema::Object { .. } => Some(prop_schema.clone()),
                    Schema::Array { items } if items.is_object() => Some((**items).clone()),
                    _ => None,
                };
                if let Some(nested_schema) = nested {
                    let nested_name = nested_object_name(property, role);
                    let dep_id = self.process(nested_schema, nested_name, endpoint, role);
                    if !dependencies.contains(&dep_id) {
                        dependencies.push(dep_id);
                    }
                }
            }
        }

        self.objects.insert(
            id.clone(),
            ObjectDefinition {
                id: id.clone(),
                name,
                schema,
                source: ObjectSource {
                    endpoint_id: endpoint.id.clone(),
                    path: endpoint.path.clone(),
                    method: endpoint.method,
                    role,
                },
                dependencies,
            },
        );

        id
    }
}

fn root_name(path: &str, role: ObjectRole) -> String {
    let last_segment = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or("root");
    format!("{}{}", to_pascal_case(last_segment), role.name_suffix())
}

fn nested_object_name(property: &str, role: ObjectRole) -> String {
    format!(
        "{}{}",
        to_pascal_case(&singularize(property)),
        role.name_suffix()
    )
}

/// Small English plural heuristic so a property like `addresses` names an
/// `Address...` object. Unrecognized words pass through unchanged.
fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.ends_with("ies") && word.len() > 3 {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if ["ses", "xes", "zes", "ches", "shes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return word[..word.len() - 2].to_string();
    }
    if lower.ends_with('s') && !lower.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

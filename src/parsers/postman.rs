use super::InputParser;
use crate::endpoint::{ApiEndpoint, EndpointRequest, EndpointResponse, Header, HttpMethod};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Imports a Postman v2.1 collection as mock endpoints.
pub struct PostmanParser;

#[derive(Debug, Deserialize)]
struct PostmanCollection {
    item: Vec<PostmanItem>,
}

#[derive(Debug, Deserialize)]
struct PostmanItem {
    #[serde(default)]
    name: String,
    #[serde(default)]
    request: Option<PostmanRequest>,
    #[serde(default)]
    response: Vec<PostmanResponse>,
    /// Folders nest items arbitrarily deep.
    #[serde(default)]
    item: Vec<PostmanItem>,
}

#[derive(Debug, Deserialize)]
struct PostmanRequest {
    method: String,
    #[serde(default)]
    header: Vec<PostmanHeader>,
    url: PostmanUrl,
    #[serde(default)]
    body: Option<PostmanBody>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PostmanUrl {
    Raw(String),
    Detailed {
        #[serde(default)]
        path: Option<Vec<String>>,
        #[serde(default)]
        raw: String,
    },
}

#[derive(Debug, Deserialize)]
struct PostmanHeader {
    key: String,
    value: String,
    #[serde(default)]
    disabled: bool,
}

#[derive(Debug, Deserialize)]
struct PostmanBody {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    raw: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostmanResponse {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    header: Option<Vec<PostmanHeader>>,
}

impl InputParser for PostmanParser {
    fn format_name(&self) -> &str {
        "postman"
    }

    fn supported_extensions(&self) -> Vec<&str> {
        vec!["json"]
    }

    fn parse(&self, source: &Path) -> Result<Vec<ApiEndpoint>> {
        self.validate(source)?;

        let content = fs::read_to_string(source)
            .with_context(|| format!("Failed to read Postman collection: {:?}", source))?;
        let collection: PostmanCollection = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse Postman collection: {:?}", source))?;

        let mut endpoints = Vec::new();
        let mut counter = 0usize;
        for item in &collection.item {
            convert_item(item, &mut endpoints, &mut counter);
        }
        Ok(endpoints)
    }
}

fn convert_item(item: &PostmanItem, endpoints: &mut Vec<ApiEndpoint>, counter: &mut usize) {
    if !item.item.is_empty() {
        for child in &item.item {
            convert_item(child, endpoints, counter);
        }
        return;
    }

    let Some(request) = &item.request else {
        return;
    };
    let Some(method) = HttpMethod::parse(&request.method) else {
        warn!(name = %item.name, method = %request.method, "skipping item with unsupported method");
        return;
    };

    let path = match &request.url {
        PostmanUrl::Raw(raw) => raw.clone(),
        PostmanUrl::Detailed { path, raw } => match path {
            Some(segments) => format!("/{}", segments.join("/")),
            None => raw.clone(),
        },
    };

    // First 2xx saved response wins; otherwise a default body is mocked.
    let success = item
        .response
        .iter()
        .find(|response| response.code.is_some_and(|code| (200..300).contains(&code)));
    let response = EndpointResponse {
        status: success.and_then(|r| r.code).unwrap_or(200),
        body: success
            .and_then(|r| r.body.clone())
            .unwrap_or_else(|| r#"{"message": "OK"}"#.to_string()),
        content_type: success
            .and_then(|r| r.header.as_ref())
            .and_then(|headers| {
                headers
                    .iter()
                    .find(|h| h.key.eq_ignore_ascii_case("content-type"))
                    .map(|h| h.value.clone())
            })
            .unwrap_or_else(|| "application/json".to_string()),
    };

    let headers = request
        .header
        .iter()
        .filter(|header| !header.disabled)
        .map(|header| Header {
            key: header.key.clone(),
            value: replace_variables(&header.value),
        })
        .collect();

    let request_body = request.body.as_ref().and_then(|body| {
        (body.mode.as_deref() == Some("raw"))
            .then(|| body.raw.clone())
            .flatten()
            .map(|raw| EndpointRequest { body: raw })
    });

    *counter += 1;
    endpoints.push(ApiEndpoint {
        id: format!("postman-{}", counter),
        path: replace_variables(&path),
        method,
        description: item.name.clone(),
        headers,
        response,
        request: request_body,
    });
}

/// Substitutes `{{variable}}` placeholders with deterministic defaults.
/// Id-like variables become `:param` path segments.
fn replace_variables(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("}}") {
            Some(end) => {
                let variable = &rest[start + 2..start + 2 + end];
                out.push_str(&default_value(variable));
                rest = &rest[start + 2 + end + 2..];
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

fn default_value(variable: &str) -> String {
    let normalized = variable.to_lowercase();
    if normalized.contains("id") {
        return format!(":{}", normalized);
    }

    const DEFAULTS: &[(&str, &str)] = &[
        ("apikey", "demo-api-key"),
        ("accesstoken", "demo-access-token"),
        ("authtoken", "demo-auth-token"),
        ("bearertoken", "demo-bearer-token"),
        ("env", "demo"),
        ("environment", "demo"),
        ("stage", "demo"),
        ("version", "v1"),
        ("apiversion", "v1"),
        ("baseurl", ""),
        ("apiurl", ""),
        ("host", ""),
        ("appctx", ""),
        ("appport", "8080"),
    ];
    for (key, default) in DEFAULTS {
        if normalized.contains(key) {
            return default.to_string();
        }
    }
    "demo-value".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r#"{
        "info": {
            "name": "demo",
            "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
        },
        "item": [
            {
                "name": "Users",
                "item": [
                    {
                        "name": "Get user",
                        "request": {
                            "method": "GET",
                            "header": [
                                {"key": "Authorization", "value": "Bearer {{authToken}}"},
                                {"key": "X-Debug", "value": "1", "disabled": true}
                            ],
                            "url": {
                                "raw": "https://api.example.com/users/{{userId}}",
                                "path": ["users", "{{userId}}"]
                            }
                        },
                        "response": [
                            {
                                "code": 200,
                                "body": "{\"id\": 1, \"name\": \"John Doe\"}",
                                "header": [{"key": "Content-Type", "value": "application/json"}]
                            }
                        ]
                    }
                ]
            }
        ]
    }"#;

    fn parse(name: &str, content: &str) -> Vec<ApiEndpoint> {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        let endpoints = PostmanParser.parse(&path).unwrap();
        fs::remove_file(path).ok();
        endpoints
    }

    #[test]
    fn walks_folders_and_converts_requests() {
        let endpoints = parse("dtoforge-postman.json", COLLECTION);
        assert_eq!(endpoints.len(), 1);

        let endpoint = &endpoints[0];
        assert_eq!(endpoint.path, "/users/:userid");
        assert_eq!(endpoint.method, HttpMethod::Get);
        assert_eq!(endpoint.description, "Get user");
        assert_eq!(endpoint.response.status, 200);
        assert!(endpoint.response.body.contains("John Doe"));

        // Disabled headers are dropped, variables substituted.
        assert_eq!(endpoint.headers.len(), 1);
        assert_eq!(endpoint.headers[0].value, "Bearer demo-auth-token");
    }

    #[test]
    fn items_without_saved_responses_get_a_default_body() {
        let collection = r#"{
            "info": {"name": "demo", "schema": "https://schema.getpostman.com/x"},
            "item": [
                {
                    "name": "Ping",
                    "request": {"method": "GET", "url": {"raw": "/ping"}}
                }
            ]
        }"#;
        let endpoints = parse("dtoforge-postman-default.json", collection);
        assert_eq!(endpoints[0].response.body, r#"{"message": "OK"}"#);
        assert_eq!(endpoints[0].response.status, 200);
    }

    #[test]
    fn variable_defaults_are_deterministic() {
        assert_eq!(replace_variables("{{userId}}"), ":userid");
        assert_eq!(replace_variables("{{apiKey}}"), "demo-api-key");
        assert_eq!(replace_variables("{{mystery}}"), "demo-value");
        assert_eq!(replace_variables("v{{version}}/x"), "vv1/x");
    }
}

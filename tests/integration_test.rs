/// Integration test for the full extraction-to-archive pipeline

use std::collections::HashSet;
use std::io::{Cursor, Read};

use dtoforge::endpoint::{ApiEndpoint, EndpointRequest, EndpointResponse, HttpMethod};
use dtoforge::parsers::ParserRegistry;
use dtoforge::{
    create_generator, extract_objects, generate_zip, order_by_dependency, Generator as _,
    GeneratorOptions, Language, ObjectRole,
};

fn user_endpoint() -> ApiEndpoint {
    ApiEndpoint {
        id: "1".to_string(),
        path: "/users".to_string(),
        method: HttpMethod::Get,
        description: "Get user details".to_string(),
        headers: vec![],
        response: EndpointResponse {
            status: 200,
            body: serde_json::json!({
                "id": 1,
                "name": "John Doe",
                "email": "john@example.com",
                "age": 30,
                "isActive": true,
                "addresses": [
                    {
                        "street": "123 Main St",
                        "city": "New York",
                        "country": "USA"
                    }
                ]
            })
            .to_string(),
            content_type: "application/json".to_string(),
        },
        request: Some(EndpointRequest {
            body: serde_json::json!({"name": "John Doe", "email": "john@example.com"}).to_string(),
        }),
    }
}

fn read_entries(bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        entries.push((file.name().to_string(), content));
    }
    entries
}

#[test]
fn extracts_and_generates_typescript_for_every_object() {
    let objects = extract_objects(&[user_endpoint()], &[ObjectRole::Response]);
    assert_eq!(objects.len(), 2);

    let root = objects.iter().find(|o| o.name == "UsersResponse").unwrap();
    let nested = objects.iter().find(|o| o.name == "AddressResponse").unwrap();
    assert_eq!(root.dependencies, vec![nested.id.clone()]);

    let generator = create_generator(Language::TypeScript, &GeneratorOptions::default());
    let code = generator.generate(&root.schema, &root.name).unwrap();
    assert!(code.contains("export interface UsersResponse"));
    assert!(code.contains("id: number;"));
    assert!(code.contains("name: string;"));
    assert!(code.contains("isActive: boolean;"));
}

#[test]
fn java_generation_uses_boxed_types_and_lists() {
    let objects = extract_objects(&[user_endpoint()], &[ObjectRole::Response]);
    let root = objects.iter().find(|o| o.name == "UsersResponse").unwrap();

    let generator = create_generator(Language::Java, &GeneratorOptions::default());
    let code = generator.generate(&root.schema, &root.name).unwrap();
    assert!(code.contains("public class UsersResponse"));
    assert!(code.contains("private Double id;"));
    assert!(code.contains("private String name;"));
    assert!(code.contains("private List<UsersResponse> addresses;"));
}

#[test]
fn archive_contains_dependencies_before_dependents() {
    let objects = extract_objects(
        &[user_endpoint()],
        &[ObjectRole::Request, ObjectRole::Response],
    );
    assert_eq!(objects.len(), 3);

    let selected: HashSet<String> = objects.iter().map(|o| o.id.clone()).collect();
    let bytes = generate_zip(
        &objects,
        &selected,
        Language::Kotlin,
        &GeneratorOptions::default(),
    )
    .unwrap();

    let entries = read_entries(&bytes);
    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&"UsersResponse.kt"));
    assert!(names.contains(&"AddressResponse.kt"));
    assert!(names.contains(&"UsersRequest.kt"));

    let address = names.iter().position(|n| *n == "AddressResponse.kt").unwrap();
    let root = names.iter().position(|n| *n == "UsersResponse.kt").unwrap();
    assert!(address < root);

    let (_, address_code) = entries
        .iter()
        .find(|(name, _)| name == "AddressResponse.kt")
        .unwrap();
    assert!(address_code.contains("data class AddressResponse("));
    assert!(address_code.contains("val street: String"));
}

#[test]
fn selection_subset_limits_the_archive() {
    let objects = extract_objects(&[user_endpoint()], &[ObjectRole::Response]);
    let nested = objects.iter().find(|o| o.name == "AddressResponse").unwrap();
    let selected: HashSet<String> = [nested.id.clone()].into();

    let bytes = generate_zip(
        &objects,
        &selected,
        Language::Python,
        &GeneratorOptions::default(),
    )
    .unwrap();

    let entries = read_entries(&bytes);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "AddressResponse.py");
    assert!(entries[0].1.contains("class AddressResponse(BaseModel):"));
}

#[test]
fn ordering_is_stable_for_every_generated_language() {
    let objects = extract_objects(&[user_endpoint()], &[ObjectRole::Response]);
    let ordered: Vec<&str> = order_by_dependency(&objects)
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(ordered, vec!["AddressResponse", "UsersResponse"]);

    let selected: HashSet<String> = objects.iter().map(|o| o.id.clone()).collect();
    for language in Language::ALL {
        let bytes = generate_zip(&objects, &selected, language, &GeneratorOptions::default())
            .expect("archive generation failed");
        assert_eq!(read_entries(&bytes).len(), 2, "{} archive", language);
    }
}

#[test]
fn collection_files_round_trip_through_the_registry() {
    let collection = serde_json::json!({
        "name": "demo",
        "description": "",
        "endpoints": [
            {
                "id": "ep-1",
                "path": "/orders",
                "method": "POST",
                "description": "",
                "headers": [],
                "response": {
                    "status": 201,
                    "body": "{\"orderId\": 7, \"items\": [{\"sku\": \"a-1\", \"qty\": 2}]}",
                    "contentType": "application/json"
                }
            }
        ]
    });

    let path = std::env::temp_dir().join("dtoforge-integration-collection.json");
    std::fs::write(&path, collection.to_string()).unwrap();

    let registry = ParserRegistry::new();
    let format = registry.detect_format(&path).unwrap();
    assert_eq!(format, "collection");

    let endpoints = registry.get(format).unwrap().parse(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(endpoints.len(), 1);

    let objects = extract_objects(&endpoints, &[ObjectRole::Response]);
    assert!(objects.iter().any(|o| o.name == "OrdersResponse"));
    assert!(objects.iter().any(|o| o.name == "ItemResponse"));

    let generator = create_generator(Language::Go, &GeneratorOptions::default());
    let item = objects.iter().find(|o| o.name == "ItemResponse").unwrap();
    let code = generator.generate(&item.schema, &item.name).unwrap();
    assert!(code.contains("type ItemResponse struct {"));
    assert!(code.contains("Sku string `json:\"sku\"`"));
    assert!(code.contains("Qty float64 `json:\"qty\"`"));
}

//! Multi-language DTO generation from observed JSON payloads.
//!
//! `dtoforge` infers structural schemas from the canned request/response
//! bodies of mock API endpoints, hoists every nested object into its own
//! named definition with dependency edges, and renders each definition as
//! idiomatic source code for eight target languages. Generated files can be
//! written individually or bundled into a dependency-ordered zip archive.
//!
//! # Architecture
//!
//! ```text
//! Input Formats            Core                    Output
//! ──────────────      ───────────────────      ──────────────────
//! collection JSON ─┐                        ┌─> TypeScript   ┌─> files
//! OpenAPI 3.0     ─┼─> endpoints ─> Schema ─┼─> Java, Dart   ┼─> zip archive
//! Postman v2.1    ─┘   extractor   objects  ├─> Go, Python   │   (dependency
//!                                           └─> C#, Swift,   ─┘    ordered)
//!                                               Kotlin
//! ```
//!
//! # Example
//!
//! ```
//! use dtoforge::{extract_objects, create_generator, Generator, Language, GeneratorOptions, ObjectRole};
//! use dtoforge::endpoint::{ApiEndpoint, EndpointResponse, HttpMethod};
//!
//! let endpoint = ApiEndpoint {
//!     id: "1".to_string(),
//!     path: "/users".to_string(),
//!     method: HttpMethod::Get,
//!     description: String::new(),
//!     headers: vec![],
//!     response: EndpointResponse {
//!         status: 200,
//!         body: r#"{"id": 1, "name": "John Doe"}"#.to_string(),
//!         content_type: "application/json".to_string(),
//!     },
//!     request: None,
//! };
//!
//! let objects = extract_objects(&[endpoint], &[ObjectRole::Response]);
//! assert_eq!(objects[0].name, "UsersResponse");
//!
//! let generator = create_generator(Language::TypeScript, &GeneratorOptions::default());
//! let code = generator.generate(&objects[0].schema, &objects[0].name).unwrap();
//! assert!(code.contains("export interface UsersResponse"));
//! ```

pub mod archive;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod extractor;
pub mod generators;
pub mod parsers;
pub mod schema;

// Re-export the core surface
pub use archive::{generate_zip, order_by_dependency};
pub use error::Error;
pub use extractor::{extract_objects, ObjectDefinition, ObjectRole, ObjectSource};
pub use generators::{
    create_generator, language_config, Generator, GeneratorOptions, Language, LanguageConfig,
    NamingConvention, ObjectType,
};
pub use schema::Schema;

use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Write};

use indexmap::IndexMap;
use tracing::warn;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::Error;
use crate::extractor::ObjectDefinition;
use crate::generators::{create_generator, Generator as _, GeneratorOptions, Language};

/// Orders definitions so every dependency precedes its dependents.
///
/// Depth-first with explicit three-state visitation. JSON-derived schemas
/// cannot produce cycles, but if a caller hands one in it is reported and
/// broken deterministically at the back edge rather than looping.
pub fn order_by_dependency(objects: &[ObjectDefinition]) -> Vec<&ObjectDefinition> {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        InProgress,
        Done,
    }

    let by_id: HashMap<&str, &ObjectDefinition> = objects
        .iter()
        .map(|object| (object.id.as_str(), object))
        .collect();

    let mut states: HashMap<&str, State> = HashMap::new();
    let mut ordered: Vec<&ObjectDefinition> = Vec::new();

    fn visit<'a>(
        object: &'a ObjectDefinition,
        by_id: &HashMap<&'a str, &'a ObjectDefinition>,
        states: &mut HashMap<&'a str, State>,
        ordered: &mut Vec<&'a ObjectDefinition>,
    ) {
        match states.get(object.id.as_str()) {
            Some(State::Done) => return,
            Some(State::InProgress) => {
                warn!(id = %object.id, "dependency cycle detected, breaking at back edge");
                return;
            }
            None => {}
        }
        states.insert(object.id.as_str(), State::InProgress);

        for dep_id in &object.dependencies {
            if let Some(dep) = by_id.get(dep_id.as_str()).copied() {
                visit(dep, by_id, states, ordered);
            }
        }

        states.insert(object.id.as_str(), State::Done);
        ordered.push(object);
    }

    for object in objects {
        visit(object, &by_id, &mut states, &mut ordered);
    }

    ordered
}

/// Generates the selected objects in dependency order and bundles them into a
/// single zip archive, one entry per object, named `{name}{extension}`.
///
/// Two selected objects that format to the same file name overwrite silently;
/// the archive keeps one entry with the later content. A generation failure
/// for any object aborts the whole archive.
pub fn generate_zip(
    objects: &[ObjectDefinition],
    selected_ids: &HashSet<String>,
    language: Language,
    options: &GeneratorOptions,
) -> Result<Vec<u8>, Error> {
    let generator = create_generator(language, options);
    let extension = language.file_extension();

    let mut files: IndexMap<String, String> = IndexMap::new();
    for object in order_by_dependency(objects) {
        if !selected_ids.contains(&object.id) {
            continue;
        }
        let code = generator.generate(&object.schema, &object.name)?;
        files.insert(format!("{}{}", object.name, extension), code);
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let entry_options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (file_name, code) in &files {
        writer
            .start_file(file_name.as_str(), entry_options)
            .map_err(|err| Error::generation(file_name, err.to_string()))?;
        writer
            .write_all(code.as_bytes())
            .map_err(|err| Error::generation(file_name, err.to_string()))?;
    }
    let cursor = writer
        .finish()
        .map_err(|err| Error::generation("archive", err.to_string()))?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::HttpMethod;
    use crate::extractor::{extract_objects, ObjectRole, ObjectSource};
    use crate::endpoint::{ApiEndpoint, EndpointResponse};
    use crate::schema::Schema;
    use std::io::Read;

    fn definition(id: &str, name: &str, deps: &[&str]) -> ObjectDefinition {
        ObjectDefinition {
            id: id.to_string(),
            name: name.to_string(),
            schema: Schema::infer(&serde_json::json!({"id": 1})),
            source: ObjectSource {
                endpoint_id: "1".to_string(),
                path: "/users".to_string(),
                method: HttpMethod::Get,
                role: ObjectRole::Response,
            },
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn entry_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn dependencies_precede_dependents() {
        let objects = vec![
            definition("a", "A", &["b"]),
            definition("b", "B", &["c"]),
            definition("c", "C", &[]),
        ];
        let ordered: Vec<&str> = order_by_dependency(&objects)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ordered, vec!["c", "b", "a"]);
    }

    #[test]
    fn cycles_are_broken_deterministically() {
        let objects = vec![definition("a", "A", &["b"]), definition("b", "B", &["a"])];
        let ordered = order_by_dependency(&objects);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].id, "b");
        assert_eq!(ordered[1].id, "a");
    }

    #[test]
    fn zip_contains_one_entry_per_selected_object() {
        let endpoints = vec![ApiEndpoint {
            id: "1".to_string(),
            path: "/users".to_string(),
            method: HttpMethod::Get,
            description: String::new(),
            headers: vec![],
            response: EndpointResponse {
                status: 200,
                body: r#"{"id":1,"addresses":[{"street":"123 Main St"}]}"#.to_string(),
                content_type: "application/json".to_string(),
            },
            request: None,
        }];
        let objects = extract_objects(&endpoints, &[ObjectRole::Response]);
        let selected: HashSet<String> = objects.iter().map(|o| o.id.clone()).collect();

        let bytes = generate_zip(
            &objects,
            &selected,
            Language::TypeScript,
            &GeneratorOptions::default(),
        )
        .unwrap();

        let names = entry_names(&bytes);
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"UsersResponse.ts".to_string()));
        assert!(names.contains(&"AddressResponse.ts".to_string()));

        // Dependency entry comes first.
        assert_eq!(names[0], "AddressResponse.ts");
    }

    #[test]
    fn unselected_objects_are_excluded() {
        let objects = vec![definition("a", "A", &[]), definition("b", "B", &[])];
        let selected: HashSet<String> = ["a".to_string()].into();
        let bytes = generate_zip(
            &objects,
            &selected,
            Language::Go,
            &GeneratorOptions::default(),
        )
        .unwrap();
        assert_eq!(entry_names(&bytes), vec!["A.go".to_string()]);
    }

    #[test]
    fn one_failing_object_aborts_the_whole_archive() {
        let mut broken = definition("a", "A", &[]);
        broken.schema = Schema::String;
        let objects = vec![broken, definition("b", "B", &[])];
        let selected: HashSet<String> = ["a".to_string(), "b".to_string()].into();

        let err = generate_zip(
            &objects,
            &selected,
            Language::Swift,
            &GeneratorOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::Error::Generation { .. }));
    }

    #[test]
    fn name_collisions_overwrite_silently() {
        let mut first = definition("a", "User", &[]);
        first.schema = Schema::infer(&serde_json::json!({"id": 1}));
        let mut second = definition("b", "User", &[]);
        second.schema = Schema::infer(&serde_json::json!({"name": "x"}));

        let objects = vec![first, second];
        let selected: HashSet<String> = ["a".to_string(), "b".to_string()].into();
        let bytes = generate_zip(
            &objects,
            &selected,
            Language::TypeScript,
            &GeneratorOptions::default(),
        )
        .unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 1);
        let mut content = String::new();
        archive
            .by_name("User.ts")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        // The later object's content wins.
        assert!(content.contains("name: string;"));
        assert!(!content.contains("id: number;"));
    }
}

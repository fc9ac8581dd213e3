use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dtoforge::config::{load_config, merge_with_cli_args, GenerationConfig};
use dtoforge::parsers::ParserRegistry;
use dtoforge::{
    create_generator, extract_objects, generate_zip, order_by_dependency, Generator as _,
    GeneratorOptions, Language, ObjectRole,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the endpoint source (collection JSON, OpenAPI spec or Postman collection)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Input format (collection, openapi, postman); auto-detected when omitted
    #[arg(short, long)]
    format: Option<String>,

    /// Target language; adds a generation on top of the config file
    #[arg(short, long)]
    language: Option<String>,

    /// Output directory for generated code
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Bundle generated files into a zip archive per language
    #[arg(long)]
    archive: bool,

    /// Also extract objects from request bodies
    #[arg(long)]
    requests: bool,

    /// Path to config file (overrides default location)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let config = load_config(args.config.as_deref())?;
    let mut merged_config = merge_with_cli_args(config, args.source, args.output);

    if let Some(format) = args.format {
        if let Some(input) = &mut merged_config.input {
            input.format = Some(format);
        }
    }

    // A language on the command line becomes an extra generation target
    if let Some(language) = &args.language {
        let mut roles = vec![ObjectRole::Response];
        if args.requests {
            roles.push(ObjectRole::Request);
        }
        merged_config.generations.push(GenerationConfig {
            language: language.clone(),
            enabled: true,
            archive: args.archive,
            roles,
            options: GeneratorOptions::default(),
        });
    }

    // Validate we have input
    let input_config = merged_config.input.ok_or_else(|| {
        anyhow::anyhow!("No input source specified. Use --source or configure input in config file")
    })?;

    println!("📖 Reading input from: {:?}", input_config.source);

    // Create parser registry
    let parser_registry = ParserRegistry::new();

    // Determine input format (explicit or auto-detect)
    let format = match input_config.format.clone() {
        Some(format) => format,
        None => parser_registry
            .detect_format(&input_config.source)?
            .to_string(),
    };

    println!("🔍 Detected format: {}", format);

    // Get parser
    let parser = parser_registry
        .get(&format)
        .ok_or_else(|| anyhow::anyhow!("Unknown input format: {}", format))?;

    let endpoints = parser
        .parse(&input_config.source)
        .with_context(|| format!("Failed to parse {} input", format))?;

    println!("✅ Parsed {} endpoint(s)", endpoints.len());

    // Determine output directory
    let output_dir = merged_config
        .output
        .unwrap_or_else(|| PathBuf::from("generated"));
    fs::create_dir_all(&output_dir)?;

    // Process each generation configuration
    let mut generated_count = 0;
    for gen_config in &merged_config.generations {
        if !gen_config.enabled {
            println!("⏭️  Skipping disabled generation: {}", gen_config.language);
            continue;
        }

        let language = Language::from_str(&gen_config.language)?;
        println!("🔧 Generating {} objects...", language);

        let objects = extract_objects(&endpoints, &gen_config.roles);
        if objects.is_empty() {
            println!("⚠️  No objects extracted for {}", language);
            continue;
        }
        println!("📦 Extracted {} object(s)", objects.len());

        if gen_config.archive {
            let selected: HashSet<String> = objects.iter().map(|o| o.id.clone()).collect();
            let bytes = generate_zip(&objects, &selected, language, &gen_config.options)
                .with_context(|| format!("Failed to generate {} archive", language))?;

            let archive_path = output_dir.join(format!("{}-dtos.zip", language));
            fs::write(&archive_path, bytes)
                .with_context(|| format!("Failed to write archive: {:?}", archive_path))?;

            println!("✅ Generated: {:?}", archive_path);
            generated_count += 1;
        } else {
            let generator = create_generator(language, &gen_config.options);
            for object in order_by_dependency(&objects) {
                let code = generator
                    .generate(&object.schema, &object.name)
                    .with_context(|| format!("Failed to generate {}", object.name))?;

                let output_path =
                    output_dir.join(format!("{}{}", object.name, language.file_extension()));
                fs::write(&output_path, code)
                    .with_context(|| format!("Failed to write output file: {:?}", output_path))?;

                println!("✅ Generated: {:?}", output_path);
                generated_count += 1;
            }
        }
    }

    if generated_count == 0 {
        println!("⚠️  Nothing was generated. Check your configuration.");
    } else {
        println!("🎉 Successfully generated {} file(s)!", generated_count);
    }

    Ok(())
}

//! docxml CLI - render WordprocessingML fragments
//!
//! Commands: schemas, render, paragraph
//! Outputs JSON to stdout
//! Returns 1 on bad input, 2 on schema violations

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use docxml_core::{
    markup_digest, registry_fingerprint,
    template::{self, Paragraph, Style},
    DocxError, Element, ElementSpec, SchemaRegistry, ENGINE_VERSION,
};

#[derive(Parser)]
#[command(name = "docxml-cli")]
#[command(about = "docxml CLI - Schema-checked WordprocessingML renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory of extra schema files layered over the built-in catalogue
    #[arg(short, long)]
    schemas_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered schemas
    Schemas,

    /// Render an element tree
    Render {
        /// JSON payload (ElementSpec)
        #[arg(short, long)]
        payload: String,
    },

    /// Render a paragraph holding one text run
    Paragraph {
        #[arg(short, long)]
        text: String,

        /// JSON payload (Style)
        #[arg(long)]
        style: Option<String>,

        /// JSON payload (Paragraph options)
        #[arg(long)]
        options: Option<String>,

        /// Keep leading and trailing whitespace
        #[arg(long)]
        preserve: bool,
    },
}

fn main() -> ExitCode {
    // WARN by default, respecting RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut registry = SchemaRegistry::builtin();
    if let Some(dir) = &cli.schemas_dir {
        if let Err(e) = registry.load_from_dir(dir) {
            emit(&json!({"success": false, "error": format!("Failed to load schemas: {e}")}));
            return ExitCode::FAILURE;
        }
    }

    let result = match cli.command {
        Commands::Schemas => list_schemas(&registry),
        Commands::Render { payload } => render(&registry, &payload),
        Commands::Paragraph {
            text,
            style,
            options,
            preserve,
        } => paragraph(&text, style.as_deref(), options.as_deref(), preserve),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            emit(&json!({"success": false, "error": e.to_string()}));
            match e {
                DocxError::Schema(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn list_schemas(registry: &SchemaRegistry) -> Result<(), DocxError> {
    let schemas: Vec<_> = registry
        .list()
        .into_iter()
        .map(|(name, descriptor)| {
            json!({
                "name": name,
                "tagName": descriptor.tag_name,
                "validAttributes": descriptor.valid_attributes,
                "validChildren": descriptor.valid_children,
            })
        })
        .collect();

    emit(&json!({
        "engineVersion": ENGINE_VERSION,
        "fingerprint": registry_fingerprint(registry)?,
        "schemas": schemas,
    }));
    Ok(())
}

fn render(registry: &SchemaRegistry, payload: &str) -> Result<(), DocxError> {
    let spec: ElementSpec = serde_json::from_str(payload)?;
    let element = spec.build(registry)?;
    emit_markup(&element);
    Ok(())
}

fn paragraph(
    text: &str,
    style: Option<&str>,
    options: Option<&str>,
    preserve: bool,
) -> Result<(), DocxError> {
    let style: Option<Style> = style.map(serde_json::from_str).transpose()?;
    let options: Paragraph = options
        .map(serde_json::from_str)
        .transpose()?
        .unwrap_or_default();

    let mut element = template::paragraph(&options)?;
    element.append(template::text(text, style.as_ref(), preserve)?)?;
    emit_markup(&element);
    Ok(())
}

fn emit_markup(element: &Element) {
    emit(&json!({
        "success": true,
        "markup": element.to_string(),
        "sha256": markup_digest(element),
    }));
}

fn emit(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(out) => println!("{out}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

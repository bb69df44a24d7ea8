//! Load → compile → render → write, shared by the subcommands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::ValueEnum;
use tracing::{info, warn};

use pocketgen_core::{
    CompileOptions, CompiledSchema, SchemaDocument, bundle_json_schema, compile_with_options,
    document_json_schema,
};
use pocketgen_introspect::{Adapter, DocumentAdapter, IntrospectOptions, SqliteCatalogAdapter};
use pocketgen_render::TemplateRenderer;

use crate::error::{CliError, CliResult};
use crate::output::write_text_atomic;

const SQLITE_EXTENSIONS: &[&str] = &["db", "sqlite", "sqlite3"];

/// Where the raw schema comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Pick by file extension.
    #[default]
    Auto,
    /// YAML or JSON schema document.
    Document,
    /// Record store SQLite data file.
    Sqlite,
}

impl SourceKind {
    /// Resolve `Auto` against the input path.
    pub fn resolve(self, input: &Path) -> Self {
        match self {
            Self::Auto => {
                let is_sqlite = input
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| {
                        SQLITE_EXTENSIONS
                            .iter()
                            .any(|known| ext.eq_ignore_ascii_case(known))
                    })
                    .unwrap_or(false);
                if is_sqlite {
                    Self::Sqlite
                } else {
                    Self::Document
                }
            }
            other => other,
        }
    }
}

/// Read the raw schema from `input`.
pub async fn load_schema(
    input: &Path,
    source: SourceKind,
    opts: &IntrospectOptions,
) -> CliResult<SchemaDocument> {
    let adapter: Box<dyn Adapter + Send + Sync> = match source.resolve(input) {
        SourceKind::Sqlite => Box::new(SqliteCatalogAdapter::connect(input).await?),
        _ => Box::new(DocumentAdapter::new(input)?),
    };

    info!(
        event = "source_selected",
        source = adapter.source(),
        input = %input.display()
    );

    Ok(adapter.load(opts).await?)
}

#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source: SourceKind,
    pub template: Option<PathBuf>,
    pub compile: CompileOptions,
    pub introspect: IntrospectOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub collections: usize,
    pub bytes: usize,
}

/// Generate the client declarations. The output file is only touched once
/// every earlier step has succeeded.
pub async fn generate(request: &GenerateRequest) -> CliResult<GenerateReport> {
    let timer = Instant::now();

    let document = load_schema(&request.input, request.source, &request.introspect).await?;
    let compiled = compile_schema(&document, &request.compile)?;

    let renderer = match &request.template {
        Some(path) => {
            let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            TemplateRenderer::with_template(&source)?
        }
        None => TemplateRenderer::new()?,
    };
    let text = renderer.render(&compiled)?;

    write_text_atomic(&request.output, &text)?;

    info!(
        event = "output_written",
        path = %request.output.display(),
        collections = compiled.collections.len(),
        bytes = text.len(),
        duration_ms = timer.elapsed().as_millis() as u64
    );

    Ok(GenerateReport {
        collections: compiled.collections.len(),
        bytes: text.len(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub collections: usize,
    pub fields: usize,
    pub relations: usize,
}

/// Load and compile without writing anything.
pub async fn check(
    input: &Path,
    source: SourceKind,
    compile: &CompileOptions,
    introspect: &IntrospectOptions,
) -> CliResult<CheckReport> {
    let compiled = load_and_compile(input, source, compile, introspect).await?;

    let report = CheckReport {
        collections: compiled.collections.len(),
        fields: compiled
            .collections
            .iter()
            .map(|bundle| bundle.read.len())
            .sum(),
        relations: compiled
            .collections
            .iter()
            .map(|bundle| bundle.expand.len())
            .sum(),
    };

    info!(
        event = "schema_checked",
        collections = report.collections,
        fields = report.fields,
        relations = report.relations
    );

    Ok(report)
}

/// Write the compiled bundle as pretty JSON.
pub async fn bundle(
    input: &Path,
    output: &Path,
    source: SourceKind,
    compile: &CompileOptions,
    introspect: &IntrospectOptions,
) -> CliResult<CompiledSchema> {
    let compiled = load_and_compile(input, source, compile, introspect).await?;
    let json = compiled.to_json_pretty()?;
    write_text_atomic(output, &json)?;

    info!(event = "bundle_written", path = %output.display());
    Ok(compiled)
}

/// Write the JSON Schema of the bundle, or of the input document.
pub fn write_json_schema(output: &Path, document: bool) -> CliResult<()> {
    let schema = if document {
        document_json_schema()
    } else {
        bundle_json_schema()
    };
    let json = serde_json::to_string_pretty(&schema)?;
    write_text_atomic(output, &json)?;

    info!(event = "json_schema_written", path = %output.display(), document);
    Ok(())
}

async fn load_and_compile(
    input: &Path,
    source: SourceKind,
    compile: &CompileOptions,
    introspect: &IntrospectOptions,
) -> CliResult<CompiledSchema> {
    let document = load_schema(input, source, introspect).await?;
    compile_schema(&document, compile)
}

fn compile_schema(
    document: &SchemaDocument,
    options: &CompileOptions,
) -> CliResult<CompiledSchema> {
    compile_with_options(document, options).map_err(|err| {
        warn!(
            event = "compile_failed",
            collection = err.collection().unwrap_or("-"),
            kind = ?err.kind(),
            error = %err
        );
        CliError::from(err)
    })
}

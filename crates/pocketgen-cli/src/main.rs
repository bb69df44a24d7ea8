use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use pocketgen_cli::{
    CliError, GenerateRequest, Settings, SourceKind, bundle, check, generate, init_logging,
    load_settings, write_json_schema,
};
use pocketgen_core::{CompileOptions, EmptyListPolicy};
use pocketgen_introspect::IntrospectOptions;

#[derive(Parser, Debug)]
#[command(name = "pocketgen", version, about = "Typed client generator for record store schemas")]
struct Cli {
    /// Config file (defaults to ./pocketgen.toml when present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render TypeScript client declarations.
    Generate(GenerateArgs),
    /// Load and compile the schema without writing anything.
    Check(CheckArgs),
    /// Write the compiled bundle as JSON.
    Bundle(BundleArgs),
    /// Write the JSON Schema of the bundle or of the input document.
    JsonSchema(JsonSchemaArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Schema document (.yaml/.yml/.json) or record store data file (.db).
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    #[arg(long, value_enum, default_value_t = SourceKind::Auto)]
    source: SourceKind,
    /// How empty multi-relations decode.
    #[arg(long, value_enum)]
    empty_list: Option<EmptyListArg>,
    /// Keep collections the store marks as system (`=false` overrides the config).
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    include_system_collections: Option<bool>,
    /// Keep the store's built-in id field (`=false` overrides the config).
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    include_id_field: Option<bool>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output file for the generated declarations.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
    /// Liquid template replacing the built-in one.
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Debug)]
struct BundleArgs {
    #[command(flatten)]
    source: SourceArgs,
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct JsonSchemaArgs {
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
    /// Describe the input document instead of the compiled bundle.
    #[arg(long, default_value_t = false)]
    document: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmptyListArg {
    Null,
    EmptyList,
}

impl From<EmptyListArg> for EmptyListPolicy {
    fn from(arg: EmptyListArg) -> Self {
        match arg {
            EmptyListArg::Null => EmptyListPolicy::Null,
            EmptyListArg::EmptyList => EmptyListPolicy::EmptyList,
        }
    }
}

impl SourceArgs {
    fn compile_options(&self, settings: &Settings) -> CompileOptions {
        let mut options = settings.generate.compile_options();
        if let Some(policy) = self.empty_list {
            options.empty_list = policy.into();
        }
        options
    }

    fn introspect_options(&self, settings: &Settings) -> IntrospectOptions {
        settings
            .introspect
            .options_with(self.include_system_collections, self.include_id_field)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings(cli.config.as_deref())?;
    init_logging(&settings.logging)?;

    tracing::info!(event = "run_started", version = env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Generate(args) => {
            let request = GenerateRequest {
                input: args.source.input.clone(),
                output: args.output,
                source: args.source.source,
                template: args.template.or_else(|| settings.generate.template.clone()),
                compile: args.source.compile_options(&settings),
                introspect: args.source.introspect_options(&settings),
            };
            let report = generate(&request).await?;
            println!(
                "wrote {} ({} collections)",
                request.output.display(),
                report.collections
            );
        }
        Command::Check(args) => {
            let report = check(
                &args.source.input,
                args.source.source,
                &args.source.compile_options(&settings),
                &args.source.introspect_options(&settings),
            )
            .await?;
            println!(
                "ok: {} collections, {} fields, {} relations",
                report.collections, report.fields, report.relations
            );
        }
        Command::Bundle(args) => {
            let compiled = bundle(
                &args.source.input,
                &args.output,
                args.source.source,
                &args.source.compile_options(&settings),
                &args.source.introspect_options(&settings),
            )
            .await?;
            println!(
                "wrote {} ({} collections)",
                args.output.display(),
                compiled.collections.len()
            );
        }
        Command::JsonSchema(args) => {
            write_json_schema(&args.output, args.document)?;
            println!("wrote {}", args.output.display());
        }
    }

    tracing::info!(event = "run_finished", status = "success");
    Ok(())
}

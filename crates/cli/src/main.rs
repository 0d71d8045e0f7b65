use anyhow::Context;
use c2f_core::config::{full_urls_from_env_value, id_strategy_from_env_value};
use c2f_core::constants::{FULL_URLS_ENV, ID_STRATEGY_ENV};
use c2f_core::dispatch::primary_resource_type;
use c2f_core::TransformConfig;
use c2f_ids::IdStrategy;
use ccda::ClinicalDocument;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cda2fhir")]
#[command(about = "Convert C-CDA documents into FHIR document bundles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a document into a FHIR bundle
    Transform(TransformArgs),
    /// List the sections of a document and whether they are mapped
    Sections {
        /// Document to inspect (`.json`, otherwise YAML)
        input: PathBuf,
    },
}

#[derive(Args)]
struct TransformArgs {
    /// Document to transform (`.json`, otherwise YAML)
    input: PathBuf,
    /// Write the bundle here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Identifier strategy: `uuid` or `counter` (default: $C2F_ID_STRATEGY, then uuid)
    #[arg(long, value_parser = IdStrategy::parse)]
    ids: Option<IdStrategy>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Give every entry a `fullUrl` (default: $C2F_FULL_URLS)
    #[arg(long)]
    full_urls: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

/// Entry point for the `cda2fhir` binary.
///
/// # Environment Variables
/// - `C2F_ID_STRATEGY`: identifier strategy when `--ids` is not given (default: "uuid")
/// - `C2F_FULL_URLS`: emit `fullUrl` on entries when `--full-urls` is not given
/// - `RUST_LOG`: log filter; logs go to stderr
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cda2fhir=info".parse()?)
                .add_directive("c2f_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();

    match cli.command {
        Some(Commands::Transform(args)) => {
            let config = resolve_config(&args, |key| std::env::var(key).ok())?;
            transform(&args, config, &mut stdout.lock())?;
        }
        Some(Commands::Sections { input }) => {
            let document = read_document(&input)?;
            list_sections(&document, &mut stdout.lock())?;
        }
        None => {
            println!("Use 'cda2fhir --help' for commands");
        }
    }

    Ok(())
}

/// Command-line flags win; the environment fills in whatever was not given.
fn resolve_config(
    args: &TransformArgs,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<TransformConfig> {
    let id_strategy = match args.ids {
        Some(strategy) => strategy,
        None => id_strategy_from_env_value(env(ID_STRATEGY_ENV))
            .with_context(|| format!("reading {ID_STRATEGY_ENV}"))?,
    };
    let full_urls = args.full_urls
        || full_urls_from_env_value(env(FULL_URLS_ENV))
            .with_context(|| format!("reading {FULL_URLS_ENV}"))?;

    Ok(TransformConfig::new(id_strategy, full_urls))
}

fn read_document(path: &Path) -> anyhow::Result<ClinicalDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let document = if is_json {
        ccda::read_document_json(&text)
    } else {
        ccda::read_document_yaml(&text)
    };

    document.with_context(|| format!("failed to parse {}", path.display()))
}

fn transform(
    args: &TransformArgs,
    config: TransformConfig,
    stdout: &mut dyn Write,
) -> anyhow::Result<()> {
    let document = read_document(&args.input)?;
    tracing::info!(
        input = %args.input.display(),
        ids = %config.id_strategy(),
        sections = document.sections.len(),
        "transforming document"
    );

    let transformed = config.build_transformer().transform_document(&document);
    let rendered = match args.format {
        OutputFormat::Json => fhir::render_bundle_json(&transformed.bundle)?,
        OutputFormat::Yaml => fhir::render_bundle_yaml(&transformed.bundle)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                output = %path.display(),
                entries = transformed.bundle.len(),
                "bundle written"
            );
        }
        None => writeln!(stdout, "{rendered}")?,
    }

    Ok(())
}

fn list_sections(document: &ClinicalDocument, out: &mut dyn Write) -> anyhow::Result<()> {
    if document.sections.is_empty() {
        writeln!(out, "No sections found.")?;
        return Ok(());
    }

    for (index, section) in document.sections.iter().enumerate() {
        let mapped = match primary_resource_type(section.kind()) {
            Some(primary) => format!("-> {primary}"),
            None => "not mapped".to_string(),
        };
        writeln!(
            out,
            "{index}: {} [{}] {mapped}",
            section.header().title.as_deref().unwrap_or("(untitled)"),
            section.kind(),
        )?;
    }

    Ok(())
}

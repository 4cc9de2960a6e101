use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use osv_linter::checks::{ALL_COLLECTION, CheckRegistry};
use osv_linter::config::{LinterConfig, RunConfig};
use osv_linter::linter::{self, LIST, LintError, LintOptions};
use osv_linter::output::{
    CheckListing, CollectionListing, EcosystemListing, LintReport, OutputFormat, OutputWriter,
};
use osv_linter::version::resolver::{EcosystemResolvers, supported_ecosystems};

#[derive(Parser)]
#[command(name = "osv-linter")]
#[command(version, about = "Linter for OSV vulnerability records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record-related commands
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },
}

#[derive(Subcommand)]
enum RecordAction {
    /// Validate records
    #[command(alias = "check")]
    Lint(LintArgs),
}

#[derive(Args)]
struct LintArgs {
    /// Explain what is happening
    #[arg(long)]
    verbose: bool,

    /// Check collection to run ("list" to show all)
    #[arg(long, default_value = ALL_COLLECTION)]
    collection: String,

    /// Individual checks to run instead of a collection ("list" to show all)
    #[arg(long, value_delimiter = ',')]
    checks: Vec<String>,

    /// Ecosystems to limit package checks to ("list" to show supported)
    #[arg(long, value_delimiter = ',')]
    ecosystems: Vec<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Accept ecosystems the bundled schema does not know yet
    #[arg(long)]
    new_ecosystem: bool,

    /// Number of files to lint at the same time
    #[arg(long, default_value_t = 1)]
    parallel: usize,

    /// JSON schema to validate against instead of the bundled one
    #[arg(long)]
    schema_file: Option<PathBuf>,

    /// Registry and HTTP settings (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Files or directories to lint ("-" for stdin)
    paths: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Record {
            action: RecordAction::Lint(args),
        } => {
            init_logging(args.verbose);
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(run_lint(args))
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_lint(args: LintArgs) -> anyhow::Result<ExitCode> {
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let writer = OutputWriter::new(format);
    let mut stdout = std::io::stdout();

    if args.ecosystems.iter().any(|e| e == LIST) {
        writer.render(&EcosystemListing::from(supported_ecosystems()), &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }

    let linter_config = match &args.config {
        Some(path) => LinterConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LinterConfig::default(),
    };
    let resolvers = Arc::new(
        EcosystemResolvers::from_config(&linter_config).context("building HTTP client")?,
    );
    let registry = match &args.schema_file {
        Some(path) => {
            let schema =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            CheckRegistry::new(resolvers, &schema)?
        }
        None => CheckRegistry::with_embedded_schema(resolvers)?,
    };

    if args.collection == LIST {
        writer.render(&CollectionListing::from(&registry), &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }
    if args.checks.iter().any(|c| c == LIST) {
        writer.render(&CheckListing::from(&registry), &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }

    if args.paths.is_empty() && std::io::stdin().is_terminal() {
        return Err(LintError::NoFiles.into());
    }

    let checks = linter::select_checks(&registry, &args.checks, &args.collection)?;
    let files = linter::collect_files(&args.paths);
    if files.is_empty() {
        return Err(LintError::NoFiles.into());
    }
    debug!("Running {} checks on {:?}", checks.len(), files);

    let options = LintOptions {
        config: RunConfig {
            verbose: args.verbose,
            ecosystems: args.ecosystems,
            new_ecosystem: args.new_ecosystem,
        },
        parallel: args.parallel,
        narrate: args.verbose && !args.json,
    };
    let results = linter::lint_files(&files, &checks, &options).await;

    writer.render(&LintReport(&results), &mut stdout)?;

    if results.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

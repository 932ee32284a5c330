//! dynreport - render report documents into standalone HTML.
//!
//! The entry point handles:
//! - Exporting documents or built-in templates to HTML
//! - Validating documents
//! - Inspecting tables through the live sort/page view
//! - Printing the document JSON Schema

use clap::{Args, Parser, Subcommand};
use dr_common::{ReportDocument, Theme};
use dr_core::config::{load_config, ConfigOptions, ResolvedConfig};
use dr_core::document::{find_table, load_document};
use dr_core::exit_codes::ExitCode;
use dr_core::logging::{init_logging, LogConfig, LogFileSettings, LogFormat, LogLevel};
use dr_core::templates::{randomize_y, TEMPLATES};
use dr_report::ReportExporter;
use dr_table::TableView;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// dynreport - dynamic reports exported as self-contained HTML
#[derive(Parser)]
#[command(name = "dynreport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Configuration file (overrides DYNREPORT_CONFIG and the XDG location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr: human or jsonl
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a document to standalone HTML
    Export(ExportArgs),

    /// List built-in templates
    Templates,

    /// Validate a document and print the issues as JSON
    Validate(ValidateArgs),

    /// Print one page of a table as the live view shows it
    Table(TableArgs),

    /// Print the JSON Schema of report documents
    Schema,
}

/// Where a command reads its document from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Report document JSON file
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Built-in template id
    #[arg(long, short)]
    template: Option<String>,
}

impl SourceArgs {
    fn load(&self) -> Result<ReportDocument, CliError> {
        load_document(self.input.as_deref(), self.template.as_deref())
            .map_err(|e| CliError::new(ExitCode::from(&e), e))
    }
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output file path
    #[arg(long, short, conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Output directory; the file is named after the document title
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Replace chart y values with random integers in [10, 60)
    #[arg(long)]
    randomize: bool,

    /// Seed for --randomize
    #[arg(long, requires = "randomize")]
    seed: Option<u64>,

    /// Minify the generated HTML
    #[arg(long)]
    minify: bool,

    /// Inline the plotting engine instead of referencing the CDN
    #[arg(long)]
    embed_assets: bool,

    /// Write table cells unformatted
    #[arg(long)]
    raw_cells: bool,

    /// Force a theme (light or dark)
    #[arg(long)]
    theme: Option<Theme>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Debug)]
struct TableArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Table id (or `{chart_id}-table` for a chart's data table)
    #[arg(long)]
    table: String,

    /// Column to sort by; repeat to click the header several times
    #[arg(long)]
    sort: Vec<String>,

    /// Page to show (clamped to the available pages)
    #[arg(long, default_value_t = 1)]
    page: usize,
}

/// A failed command: exit code plus message for stderr.
#[derive(Debug)]
struct CliError {
    code: ExitCode,
    message: String,
}

impl CliError {
    fn new(code: ExitCode, message: impl std::fmt::Display) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let options = ConfigOptions::from_env(cli.global.config.clone());
    let resolved = load_config(&options);

    let file_log = match &resolved {
        Ok(config) => config.file.log.clone(),
        Err(_) => LogFileSettings::default(),
    };
    let cli_level = (cli.global.verbose > 0 || cli.global.quiet)
        .then(|| LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet));
    init_logging(&LogConfig::resolve(&file_log, cli_level, cli.global.log_format));

    let result = resolved
        .map_err(|e| CliError::new(ExitCode::ConfigError, e))
        .and_then(|config| {
            debug!(source = %config.source, "using configuration");
            run(&cli.command, &config)
        });

    let code = match result {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            eprintln!("error: {}", err.message);
            err.code
        }
    };
    code.into()
}

fn run(command: &Commands, config: &ResolvedConfig) -> Result<(), CliError> {
    match command {
        Commands::Export(args) => run_export(args, config),
        Commands::Templates => run_templates(),
        Commands::Validate(args) => run_validate(args),
        Commands::Table(args) => run_table(args),
        Commands::Schema => print_json(&ReportDocument::json_schema()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(ExitCode::InternalError, e))?;
    println!("{}", json);
    Ok(())
}

fn run_export(args: &ExportArgs, config: &ResolvedConfig) -> Result<(), CliError> {
    let mut document = args.source.load()?;

    if args.randomize {
        match args.seed {
            Some(seed) => randomize_y(&mut document, &mut StdRng::seed_from_u64(seed)),
            None => randomize_y(&mut document, &mut rand::rng()),
        }
        debug!(seed = ?args.seed, "chart data randomized");
    }

    let mut export_config = config.file.export.clone();
    if args.minify {
        export_config.minify = true;
    }
    if args.embed_assets {
        export_config.embed_assets = true;
    }
    if args.raw_cells {
        export_config.format_cells = false;
    }
    if let Some(theme) = args.theme {
        export_config.theme = Some(theme);
    }

    let exporter = ReportExporter::new(export_config);
    let export_err = |e: dr_report::ExportError| CliError::new(ExitCode::from(&e), e);
    let path = match (&args.output, &args.out_dir) {
        (Some(path), _) => {
            exporter.export_to_file(&document, path).map_err(export_err)?;
            path.clone()
        }
        (None, dir) => {
            let dir = dir.as_deref().unwrap_or_else(|| Path::new("."));
            exporter.export_to_dir(&document, dir).map_err(export_err)?
        }
    };

    info!(path = %path.display(), title = %document.title, "export complete");
    println!("{}", path.display());
    Ok(())
}

fn run_templates() -> Result<(), CliError> {
    print_json(&TEMPLATES)
}

fn run_validate(args: &ValidateArgs) -> Result<(), CliError> {
    let document = args.source.load()?;
    let result = dr_common::validate(&document);
    print_json(&result)?;

    info!(
        errors = result.error_count(),
        warnings = result.warning_count(),
        "validation finished"
    );
    result
        .into_result()
        .map(|_| ())
        .map_err(|e| CliError::new(ExitCode::from(&e), e))
}

fn run_table(args: &TableArgs) -> Result<(), CliError> {
    let document = args.source.load()?;
    let table = find_table(&document, &args.table).map_err(|e| CliError::new(ExitCode::from(&e), e))?;

    let mut view = TableView::new(&table);
    for key in &args.sort {
        view.sort(key);
    }
    for _ in 1..args.page.min(view.total_pages()) {
        view.next_page();
    }

    let labels: Vec<&str> = view.columns().iter().map(|c| c.label.as_str()).collect();
    print_json(&serde_json::json!({
        "title": table.title,
        "state": view.state(),
        "columns": labels,
        "rows": view.formatted_page(),
    }))
}

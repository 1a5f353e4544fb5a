//! endprobe CLI - Audit a live API surface for removed or renamed routes

mod storage;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use endprobe_core::{
    Catalog, Fixtures, ProbeConfig, ProbeReport, ProbeSettings, ReportMeta, ValidationStatus, plan,
};
use endprobe_runner::{ApiClient, ProbeRunner, Session, SessionError};

/// Exit code for a failed login.
const EXIT_LOGIN_FAILED: i32 = 1;
/// Exit code for missing variables or an unusable catalog.
const EXIT_CONFIG: i32 = 2;

#[derive(Parser)]
#[command(name = "endprobe")]
#[command(about = "Audit a live API surface for removed or renamed routes without mutating it")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "terminal")]
    output: OutputFormat,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, discover fixtures, probe every catalog entry and write reports
    Run {
        /// Catalog file (TOML, YAML or JSON); defaults to the built-in catalog
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Directory for endpoint-probe.csv and endpoint-probe.md
        #[arg(long, default_value = storage::DEFAULT_REPORTS_DIR)]
        reports_dir: PathBuf,

        /// Send real POST/PUT/DELETE requests instead of safe-mode probes
        #[arg(long)]
        allow_mutation: bool,

        /// Skip TLS certificate and hostname verification (https only)
        #[arg(long)]
        insecure: bool,
    },

    /// Show what a run would send, without network access
    Plan {
        /// Catalog file; defaults to the built-in catalog
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Plan as if mutation were allowed
        #[arg(long)]
        allow_mutation: bool,
    },

    /// List catalog entries and validate them
    Catalog {
        /// Catalog file; defaults to the built-in catalog
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Print an example catalog file instead
        #[arg(long)]
        example: bool,
    },

    /// Export JSON Schema for the machine-readable report
    Schema,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Terminal,
    Json,
    Silent,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(3)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, endprobe_core::ConfigError> {
    match path {
        Some(p) => Catalog::load(p),
        None => Ok(Catalog::builtin()),
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Run {
            catalog,
            reports_dir,
            allow_mutation,
            insecure,
        } => {
            let opts = RunOptions {
                catalog,
                reports_dir,
                allow_mutation,
                insecure,
            };
            probe_command(
                &opts,
                |k| std::env::var(k).ok(),
                |config| {
                    Session::new(&config.endpoint, config.insecure)
                        .map(|s| Box::new(s) as Box<dyn ApiClient>)
                },
                cli.output,
            )
        }

        Commands::Plan {
            catalog,
            allow_mutation,
        } => {
            let catalog = match load_catalog(catalog.as_deref()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return Ok(EXIT_CONFIG);
                }
            };
            let mut settings = ProbeSettings::from_env();
            settings.allow_mutation |= allow_mutation;

            let plan = plan(&catalog, &Fixtures::default(), &settings);
            match cli.output {
                OutputFormat::Terminal => println!("{}", plan.to_terminal()),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
                OutputFormat::Silent => {}
            }
            Ok(if plan.has_errors() { EXIT_CONFIG } else { 0 })
        }

        Commands::Catalog { catalog, example } => {
            if example {
                print!("{}", Catalog::example());
                return Ok(0);
            }

            let catalog = match load_catalog(catalog.as_deref()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return Ok(EXIT_CONFIG);
                }
            };
            let validations = catalog.validate();
            let has_errors = validations
                .iter()
                .any(|v| v.status == ValidationStatus::Error);

            match cli.output {
                OutputFormat::Terminal => {
                    for spec in &catalog {
                        let mut line = format!("{:<7}{}", spec.method.as_str(), spec.path);
                        if let Some(source) = spec.fixture {
                            line.push_str(&format!("  [{source}]"));
                        }
                        if spec.with_env {
                            line.push_str("  [env]");
                        }
                        println!("{line}");
                    }
                    println!("\n{} endpoints", catalog.len());
                    for v in &validations {
                        println!("  [{}] {}: {}", v.status, v.check, v.message);
                    }
                }
                OutputFormat::Json => {
                    let json_output = serde_json::json!({
                        "endpoints": catalog.endpoints,
                        "validations": validations,
                    });
                    println!("{}", serde_json::to_string_pretty(&json_output)?);
                }
                OutputFormat::Silent => {}
            }
            Ok(if has_errors { EXIT_CONFIG } else { 0 })
        }

        Commands::Schema => {
            let schema = endprobe_core::schema::generate_schema();
            println!("{schema}");
            Ok(0)
        }
    }
}

/// Command-line options of `endprobe run`.
struct RunOptions {
    catalog: Option<PathBuf>,
    reports_dir: PathBuf,
    allow_mutation: bool,
    insecure: bool,
}

/// Full probe pass. `connect` is only called once configuration and catalog
/// are known to be usable, and reports are only written after a completed pass.
fn probe_command(
    opts: &RunOptions,
    lookup: impl Fn(&str) -> Option<String>,
    connect: impl FnOnce(&ProbeConfig) -> Result<Box<dyn ApiClient>, SessionError>,
    output: OutputFormat,
) -> Result<i32> {
    let catalog = match load_catalog(opts.catalog.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(EXIT_CONFIG);
        }
    };
    let invalid: Vec<_> = catalog
        .validate()
        .into_iter()
        .filter(|v| v.status == ValidationStatus::Error)
        .collect();
    if !invalid.is_empty() {
        for v in &invalid {
            eprintln!("Error: catalog {}: {}", v.check, v.message);
        }
        return Ok(EXIT_CONFIG);
    }

    let mut config = match ProbeConfig::from_lookup(lookup) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(EXIT_CONFIG);
        }
    };
    config.insecure |= opts.insecure;
    config.settings.allow_mutation |= opts.allow_mutation;

    if output == OutputFormat::Terminal {
        eprintln!("Config:");
        eprintln!("  endpoint: {}", config.endpoint);
        eprintln!(
            "  user:     {} ({})",
            config.credentials.username, config.credentials.auth_provider
        );
        eprintln!("  env:      {}", config.settings.default_env);
        eprintln!(
            "  mutation: {}",
            if config.settings.allow_mutation {
                "ALLOWED"
            } else {
                "safe mode"
            }
        );
        eprintln!("  catalog:  {} endpoints", catalog.len());
        eprintln!();
    }

    let client = connect(&config)?;
    let runner = ProbeRunner::from_config(&config);

    let started = Instant::now();
    let probe_run = match runner.run(client.as_ref(), &catalog) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            return Ok(EXIT_LOGIN_FAILED);
        }
    };
    let duration_secs = started.elapsed().as_secs_f64();

    let report = ProbeReport::new(
        ReportMeta {
            endpoint: config.endpoint.clone(),
            default_env: config.settings.default_env.clone(),
            allow_mutation: config.settings.allow_mutation,
            timestamp: storage::timestamp_iso(),
            duration_secs,
        },
        probe_run.fixtures,
        probe_run.results,
    );

    let saved = storage::save_report(&report, &opts.reports_dir)
        .with_context(|| format!("cannot write reports to {}", opts.reports_dir.display()))?;
    info!(
        csv = %saved.csv.display(),
        markdown = %saved.markdown.display(),
        duration_secs,
        "reports written"
    );

    match output {
        OutputFormat::Terminal => {
            println!("wrote {}", saved.csv.display());
            println!("wrote {}", saved.markdown.display());
            println!("{}", report.summary_line());
            if report.summary.transport_errors > 0 {
                eprintln!(
                    "Warning: {} endpoints failed below HTTP (see {})",
                    report.summary.transport_errors,
                    saved.markdown.display()
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Silent => {}
    }

    Ok(0)
}

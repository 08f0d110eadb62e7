//! eol-check - End-of-life checker CLI
//!
//! Reports runtimes, operating systems, services, dependencies, container
//! images, serverless runtimes and AI models that are past or near their
//! end-of-life date.
//!
//! ## Commands
//!
//! - `scan` (default): scan the host and a project directory
//! - `query`: look up one product on endoflife.date
//! - `model`: check one AI model against the built-in catalog
//! - `models`: list catalog providers and models

mod targets;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};

use eolcheck_core::obs::CheckSpan;
use eolcheck_core::{
    evaluate_ai_model_at, evaluate_ai_targets, evaluate_version_at, load_config,
    sort_by_severity, write_report_json, write_report_md, CheckReportArtifact, CheckSummary,
    Checker, EolCheckConfig, EvaluationResult, LifecycleRepository, LifecycleSource,
};
use eolcheck_data::{
    cached_client, model_cycles, provider_display_name, provider_models, providers, DataConfig,
};
use eolcheck_scan::{
    scan_ai, scan_dependencies, scan_dockerfile, scan_environment, scan_infrastructure,
};

const PRODUCT_INDEX_URL: &str = "https://endoflife.date/api/all.json";

#[derive(Parser)]
#[command(name = "eol-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Check End of Life (EOL) status of your development environment and project dependencies",
    long_about = None
)]
struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Also write a Markdown report to FILE
    #[arg(long, global = true, value_name = "FILE")]
    markdown: Option<PathBuf>,

    /// Also write the JSON report artifact (summary included) to FILE
    #[arg(long, global = true, value_name = "FILE")]
    report_json: Option<PathBuf>,

    /// Emit JSON-formatted log lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// Bypass the lifecycle cache and refetch from the API
    #[arg(long, global = true)]
    refresh_cache: bool,

    /// Exit non-zero on WARN results too
    #[arg(long, global = true)]
    fail_on_warning: bool,

    /// Scan for AI SDKs and model references
    #[arg(long, global = true)]
    ai: bool,

    /// Scan Dockerfile base images
    #[arg(long, global = true)]
    docker: bool,

    /// Scan serverless runtime declarations
    #[arg(long, global = true)]
    infra: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the host and a project directory (default)
    Scan {
        /// Project directory to scan
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Query EOL status for a specific product
    Query {
        /// Product name (e.g. nodejs, python, ubuntu)
        product: String,

        /// Specific version to check
        version: Option<String>,
    },

    /// Check an AI model against the built-in lifecycle catalog
    Model {
        /// Provider key (e.g. openai, anthropic, google)
        provider: String,

        /// Model name (e.g. gpt-4o, claude-3.5-sonnet)
        model: String,

        /// Model version or date stamp
        #[arg(default_value = "latest")]
        version: String,
    },

    /// List catalog providers, or the models of one provider
    Models {
        provider: Option<String>,
    },
}

/// Output switches shared by the commands that print results.
struct OutputOptions {
    json: bool,
    markdown: Option<PathBuf>,
    report_json: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    eolcheck_core::init_tracing(cli.log_json, level);

    let output = OutputOptions {
        json: cli.json,
        markdown: cli.markdown.clone(),
        report_json: cli.report_json.clone(),
    };

    match cli.command {
        None => cmd_scan(Path::new("."), &cli, &output).await,
        Some(Commands::Scan { ref dir }) => cmd_scan(dir, &cli, &output).await,
        Some(Commands::Query {
            ref product,
            ref version,
        }) => cmd_query(product, version.as_deref(), cli.refresh_cache, cli.json).await,
        Some(Commands::Model {
            ref provider,
            ref model,
            ref version,
        }) => cmd_model(provider, model, version, cli.json),
        Some(Commands::Models { ref provider }) => cmd_models(provider.as_deref()),
    }
}

/// File config with command-line switches layered on top.
fn effective_config(dir: &Path, cli: &Cli) -> EolCheckConfig {
    let mut config = load_config(dir);
    config.fail_on_warning |= cli.fail_on_warning;
    config.scan_ai |= cli.ai;
    config.scan_docker |= cli.docker;
    config.scan_infra |= cli.infra;
    config.verbose |= cli.verbose;
    config
}

fn lifecycle_source(refresh: bool) -> Result<Arc<dyn LifecycleSource>> {
    let config = DataConfig::from_env();
    let source = cached_client(&config, refresh).context("Failed to set up the lifecycle client")?;
    Ok(Arc::new(source))
}

/// Scan the host and `dir`, evaluate everything found, print the results.
async fn cmd_scan(dir: &Path, cli: &Cli, output: &OutputOptions) -> Result<ExitCode> {
    let _span = CheckSpan::enter(&dir.display().to_string());
    let config = effective_config(dir, cli);

    info!("Scanning environment...");
    let env = tokio::task::spawn_blocking(scan_environment)
        .await
        .context("Environment scan panicked")?;
    let mut found = targets::environment_targets(&env);

    info!("Scanning project dependencies...");
    let mut deps = scan_dependencies(dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;
    if config.scan_docker {
        deps.extend(scan_dockerfile(dir).context("Failed to scan Dockerfile")?);
    }
    if config.scan_infra {
        deps.extend(scan_infrastructure(dir).context("Failed to scan infrastructure files")?);
    }
    found.extend(targets::dependency_targets(&deps));
    let found = targets::without_excluded(found, &config);

    let mut checker = Checker::new(LifecycleRepository::new(lifecycle_source(
        cli.refresh_cache,
    )?));
    let now = Utc::now();
    let outcome = checker.run(&found, now).await;

    // Fetch failures are already logged by the repository.
    if !outcome.skipped.is_empty() {
        warn!(
            "Could not fetch EOL data for {}. Skipping...",
            outcome.skipped.join(", ")
        );
    }

    let mut results = outcome.results;

    if config.scan_ai {
        info!("Scanning AI models...");
        let ai = scan_ai(dir).context("Failed to scan for AI models")?;
        let models: Vec<_> = ai
            .models
            .into_iter()
            .filter(|m| !config.is_excluded(&m.model))
            .collect();
        results.extend(evaluate_ai_targets(&targets::ai_targets(&models), now));
    }

    sort_by_severity(&mut results);
    let summary = CheckSummary::from_results(&results);
    print_results(&results, &summary, output)?;

    Ok(exit_code(&summary, &config))
}

fn exit_code(summary: &CheckSummary, config: &EolCheckConfig) -> ExitCode {
    if summary.should_fail(config) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn format_result(result: &EvaluationResult) -> String {
    format!(
        "[{}] {} {} - {}",
        result.status, result.component, result.version, result.message
    )
}

fn print_results(
    results: &[EvaluationResult],
    summary: &CheckSummary,
    output: &OutputOptions,
) -> Result<()> {
    if output.markdown.is_some() || output.report_json.is_some() {
        let artifact = CheckReportArtifact::new(results.to_vec(), Utc::now());
        if let Some(path) = &output.markdown {
            write_report_md(path, &artifact)?;
            info!("Markdown report generated: {}", path.display());
        }
        if let Some(path) = &output.report_json {
            write_report_json(path, &artifact)?;
            info!("JSON report generated: {}", path.display());
        }
    }

    if output.json {
        println!(
            "{}",
            serde_json::to_string_pretty(results).context("Failed to serialize results")?
        );
        return Ok(());
    }

    println!("\nEOL Check Results:");
    for result in results {
        println!("{}", format_result(result));
    }
    println!("\n{}", summary);
    Ok(())
}

/// Look up one product, optionally evaluating a version against it.
async fn cmd_query(
    product: &str,
    version: Option<&str>,
    refresh: bool,
    json: bool,
) -> Result<ExitCode> {
    let source = lifecycle_source(refresh)?;
    let cycles = source.fetch(product).await.with_context(|| {
        format!(
            "Failed to fetch EOL data for \"{}\" (available products: {})",
            product, PRODUCT_INDEX_URL
        )
    })?;

    match version {
        Some(version) => {
            let result = evaluate_version_at(product, version, &cycles, Utc::now());
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", format_result(&result));
            }
        }
        None if json => println!("{}", serde_json::to_string_pretty(&cycles)?),
        None => {
            println!("EOL Data for {}:", product);
            println!(
                "{:<12} {:<14} {:<14} {:<14}",
                "Cycle", "Release Date", "EOL Date", "LTS"
            );
            for cycle in cycles.iter() {
                println!(
                    "{:<12} {:<14} {:<14} {:<14}",
                    cycle.cycle,
                    cycle.release_date.as_deref().unwrap_or("-"),
                    cycle.eol.to_string(),
                    cycle.lts.to_string(),
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Evaluate one AI model from the static catalog.
fn cmd_model(provider: &str, model: &str, version: &str, json: bool) -> Result<ExitCode> {
    let Some(display) = provider_display_name(provider) else {
        bail!(
            "Unknown AI provider \"{}\". Known providers: {}",
            provider,
            providers().join(", ")
        );
    };
    let Some(cycles) = model_cycles(provider, model) else {
        bail!(
            "Unknown model \"{}\" for {}. Known models: {}",
            model,
            display,
            provider_models(provider).join(", ")
        );
    };

    let result = evaluate_ai_model_at(display, model, version, &cycles, None, Utc::now());
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format_result(&result));
    }
    Ok(ExitCode::SUCCESS)
}

/// List catalog providers, or one provider's models.
fn cmd_models(provider: Option<&str>) -> Result<ExitCode> {
    match provider {
        None => {
            println!("AI model providers:");
            for key in providers() {
                println!("  {:<10} {}", key, provider_display_name(key).unwrap_or(key));
            }
        }
        Some(provider) => {
            let Some(display) = provider_display_name(provider) else {
                bail!(
                    "Unknown AI provider \"{}\". Known providers: {}",
                    provider,
                    providers().join(", ")
                );
            };
            println!("{} models:", display);
            for model in provider_models(provider) {
                println!("  {}", model);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

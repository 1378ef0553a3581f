use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use seedhub::{
    config::{default_registry, parse_timestamp, PipelineConfig},
    materialize,
    roles::{RoleRegistry, YamlRoleRegistry},
};
use std::{path::PathBuf, process::ExitCode};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Materialize a role-scoped seed CSV from the Seed Hub workbook.
#[derive(Parser, Debug)]
#[command(name = "seedhub", version)]
struct Cli {
    /// Role to build the seed file for, e.g. "RLHF Engineer"
    role: String,

    /// Directory that default paths are resolved against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Seed Hub workbook [default: <root>/seed_hub/Seed_Hub.xlsx]
    #[arg(long, env = "SEED_HUB_PATH")]
    workbook: Option<PathBuf>,

    /// Output directory [default: <root>/output/seeds]
    #[arg(long, env = "SEED_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Exact output file, overriding the generated name
    #[arg(long)]
    output: Option<PathBuf>,

    /// Run timestamp as YYYYMMDD_HHMMSS [default: now]
    #[arg(long)]
    timestamp: Option<String>,

    /// Role registry YAML [default: <root>/seed_hub/roles.yaml if present]
    #[arg(long)]
    registry: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<PipelineConfig> {
        let timestamp = match &self.timestamp {
            Some(raw) => parse_timestamp(raw)
                .with_context(|| format!("--timestamp `{}` is not YYYYMMDD_HHMMSS", raw))?,
            None => Local::now().naive_local(),
        };

        let mut config = PipelineConfig::new(&self.root, self.role, timestamp);
        if let Some(wb) = self.workbook {
            config.workbook = wb;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        config.output_path = self.output;
        config.registry = self.registry.or_else(|| default_registry(&self.root));
        Ok(config)
    }
}

fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::from(1)
        }
    }
}

/// One line on stderr, carrying the whole context chain.
fn failure_message(e: &anyhow::Error) -> String {
    format!("seedhub: {:#}", e)
}

fn run(cli: Cli) -> Result<()> {
    // ─── 2) resolve config ───────────────────────────────────────────
    let config = cli.into_config()?;
    info!(
        role = %config.role,
        workbook = %config.workbook.display(),
        "startup"
    );

    // ─── 3) materialize ──────────────────────────────────────────────
    let registry = config.registry.as_ref().map(YamlRoleRegistry::new);
    let result = materialize(
        &config,
        registry.as_ref().map(|r| r as &dyn RoleRegistry),
    )?;

    // ─── 4) report ───────────────────────────────────────────────────
    println!("{}", serde_json::to_string_pretty(&result)?);
    info!(
        rows = result.rows_written,
        path = %result.output_path.display(),
        "all done"
    );
    Ok(())
}

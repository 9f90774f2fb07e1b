//! LAN MST CLI
//!
//! # Usage
//!
//! ```bash
//! # Minimum spanning tree of a topology file
//! lanmst mst --topology office.yaml
//!
//! # Network cost vs. tree cost
//! lanmst summary --topology office.yaml
//!
//! # Write the DOT rendering into ./out
//! lanmst export --topology office.yaml --format dot --out-dir out
//!
//! # Replay one JSON request per line, printing one response per line
//! lanmst replay --script session.jsonl
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lanmst_service::{telemetry, LanMstConfig, Request, TopologyFile, TopologyService};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lanmst")]
#[command(about = "LAN topology store and minimum spanning tree planner", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the minimum spanning tree
    Mst {
        /// Topology file (YAML or JSON)
        #[arg(short, long)]
        topology: PathBuf,
    },

    /// Print the network/tree cost summary
    Summary {
        #[arg(short, long)]
        topology: PathBuf,
    },

    /// Write an export document
    Export {
        #[arg(short, long)]
        topology: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Overrides export.dir from the configuration
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Run a JSON-lines request script
    Replay {
        #[arg(short, long)]
        script: PathBuf,

        /// Topology to load before the script runs
        #[arg(short, long)]
        topology: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Txt,
    Dot,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = LanMstConfig::load(cli.config.as_deref())
        .with_context(|| format!("loading configuration {:?}", cli.config))?;
    telemetry::init_tracing(&config.logging.filter);

    match cli.command {
        Commands::Mst { topology } => {
            let service = service_with(&config, &topology)?;
            print_json(&service.mst_response()?)?;
        }
        Commands::Summary { topology } => {
            let service = service_with(&config, &topology)?;
            print_json(&service.summary()?)?;
        }
        Commands::Export {
            topology,
            format,
            out_dir,
        } => {
            if let Some(dir) = out_dir {
                config.export.dir = dir;
            }
            let service = service_with(&config, &topology)?;
            let path = match format {
                ExportFormat::Json => service.export_json()?,
                ExportFormat::Txt => service.export_txt()?,
                ExportFormat::Dot => service.export_dot()?,
            };
            println!("{}", path.display());
        }
        Commands::Replay { script, topology } => {
            let service = match topology {
                Some(path) => service_with(&config, &path)?,
                None => TopologyService::new(&config),
            };
            replay(&service, &script)?;
        }
    }

    Ok(())
}

fn service_with(config: &LanMstConfig, topology: &Path) -> Result<TopologyService> {
    let file = TopologyFile::from_path(topology)
        .with_context(|| format!("reading topology {}", topology.display()))?;
    let service = TopologyService::new(config);
    let report = service.load_topology(&file);
    for (from, to, status) in &report.edges_declined {
        warn!(%from, %to, %status, "edge not loaded");
    }
    Ok(service)
}

fn replay(service: &TopologyService, script: &Path) -> Result<()> {
    let reader = BufReader::new(
        File::open(script).with_context(|| format!("opening script {}", script.display()))?,
    );
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut executed = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let request: Request = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid request", script.display(), line_no + 1))?;
        let response = service.handle(request);
        writeln!(out, "{}", serde_json::to_string(&response)?)?;
        executed += 1;
    }

    info!(requests = executed, "replay finished");
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

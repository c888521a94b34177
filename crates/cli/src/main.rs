//! `process-layout` CLI entry-point.
//!
//! Available sub-commands:
//! - `layout` — lay out a process JSON file and print the result as JSON.
//! - `levels` — print the column assigned to every step.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use layout::{AnalysisSummary, Highlights, LayoutConfig, LayoutError, Process};

#[derive(Parser)]
#[command(
    name = "process-layout",
    about = "Layered left-to-right layout for business-process step graphs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute node positions and style flags for a process.
    Layout {
        /// Path to the process JSON file (name, steps, dependencies).
        path: PathBuf,
        /// Analysis result JSON with `bottlenecks` and `critical_path`.
        #[arg(long)]
        analysis: Option<PathBuf>,
        #[command(flatten)]
        geometry: GeometryArgs,
        /// Pretty-print the output.
        #[arg(long)]
        pretty: bool,
    },
    /// Print the topological level of every step.
    Levels {
        /// Path to the process JSON file.
        path: PathBuf,
    },
}

/// Layout constants; each flag overrides the config file.
#[derive(Args)]
struct GeometryArgs {
    /// JSON file with any of `node_width`, `node_height`, `h_gap`, `v_gap`.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, env = "PROCESS_LAYOUT_NODE_WIDTH")]
    node_width: Option<f64>,
    #[arg(long, env = "PROCESS_LAYOUT_NODE_HEIGHT")]
    node_height: Option<f64>,
    #[arg(long, env = "PROCESS_LAYOUT_H_GAP")]
    h_gap: Option<f64>,
    #[arg(long, env = "PROCESS_LAYOUT_V_GAP")]
    v_gap: Option<f64>,
}

impl GeometryArgs {
    /// Defaults, then the config file, then individual flags.
    fn resolve(&self) -> Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => LayoutConfig::from_json(&read(path)?)
                .with_context(|| format!("invalid layout config {}", path.display()))?,
            None => LayoutConfig::default(),
        };

        if let Some(v) = self.node_width {
            config.node_width = v;
        }
        if let Some(v) = self.node_height {
            config.node_height = v;
        }
        if let Some(v) = self.h_gap {
            config.h_gap = v;
        }
        if let Some(v) = self.v_gap {
            config.v_gap = v;
        }

        config.validate()?;
        Ok(config)
    }
}

fn read(path: &Path) -> Result<String, LayoutError> {
    std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
        path: path.to_owned(),
        source,
    })
}

fn load_process(path: &Path) -> Result<Process> {
    let content = read(path)?;
    let process: Process = serde_json::from_str(&content)
        .map_err(LayoutError::from)
        .with_context(|| format!("invalid process file {}", path.display()))?;
    info!(
        "Loaded process '{}' ({} steps, {} dependencies)",
        process.name,
        process.steps.len(),
        process.dependencies.len()
    );
    Ok(process)
}

fn load_highlights(path: Option<&Path>) -> Result<Highlights> {
    let Some(path) = path else {
        return Ok(Highlights::default());
    };
    let content = read(path)?;
    let summary: AnalysisSummary = serde_json::from_str(&content)
        .map_err(LayoutError::from)
        .with_context(|| format!("invalid analysis file {}", path.display()))?;
    Ok(Highlights::from(&summary))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Layout {
            path,
            analysis,
            geometry,
            pretty,
        } => {
            let process = load_process(&path)?;
            let highlights = load_highlights(analysis.as_deref())?;
            let config = geometry.resolve()?;

            let result = layout::layout_process(&process, &highlights, &config);
            if !result.report.unleveled.is_empty() {
                warn!(
                    "{} step(s) sit in a cycle or depend on one; placed in the last column",
                    result.report.unleveled.len()
                );
            }

            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{json}");
        }
        Command::Levels { path } => {
            let process = load_process(&path)?;
            let leveling = layout::level_report(&process.steps, &process.dependencies);

            for step in &process.steps {
                let column = leveling.levels.get(&step.id).copied().unwrap_or_default();
                let marker = if leveling.unleveled.contains(&step.id) { " (fallback)" } else { "" };
                println!("{column}\t{}\t{}{marker}", step.id, step.name);
            }
            for edge in &leveling.dropped_edges {
                warn!(
                    "dependency {} -> {} references a missing step",
                    edge.source_step_id, edge.target_step_id
                );
            }
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(args: &[&str]) -> GeometryArgs {
        let argv = ["process-layout", "layout", "process.json"].iter().chain(args);
        match Cli::try_parse_from(argv).expect("arguments should parse").command {
            Command::Layout { geometry, .. } => geometry,
            Command::Levels { .. } => unreachable!("parsed a layout command"),
        }
    }

    #[test]
    fn flags_override_defaults() {
        let config = geometry(&["--node-width", "240", "--v-gap", "10"])
            .resolve()
            .unwrap();
        assert_eq!(config.node_width, 240.0);
        assert_eq!(config.v_gap, 10.0);
        assert_eq!(config.node_height, LayoutConfig::default().node_height);
    }

    #[test]
    fn negative_flag_is_rejected() {
        let err = geometry(&["--h-gap=-1"]).resolve().unwrap_err();
        assert!(err.to_string().contains("h_gap"));
    }

    #[test]
    fn missing_config_file_reports_the_path() {
        let err = geometry(&["--config", "/nonexistent/layout.json"])
            .resolve()
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/layout.json"));
    }
}

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use config_cluster_operator::config::OperatorConfig;
use config_cluster_operator::core::init_structured_logging;
use config_cluster_operator::reconciler::{PassOutcome, Reconciler, RendererSettings, Repositories};
use config_cluster_operator::storage::{write_output, WorldSnapshot};

#[derive(Parser)]
#[command(name = "config-cluster-operator")]
#[command(about = "Reconcile config clusters against a world snapshot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one pass and write artifacts and status to the output directory
    Reconcile {
        #[command(flatten)]
        target: Target,
        /// Directory receiving one file per artifact plus status.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run one pass and print the artifact keys
    Render {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Args)]
struct Target {
    /// YAML world snapshot
    #[arg(short, long)]
    snapshot: Option<PathBuf>,
    /// Config cluster name
    #[arg(short, long)]
    cluster: Option<String>,
    /// Namespace, defaults to the one named by the snapshot
    #[arg(short, long)]
    namespace: Option<String>,
}

async fn run_pass(config: &OperatorConfig, target: Target) -> anyhow::Result<PassOutcome> {
    let Some(snapshot_path) = target.snapshot.or_else(|| config.snapshot_path.clone()) else {
        bail!("no snapshot given: pass --snapshot or set OPERATOR_SNAPSHOT_PATH");
    };
    let Some(cluster) = target.cluster.or_else(|| config.cluster.clone()) else {
        bail!("no cluster given: pass --cluster or set OPERATOR_CLUSTER");
    };

    let snapshot = WorldSnapshot::load(&snapshot_path)
        .await
        .with_context(|| format!("loading snapshot {}", snapshot_path.display()))?;
    let namespace = target
        .namespace
        .or_else(|| config.namespace.clone())
        .unwrap_or_else(|| snapshot.namespace.clone());
    info!(
        "🔧 Loaded snapshot {} ({} clusters)",
        snapshot_path.display(),
        snapshot.clusters.len()
    );

    let store = Arc::new(snapshot.into_store().await);
    let reconciler = Reconciler::new(
        Repositories::from_store(store),
        RendererSettings {
            ca_file_path: config.ca_file_path.clone(),
        },
    );

    let outcome = reconciler
        .reconcile(&namespace, &cluster)
        .await
        .with_context(|| format!("reconciling {}/{}", namespace, cluster))?;
    Ok(outcome)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = OperatorConfig::init()?;
    init_structured_logging(config.log_format)?;

    match cli.command {
        Commands::Reconcile { target, output } => {
            let output = output.or_else(|| config.output_dir.clone());
            let outcome = run_pass(&config, target).await?;
            match output {
                Some(dir) => write_output(&dir, &outcome.artifacts, &outcome.status).await?,
                None => println!("{}", serde_json::to_string_pretty(&outcome.status)?),
            }
        }
        Commands::Render { target } => {
            let outcome = run_pass(&config, target).await?;
            for key in outcome.artifacts.keys() {
                println!("{}", key);
            }
        }
    }

    Ok(())
}

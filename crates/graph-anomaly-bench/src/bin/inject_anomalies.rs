//! Anomaly injection CLI.
//!
//! Loads a graph, plants cliques and/or attribute anomalies, and writes the
//! augmented graph together with a report of what was planted.
//!
//! Usage:
//!   inject-anomalies (--dataset <NAME> | --input <PATH>) [OPTIONS]
//!
//! Options:
//!   --config <PATH>          TOML injection config
//!   --seed <N>               Random seed (overrides config)
//!   --clique-size <N>        Nodes per clique (enables clique injection)
//!   --num-cliques <N>        Number of cliques
//!   --num-candidates <N>     Candidate pool size (enables attribute injection)
//!   --num-anomalies <N>      Number of attribute anomalies
//!   --output <PATH>          Augmented graph JSON
//!   --report <PATH>          Report JSON, default: <output>.report.json
//!   --list                   List registered datasets and exit

use std::path::PathBuf;

use clap::Parser;
use graph_anomaly_bench::config::{AttributeConfig, CliqueConfig, InjectionConfig, DEFAULT_SEED};
use graph_anomaly_bench::datasets::{read_graph, single_graphs, write_graph};
use graph_anomaly_bench::InjectionRunner;
use graph_anomaly_core::{DEFAULT_NUM_ANOMALIES, DEFAULT_NUM_CLIQUES};

#[derive(Parser, Debug)]
#[command(name = "inject-anomalies")]
#[command(about = "Plant clique and attribute anomalies into a graph dataset")]
struct Args {
    /// Registered dataset name (see --list).
    #[arg(long, conflicts_with = "input", required_unless_present_any = ["input", "list"])]
    dataset: Option<String>,

    /// Path to a graph JSON file.
    #[arg(long)]
    input: Option<PathBuf>,

    /// TOML injection config. CLI size flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Nodes per clique. Enables clique injection.
    #[arg(long)]
    clique_size: Option<usize>,

    /// Number of cliques to plant.
    #[arg(long)]
    num_cliques: Option<usize>,

    /// Candidates per attribute anomaly. Enables attribute injection.
    #[arg(long)]
    num_candidates: Option<usize>,

    /// Number of attribute anomalies to plant.
    #[arg(long)]
    num_anomalies: Option<usize>,

    /// Where to write the augmented graph.
    #[arg(long, required_unless_present = "list")]
    output: Option<PathBuf>,

    /// Where to write the report.
    #[arg(long)]
    report: Option<PathBuf>,

    /// List registered datasets and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("graph_anomaly_bench=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let registry = single_graphs()?;

    if args.list {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = build_config(&args)?;
    tracing::info!(?config, "injection config");

    let graph = match (&args.dataset, &args.input) {
        (Some(name), _) => registry.get(name)?,
        (None, Some(path)) => read_graph(path)?,
        (None, None) => anyhow::bail!("one of --dataset or --input is required"),
    };
    tracing::info!(
        "Loaded graph: {} nodes, {} edges, attributes: {}",
        graph.num_nodes(),
        graph.num_edges(),
        graph
            .node_attrs
            .as_ref()
            .map(|a| format!("{} dims", a.ncols()))
            .unwrap_or_else(|| "none".to_string())
    );

    let mut runner = InjectionRunner::new(config);
    let (augmented, report) = runner.run(&graph)?;

    let Some(output) = args.output.as_ref() else {
        anyhow::bail!("--output is required");
    };
    write_graph(output, &augmented)?;
    tracing::info!("Saved augmented graph to {}", output.display());

    let report_path = args
        .report
        .clone()
        .unwrap_or_else(|| output.with_extension("report.json"));
    report.write_json(&report_path)?;

    println!("{}", report.summary());
    Ok(())
}

/// Merge the optional config file with CLI overrides.
fn build_config(args: &Args) -> anyhow::Result<InjectionConfig> {
    let mut config = match &args.config {
        Some(path) => InjectionConfig::from_file(path)?,
        None => InjectionConfig {
            seed: DEFAULT_SEED,
            cliques: None,
            attributes: None,
        },
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    if let Some(clique_size) = args.clique_size {
        let num_cliques = args
            .num_cliques
            .or(config.cliques.as_ref().map(|c| c.num_cliques))
            .unwrap_or(DEFAULT_NUM_CLIQUES);
        config.cliques = Some(CliqueConfig {
            clique_size,
            num_cliques,
        });
    } else if let (Some(cliques), Some(n)) = (config.cliques.as_mut(), args.num_cliques) {
        cliques.num_cliques = n;
    }

    if let Some(num_candidates) = args.num_candidates {
        let num_anomalies = args
            .num_anomalies
            .or(config.attributes.as_ref().map(|a| a.num_anomalies))
            .unwrap_or(DEFAULT_NUM_ANOMALIES);
        config.attributes = Some(AttributeConfig {
            num_candidates,
            num_anomalies,
        });
    } else if let (Some(attributes), Some(n)) = (config.attributes.as_mut(), args.num_anomalies) {
        attributes.num_anomalies = n;
    }

    if config.cliques.is_none() && config.attributes.is_none() {
        anyhow::bail!("nothing to inject: pass --clique-size, --num-candidates or --config");
    }

    config.validate()?;
    Ok(config)
}

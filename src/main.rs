use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;

use link_state_routing::{
    build_forwarding_table, build_forwarding_table_parallel, GraphMode, RoutingConfig, Topology,
};

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Directed,
    Undirected,
}

impl From<ModeArg> for GraphMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Directed => GraphMode::Directed,
            ModeArg::Undirected => GraphMode::Undirected,
        }
    }
}

#[derive(Parser)]
#[command(name = "lsr", about = "Compute link-state forwarding tables for a topology")]
struct Cli {
    /// JSON routing config (mode, parallel flag, topology)
    #[arg(long, conflicts_with = "edges", required_unless_present = "edges")]
    config: Option<PathBuf>,

    /// Edge list, one "<source> <destination> <weight>" per line
    #[arg(long)]
    edges: Option<PathBuf>,

    /// Overrides the mode from the config file
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Compute per-router tables on all cores
    #[arg(long)]
    parallel: bool,

    /// Print the forwarding table as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(cli: &Cli) -> Result<RoutingConfig> {
    let mut config = match (&cli.config, &cli.edges) {
        (Some(path), _) => RoutingConfig::load(path)?,
        (None, Some(path)) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading edge list {}", path.display()))?;
            let topology = Topology::parse_edge_list(&text)
                .with_context(|| format!("parsing edge list {}", path.display()))?;
            RoutingConfig::new(GraphMode::default(), topology)
        }
        (None, None) => bail!("either --config or --edges is required"),
    };

    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    config.parallel |= cli.parallel;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let graph = config.build_graph();
    info!(
        "Graph built: {} nodes, {} links ({:?})",
        graph.node_count(),
        graph.edge_count(),
        config.mode
    );

    let table = if config.parallel {
        build_forwarding_table_parallel(&graph)?
    } else {
        build_forwarding_table(&graph)?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!("Forwarding table for each node:");
        print!("{}", table);
    }

    Ok(())
}

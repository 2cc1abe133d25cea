use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};

use crate::network::{Graph, GraphMode, Topology};
use crate::RouterId;

/// On-disk description of a routing run.
///
/// ```json
/// {
///   "mode": "undirected",
///   "parallel": false,
///   "topology": [
///     { "node": "A", "links": [{ "to": "B", "cost": 1 }] },
///     { "node": "C" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default)]
    pub mode: GraphMode,
    #[serde(default)]
    pub parallel: bool,
    pub topology: Topology,
}

impl RoutingConfig {
    pub fn new(mode: GraphMode, topology: Topology) -> Self {
        Self {
            mode,
            parallel: false,
            topology,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: RoutingConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .with_context(|| format!("serializing config {}", path.display()))?;
        fs::write(path, content)
            .with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    pub fn build_graph(&self) -> Graph<RouterId> {
        Graph::from_topology(&self.topology, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routing.json");

        let mut topology = Topology::new();
        topology.insert_link("A", "B", 3);
        topology.add_node("C");
        let config = RoutingConfig::new(GraphMode::Undirected, topology);
        config.save(&path).unwrap();

        let loaded = RoutingConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        let graph = loaded.build_graph();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_weight(&"B".to_string(), &"A".to_string()), Some(3));
    }

    #[test]
    fn mode_and_parallel_default() {
        let config: RoutingConfig =
            serde_json::from_str(r#"{"topology":[{"node":"A","links":[{"to":"B","cost":1}]}]}"#)
                .unwrap();

        assert_eq!(config.mode, GraphMode::Directed);
        assert!(!config.parallel);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RoutingConfig::load(dir.path().join("absent.json")).unwrap_err();

        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn save_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("routing.json");
        let err = RoutingConfig::default().save(&path).unwrap_err();

        assert!(err.to_string().contains("writing config"));
        assert!(err.to_string().contains("routing.json"));
    }
}

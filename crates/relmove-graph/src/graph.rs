//! Move graph using petgraph, restricted to a discovered file set

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;
use petgraph::visit::Bfs;
use relmove_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Node index type for graph
type NodeIndex = petgraph::graph::NodeIndex;

/// Directed link graph over the files that move together.
///
/// Nodes are added in discovery order and node indices preserve that order,
/// so every query that returns several documents returns them in the order
/// they were discovered. Parallel links collapse into one edge and self
/// links are never stored.
#[derive(Debug, Clone)]
pub struct MoveGraph {
    /// Directed graph: nodes are documents, edges are resolved links
    graph: DiGraph<DocumentId, ()>,

    /// Map from document to node index (for quick lookups)
    path_index: HashMap<DocumentId, NodeIndex>,
}

impl MoveGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            path_index: HashMap::new(),
        }
    }

    /// Build the graph over `files`, keeping only links of the vault-wide
    /// table whose source and target both lie in `files`.
    pub fn from_resolved_links(files: &[DocumentId], resolved: &ResolvedLinks) -> Self {
        let mut graph = Self::new();
        for file in files {
            graph.add_file(file);
        }

        for (source, targets) in resolved {
            if !graph.contains(source) {
                continue;
            }
            for target in targets.keys() {
                graph.add_link(source, target);
            }
        }

        graph
    }

    /// Add a file, returning its node (existing node when already present)
    pub fn add_file(&mut self, file: &DocumentId) -> NodeIndex {
        if let Some(&idx) = self.path_index.get(file) {
            return idx;
        }
        let idx = self.graph.add_node(file.clone());
        self.path_index.insert(file.clone(), idx);
        idx
    }

    /// Add a link between two files already in the graph.
    ///
    /// Returns `false` when either end is unknown or the link points at its
    /// own source. Repeated links are stored once.
    pub fn add_link(&mut self, source: &DocumentId, target: &DocumentId) -> bool {
        if source == target {
            return false;
        }
        match (self.path_index.get(source), self.path_index.get(target)) {
            (Some(&from), Some(&to)) => {
                self.graph.update_edge(from, to, ());
                true
            }
            _ => false,
        }
    }

    /// Whether the file is part of the graph
    pub fn contains(&self, file: &DocumentId) -> bool {
        self.path_index.contains_key(file)
    }

    /// Files in the graph that link to `file`
    pub fn backlinks(&self, file: &DocumentId) -> Vec<DocumentId> {
        self.neighbors(file, Incoming)
    }

    /// Files in the graph that `file` links to directly
    pub fn outlinks(&self, file: &DocumentId) -> Vec<DocumentId> {
        self.neighbors(file, Outgoing)
    }

    fn neighbors(&self, file: &DocumentId, direction: Direction) -> Vec<DocumentId> {
        let Some(&idx) = self.path_index.get(file) else {
            return Vec::new();
        };

        // petgraph yields neighbours newest edge first
        let mut nodes: Vec<NodeIndex> = self.graph.neighbors_directed(idx, direction).collect();
        nodes.sort();
        nodes.into_iter().map(|n| self.graph[n].clone()).collect()
    }

    /// Every file reachable from `start` by following outlinks, excluding
    /// `start` itself. Terminates on cyclic graphs; a start that is not in
    /// the graph has an empty closure.
    pub fn closure(&self, start: &DocumentId) -> BTreeSet<DocumentId> {
        let Some(&start_idx) = self.path_index.get(start) else {
            return BTreeSet::new();
        };

        let mut reachable = BTreeSet::new();
        let mut bfs = Bfs::new(&self.graph, start_idx);
        while let Some(idx) = bfs.next(&self.graph) {
            if idx != start_idx {
                reachable.insert(self.graph[idx].clone());
            }
        }
        reachable
    }

    /// Find strongly connected components with more than one file (link cycles)
    pub fn cycles(&self) -> Vec<Vec<DocumentId>> {
        kosaraju_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| scc.iter().map(|&idx| self.graph[idx].clone()).collect())
            .collect()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            total_files: self.graph.node_count(),
            total_links: self.graph.edge_count(),
            cycles: self.cycles().len(),
        }
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for MoveGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_files: usize,
    pub total_links: usize,
    pub cycles: usize,
}

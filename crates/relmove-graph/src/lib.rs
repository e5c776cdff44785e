//! # Move Graph
//!
//! Discovery of the files that move together with a note, using petgraph.
//!
//! Provides:
//! - Forward closure: every file reachable from a seed through links and embeds
//! - Directed graph of the discovered files, restricted to links inside the set
//! - Backlink and direct outlink queries
//! - Transitive outlinks (closure) per file, cycle safe
//! - Cycle detection and graph statistics
//!
//! ## Quick Start
//!
//! ```
//! use relmove_core::prelude::*;
//! use relmove_graph::MoveGraph;
//! use std::collections::BTreeMap;
//!
//! let files = vec![DocumentId::new("a.md"), DocumentId::new("b.md")];
//! let mut table: ResolvedLinks = BTreeMap::new();
//! table.entry(files[0].clone()).or_default().insert(files[1].clone(), 1);
//!
//! let graph = MoveGraph::from_resolved_links(&files, &table);
//! assert_eq!(graph.backlinks(&files[1]), vec![files[0].clone()]);
//! assert!(graph.closure(&files[0]).contains(&files[1]));
//! ```
//!
//! ## Core Concepts
//!
//! - **Nodes**: discovered files, in discovery order
//! - **Edges**: resolved links between two discovered files (no self links,
//!   parallel links collapse)
//! - **Related files**: [`build_related_files`] combines discovery, the
//!   restricted graph and one [`FileMoveInfo`](relmove_core::FileMoveInfo)
//!   per file

pub mod builder;
pub mod graph;

pub use builder::{RelatedFiles, build_related_files, forward_closure};
pub use graph::{GraphStats, MoveGraph};

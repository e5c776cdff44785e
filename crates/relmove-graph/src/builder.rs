//! Discovery of the files that move together with a seed document.

use crate::graph::MoveGraph;
use log::debug;
use relmove_core::prelude::*;
use std::collections::HashSet;

/// Everything discovered from one seed document
#[derive(Debug, Clone)]
pub struct RelatedFiles {
    /// Discovered files, seed first, in discovery order
    pub all_files: Vec<DocumentId>,
    /// One record per discovered file, same order as `all_files`
    pub file_infos: Vec<FileMoveInfo>,
    graph: MoveGraph,
}

impl RelatedFiles {
    /// Link graph restricted to the discovered files
    pub fn graph(&self) -> &MoveGraph {
        &self.graph
    }

    /// Record for a discovered file
    pub fn info(&self, file: &DocumentId) -> Option<&FileMoveInfo> {
        self.file_infos.iter().find(|info| &info.file == file)
    }

    pub fn len(&self) -> usize {
        self.all_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_files.is_empty()
    }
}

/// Every file reachable from `seed` through resolvable links and embeds,
/// including `seed`, in depth-first pop order.
///
/// Link text the oracle cannot resolve contributes nothing.
pub fn forward_closure(seed: &DocumentId, oracle: &dyn MetadataOracle) -> Vec<DocumentId> {
    let mut discovered = Vec::new();
    let mut scanned: HashSet<DocumentId> = HashSet::new();
    let mut stack = vec![seed.clone()];

    while let Some(current) = stack.pop() {
        if !scanned.insert(current.clone()) {
            continue;
        }

        for target in oracle.outlink_targets(&current) {
            if !scanned.contains(&target) {
                stack.push(target);
            }
        }
        discovered.push(current);
    }

    discovered
}

/// Discover the related files of `seed` and describe each one's links
/// within the discovered set.
pub fn build_related_files(seed: &DocumentId, oracle: &dyn MetadataOracle) -> RelatedFiles {
    let all_files = forward_closure(seed, oracle);
    let graph = MoveGraph::from_resolved_links(&all_files, &oracle.resolved_links());

    let file_infos = all_files
        .iter()
        .map(|file| FileMoveInfo {
            file: file.clone(),
            backlinks: graph.backlinks(file),
            links: graph.outlinks(file),
            all_links: graph.closure(file),
        })
        .collect();

    debug!(
        "Discovered {} related files from {} ({} links)",
        all_files.len(),
        seed,
        graph.edge_count()
    );

    RelatedFiles {
        all_files,
        file_infos,
        graph,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    /// Oracle over a fixed link table where link text is the target path
    struct MapOracle {
        links: BTreeMap<DocumentId, Vec<String>>,
    }

    impl MapOracle {
        fn new(edges: &[(&str, &[&str])]) -> Self {
            let links = edges
                .iter()
                .map(|(source, targets)| {
                    (
                        DocumentId::new(*source),
                        targets.iter().map(|t| t.to_string()).collect(),
                    )
                })
                .collect();
            Self { links }
        }
    }

    impl MetadataOracle for MapOracle {
        fn links_and_embeds(&self, doc: &DocumentId) -> Option<DocumentLinks> {
            self.links.get(doc).map(|targets| DocumentLinks {
                links: targets.iter().map(|t| LinkRef::new(t.as_str())).collect(),
                embeds: Vec::new(),
            })
        }

        fn resolve_link_text(&self, link_text: &str, _from_path: &str) -> Option<DocumentId> {
            let id = DocumentId::new(link_text);
            self.links.contains_key(&id).then_some(id)
        }

        fn resolved_links(&self) -> ResolvedLinks {
            let mut table = ResolvedLinks::new();
            for source in self.links.keys() {
                for target in self.outlink_targets(source) {
                    *table
                        .entry(source.clone())
                        .or_default()
                        .entry(target)
                        .or_default() += 1;
                }
            }
            table
        }
    }

    fn doc(path: &str) -> DocumentId {
        DocumentId::new(path)
    }

    fn set(paths: &[&str]) -> BTreeSet<DocumentId> {
        paths.iter().map(|p| doc(p)).collect()
    }

    #[test]
    fn test_two_files_one_backlink() {
        let oracle = MapOracle::new(&[("a.md", &["b.md"]), ("b.md", &[])]);
        let related = build_related_files(&doc("a.md"), &oracle);

        assert_eq!(related.all_files, vec![doc("a.md"), doc("b.md")]);
        let b = related.info(&doc("b.md")).unwrap();
        assert_eq!(b.backlinks, vec![doc("a.md")]);
        assert!(!b.needs_confirmation());
        assert_eq!(related.info(&doc("a.md")).unwrap().reference_info(), ReferenceInfo::Root);
    }

    #[test]
    fn test_diamond() {
        let oracle = MapOracle::new(&[
            ("a.md", &["b.md", "c.md"]),
            ("b.md", &["d.md"]),
            ("c.md", &["d.md"]),
            ("d.md", &[]),
        ]);
        let related = build_related_files(&doc("a.md"), &oracle);

        assert_eq!(related.len(), 4);
        let d = related.info(&doc("d.md")).unwrap();
        assert_eq!(d.backlinks.len(), 2);
        assert_eq!(d.reference_info(), ReferenceInfo::Shared(2));
        assert!(d.needs_confirmation());

        let a = related.info(&doc("a.md")).unwrap();
        assert_eq!(a.all_links, set(&["b.md", "c.md", "d.md"]));
        assert_eq!(a.links.len(), 2);
    }

    #[test]
    fn test_discovery_is_depth_first() {
        let oracle = MapOracle::new(&[
            ("a.md", &["b.md", "c.md"]),
            ("b.md", &[]),
            ("c.md", &["e.md"]),
            ("e.md", &[]),
        ]);
        // c.md is pushed last so it is popped (and followed) before b.md
        let files = forward_closure(&doc("a.md"), &oracle);
        assert_eq!(files, vec![doc("a.md"), doc("c.md"), doc("e.md"), doc("b.md")]);
    }

    #[test]
    fn test_cycle_back_to_seed() {
        let oracle = MapOracle::new(&[("a.md", &["b.md"]), ("b.md", &["a.md"])]);
        let related = build_related_files(&doc("a.md"), &oracle);

        assert_eq!(related.all_files, vec![doc("a.md"), doc("b.md")]);
        let a = related.info(&doc("a.md")).unwrap();
        assert_eq!(a.backlinks, vec![doc("b.md")]);
        assert_eq!(a.all_links, set(&["b.md"]));
        assert_eq!(related.graph().stats().cycles, 1);
    }

    #[test]
    fn test_dangling_links_are_ignored() {
        let oracle = MapOracle::new(&[("a.md", &["ghost.md", "b.md"]), ("b.md", &["a.md#Top"])]);
        let related = build_related_files(&doc("a.md"), &oracle);

        assert_eq!(related.len(), 2);
        let b = related.info(&doc("b.md")).unwrap();
        assert!(b.links.is_empty());
        assert!(b.all_links.is_empty());
    }

    #[test]
    fn test_self_link_is_not_a_backlink() {
        let oracle = MapOracle::new(&[("a.md", &["a.md"])]);
        let related = build_related_files(&doc("a.md"), &oracle);

        assert_eq!(related.all_files, vec![doc("a.md")]);
        let a = related.info(&doc("a.md")).unwrap();
        assert!(a.backlinks.is_empty());
        assert!(a.all_links.is_empty());
    }

    #[test]
    fn test_seed_without_metadata() {
        let oracle = MapOracle::new(&[]);
        let related = build_related_files(&doc("lonely.png"), &oracle);

        assert_eq!(related.all_files, vec![doc("lonely.png")]);
        assert_eq!(related.file_infos[0].reference_info(), ReferenceInfo::Root);
    }
}

//! In-memory store and oracle shared by the unit tests of this crate

use async_trait::async_trait;
use parking_lot::Mutex;
use relmove_core::prelude::*;
use relmove_core::utils::parent_folder;
use std::collections::{BTreeMap, BTreeSet};
use std::io;

#[derive(Default)]
struct MemoryState {
    files: BTreeSet<String>,
    folders: BTreeSet<String>,
    links: BTreeMap<String, Vec<String>>,
    calls: Vec<String>,
    fail_rename: Option<String>,
}

impl MemoryState {
    fn add_folder(&mut self, folder: &str) {
        let mut current = folder;
        while !current.is_empty() {
            self.folders.insert(current.to_string());
            current = parent_folder(current);
        }
    }
}

/// Vault held in memory; link text is always the target's exact path
#[derive(Default)]
pub(crate) struct MemoryVault {
    state: Mutex<MemoryState>,
}

impl MemoryVault {
    pub(crate) fn new(files: &[&str]) -> Self {
        let vault = Self::default();
        {
            let mut state = vault.state.lock();
            for file in files {
                state.files.insert(file.to_string());
                state.add_folder(parent_folder(file));
            }
        }
        vault
    }

    pub(crate) fn link(self, source: &str, targets: &[&str]) -> Self {
        self.state.lock().links.insert(
            source.to_string(),
            targets.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub(crate) fn forget_folder(self, folder: &str) -> Self {
        self.state.lock().folders.remove(folder);
        self
    }

    pub(crate) fn fail_rename_of(self, path: &str) -> Self {
        self.state.lock().fail_rename = Some(path.to_string());
        self
    }

    pub(crate) fn has_file(&self, path: &str) -> bool {
        self.state.lock().files.contains(path)
    }

    pub(crate) fn has_folder(&self, path: &str) -> bool {
        self.state.lock().folders.contains(path)
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryVault {
    fn resolve_path(&self, path: &str) -> Option<DocumentId> {
        self.has_file(path).then(|| DocumentId::new(path))
    }

    async fn entry_kind(&self, path: &str) -> Result<Option<EntryKind>> {
        let state = self.state.lock();
        if path.is_empty() || state.folders.contains(path) {
            Ok(Some(EntryKind::Folder))
        } else if state.files.contains(path) {
            Ok(Some(EntryKind::File))
        } else {
            Ok(None)
        }
    }

    async fn mkdir_all(&self, path: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(format!("mkdir {}", path));
        state.add_folder(path);
        Ok(())
    }

    async fn rename(&self, doc: &DocumentId, new_path: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_rename.as_deref() == Some(doc.path()) {
            return Err(Error::io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", doc),
            )));
        }
        if !state.files.remove(doc.path()) {
            return Err(Error::file_not_found(doc.path()));
        }
        state.calls.push(format!("rename {} -> {}", doc, new_path));
        state.files.insert(new_path.to_string());
        Ok(())
    }
}

impl MetadataOracle for MemoryVault {
    fn links_and_embeds(&self, doc: &DocumentId) -> Option<DocumentLinks> {
        let state = self.state.lock();
        let targets = state.links.get(doc.path())?;
        let (embeds, links): (Vec<&String>, Vec<&String>) = targets
            .iter()
            .partition(|t| DocumentId::new(t.as_str()).kind() == DocumentKind::Image);
        Some(DocumentLinks {
            links: links.into_iter().map(|t| LinkRef::new(t.as_str())).collect(),
            embeds: embeds.into_iter().map(|t| LinkRef::new(t.as_str())).collect(),
        })
    }

    fn resolve_link_text(&self, link_text: &str, _from_path: &str) -> Option<DocumentId> {
        self.resolve_path(link_text)
    }

    fn resolved_links(&self) -> ResolvedLinks {
        let sources: Vec<DocumentId> = self
            .state
            .lock()
            .links
            .keys()
            .map(|s| DocumentId::new(s.as_str()))
            .collect();

        let mut table = ResolvedLinks::new();
        for source in sources {
            for target in self.outlink_targets(&source) {
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

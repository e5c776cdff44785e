//! Collaborator interfaces consumed by the move engine.
//!
//! The engine never touches files or parses content itself. It talks to a
//! [`DocumentStore`] for path resolution, folder creation and renames, and
//! to a [`MetadataOracle`] for link information.

use crate::error::Result;
use crate::models::{DocumentId, DocumentLinks, EntryKind, ResolvedLinks};
use async_trait::async_trait;

/// Path-addressed document store with folder creation and atomic rename
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Look up a file by vault-relative path
    fn resolve_path(&self, path: &str) -> Option<DocumentId>;

    /// What currently sits at `path`, if anything
    async fn entry_kind(&self, path: &str) -> Result<Option<EntryKind>>;

    /// Create `path` and every missing ancestor. Idempotent.
    async fn mkdir_all(&self, path: &str) -> Result<()>;

    /// Move `doc` to `new_path`, overwriting any file already there
    async fn rename(&self, doc: &DocumentId, new_path: &str) -> Result<()>;
}

/// Read-only link index over the vault
pub trait MetadataOracle: Send + Sync {
    /// Raw link and embed text of a document, `None` if it has no metadata
    fn links_and_embeds(&self, doc: &DocumentId) -> Option<DocumentLinks>;

    /// Resolve link text to a document, relative to the linking file's path
    fn resolve_link_text(&self, link_text: &str, from_path: &str) -> Option<DocumentId>;

    /// Vault-wide source -> target -> count table
    fn resolved_links(&self) -> ResolvedLinks;

    /// Direct link and embed targets of `doc` that resolve, deduplicated in
    /// first-seen order. Unresolved link text is dropped.
    fn outlink_targets(&self, doc: &DocumentId) -> Vec<DocumentId> {
        let Some(refs) = self.links_and_embeds(doc) else {
            return Vec::new();
        };

        let mut targets: Vec<DocumentId> = Vec::new();
        for link in refs.iter() {
            if let Some(target) = self.resolve_link_text(&link.link_text, doc.path())
                && !targets.contains(&target)
            {
                targets.push(target);
            }
        }
        targets
    }
}

//! Core data models for moving documents and their link graph.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Handle-based**: documents are referenced by vault path, never owned
//! - **Type-Safe**: Enums replace magic strings and flag soup

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Extensions routed into the `assets` subfolder by the destination rule.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "excalidraw"];

/// Opaque handle to a document, keyed by its vault-relative path.
///
/// Paths always use `/` as separator and never start or end with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a handle from a vault-relative path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Full vault-relative path
    pub fn path(&self) -> &str {
        &self.0
    }

    /// File name including extension (`notes/a.md` -> `a.md`)
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Extension without the dot, empty when there is none
    pub fn extension(&self) -> &str {
        let name = self.name();
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[idx + 1..],
            _ => "",
        }
    }

    /// Containing folder, empty for files at the vault root
    pub fn folder(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Classify this document for destination routing
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_extension(self.extension())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for DocumentId {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// Extension-derived document type, used only for destination routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Image,
    Other,
}

impl DocumentKind {
    /// Classify an extension (case-insensitive, without the dot)
    pub fn from_extension(extension: &str) -> Self {
        if IMAGE_EXTENSIONS
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
        {
            Self::Image
        } else {
            Self::Other
        }
    }
}

/// What a store entry at some path is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// A single unresolved reference as written in the source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    /// Link text without display alias, e.g. `folder/Note#Heading`
    pub link_text: String,
}

impl LinkRef {
    pub fn new(link_text: impl Into<String>) -> Self {
        Self {
            link_text: link_text.into(),
        }
    }
}

/// Outbound references of one document, split the way the metadata index reports them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLinks {
    /// Inline links (`[[Note]]`, `[text](note.md)`)
    pub links: Vec<LinkRef>,
    /// Embeds (`![[image.png]]`, `![alt](image.png)`)
    pub embeds: Vec<LinkRef>,
}

impl DocumentLinks {
    /// Links first, then embeds
    pub fn iter(&self) -> impl Iterator<Item = &LinkRef> {
        self.links.iter().chain(self.embeds.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.embeds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len() + self.embeds.len()
    }
}

/// Vault-wide resolved link table: source -> target -> occurrence count
pub type ResolvedLinks = BTreeMap<DocumentId, BTreeMap<DocumentId, usize>>;

/// Per-document record produced by the link-graph builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMoveInfo {
    /// The document to be moved
    pub file: DocumentId,
    /// Documents in the discovered set that reference this one
    pub backlinks: Vec<DocumentId>,
    /// Documents in the discovered set this one references directly
    pub links: Vec<DocumentId>,
    /// Every document reachable through outlinks, excluding `file` itself
    pub all_links: BTreeSet<DocumentId>,
}

impl FileMoveInfo {
    /// How this file is referenced inside the discovered set
    pub fn reference_info(&self) -> ReferenceInfo {
        match self.backlinks.len() {
            0 => ReferenceInfo::Root,
            1 => ReferenceInfo::Single,
            n => ReferenceInfo::Shared(n),
        }
    }

    /// Files referenced more than once are not selected until the user confirms them
    pub fn needs_confirmation(&self) -> bool {
        self.backlinks.len() > 1
    }
}

/// Reference classification shown next to each file in the selection UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "lowercase")]
pub enum ReferenceInfo {
    /// No backlinks: the seed or an unreferenced root
    Root,
    /// Exactly one backlink
    Single,
    /// Referenced by several files, needs confirmation
    Shared(usize),
}

/// Outcome of moving one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// File was renamed into the destination
    pub moved: bool,
    /// File stayed where it was
    pub skipped: bool,
    /// File was moved over an existing destination file (implies `moved`)
    pub replaced: bool,
    /// Resolved direct link/embed targets of the moved file
    pub inlink_files: BTreeSet<DocumentId>,
}

impl MoveResult {
    /// A skip caused by an existing destination
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }

    /// A completed move
    pub fn moved(replaced: bool, inlink_files: BTreeSet<DocumentId>) -> Self {
        Self {
            moved: true,
            skipped: false,
            replaced,
            inlink_files,
        }
    }
}

/// Aggregate counters over a batch of moves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMoveResult {
    pub moved_count: usize,
    pub skipped_count: usize,
    pub replaced_count: usize,
}

impl BatchMoveResult {
    /// One-file batch from a single move result
    pub fn from_single(result: &MoveResult) -> Self {
        let mut batch = Self::default();
        batch.record(result);
        batch
    }

    /// Every discovered file skipped, nothing moved (cancelled batch)
    pub fn all_skipped(count: usize) -> Self {
        Self {
            moved_count: 0,
            skipped_count: count,
            replaced_count: 0,
        }
    }

    /// Accumulate the flags of one move
    pub fn record(&mut self, result: &MoveResult) {
        self.moved_count += usize::from(result.moved);
        self.skipped_count += usize::from(result.skipped);
        self.replaced_count += usize::from(result.replaced);
    }

    /// Count a file that was never handed to the mover
    pub fn record_unselected(&mut self) {
        self.skipped_count += 1;
    }

    /// Files accounted for (replaced files are already counted as moved)
    pub fn total(&self) -> usize {
        self.moved_count + self.skipped_count
    }
}

/// Options for moving a file or a file with its related files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveOptions {
    /// When the destination already holds a file: `true` skips, `false` replaces
    pub skip_file_when_exist: bool,
    /// Discover linked files and let the user choose which ones move too
    pub include_inlinks: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            skip_file_when_exist: true,
            include_inlinks: false,
        }
    }
}

impl MoveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the existing-destination policy
    pub fn skip_file_when_exist(mut self, skip: bool) -> Self {
        self.skip_file_when_exist = skip;
        self
    }

    /// Set whether linked files are discovered
    pub fn include_inlinks(mut self, include: bool) -> Self {
        self.include_inlinks = include;
        self
    }
}

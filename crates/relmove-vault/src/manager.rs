//! Filesystem vault: file index, link metadata, folder creation and renames

use crate::resolve::LinkResolver;
use async_trait::async_trait;
use parking_lot::RwLock;
use relmove_core::prelude::*;
use relmove_core::utils::{normalize_path, parent_folder};
use relmove_core::PathValidator;
use std::collections::{BTreeSet, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::instrument;
use walkdir::WalkDir;

/// Display path of the vault root in folder listings
pub const ROOT_FOLDER: &str = "/";

/// In-memory view of the vault contents
#[derive(Debug, Default)]
struct VaultIndex {
    /// Every file, attachments included
    files: BTreeSet<DocumentId>,
    /// Every folder below the root
    folders: BTreeSet<String>,
    /// Links and embeds of each parsed markdown file
    metadata: HashMap<DocumentId, DocumentLinks>,
}

impl VaultIndex {
    fn add_folder_with_ancestors(&mut self, folder: &str) {
        let mut current = folder;
        while !current.is_empty() && self.folders.insert(current.to_string()) {
            current = parent_folder(current);
        }
    }
}

/// Vault manager backed by a directory on disk.
///
/// [`VaultManager::initialize`] scans the directory once; afterwards the
/// index is kept current by the manager's own [`DocumentStore`] operations.
pub struct VaultManager {
    config: RelmoveConfig,
    vault_path: PathBuf,
    index: RwLock<VaultIndex>,
}

impl VaultManager {
    /// Create a new vault manager
    pub fn new(config: RelmoveConfig) -> Result<Self> {
        let vault_path = config.vault()?.path.clone();

        Ok(Self {
            config,
            vault_path,
            index: RwLock::new(VaultIndex::default()),
        })
    }

    /// Get vault path
    pub fn vault_path(&self) -> &PathBuf {
        &self.vault_path
    }

    /// Initialize vault by scanning all files and parsing markdown ones
    #[instrument(skip(self), name = "vault_initialize")]
    pub async fn initialize(&self) -> Result<()> {
        log::info!("Starting vault initialization for: {:?}", self.vault_path);

        let (files, folders) = self.scan_files()?;
        log::info!("Found {} files in {} folders", files.len(), folders.len());

        let mut metadata = HashMap::new();
        for doc in &files {
            if !self.config.is_markdown_extension(doc.extension()) {
                continue;
            }

            log::debug!("Processing file: {}", doc);
            match tokio::fs::read_to_string(self.vault_path.join(doc.path())).await {
                Ok(content) => {
                    let links = relmove_parser::parse_links(&content);
                    log::debug!("Parsed {}: {} references extracted", doc, links.len());
                    metadata.insert(doc.clone(), links);
                }
                Err(e) => {
                    log::warn!("Failed to read {}: {}", doc, e);
                }
            }
        }

        let mut index = self.index.write();
        index.files = files;
        index.folders = folders;
        index.metadata = metadata;

        log::info!(
            "Vault initialization complete. {} files, {} parsed",
            index.files.len(),
            index.metadata.len()
        );

        Ok(())
    }

    /// Walk the vault directory, skipping excluded names
    fn scan_files(&self) -> Result<(BTreeSet<DocumentId>, BTreeSet<String>)> {
        let mut files = BTreeSet::new();
        let mut folders = BTreeSet::new();

        let walker = WalkDir::new(&self.vault_path)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !self.config.is_excluded(name))
            });

        for entry in walker {
            let entry = entry.map_err(|e| Error::other(format!("Failed to scan vault: {}", e)))?;
            let Some(relative) = self.relative_path(entry.path()) else {
                log::warn!("Skipping non UTF-8 path: {:?}", entry.path());
                continue;
            };

            if entry.file_type().is_dir() {
                folders.insert(relative);
            } else if entry.file_type().is_file() {
                files.insert(DocumentId::new(relative));
            }
        }

        Ok((files, folders))
    }

    fn relative_path(&self, full_path: &Path) -> Option<String> {
        let relative = full_path.strip_prefix(&self.vault_path).ok()?;
        let parts: Option<Vec<&str>> = relative.iter().map(|part| part.to_str()).collect();
        Some(parts?.join("/"))
    }

    /// Absolute path for a vault-relative path, rejecting escapes from the vault
    fn full_path(&self, path: &str) -> Result<PathBuf> {
        let normalized = normalize_path(path);
        if normalized.is_empty() {
            return Ok(self.vault_path.clone());
        }
        PathValidator::validate_path_in_vault(&self.vault_path, Path::new(&normalized))
    }

    /// Folders whose path contains `query`, sorted. The vault root is listed
    /// as `/`; an empty query lists every folder.
    pub fn suggest_folders(&self, query: &str) -> Vec<String> {
        let index = self.index.read();
        std::iter::once(ROOT_FOLDER)
            .chain(index.folders.iter().map(String::as_str))
            .filter(|folder| folder.contains(query))
            .map(str::to_string)
            .collect()
    }

    /// Number of indexed files
    pub fn file_count(&self) -> usize {
        self.index.read().files.len()
    }
}

#[async_trait]
impl DocumentStore for VaultManager {
    fn resolve_path(&self, path: &str) -> Option<DocumentId> {
        let doc = DocumentId::new(normalize_path(path));
        self.index.read().files.contains(&doc).then_some(doc)
    }

    #[instrument(skip(self), name = "vault_entry_kind")]
    async fn entry_kind(&self, path: &str) -> Result<Option<EntryKind>> {
        let full_path = self.full_path(path)?;
        match tokio::fs::metadata(&full_path).await {
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Folder)),
            Ok(_) => Ok(Some(EntryKind::File)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(e)),
        }
    }

    #[instrument(skip(self), name = "vault_mkdir_all")]
    async fn mkdir_all(&self, path: &str) -> Result<()> {
        let full_path = self.full_path(path)?;
        tokio::fs::create_dir_all(&full_path)
            .await
            .map_err(Error::io)?;

        self.index.write().add_folder_with_ancestors(&normalize_path(path));
        log::debug!("Created folder {}", full_path.display());
        Ok(())
    }

    #[instrument(skip(self), fields(file = %doc), name = "vault_rename")]
    async fn rename(&self, doc: &DocumentId, new_path: &str) -> Result<()> {
        let from = self.full_path(doc.path())?;
        let to = self.full_path(new_path)?;
        if from == self.vault_path || to == self.vault_path {
            return Err(Error::invalid_path("Cannot rename the vault root"));
        }

        tokio::fs::rename(&from, &to).await.map_err(Error::io)?;

        let target = DocumentId::new(normalize_path(new_path));
        let mut index = self.index.write();
        index.files.remove(doc);
        index.files.insert(target.clone());
        if let Some(links) = index.metadata.remove(doc) {
            index.metadata.insert(target.clone(), links);
        }
        index.add_folder_with_ancestors(target.folder());

        log::debug!("Renamed {} -> {}", doc, target);
        Ok(())
    }
}

impl MetadataOracle for VaultManager {
    fn links_and_embeds(&self, doc: &DocumentId) -> Option<DocumentLinks> {
        self.index.read().metadata.get(doc).cloned()
    }

    fn resolve_link_text(&self, link_text: &str, from_path: &str) -> Option<DocumentId> {
        let index = self.index.read();
        LinkResolver::new(&index.files).resolve(link_text, from_path)
    }

    fn resolved_links(&self) -> ResolvedLinks {
        let index = self.index.read();
        let resolver = LinkResolver::new(&index.files);

        let mut table = ResolvedLinks::new();
        for (source, links) in &index.metadata {
            for link in links.iter() {
                if let Some(target) = resolver.resolve(&link.link_text, source.path()) {
                    *table
                        .entry(source.clone())
                        .or_default()
                        .entry(target)
                        .or_default() += 1;
                }
            }
        }
        table
    }
}

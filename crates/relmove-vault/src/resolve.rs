//! Link text resolution against the set of files in the vault.
//!
//! Lookup order for a link written in `from_path`:
//! 1. subpath (`#heading`, `#^block`) stripped
//! 2. exact vault path, as written or with `.md` appended
//! 3. path relative to the folder of `from_path`
//! 4. file name or path suffix match, preferring a file in the same folder
//!    as `from_path`, then the shortest path
//!
//! The whole lookup runs case-sensitively first. Only when nothing matches
//! is it repeated ignoring case, so `[[my note]]` still finds `My Note.md`.

use relmove_core::utils::{normalize_path, parent_folder, resolve_relative};
use relmove_core::DocumentId;
use relmove_parser::link_utils::link_path;
use std::borrow::Cow;
use std::collections::BTreeSet;

const DEFAULT_EXTENSION: &str = "md";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Sensitive,
    Insensitive,
}

impl Case {
    fn fold<'s>(self, text: &'s str) -> Cow<'s, str> {
        match self {
            Case::Sensitive => Cow::Borrowed(text),
            Case::Insensitive => Cow::Owned(text.to_lowercase()),
        }
    }
}

/// Resolves link text to documents of a fixed file set
pub struct LinkResolver<'a> {
    files: &'a BTreeSet<DocumentId>,
}

impl<'a> LinkResolver<'a> {
    pub fn new(files: &'a BTreeSet<DocumentId>) -> Self {
        Self { files }
    }

    /// Resolve `link_text` as written in the file at `from_path`
    pub fn resolve(&self, link_text: &str, from_path: &str) -> Option<DocumentId> {
        let target = link_path(link_text);
        if target.is_empty() {
            return None;
        }

        self.lookup(target, from_path, Case::Sensitive)
            .or_else(|| self.lookup(target, from_path, Case::Insensitive))
    }

    fn lookup(&self, target: &str, from_path: &str, case: Case) -> Option<DocumentId> {
        if !target.starts_with("./") && !target.starts_with("../") {
            let exact = normalize_path(target);
            if let Some(doc) = self.exact(&exact, case) {
                return Some(doc);
            }
        }

        let relative = resolve_relative(parent_folder(from_path), target)?;
        if let Some(doc) = self.exact(&relative, case) {
            return Some(doc);
        }

        self.by_suffix(&normalize_path(target), parent_folder(from_path), case)
    }

    fn exact(&self, path: &str, case: Case) -> Option<DocumentId> {
        if path.is_empty() {
            return None;
        }
        let wanted = [path.to_string(), format!("{}.{}", path, DEFAULT_EXTENSION)];

        match case {
            Case::Sensitive => wanted
                .into_iter()
                .map(DocumentId::new)
                .find(|doc| self.files.contains(doc)),
            Case::Insensitive => wanted.iter().find_map(|candidate| {
                let candidate = candidate.to_lowercase();
                self.files
                    .iter()
                    .find(|doc| doc.path().to_lowercase() == candidate)
                    .cloned()
            }),
        }
    }

    fn by_suffix(&self, target: &str, source_folder: &str, case: Case) -> Option<DocumentId> {
        if target.is_empty() || target.split('/').any(|s| s == "..") {
            return None;
        }

        let target = case.fold(target);
        let with_ext = format!("{}.{}", target, DEFAULT_EXTENSION);
        let source_folder = case.fold(source_folder);
        let matches = |path: &str, wanted: &str| {
            path == wanted
                || (path.len() > wanted.len()
                    && path.ends_with(wanted)
                    && path.as_bytes()[path.len() - wanted.len() - 1] == b'/')
        };

        let candidates: Vec<&DocumentId> = self
            .files
            .iter()
            .filter(|doc| {
                let path = case.fold(doc.path());
                matches(&path, &target) || matches(&path, &with_ext)
            })
            .collect();

        if let Some(local) = candidates
            .iter()
            .find(|doc| case.fold(doc.folder()) == source_folder)
        {
            return Some((*local).clone());
        }

        // BTreeSet order breaks ties between equally long paths
        candidates
            .into_iter()
            .min_by_key(|doc| doc.path().len())
            .cloned()
    }
}

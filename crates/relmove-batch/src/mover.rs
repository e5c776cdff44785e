//! Single-file mover

use relmove_core::prelude::*;
use relmove_core::utils::parent_folder;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::instrument;

/// Moves one file into a target folder through a [`DocumentStore`]
#[derive(Clone)]
pub struct FileMover {
    store: Arc<dyn DocumentStore>,
    oracle: Arc<dyn MetadataOracle>,
}

impl FileMover {
    /// Create a new mover
    pub fn new(store: Arc<dyn DocumentStore>, oracle: Arc<dyn MetadataOracle>) -> Self {
        Self { store, oracle }
    }

    /// Move `file` into `target_folder`.
    ///
    /// The destination folder is created when missing, before the existing
    /// file check, so a skipped move can still leave a new empty folder
    /// behind. An existing destination file is skipped or replaced according
    /// to `options.skip_file_when_exist`. Store errors propagate unchanged.
    #[instrument(skip(self, options), fields(file = %file), name = "move_file")]
    pub async fn move_file(
        &self,
        file: &DocumentId,
        target_folder: &str,
        options: &MoveOptions,
    ) -> Result<MoveResult> {
        let inlink_files: BTreeSet<DocumentId> =
            self.oracle.outlink_targets(file).into_iter().collect();

        let destination = destination_path(file, target_folder);
        let destination_folder = parent_folder(&destination);

        if self.store.entry_kind(destination_folder).await? != Some(EntryKind::Folder) {
            self.store.mkdir_all(destination_folder).await?;
        }

        let exists = self.store.entry_kind(&destination).await? == Some(EntryKind::File);
        if exists && options.skip_file_when_exist {
            log::info!("Skipped {}: {} already exists", file, destination);
            return Ok(MoveResult::skipped());
        }

        self.store.rename(file, &destination).await?;

        if exists {
            log::info!("Moved {} -> {} (replaced existing file)", file, destination);
        } else {
            log::info!("Moved {} -> {}", file, destination);
        }

        Ok(MoveResult::moved(exists, inlink_files))
    }
}

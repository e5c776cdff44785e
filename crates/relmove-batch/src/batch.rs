//! Batch moves: a file together with the files it links to

use crate::mover::FileMover;
use crate::selection::SelectionState;
use async_trait::async_trait;
use relmove_core::prelude::*;
use relmove_core::BatchTracker;
use relmove_graph::{GraphStats, build_related_files};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::instrument;

/// The point where a batch waits for the user.
///
/// Receives the initial [`SelectionState`] and resolves to the confirmed
/// selection, or `None` when the user cancels.
#[async_trait]
pub trait SelectionPrompt: Send + Sync {
    async fn select(&self, state: SelectionState) -> Result<Option<BTreeSet<DocumentId>>>;
}

/// Confirms the initial selection without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl SelectionPrompt for AutoConfirm {
    async fn select(&self, state: SelectionState) -> Result<Option<BTreeSet<DocumentId>>> {
        Ok(state.confirm())
    }
}

/// One file of a dry run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMove {
    pub file: DocumentId,
    pub destination: String,
    pub reference: ReferenceInfo,
    /// Part of the initial selection
    pub selected: bool,
    /// A file already sits at the destination
    pub destination_exists: bool,
    /// Files in the batch that link here
    pub backlinks: Vec<DocumentId>,
}

/// What a batch move would do, computed without touching the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    pub target_folder: String,
    pub moves: Vec<PlannedMove>,
    pub stats: GraphStats,
}

/// Moves a file and, optionally, the files it links to
pub struct BatchMover {
    store: Arc<dyn DocumentStore>,
    oracle: Arc<dyn MetadataOracle>,
    mover: FileMover,
}

impl BatchMover {
    /// Create a new batch mover
    pub fn new(store: Arc<dyn DocumentStore>, oracle: Arc<dyn MetadataOracle>) -> Self {
        let mover = FileMover::new(store.clone(), oracle.clone());
        Self {
            store,
            oracle,
            mover,
        }
    }

    /// Move a single file, ignoring its links
    pub async fn move_file(
        &self,
        file: &DocumentId,
        target_folder: &str,
        options: &MoveOptions,
    ) -> Result<MoveResult> {
        self.mover.move_file(file, target_folder, options).await
    }

    /// Move `file` into `target_folder`.
    ///
    /// Without `include_inlinks` only `file` moves. Otherwise every file
    /// reachable through its links is discovered, `prompt` decides which of
    /// them move, and the rest count as skipped. A cancelled prompt counts
    /// every discovered file as skipped.
    pub async fn move_with_inlinks(
        &self,
        file: &DocumentId,
        target_folder: &str,
        options: &MoveOptions,
        prompt: &dyn SelectionPrompt,
    ) -> Result<BatchMoveResult> {
        let mut result = BatchMoveResult::default();
        self.move_with_inlinks_into(file, target_folder, options, prompt, &mut result)
            .await?;
        Ok(result)
    }

    /// Same as [`BatchMover::move_with_inlinks`], accumulating into
    /// `result` so the counts reached before a store error stay available
    /// to the caller.
    #[instrument(
        skip(self, options, prompt, result),
        fields(file = %file, batch_id = tracing::field::Empty),
        name = "move_with_inlinks"
    )]
    pub async fn move_with_inlinks_into(
        &self,
        file: &DocumentId,
        target_folder: &str,
        options: &MoveOptions,
        prompt: &dyn SelectionPrompt,
        result: &mut BatchMoveResult,
    ) -> Result<()> {
        let tracker = BatchTracker::new();
        tracing::Span::current().record("batch_id", tracker.batch_id());

        if !options.include_inlinks {
            let single = self.mover.move_file(file, target_folder, options).await?;
            result.record(&single);
            log_finished(&tracker, result);
            return Ok(());
        }

        let related = build_related_files(file, self.oracle.as_ref());
        log::info!(
            "Batch {}: {} files discovered from {}",
            tracker.batch_id(),
            related.len(),
            file
        );

        let state = SelectionState::new(related.file_infos.clone());
        let Some(selected) = prompt.select(state).await? else {
            log::info!("Batch {} cancelled", tracker.batch_id());
            *result = BatchMoveResult::all_skipped(related.len());
            return Ok(());
        };

        for info in &related.file_infos {
            if !selected.contains(&info.file) {
                log::debug!("Not selected: {}", info.file);
                result.record_unselected();
                continue;
            }

            match self.mover.move_file(&info.file, target_folder, options).await {
                Ok(single) => result.record(&single),
                Err(e) => {
                    log::warn!(
                        "Batch {} stopped at {} after {} moved, {} skipped: {}",
                        tracker.batch_id(),
                        info.file,
                        result.moved_count,
                        result.skipped_count,
                        e
                    );
                    return Err(e);
                }
            }
        }

        log_finished(&tracker, result);
        Ok(())
    }

    /// Dry run: what [`BatchMover::move_with_inlinks`] would move with the
    /// initial selection. Nothing is created or renamed.
    pub async fn plan(
        &self,
        file: &DocumentId,
        target_folder: &str,
        include_inlinks: bool,
    ) -> Result<MovePlan> {
        let related = build_related_files(file, self.oracle.as_ref());
        let stats = related.graph().stats();

        let infos: Vec<FileMoveInfo> = if include_inlinks {
            related.file_infos
        } else {
            related.file_infos.into_iter().take(1).collect()
        };

        let mut moves = Vec::with_capacity(infos.len());
        for info in infos {
            let destination = destination_path(&info.file, target_folder);
            let destination_exists =
                self.store.entry_kind(&destination).await? == Some(EntryKind::File);
            moves.push(PlannedMove {
                reference: info.reference_info(),
                selected: !include_inlinks || !info.needs_confirmation(),
                destination,
                destination_exists,
                backlinks: info.backlinks,
                file: info.file,
            });
        }

        Ok(MovePlan {
            target_folder: target_folder.to_string(),
            moves,
            stats,
        })
    }
}

fn log_finished(tracker: &BatchTracker, result: &BatchMoveResult) {
    log::info!(
        "Batch {} finished in {}ms: moved={}, skipped={}, replaced={}",
        tracker.batch_id(),
        tracker.elapsed_ms(),
        result.moved_count,
        result.skipped_count,
        result.replaced_count
    );
}

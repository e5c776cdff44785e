//! # Batch Moves
//!
//! Moves a note into another folder together with the files it links to.
//!
//! - [`FileMover`] moves one file: destination routing, folder creation and
//!   the skip/replace policy for existing files
//! - [`SelectionState`] tracks which discovered files take part, with
//!   independent, related and cascade toggling
//! - [`BatchMover`] discovers related files, waits on a [`SelectionPrompt`]
//!   and moves the selection one file at a time, in discovery order
//!
//! Store errors stop the batch and propagate unchanged. Files already moved
//! stay moved and created folders stay in place.
//!
//! ```no_run
//! use relmove_batch::{AutoConfirm, BatchMover};
//! use relmove_core::prelude::*;
//! use relmove_vault::VaultManager;
//! use std::sync::Arc;
//!
//! # async fn example(config: RelmoveConfig) -> Result<()> {
//! let vault = Arc::new(VaultManager::new(config)?);
//! vault.initialize().await?;
//!
//! let batch = BatchMover::new(vault.clone(), vault.clone());
//! let options = MoveOptions::new().include_inlinks(true);
//! let result = batch
//!     .move_with_inlinks(&DocumentId::new("inbox/idea.md"), "projects", &options, &AutoConfirm)
//!     .await?;
//! println!("moved {}", result.moved_count);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod mover;
pub mod selection;

#[cfg(test)]
mod testing;

pub use batch::{AutoConfirm, BatchMover, MovePlan, PlannedMove, SelectionPrompt};
pub use mover::FileMover;
pub use selection::{SelectionState, SelectionSummary};

//! Command implementations behind the CLI, usable without a terminal

use crate::messages::Messages;
use relmove_batch::{BatchMover, MovePlan, SelectionPrompt};
use relmove_core::prelude::*;
use relmove_vault::VaultManager;
use std::sync::Arc;
use tracing::instrument;

/// Counts of a finished or interrupted move
#[derive(Debug)]
pub struct MoveReport {
    pub result: BatchMoveResult,
    /// Set when a store error stopped the move
    pub error: Option<Error>,
}

impl MoveReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The result notice, preceded by the error message when the move failed
    pub fn notice(&self, messages: &Messages) -> String {
        match &self.error {
            None => messages.result_notice(&self.result),
            Some(e) => format!(
                "{}\n{}",
                messages.error_notice(e),
                messages.result_notice(&self.result)
            ),
        }
    }
}

/// An initialised vault plus the movers working on it
pub struct App {
    vault: Arc<VaultManager>,
    batch: BatchMover,
    options: MoveOptions,
    messages: &'static Messages,
}

impl App {
    /// Scan the configured vault
    pub async fn open(config: RelmoveConfig) -> Result<Self> {
        let options = config.move_options();
        let messages = Messages::for_language(&config.language);

        let vault = Arc::new(VaultManager::new(config)?);
        vault.initialize().await?;

        let batch = BatchMover::new(vault.clone(), vault.clone());
        Ok(Self {
            vault,
            batch,
            options,
            messages,
        })
    }

    pub fn vault(&self) -> &Arc<VaultManager> {
        &self.vault
    }

    /// Move options from configuration
    pub fn options(&self) -> MoveOptions {
        self.options
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    /// Look up a vault-relative file path
    pub fn resolve_file(&self, path: &str) -> Result<DocumentId> {
        self.vault
            .resolve_path(path)
            .ok_or_else(|| Error::file_not_found(path))
    }

    /// Move `file` into `folder`; the report keeps the counts reached
    /// before an error.
    #[instrument(skip(self, options, prompt), name = "cli_move")]
    pub async fn move_file(
        &self,
        file: &str,
        folder: &str,
        options: &MoveOptions,
        prompt: &dyn SelectionPrompt,
    ) -> MoveReport {
        let mut result = BatchMoveResult::default();
        let error = match self.resolve_file(file) {
            Ok(doc) => self
                .batch
                .move_with_inlinks_into(&doc, folder, options, prompt, &mut result)
                .await
                .err(),
            Err(e) => Some(e),
        };

        if let Some(e) = &error {
            log::error!("Moving {} to {} failed: {}", file, folder, e);
        }
        MoveReport { result, error }
    }

    /// Dry run of a move
    pub async fn plan(&self, file: &str, folder: &str, include_inlinks: bool) -> Result<MovePlan> {
        let doc = self.resolve_file(file)?;
        self.batch.plan(&doc, folder, include_inlinks).await
    }

    /// Folder suggestions for a target folder query
    pub fn folders(&self, query: &str) -> Vec<String> {
        self.vault.suggest_folders(query)
    }
}

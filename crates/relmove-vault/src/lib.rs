//! # relmove Vault
//!
//! Filesystem-backed vault for relmove. One [`VaultManager`] is both the
//! [`DocumentStore`](relmove_core::DocumentStore) the movers write through
//! and the [`MetadataOracle`](relmove_core::MetadataOracle) the graph
//! builder reads from.
//!
//! - Scans every file below the vault root (attachments included), skipping
//!   configured excluded names such as `.obsidian`
//! - Parses markdown files for links and embeds
//! - Resolves link text to files ([`LinkResolver`])
//! - Creates folders and renames files, keeping its index current
//! - Lists folders for target selection
//!
//! ```no_run
//! use relmove_core::prelude::*;
//! use relmove_vault::VaultManager;
//!
//! # async fn example() -> Result<()> {
//! let mut config = RelmoveConfig::new();
//! config.vault = Some(VaultConfig::builder("notes", "/path/to/vault").build()?);
//!
//! let vault = VaultManager::new(config)?;
//! vault.initialize().await?;
//!
//! for folder in vault.suggest_folders("proj") {
//!     println!("{}", folder);
//! }
//! # Ok(())
//! # }
//! ```

pub mod manager;
pub mod resolve;

pub use manager::{ROOT_FOLDER, VaultManager};
pub use resolve::LinkResolver;

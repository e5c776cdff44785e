//! # relmove Core
//!
//! Core handles, result types, configuration and collaborator traits for
//! moving notes together with the files they link to.
//! This crate defines the canonical types that all other crates depend on.
//!
//! ## Architecture Principles
//!
//! - **Handles, not objects**: documents are [`DocumentId`]s keyed by vault path
//! - **Zero Panic in Libraries**: All errors are `Result<T, Error>`
//! - **Collaborators behind traits**: storage and link metadata come from
//!   [`DocumentStore`] and [`MetadataOracle`] implementations
//! - **Builder Pattern for Configuration**: [`VaultConfig::builder`]
//!
//! ## Core Modules
//!
//! - [`models`] - Document handles, move records and results
//! - [`destination`] - Where a moved document ends up
//! - [`store`] - Document store and metadata oracle interfaces
//! - [`error`] - Error type and Result alias
//! - [`config`] - Configuration structures
//! - [`utils`] - Path helpers and batch tracking
//!
//! ## Usage Examples
//!
//! ```
//! use relmove_core::prelude::*;
//!
//! let note = DocumentId::new("inbox/idea.md");
//! let image = DocumentId::new("inbox/sketch.png");
//!
//! assert_eq!(destination_path(&note, "projects"), "projects/idea.md");
//! assert_eq!(destination_path(&image, "projects"), "projects/assets/sketch.png");
//! ```

pub mod config;
pub mod destination;
pub mod error;
pub mod models;
pub mod store;
pub mod utils;

pub use config::*;
pub use destination::{ASSETS_FOLDER, destination_path, is_image};
pub use error::{Error, Result};
pub use models::*;
pub use store::{DocumentStore, MetadataOracle};
pub use utils::{BatchTracker, PathValidator};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{RelmoveConfig, VaultConfig};
    pub use crate::destination::{destination_path, is_image};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        BatchMoveResult, DocumentId, DocumentKind, DocumentLinks, EntryKind, FileMoveInfo,
        LinkRef, MoveOptions, MoveResult, ReferenceInfo, ResolvedLinks,
    };
    pub use crate::store::{DocumentStore, MetadataOracle};
}

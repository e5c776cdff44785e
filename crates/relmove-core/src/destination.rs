//! Destination routing for moved documents.
//!
//! Images land in an `assets` subfolder of the target folder, everything
//! else lands in the target folder itself.

use crate::models::{DocumentId, DocumentKind};
use crate::utils::{join_path, normalize_path};

/// Subfolder that receives image files
pub const ASSETS_FOLDER: &str = "assets";

/// Whether the document is routed as an image
pub fn is_image(file: &DocumentId) -> bool {
    file.kind() == DocumentKind::Image
}

/// Compute where `file` goes when moved into `folder`.
///
/// `folder` is vault-relative and need not exist. A trailing slash or the
/// vault root (`""`, `"/"`) is normalised first.
pub fn destination_path(file: &DocumentId, folder: &str) -> String {
    let folder = normalize_path(folder);
    if is_image(file) {
        join_path(&join_path(&folder, ASSETS_FOLDER), file.name())
    } else {
        join_path(&folder, file.name())
    }
}

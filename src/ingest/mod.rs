//! Document ingest — reading raw documents off disk
//!
//! A document is one UTF-8 file, read whole. There is no sniffing and no
//! lossy decoding: a missing path and an invalid byte sequence are errors
//! the caller sees immediately, the latter with the offset of the first
//! offending byte so the file can be fixed rather than guessed at.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{MimesisError, MimesisResult};

/// Reads one document into memory, requiring valid UTF-8.
///
/// # Errors
/// * `NotFound` when the path does not exist.
/// * `Encoding` when the bytes are not valid UTF-8.
/// * `Io` for any other read failure.
pub fn read_document(path: &Path) -> MimesisResult<String> {
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => MimesisError::NotFound(path.to_path_buf()),
        _ => MimesisError::Io(err),
    })?;
    let text = String::from_utf8(bytes).map_err(|err| MimesisError::Encoding {
        path: path.to_path_buf(),
        offset: err.utf8_error().valid_up_to(),
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read document");
    Ok(text)
}

// ─── Tests ─────────────────────────────────────────────────────────

//! # mimesis — two-stage document similarity scorer
//!
//! Estimates how much of a candidate document reproduces a reference
//! document, producing a 0–100 score. The expensive part — an exact
//! longest-common-subsequence alignment, O(m·n) in both time and memory —
//! only runs for pairs that first clear a cheap MinHash admission filter.
//!
//! ## Pipeline
//!
//! ```text
//!  reference ──┐
//!              ├─► tokenize ─► sketch ─► slot agreement = estimate E
//!  candidate ──┘                                  │
//!                              E < threshold ─────┼──► score 0.00
//!                              E ≥ threshold ─────┘
//!                                  │
//!                                  ▼
//!                     exact LCS over chars (ceiling + deadline)
//!                                  │
//!                                  ▼
//!                     score = 100 · LCS / len(candidate)
//! ```
//!
//! The normalization is deliberately asymmetric: the score answers "what
//! fraction of the *candidate* reproduces reference content", which is the
//! question a plagiarism check asks of a suspect document.
//!
//! ## Layers
//!
//! - [`tokenize`] — deterministic UAX#29 word segmentation
//! - [`sketch`] — MinHash signatures and their Jaccard slot agreement
//! - [`align`] — exact LCS with an allocation ceiling and a deadline
//! - [`engine`] — the admission-then-confirmation policy and its config
//! - [`ingest`] — UTF-8 document reading
//! - [`report`] — score line / JSON breakdown rendering

pub mod align;
pub mod engine;
pub mod ingest;
pub mod report;
pub mod sketch;
pub mod tokenize;

// Re-exports for convenience
pub use align::{lcs_length, AlignLimits};
pub use engine::{Breakdown, MimesisConfig, MimesisEngine};
pub use report::{render_report, write_report, ReportFormat};
pub use sketch::{Sketch, SketchBuilder};

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MimesisError {
    /// Programming-contract violation: zero permutation count, mismatched
    /// sketch widths, out-of-range admission threshold.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The alignment table would exceed the configured cell ceiling.
    #[error("alignment table needs {cells} cells, ceiling is {limit} (raise max_table_cells to allow)")]
    ResourceExceeded { cells: u128, limit: u64 },

    /// The aligner's cooperative deadline fired mid-computation.
    #[error("alignment abandoned after {elapsed:?}: deadline exceeded")]
    DeadlineExceeded { elapsed: Duration },

    /// Input document does not exist.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Input document is not valid UTF-8.
    #[error("document {path} is not valid UTF-8 (first invalid byte at offset {offset})")]
    Encoding { path: PathBuf, offset: usize },

    /// Breakdown could not be serialized for the JSON report.
    #[error("report serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MimesisResult<T> = Result<T, MimesisError>;

//! Comparison engine — configuration, admission policy, and scoring
//!
//! Ties the two stages together for one document pair:
//!
//! 1. tokenize both documents and sketch their token sets
//! 2. estimate Jaccard similarity from the sketches
//! 3. below the admission threshold: report 0.0 and never touch the aligner
//! 4. at or above it: confirm with an exact LCS and normalize the length
//!    against the candidate's size
//!
//! The asymmetry is intentional. The filter is cheap and symmetric; the
//! confirmation is expensive and normalized by the candidate alone, so the
//! score reads as "how much of the candidate is covered by the reference".

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::align::{self, AlignLimits, DEFAULT_MAX_TABLE_CELLS};
use crate::sketch::{SketchBuilder, DEFAULT_PERMUTATIONS};
use crate::tokenize;
use crate::{MimesisError, MimesisResult};

/// Default admission threshold: estimated Jaccard below this skips alignment.
pub const DEFAULT_ADMISSION_THRESHOLD: f64 = 0.5;

// ─── Configuration ─────────────────────────────────────────────────

/// Tunable knobs for one engine, loadable from a TOML file.
///
/// Every field has a default, so a config file only needs to name what it
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MimesisConfig {
    /// Sketch width: number of independent hash permutations.
    #[serde(default = "default_permutations")]
    pub permutations: usize,
    /// Estimates below this never reach the aligner.
    #[serde(default = "default_admission_threshold")]
    pub admission_threshold: f64,
    /// Largest alignment table the aligner may allocate, in cells.
    #[serde(default = "default_max_table_cells")]
    pub max_table_cells: u64,
    /// Wall-clock budget for the alignment stage, in milliseconds.
    /// Absent means unbounded.
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}

impl Default for MimesisConfig {
    fn default() -> Self {
        Self {
            permutations: default_permutations(),
            admission_threshold: default_admission_threshold(),
            max_table_cells: default_max_table_cells(),
            deadline_ms: None,
        }
    }
}

impl MimesisConfig {
    /// Loads a config from a TOML file, filling unnamed fields with
    /// defaults and validating the result.
    pub fn from_file(path: &Path) -> MimesisResult<Self> {
        let raw = fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => MimesisError::NotFound(path.to_path_buf()),
            _ => MimesisError::Io(err),
        })?;
        let config: Self = toml::from_str(&raw).map_err(|err| {
            MimesisError::InvalidArgument(format!("config {}: {err}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the field invariants the types alone cannot express.
    pub fn validate(&self) -> MimesisResult<()> {
        if self.permutations == 0 {
            return Err(MimesisError::InvalidArgument(
                "permutations must be at least 1".into(),
            ));
        }
        if !self.admission_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.admission_threshold)
        {
            return Err(MimesisError::InvalidArgument(format!(
                "admission threshold must be in [0.0, 1.0], got {}",
                self.admission_threshold
            )));
        }
        Ok(())
    }
}

fn default_permutations() -> usize {
    DEFAULT_PERMUTATIONS
}

fn default_admission_threshold() -> f64 {
    DEFAULT_ADMISSION_THRESHOLD
}

fn default_max_table_cells() -> u64 {
    DEFAULT_MAX_TABLE_CELLS
}

// ─── Breakdown ─────────────────────────────────────────────────────

/// Everything one comparison produced, not just the headline score.
///
/// `lcs_length` is `None` when the admission filter rejected the pair —
/// the aligner genuinely never ran, as opposed to running and finding 0.
#[derive(Debug, Clone, Serialize)]
pub struct Breakdown {
    pub reference_tokens: usize,
    pub candidate_tokens: usize,
    pub estimate: f64,
    pub admitted: bool,
    pub lcs_length: Option<usize>,
    pub candidate_chars: usize,
    pub score: f64,
    /// Wall-clock cost of the whole comparison. Diagnostic only; the
    /// score itself is independent of time.
    pub elapsed_ms: u64,
}

// ─── Engine ────────────────────────────────────────────────────────

/// A configured comparison engine.
///
/// Construction derives the hash permutations once; `compare` can then be
/// called for any number of pairs, each scored under the same policy.
#[derive(Debug, Clone)]
pub struct MimesisEngine {
    config: MimesisConfig,
    builder: SketchBuilder,
}

impl MimesisEngine {
    /// Builds an engine from a validated config.
    pub fn new(config: MimesisConfig) -> MimesisResult<Self> {
        config.validate()?;
        let builder = SketchBuilder::new(config.permutations)?;
        Ok(Self { config, builder })
    }

    pub fn config(&self) -> &MimesisConfig {
        &self.config
    }

    /// Scores one document pair: 0.0 to 100.0, higher means more of the
    /// candidate is covered by the reference.
    ///
    /// # Errors
    /// `ResourceExceeded` or `DeadlineExceeded` when the pair passes the
    /// admission filter but the alignment blows its budget. Rejected pairs
    /// cannot produce either: the aligner never runs for them.
    pub fn compare(&self, reference: &str, candidate: &str) -> MimesisResult<Breakdown> {
        let started = Instant::now();
        let reference_tokens = tokenize::words(reference);
        let candidate_tokens = tokenize::words(candidate);
        debug!(
            reference_tokens = reference_tokens.len(),
            candidate_tokens = candidate_tokens.len(),
            "tokenized pair"
        );

        let reference_sketch = self.builder.build(&reference_tokens);
        let candidate_sketch = self.builder.build(&candidate_tokens);
        let estimate = reference_sketch.agreement(&candidate_sketch)?;
        let admitted = estimate >= self.config.admission_threshold;
        debug!(
            estimate,
            threshold = self.config.admission_threshold,
            admitted,
            "admission filter"
        );

        let mut breakdown = Breakdown {
            reference_tokens: reference_tokens.len(),
            candidate_tokens: candidate_tokens.len(),
            estimate,
            admitted,
            lcs_length: None,
            candidate_chars: candidate.chars().count(),
            score: 0.0,
            elapsed_ms: 0,
        };
        if !admitted {
            breakdown.elapsed_ms = started.elapsed().as_millis() as u64;
            return Ok(breakdown);
        }

        let length = align::lcs_length(reference, candidate, &self.align_limits())?;
        breakdown.lcs_length = Some(length);
        // Two empty documents sketch identically and pass the filter, but
        // there is nothing to normalize against: the score stays 0.0.
        if breakdown.candidate_chars > 0 {
            breakdown.score = 100.0 * length as f64 / breakdown.candidate_chars as f64;
        }
        breakdown.elapsed_ms = started.elapsed().as_millis() as u64;
        debug!(
            lcs = length,
            score = breakdown.score,
            elapsed_ms = breakdown.elapsed_ms,
            "alignment confirmed"
        );
        Ok(breakdown)
    }

    fn align_limits(&self) -> AlignLimits {
        AlignLimits {
            max_table_cells: self.config.max_table_cells,
            deadline: self
                .config
                .deadline_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────

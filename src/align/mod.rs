//! Exact alignment — the confirmation half of the pipeline
//!
//! Computes the longest common subsequence of two documents over `char`
//! units (Unicode scalar values) with the classic full-table dynamic
//! program. No heuristics and no sampling: when this layer runs, its
//! answer is exact.
//!
//! Exactness is paid for in memory and time, so both are bounded up
//! front: the (m+1)·(n+1) cell table is never allocated past a
//! configured ceiling, and an optional deadline is checked once per
//! table row so a runaway comparison abandons within one row's worth of
//! work.

use std::time::Instant;

use crate::{MimesisError, MimesisResult};

/// Default cell ceiling: 2^28 cells of `u32`, about 1 GiB of table.
pub const DEFAULT_MAX_TABLE_CELLS: u64 = 1 << 28;

/// Resource bounds for one alignment.
#[derive(Debug, Clone, Copy)]
pub struct AlignLimits {
    /// Largest (m+1)·(n+1) table the aligner may allocate, in cells.
    pub max_table_cells: u64,
    /// Absolute point in time past which the aligner abandons work.
    pub deadline: Option<Instant>,
}

impl Default for AlignLimits {
    fn default() -> Self {
        Self {
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            deadline: None,
        }
    }
}

/// Exact longest-common-subsequence length of `reference` and `candidate`,
/// counted in `char` units.
///
/// Symmetric in its two documents. Either side empty is answered as 0
/// without touching the table, so the limits only come into play when
/// there is real work to bound.
///
/// # Errors
/// * `ResourceExceeded` when the table would need more cells than
///   `limits.max_table_cells`. Nothing is allocated in that case.
/// * `DeadlineExceeded` when `limits.deadline` passes mid-computation.
///   The check runs once per outer row, so overshoot is bounded by one
///   row of work.
pub fn lcs_length(
    reference: &str,
    candidate: &str,
    limits: &AlignLimits,
) -> MimesisResult<usize> {
    let left: Vec<char> = reference.chars().collect();
    let right: Vec<char> = candidate.chars().collect();
    if left.is_empty() || right.is_empty() {
        return Ok(0);
    }

    let rows = left.len() + 1;
    let cols = right.len() + 1;
    let cells = rows as u128 * cols as u128;
    if cells > u128::from(limits.max_table_cells) {
        return Err(MimesisError::ResourceExceeded {
            cells,
            limit: limits.max_table_cells,
        });
    }

    let started = Instant::now();
    // u32 cells suffice: the length never exceeds the shorter document,
    // and any table under the ceiling keeps that side far below u32::MAX.
    let mut table = vec![0u32; rows * cols];
    for (i, &a) in left.iter().enumerate() {
        if let Some(deadline) = limits.deadline {
            if Instant::now() >= deadline {
                return Err(MimesisError::DeadlineExceeded {
                    elapsed: started.elapsed(),
                });
            }
        }
        for (j, &b) in right.iter().enumerate() {
            table[(i + 1) * cols + (j + 1)] = if a == b {
                table[i * cols + j] + 1
            } else {
                table[i * cols + j + 1].max(table[(i + 1) * cols + j])
            };
        }
    }
    Ok(table[rows * cols - 1] as usize)
}

// ─── Tests ─────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn lcs(a: &str, b: &str) -> usize {
        lcs_length(a, b, &AlignLimits::default()).unwrap()
    }

    #[test]
    fn test_textbook_example() {
        assert_eq!(lcs("abcde", "abzde"), 4);
    }

    #[test]
    fn test_identical_documents_align_fully() {
        assert_eq!(lcs("identical", "identical"), 9);
    }

    #[test]
    fn test_empty_sides_are_zero() {
        assert_eq!(lcs("", "nonempty"), 0);
        assert_eq!(lcs("nonempty", ""), 0);
        assert_eq!(lcs("", ""), 0);
    }

    #[test]
    fn test_no_shared_characters() {
        assert_eq!(lcs("abc", "xyz"), 0);
    }

    #[test]
    fn test_subsequence_need_not_be_contiguous() {
        // Classic pair: the common subsequence is "GTAB".
        assert_eq!(lcs("AGGTAB", "GXTXAYB"), 4);
        assert_eq!(lcs("abcdef", "acf"), 3);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("abcde", "abzde"),
            ("AGGTAB", "GXTXAYB"),
            ("short", "a much longer document"),
        ];
        for (a, b) in pairs {
            assert_eq!(lcs(a, b), lcs(b, a), "asymmetric for {a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_units_are_chars_not_bytes() {
        // "hllo" survives in both: 4 chars even though "héllo" is 6 bytes.
        assert_eq!(lcs("héllo", "hello"), 4);
        assert_eq!(lcs("床前明月光", "床前月光"), 4);
    }

    #[test]
    fn test_ceiling_blocks_oversized_tables() {
        let limits = AlignLimits {
            max_table_cells: 10,
            deadline: None,
        };
        match lcs_length("hello world", "hello there", &limits) {
            Err(MimesisError::ResourceExceeded { cells, limit }) => {
                assert_eq!(cells, 12 * 12);
                assert_eq!(limit, 10);
            }
            other => panic!("expected ResourceExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_ceiling_is_strict_excess_only() {
        // "ab" vs "ab" needs exactly 3·3 = 9 cells.
        let exact = AlignLimits {
            max_table_cells: 9,
            deadline: None,
        };
        assert_eq!(lcs_length("ab", "ab", &exact).unwrap(), 2);
        let short = AlignLimits {
            max_table_cells: 8,
            deadline: None,
        };
        assert!(matches!(
            lcs_length("ab", "ab", &short),
            Err(MimesisError::ResourceExceeded { .. })
        ));
    }

    #[test]
    fn test_empty_side_bypasses_ceiling() {
        let limits = AlignLimits {
            max_table_cells: 0,
            deadline: None,
        };
        assert_eq!(lcs_length("", "any length at all", &limits).unwrap(), 0);
    }

    #[test]
    fn test_expired_deadline_abandons_alignment() {
        let limits = AlignLimits {
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            deadline: Some(
                Instant::now()
                    .checked_sub(Duration::from_millis(10))
                    .unwrap(),
            ),
        };
        assert!(matches!(
            lcs_length("abc", "abc", &limits),
            Err(MimesisError::DeadlineExceeded { .. })
        ));
    }

    #[test]
    fn test_generous_deadline_is_harmless() {
        let limits = AlignLimits {
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            deadline: Some(Instant::now() + Duration::from_secs(60)),
        };
        assert_eq!(lcs_length("abcde", "abzde", &limits).unwrap(), 4);
    }
}

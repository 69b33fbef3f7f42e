//! Bound policy: the size ceilings every chunk must respect.
//!
//! ## The Problem
//!
//! Embedding models impose two independent limits:
//!
//! - A **token** limit (the model's context window)
//! - A **character** limit (request payload caps, storage row caps)
//!
//! A chunk can violate either one alone. 7 000 characters of dense prose
//! is ~1 750 estimated tokens — over a 1 600-token ceiling. 6 000
//! characters of the same prose is ~1 500 tokens — under both. So every
//! bound check in this crate tests both ceilings.
//!
//! ## Target vs Max
//!
//! Like a flexible chunk capacity, the policy separates the size we aim
//! for from the size we refuse to exceed:
//!
//! - `target_tokens`: the packer flushes a chunk as soon as it reaches
//!   this, keeping chunk sizes roughly uniform.
//! - `max_tokens` / `max_chars`: hard ceilings. Never exceeded, even if
//!   that means slicing mid-paragraph.
//!
//! ```text
//! tokens:  0 ───────── target (flush here) ───── max (never cross)
//!                 │◄── typical chunk ──►│
//! ```
//!
//! ## Token Estimation
//!
//! Real tokenizers are model-specific and slow. This pipeline makes no
//! model calls, so it uses the standard ~4-characters-per-token
//! heuristic: `ceil(len / 4)`, floored at 1. The same estimator runs
//! during packing and during the final guardrail pass, so a chunk
//! accepted while packing can never be rejected later for the same text.

/// Size ceilings and packing target for one chunking invocation.
///
/// Immutable and `Copy`: callers inject a policy per call (diagnostic
/// tooling passes tightened policies to explore other bound regimes),
/// and the pipeline holds no state between calls.
///
/// # Examples
///
/// ```rust
/// use quarry::BoundPolicy;
///
/// let policy = BoundPolicy::default();
/// assert_eq!(policy.target_tokens(), 1000);
/// assert_eq!(policy.max_tokens(), 1600);
/// assert_eq!(policy.max_chars(), 7000);
///
/// // Tightened variant for experiments
/// let tight = BoundPolicy::default().with_max_tokens(400).unwrap();
/// assert_eq!(tight.max_tokens(), 400);
/// assert_eq!(tight.target_tokens(), 400); // target clamps down
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundPolicy {
    target_tokens: usize,
    max_tokens: usize,
    max_chars: usize,
    chars_per_token: usize,
}

impl BoundPolicy {
    /// The soft packing target: chunks flush once they reach this.
    #[must_use]
    pub const fn target_tokens(&self) -> usize {
        self.target_tokens
    }

    /// The estimated-token ceiling. Hard invariant on every chunk.
    #[must_use]
    pub const fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// The character ceiling. Hard invariant on every chunk.
    #[must_use]
    pub const fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// The character-to-token ratio used by [`estimate_tokens`].
    ///
    /// [`estimate_tokens`]: BoundPolicy::estimate_tokens
    #[must_use]
    pub const fn chars_per_token(&self) -> usize {
        self.chars_per_token
    }

    /// Replace the packing target.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` is zero or exceeds `max_tokens`.
    pub fn with_target_tokens(self, target: usize) -> Result<Self, BoundError> {
        if target == 0 {
            return Err(BoundError::Zero {
                field: "target_tokens",
            });
        }
        if target > self.max_tokens {
            return Err(BoundError::TargetExceedsMax {
                target,
                max: self.max_tokens,
            });
        }
        Ok(Self {
            target_tokens: target,
            ..self
        })
    }

    /// Replace the token ceiling. The target clamps down to stay valid.
    ///
    /// # Errors
    ///
    /// Returns an error if `max` is zero.
    pub fn with_max_tokens(self, max: usize) -> Result<Self, BoundError> {
        if max == 0 {
            return Err(BoundError::Zero {
                field: "max_tokens",
            });
        }
        Ok(Self {
            max_tokens: max,
            target_tokens: self.target_tokens.min(max),
            ..self
        })
    }

    /// Replace the character ceiling.
    ///
    /// # Errors
    ///
    /// Returns an error if `max` is zero.
    pub fn with_max_chars(self, max: usize) -> Result<Self, BoundError> {
        if max == 0 {
            return Err(BoundError::Zero { field: "max_chars" });
        }
        Ok(Self {
            max_chars: max,
            ..self
        })
    }

    /// Estimate the token count of `text`: `ceil(len / ratio)`, min 1.
    ///
    /// Deterministic and total — whitespace-only and empty input both
    /// estimate to 1.
    #[must_use]
    pub const fn estimate_tokens(&self, text: &str) -> usize {
        self.tokens_for_len(text.len())
    }

    /// Token estimate for a hypothetical text of `len` bytes.
    ///
    /// Lets the packer price a tentative join without building the
    /// joined string.
    #[must_use]
    pub const fn tokens_for_len(&self, len: usize) -> usize {
        let estimate = len.div_ceil(self.chars_per_token);
        if estimate == 0 {
            1
        } else {
            estimate
        }
    }

    /// Whether `text` satisfies both ceilings.
    #[must_use]
    pub fn fits(&self, text: &str) -> bool {
        !self.exceeds_len(text.len())
    }

    /// Whether a text of `len` bytes would violate either ceiling.
    #[must_use]
    pub const fn exceeds_len(&self, len: usize) -> bool {
        self.tokens_for_len(len) > self.max_tokens || len > self.max_chars
    }

    /// Derive a policy with a reduced token ceiling, clamping the
    /// target down with it. Never grows the ceiling and never reaches
    /// zero.
    pub(crate) fn shrink_max_tokens(self, max: usize) -> Self {
        let max = max.clamp(1, self.max_tokens);
        Self {
            max_tokens: max,
            target_tokens: self.target_tokens.min(max),
            ..self
        }
    }

    /// The widest slice the hard character slicer may take in one bite.
    #[must_use]
    pub const fn hard_slice_len(&self) -> usize {
        let token_limit = self.max_tokens.saturating_mul(self.chars_per_token);
        if token_limit < self.max_chars {
            token_limit
        } else {
            self.max_chars
        }
    }
}

impl Default for BoundPolicy {
    fn default() -> Self {
        Self {
            target_tokens: 1000,
            max_tokens: 1600,
            max_chars: 7000,
            chars_per_token: 4,
        }
    }
}

/// Error when configuring a bound policy.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BoundError {
    /// The packing target must not exceed the token ceiling.
    #[error("target_tokens ({target}) must be <= max_tokens ({max})")]
    TargetExceedsMax {
        /// The requested target.
        target: usize,
        /// The ceiling it exceeded.
        max: usize,
    },

    /// Bound fields must be positive.
    #[error("{field} must be > 0")]
    Zero {
        /// The offending field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let policy = BoundPolicy::default();
        assert_eq!(policy.target_tokens(), 1000);
        assert_eq!(policy.max_tokens(), 1600);
        assert_eq!(policy.max_chars(), 7000);
        assert_eq!(policy.chars_per_token(), 4);
    }

    #[test]
    fn test_estimate_rounds_up() {
        let policy = BoundPolicy::default();
        assert_eq!(policy.estimate_tokens("abcd"), 1);
        assert_eq!(policy.estimate_tokens("abcde"), 2);
        assert_eq!(policy.estimate_tokens(&"x".repeat(4000)), 1000);
    }

    #[test]
    fn test_estimate_floors_at_one() {
        let policy = BoundPolicy::default();
        assert_eq!(policy.estimate_tokens(""), 1);
        assert_eq!(policy.estimate_tokens(" "), 1);
        assert_eq!(policy.estimate_tokens("ab"), 1);
    }

    #[test]
    fn test_fits_checks_both_ceilings() {
        // 100 tokens but only 300 chars allowed: char ceiling binds first
        let policy = BoundPolicy::default()
            .with_max_tokens(100)
            .unwrap()
            .with_max_chars(300)
            .unwrap();

        assert!(policy.fits(&"x".repeat(300)));
        assert!(!policy.fits(&"x".repeat(301))); // chars exceeded
        // 400 chars would be exactly 100 tokens, but chars bind at 300
        assert!(!policy.fits(&"x".repeat(400)));
    }

    #[test]
    fn test_hard_slice_len_takes_tighter_ceiling() {
        let policy = BoundPolicy::default();
        // 1600 tokens * 4 = 6400 < 7000 chars
        assert_eq!(policy.hard_slice_len(), 6400);

        let wide = policy.with_max_chars(5000).unwrap();
        assert_eq!(wide.hard_slice_len(), 5000);
    }

    #[test]
    fn test_target_exceeding_max_rejected() {
        let result = BoundPolicy::default().with_target_tokens(2000);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_bounds_rejected() {
        assert!(BoundPolicy::default().with_max_tokens(0).is_err());
        assert!(BoundPolicy::default().with_max_chars(0).is_err());
        assert!(BoundPolicy::default().with_target_tokens(0).is_err());
    }

    #[test]
    fn test_shrinking_max_clamps_target() {
        let policy = BoundPolicy::default().with_max_tokens(500).unwrap();
        assert_eq!(policy.target_tokens(), 500);
        assert_eq!(policy.max_tokens(), 500);
    }
}

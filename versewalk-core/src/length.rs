//! Per-line length targets

use crate::error::{CoreError, Result};
use rand::Rng;

/// Line length used when nothing else is configured
pub const DEFAULT_LINE_LENGTH: usize = 7;

/// How target token counts are assigned to lines
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LengthPolicy {
    /// Same target for every line
    Fixed(usize),
    /// Explicit target per line, in poem order
    List(Vec<usize>),
    /// Uniform sample in `min..=max` per line
    Range {
        /// Smallest target
        min: usize,
        /// Largest target
        max: usize,
    },
}

impl Default for LengthPolicy {
    fn default() -> Self {
        LengthPolicy::Fixed(DEFAULT_LINE_LENGTH)
    }
}

impl LengthPolicy {
    /// Check the policy independently of any poem
    pub fn validate(&self) -> Result<()> {
        match self {
            LengthPolicy::Fixed(0) => Err(invalid("fixed length must be at least 1")),
            LengthPolicy::List(lengths) if lengths.contains(&0) => {
                Err(invalid("every listed length must be at least 1"))
            }
            LengthPolicy::Range { min: 0, .. } => Err(invalid("range minimum must be at least 1")),
            LengthPolicy::Range { min, max } if min > max => Err(invalid(&format!(
                "range minimum {min} exceeds maximum {max}"
            ))),
            _ => Ok(()),
        }
    }

    /// Produce one target per line
    pub fn line_lengths<R: Rng + ?Sized>(
        &self,
        line_count: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        self.validate()?;

        match self {
            LengthPolicy::Fixed(length) => Ok(vec![*length; line_count]),
            LengthPolicy::List(lengths) => {
                if lengths.len() != line_count {
                    return Err(CoreError::LengthMismatch {
                        expected: line_count,
                        found: lengths.len(),
                    });
                }
                Ok(lengths.clone())
            }
            LengthPolicy::Range { min, max } => Ok((0..line_count)
                .map(|_| rng.gen_range(*min..=*max))
                .collect()),
        }
    }
}

fn invalid(reason: &str) -> CoreError {
    CoreError::InvalidLength {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fixed_lengths() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            LengthPolicy::Fixed(6).line_lengths(4, &mut rng).unwrap(),
            vec![6, 6, 6, 6]
        );
    }

    #[test]
    fn test_default_is_seven() {
        assert_eq!(LengthPolicy::default(), LengthPolicy::Fixed(7));
    }

    #[test]
    fn test_list_lengths() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let policy = LengthPolicy::List(vec![2, 3, 4]);
        assert_eq!(policy.line_lengths(3, &mut rng).unwrap(), vec![2, 3, 4]);
        assert_eq!(
            policy.line_lengths(4, &mut rng).unwrap_err(),
            CoreError::LengthMismatch {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_range_lengths_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let lengths = LengthPolicy::Range { min: 3, max: 5 }
            .line_lengths(200, &mut rng)
            .unwrap();
        assert_eq!(lengths.len(), 200);
        assert!(lengths.iter().all(|l| (3..=5).contains(l)));
        assert!(lengths.contains(&3) && lengths.contains(&5));
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let lengths = LengthPolicy::Range { min: 4, max: 4 }
            .line_lengths(3, &mut rng)
            .unwrap();
        assert_eq!(lengths, vec![4, 4, 4]);
    }

    #[test]
    fn test_invalid_policies() {
        assert!(LengthPolicy::Fixed(0).validate().is_err());
        assert!(LengthPolicy::List(vec![3, 0]).validate().is_err());
        assert!(LengthPolicy::Range { min: 0, max: 3 }.validate().is_err());
        assert!(LengthPolicy::Range { min: 5, max: 2 }.validate().is_err());
        assert!(LengthPolicy::Range { min: 2, max: 5 }.validate().is_ok());
    }
}

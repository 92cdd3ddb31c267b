//! Split counters.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

/// Outcome counters of a split.
///
/// Merging is associative and commutative, so per-sheet stats can be
/// combined in any order by parallel workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SplitStats {
    /// Sheets that could not be decoded or classified.
    pub load_errors: usize,
    /// Sprites that could not be encoded or written.
    pub save_errors: usize,
    /// Sprites written.
    pub success: usize,
    /// Invisible sprites (or character rows) that were dropped.
    pub skipped: usize,
}

impl SplitStats {
    /// Stats of a sheet that failed to load.
    pub fn load_error() -> Self {
        Self {
            load_errors: 1,
            ..Self::default()
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            load_errors: self.load_errors + other.load_errors,
            save_errors: self.save_errors + other.save_errors,
            success: self.success + other.success,
            skipped: self.skipped + other.skipped,
        }
    }

    /// True when nothing failed.
    pub fn is_clean(&self) -> bool {
        self.load_errors == 0 && self.save_errors == 0
    }
}

impl Add for SplitStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.merge(other)
    }
}

impl AddAssign for SplitStats {
    fn add_assign(&mut self, other: Self) {
        *self = self.merge(other);
    }
}

impl Sum for SplitStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Self::merge)
    }
}

impl fmt::Display for SplitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} saved, {} skipped, {} load errors, {} save errors",
            self.success, self.skipped, self.load_errors, self.save_errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(load_errors: usize, save_errors: usize, success: usize, skipped: usize) -> SplitStats {
        SplitStats {
            load_errors,
            save_errors,
            success,
            skipped,
        }
    }

    #[test]
    fn test_merge_adds_fields() {
        let total = stats(1, 2, 3, 4).merge(stats(10, 20, 30, 40));
        assert_eq!(total, stats(11, 22, 33, 44));
    }

    #[test]
    fn test_merge_is_commutative_and_associative() {
        let (a, b, c) = (stats(1, 0, 5, 2), stats(0, 3, 7, 0), stats(2, 1, 0, 9));
        assert_eq!(a + b, b + a);
        assert_eq!((a + b) + c, a + (b + c));
        assert_eq!(a + SplitStats::default(), a);
    }

    #[test]
    fn test_sum_and_add_assign() {
        let all = [stats(1, 0, 0, 0), stats(0, 1, 0, 0), stats(0, 0, 2, 1)];
        let summed: SplitStats = all.iter().copied().sum();

        let mut folded = SplitStats::default();
        for s in all {
            folded += s;
        }
        assert_eq!(summed, folded);
        assert_eq!(summed, stats(1, 1, 2, 1));
    }

    #[test]
    fn test_is_clean() {
        assert!(stats(0, 0, 5, 5).is_clean());
        assert!(!SplitStats::load_error().is_clean());
        assert!(!stats(0, 1, 0, 0).is_clean());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            stats(1, 2, 3, 4).to_string(),
            "3 saved, 4 skipped, 1 load errors, 2 save errors"
        );
    }
}

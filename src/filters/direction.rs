//! Gradient direction classification into four angular bands.
//!
//! Angles are folded into [0°, 360°) and assigned to one of four bands.
//! Each band is the union of two 45° half-open intervals, open below and
//! closed above, so every boundary value belongs to exactly one band:
//!
//! | Band | Intervals | Neighbors compared |
//! |------|-----------|--------------------|
//! | 45°  | (0, 45] ∪ (180, 225] | `(i-1, j+1)`, `(i+1, j-1)` |
//! | 90°  | (45, 90] ∪ (225, 270] | `(i-1, j)`, `(i+1, j)` |
//! | 135° | (90, 135] ∪ (270, 315] | `(i-1, j-1)`, `(i+1, j+1)` |
//! | 180° | {0} ∪ (135, 180] ∪ (315, 360) | `(i, j-1)`, `(i, j+1)` |

/// One of the four direction bands used by non-maximum suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionBucket {
    /// (0°, 45°] and (180°, 225°]
    Diagonal45,
    /// (45°, 90°] and (225°, 270°]
    Vertical90,
    /// (90°, 135°] and (270°, 315°]
    Diagonal135,
    /// Exactly 0°, (135°, 180°] and (315°, 360°)
    Horizontal180,
}

/// Fold an angle in degrees into [0, 360).
pub fn fold_degrees(degrees: f32) -> f32 {
    let folded = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

#[inline]
fn in_band(angle: f32, lower: f32) -> bool {
    (angle > lower && angle <= lower + 45.0) || (angle > lower + 180.0 && angle <= lower + 225.0)
}

impl DirectionBucket {
    /// All buckets in classification order.
    pub const ALL: [DirectionBucket; 4] = [
        DirectionBucket::Diagonal45,
        DirectionBucket::Vertical90,
        DirectionBucket::Diagonal135,
        DirectionBucket::Horizontal180,
    ];

    /// Membership predicate for an angle in degrees (folded first).
    ///
    /// Non-finite angles belong to no bucket.
    pub fn contains(self, degrees: f32) -> bool {
        let angle = fold_degrees(degrees);
        match self {
            DirectionBucket::Diagonal45 => in_band(angle, 0.0),
            DirectionBucket::Vertical90 => in_band(angle, 45.0),
            DirectionBucket::Diagonal135 => in_band(angle, 90.0),
            DirectionBucket::Horizontal180 => {
                angle == 0.0 || (angle > 135.0 && angle <= 180.0) || angle > 315.0
            }
        }
    }

    /// Classify an angle in degrees.
    ///
    /// Non-finite input falls through to [`DirectionBucket::Horizontal180`].
    pub fn classify(degrees: f32) -> Self {
        let angle = fold_degrees(degrees);
        if in_band(angle, 0.0) {
            DirectionBucket::Diagonal45
        } else if in_band(angle, 45.0) {
            DirectionBucket::Vertical90
        } else if in_band(angle, 90.0) {
            DirectionBucket::Diagonal135
        } else {
            DirectionBucket::Horizontal180
        }
    }

    /// Classify an angle in radians, as stored in a direction grid.
    pub fn from_radians(radians: f32) -> Self {
        Self::classify(radians.to_degrees())
    }

    /// Row/column offsets of the two neighbors compared during suppression.
    pub fn neighbor_offsets(self) -> [(isize, isize); 2] {
        match self {
            DirectionBucket::Diagonal45 => [(-1, 1), (1, -1)],
            DirectionBucket::Vertical90 => [(-1, 0), (1, 0)],
            DirectionBucket::Diagonal135 => [(-1, -1), (1, 1)],
            DirectionBucket::Horizontal180 => [(0, -1), (0, 1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matching(degrees: f32) -> Vec<DirectionBucket> {
        DirectionBucket::ALL
            .into_iter()
            .filter(|b| b.contains(degrees))
            .collect()
    }

    #[test]
    fn test_boundaries_belong_to_lower_band() {
        assert_eq!(DirectionBucket::classify(45.0), DirectionBucket::Diagonal45);
        assert_eq!(DirectionBucket::classify(90.0), DirectionBucket::Vertical90);
        assert_eq!(DirectionBucket::classify(135.0), DirectionBucket::Diagonal135);
        assert_eq!(DirectionBucket::classify(180.0), DirectionBucket::Horizontal180);
        assert_eq!(DirectionBucket::classify(225.0), DirectionBucket::Diagonal45);
        assert_eq!(DirectionBucket::classify(270.0), DirectionBucket::Vertical90);
        assert_eq!(DirectionBucket::classify(315.0), DirectionBucket::Diagonal135);
    }

    #[test]
    fn test_zero_and_full_turn_are_horizontal() {
        assert_eq!(DirectionBucket::classify(0.0), DirectionBucket::Horizontal180);
        assert_eq!(DirectionBucket::classify(360.0), DirectionBucket::Horizontal180);
        assert_eq!(DirectionBucket::classify(-0.0), DirectionBucket::Horizontal180);
    }

    #[test]
    fn test_negative_angles_fold() {
        // -45 folds to 315
        assert_eq!(DirectionBucket::classify(-45.0), DirectionBucket::Diagonal135);
        // -90 folds to 270
        assert_eq!(DirectionBucket::classify(-90.0), DirectionBucket::Vertical90);
        assert_eq!(DirectionBucket::classify(-10.0), DirectionBucket::Horizontal180);
        assert_eq!(DirectionBucket::classify(-1e-9), DirectionBucket::Horizontal180);
    }

    #[test]
    fn test_classify_agrees_with_contains() {
        for step in 0..=7200 {
            let degrees = step as f32 * 0.1 - 360.0;
            let buckets = matching(degrees);
            assert_eq!(buckets.len(), 1, "angle {degrees} matched {buckets:?}");
            assert_eq!(buckets[0], DirectionBucket::classify(degrees));
        }
    }

    #[test]
    fn test_from_radians() {
        use std::f32::consts::FRAC_PI_4;
        assert_eq!(DirectionBucket::from_radians(FRAC_PI_4 * 0.5), DirectionBucket::Diagonal45);
        assert_eq!(DirectionBucket::from_radians(-FRAC_PI_4 * 0.5), DirectionBucket::Horizontal180);
        assert_eq!(DirectionBucket::from_radians(0.0), DirectionBucket::Horizontal180);
    }

    #[test]
    fn test_non_finite_angles() {
        assert_eq!(DirectionBucket::classify(f32::NAN), DirectionBucket::Horizontal180);
        assert!(matching(f32::NAN).is_empty());
    }

    #[test]
    fn test_neighbor_offsets_are_opposite() {
        for bucket in DirectionBucket::ALL {
            let [(r0, c0), (r1, c1)] = bucket.neighbor_offsets();
            assert_eq!((r0, c0), (-r1, -c1));
        }
    }
}

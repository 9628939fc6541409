//! Distance-to-influence falloff for proximity effects
//!
//! Glyph gravity scales with how close the pointer is to a glyph center;
//! this is the single definition of that falloff.

/// Linear falloff from 1.0 at distance 0 to 0.0 at `distance >= radius`.
///
/// A non-positive radius yields no influence anywhere.
#[inline]
pub fn influence(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn full_influence_at_zero_distance() {
        assert_eq!(influence(0.0, 100.0), 1.0);
    }

    #[test]
    fn no_influence_at_or_past_radius() {
        assert_eq!(influence(100.0, 100.0), 0.0);
        assert_eq!(influence(250.0, 100.0), 0.0);
    }

    #[test]
    fn linear_midpoint() {
        assert!((influence(50.0, 100.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn degenerate_radius_is_dead() {
        assert_eq!(influence(10.0, 0.0), 0.0);
        assert_eq!(influence(10.0, -5.0), 0.0);
    }

    proptest! {
        #[test]
        fn output_stays_in_unit_range(d in 0.0f32..10_000.0, r in -100.0f32..10_000.0) {
            let f = influence(d, r);
            prop_assert!((0.0..=1.0).contains(&f));
        }

        #[test]
        fn closer_is_never_weaker(d in 0.0f32..1_000.0, r in 1.0f32..1_000.0) {
            prop_assert!(influence(d * 0.5, r) >= influence(d, r));
        }
    }
}

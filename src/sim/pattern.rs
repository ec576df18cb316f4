//! Bullet pattern generators

use glam::Vec2;

use crate::{deg_to_rad, polar_to_cartesian};

/// Velocity of a bullet fired at `degree` with the given speed
#[inline]
pub fn aimed_velocity(degree: f32, speed: f32) -> Vec2 {
    polar_to_cartesian(speed, deg_to_rad(degree))
}

/// `count` velocities spread evenly around a circle
///
/// Index `i` points at `i * 360 / count` degrees, so the first bullet always
/// flies along +x. A non-positive count yields an empty pattern.
pub fn circular_burst(count: i32, speed: f32) -> Vec<Vec2> {
    if count <= 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f32;
    (0..count)
        .map(|i| aimed_velocity(step * i as f32, speed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_burst() {
        let burst = circular_burst(10, 2.0);
        assert_eq!(burst.len(), 10);
        assert!((burst[0] - Vec2::new(2.0, 0.0)).length() < 1e-5);
        // 36° steps: index 5 points straight back along -x
        assert!((burst[5] - Vec2::new(-2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_degenerate_counts_are_empty() {
        assert!(circular_burst(0, 2.0).is_empty());
        assert!(circular_burst(-3, 2.0).is_empty());
    }

    #[test]
    fn test_same_input_same_output() {
        assert_eq!(circular_burst(7, 3.5), circular_burst(7, 3.5));
    }

    proptest! {
        #[test]
        fn burst_has_count_vectors_of_equal_speed(count in 1i32..64, speed in 0.1f32..20.0) {
            let burst = circular_burst(count, speed);
            prop_assert_eq!(burst.len(), count as usize);
            for v in &burst {
                prop_assert!((v.length() - speed).abs() < 1e-3 * speed.max(1.0));
            }
        }

        #[test]
        fn burst_angles_are_evenly_spaced(count in 1i32..64, speed in 0.1f32..20.0) {
            let burst = circular_burst(count, speed);
            let step = std::f32::consts::TAU / count as f32;
            for (i, v) in burst.iter().enumerate() {
                let expected = polar_to_cartesian(speed, step * i as f32);
                prop_assert!((*v - expected).length() < 1e-3 * speed.max(1.0));
            }
        }
    }
}

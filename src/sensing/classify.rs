use super::{
    config::{SensorConfig, SWIPE_DIFFERENCE_MULTIPLE},
    types::Gesture,
};

/// Sorts `values` in place and returns the middle value. Even lengths
/// interpolate the two middle values.
pub fn median(values: &mut [f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Press wins over the directional checks; `None` means the motion was
/// ambiguous.
pub fn classify_swipe(left_avg: f32, right_avg: f32, config: &SensorConfig) -> Option<Gesture> {
    if left_avg <= config.left_distance_cm && right_avg <= config.right_distance_cm {
        Some(Gesture::Press)
    } else if right_avg * SWIPE_DIFFERENCE_MULTIPLE <= left_avg {
        Some(Gesture::SwipeRight)
    } else if left_avg * SWIPE_DIFFERENCE_MULTIPLE <= right_avg {
        Some(Gesture::SwipeLeft)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensing::config::DEFAULT_SENSOR_CONFIG;

    fn thresholds(left: f32, right: f32) -> SensorConfig {
        SensorConfig {
            left_distance_cm: left,
            right_distance_cm: right,
            ..DEFAULT_SENSOR_CONFIG
        }
    }

    #[test]
    fn median_of_odd_sequence_is_sorted_middle() {
        let mut values = [31.0, 4.5, 18.25, 90.0, 17.0, 18.0];
        assert_eq!(median(&mut values[..5]), Some(18.25));
        assert_eq!(median(&mut [7.0]), Some(7.0));
        assert_eq!(median(&mut []), None);
    }

    #[test]
    fn median_is_order_invariant() {
        let orders = [
            [12.0, 40.0, 3.0, 25.0, 18.0, 9.0, 30.0],
            [40.0, 30.0, 25.0, 18.0, 12.0, 9.0, 3.0],
            [3.0, 9.0, 12.0, 18.0, 25.0, 30.0, 40.0],
            [25.0, 3.0, 30.0, 12.0, 40.0, 18.0, 9.0],
        ];
        for mut order in orders {
            assert_eq!(median(&mut order), Some(18.0));
        }
    }

    #[test]
    fn median_of_even_sequence_interpolates() {
        assert_eq!(median(&mut [10.0, 2.0, 8.0, 4.0]), Some(6.0));
    }

    #[test]
    fn median_rejects_single_outlier() {
        let mut values = [22.0, 21.5, 400.0, 22.5, 21.0, 23.0];
        let m = median(&mut values).expect("non-empty");
        assert!((m - 22.25).abs() < 1e-6);
    }

    #[test]
    fn far_left_reading_is_swipe_right() {
        assert_eq!(
            classify_swipe(40.0, 20.0, &thresholds(10.0, 10.0)),
            Some(Gesture::SwipeRight)
        );
    }

    #[test]
    fn far_right_reading_is_swipe_left() {
        assert_eq!(
            classify_swipe(20.0, 40.0, &thresholds(10.0, 10.0)),
            Some(Gesture::SwipeLeft)
        );
    }

    #[test]
    fn both_within_threshold_is_press() {
        let config = thresholds(30.0, 30.0);
        assert_eq!(classify_swipe(15.0, 15.0, &config), Some(Gesture::Press));
        // Directional asymmetry does not override a press.
        assert_eq!(classify_swipe(28.0, 22.0, &config), Some(Gesture::Press));
        assert_eq!(classify_swipe(30.0, 30.0, &config), Some(Gesture::Press));
    }

    #[test]
    fn similar_distances_outside_threshold_are_ambiguous() {
        assert_eq!(classify_swipe(35.0, 33.0, &thresholds(30.0, 30.0)), None);
    }

    #[test]
    fn multiplier_separates_swipe_from_noise() {
        let config = thresholds(10.0, 10.0);
        assert_eq!(
            classify_swipe(26.01, 20.0, &config),
            Some(Gesture::SwipeRight)
        );
        assert_eq!(classify_swipe(25.9, 20.0, &config), None);
        assert_eq!(
            classify_swipe(20.0, 26.01, &config),
            Some(Gesture::SwipeLeft)
        );
    }

    #[test]
    fn medians_compare_unrounded() {
        let config = thresholds(10.0, 10.0);
        // Rounded to whole centimetres this would read 26 vs 20, a swipe.
        assert_eq!(classify_swipe(25.6, 20.0, &config), None);
        // Rounded this would read 10 vs 10, a press.
        assert_eq!(classify_swipe(10.4, 10.4, &config), None);
    }
}

use super::{config::MICROSECONDS_PER_CM, types::CentiCm};

/// One-way distance for a round-trip echo time.
pub fn distance_cm(elapsed_us: f32) -> f32 {
    elapsed_us / 2.0 / MICROSECONDS_PER_CM
}

/// Whether a round trip fits in the sensor timeout; only applied outside a
/// detection session.
pub fn within_timeout(elapsed_us: f32, sensor_timeout_us: u32) -> bool {
    elapsed_us <= sensor_timeout_us as f32
}

/// Rounds to two decimals for reporting. Negative and NaN inputs clamp to 0.
pub fn to_centi_cm(distance_cm: f32) -> CentiCm {
    let scaled = distance_cm * 100.0 + 0.5;
    if scaled.is_nan() || scaled < 0.0 {
        return CentiCm(0);
    }
    CentiCm(scaled.min(u32::MAX as f32) as u32)
}

// Unit conversion between display pixels and simulation metres

/// Display pixels per simulation metre
pub const DEFAULT_SCALE: f32 = 30.0;

/// Convert a display-space length to simulation units
pub fn to_sim_units(pixels: f32, scale: f32) -> f32 {
    pixels / scale
}

/// Convert a simulation length back to display pixels
pub fn to_display_units(metres: f32, scale: f32) -> f32 {
    metres * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_sim_units() {
        assert_eq!(to_sim_units(300.0, DEFAULT_SCALE), 10.0);
        assert_eq!(to_sim_units(0.0, DEFAULT_SCALE), 0.0);
        assert_eq!(to_sim_units(-15.0, DEFAULT_SCALE), -0.5);
    }

    #[test]
    fn test_units_round_trip_scale() {
        let metres = to_sim_units(451.0, DEFAULT_SCALE);
        assert_relative_eq!(to_display_units(metres, DEFAULT_SCALE), 451.0, epsilon = 1e-3);
    }
}

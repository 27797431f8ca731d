//! Tests for sRGB and L*a*b* conversions

#[cfg(test)]
mod tests {
    use texsynth::math::color::{Lab, linear_to_srgb, srgb_to_linear};

    // Tests reference colors convert to their known L*a*b* coordinates
    // Verified by dropping the sRGB linearization step
    #[test]
    fn test_reference_lab_values() {
        let white = Lab::from_rgb([255, 255, 255]);
        assert!((white.l - 100.0).abs() < 0.01, "white L {}", white.l);
        assert!(white.a.abs() < 0.01 && white.b.abs() < 0.01);

        let black = Lab::from_rgb([0, 0, 0]);
        assert!(black.l.abs() < 0.01);

        let red = Lab::from_rgb([255, 0, 0]);
        assert!((red.l - 53.24).abs() < 0.1, "red L {}", red.l);
        assert!((red.a - 80.09).abs() < 0.2, "red a {}", red.a);
        assert!((red.b - 67.20).abs() < 0.2, "red b {}", red.b);
    }

    // Tests colors survive a round trip within one channel step
    // Verified by swapping two rows of the inverse matrix
    #[test]
    fn test_round_trip_is_close() {
        for rgb in [[0, 0, 0], [255, 255, 255], [255, 0, 0], [11, 29, 58], [244, 233, 205]] {
            let back = Lab::from_rgb(rgb).to_rgb();
            for (a, b) in rgb.iter().zip(back.iter()) {
                assert!(a.abs_diff(*b) <= 1, "{rgb:?} came back as {back:?}");
            }
        }
    }

    // Tests mixing reaches both endpoints and lands between them
    // Verified by mixing only the lightness component
    #[test]
    fn test_mix_interpolates_components() {
        let a = Lab::from_rgb([0, 0, 255]);
        let b = Lab::from_rgb([255, 255, 0]);
        assert_eq!(a.mix(b, 0.0), a);
        let end = a.mix(b, 1.0);
        assert!((end.l - b.l).abs() < 1e-9 && (end.b - b.b).abs() < 1e-9);

        let mid = a.mix(b, 0.5);
        assert!((mid.l - (a.l + b.l) / 2.0).abs() < 1e-9);
        assert!((mid.a - (a.a + b.a) / 2.0).abs() < 1e-9);
    }

    // Tests the sRGB transfer functions invert each other and clamp
    // Verified by using a 2.2 gamma in only one direction
    #[test]
    fn test_transfer_functions_invert() {
        for i in 0..=20 {
            let c = f64::from(i) / 20.0;
            assert!((linear_to_srgb(srgb_to_linear(c)) - c).abs() < 1e-9);
        }
        assert!(linear_to_srgb(-0.5).abs() < f64::EPSILON);
        assert!((linear_to_srgb(1.5) - 1.0).abs() < 1e-12);
    }
}

//! Tests for color parsing, stop validation and palette lookup

#[cfg(test)]
mod tests {
    use texsynth::SynthError;
    use texsynth::noise::palette::{ColorStop, Palette, Rgb, validate_color_stops};

    fn close(actual: [u8; 3], expected: [u8; 3]) -> bool {
        actual
            .iter()
            .zip(expected.iter())
            .all(|(a, e)| a.abs_diff(*e) <= 1)
    }

    fn black_to_white() -> Vec<ColorStop> {
        vec![
            ColorStop::new(0.0, [0, 0, 0]),
            ColorStop::new(1.0, [255, 255, 255]),
        ]
    }

    // Tests hex colors parse with or without the leading hash
    // Verified by reading the channels in BGR order
    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(Rgb::parse_hex("#0b1d3a").ok(), Some(Rgb([0x0b, 0x1d, 0x3a])));
        assert_eq!("FF8000".parse::<Rgb>().ok(), Some(Rgb([255, 128, 0])));
        assert_eq!(Rgb([1, 2, 255]).to_string(), "#0102ff");

        for bad in ["", "#12345", "#1234567", "#gg0000", "#ffé000"] {
            assert!(Rgb::parse_hex(bad).is_err(), "{bad} should be rejected");
        }
    }

    // Tests the command-line stop syntax
    // Verified by splitting on the last colon of the color part
    #[test]
    fn test_parse_color_stop() {
        let stop: ColorStop = "0.25:#102030".parse().expect("valid stop");
        assert_eq!(stop, ColorStop::new(0.25, [0x10, 0x20, 0x30]));
        assert!("0.25".parse::<ColorStop>().is_err());
        assert!("half:#102030".parse::<ColorStop>().is_err());
    }

    // Tests stops deserialize from their manifest form
    // Verified by removing the string conversion attribute on Rgb
    #[test]
    fn test_color_stop_deserializes() {
        let stop: ColorStop =
            serde_json::from_str(r##"{ "offset": 1.0, "color": "#ffffff" }"##).expect("valid json");
        assert_eq!(stop, ColorStop::new(1.0, [255, 255, 255]));
        assert!(
            serde_json::from_str::<ColorStop>(r#"{ "offset": 1.0, "color": "white" }"#).is_err()
        );
    }

    // Tests empty, single, unsorted and partial stop lists are rejected
    // Verified by skipping the ordering check
    #[test]
    fn test_validate_color_stops_rejections() {
        let cases: Vec<Vec<ColorStop>> = vec![
            vec![],
            vec![ColorStop::new(0.0, [0, 0, 0])],
            vec![
                ColorStop::new(0.0, [0, 0, 0]),
                ColorStop::new(0.7, [1, 1, 1]),
                ColorStop::new(0.3, [2, 2, 2]),
                ColorStop::new(1.0, [3, 3, 3]),
            ],
            vec![ColorStop::new(0.1, [0, 0, 0]), ColorStop::new(1.0, [1, 1, 1])],
            vec![ColorStop::new(0.0, [0, 0, 0]), ColorStop::new(0.9, [1, 1, 1])],
            vec![ColorStop::new(0.0, [0, 0, 0]), ColorStop::new(f64::NAN, [1, 1, 1])],
            vec![ColorStop::new(0.0, [0, 0, 0]), ColorStop::new(1.5, [1, 1, 1])],
        ];

        for stops in &cases {
            assert!(
                matches!(
                    validate_color_stops(stops),
                    Err(SynthError::InvalidParameter {
                        parameter: "color_stops",
                        ..
                    })
                ),
                "{stops:?} should be rejected"
            );
        }

        assert!(validate_color_stops(&black_to_white()).is_ok());
    }

    // Tests the palette returns stop colors at and beyond the ends
    // Verified by removing the clamp below the first stop
    #[test]
    fn test_color_at_endpoints_and_clamping() {
        let palette = Palette::new(&black_to_white()).expect("valid stops");
        assert_eq!(palette.len(), 2);
        assert!(!palette.is_empty());
        assert_eq!(palette.color_at(0.0), [0, 0, 0]);
        assert_eq!(palette.color_at(-3.0), [0, 0, 0]);
        assert_eq!(palette.color_at(1.0), [255, 255, 255]);
        assert_eq!(palette.color_at(7.0), [255, 255, 255]);
        assert_eq!(palette.color_at(f64::NAN), [0, 0, 0]);
    }

    // Tests interpolation is perceptual and monotonic in lightness
    // Verified by interpolating raw sRGB channels instead of L*a*b*
    #[test]
    fn test_color_at_interpolates_in_lab() {
        let palette = Palette::new(&black_to_white()).expect("valid stops");
        let [r, g, b] = palette.color_at(0.5);
        assert_eq!(r, g);
        assert_eq!(g, b);
        // L* = 50 is sRGB 119, while a linear sRGB midpoint would be 128
        assert!((117..=121).contains(&r), "midpoint {r}");

        let mut previous = 0;
        for i in 0..=20 {
            let [value, _, _] = palette.color_at(f64::from(i) / 20.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    // Tests coincident offsets create a hard edge
    // Verified by interpolating across the zero-width span
    #[test]
    fn test_hard_edge_between_equal_offsets() {
        let stops = vec![
            ColorStop::new(0.0, [255, 0, 0]),
            ColorStop::new(0.5, [255, 0, 0]),
            ColorStop::new(0.5, [0, 0, 255]),
            ColorStop::new(1.0, [0, 0, 255]),
        ];
        let palette = Palette::new(&stops).expect("equal offsets are allowed");
        assert!(close(palette.color_at(0.49), [255, 0, 0]));
        assert!(close(palette.color_at(0.51), [0, 0, 255]));
    }

    // Tests palette construction surfaces validation errors
    // Verified by skipping validation in the constructor
    #[test]
    fn test_palette_rejects_empty_stops() {
        assert!(Palette::new(&[]).is_err());
    }
}

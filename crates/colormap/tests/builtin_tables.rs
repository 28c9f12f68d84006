//! The built-in ramps against exported stop tables.

use aspectslope_colormap::{build_ramp, color_at, ColorRamp, Direction, Rgba, StopTable, GREY, HIGHLIGHT};

const NO_PREFERENCE: &str = include_str!("data/no_preference.txt");
const NORTH: &str = include_str!("data/north.txt");

fn exported(text: &str) -> ColorRamp {
    StopTable::parse(text)
        .expect("fixture parses")
        .to_ramp()
        .expect("fixture is a valid ramp")
}

#[test]
fn rainbow_matches_export() {
    assert_eq!(build_ramp(Direction::NoPreference), exported(NO_PREFERENCE));
}

#[test]
fn north_matches_export() {
    assert_eq!(build_ramp(Direction::North), exported(NORTH));
}

#[test]
fn indented_export_parses_identically() {
    let indented: String = NORTH
        .lines()
        .map(|l| format!("            {}\n", l))
        .collect();
    assert_eq!(exported(&indented), exported(NORTH));
}

#[test]
fn every_direction_highlights_its_own_band() {
    for d in Direction::ALL.into_iter().skip(1) {
        let ramp = build_ramp(d);
        let band_start = d.aspect_code().unwrap() as f64;
        for (shade, expected) in HIGHLIGHT.iter().enumerate() {
            let code = band_start + 2.0 * shade as f64;
            assert_eq!(color_at(&ramp, code), *expected, "{} at {}", d, code);
        }

        let others = (1..=8).map(|b| b as f64 * 10.0).filter(|&c| c != band_start);
        for code in others {
            assert_eq!(color_at(&ramp, code), GREY[0], "{} at {}", d, code);
        }
    }
}

#[test]
fn rainbow_bands_start_neutral() {
    let ramp = build_ramp(Direction::NoPreference);
    for band in 1..=8 {
        assert_eq!(
            color_at(&ramp, band as f64 * 10.0),
            Rgba::opaque(181, 181, 181)
        );
    }
}

#[test]
fn export_is_stable_text() {
    let table = StopTable::from_ramp(&build_ramp(Direction::North), |_| "label".into());
    assert_eq!(table.to_string(), NORTH.trim_end());
}

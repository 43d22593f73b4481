// Host-side tests for the settings editor model.

use folio_core::settings::{numeric_control, ColorKey, NumericKey, COLOR_CONTROLS, NUMERIC_CONTROLS};
use folio_core::{Rgb, SettingChange, SettingEffect, Settings, SettingsError};

#[test]
fn control_ids_are_unique() {
    let mut ids: Vec<&str> = NUMERIC_CONTROLS
        .iter()
        .map(|c| c.id)
        .chain(COLOR_CONTROLS.iter().map(|c| c.id))
        .collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn defaults_sit_inside_their_ranges() {
    let settings = Settings::default();
    for control in NUMERIC_CONTROLS {
        let v = settings.numeric(control.key);
        assert!(v >= control.min && v <= control.max, "{} = {}", control.id, v);
    }
}

#[test]
fn snapping_clamps_and_rounds_to_step() {
    let branches = numeric_control(NumericKey::GalaxyBranches);
    assert_eq!(branches.snap(3.4), 3.0);
    assert_eq!(branches.snap(0.0), 1.0);
    assert_eq!(branches.snap(42.0), 10.0);

    let count = numeric_control(NumericKey::GalaxyCount);
    assert_eq!(count.snap(1499.0), 1000.0);
    assert_eq!(count.snap(1500.0), 2000.0);
}

#[test]
fn parse_maps_ids_to_changes() {
    assert_eq!(
        SettingChange::parse("galaxy-branches", " 5 ").unwrap(),
        SettingChange::Numeric(NumericKey::GalaxyBranches, 5.0)
    );
    assert_eq!(
        SettingChange::parse("material-color", "#ffeded").unwrap(),
        SettingChange::Color(ColorKey::Material, Rgb::from_u32(0xffeded))
    );
}

#[test]
fn parse_rejects_bad_input() {
    assert!(matches!(
        SettingChange::parse("no-such-control", "1"),
        Err(SettingsError::UnknownId(_))
    ));
    assert!(matches!(
        SettingChange::parse("galaxy-spin", "fast"),
        Err(SettingsError::NotFinite { id: "galaxy-spin" })
    ));
    assert!(matches!(
        SettingChange::parse("galaxy-inside-color", "ff6030"),
        Err(SettingsError::Color { .. })
    ));
}

#[test]
fn apply_reports_the_required_effect() {
    let mut settings = Settings::default();
    let effect = settings
        .apply(SettingChange::Numeric(NumericKey::GalaxySpin, 2.5))
        .unwrap();
    assert_eq!(effect, SettingEffect::RegenerateGalaxy);
    assert_eq!(settings.galaxy.spin, 2.5);

    let effect = settings
        .apply(SettingChange::Color(ColorKey::GalaxyOutside, Rgb::WHITE))
        .unwrap();
    assert_eq!(effect, SettingEffect::RegenerateGalaxy);
    assert_eq!(settings.galaxy.outside_color, Rgb::WHITE);

    let effect = settings
        .apply(SettingChange::Numeric(NumericKey::FieldCount, 1.0))
        .unwrap();
    assert_eq!(effect, SettingEffect::RegenerateField);
    assert_eq!(settings.field_count, 1000);
}

#[test]
fn apply_rejects_non_finite_values() {
    let mut settings = Settings::default();
    let before = settings.clone();
    assert!(settings
        .apply(SettingChange::Numeric(NumericKey::GalaxyRadius, f64::NAN))
        .is_err());
    assert_eq!(settings, before);
}

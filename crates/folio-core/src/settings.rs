//! Runtime-editable parameters and the control descriptors the settings
//! panels are built from.

use crate::color::{ColorParseError, Rgb};
use crate::constants::*;
use crate::generate::GalaxyParams;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericKey {
    FieldCount,
    GalaxyCount,
    GalaxySize,
    GalaxyRadius,
    GalaxyBranches,
    GalaxySpin,
    GalaxyRandomness,
    GalaxyRandomnessPower,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorKey {
    Material,
    GalaxyInside,
    GalaxyOutside,
}

/// Slider bounds for one numeric control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericControl {
    pub key: NumericKey,
    pub id: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl NumericControl {
    /// Clamp into range and snap onto the step grid anchored at `min`.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

pub const NUMERIC_CONTROLS: &[NumericControl] = &[
    NumericControl {
        key: NumericKey::FieldCount,
        id: "field-count",
        label: "count",
        min: 1000.0,
        max: 300_000.0,
        step: 1000.0,
    },
    NumericControl {
        key: NumericKey::GalaxyCount,
        id: "galaxy-count",
        label: "galaxy count",
        min: 1000.0,
        max: 1_000_000.0,
        step: 1000.0,
    },
    NumericControl {
        key: NumericKey::GalaxySize,
        id: "galaxy-size",
        label: "size",
        min: 0.0001,
        max: 0.1,
        step: 0.0001,
    },
    NumericControl {
        key: NumericKey::GalaxyRadius,
        id: "galaxy-radius",
        label: "radius",
        min: 0.01,
        max: 20.0,
        step: 0.01,
    },
    NumericControl {
        key: NumericKey::GalaxyBranches,
        id: "galaxy-branches",
        label: "branches",
        min: 1.0,
        max: 10.0,
        step: 1.0,
    },
    NumericControl {
        key: NumericKey::GalaxySpin,
        id: "galaxy-spin",
        label: "spin",
        min: -5.0,
        max: 5.0,
        step: 0.001,
    },
    NumericControl {
        key: NumericKey::GalaxyRandomness,
        id: "galaxy-randomness",
        label: "randomness",
        min: 0.0,
        max: 2.0,
        step: 0.001,
    },
    NumericControl {
        key: NumericKey::GalaxyRandomnessPower,
        id: "galaxy-randomness-power",
        label: "randomness power",
        min: 1.0,
        max: 10.0,
        step: 0.001,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorControl {
    pub key: ColorKey,
    pub id: &'static str,
    pub label: &'static str,
    /// Live controls apply on every change; others only on commit.
    pub live: bool,
}

pub const COLOR_CONTROLS: &[ColorControl] = &[
    ColorControl {
        key: ColorKey::Material,
        id: "material-color",
        label: "materialColor",
        live: true,
    },
    ColorControl {
        key: ColorKey::GalaxyInside,
        id: "galaxy-inside-color",
        label: "insideColor",
        live: false,
    },
    ColorControl {
        key: ColorKey::GalaxyOutside,
        id: "galaxy-outside-color",
        label: "outsideColor",
        live: false,
    },
];

pub fn numeric_control(key: NumericKey) -> &'static NumericControl {
    NUMERIC_CONTROLS
        .iter()
        .find(|c| c.key == key)
        .unwrap_or(&NUMERIC_CONTROLS[0])
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SettingsError {
    #[error("unknown setting {0:?}")]
    UnknownId(String),
    #[error("setting {id} received a non-finite value")]
    NotFinite { id: &'static str },
    #[error("setting {id}: {source}")]
    Color {
        id: &'static str,
        #[source]
        source: ColorParseError,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettingChange {
    Numeric(NumericKey, f64),
    Color(ColorKey, Rgb),
}

impl SettingChange {
    /// Build a change from a control id and its raw string value, as
    /// delivered by form inputs.
    pub fn parse(id: &str, raw: &str) -> Result<Self, SettingsError> {
        if let Some(c) = NUMERIC_CONTROLS.iter().find(|c| c.id == id) {
            let value: f64 = raw
                .trim()
                .parse()
                .map_err(|_| SettingsError::NotFinite { id: c.id })?;
            return Ok(SettingChange::Numeric(c.key, value));
        }
        if let Some(c) = COLOR_CONTROLS.iter().find(|c| c.id == id) {
            let rgb = Rgb::from_hex(raw).map_err(|source| SettingsError::Color { id: c.id, source })?;
            return Ok(SettingChange::Color(c.key, rgb));
        }
        Err(SettingsError::UnknownId(id.to_string()))
    }
}

/// What a change requires of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingEffect {
    RegenerateField,
    RegenerateGalaxy,
    Recolor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub field_count: u32,
    pub galaxy: GalaxyParams,
    pub material_color: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_count: FIELD_DEFAULT_COUNT,
            galaxy: GalaxyParams::default(),
            material_color: Rgb::from_u32(MATERIAL_COLOR),
        }
    }
}

impl Settings {
    pub fn numeric(&self, key: NumericKey) -> f64 {
        let g = &self.galaxy;
        match key {
            NumericKey::FieldCount => self.field_count as f64,
            NumericKey::GalaxyCount => g.count as f64,
            NumericKey::GalaxySize => g.size as f64,
            NumericKey::GalaxyRadius => g.radius as f64,
            NumericKey::GalaxyBranches => g.branches as f64,
            NumericKey::GalaxySpin => g.spin as f64,
            NumericKey::GalaxyRandomness => g.randomness as f64,
            NumericKey::GalaxyRandomnessPower => g.randomness_power as f64,
        }
    }

    pub fn color(&self, key: ColorKey) -> Rgb {
        match key {
            ColorKey::Material => self.material_color,
            ColorKey::GalaxyInside => self.galaxy.inside_color,
            ColorKey::GalaxyOutside => self.galaxy.outside_color,
        }
    }

    pub fn apply(&mut self, change: SettingChange) -> Result<SettingEffect, SettingsError> {
        match change {
            SettingChange::Numeric(key, value) => {
                let control = numeric_control(key);
                if !value.is_finite() {
                    return Err(SettingsError::NotFinite { id: control.id });
                }
                let v = control.snap(value);
                let g = &mut self.galaxy;
                match key {
                    NumericKey::FieldCount => {
                        self.field_count = v as u32;
                        return Ok(SettingEffect::RegenerateField);
                    }
                    NumericKey::GalaxyCount => g.count = v as u32,
                    NumericKey::GalaxySize => g.size = v as f32,
                    NumericKey::GalaxyRadius => g.radius = v as f32,
                    NumericKey::GalaxyBranches => g.branches = v as u32,
                    NumericKey::GalaxySpin => g.spin = v as f32,
                    NumericKey::GalaxyRandomness => g.randomness = v as f32,
                    NumericKey::GalaxyRandomnessPower => g.randomness_power = v as f32,
                }
                Ok(SettingEffect::RegenerateGalaxy)
            }
            SettingChange::Color(ColorKey::Material, rgb) => {
                self.material_color = rgb;
                Ok(SettingEffect::Recolor)
            }
            SettingChange::Color(ColorKey::GalaxyInside, rgb) => {
                self.galaxy.inside_color = rgb;
                Ok(SettingEffect::RegenerateGalaxy)
            }
            SettingChange::Color(ColorKey::GalaxyOutside, rgb) => {
                self.galaxy.outside_color = rgb;
                Ok(SettingEffect::RegenerateGalaxy)
            }
        }
    }
}

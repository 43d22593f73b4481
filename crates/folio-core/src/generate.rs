//! Procedural point clouds: the scattered background field and the spiral
//! galaxy.
//!
//! Both generators are pure functions of their parameters and a random
//! source. Callers that want reproducible output pass a seeded RNG; the
//! running scene uses an entropy-seeded one, so consecutive regenerations
//! differ.

use crate::color::Rgb;
use crate::constants::*;
use rand::Rng;
use std::f32::consts::TAU;
use thiserror::Error;

/// Interleaved `x, y, z` positions with an optional parallel `r, g, b`
/// color array of the same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointBuffer {
    pub positions: Vec<f32>,
    pub colors: Option<Vec<f32>>,
}

impl PointBuffer {
    pub fn with_capacity(count: usize, with_colors: bool) -> Self {
        Self {
            positions: Vec::with_capacity(count * 3),
            colors: with_colors.then(|| Vec::with_capacity(count * 3)),
        }
    }

    /// Number of points (positions are stored flat, three floats each).
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn point(&self, i: usize) -> [f32; 3] {
        [
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        ]
    }

    #[inline]
    pub fn color(&self, i: usize) -> Option<[f32; 3]> {
        self.colors
            .as_ref()
            .map(|c| [c[i * 3], c[i * 3 + 1], c[i * 3 + 2]])
    }

    fn push(&mut self, p: [f32; 3]) {
        self.positions.extend_from_slice(&p);
    }

    fn push_color(&mut self, c: Rgb) {
        if let Some(colors) = &mut self.colors {
            colors.extend_from_slice(&c.to_array());
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamsError {
    #[error("galaxy radius must be a positive finite number, got {0}")]
    Radius(f32),
    #[error("galaxy needs at least one branch")]
    NoBranches,
    #[error("randomness power must be >= 1, got {0}")]
    RandomnessPower(f32),
    #[error("randomness must be a non-negative finite number, got {0}")]
    Randomness(f32),
    #[error("point size must be positive, got {0}")]
    Size(f32),
    #[error("field vertical span is inverted: top {top} < bottom {bottom}")]
    Span { top: f32, bottom: f32 },
}

/// Parameters for the uniform background field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    pub count: u32,
    pub half_extent: f32,
    pub y_top: f32,
    pub y_bottom: f32,
}

impl FieldParams {
    /// Field covering every section: from half a spacing above the first
    /// mesh down to the bottom of the last section.
    pub fn for_sections(count: u32, spacing: f32, sections: usize) -> Self {
        let y_top = spacing * 0.5;
        Self {
            count,
            half_extent: FIELD_HALF_EXTENT,
            y_top,
            y_bottom: y_top - spacing * sections as f32,
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.y_top >= self.y_bottom) {
            return Err(ParamsError::Span {
                top: self.y_top,
                bottom: self.y_bottom,
            });
        }
        Ok(())
    }
}

/// Parameters for the spiral galaxy. Mirrors the settings panel fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalaxyParams {
    pub count: u32,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Rgb,
    pub outside_color: Rgb,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: GALAXY_DEFAULT_COUNT,
            size: GALAXY_DEFAULT_SIZE,
            radius: GALAXY_DEFAULT_RADIUS,
            branches: GALAXY_DEFAULT_BRANCHES,
            spin: GALAXY_DEFAULT_SPIN,
            randomness: GALAXY_DEFAULT_RANDOMNESS,
            randomness_power: GALAXY_DEFAULT_RANDOMNESS_POWER,
            inside_color: Rgb::from_u32(GALAXY_INSIDE_COLOR),
            outside_color: Rgb::from_u32(GALAXY_OUTSIDE_COLOR),
        }
    }
}

impl GalaxyParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ParamsError::Radius(self.radius));
        }
        if self.branches == 0 {
            return Err(ParamsError::NoBranches);
        }
        if !(self.randomness_power >= 1.0) {
            return Err(ParamsError::RandomnessPower(self.randomness_power));
        }
        if !(self.randomness.is_finite() && self.randomness >= 0.0) {
            return Err(ParamsError::Randomness(self.randomness));
        }
        if !(self.size > 0.0) {
            return Err(ParamsError::Size(self.size));
        }
        Ok(())
    }
}

/// Scatter `count` points uniformly in a box spanning every section.
pub fn generate_field<R: Rng + ?Sized>(
    params: &FieldParams,
    rng: &mut R,
) -> Result<PointBuffer, ParamsError> {
    params.validate()?;
    let n = params.count as usize;
    let mut buf = PointBuffer::with_capacity(n, false);
    let span = params.y_top - params.y_bottom;
    for _ in 0..n {
        let x = (rng.gen::<f32>() - 0.5) * 2.0 * params.half_extent;
        let y = params.y_top - rng.gen::<f32>() * span;
        let z = (rng.gen::<f32>() - 0.5) * 2.0 * params.half_extent;
        buf.push([x, y, z]);
    }
    Ok(buf)
}

/// Spiral galaxy with `branches` arms twisted by `spin`, colored from the
/// inside color at the core to the outside color at the rim.
pub fn generate_galaxy<R: Rng + ?Sized>(
    params: &GalaxyParams,
    rng: &mut R,
) -> Result<PointBuffer, ParamsError> {
    params.validate()?;
    let n = params.count as usize;
    let mut buf = PointBuffer::with_capacity(n, true);
    let branches = params.branches as usize;
    for i in 0..n {
        let r = rng.gen::<f32>() * params.radius;
        let spin_angle = r * params.spin;
        let branch_angle = (i % branches) as f32 / branches as f32 * TAU;

        let ox = scatter_offset(rng, params, r);
        let oy = scatter_offset(rng, params, r);
        let oz = scatter_offset(rng, params, r);

        let angle = branch_angle + spin_angle;
        buf.push([ox + angle.cos() * r, oy, oz + angle.sin() * r]);
        buf.push_color(
            params
                .inside_color
                .lerp(params.outside_color, r / params.radius),
        );
    }
    Ok(buf)
}

// Most offsets land near zero; the power exponent controls how rare the
// large excursions are.
#[inline]
fn scatter_offset<R: Rng + ?Sized>(rng: &mut R, params: &GalaxyParams, r: f32) -> f32 {
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    rng.gen::<f32>().powf(params.randomness_power) * sign * params.randomness * r
}

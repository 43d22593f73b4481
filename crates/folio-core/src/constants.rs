use glam::Vec3;

// Shared scene tuning constants used by both web and native frontends.

// Section layout
pub const OBJECTS_DISTANCE: f32 = 4.0; // vertical spacing between section meshes
pub const SECTION_X: [f32; 3] = [2.0, -2.0, 2.0]; // alternating left/right placement

// Camera
pub const CAMERA_FOV_DEG: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_Z: f32 = 6.0; // camera distance inside the parallax group
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Parallax
pub const PARALLAX_AMPLITUDE: f32 = 0.5; // pointer offset -> rig target
pub const PARALLAX_EASE_RATE: f32 = 5.0; // exponential smoothing rate per second

// Continuous spin (radians per second)
pub const SPIN_RATE: Vec3 = Vec3::new(0.1, 0.12, 0.0);
pub const SPIN_RATE_COMPANION: Vec3 = Vec3::new(0.1, 0.12, 0.12);

// Section transition
pub const SECTION_TWEEN_DURATION: f32 = 1.5;
pub const SECTION_TWEEN_DELTA: Vec3 = Vec3::new(6.0, 3.0, 0.0);
pub const COMPANION_TWEEN_DURATION: f32 = 1.0;

// Particle field
pub const FIELD_HALF_EXTENT: f32 = 5.0; // x,z ~ U(-5, 5)
pub const FIELD_DEFAULT_COUNT: u32 = 10_000;
pub const FIELD_POINT_SIZE: f32 = 0.1;

// Galaxy defaults
pub const GALAXY_DEFAULT_COUNT: u32 = 100_000;
pub const GALAXY_DEFAULT_SIZE: f32 = 0.01;
pub const GALAXY_DEFAULT_RADIUS: f32 = 5.0;
pub const GALAXY_DEFAULT_BRANCHES: u32 = 3;
pub const GALAXY_DEFAULT_SPIN: f32 = 1.0;
pub const GALAXY_DEFAULT_RANDOMNESS: f32 = 0.7;
pub const GALAXY_DEFAULT_RANDOMNESS_POWER: f32 = 3.0;
pub const GALAXY_INSIDE_COLOR: u32 = 0xff6030;
pub const GALAXY_OUTSIDE_COLOR: u32 = 0x1b3984;

// Materials and lighting
pub const MATERIAL_COLOR: u32 = 0xd68585;
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(1.0, 1.0, 0.0);

// Companion object (asset-loaded variant)
pub const TRAIL_PARTICLE_COUNT: usize = 120;
pub const TRAIL_POINT_SIZE: f32 = 0.06;
pub const COMPANION_SCALE: f32 = 0.5;
pub const COMPANION_PLACEHOLDER_RADIUS: f32 = 0.6;
pub const MAX_LOAD_ATTEMPTS: u32 = 3;

/// Default per-section resting spots for the companion, mirrored against the
/// section meshes so it never overlaps them.
pub fn default_companion_targets() -> Vec<Vec3> {
    SECTION_X
        .iter()
        .enumerate()
        .map(|(i, x)| Vec3::new(-x * 0.75, -OBJECTS_DISTANCE * i as f32, 1.0))
        .collect()
}

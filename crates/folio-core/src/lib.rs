pub mod asset;
pub mod color;
pub mod config;
pub mod constants;
pub mod frame;
pub mod generate;
pub mod geometry;
pub mod obj;
#[cfg(feature = "gpu")]
pub mod render;
pub mod scene;
pub mod section;
pub mod settings;
pub mod stage;
pub mod state;
pub mod trail;
pub mod tween;

pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");

pub use asset::{AssetAction, AssetEvent, AssetSlot, AssetState, LoadError};
pub use color::Rgb;
pub use config::{CompanionConfig, SceneConfig};
pub use generate::{generate_field, generate_galaxy, FieldParams, GalaxyParams, ParamsError, PointBuffer};
pub use scene::{CloudSlot, RenderBackend, RenderList, Scene};
pub use section::{section_index, SectionChange, SectionTracker};
pub use settings::{SettingChange, SettingEffect, Settings, SettingsError};
pub use stage::{Stage, StageError};

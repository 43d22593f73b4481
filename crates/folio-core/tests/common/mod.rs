// Recording renderer used by the scene, stage and frame tests.

#![allow(dead_code)]

use folio_core::generate::PointBuffer;
use folio_core::geometry::MeshData;
use folio_core::scene::{PointMaterial, RenderBackend, RenderList};
use folio_core::{SceneConfig, Settings, Stage};
use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CreateMesh(u32),
    ReleaseMesh(u32),
    CreatePoints { id: u32, len: usize },
    UpdatePoints { id: u32, len: usize },
    ReleasePoints(u32),
    Resize(u32, u32),
    Render,
}

pub struct FakeMesh(pub u32);

pub struct FakePoints {
    pub id: u32,
    pub len: usize,
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub view: Mat4,
    pub projection: Mat4,
    pub light_direction: Vec3,
    pub meshes: Vec<(u32, Mat4)>,
    pub points: Vec<(u32, PointMaterial)>,
}

#[derive(Default)]
pub struct RecordingBackend {
    next_id: u32,
    pub calls: Vec<Call>,
    pub live_meshes: BTreeSet<u32>,
    pub live_points: BTreeSet<u32>,
    pub frames: Vec<Frame>,
}

impl RecordingBackend {
    fn id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn last_frame(&self) -> &Frame {
        self.frames.last().expect("no frame rendered")
    }
}

impl RenderBackend for RecordingBackend {
    type Mesh = FakeMesh;
    type Points = FakePoints;
    type Error = ();

    fn create_mesh(&mut self, _mesh: &MeshData) -> FakeMesh {
        let id = self.id();
        self.live_meshes.insert(id);
        self.calls.push(Call::CreateMesh(id));
        FakeMesh(id)
    }

    fn release_mesh(&mut self, mesh: FakeMesh) {
        assert!(self.live_meshes.remove(&mesh.0), "double release of mesh {}", mesh.0);
        self.calls.push(Call::ReleaseMesh(mesh.0));
    }

    fn create_points(&mut self, buffer: &PointBuffer) -> FakePoints {
        let id = self.id();
        self.live_points.insert(id);
        self.calls.push(Call::CreatePoints {
            id,
            len: buffer.len(),
        });
        FakePoints {
            id,
            len: buffer.len(),
        }
    }

    fn update_points(&mut self, points: &mut FakePoints, buffer: &PointBuffer) {
        points.len = buffer.len();
        self.calls.push(Call::UpdatePoints {
            id: points.id,
            len: buffer.len(),
        });
    }

    fn release_points(&mut self, points: FakePoints) {
        assert!(self.live_points.remove(&points.id), "double release of points {}", points.id);
        self.calls.push(Call::ReleasePoints(points.id));
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Resize(width, height));
    }

    fn render(&mut self, list: &RenderList<'_, FakeMesh, FakePoints>) -> Result<(), ()> {
        self.calls.push(Call::Render);
        self.frames.push(Frame {
            view: list.view,
            projection: list.projection,
            light_direction: list.light_direction,
            meshes: list.meshes.iter().map(|d| (d.mesh.0, d.model)).collect(),
            points: list.points.iter().map(|d| (d.points.id, d.material)).collect(),
        });
        Ok(())
    }
}

/// Small point counts keep the tests quick.
pub fn small_config() -> SceneConfig {
    let mut settings = Settings::default();
    settings.field_count = 200;
    settings.galaxy.count = 300;
    SceneConfig {
        settings,
        ..SceneConfig::default()
    }
}

pub fn small_companion_config(path: &str) -> SceneConfig {
    SceneConfig {
        settings: small_config().settings,
        ..SceneConfig::with_companion(path)
    }
}

pub const VIEW_W: f32 = 1200.0;
pub const VIEW_H: f32 = 800.0;

pub fn stage_with(config: SceneConfig) -> Stage<RecordingBackend> {
    Stage::with_rng(
        RecordingBackend::default(),
        config,
        VIEW_W,
        VIEW_H,
        StdRng::seed_from_u64(7),
    )
    .expect("valid config")
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

pub fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-4
}

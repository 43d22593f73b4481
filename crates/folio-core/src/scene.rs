//! Scene assembly: owns every renderable handle and is the only place that
//! creates or releases them.

use crate::color::Rgb;
use crate::generate::PointBuffer;
use crate::geometry::MeshData;
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Renderer boundary. Implemented by the wgpu renderer in the front-ends and
/// by recording fakes in tests.
pub trait RenderBackend {
    type Mesh;
    type Points;
    type Error: std::fmt::Debug;

    fn create_mesh(&mut self, mesh: &MeshData) -> Self::Mesh;
    fn release_mesh(&mut self, mesh: Self::Mesh);

    fn create_points(&mut self, buffer: &PointBuffer) -> Self::Points;
    /// Overwrite positions in place; used by the per-frame trail.
    fn update_points(&mut self, points: &mut Self::Points, buffer: &PointBuffer);
    fn release_points(&mut self, points: Self::Points);

    /// Output size in physical pixels.
    fn resize(&mut self, width: u32, height: u32);
    fn render(&mut self, list: &RenderList<'_, Self::Mesh, Self::Points>) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMaterial {
    pub size: f32,
    /// Multiplied with per-point colors when present.
    pub color: Rgb,
    pub vertex_colors: bool,
}

pub struct MeshDraw<'a, M> {
    pub mesh: &'a M,
    pub model: Mat4,
    pub color: Rgb,
}

pub struct PointsDraw<'a, P> {
    pub points: &'a P,
    pub model: Mat4,
    pub material: PointMaterial,
}

/// Everything one frame needs, borrowed from the scene.
pub struct RenderList<'a, M, P> {
    pub view: Mat4,
    pub projection: Mat4,
    pub light_direction: Vec3,
    pub meshes: Vec<MeshDraw<'a, M>>,
    pub points: Vec<PointsDraw<'a, P>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles applied in X, Y, Z order.
    pub rotation: Vec3,
    pub scale: f32,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

pub struct SceneMesh<M> {
    pub handle: M,
    pub transform: Transform,
    pub visible: bool,
}

pub struct PointCloud<P> {
    pub handle: P,
    pub material: PointMaterial,
    pub len: usize,
}

/// Logical point clouds; each slot holds at most one live renderable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CloudSlot {
    Field,
    Galaxy,
    Trail,
}

pub struct Scene<B: RenderBackend> {
    backend: B,
    pub sections: Vec<SceneMesh<B::Mesh>>,
    pub companion: Option<SceneMesh<B::Mesh>>,
    clouds: FnvHashMap<CloudSlot, PointCloud<B::Points>>,
    pub material_color: Rgb,
}

impl<B: RenderBackend> Scene<B> {
    pub fn new(backend: B, material_color: Rgb) -> Self {
        Self {
            backend,
            sections: Vec::new(),
            companion: None,
            clouds: FnvHashMap::default(),
            material_color,
        }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn add_section_mesh(&mut self, mesh: &MeshData, position: Vec3) {
        let handle = self.backend.create_mesh(mesh);
        self.sections.push(SceneMesh {
            handle,
            transform: Transform::at(position),
            visible: true,
        });
    }

    /// Install the companion object, releasing any previous one.
    pub fn set_companion(&mut self, mesh: &MeshData, transform: Transform) {
        let handle = self.backend.create_mesh(mesh);
        let next = SceneMesh {
            handle,
            transform,
            visible: true,
        };
        if let Some(old) = self.companion.replace(next) {
            self.backend.release_mesh(old.handle);
        }
    }

    /// Upload `buffer` into `slot`. The new renderable is created and swapped
    /// in before the previous one is released, so a frame never observes the
    /// slot empty or doubled.
    pub fn replace_cloud(&mut self, slot: CloudSlot, buffer: &PointBuffer, material: PointMaterial) {
        let handle = self.backend.create_points(buffer);
        let next = PointCloud {
            handle,
            material,
            len: buffer.len(),
        };
        if let Some(old) = self.clouds.insert(slot, next) {
            self.backend.release_points(old.handle);
        }
        log::debug!("[scene] {:?} now holds {} points", slot, buffer.len());
    }

    pub fn update_cloud(&mut self, slot: CloudSlot, buffer: &PointBuffer) -> bool {
        match self.clouds.get_mut(&slot) {
            Some(cloud) => {
                self.backend.update_points(&mut cloud.handle, buffer);
                cloud.len = buffer.len();
                true
            }
            None => false,
        }
    }

    pub fn remove_cloud(&mut self, slot: CloudSlot) {
        if let Some(old) = self.clouds.remove(&slot) {
            self.backend.release_points(old.handle);
        }
    }

    #[inline]
    pub fn cloud(&self, slot: CloudSlot) -> Option<&PointCloud<B::Points>> {
        self.clouds.get(&slot)
    }

    pub fn cloud_material_mut(&mut self, slot: CloudSlot) -> Option<&mut PointMaterial> {
        self.clouds.get_mut(&slot).map(|c| &mut c.material)
    }

    #[inline]
    pub fn cloud_count(&self) -> usize {
        self.clouds.len()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.resize(width, height);
    }

    /// Issue one render call with the given camera matrices.
    pub fn render(&mut self, view: Mat4, projection: Mat4, light_direction: Vec3) -> Result<(), B::Error> {
        let color = self.material_color;
        let mut meshes: Vec<MeshDraw<'_, B::Mesh>> = self
            .sections
            .iter()
            .filter(|m| m.visible)
            .map(|m| MeshDraw {
                mesh: &m.handle,
                model: m.transform.matrix(),
                color,
            })
            .collect();
        if let Some(c) = self.companion.as_ref().filter(|c| c.visible) {
            meshes.push(MeshDraw {
                mesh: &c.handle,
                model: c.transform.matrix(),
                color,
            });
        }
        // Draw order is fixed so additive layers blend the same every frame.
        let points = [CloudSlot::Field, CloudSlot::Galaxy, CloudSlot::Trail]
            .iter()
            .filter_map(|slot| self.clouds.get(slot))
            .filter(|c| c.len > 0)
            .map(|c| PointsDraw {
                points: &c.handle,
                model: Mat4::IDENTITY,
                material: c.material,
            })
            .collect();
        let list = RenderList {
            view,
            projection,
            light_direction,
            meshes,
            points,
        };
        self.backend.render(&list)
    }
}

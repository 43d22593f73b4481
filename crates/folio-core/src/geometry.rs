//! Triangle meshes for the section objects and the companion placeholder.

use glam::Vec3;
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn push(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex {
            position: position.to_array(),
            normal: normal.normalize_or_zero().to_array(),
        });
        index
    }

    fn tri(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Replace all normals with area-weighted smooth normals.
    pub fn compute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertices.len()];
        for t in self.indices.chunks_exact(3) {
            let [a, b, c] = [t[0] as usize, t[1] as usize, t[2] as usize];
            let pa = Vec3::from(self.vertices[a].position);
            let pb = Vec3::from(self.vertices[b].position);
            let pc = Vec3::from(self.vertices[c].position);
            let n = (pb - pa).cross(pc - pa);
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        for (v, n) in self.vertices.iter_mut().zip(acc) {
            v.normal = n.normalize_or_zero().to_array();
        }
    }
}

/// Ring torus in the XY plane, `radius` to the tube center.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for j in 0..=radial_segments {
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let v = j as f32 / radial_segments as f32 * TAU;
            let ring = radius + tube * v.cos();
            let p = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.push(p, p - center);
        }
    }
    let row = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.tri(a, b, d);
            mesh.tri(b, c, d);
        }
    }
    mesh
}

/// Cone with its apex on +Y, centered on the origin, closed at the base.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = height * 0.5;
    let slope = radius / height;
    let mut apex = Vec::with_capacity(radial_segments as usize + 1);
    let mut rim = Vec::with_capacity(radial_segments as usize + 1);
    for x in 0..=radial_segments {
        let theta = x as f32 / radial_segments as f32 * TAU;
        let (s, c) = theta.sin_cos();
        let normal = Vec3::new(s, slope, c);
        apex.push(mesh.push(Vec3::new(0.0, half, 0.0), normal));
        rim.push(mesh.push(Vec3::new(radius * s, -half, radius * c), normal));
    }
    for x in 0..radial_segments as usize {
        mesh.tri(rim[x], rim[x + 1], apex[x + 1]);
    }

    let down = Vec3::NEG_Y;
    let center = mesh.push(Vec3::new(0.0, -half, 0.0), down);
    let mut base = Vec::with_capacity(radial_segments as usize + 1);
    for x in 0..=radial_segments {
        let theta = x as f32 / radial_segments as f32 * TAU;
        let (s, c) = theta.sin_cos();
        base.push(mesh.push(Vec3::new(radius * s, -half, radius * c), down));
    }
    for x in 0..radial_segments as usize {
        mesh.tri(center, base[x + 1], base[x]);
    }
    mesh
}

/// (p, q) torus knot swept with a circular tube.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let curve = |u: f32| {
        let q_over_p = q as f32 / p as f32 * u;
        let cs = q_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * q_over_p.sin() * 0.5,
        )
    };

    let mut mesh = MeshData::default();
    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p as f32 * TAU;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);
        let t = p2 - p1;
        let b = t.cross(p2 + p1).normalize_or_zero();
        let n = b.cross(t).normalize_or_zero();
        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let pos = p1 + n * cx + b * cy;
            mesh.push(pos, pos - p1);
        }
    }
    let row = radial_segments + 1;
    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            mesh.tri(a, b, d);
            mesh.tri(b, c, d);
        }
    }
    mesh
}

/// Flat-shaded octahedron; stands in for the companion asset when loading
/// gives up.
pub fn octahedron(radius: f32) -> MeshData {
    let axes = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ]
    .map(|v| v * radius);
    let faces: [[usize; 3]; 8] = [
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    let mut mesh = MeshData::default();
    for f in faces {
        let [a, b, c] = f.map(|i| axes[i]);
        let n = (b - a).cross(c - a);
        let ia = mesh.push(a, n);
        let ib = mesh.push(b, n);
        let ic = mesh.push(c, n);
        mesh.tri(ia, ib, ic);
    }
    mesh
}

/// The three section meshes in section order.
pub fn section_meshes() -> [MeshData; 3] {
    [
        torus(1.0, 0.4, 16, 60),
        cone(1.0, 2.0, 32),
        torus_knot(0.8, 0.35, 100, 16, 2, 3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices_in_range(m: &MeshData) -> bool {
        m.indices.iter().all(|&i| (i as usize) < m.vertices.len())
    }

    #[test]
    fn torus_counts_match_segments() {
        let m = torus(1.0, 0.4, 16, 60);
        assert_eq!(m.vertices.len(), 17 * 61);
        assert_eq!(m.triangle_count(), 16 * 60 * 2);
        assert!(indices_in_range(&m));
    }

    #[test]
    fn torus_vertices_lie_on_the_tube() {
        let m = torus(1.0, 0.4, 8, 12);
        for v in &m.vertices {
            let p = Vec3::from(v.position);
            let ring = (p.x * p.x + p.y * p.y).sqrt();
            let d = ((ring - 1.0).powi(2) + p.z * p.z).sqrt();
            assert!((d - 0.4).abs() < 1e-4);
        }
    }

    #[test]
    fn cone_spans_its_height() {
        let m = cone(1.0, 2.0, 32);
        assert!(indices_in_range(&m));
        let ys: Vec<f32> = m.vertices.iter().map(|v| v.position[1]).collect();
        let max = ys.iter().cloned().fold(f32::MIN, f32::max);
        let min = ys.iter().cloned().fold(f32::MAX, f32::min);
        assert_eq!(max, 1.0);
        assert_eq!(min, -1.0);
    }

    #[test]
    fn knot_and_octahedron_are_well_formed() {
        let k = torus_knot(0.8, 0.35, 100, 16, 2, 3);
        assert_eq!(k.triangle_count(), 100 * 16 * 2);
        assert!(indices_in_range(&k));
        let o = octahedron(1.0);
        assert_eq!(o.triangle_count(), 8);
        for v in &o.vertices {
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn computed_normals_are_unit_length() {
        let mut m = octahedron(2.0);
        m.compute_normals();
        for v in &m.vertices {
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-5);
        }
    }
}
